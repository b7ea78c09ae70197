//! PhishGuard CLI
//!
//! Offline companion to the API server:
//!
//! ```text
//! phishguard features https://example.com/login --schema extended
//! phishguard check --artifacts models --file urls.txt
//! phishguard evaluate --artifacts models --data phishing_test_scaled.csv
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use phishguard_core::evaluation::{evaluate_registry, LabeledDataset, DEFAULT_TARGET};
use phishguard_core::{
    ArtifactConfig, ClassifierRegistry, FeatureRecord, FeatureSchema, ModelId, UrlFeatureExtractor,
};

/// Built-in smoke-test list: 10 legitimate sites, then 10 phishing-style URLs
const SAMPLE_URLS: &[&str] = &[
    "https://www.apple.com/",
    "https://www.google.com/",
    "https://github.com/",
    "https://www.bankofamerica.com/",
    "https://www.wikipedia.org/",
    "https://www.nytimes.com/",
    "https://www.microsoft.com/",
    "https://www.amazon.com/",
    "https://www.bbc.co.uk/",
    "https://stackoverflow.com/questions",
    "http://secure-paypal-account-login.xyz",
    "http://login-paypal-secure.xyz",
    "http://appleid.apple.com-app.es/",
    "http://update-google-account.verify-login.info/",
    "http://bankofamerica.login.verify-online.top/",
    "http://secure-login-gmail.com/",
    "http://free-gift-amazon-prize.online/claim",
    "http://bit.ly/secure-login-123",
    "http://123.45.67.89/verify",
    "http://paypal.support.account.verify.online/login",
];

#[derive(Parser, Debug)]
#[command(author, version, about = "PhishGuard URL feature and model tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the feature vector for a URL as JSON
    Features {
        url: String,

        /// Feature schema: top20 or extended
        #[arg(long, default_value = "extended")]
        schema: FeatureSchema,
    },

    /// Run every available model over a list of URLs
    Check {
        /// File with one URL per line (defaults to the built-in sample list)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Artifact directory
        #[arg(long, default_value = "models")]
        artifacts: PathBuf,

        #[arg(long, default_value = "extended")]
        schema: FeatureSchema,
    },

    /// Score every available model against a labeled, pre-scaled CSV
    Evaluate {
        #[arg(long)]
        data: PathBuf,

        #[arg(long, default_value = "models")]
        artifacts: PathBuf,

        /// Target column name
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Features { url, schema } => {
            let vector = UrlFeatureExtractor::new(schema).extract(&url);
            println!("{}", serde_json::to_string_pretty(&vector)?);
        }
        Command::Check {
            file,
            artifacts,
            schema,
        } => run_check(file, ArtifactConfig::new(artifacts, schema))?,
        Command::Evaluate {
            data,
            artifacts,
            target,
        } => run_evaluate(data, ArtifactConfig::new(artifacts, FeatureSchema::default()), &target)?,
    }

    Ok(())
}

fn load_urls(file: Option<PathBuf>) -> Result<Vec<String>> {
    match file {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read URL list: {:?}", path))?;
            Ok(content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from)
                .collect())
        }
        None => Ok(SAMPLE_URLS.iter().map(|s| s.to_string()).collect()),
    }
}

/// One row per URL; a failing model is reported in place instead of aborting
fn run_check(file: Option<PathBuf>, config: ArtifactConfig) -> Result<()> {
    let registry = ClassifierRegistry::load(&config).context("Failed to load artifacts")?;
    let extractor = UrlFeatureExtractor::new(config.schema);
    let urls = load_urls(file)?;

    let header: Vec<String> = std::iter::once("url".to_string())
        .chain(ModelId::ALL.iter().map(|m| m.as_str().to_string()))
        .collect();
    println!("{}", header.join("\t"));

    for url in &urls {
        let record = FeatureRecord::from(&extractor.extract(url));
        let mut cells = vec![url.clone()];

        for id in ModelId::ALL {
            let cell = match registry.predict(id, &record) {
                Ok(res) => match res.probability_phishing {
                    Some(p) => format!("{} ({:.3})", res.prediction, p),
                    None => res.prediction.to_string(),
                },
                Err(e) => format!("error: {}", e),
            };
            cells.push(cell);
        }

        println!("{}", cells.join("\t"));
    }

    log::info!("Checked {} URLs", urls.len());
    Ok(())
}

fn run_evaluate(data: PathBuf, config: ArtifactConfig, target: &str) -> Result<()> {
    let registry = ClassifierRegistry::load(&config).context("Failed to load artifacts")?;
    let dataset = LabeledDataset::from_csv(&data, registry.adapter().feature_names(), target)?;
    let reports = evaluate_registry(&registry, &dataset)?;

    println!(
        "{:<22} {:>9} {:>10} {:>8} {:>9}",
        "model", "accuracy", "precision", "recall", "f1"
    );
    for report in &reports {
        println!(
            "{:<22} {:>9.4} {:>10.4} {:>8.4} {:>9.4}",
            report.model.as_str(),
            report.metrics.accuracy,
            report.metrics.precision,
            report.metrics.recall,
            report.metrics.f1
        );
    }

    for report in &reports {
        let cm = &report.confusion;
        log::info!(
            "{} confusion: tn={} fp={} fn={} tp={}",
            report.model,
            cm.tn,
            cm.fp,
            cm.fn_,
            cm.tp
        );
    }

    Ok(())
}
