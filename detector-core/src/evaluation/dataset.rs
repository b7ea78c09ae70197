//! Labeled Evaluation Dataset
//!
//! Loads a pre-scaled CSV (one column per feature plus a target column) and
//! keeps only the columns named by the trained feature list, in that order.

use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_TARGET: &str = "status";

#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

/// `0/1` or the textual class names the raw dataset uses
pub fn parse_label(raw: &str) -> Option<u8> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "0" | "0.0" | "legitimate" | "benign" => Some(0),
        "1" | "1.0" | "phishing" | "malicious" => Some(1),
        _ => None,
    }
}

impl LabeledDataset {
    pub fn from_csv<P: AsRef<Path>>(path: P, feature_names: &[String], target: &str) -> Result<Self> {
        let file = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open dataset: {:?}", path.as_ref()))?;
        Self::from_reader(file, feature_names, target)
    }

    pub fn from_reader<R: Read>(reader: R, feature_names: &[String], target: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers().context("Failed to read CSV header")?.clone();

        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let target_idx = column(target).ok_or_else(|| anyhow!("Target column '{}' not found", target))?;
        let feature_idx: Vec<usize> = feature_names
            .iter()
            .map(|name| column(name).ok_or_else(|| anyhow!("Feature column '{}' not found", name)))
            .collect::<Result<_>>()?;

        let mut dataset = LabeledDataset {
            feature_names: feature_names.to_vec(),
            ..Default::default()
        };

        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", line + 1))?;

            let label_raw = record.get(target_idx).unwrap_or("");
            let label = match parse_label(label_raw) {
                Some(label) => label,
                None => bail!("Row {}: unrecognized label '{}'", line + 1, label_raw),
            };

            let row = feature_idx
                .iter()
                .map(|&i| {
                    let raw = record.get(i).unwrap_or("");
                    raw.trim()
                        .parse::<f64>()
                        .with_context(|| format!("Row {}: '{}' is not numeric", line + 1, raw))
                })
                .collect::<Result<Vec<f64>>>()?;

            dataset.rows.push(row);
            dataset.labels.push(label);
        }

        log::info!("Loaded {} labeled rows ({} features)", dataset.len(), feature_names.len());
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
