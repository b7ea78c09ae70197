//! URL Feature Extraction
//!
//! Pure function: raw URL string → FeatureVector for the configured schema.
//! Total over all inputs; malformed URLs degrade to empty host/path.

use super::layout::FeatureSchema;
use super::lexical::{
    char_len, count_any, count_char, digit_ratio, redirection_count,
    subdomain_count, WordStats,
};
use super::patterns;
use super::url_parts::UrlParts;
use super::vector::{FeatureExtractor, FeatureVector};

/// Characters counted by `num_special`
pub const SPECIAL_CHARS: &[char] = &['@', '-', '_', '~', '!', '$'];

/// Subdomain depth at which `abnormal_subdomain` fires
pub const ABNORMAL_SUBDOMAIN_DEPTH: usize = 3;

/// Stateless extractor bound to one schema
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlFeatureExtractor {
    schema: FeatureSchema,
}

impl UrlFeatureExtractor {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn extract(&self, url: &str) -> FeatureVector {
        let parts = UrlParts::parse(url);
        let host = parts.hostname.as_str();
        let mut vector = FeatureVector::new(self.schema);

        // Size
        vector.set("length_url", char_len(url) as f64);
        vector.set("length_hostname", char_len(host) as f64);
        vector.set("nb_dots", count_char(host, '.') as f64);
        vector.set("nb_hyphens", count_char(host, '-') as f64);
        vector.set("nb_at", count_char(url, '@') as f64);

        // Ratios
        vector.set("ratio_digits_url", digit_ratio(url));
        vector.set("ratio_digits_host", digit_ratio(host));

        // Path words
        let words = WordStats::from_words(parts.words());
        vector.set("shortest_words_raw", words.shortest);
        vector.set("longest_words_raw", words.longest);
        vector.set("avg_words_raw", words.average);

        // Structure
        let subdomains = subdomain_count(host);
        vector.set_flag("tld_in_path", patterns::has_tld_in_path(&parts.path));
        vector.set_flag("abnormal_subdomain", subdomains >= ABNORMAL_SUBDOMAIN_DEPTH);
        vector.set("nb_subdomains", subdomains as f64);
        vector.set_flag("prefix_suffix", host.contains('-'));
        vector.set_flag("random_domain", patterns::is_random_domain(host));
        vector.set_flag("shortening_service", patterns::uses_shortening_service(url));
        vector.set_flag("path_extension", parts.last_segment().contains('.'));
        vector.set("nb_redirection", redirection_count(url) as f64);

        // Page-content signals are not derivable from the URL alone
        vector.set("ratio_extHyperlinks", 0.0);
        vector.set("ratio_intErrors", 0.0);

        if self.schema == FeatureSchema::Extended {
            vector.set_flag("is_https", patterns::is_https(url));
            vector.set_flag("has_ip", patterns::is_ip_host(host));
            vector.set(
                "num_query_params",
                (count_char(url, '?') + count_char(url, '&')) as f64,
            );
            vector.set("num_special", count_any(url, SPECIAL_CHARS) as f64);
            vector.set_flag("suspicious_tld", patterns::has_suspicious_tld(host));
        }

        log::trace!("Extracted {} {} features", vector.len(), self.schema);

        vector
    }
}

impl FeatureExtractor for UrlFeatureExtractor {
    fn schema(&self) -> FeatureSchema {
        self.schema
    }

    fn extract(&self, url: &str) -> FeatureVector {
        UrlFeatureExtractor::extract(self, url)
    }
}

/// Top-20 feature vector for a URL
pub fn extract_features_from_url(url: &str) -> FeatureVector {
    UrlFeatureExtractor::new(FeatureSchema::Top20).extract(url)
}

/// Extended (25-feature) vector for a URL
pub fn extract_features_from_url_extended(url: &str) -> FeatureVector {
    UrlFeatureExtractor::new(FeatureSchema::Extended).extract(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_counts() {
        let v = extract_features_from_url("http://a-b.example.com/x/yy/zzz");
        assert_eq!(v.get("length_hostname"), Some(15.0));
        assert_eq!(v.get("nb_dots"), Some(2.0));
        assert_eq!(v.get("nb_hyphens"), Some(1.0));
        assert_eq!(v.get("nb_subdomains"), Some(1.0));
        assert_eq!(v.get("shortest_words_raw"), Some(1.0));
        assert_eq!(v.get("longest_words_raw"), Some(3.0));
        assert_eq!(v.get("avg_words_raw"), Some(2.0));
        assert_eq!(v.get("prefix_suffix"), Some(1.0));
        assert_eq!(v.get("nb_redirection"), Some(0.0));
    }

    #[test]
    fn test_top20_has_no_extended_fields() {
        let v = extract_features_from_url("https://www.apple.com/");
        assert_eq!(v.len(), 20);
        assert_eq!(v.get("is_https"), None);
    }

    #[test]
    fn test_extended_fields() {
        let v = extract_features_from_url_extended("https://x.top/a?b=1&c=2&d=~!$");
        assert_eq!(v.get("is_https"), Some(1.0));
        assert_eq!(v.get("num_query_params"), Some(3.0));
        assert_eq!(v.get("num_special"), Some(3.0));
        assert_eq!(v.get("suspicious_tld"), Some(1.0));
        assert_eq!(v.get("has_ip"), Some(0.0));
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(
            extract_features_from_url("http://e.com/login.php").get("path_extension"),
            Some(1.0)
        );
        assert_eq!(
            extract_features_from_url("http://e.com/a.b/login").get("path_extension"),
            Some(0.0)
        );
        assert_eq!(
            extract_features_from_url("http://e.com").get("path_extension"),
            Some(0.0)
        );
    }

    #[test]
    fn test_extractor_trait_object() {
        let extractor: Box<dyn FeatureExtractor> =
            Box::new(UrlFeatureExtractor::new(FeatureSchema::Extended));
        assert_eq!(extractor.schema(), FeatureSchema::Extended);
        assert_eq!(extractor.extract("").len(), 25);
    }
}
