//! Structural URL Patterns
//!
//! Regex-backed binary signals. Patterns compile once on first use.

use once_cell::sync::Lazy;
use regex::Regex;

/// Known URL-shortener fragments
pub const SHORTENER_FRAGMENTS: &[&str] = &["bit.ly", "goo.gl", "tinyurl", "is.gd"];

/// TLD tokens that look suspicious when they appear inside a path
pub const PATH_TLD_TOKENS: &[&str] = &["com", "net", "org", "info", "biz", "xyz"];

/// TLDs commonly abused for throwaway phishing domains
pub const SUSPICIOUS_TLDS: &[&str] = &["xyz", "top", "info", "club", "gq", "online"];

static RANDOM_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]{3,}\d{3,}").expect("valid random-domain regex"));

static SHORTENER: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = SHORTENER_FRAGMENTS.iter().map(|f| regex::escape(f)).collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).expect("valid shortener regex")
});

static TLD_IN_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\.({})", PATH_TLD_TOKENS.join("|"))).expect("valid tld regex")
});

static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$").expect("valid ip regex"));

/// ≥3 letters immediately followed by ≥3 digits
pub fn is_random_domain(hostname: &str) -> bool {
    RANDOM_DOMAIN.is_match(hostname)
}

pub fn uses_shortening_service(url: &str) -> bool {
    SHORTENER.is_match(url)
}

pub fn has_tld_in_path(path: &str) -> bool {
    TLD_IN_PATH.is_match(path)
}

/// Dotted-quad shape only; octet ranges are not checked
pub fn is_ip_host(hostname: &str) -> bool {
    DOTTED_QUAD.is_match(hostname)
}

pub fn has_suspicious_tld(hostname: &str) -> bool {
    let host = hostname.to_ascii_lowercase();
    SUSPICIOUS_TLDS
        .iter()
        .any(|tld| host.ends_with(&format!(".{}", tld)) || host == *tld)
}

pub fn is_https(url: &str) -> bool {
    url.to_lowercase().starts_with("https")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_domain() {
        assert!(is_random_domain("abc123.com"));
        assert!(is_random_domain("login-shop4567.net"));
        assert!(!is_random_domain("ab123.com"));
        assert!(!is_random_domain("abc12.com"));
    }

    #[test]
    fn test_shortener_case_insensitive() {
        assert!(uses_shortening_service("http://bit.ly/xyz"));
        assert!(uses_shortening_service("HTTP://BIT.LY/xyz"));
        assert!(uses_shortening_service("https://tinyurl.com/abc"));
        assert!(!uses_shortening_service("http://bitly.example/xyz"));
        assert!(!uses_shortening_service("http://example.com/xyz"));
    }

    #[test]
    fn test_tld_in_path() {
        assert!(has_tld_in_path("/redirect/paypal.com/login"));
        assert!(has_tld_in_path("/x.INFO"));
        assert!(!has_tld_in_path("/account/login"));
        assert!(!has_tld_in_path(""));
    }

    #[test]
    fn test_ip_host() {
        assert!(is_ip_host("123.45.67.89"));
        assert!(is_ip_host("999.999.999.999"));
        assert!(!is_ip_host("www.apple.com"));
        assert!(!is_ip_host("1.2.3"));
        assert!(!is_ip_host(""));
    }

    #[test]
    fn test_suspicious_tld() {
        assert!(has_suspicious_tld("login-paypal-secure.xyz"));
        assert!(has_suspicious_tld("free-gift.ONLINE"));
        assert!(!has_suspicious_tld("www.apple.com"));
        assert!(!has_suspicious_tld("example.topsites.com"));
        assert!(!has_suspicious_tld(""));
    }

    #[test]
    fn test_is_https() {
        assert!(is_https("HTTPS://example.com"));
        assert!(!is_https("http://example.com"));
        assert!(!is_https(""));
    }
}
