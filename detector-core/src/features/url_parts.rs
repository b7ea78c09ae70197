//! URL Splitting
//!
//! Hostname and path from a raw URL string. Never fails: anything the parser
//! rejects becomes an empty hostname and an empty path.

use url::Url;

/// Parts of a URL used by the lexical features
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub hostname: String,
    pub path: String,
}

impl UrlParts {
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self {
                hostname: url
                    .host_str()
                    .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
                    .unwrap_or_default(),
                path: url.path().to_string(),
            },
            Err(e) => {
                log::trace!("URL parse failed ({}), using empty host/path", e);
                Self::default()
            }
        }
    }

    /// Non-empty `/`-delimited path segments
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|seg| !seg.is_empty())
    }

    /// Last `/`-delimited path segment (may be empty)
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let parts = UrlParts::parse("https://WWW.Example.com/a/b.html?x=1");
        assert_eq!(parts.hostname, "www.example.com");
        assert_eq!(parts.path, "/a/b.html");
        assert_eq!(parts.words().collect::<Vec<_>>(), vec!["a", "b.html"]);
        assert_eq!(parts.last_segment(), "b.html");
    }

    #[test]
    fn test_scheme_less_input_is_empty() {
        let parts = UrlParts::parse("paypal-login.com/account");
        assert_eq!(parts, UrlParts::default());
        assert_eq!(parts.last_segment(), "");
    }

    #[test]
    fn test_ipv6_brackets_stripped() {
        let parts = UrlParts::parse("http://[::1]/x");
        assert_eq!(parts.hostname, "::1");
    }

    #[test]
    fn test_non_hierarchical_url_has_no_host() {
        let parts = UrlParts::parse("mailto:someone@example.com");
        assert_eq!(parts.hostname, "");
    }
}
