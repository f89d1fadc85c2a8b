//! URL handling for skimmer
//!
//! This module provides seed validation, root-host derivation for output
//! filenames, and the canonical dedup key used by the visited set.

use crate::UrlError;
use url::Url;

/// Parses and validates a seed URL
///
/// The seed must be a syntactically valid absolute URL with an http or https
/// scheme and a host. Anything else is a fatal startup error.
///
/// # Arguments
///
/// * `raw` - The seed URL string as given on the command line
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed
/// * `Err(UrlError)` - The seed is malformed, has a non-HTTP scheme, or no host
///
/// # Examples
///
/// ```
/// use skimmer::url::parse_seed;
///
/// let seed = parse_seed("https://example.com/docs").unwrap();
/// assert_eq!(seed.host_str(), Some("example.com"));
///
/// assert!(parse_seed("ftp://example.com/").is_err());
/// assert!(parse_seed("not a url").is_err());
/// ```
pub fn parse_seed(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns the root host of a URL, lowercased and with any `www.` prefix removed
///
/// This is the host the crawl's output files are named after.
pub fn root_host(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Returns the canonical key a URL is deduplicated under
///
/// Fragments are stripped (`/page#a` and `/page#b` are the same document);
/// everything else is byte-exact URL identity.
pub fn dedup_key(url: &Url) -> String {
    if url.fragment().is_none() {
        return url.as_str().to_string();
    }

    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_https() {
        let seed = parse_seed("https://example.com/start").unwrap();
        assert_eq!(seed.as_str(), "https://example.com/start");
    }

    #[test]
    fn test_parse_seed_http() {
        assert!(parse_seed("http://example.com/").is_ok());
    }

    #[test]
    fn test_parse_seed_trims_whitespace() {
        let seed = parse_seed("  https://example.com/  ").unwrap();
        assert_eq!(seed.host_str(), Some("example.com"));
    }

    #[test]
    fn test_parse_seed_rejects_ftp() {
        let result = parse_seed("ftp://example.com/file");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_parse_seed_rejects_mailto() {
        let result = parse_seed("mailto:someone@example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_seed_rejects_relative() {
        let result = parse_seed("/just/a/path");
        assert!(matches!(result.unwrap_err(), UrlError::Parse(_)));
    }

    #[test]
    fn test_root_host_simple() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(root_host(&url), "example.com");
    }

    #[test]
    fn test_root_host_strips_www() {
        let url = Url::parse("https://www.example.com/").unwrap();
        assert_eq!(root_host(&url), "example.com");
    }

    #[test]
    fn test_root_host_lowercases() {
        let url = Url::parse("https://WWW.Example.COM/").unwrap();
        assert_eq!(root_host(&url), "example.com");
    }

    #[test]
    fn test_root_host_keeps_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(root_host(&url), "blog.example.com");
    }

    #[test]
    fn test_root_host_excludes_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(root_host(&url), "127.0.0.1");
    }

    #[test]
    fn test_dedup_key_passthrough() {
        let url = Url::parse("https://example.com/page?q=1").unwrap();
        assert_eq!(dedup_key(&url), "https://example.com/page?q=1");
    }

    #[test]
    fn test_dedup_key_strips_fragment() {
        let a = Url::parse("https://example.com/page#intro").unwrap();
        let b = Url::parse("https://example.com/page#outro").unwrap();
        assert_eq!(dedup_key(&a), dedup_key(&b));
        assert_eq!(dedup_key(&a), "https://example.com/page");
    }

    #[test]
    fn test_dedup_key_distinct_paths_stay_distinct() {
        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("https://example.com/b").unwrap();
        assert_ne!(dedup_key(&a), dedup_key(&b));
    }
}
