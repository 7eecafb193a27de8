use url::{Origin, Url};

use crate::error::CrawlError;

/// Parses a crawl seed and derives the origin every followed link must share.
///
/// Only absolute `http`/`https` URLs are accepted; anything else has no
/// usable (scheme, host, port) tuple to scope a crawl to.
pub fn parse_seed(seed: &str) -> Result<(Url, Origin), CrawlError> {
    let url = Url::parse(seed.trim()).map_err(|e| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlError::InvalidSeed {
            url: seed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    let origin = url.origin();
    Ok((url, origin))
}

/// Parses `candidate` and returns it only if it shares `reference`'s origin.
///
/// Strings that are not absolute URLs yield `None` rather than an error.
pub fn scoped_url(candidate: &str, reference: &Origin) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    same_origin(&url, reference).then_some(url)
}

/// Whether `candidate` belongs to the same (scheme, host, port) as `reference`
pub fn same_origin(candidate: &Url, reference: &Origin) -> bool {
    candidate.origin() == *reference
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_of(url: &str) -> Origin {
        parse_seed(url).unwrap().1
    }

    fn same(candidate: &str, origin: &Origin) -> bool {
        same_origin(&Url::parse(candidate).unwrap(), origin)
    }

    #[test]
    fn test_same_origin_matches_scheme_host_and_port() {
        let origin = origin_of("http://a.test/");

        assert!(same("http://a.test/b", &origin));
        assert!(same("http://a.test:80/c?q=1#frag", &origin));

        assert!(!same("https://a.test/b", &origin));
        assert!(!same("http://a.test:8080/b", &origin));
        assert!(!same("http://other.test/x", &origin));
        assert!(!same("http://sub.a.test/", &origin));
    }

    #[test]
    fn test_unparseable_candidates_are_rejected_not_errors() {
        let origin = origin_of("http://a.test/");

        assert!(scoped_url("/relative/path", &origin).is_none());
        assert!(scoped_url("", &origin).is_none());
        assert!(scoped_url("http://", &origin).is_none());
        assert!(scoped_url("mailto:someone@a.test", &origin).is_none());
        assert!(scoped_url("javascript:void(0)", &origin).is_none());
    }

    #[test]
    fn test_scoped_url_returns_parsed_form() {
        let origin = origin_of("https://docs.example.com/guide");
        let url = scoped_url("https://docs.example.com", &origin).unwrap();
        assert_eq!(url.as_str(), "https://docs.example.com/");
    }

    #[test]
    fn test_parse_seed_rejects_bad_input() {
        assert!(matches!(
            parse_seed("not a url"),
            Err(CrawlError::InvalidSeed { .. })
        ));
        assert!(matches!(
            parse_seed("example.com/page"),
            Err(CrawlError::InvalidSeed { .. })
        ));
        assert!(matches!(
            parse_seed("file:///etc/passwd"),
            Err(CrawlError::InvalidSeed { .. })
        ));
        assert!(matches!(
            parse_seed("data:text/html,hello"),
            Err(CrawlError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_parse_seed_accepts_http_and_https() {
        let (url, origin) = parse_seed("  http://a.test  ").unwrap();
        assert_eq!(url.as_str(), "http://a.test/");
        assert!(same("http://a.test/b", &origin));

        assert!(parse_seed("https://a.test:8443/x").is_ok());
    }
}
