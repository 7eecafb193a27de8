use serde::{Deserialize, Serialize};

/// Outcome of visiting a single page.
///
/// Serializes as `{url, html}` or `{url, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageResult {
    /// The page rendered; `html` is the serialized DOM at "content loaded"
    Success { url: String, html: String },

    /// The page failed to load; the crawl carried on without it
    Failure {
        url: String,
        #[serde(rename = "error")]
        message: String,
    },
}

impl PageResult {
    pub fn success(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self::Success {
            url: url.into(),
            html: html.into(),
        }
    }

    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure {
            url: url.into(),
            message: message.into(),
        }
    }

    /// URL of the visited page
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Every page visited by one crawl, in visitation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    pub pages: Vec<PageResult>,
}

impl CrawlReport {
    pub fn new(pages: Vec<PageResult>) -> Self {
        Self { pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_wire_shape() {
        let report = CrawlReport::new(vec![
            PageResult::success("http://a.test/", "<html></html>"),
            PageResult::failure("http://a.test/slow", "Navigation timeout of 20000 ms exceeded"),
        ]);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "pages": [
                    {"url": "http://a.test/", "html": "<html></html>"},
                    {"url": "http://a.test/slow", "error": "Navigation timeout of 20000 ms exceeded"},
                ]
            })
        );
    }

    #[test]
    fn test_failure_entry_is_read_back_as_failure() {
        let parsed: PageResult =
            serde_json::from_value(json!({"url": "http://a.test/x", "error": "boom"})).unwrap();
        assert_eq!(parsed, PageResult::failure("http://a.test/x", "boom"));
        assert!(!parsed.is_success());
        assert_eq!(parsed.url(), "http://a.test/x");
    }
}
