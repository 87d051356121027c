//! Locating the data source and turning its content into posts.

use crate::csv;
use crate::domain::{DataSource, JsonPost, Post};
use crate::normalize;
use crate::ports::{Result, TimelineError};
use tracing::{debug, info};

/// Tries each candidate in order and returns the first one that fetches,
/// as `(locator, content)`. Every failure is recorded in the error.
pub fn resolve_source<S, F, E>(candidates: &[S], mut fetch: F) -> Result<(String, String)>
where
    S: AsRef<str>,
    F: FnMut(&str) -> std::result::Result<String, E>,
    E: std::fmt::Display,
{
    let mut attempts = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let locator = candidate.as_ref();
        match fetch(locator) {
            Ok(content) => {
                debug!(locator, "Data source resolved");
                return Ok((locator.to_string(), content));
            }
            Err(err) => {
                debug!(locator, error = %err, "Data source candidate failed");
                attempts.push(format!("{}: {}", locator, err));
            }
        }
    }
    Err(TimelineError::SourceUnavailable { attempts })
}

impl DataSource {
    /// Tags fetched content by format: `.json`/`.csv` extensions decide,
    /// otherwise content that opens with `[` is taken as JSON
    pub fn from_content(locator: &str, content: String) -> Result<Self> {
        let lower = locator.to_ascii_lowercase();
        let is_json = if lower.ends_with(".json") {
            true
        } else if lower.ends_with(".csv") {
            false
        } else {
            content.trim_start().starts_with('[')
        };

        if is_json {
            let entries: Vec<JsonPost> =
                serde_json::from_str(&content).map_err(|source| TimelineError::InvalidJson {
                    locator: locator.to_string(),
                    source,
                })?;
            Ok(DataSource::PreNormalized(entries))
        } else {
            Ok(DataSource::RawCsv(content))
        }
    }
}

/// Single dispatch point from either source format to normalized posts
pub fn load_posts(source: DataSource) -> Vec<Post> {
    match source {
        DataSource::PreNormalized(entries) => {
            let total = entries.len();
            let posts = normalize::from_json_all(entries);
            info!(entries = total, posts = posts.len(), "Loaded JSON posts");
            posts
        }
        DataSource::RawCsv(text) => {
            let records = csv::parse(&text);
            let posts = normalize::normalize_all(&records);
            info!(records = records.len(), posts = posts.len(), "Loaded CSV posts");
            posts
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_returns_first_success() {
        let mut tried = Vec::new();
        let (locator, content) = resolve_source(&["a.json", "b.json", "c.json"], |loc| {
            tried.push(loc.to_string());
            if loc == "b.json" {
                Ok("[]".to_string())
            } else {
                Err("not found")
            }
        })
        .unwrap();
        assert_eq!(locator, "b.json");
        assert_eq!(content, "[]");
        assert_eq!(tried, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_resolve_source_reports_every_attempt() {
        let err = resolve_source(&["x", "y"], |_| Err::<String, _>("missing")).unwrap_err();
        match err {
            TimelineError::SourceUnavailable { attempts } => {
                assert_eq!(attempts, vec!["x: missing", "y: missing"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_source_without_candidates() {
        let candidates: [&str; 0] = [];
        let err = resolve_source(&candidates, |_| Ok::<_, String>(String::new())).unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_from_content_dispatch() {
        let json = DataSource::from_content("data.JSON", "[]".to_string()).unwrap();
        assert!(matches!(json, DataSource::PreNormalized(ref v) if v.is_empty()));

        let csv = DataSource::from_content("posts.csv", "[weird header]".to_string()).unwrap();
        assert!(matches!(csv, DataSource::RawCsv(_)));

        let sniffed = DataSource::from_content("-", "  [{\"post_id\":\"1\"}]".to_string()).unwrap();
        assert!(matches!(sniffed, DataSource::PreNormalized(ref v) if v.len() == 1));

        let sniffed = DataSource::from_content("feed", "post_id,text\n".to_string()).unwrap();
        assert!(matches!(sniffed, DataSource::RawCsv(_)));
    }

    #[test]
    fn test_from_content_invalid_json() {
        let err = DataSource::from_content("data.json", "{not json".to_string()).unwrap_err();
        assert!(err.is_source_unavailable());
        assert!(err.to_string().contains("data.json"));
    }

    #[test]
    fn test_load_posts_from_both_formats() {
        let csv = DataSource::RawCsv(
            "post_id,person_id,text,timestamp,likes,reposts\n1,@techguy,hi,2023-01-01T00:00:00,2,1\n"
                .to_string(),
        );
        let posts = load_posts(csv);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].username, "techguy");

        let json = DataSource::from_content(
            "data.json",
            r#"[{"post_id":"1","username":"techguy","account_type":"verified","text":"hi",
                 "timestamp":"2023-01-01T00:00:00","likes":2,"reposts":1}]"#
                .to_string(),
        )
        .unwrap();
        let from_json = load_posts(json);
        assert_eq!(from_json[0].username, posts[0].username);
        assert_eq!(from_json[0].account_type, posts[0].account_type);
        assert_eq!(from_json[0].likes, 2);
    }
}
