use std::fs;
use std::io::Write;
use std::path::Path;
use timeline_core::domain::{DateBounds, Post, TimelineView};
use timeline_core::ports::{Result, TimelineError, TimelineRenderer};
use timeline_core::utils::{format_timestamp_local, DEFAULT_TIMESTAMP_FORMAT};
use tracing::info;

pub const NO_RESULTS_MESSAGE: &str = "No posts found for this date.";
pub const EMPTY_DATASET_MESSAGE: &str = "Data source loaded, but it is empty.";

/// HTML page writer adapter implementation
pub struct HtmlTimelineWriter {
    output_path: String,
    timestamp_format: String,
}

impl HtmlTimelineWriter {
    /// Writes to `output_path`, or to stdout when it is `-`
    pub fn new(output_path: String) -> Self {
        Self {
            output_path,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Formats a single post block. Text and username go out as given.
    fn format_post(&self, post: &Post) -> String {
        format!(
            r#"    <div class="xis-post" data-post-id="{id}">
      <div class="post-header">
        <span class="username">@{username}</span>
        <span class="account-type">{account_type}</span>
      </div>
      <div class="text">{text}</div>
      <div class="post-meta">
        <span class="timestamp">{timestamp}</span>
        <span class="likes">👍 {likes}</span>
        <span class="reposts">🔁 {reposts}</span>
      </div>
    </div>
"#,
            id = escape_attr(&post.post_id),
            username = post.username,
            account_type = post.account_type,
            text = post.text,
            timestamp = format_timestamp_local(&post.timestamp, &self.timestamp_format),
            likes = post.likes,
            reposts = post.reposts,
        )
    }

    fn format_date_filter(&self, bounds: Option<&DateBounds>, value: Option<&str>) -> String {
        let mut input = String::from(r#"<input type="date" id="date-filter""#);
        if let Some(bounds) = bounds {
            input.push_str(&format!(
                r#" min="{}" max="{}""#,
                escape_attr(&bounds.min),
                escape_attr(&bounds.max)
            ));
        }
        if let Some(value) = value {
            input.push_str(&format!(r#" value="{}""#, escape_attr(value)));
        }
        input.push('>');
        input
    }

    fn message(text: &str, error: bool) -> String {
        let color = if error { "#FF6B6B" } else { "#A0B8D0" };
        format!(
            "    <p style=\"text-align: center; color: {};\">{}</p>\n",
            color, text
        )
    }

    /// Formats the whole document for a view
    pub fn format_html(&self, view: &TimelineView<'_>) -> String {
        let (filter, body) = match view {
            TimelineView::Failed(reason) => (
                self.format_date_filter(None, None),
                Self::message(
                    &format!(
                        "❌ Failed to load the data source.<br>Check that the file exists and is valid JSON or CSV.<br><code>{}</code>",
                        escape_text(reason)
                    ),
                    true,
                ),
            ),
            TimelineView::EmptyDataset => (
                self.format_date_filter(None, None),
                Self::message(EMPTY_DATASET_MESSAGE, false),
            ),
            TimelineView::NoResults { date, bounds } => (
                self.format_date_filter(Some(bounds), Some(date.as_str())),
                Self::message(NO_RESULTS_MESSAGE, false),
            ),
            TimelineView::Posts {
                selected,
                bounds,
                posts,
            } => (
                self.format_date_filter(Some(bounds), selected.as_deref()),
                posts.iter().map(|post| self.format_post(post)).collect(),
            ),
        };

        let mut output = String::new();
        output.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
        output.push_str("  <meta charset=\"utf-8\">\n  <title>Timeline</title>\n</head>\n<body>\n");
        output.push_str(&format!("  <label for=\"date-filter\">Date</label> {}\n", filter));
        output.push_str("  <div id=\"posts-container\">\n");
        output.push_str(&body);
        output.push_str("  </div>\n</body>\n</html>\n");
        output
    }
}

impl TimelineRenderer for HtmlTimelineWriter {
    fn render(&self, view: &TimelineView<'_>) -> Result<()> {
        let html = self.format_html(view);

        if self.output_path == "-" {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            return Ok(());
        }

        let path = Path::new(&self.output_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = html.len();
        fs::write(path, html)
            .map_err(|e| TimelineError::Render(format!("{}: {}", self.output_path, e)))?;
        info!(path = %self.output_path, bytes, "Wrote timeline page");
        Ok(())
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a value placed inside a double-quoted attribute
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_core::domain::AccountType;

    fn post(id: &str, username: &str, account_type: AccountType, text: &str) -> Post {
        Post {
            post_id: id.to_string(),
            person_id: format!("@{}", username),
            username: username.to_string(),
            account_type,
            text: text.to_string(),
            timestamp: "2023-12-25T14:30:00".to_string(),
            likes: 42,
            reposts: 7,
        }
    }

    fn bounds() -> DateBounds {
        DateBounds {
            min: "2023-12-01".to_string(),
            max: "2023-12-31".to_string(),
        }
    }

    fn writer() -> HtmlTimelineWriter {
        HtmlTimelineWriter::new("-".to_string())
    }

    #[test]
    fn test_format_posts() {
        let a = post("1", "newsbot", AccountType::Verified, "<b>hello</b>, world");
        let b = post("2", "alice", AccountType::Regular, "plain");
        let html = writer().format_html(&TimelineView::Posts {
            selected: Some("2023-12-25".to_string()),
            bounds: bounds(),
            posts: vec![&a, &b],
        });

        assert!(html.contains(r#"data-post-id="1""#));
        assert!(html.contains(r#"<span class="username">@newsbot</span>"#));
        assert!(html.contains(r#"<span class="account-type">verified</span>"#));
        assert!(html.contains(r#"<span class="account-type">regular</span>"#));
        // Text is passed through untouched
        assert!(html.contains("<div class=\"text\"><b>hello</b>, world</div>"));
        assert!(html.contains("25/12/2023 14:30"));
        assert!(html.contains("👍 42"));
        assert!(html.contains("🔁 7"));
        assert!(html.contains(r#"min="2023-12-01" max="2023-12-31" value="2023-12-25""#));
        assert!(html.find("@newsbot").unwrap() < html.find("@alice").unwrap());
        assert!(!html.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_format_no_results() {
        let html = writer().format_html(&TimelineView::NoResults {
            date: "2023-12-02".to_string(),
            bounds: bounds(),
        });
        assert!(html.contains(NO_RESULTS_MESSAGE));
        assert!(html.contains(r#"value="2023-12-02""#));
        assert!(!html.contains("xis-post"));
    }

    #[test]
    fn test_format_empty_and_failed_are_distinct() {
        let empty = writer().format_html(&TimelineView::EmptyDataset);
        let failed = writer().format_html(&TimelineView::Failed("data source unavailable".into()));
        assert!(empty.contains(EMPTY_DATASET_MESSAGE));
        assert!(!empty.contains(NO_RESULTS_MESSAGE));
        assert!(failed.contains("Failed to load the data source"));
        assert!(failed.contains("<code>data source unavailable</code>"));
        assert!(!failed.contains(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_custom_timestamp_format() {
        let a = post("1", "ana", AccountType::Regular, "x");
        let html = writer()
            .with_timestamp_format("%Y/%m/%d")
            .format_html(&TimelineView::Posts {
                selected: None,
                bounds: bounds(),
                posts: vec![&a],
            });
        assert!(html.contains("2023/12/25"));
        assert!(!html.contains(" value="));
    }

    #[test]
    fn test_failed_reason_is_escaped() {
        let html = writer().format_html(&TimelineView::Failed(
            "invalid JSON in <feed>.json: expected `,` & more".into(),
        ));
        assert!(html.contains("<code>invalid JSON in &lt;feed&gt;.json: expected `,` &amp; more</code>"));
        assert!(!html.contains("<feed>"));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b<c>&"#), "a&quot;b&lt;c&gt;&amp;");
    }

    #[test]
    fn test_render_writes_file() {
        let dir = std::env::temp_dir().join(format!("html_adapter_test_{}", std::process::id()));
        let path = dir.join("nested").join("timeline.html");
        let writer = HtmlTimelineWriter::new(path.to_string_lossy().into_owned());
        writer.render(&TimelineView::EmptyDataset).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains(EMPTY_DATASET_MESSAGE));
    }
}
