use crate::domain::{DataSource, TimelineView};
use std::fmt;

#[derive(Debug)]
pub enum TimelineError {
    /// No candidate locator could be read
    SourceUnavailable { attempts: Vec<String> },
    InvalidJson {
        locator: String,
        source: serde_json::Error,
    },
    Io(std::io::Error),
    Render(String),
}

impl TimelineError {
    /// Whether the failure means the data could not be obtained at all
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            TimelineError::SourceUnavailable { .. } | TimelineError::InvalidJson { .. }
        )
    }
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineError::SourceUnavailable { attempts } => {
                write!(f, "data source unavailable (tried: {})", attempts.join("; "))
            }
            TimelineError::InvalidJson { locator, source } => {
                write!(f, "invalid JSON in {}: {}", locator, source)
            }
            TimelineError::Io(err) => write!(f, "i/o error: {}", err),
            TimelineError::Render(msg) => write!(f, "render failed: {}", msg),
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimelineError::InvalidJson { source, .. } => Some(source),
            TimelineError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TimelineError {
    fn from(err: std::io::Error) -> Self {
        TimelineError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;

pub trait SourceReader {
    // Probes the configured locators and returns the first readable one, tagged by format
    fn read_source(&self) -> Result<DataSource>;
}

/// Trait for presenting a timeline view
/// This is a port (interface) that defines how the core communicates with output adapters
pub trait TimelineRenderer: Send + Sync {
    fn render(&self, view: &TimelineView<'_>) -> Result<()>;
}
