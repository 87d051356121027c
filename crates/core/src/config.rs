use crate::domain::DateSelection;
use crate::utils::DEFAULT_TIMESTAMP_FORMAT;

/// Locators probed when none are configured, in order
pub const DEFAULT_SOURCES: [&str; 4] = ["data.json", "data/data.json", "data.csv", "data/data.csv"];

/// Runtime settings for one timeline session
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Candidate data source locators, tried in order
    pub sources: Vec<String>,

    /// Day to show on load
    pub selection: DateSelection,

    /// chrono format used for displayed timestamps
    pub timestamp_format: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            selection: DateSelection::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl TimelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate list; an empty list keeps the defaults
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        let sources: Vec<String> = sources
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !sources.is_empty() {
            self.sources = sources;
        }
        self
    }

    pub fn with_selection(mut self, selection: DateSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }
}
