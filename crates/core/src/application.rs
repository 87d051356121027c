use crate::domain::{DateBounds, DateSelection, Post, TimelineView};
use crate::filter::{date_bounds, filter_by_date};
use crate::ports::{Result, SourceReader, TimelineRenderer};
use crate::source::load_posts;
use tracing::{error, info};

/// Loaded posts for one session. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    posts: Vec<Post>,
    bounds: Option<DateBounds>,
}

impl Timeline {
    pub fn new(posts: Vec<Post>) -> Self {
        let bounds = date_bounds(&posts);
        Self { posts, bounds }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn bounds(&self) -> Option<&DateBounds> {
        self.bounds.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Resolves a selection to a concrete date; `All` resolves to none
    pub fn resolve_selection(&self, selection: &DateSelection) -> Option<String> {
        match selection {
            DateSelection::All => None,
            DateSelection::Earliest => self.bounds.as_ref().map(|b| b.min.clone()),
            DateSelection::On(date) if date.is_empty() => None,
            DateSelection::On(date) => Some(date.clone()),
        }
    }

    /// Builds the view for a selection without touching the loaded posts
    pub fn view(&self, selection: &DateSelection) -> TimelineView<'_> {
        let bounds = match &self.bounds {
            Some(bounds) => bounds.clone(),
            None => return TimelineView::EmptyDataset,
        };
        let selected = self.resolve_selection(selection);
        let posts = filter_by_date(&self.posts, selected.as_deref());

        match selected {
            Some(date) if posts.is_empty() => TimelineView::NoResults { date, bounds },
            selected => TimelineView::Posts {
                selected,
                bounds,
                posts,
            },
        }
    }
}

/// Outcome of one run, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSummary {
    pub loaded: usize,
    pub shown: usize,
    pub selected: Option<String>,
}

/// Application service: loads the timeline from a source and renders a view of it
pub struct TimelineService {
    source_reader: Box<dyn SourceReader>,
    renderer: Box<dyn TimelineRenderer>,
}

impl TimelineService {
    /// Creates a new TimelineService with the given dependencies
    pub fn new(source_reader: Box<dyn SourceReader>, renderer: Box<dyn TimelineRenderer>) -> Self {
        Self {
            source_reader,
            renderer,
        }
    }

    /// Reads the source into a timeline. On failure the error view is rendered
    /// before the source error is returned; a render failure there is only logged.
    pub fn load(&self) -> Result<Timeline> {
        match self.source_reader.read_source() {
            Ok(source) => Ok(Timeline::new(load_posts(source))),
            Err(err) => {
                error!(error = %err, "Failed to load data source");
                if let Err(render_err) = self.renderer.render(&TimelineView::Failed(err.to_string())) {
                    error!(error = %render_err, "Failed to render error page");
                }
                Err(err)
            }
        }
    }

    /// Loads the data and renders the view for `selection`
    pub fn execute(&self, selection: &DateSelection) -> Result<TimelineSummary> {
        let timeline = self.load()?;
        let view = timeline.view(selection);

        let (shown, selected) = match &view {
            TimelineView::Posts {
                posts, selected, ..
            } => (posts.len(), selected.clone()),
            TimelineView::NoResults { date, .. } => (0, Some(date.clone())),
            _ => (0, None),
        };
        self.renderer.render(&view)?;

        let summary = TimelineSummary {
            loaded: timeline.posts().len(),
            shown,
            selected,
        };
        info!(
            loaded = summary.loaded,
            shown = summary.shown,
            selected = summary.selected.as_deref().unwrap_or("all"),
            "Timeline rendered"
        );
        Ok(summary)
    }
}
