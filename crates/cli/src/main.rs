use clap::Parser;
use file_adapter::FileSourceReader;
use html_adapter::HtmlTimelineWriter;
use timeline_core::application::TimelineService;
use timeline_core::config::TimelineConfig;
use timeline_core::domain::DateSelection;
use timeline_core::ports::{SourceReader, TimelineRenderer};
use timeline_core::utils::{validate_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// CLI tool to render a post timeline from a JSON or CSV dataset as an HTML page
#[derive(Parser, Debug)]
#[command(name = "timeline")]
#[command(about = "Renders posts from a JSON or CSV dataset as an HTML timeline, filtered by date")]
struct Cli {
    /// Candidate data files, tried in order until one can be read
    #[arg(
        short = 's',
        long = "source",
        env = "TIMELINE_SOURCES",
        value_delimiter = ','
    )]
    sources: Vec<String>,

    /// Only show posts from this day (YYYY-MM-DD); defaults to the earliest day
    #[arg(short = 'd', long = "date", env = "TIMELINE_DATE", conflicts_with = "all")]
    date: Option<String>,

    /// Show every post regardless of date
    #[arg(long = "all")]
    all: bool,

    /// Path where the HTML page will be written, `-` for stdout
    #[arg(
        short = 'o',
        long = "output",
        env = "TIMELINE_OUTPUT",
        default_value = "timeline.html"
    )]
    output_file: String,

    /// chrono format string for displayed timestamps
    #[arg(
        long = "timestamp-format",
        env = "TIMELINE_TIMESTAMP_FORMAT",
        default_value = DEFAULT_TIMESTAMP_FORMAT,
        value_parser = parse_timestamp_format
    )]
    timestamp_format: String,
}

fn parse_timestamp_format(value: &str) -> Result<String, String> {
    validate_timestamp_format(value)?;
    Ok(value.to_string())
}

impl Cli {
    fn selection(&self) -> DateSelection {
        if self.all {
            return DateSelection::All;
        }
        match self.date.as_deref().map(str::trim) {
            Some("") => DateSelection::All,
            Some(date) => DateSelection::On(date.to_string()),
            None => DateSelection::Earliest,
        }
    }

    fn config(&self) -> TimelineConfig {
        TimelineConfig::new()
            .with_sources(self.sources.clone())
            .with_selection(self.selection())
            .with_timestamp_format(self.timestamp_format.clone())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    // Instantiate concrete implementations of secondary adapters
    let source_reader: Box<dyn SourceReader> =
        Box::new(FileSourceReader::new(config.sources.clone()));

    let renderer: Box<dyn TimelineRenderer> = Box::new(
        HtmlTimelineWriter::new(cli.output_file.clone())
            .with_timestamp_format(config.timestamp_format.clone()),
    );

    let service = TimelineService::new(source_reader, renderer);

    match service.execute(&config.selection) {
        Ok(summary) => {
            if cli.output_file != "-" {
                eprintln!(
                    "Rendered {} of {} posts to {}",
                    summary.shown, summary.loaded, cli.output_file
                );
            }
        }
        Err(e) => {
            error!(error = %e, "Timeline generation failed");
            eprintln!("Error during timeline generation: {}", e);
            std::process::exit(1);
        }
    }
}
