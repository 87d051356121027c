use std::fs;
use std::path::Path;
use timeline_core::domain::DataSource;
use timeline_core::ports::{Result, SourceReader};
use timeline_core::source::resolve_source;
use tracing::info;

/// Filesystem implementation of the SourceReader trait
pub struct FileSourceReader {
    candidates: Vec<String>,
}

impl FileSourceReader {
    /// Creates a new FileSourceReader probing the given paths in order
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    fn read_file(path: &str) -> std::io::Result<String> {
        let path = Path::new(path);
        if path.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "is a directory",
            ));
        }
        let bytes = fs::read(path)?;
        // Exports from spreadsheet tools sometimes carry a BOM
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

impl SourceReader for FileSourceReader {
    fn read_source(&self) -> Result<DataSource> {
        let (locator, content) = resolve_source(self.candidates.as_slice(), Self::read_file)?;
        info!(path = %locator, bytes = content.len(), "Read data source");
        DataSource::from_content(&locator, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("file_adapter_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_first_existing_candidate() {
        let csv = temp_file("posts.csv", "post_id,person_id\n1,@a\n");
        let reader = FileSourceReader::new(vec![
            "/definitely/not/here.json".to_string(),
            csv.to_string_lossy().into_owned(),
        ]);
        match reader.read_source().unwrap() {
            DataSource::RawCsv(text) => assert!(text.starts_with("post_id")),
            other => panic!("expected CSV, got {:?}", other),
        }
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let json = temp_file("bom.json", "\u{feff}[{\"post_id\":\"1\"}]");
        let reader = FileSourceReader::new(vec![json.to_string_lossy().into_owned()]);
        match reader.read_source().unwrap() {
            DataSource::PreNormalized(entries) => assert_eq!(entries.len(), 1),
            other => panic!("expected JSON, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_and_invalid_sources_are_unavailable() {
        let reader = FileSourceReader::new(vec!["/nope/a.json".into(), "/nope/b.csv".into()]);
        let err = reader.read_source().unwrap_err();
        assert!(err.is_source_unavailable());
        assert!(err.to_string().contains("/nope/b.csv"));

        let broken = temp_file("broken.json", "[{");
        let reader = FileSourceReader::new(vec![broken.to_string_lossy().into_owned()]);
        assert!(reader.read_source().unwrap_err().is_source_unavailable());
    }

    #[test]
    fn test_directory_candidate_is_skipped() {
        let csv = temp_file("dir_skip.csv", "post_id\n1\n");
        let dir = csv.parent().unwrap().to_string_lossy().into_owned();
        let reader = FileSourceReader::new(vec![dir, csv.to_string_lossy().into_owned()]);
        assert!(matches!(reader.read_source().unwrap(), DataSource::RawCsv(_)));
    }
}
