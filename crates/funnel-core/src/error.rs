use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the funnel reporter.
#[derive(Error, Debug)]
pub enum FunnelError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mandatory column is absent from the CSV header row.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// The CSV document is malformed (ragged row, invalid UTF-8, ...).
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Convenience alias used throughout the funnel crates.
pub type Result<T> = std::result::Result<T, FunnelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = FunnelError::FileRead {
            path: PathBuf::from("/some/events.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/events.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = FunnelError::MissingColumn {
            path: PathBuf::from("events.csv"),
            column: "page_url".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required column 'page_url' in events.csv"
        );
    }

    #[test]
    fn test_error_source_is_preserved() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = FunnelError::FileRead {
            path: PathBuf::from("x.csv"),
            source: io_err,
        };
        let source = err.source().expect("source");
        assert!(source.to_string().contains("denied"));
    }
}
