use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the catalog chart crates.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Two header cells name the same field.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A row carried a value that could not be converted.
    #[error("Invalid row at line {line}: {message}")]
    InvalidRow { line: u64, message: String },

    /// A view produced no data points, so there is nothing to chart.
    #[error("View '{view}' has no data to plot")]
    EmptySeries { view: String },

    /// A view name is not one of the known chart views.
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// A JSON document could not be produced or parsed.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Shorthand for [`CatalogError::EmptySeries`].
    pub fn empty(view: impl Into<String>) -> Self {
        Self::EmptySeries { view: view.into() }
    }
}

/// Convenience alias used throughout the catalog crates.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CatalogError::FileRead {
            path: PathBuf::from("/some/titles.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/titles.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = CatalogError::MissingColumn("duration".to_string());
        assert_eq!(err.to_string(), "Missing required column: duration");
    }

    #[test]
    fn test_error_display_duplicate_column() {
        let err = CatalogError::DuplicateColumn("listed_in / shows_movies".to_string());
        assert_eq!(err.to_string(), "Duplicate column: listed_in / shows_movies");
    }

    #[test]
    fn test_error_display_invalid_row() {
        let err = CatalogError::InvalidRow {
            line: 7,
            message: "release_year 'abc' is not an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid row at line 7: release_year 'abc' is not an integer"
        );
    }

    #[test]
    fn test_error_display_empty_series() {
        let err = CatalogError::empty("monthly");
        assert_eq!(err.to_string(), "View 'monthly' has no data to plot");
    }

    #[test]
    fn test_error_display_unknown_view() {
        let err = CatalogError::UnknownView("heatmap".to_string());
        assert_eq!(err.to_string(), "Unknown view: heatmap");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CatalogError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(err.to_string().contains("Failed to serialize JSON"));
    }
}
