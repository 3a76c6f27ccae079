use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors
///
/// The labelling and matching core is total and never returns these; they
/// come from the edges: configuration and loading a song library.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read library {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid library: {0}")]
    Library(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Returns a machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Library(_) => "LIBRARY_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Result type alias for fallible edges
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::Library("duplicate song id".to_string());
        assert_eq!(err.code(), "LIBRARY_ERROR");
        assert_eq!(err.to_string(), "Invalid library: duplicate song id");

        let err: AppError = serde_json::from_str::<Vec<u8>>("not json").unwrap_err().into();
        assert_eq!(err.code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_io_error_names_path() {
        let err = AppError::Io {
            path: PathBuf::from("songs.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_string().contains("songs.json"));
    }
}
