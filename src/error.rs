use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideSplitError {
    #[error("Cannot open source document {}: {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid delimiter pattern: {message}")]
    InvalidPattern { message: String },
}

impl SlideSplitError {
    /// Classifies a failure to open the source document.
    ///
    /// Missing files and files we may not open are reported as
    /// `InputNotFound`; anything else happened while reading and stays `Io`.
    pub fn from_input_error(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                SlideSplitError::InputNotFound {
                    path: path.into(),
                    source: error,
                }
            }
            _ => SlideSplitError::Io(error),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            SlideSplitError::Config { .. } | SlideSplitError::InvalidPattern { .. } => 2,
            SlideSplitError::InputNotFound { .. } => 3,
            SlideSplitError::Io(_) => 4,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SlideSplitError {
    fn user_message(&self) -> String {
        match self {
            SlideSplitError::InputNotFound { path, .. } => {
                format!("Source document not found or unreadable: {}", path.display())
            }
            SlideSplitError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            SlideSplitError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            SlideSplitError::InvalidPattern { message } => {
                format!("Could not build delimiter pattern: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SlideSplitError::InputNotFound { .. } => Some(
                "Run slidesplit from the directory containing the source document, or pass its path as the first argument.".to_string()
            ),
            SlideSplitError::Io(_) => Some(
                "Ensure you have write permission for the output directory and enough free disk space.".to_string()
            ),
            SlideSplitError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            SlideSplitError::InvalidPattern { .. } => None,
        }
    }
}

impl From<regex::Error> for SlideSplitError {
    fn from(error: regex::Error) -> Self {
        SlideSplitError::InvalidPattern {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for SlideSplitError {
    fn from(error: toml::de::Error) -> Self {
        SlideSplitError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlideSplitError>;
