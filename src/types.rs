use std::fmt;
use std::path::PathBuf;

use crate::config::{DEFAULT_OUTPUT_EXTENSION, SAVE_FOLDER};
use crate::error::ConvertError;

#[derive(Clone, Debug)]
pub struct ConversionSettings {
    pub output_dir: PathBuf,
    /// One of `SUPPORTED_EXTENSIONS`, leading dot included.
    pub output_extension: &'static str,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(SAVE_FOLDER),
            output_extension: DEFAULT_OUTPUT_EXTENSION,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    Unsupported,
}

/// Result of converting one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<(), ConvertError>,
    /// An earlier file of the same batch already wrote `output`.
    pub overwrote: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.succeeded, self.total)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown to the user in a modal dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.to_string(), message: message.into() }
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, title: title.to_string(), message: message.into() }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.to_string(), message: message.into() }
    }
}

#[derive(Clone, Debug)]
pub enum LogEntry {
    Info(String),
    Success(String),
    Error(String),
    Warning(String),
}
