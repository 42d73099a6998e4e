use std::path::PathBuf;
use thiserror::Error;

/// A scalar record that could not be turned into a metric.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: scalar record has {found} fields, expected 4")]
    MissingFields { line: usize, found: usize },

    #[error("line {line}: scalar value {value:?} is not a finite number")]
    InvalidValue { line: usize, value: String },
}

impl ParseError {
    /// 1-based line number of the offending record.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingFields { line, .. } | ParseError::InvalidValue { line, .. } => *line,
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed scalar file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Loader task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
