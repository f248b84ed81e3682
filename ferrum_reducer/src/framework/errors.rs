use std::fmt;
use tokio::task::JoinError;

#[derive(Debug, PartialEq)]
pub enum FerrumReducerError {
    ConfigError(String),
    MissingInputError(String),
    IntermediateReadError(String),
    OutputCreateError(String),
    OutputWriteError(String),
    FlushError(String),
    TaskStateError(String),
    TaskJoinError(String),
    ReducerPanic(String),
}

impl fmt::Display for FerrumReducerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FerrumReducerError::ConfigError(msg) => write!(f, "config error: {}", msg),
            FerrumReducerError::MissingInputError(msg) => {
                write!(f, "missing intermediate file: {}", msg)
            }
            FerrumReducerError::IntermediateReadError(msg) => {
                write!(f, "failed to read intermediate file: {}", msg)
            }
            FerrumReducerError::OutputCreateError(msg) => {
                write!(f, "failed to create output file: {}", msg)
            }
            FerrumReducerError::OutputWriteError(msg) => {
                write!(f, "failed to write output file: {}", msg)
            }
            FerrumReducerError::FlushError(msg) => write!(f, "failed to flush output file: {}", msg),
            FerrumReducerError::TaskStateError(msg) => write!(f, "invalid task state: {}", msg),
            FerrumReducerError::TaskJoinError(msg) => write!(f, "reduce task aborted: {}", msg),
            FerrumReducerError::ReducerPanic(msg) => write!(f, "reducer panicked: {}", msg),
        }
    }
}

impl std::error::Error for FerrumReducerError {}

impl From<serde_xml_rs::Error> for FerrumReducerError {
    fn from(value: serde_xml_rs::Error) -> Self {
        FerrumReducerError::ConfigError(value.to_string())
    }
}

impl From<JoinError> for FerrumReducerError {
    fn from(value: JoinError) -> Self {
        FerrumReducerError::TaskJoinError(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FerrumReducerError>;
