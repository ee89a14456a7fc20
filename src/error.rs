use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("configuration file not found in '{0}'")]
    NotFound(PathBuf),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single question bank row that couldn't be turned into a question.
#[derive(Debug, Error)]
pub enum RowError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("unknown question type '{0}'")]
    UnknownType(String),
    #[error("{kind} question is missing '{field}'")]
    Missing {
        kind: &'static str,
        field: &'static str,
    },
    #[error("mcq 'correct_answer' is not a valid option index: '{0}'")]
    BadIndex(String),
    #[error("true/false 'correct_answer' must be 'true' or 'false', got '{0}'")]
    BadBool(String),
    #[error("drag & drop 'options' must have 3 parts separated by ';', got {0}")]
    DragDropParts(usize),
    #[error("drag & drop item '{0}' must look like 'id:text' with neither side empty")]
    BadItem(String),
    #[error("drag & drop mapping '{0}' must look like 'draggable:target' with neither side empty")]
    BadMapping(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("question bank not readable: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("question bank header is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// Failure to obtain the question pool from the server.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("server returned no questions")]
    Empty,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    // External errors
    #[error(transparent)]
    Cors(#[from] rocket_cors::Error),
}
