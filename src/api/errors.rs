use std::fmt;

use crate::{
    frontend::command::errors::CommandError,
    storage::{
        btree::{BuildError, InvariantViolation},
        errors::StorageError,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Parse(CommandError),
    Build(BuildError),
    Invariant(InvariantViolation),
    Storage(StorageError),
    UnknownDataset(String),
    UnknownColumn(String),
    KeyArity { expected: usize, found: usize },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Parse(e) => write!(f, "{e}"),
            ApiError::Build(e) => write!(f, "{e}"),
            ApiError::Invariant(e) => write!(f, "invariant violated: {e}"),
            ApiError::Storage(e) => write!(f, "storage error: {e}"),
            ApiError::UnknownDataset(name) => {
                write!(f, "unknown dataset '{name}' (try 'datasets')")
            }
            ApiError::UnknownColumn(name) => write!(f, "no record has a column '{name}'"),
            ApiError::KeyArity { expected, found } => write!(
                f,
                "key has {} column(s) but {} value(s) were given",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CommandError> for ApiError {
    fn from(e: CommandError) -> Self {
        ApiError::Parse(e)
    }
}

impl From<BuildError> for ApiError {
    fn from(e: BuildError) -> Self {
        ApiError::Build(e)
    }
}

impl From<InvariantViolation> for ApiError {
    fn from(e: InvariantViolation) -> Self {
        ApiError::Invariant(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Storage(e)
    }
}
