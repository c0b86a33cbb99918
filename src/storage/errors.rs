use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    InvalidPageCapacity { rows_per_page: usize },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidPageCapacity { rows_per_page } => {
                write!(
                    f,
                    "storage error: a heap page must hold between 1 and {} rows, got {}",
                    crate::storage::heap::MAX_ROWS_PER_PAGE,
                    rows_per_page
                )
            }
        }
    }
}

impl std::error::Error for StorageError {}
