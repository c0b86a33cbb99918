use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// No records were supplied; a tree needs at least one.
    EmptyInput,

    /// Capacity parameters or the key specification are unusable.
    Configuration { reason: String },

    /// Record at input ordinal `record` has no value for `column`.
    MissingKeyColumn { column: String, record: usize },
}

pub type BuildResult<T> = Result<T, BuildError>;

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyInput => {
                write!(f, "build error: cannot build a tree from zero records")
            }

            BuildError::Configuration { reason } => {
                write!(f, "build error: invalid configuration ({})", reason)
            }

            BuildError::MissingKeyColumn { column, record } => {
                write!(
                    f,
                    "build error: record {} has no value for key column '{}'",
                    record, column
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}
