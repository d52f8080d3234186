use thiserror::Error;

use stockline_core::BusinessError;

use crate::ports::RepositoryError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure of a catalog use case.
///
/// Business errors carry a stable code for the boundary layer. Repository
/// errors are opaque infrastructure failures and must be reported as such.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Business(#[from] BusinessError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CatalogError {
    pub fn as_business(&self) -> Option<&BusinessError> {
        match self {
            CatalogError::Business(e) => Some(e),
            CatalogError::Repository(_) => None,
        }
    }
}
