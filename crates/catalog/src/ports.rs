//! Repository ports.
//!
//! The catalog owns these contracts; storage adapters implement them. Each call
//! is expected to be atomic at the single-row level. No cross-entity
//! transaction is ever requested by the use cases.

use async_trait::async_trait;
use thiserror::Error;

use stockline_core::{BranchId, FranchiseId, ProductId};

use crate::{Branch, Franchise, Product};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository operation error.
///
/// These are **infrastructure errors**, as opposed to business errors. The use
/// cases never catch or retry them; they travel up unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store failed (IO, driver, pool, lock poisoning).
    #[error("storage failure in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// Stored data contradicts the hierarchy (e.g. a product whose branch is gone).
    #[error("referential integrity violated: {0}")]
    Integrity(String),

    /// The adapter cannot address identifiers of this form.
    #[error("unsupported identifier: {0}")]
    UnsupportedId(String),
}

impl RepositoryError {
    pub fn storage(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Storage {
            operation,
            message: message.into(),
        }
    }

    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity(msg.into())
    }
}

#[async_trait]
pub trait FranchiseRepository: Send + Sync {
    /// Insert when the id is absent (the store assigns one) or pre-assigned to
    /// a new entity; otherwise update the stored row. Updating a row that no
    /// longer exists is `RepositoryError::Integrity`, never an insert.
    async fn save(&self, franchise: Franchise) -> RepositoryResult<Franchise>;

    async fn find_by_id(&self, id: &FranchiseId) -> RepositoryResult<Option<Franchise>>;
}

#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// Insert when the id is absent (the store assigns one) or pre-assigned to
    /// a new entity; otherwise update the stored row. Updating a row that no
    /// longer exists is `RepositoryError::Integrity`, never an insert.
    async fn save(&self, branch: Branch) -> RepositoryResult<Branch>;

    async fn find_by_id(&self, id: &BranchId) -> RepositoryResult<Option<Branch>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert when the id is absent (the store assigns one) or pre-assigned to
    /// a new entity; otherwise update the stored row. Updating a row that no
    /// longer exists is `RepositoryError::Integrity`, never an insert.
    async fn save(&self, product: Product) -> RepositoryResult<Product>;

    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;

    /// Delete by id. Deleting a missing row is not an error.
    async fn delete_by_id(&self, id: &ProductId) -> RepositoryResult<()>;

    /// For every branch of `franchise_id`, the product with the greatest stock.
    ///
    /// Ties go to the lowest product id. Branches without products contribute
    /// nothing. Row order across branches is unspecified.
    async fn find_top_stock_by_branches_in_franchise(
        &self,
        franchise_id: &FranchiseId,
    ) -> RepositoryResult<Vec<Product>>;
}
