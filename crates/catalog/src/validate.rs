//! Hierarchical existence checks.
//!
//! Every child-creating or mutating use case looks up the parent (or the
//! entity itself) before writing. A miss becomes `NotFound(kind)`.
//!
//! The check and the following write are separate repository calls with no
//! lock between them: a parent removed in between is not detected.

use tracing::debug;

use stockline_core::{BranchId, BusinessError, EntityKind, FranchiseId, ProductId};

use crate::error::CatalogResult;
use crate::ports::{BranchRepository, FranchiseRepository, ProductRepository};
use crate::{Branch, Franchise, Product};

/// Turn an optional lookup result into the found value or `NotFound(kind)`.
pub fn require<T>(found: Option<T>, kind: EntityKind) -> CatalogResult<T> {
    found.ok_or_else(|| BusinessError::not_found(kind).into())
}

pub async fn ensure_franchise(
    repo: &dyn FranchiseRepository,
    id: &FranchiseId,
) -> CatalogResult<Franchise> {
    let found = repo.find_by_id(id).await?;
    if found.is_none() {
        debug!(franchise_id = %id, "franchise lookup missed");
    }
    require(found, EntityKind::Franchise)
}

pub async fn ensure_branch(repo: &dyn BranchRepository, id: &BranchId) -> CatalogResult<Branch> {
    let found = repo.find_by_id(id).await?;
    if found.is_none() {
        debug!(branch_id = %id, "branch lookup missed");
    }
    require(found, EntityKind::Branch)
}

pub async fn ensure_product(
    repo: &dyn ProductRepository,
    id: &ProductId,
) -> CatalogResult<Product> {
    let found = repo.find_by_id(id).await?;
    if found.is_none() {
        debug!(product_id = %id, "product lookup missed");
    }
    require(found, EntityKind::Product)
}
