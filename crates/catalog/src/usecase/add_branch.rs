use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::{BranchId, Entity, FranchiseId, IdStrategy};

use crate::error::CatalogResult;
use crate::ports::{BranchRepository, FranchiseRepository};
use crate::validate::ensure_franchise;
use crate::Branch;

/// Attach a new branch to an existing franchise.
#[derive(Clone)]
pub struct AddBranchUseCase {
    franchises: Arc<dyn FranchiseRepository>,
    branches: Arc<dyn BranchRepository>,
    ids: IdStrategy,
}

impl AddBranchUseCase {
    pub fn new(
        franchises: Arc<dyn FranchiseRepository>,
        branches: Arc<dyn BranchRepository>,
        ids: IdStrategy,
    ) -> Self {
        Self {
            franchises,
            branches,
            ids,
        }
    }

    /// Fails with `NotFound(Franchise)` before any write if the franchise is missing.
    #[instrument(skip_all, fields(franchise_id = %franchise_id))]
    pub async fn execute(&self, franchise_id: FranchiseId, name: String) -> CatalogResult<Branch> {
        ensure_franchise(self.franchises.as_ref(), &franchise_id).await?;

        let mut branch = Branch::new(franchise_id, name);
        if let Some(id) = self.ids.issue() {
            branch = branch.with_id(BranchId::from(id));
        }

        let saved = self.branches.save(branch).await?;
        info!(branch_id = ?saved.id(), "branch added");
        Ok(saved)
    }
}
