use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::BranchId;

use crate::error::CatalogResult;
use crate::ports::BranchRepository;
use crate::validate::ensure_branch;
use crate::Branch;

/// Rename a branch. The owning franchise is never touched.
#[derive(Clone)]
pub struct UpdateBranchNameUseCase {
    branches: Arc<dyn BranchRepository>,
}

impl UpdateBranchNameUseCase {
    pub fn new(branches: Arc<dyn BranchRepository>) -> Self {
        Self { branches }
    }

    #[instrument(skip_all, fields(branch_id = %branch_id))]
    pub async fn execute(&self, branch_id: BranchId, name: String) -> CatalogResult<Branch> {
        let current = ensure_branch(self.branches.as_ref(), &branch_id).await?;
        let saved = self.branches.save(current.with_name(name)).await?;
        info!("branch renamed");
        Ok(saved)
    }
}
