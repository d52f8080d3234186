use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::FranchiseId;

use crate::error::CatalogResult;
use crate::ports::FranchiseRepository;
use crate::validate::ensure_franchise;
use crate::Franchise;

/// Rename a franchise, keeping every other field.
#[derive(Clone)]
pub struct UpdateFranchiseNameUseCase {
    franchises: Arc<dyn FranchiseRepository>,
}

impl UpdateFranchiseNameUseCase {
    pub fn new(franchises: Arc<dyn FranchiseRepository>) -> Self {
        Self { franchises }
    }

    #[instrument(skip_all, fields(franchise_id = %franchise_id))]
    pub async fn execute(&self, franchise_id: FranchiseId, name: String) -> CatalogResult<Franchise> {
        let current = ensure_franchise(self.franchises.as_ref(), &franchise_id).await?;
        let saved = self.franchises.save(current.with_name(name)).await?;
        info!("franchise renamed");
        Ok(saved)
    }
}
