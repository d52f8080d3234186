use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::{Entity, FranchiseId, IdStrategy};

use crate::error::CatalogResult;
use crate::ports::FranchiseRepository;
use crate::Franchise;

/// Create a franchise. Franchises have no parent, so nothing is checked first.
#[derive(Clone)]
pub struct CreateFranchiseUseCase {
    franchises: Arc<dyn FranchiseRepository>,
    ids: IdStrategy,
}

impl CreateFranchiseUseCase {
    pub fn new(franchises: Arc<dyn FranchiseRepository>, ids: IdStrategy) -> Self {
        Self { franchises, ids }
    }

    /// `name` has already been validated as non-blank by the caller.
    #[instrument(skip(self))]
    pub async fn execute(&self, name: String) -> CatalogResult<Franchise> {
        let mut franchise = Franchise::new(name);
        if let Some(id) = self.ids.issue() {
            franchise = franchise.with_id(FranchiseId::from(id));
        }

        let saved = self.franchises.save(franchise).await?;
        info!(franchise_id = ?saved.id(), "franchise created");
        Ok(saved)
    }
}
