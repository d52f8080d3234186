use std::sync::Arc;

use tracing::{debug, instrument};

use stockline_core::{Entity, FranchiseId};

use crate::error::CatalogResult;
use crate::ports::{BranchRepository, FranchiseRepository, ProductRepository, RepositoryError};
use crate::validate::ensure_franchise;
use crate::ProductWithBranch;

/// Report, for each branch of a franchise, its highest-stock product.
///
/// The grouped top-1 selection is delegated to
/// [`ProductRepository::find_top_stock_by_branches_in_franchise`]; this use
/// case checks the franchise first and then pairs every row with its branch.
#[derive(Clone)]
pub struct GetTopStockProductsByFranchiseUseCase {
    franchises: Arc<dyn FranchiseRepository>,
    branches: Arc<dyn BranchRepository>,
    products: Arc<dyn ProductRepository>,
}

impl GetTopStockProductsByFranchiseUseCase {
    pub fn new(
        franchises: Arc<dyn FranchiseRepository>,
        branches: Arc<dyn BranchRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            franchises,
            branches,
            products,
        }
    }

    /// A product whose branch cannot be loaded is a data-integrity failure and
    /// aborts the whole query; rows are never dropped silently.
    #[instrument(skip(self), fields(franchise_id = %franchise_id))]
    pub async fn execute(&self, franchise_id: FranchiseId) -> CatalogResult<Vec<ProductWithBranch>> {
        ensure_franchise(self.franchises.as_ref(), &franchise_id).await?;

        let top = self
            .products
            .find_top_stock_by_branches_in_franchise(&franchise_id)
            .await?;

        let mut rows = Vec::with_capacity(top.len());
        for product in top {
            let branch = self
                .branches
                .find_by_id(product.branch_id())
                .await?
                .ok_or_else(|| {
                    RepositoryError::integrity(format!(
                        "product {} references missing branch {}",
                        product.id().map(ToString::to_string).unwrap_or_default(),
                        product.branch_id()
                    ))
                })?;
            rows.push(ProductWithBranch::new(product, branch));
        }

        debug!(rows = rows.len(), "top-stock products resolved");
        Ok(rows)
    }
}
