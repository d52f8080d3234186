use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::{BranchId, Entity, IdStrategy, ProductId};

use crate::error::CatalogResult;
use crate::ports::{BranchRepository, ProductRepository};
use crate::validate::ensure_branch;
use crate::Product;

/// Stock a new product in an existing branch.
#[derive(Clone)]
pub struct AddProductUseCase {
    branches: Arc<dyn BranchRepository>,
    products: Arc<dyn ProductRepository>,
    ids: IdStrategy,
}

impl AddProductUseCase {
    pub fn new(
        branches: Arc<dyn BranchRepository>,
        products: Arc<dyn ProductRepository>,
        ids: IdStrategy,
    ) -> Self {
        Self {
            branches,
            products,
            ids,
        }
    }

    /// Fails with `NotFound(Branch)` before any write if the branch is missing.
    #[instrument(skip_all, fields(branch_id = %branch_id))]
    pub async fn execute(
        &self,
        branch_id: BranchId,
        name: String,
        stock: u32,
    ) -> CatalogResult<Product> {
        ensure_branch(self.branches.as_ref(), &branch_id).await?;

        let mut product = Product::new(branch_id, name, stock);
        if let Some(id) = self.ids.issue() {
            product = product.with_id(ProductId::from(id));
        }

        let saved = self.products.save(product).await?;
        info!(product_id = ?saved.id(), "product added");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;
    use crate::CatalogError;
    use stockline_core::{BusinessError, EntityKind};

    #[tokio::test]
    async fn persists_product_under_branch() {
        let store = Arc::new(FakeStore::new());
        store.seed_branch(1, "B1", 1);
        let uc = AddProductUseCase::new(store.clone(), store.clone(), IdStrategy::Sequence);

        let product = uc.execute(BranchId::numeric(1), "Soda".into(), 12).await.unwrap();

        assert_eq!(product.branch_id(), &BranchId::numeric(1));
        assert_eq!(product.stock(), 12);
        assert_eq!(product.name(), "Soda");
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn missing_branch_fails_without_writing() {
        let store = Arc::new(FakeStore::new());
        let uc = AddProductUseCase::new(store.clone(), store.clone(), IdStrategy::Sequence);

        let err = uc.execute(BranchId::numeric(42), "Soda".into(), 1).await.unwrap_err();

        assert_eq!(err, CatalogError::Business(BusinessError::NotFound(EntityKind::Branch)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn zero_stock_is_accepted() {
        let store = Arc::new(FakeStore::new());
        store.seed_branch(1, "B1", 1);
        let uc = AddProductUseCase::new(store.clone(), store, IdStrategy::Sequence);

        let product = uc.execute(BranchId::numeric(1), "Empty".into(), 0).await.unwrap();
        assert_eq!(product.stock(), 0);
    }
}
