use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::ProductId;

use crate::error::CatalogResult;
use crate::ports::ProductRepository;
use crate::validate::ensure_product;
use crate::Product;

/// Replace a product's stock count. Name and branch are copied from the stored row.
///
/// The count is unsigned: rejecting negative input is the boundary's job, and
/// the value is stored exactly as given.
#[derive(Clone)]
pub struct UpdateProductStockUseCase {
    products: Arc<dyn ProductRepository>,
}

impl UpdateProductStockUseCase {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn execute(&self, product_id: ProductId, stock: u32) -> CatalogResult<Product> {
        let current = ensure_product(self.products.as_ref(), &product_id).await?;
        let previous = current.stock();
        let saved = self.products.save(current.with_stock(stock)).await?;
        info!(previous, stock, "product stock updated");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;
    use crate::CatalogError;
    use stockline_core::{BranchId, BusinessError, EntityKind};

    #[tokio::test]
    async fn updates_only_stock() {
        let store = Arc::new(FakeStore::new());
        store.seed_product(1, "n", 10, 1);
        let uc = UpdateProductStockUseCase::new(store.clone());

        let saved = uc.execute(ProductId::numeric(1), 20).await.unwrap();

        assert_eq!(
            saved,
            Product::restore(ProductId::numeric(1), "n", 20, BranchId::numeric(1))
        );
    }

    #[tokio::test]
    async fn stock_can_drop_to_zero() {
        let store = Arc::new(FakeStore::new());
        store.seed_product(1, "n", 10, 1);
        let uc = UpdateProductStockUseCase::new(store.clone());

        let saved = uc.execute(ProductId::numeric(1), 0).await.unwrap();
        assert_eq!(saved.stock(), 0);
        assert_eq!(saved.name(), "n");
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let store = Arc::new(FakeStore::new());
        let uc = UpdateProductStockUseCase::new(store.clone());

        let err = uc.execute(ProductId::numeric(999), 5).await.unwrap_err();

        assert_eq!(err, CatalogError::Business(BusinessError::NotFound(EntityKind::Product)));
        assert_eq!(store.writes(), 0);
    }
}
