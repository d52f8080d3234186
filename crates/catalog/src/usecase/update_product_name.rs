use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::ProductId;

use crate::error::CatalogResult;
use crate::ports::ProductRepository;
use crate::validate::ensure_product;
use crate::Product;

/// Rename a product. Stock and branch are copied from the stored row.
#[derive(Clone)]
pub struct UpdateProductNameUseCase {
    products: Arc<dyn ProductRepository>,
}

impl UpdateProductNameUseCase {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn execute(&self, product_id: ProductId, name: String) -> CatalogResult<Product> {
        let current = ensure_product(self.products.as_ref(), &product_id).await?;
        let saved = self.products.save(current.with_name(name)).await?;
        info!("product renamed");
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
    async fn rename_is_field_local() {
        let store = Arc::new(FakeStore::new());
        store.seed_product(1, "old", 10, 3);
        let uc = UpdateProductNameUseCase::new(store.clone());

        let saved = uc.execute(ProductId::numeric(1), "new".into()).await.unwrap();

        assert_eq!(
            saved,
            Product::restore(ProductId::numeric(1), "new", 10, BranchId::numeric(3))
        );
        assert_eq!(store.product(1), Some(saved));
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let store = Arc::new(FakeStore::new());
        let uc = UpdateProductNameUseCase::new(store.clone());

        let err = uc.execute(ProductId::numeric(999), "x".into()).await.unwrap_err();

        assert_eq!(err, CatalogError::Business(BusinessError::NotFound(EntityKind::Product)));
        assert_eq!(store.writes(), 0);
    }
}
