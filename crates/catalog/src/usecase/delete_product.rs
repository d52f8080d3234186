use std::sync::Arc;

use tracing::{info, instrument};

use stockline_core::ProductId;

use crate::error::CatalogResult;
use crate::ports::ProductRepository;
use crate::validate::ensure_product;

/// Remove a product.
///
/// The lookup exists so a missing product reports `NotFound(Product)` instead
/// of deleting nothing silently. The delete call's own outcome for a row that
/// vanished in between is not inspected.
#[derive(Clone)]
pub struct DeleteProductUseCase {
    products: Arc<dyn ProductRepository>,
}

impl DeleteProductUseCase {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn execute(&self, product_id: ProductId) -> CatalogResult<()> {
        ensure_product(self.products.as_ref(), &product_id).await?;
        self.products.delete_by_id(&product_id).await?;
        info!("product deleted");
        Ok(())
    }
}
