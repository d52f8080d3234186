//! Catalog use cases.
//!
//! Each use case is a small struct holding the repository ports it needs and
//! exposing a single async `execute`. Steps inside one invocation run strictly
//! in order: existence check, then the write or query. Nothing here spawns
//! tasks or retries failed repository calls.

use std::sync::Arc;

use stockline_core::IdStrategy;

use crate::ports::{BranchRepository, FranchiseRepository, ProductRepository};

mod add_branch;
mod add_product;
mod create_franchise;
mod delete_product;
mod top_stock_products;
mod update_branch_name;
mod update_franchise_name;
mod update_product_name;
mod update_product_stock;

pub use add_branch::AddBranchUseCase;
pub use add_product::AddProductUseCase;
pub use create_franchise::CreateFranchiseUseCase;
pub use delete_product::DeleteProductUseCase;
pub use top_stock_products::GetTopStockProductsByFranchiseUseCase;
pub use update_branch_name::UpdateBranchNameUseCase;
pub use update_franchise_name::UpdateFranchiseNameUseCase;
pub use update_product_name::UpdateProductNameUseCase;
pub use update_product_stock::UpdateProductStockUseCase;

/// Every catalog use case, wired against one set of repositories.
#[derive(Clone)]
pub struct CatalogUseCases {
    pub create_franchise: CreateFranchiseUseCase,
    pub add_branch: AddBranchUseCase,
    pub add_product: AddProductUseCase,
    pub update_franchise_name: UpdateFranchiseNameUseCase,
    pub update_branch_name: UpdateBranchNameUseCase,
    pub update_product_name: UpdateProductNameUseCase,
    pub update_product_stock: UpdateProductStockUseCase,
    pub delete_product: DeleteProductUseCase,
    pub top_stock_products: GetTopStockProductsByFranchiseUseCase,
}

impl CatalogUseCases {
    pub fn new(
        franchises: Arc<dyn FranchiseRepository>,
        branches: Arc<dyn BranchRepository>,
        products: Arc<dyn ProductRepository>,
        ids: IdStrategy,
    ) -> Self {
        Self {
            create_franchise: CreateFranchiseUseCase::new(franchises.clone(), ids),
            add_branch: AddBranchUseCase::new(franchises.clone(), branches.clone(), ids),
            add_product: AddProductUseCase::new(branches.clone(), products.clone(), ids),
            update_franchise_name: UpdateFranchiseNameUseCase::new(franchises.clone()),
            update_branch_name: UpdateBranchNameUseCase::new(branches.clone()),
            update_product_name: UpdateProductNameUseCase::new(products.clone()),
            update_product_stock: UpdateProductStockUseCase::new(products.clone()),
            delete_product: DeleteProductUseCase::new(products.clone()),
            top_stock_products: GetTopStockProductsByFranchiseUseCase::new(
                franchises, branches, products,
            ),
        }
    }

    /// Wire every use case against a single store implementing all three ports.
    pub fn from_store<S>(store: Arc<S>, ids: IdStrategy) -> Self
    where
        S: FranchiseRepository + BranchRepository + ProductRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store, ids)
    }
}
