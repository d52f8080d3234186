//! Catalog domain module: franchises, their branches and the products stocked
//! in each branch.
//!
//! This crate owns the business rules (hierarchical integrity, field-local
//! updates, top-stock selection) and the repository ports they depend on.
//! Storage adapters live in `stockline-infra`; HTTP lives in `stockline-api`.

pub mod branch;
pub mod error;
pub mod franchise;
pub mod ports;
pub mod product;
pub mod top_stock;
pub mod usecase;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use branch::Branch;
pub use error::{CatalogError, CatalogResult};
pub use franchise::Franchise;
pub use ports::{
    BranchRepository, FranchiseRepository, ProductRepository, RepositoryError, RepositoryResult,
};
pub use product::{Product, ProductWithBranch};
pub use top_stock::top_stock_per_branch;
pub use usecase::CatalogUseCases;
