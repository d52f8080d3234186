//! Catalog repository adapters.
//!
//! Both stores implement all three catalog ports on a single type so one
//! `Arc` can be handed to every use case.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
