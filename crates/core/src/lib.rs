//! `stockline-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the `Entity` contract and the business error taxonomy shared by
//! every other crate in the workspace.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{BusinessError, EntityKind, ErrorCode};
pub use id::{BranchId, FranchiseId, IdStrategy, ProductId, RecordId};
