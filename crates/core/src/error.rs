//! Business error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of entity in the franchise → branch → product hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Franchise,
    Branch,
    Product,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Franchise => "Franchise",
            EntityKind::Branch => "Branch",
            EntityKind::Product => "Product",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable, versionable error codes surfaced to API consumers.
///
/// Codes are part of the public contract: clients branch on them, so they must
/// never be renumbered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// `B400-001`: a value had an invalid format.
    InvalidFormat,
    /// `B404-001`
    FranchiseNotFound,
    /// `B404-002`
    BranchNotFound,
    /// `B404-003`
    ProductNotFound,
}

impl ErrorCode {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::InvalidFormat => "B400-001",
            ErrorCode::FranchiseNotFound => "B404-001",
            ErrorCode::BranchNotFound => "B404-002",
            ErrorCode::ProductNotFound => "B404-003",
        }
    }

    /// HTTP-equivalent status the boundary layer should project.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::InvalidFormat => 400,
            ErrorCode::FranchiseNotFound | ErrorCode::BranchNotFound | ErrorCode::ProductNotFound => {
                404
            }
        }
    }

    pub fn not_found(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Franchise => ErrorCode::FranchiseNotFound,
            EntityKind::Branch => ErrorCode::BranchNotFound,
            EntityKind::Product => ErrorCode::ProductNotFound,
        }
    }
}

/// Business-meaningful failure.
///
/// Only deterministic domain failures live here. Storage and transport failures
/// are modelled by the layers that own them and are never folded into this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusinessError {
    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// A value (identifier, request field) was malformed.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl BusinessError {
    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound(kind)
    }

    pub fn invalid_format(field: impl Into<String>) -> Self {
        Self::InvalidFormat(field.into())
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            BusinessError::NotFound(kind) => ErrorCode::not_found(*kind),
            BusinessError::InvalidFormat(_) => ErrorCode::InvalidFormat,
        }
    }

    pub fn code(&self) -> &'static str {
        self.error_code().code()
    }

    pub fn http_status(&self) -> u16 {
        self.error_code().http_status()
    }
}
