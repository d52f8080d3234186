//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage-level identifier.
///
/// Two representations are supported and selected per deployment through
/// [`IdStrategy`]: a numeric id assigned by the store on insert, or an opaque
/// token generated before the write. Ordering is total (numeric ids sort before
/// tokens, then naturally within each form), which is what "lowest identifier"
/// means in tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Token(String),
}

impl RecordId {
    /// Generate a fresh opaque token.
    ///
    /// Uses UUIDv7 text, so lexicographic order follows creation order.
    pub fn generate() -> Self {
        Self::Token(Uuid::now_v7().to_string())
    }

    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            RecordId::Numeric(n) => Some(*n),
            RecordId::Token(_) => None,
        }
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordId::Numeric(n) => core::fmt::Display::fmt(n, f),
            RecordId::Token(t) => f.write_str(t),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

/// How identifiers are issued and parsed in a deployment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// The store assigns the next numeric id on insert.
    #[default]
    Sequence,
    /// Creating use cases assign a generated token before the write.
    Generated,
}

impl IdStrategy {
    /// Identifier to pre-assign to a new entity, if this strategy issues one.
    pub fn issue(self) -> Option<RecordId> {
        match self {
            IdStrategy::Sequence => None,
            IdStrategy::Generated => Some(RecordId::generate()),
        }
    }

    /// Parse an externally supplied identifier in this strategy's format.
    ///
    /// Returns `None` when `raw` is not a well-formed identifier; turning that
    /// into a user-facing error is the boundary layer's job.
    pub fn parse(self, raw: &str) -> Option<RecordId> {
        match self {
            IdStrategy::Sequence => raw.parse::<i64>().ok().map(RecordId::Numeric),
            IdStrategy::Generated => Uuid::parse_str(raw)
                .ok()
                .map(|uuid| RecordId::Token(uuid.to_string())),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" => Ok(IdStrategy::Sequence),
            "generated" => Ok(IdStrategy::Generated),
            other => Err(format!(
                "unknown id strategy '{other}' (expected 'sequence' or 'generated')"
            )),
        }
    }
}

/// Identifier of a franchise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FranchiseId(RecordId);

/// Identifier of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(RecordId);

/// Identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(RecordId);

macro_rules! impl_record_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(id: RecordId) -> Self {
                Self(id)
            }

            pub fn numeric(id: i64) -> Self {
                Self(RecordId::Numeric(id))
            }

            pub fn as_record(&self) -> &RecordId {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<RecordId> for $t {
            fn from(value: RecordId) -> Self {
                Self(value)
            }
        }

        impl From<$t> for RecordId {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_record_newtype!(FranchiseId);
impl_record_newtype!(BranchId);
impl_record_newtype!(ProductId);
