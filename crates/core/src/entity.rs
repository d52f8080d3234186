//! Entity trait: identity + continuity across state changes.

use crate::id::RecordId;

/// Entity marker + minimal interface.
///
/// An entity's identifier is absent until it has been persisted (or
/// pre-assigned by a generating [`IdStrategy`](crate::IdStrategy)).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug + From<RecordId>;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<&Self::Id>;

    /// Returns a copy of this entity carrying `id`; every other field is kept.
    fn with_id(self, id: Self::Id) -> Self;
}
