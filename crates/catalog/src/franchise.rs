use stockline_core::{Entity, FranchiseId};

/// Top-level business entity. Branches reference it by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Franchise {
    id: Option<FranchiseId>,
    name: String,
}

impl Franchise {
    /// A franchise that has not been persisted yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Rebuild a persisted franchise from stored fields.
    pub fn restore(id: FranchiseId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy with a new name; the identifier is kept.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}

impl Entity for Franchise {
    type Id = FranchiseId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }

    fn with_id(self, id: Self::Id) -> Self {
        Self { id: Some(id), ..self }
    }
}
