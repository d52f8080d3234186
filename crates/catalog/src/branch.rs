use stockline_core::{BranchId, Entity, FranchiseId};

/// A location belonging to exactly one franchise.
///
/// `franchise_id` is fixed at construction; there is no setter for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    id: Option<BranchId>,
    name: String,
    franchise_id: FranchiseId,
}

impl Branch {
    /// A branch that has not been persisted yet.
    pub fn new(franchise_id: FranchiseId, name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            franchise_id,
        }
    }

    /// Rebuild a persisted branch from stored fields.
    pub fn restore(id: BranchId, name: impl Into<String>, franchise_id: FranchiseId) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            franchise_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn franchise_id(&self) -> &FranchiseId {
        &self.franchise_id
    }

    /// Copy with a new name; identifier and owning franchise are kept.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}

impl Entity for Branch {
    type Id = BranchId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }

    fn with_id(self, id: Self::Id) -> Self {
        Self { id: Some(id), ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_name_keeps_owner_and_identity() {
        let branch = Branch::restore(BranchId::numeric(1), "Centro", FranchiseId::numeric(9));
        let renamed = branch.with_name("Norte");

        assert_eq!(renamed.id(), Some(&BranchId::numeric(1)));
        assert_eq!(renamed.franchise_id(), &FranchiseId::numeric(9));
        assert_eq!(renamed.name(), "Norte");
    }
}
