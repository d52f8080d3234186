use stockline_core::{BranchId, Entity, ProductId};

use crate::branch::Branch;

/// An item stocked in exactly one branch.
///
/// Stock is unsigned, so a negative count cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Option<ProductId>,
    name: String,
    stock: u32,
    branch_id: BranchId,
}

impl Product {
    /// A product that has not been persisted yet.
    pub fn new(branch_id: BranchId, name: impl Into<String>, stock: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            stock,
            branch_id,
        }
    }

    /// Rebuild a persisted product from stored fields.
    pub fn restore(id: ProductId, name: impl Into<String>, stock: u32, branch_id: BranchId) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            stock,
            branch_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn branch_id(&self) -> &BranchId {
        &self.branch_id
    }

    /// Copy with a new name; stock, branch and identifier are kept.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Copy with a new stock count; name, branch and identifier are kept.
    pub fn with_stock(self, stock: u32) -> Self {
        Self { stock, ..self }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<&Self::Id> {
        self.id.as_ref()
    }

    fn with_id(self, id: Self::Id) -> Self {
        Self { id: Some(id), ..self }
    }
}

/// Read model pairing a product with the branch that stocks it.
///
/// Produced only by the top-stock query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithBranch {
    product: Product,
    branch: Branch,
}

impl ProductWithBranch {
    pub fn new(product: Product, branch: Branch) -> Self {
        Self { product, branch }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn into_parts(self) -> (Product, Branch) {
        (self.product, self.branch)
    }
}
