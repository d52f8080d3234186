//! Recording fake repositories for use-case tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;

use stockline_core::{BranchId, Entity, FranchiseId, ProductId, RecordId};

use crate::ports::{
    BranchRepository, FranchiseRepository, ProductRepository, RepositoryError, RepositoryResult,
};
use crate::{Branch, Franchise, Product, top_stock_per_branch};

/// In-memory repositories that count every write and delete.
#[derive(Debug, Default)]
pub(crate) struct FakeStore {
    franchises: Mutex<BTreeMap<FranchiseId, Franchise>>,
    branches: Mutex<BTreeMap<BranchId, Branch>>,
    products: Mutex<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
    writes: AtomicUsize,
    failing: Mutex<HashSet<&'static str>>,
    top_stock_override: Mutex<Option<Vec<Product>>>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
            ..Self::default()
        }
    }

    /// Number of save/delete calls that reached the store.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make the named operation fail with a storage error.
    pub(crate) fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Return these rows from the top-stock query instead of computing them.
    pub(crate) fn force_top_stock(&self, rows: Vec<Product>) {
        *self.top_stock_override.lock().unwrap() = Some(rows);
    }

    pub(crate) fn seed_franchise(&self, id: i64, name: &str) -> Franchise {
        let franchise = Franchise::restore(FranchiseId::numeric(id), name);
        self.franchises
            .lock()
            .unwrap()
            .insert(FranchiseId::numeric(id), franchise.clone());
        franchise
    }

    pub(crate) fn seed_branch(&self, id: i64, name: &str, franchise_id: i64) -> Branch {
        let branch = Branch::restore(BranchId::numeric(id), name, FranchiseId::numeric(franchise_id));
        self.branches
            .lock()
            .unwrap()
            .insert(BranchId::numeric(id), branch.clone());
        branch
    }

    pub(crate) fn seed_product(&self, id: i64, name: &str, stock: u32, branch_id: i64) -> Product {
        let product = Product::restore(ProductId::numeric(id), name, stock, BranchId::numeric(branch_id));
        self.products
            .lock()
            .unwrap()
            .insert(ProductId::numeric(id), product.clone());
        product
    }

    pub(crate) fn product(&self, id: i64) -> Option<Product> {
        self.products.lock().unwrap().get(&ProductId::numeric(id)).cloned()
    }

    pub(crate) fn branch_count(&self) -> usize {
        self.branches.lock().unwrap().len()
    }

    fn check(&self, operation: &'static str) -> RepositoryResult<()> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(RepositoryError::storage(operation, "injected failure"));
        }
        Ok(())
    }

    fn assign<E: Entity>(&self, entity: E) -> E {
        if entity.id().is_some() {
            return entity;
        }
        let next = self.next_id.fetch_add(1, Ordering::SeqCst);
        entity.with_id(E::Id::from(RecordId::Numeric(next)))
    }
}

#[async_trait]
impl FranchiseRepository for FakeStore {
    async fn save(&self, franchise: Franchise) -> RepositoryResult<Franchise> {
        self.check("franchise.save")?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let franchise = self.assign(franchise);
        let id = franchise.id().cloned().unwrap();
        self.franchises.lock().unwrap().insert(id, franchise.clone());
        Ok(franchise)
    }

    async fn find_by_id(&self, id: &FranchiseId) -> RepositoryResult<Option<Franchise>> {
        self.check("franchise.find_by_id")?;
        Ok(self.franchises.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl BranchRepository for FakeStore {
    async fn save(&self, branch: Branch) -> RepositoryResult<Branch> {
        self.check("branch.save")?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let branch = self.assign(branch);
        let id = branch.id().cloned().unwrap();
        self.branches.lock().unwrap().insert(id, branch.clone());
        Ok(branch)
    }

    async fn find_by_id(&self, id: &BranchId) -> RepositoryResult<Option<Branch>> {
        self.check("branch.find_by_id")?;
        Ok(self.branches.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl ProductRepository for FakeStore {
    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        self.check("product.save")?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        let product = self.assign(product);
        let id = product.id().cloned().unwrap();
        self.products.lock().unwrap().insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        self.check("product.find_by_id")?;
        Ok(self.products.lock().unwrap().get(id).cloned())
    }

    async fn delete_by_id(&self, id: &ProductId) -> RepositoryResult<()> {
        self.check("product.delete_by_id")?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.products.lock().unwrap().remove(id);
        Ok(())
    }

    async fn find_top_stock_by_branches_in_franchise(
        &self,
        franchise_id: &FranchiseId,
    ) -> RepositoryResult<Vec<Product>> {
        self.check("product.find_top_stock")?;
        if let Some(rows) = self.top_stock_override.lock().unwrap().clone() {
            return Ok(rows);
        }

        let branch_ids: HashSet<BranchId> = self
            .branches
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.franchise_id() == franchise_id)
            .filter_map(|b| b.id().cloned())
            .collect();

        let candidates: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .values()
            .filter(|p| branch_ids.contains(p.branch_id()))
            .cloned()
            .collect();

        Ok(top_stock_per_branch(candidates))
    }
}
