use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use stockline_catalog::{
    Branch, BranchRepository, Franchise, FranchiseRepository, Product, ProductRepository,
    RepositoryError, RepositoryResult, top_stock_per_branch,
};
use stockline_core::{BranchId, Entity, FranchiseId, ProductId, RecordId};

/// One ordered table of entities keyed by id.
#[derive(Debug)]
struct Table<E: Entity> {
    rows: BTreeMap<E::Id, E>,
    /// Ids removed by a delete; they are never written again.
    retired: HashSet<E::Id>,
    last_id: i64,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            retired: HashSet::new(),
            last_id: 0,
        }
    }
}

impl<E> Table<E>
where
    E: Entity + Clone,
    E::Id: Into<RecordId> + core::fmt::Display,
{
    /// Insert or update.
    ///
    /// Entities without an id get the next numeric one. An id that is already
    /// stored is updated in place. Any other id is only accepted as a
    /// pre-assigned token on its first write: numeric ids come from this
    /// table's counter and retired ids belong to deleted rows, so writing
    /// either back is an integrity error.
    fn save(&mut self, entity: E, table: &'static str) -> RepositoryResult<E> {
        let entity = match entity.id().cloned() {
            Some(id) if self.rows.contains_key(&id) => entity,
            Some(id) => {
                let record: RecordId = id.clone().into();
                if record.as_numeric().is_some() || self.retired.contains(&id) {
                    return Err(RepositoryError::integrity(format!(
                        "{table} {id} no longer exists"
                    )));
                }
                entity
            }
            None => {
                self.last_id += 1;
                entity.with_id(E::Id::from(RecordId::Numeric(self.last_id)))
            }
        };

        if let Some(id) = entity.id() {
            self.rows.insert(id.clone(), entity.clone());
        }
        Ok(entity)
    }

    fn get(&self, id: &E::Id) -> Option<E> {
        self.rows.get(id).cloned()
    }

    fn remove(&mut self, id: &E::Id) {
        if self.rows.remove(id).is_some() {
            self.retired.insert(id.clone());
        }
    }
}

/// In-memory catalog store for tests/dev.
///
/// Enforces the same parent references a relational schema would (a branch's
/// franchise and a product's branch must exist when the row is written).
/// Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    franchises: RwLock<Table<Franchise>>,
    branches: RwLock<Table<Branch>>,
    products: RwLock<Table<Product>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(operation: &'static str) -> RepositoryError {
    RepositoryError::storage(operation, "lock poisoned")
}

#[async_trait]
impl FranchiseRepository for InMemoryCatalogStore {
    async fn save(&self, franchise: Franchise) -> RepositoryResult<Franchise> {
        let mut table = self
            .franchises
            .write()
            .map_err(|_| poisoned("franchise.save"))?;
        table.save(franchise, "franchise")
    }

    async fn find_by_id(&self, id: &FranchiseId) -> RepositoryResult<Option<Franchise>> {
        let table = self
            .franchises
            .read()
            .map_err(|_| poisoned("franchise.find_by_id"))?;
        Ok(table.get(id))
    }
}

#[async_trait]
impl BranchRepository for InMemoryCatalogStore {
    async fn save(&self, branch: Branch) -> RepositoryResult<Branch> {
        let franchise_known = self
            .franchises
            .read()
            .map_err(|_| poisoned("branch.save"))?
            .rows
            .contains_key(branch.franchise_id());
        if !franchise_known {
            return Err(RepositoryError::integrity(format!(
                "branch references missing franchise {}",
                branch.franchise_id()
            )));
        }

        let mut table = self.branches.write().map_err(|_| poisoned("branch.save"))?;
        table.save(branch, "branch")
    }

    async fn find_by_id(&self, id: &BranchId) -> RepositoryResult<Option<Branch>> {
        let table = self
            .branches
            .read()
            .map_err(|_| poisoned("branch.find_by_id"))?;
        Ok(table.get(id))
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogStore {
    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let branch_known = self
            .branches
            .read()
            .map_err(|_| poisoned("product.save"))?
            .rows
            .contains_key(product.branch_id());
        if !branch_known {
            return Err(RepositoryError::integrity(format!(
                "product references missing branch {}",
                product.branch_id()
            )));
        }

        let mut table = self.products.write().map_err(|_| poisoned("product.save"))?;
        table.save(product, "product")
    }

    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        let table = self
            .products
            .read()
            .map_err(|_| poisoned("product.find_by_id"))?;
        Ok(table.get(id))
    }

    async fn delete_by_id(&self, id: &ProductId) -> RepositoryResult<()> {
        let mut table = self
            .products
            .write()
            .map_err(|_| poisoned("product.delete_by_id"))?;
        table.remove(id);
        Ok(())
    }

    async fn find_top_stock_by_branches_in_franchise(
        &self,
        franchise_id: &FranchiseId,
    ) -> RepositoryResult<Vec<Product>> {
        let branch_ids: HashSet<BranchId> = self
            .branches
            .read()
            .map_err(|_| poisoned("product.find_top_stock"))?
            .rows
            .iter()
            .filter(|(_, branch)| branch.franchise_id() == franchise_id)
            .map(|(id, _)| id.clone())
            .collect();

        if branch_ids.is_empty() {
            return Ok(Vec::new());
        }

        let candidates: Vec<Product> = self
            .products
            .read()
            .map_err(|_| poisoned("product.find_top_stock"))?
            .rows
            .values()
            .filter(|p| branch_ids.contains(p.branch_id()))
            .cloned()
            .collect();

        Ok(top_stock_per_branch(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (InMemoryCatalogStore, FranchiseId, BranchId) {
        let store = InMemoryCatalogStore::new();
        let franchise = FranchiseRepository::save(&store, Franchise::new("F1")).await.unwrap();
        let franchise_id = franchise.id().cloned().unwrap();
        let branch = BranchRepository::save(&store, Branch::new(franchise_id.clone(), "B1"))
            .await
            .unwrap();
        (store, franchise_id, branch.id().cloned().unwrap())
    }

    #[tokio::test]
    async fn assigns_sequential_ids_per_table() {
        let store = InMemoryCatalogStore::new();
        let a = FranchiseRepository::save(&store, Franchise::new("A")).await.unwrap();
        let b = FranchiseRepository::save(&store, Franchise::new("B")).await.unwrap();

        assert_eq!(a.id(), Some(&FranchiseId::numeric(1)));
        assert_eq!(b.id(), Some(&FranchiseId::numeric(2)));
    }

    #[tokio::test]
    async fn save_with_id_replaces_row() {
        let (store, franchise_id, _) = seeded().await;
        let renamed = FranchiseRepository::find_by_id(&store, &franchise_id)
            .await
            .unwrap()
            .unwrap()
            .with_name("Renamed");
        FranchiseRepository::save(&store, renamed).await.unwrap();

        let found = FranchiseRepository::find_by_id(&store, &franchise_id).await.unwrap().unwrap();
        assert_eq!(found.name(), "Renamed");
        let next = FranchiseRepository::save(&store, Franchise::new("Next")).await.unwrap();
        assert_eq!(next.id(), Some(&FranchiseId::numeric(2)));
    }

    #[tokio::test]
    async fn pre_assigned_tokens_are_kept() {
        let store = InMemoryCatalogStore::new();
        let id = FranchiseId::new(RecordId::generate());
        let saved = FranchiseRepository::save(&store, Franchise::new("T").with_id(id.clone()))
            .await
            .unwrap();

        assert_eq!(saved.id(), Some(&id));
        assert!(FranchiseRepository::find_by_id(&store, &id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn stale_update_does_not_bring_back_a_deleted_product() {
        let (store, _, branch_id) = seeded().await;
        let product = ProductRepository::save(&store, Product::new(branch_id, "P", 5))
            .await
            .unwrap();
        let id = product.id().cloned().unwrap();

        let stale = ProductRepository::find_by_id(&store, &id).await.unwrap().unwrap();
        ProductRepository::delete_by_id(&store, &id).await.unwrap();
        let err = ProductRepository::save(&store, stale.with_stock(20))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Integrity(_)));
        assert!(ProductRepository::find_by_id(&store, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleted_token_ids_stay_deleted() {
        let (store, _, branch_id) = seeded().await;
        let id = ProductId::new(RecordId::generate());
        let product = ProductRepository::save(&store, Product::new(branch_id, "T", 1).with_id(id.clone()))
            .await
            .unwrap();

        ProductRepository::delete_by_id(&store, &id).await.unwrap();
        let err = ProductRepository::save(&store, product).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Integrity(_)));
    }

    #[tokio::test]
    async fn unknown_numeric_id_is_not_inserted() {
        let store = InMemoryCatalogStore::new();
        let err = FranchiseRepository::save(&store, Franchise::restore(FranchiseId::numeric(7), "Ghost"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Integrity(_)));
        assert!(FranchiseRepository::find_by_id(&store, &FranchiseId::numeric(7)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_orphan_rows() {
        let store = InMemoryCatalogStore::new();
        let err = BranchRepository::save(&store, Branch::new(FranchiseId::numeric(9), "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Integrity(_)));

        let err = ProductRepository::save(&store, Product::new(BranchId::numeric(9), "P", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Integrity(_)));
    }

    #[tokio::test]
    async fn delete_missing_product_is_a_no_op() {
        let store = InMemoryCatalogStore::new();
        ProductRepository::delete_by_id(&store, &ProductId::numeric(1)).await.unwrap();
    }

    #[tokio::test]
    async fn top_stock_is_scoped_to_the_franchise() {
        let (store, franchise_id, branch_id) = seeded().await;
        let other = FranchiseRepository::save(&store, Franchise::new("F2")).await.unwrap();
        let other_branch = BranchRepository::save(
            &store,
            Branch::new(other.id().cloned().unwrap(), "Elsewhere"),
        )
        .await
        .unwrap();
        BranchRepository::save(&store, Branch::new(franchise_id.clone(), "Empty"))
            .await
            .unwrap();

        let p1 = ProductRepository::save(&store, Product::new(branch_id.clone(), "P1", 50))
            .await
            .unwrap();
        ProductRepository::save(&store, Product::new(branch_id.clone(), "P2", 50))
            .await
            .unwrap();
        ProductRepository::save(
            &store,
            Product::new(other_branch.id().cloned().unwrap(), "Big", 1000),
        )
        .await
        .unwrap();

        let rows = store
            .find_top_stock_by_branches_in_franchise(&franchise_id)
            .await
            .unwrap();

        assert_eq!(rows, vec![p1]);
    }
}
