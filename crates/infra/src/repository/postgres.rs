//! Postgres-backed catalog store.
//!
//! Identifiers are `BIGSERIAL` columns, so only numeric [`RecordId`]s can be
//! addressed; token ids are rejected with `RepositoryError::UnsupportedId`.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError | Scenario |
//! |------------|----------------------|-----------------|----------|
//! | Database (foreign key violation) | `23503` | `Integrity` | Parent row missing on insert |
//! | Update matched no row | N/A | `Integrity` | Row deleted after it was read |
//! | Database (check constraint violation) | `23514` | `Storage` | Negative stock reached the database |
//! | Database (other) | Any other | `Storage` | Other database errors |
//! | PoolClosed | N/A | `Storage` | Connection pool was closed |
//! | Other | N/A | `Storage` | Network errors, connection failures, etc. |
//!
//! ## Thread Safety
//!
//! `PostgresCatalogStore` is `Send + Sync`; all statements go through the SQLx
//! connection pool. Each statement is atomic on its own and no transaction
//! spans more than one.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::{instrument, Span};

use stockline_catalog::{
    Branch, BranchRepository, Franchise, FranchiseRepository, Product, ProductRepository,
    RepositoryError, RepositoryResult,
};
use stockline_core::{BranchId, Entity, FranchiseId, ProductId, RecordId};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS franchises (
        id   BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS branches (
        id           BIGSERIAL PRIMARY KEY,
        name         TEXT NOT NULL,
        franchise_id BIGINT NOT NULL REFERENCES franchises (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id        BIGSERIAL PRIMARY KEY,
        name      TEXT NOT NULL,
        stock     BIGINT NOT NULL CHECK (stock >= 0),
        branch_id BIGINT NOT NULL REFERENCES branches (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS branches_franchise_id_idx ON branches (franchise_id)",
    "CREATE INDEX IF NOT EXISTS products_branch_stock_idx ON products (branch_id, stock DESC, id)",
];

/// Postgres-backed store implementing every catalog port.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    /// Create a new PostgresCatalogStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> RepositoryResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the catalog tables if they do not exist yet.
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> RepositoryResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl FranchiseRepository for PostgresCatalogStore {
    #[instrument(skip(self, franchise), fields(franchise_id = ?franchise.id()))]
    async fn save(&self, franchise: Franchise) -> RepositoryResult<Franchise> {
        let row = match franchise.id() {
            None => sqlx::query("INSERT INTO franchises (name) VALUES ($1) RETURNING id, name")
                .bind(franchise.name())
                .fetch_one(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("franchise.save", e))?,
            Some(id) => {
                let id = numeric(id.as_record())?;
                sqlx::query("UPDATE franchises SET name = $2 WHERE id = $1 RETURNING id, name")
                    .bind(id)
                    .bind(franchise.name())
                    .fetch_optional(&*self.pool)
                    .await
                    .map_err(|e| map_sqlx_error("franchise.save", e))?
                    .ok_or_else(|| row_gone("franchise", id))?
            }
        };

        let row = FranchiseRow::from_row(&row).map_err(|e| map_sqlx_error("franchise.save", e))?;
        Ok(franchise_from_row(row))
    }

    #[instrument(skip(self), fields(franchise_id = %id))]
    async fn find_by_id(&self, id: &FranchiseId) -> RepositoryResult<Option<Franchise>> {
        let row = sqlx::query("SELECT id, name FROM franchises WHERE id = $1")
            .bind(numeric(id.as_record())?)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("franchise.find_by_id", e))?;

        row.map(|r| FranchiseRow::from_row(&r).map(franchise_from_row))
            .transpose()
            .map_err(|e| map_sqlx_error("franchise.find_by_id", e))
    }
}

#[async_trait]
impl BranchRepository for PostgresCatalogStore {
    #[instrument(skip(self, branch), fields(branch_id = ?branch.id()))]
    async fn save(&self, branch: Branch) -> RepositoryResult<Branch> {
        let row = match branch.id() {
            None => sqlx::query(
                "INSERT INTO branches (name, franchise_id) VALUES ($1, $2) RETURNING id, name, franchise_id",
            )
            .bind(branch.name())
            .bind(numeric(branch.franchise_id().as_record())?)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("branch.save", e))?,
            // The owning franchise is fixed at creation.
            Some(id) => {
                let id = numeric(id.as_record())?;
                sqlx::query(
                    "UPDATE branches SET name = $2 WHERE id = $1 RETURNING id, name, franchise_id",
                )
                .bind(id)
                .bind(branch.name())
                .fetch_optional(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("branch.save", e))?
                .ok_or_else(|| row_gone("branch", id))?
            }
        };

        let row = BranchRow::from_row(&row).map_err(|e| map_sqlx_error("branch.save", e))?;
        Ok(branch_from_row(row))
    }

    #[instrument(skip(self), fields(branch_id = %id))]
    async fn find_by_id(&self, id: &BranchId) -> RepositoryResult<Option<Branch>> {
        let row = sqlx::query("SELECT id, name, franchise_id FROM branches WHERE id = $1")
            .bind(numeric(id.as_record())?)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("branch.find_by_id", e))?;

        row.map(|r| BranchRow::from_row(&r).map(branch_from_row))
            .transpose()
            .map_err(|e| map_sqlx_error("branch.find_by_id", e))
    }
}

#[async_trait]
impl ProductRepository for PostgresCatalogStore {
    #[instrument(skip(self, product), fields(product_id = ?product.id()))]
    async fn save(&self, product: Product) -> RepositoryResult<Product> {
        let stock = i64::from(product.stock());
        let row = match product.id() {
            None => sqlx::query(
                r#"
                INSERT INTO products (name, stock, branch_id)
                VALUES ($1, $2, $3)
                RETURNING id, name, stock, branch_id
                "#,
            )
            .bind(product.name())
            .bind(stock)
            .bind(numeric(product.branch_id().as_record())?)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("product.save", e))?,
            // A concurrent delete leaves nothing to update; the row is not re-created.
            Some(id) => {
                let id = numeric(id.as_record())?;
                sqlx::query(
                    r#"
                    UPDATE products SET name = $2, stock = $3
                    WHERE id = $1
                    RETURNING id, name, stock, branch_id
                    "#,
                )
                .bind(id)
                .bind(product.name())
                .bind(stock)
                .fetch_optional(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("product.save", e))?
                .ok_or_else(|| row_gone("product", id))?
            }
        };

        let row = ProductRow::from_row(&row).map_err(|e| map_sqlx_error("product.save", e))?;
        product_from_row(row)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        let row = sqlx::query("SELECT id, name, stock, branch_id FROM products WHERE id = $1")
            .bind(numeric(id.as_record())?)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("product.find_by_id", e))?;

        match row {
            Some(r) => {
                let row =
                    ProductRow::from_row(&r).map_err(|e| map_sqlx_error("product.find_by_id", e))?;
                product_from_row(row).map(Some)
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(product_id = %id, rows_affected))]
    async fn delete_by_id(&self, id: &ProductId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(numeric(id.as_record())?)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("product.delete_by_id", e))?;

        Span::current().record("rows_affected", result.rows_affected());
        Ok(())
    }

    /// Grouped top-1 pushed down to Postgres: rank products inside each branch
    /// by stock (descending) then id (ascending) and keep rank 1.
    #[instrument(skip(self), fields(franchise_id = %franchise_id, row_count))]
    async fn find_top_stock_by_branches_in_franchise(
        &self,
        franchise_id: &FranchiseId,
    ) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, stock, branch_id
            FROM (
                SELECT
                    p.id,
                    p.name,
                    p.stock,
                    p.branch_id,
                    ROW_NUMBER() OVER (
                        PARTITION BY p.branch_id
                        ORDER BY p.stock DESC, p.id ASC
                    ) AS stock_rank
                FROM products p
                INNER JOIN branches b ON p.branch_id = b.id
                WHERE b.franchise_id = $1
            ) ranked
            WHERE stock_rank = 1
            ORDER BY branch_id ASC
            "#,
        )
        .bind(numeric(franchise_id.as_record())?)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("product.find_top_stock", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let row = ProductRow::from_row(&row)
                .map_err(|e| map_sqlx_error("product.find_top_stock", e))?;
            products.push(product_from_row(row)?);
        }

        Span::current().record("row_count", products.len());
        Ok(products)
    }
}

fn numeric(id: &RecordId) -> RepositoryResult<i64> {
    id.as_numeric().ok_or_else(|| {
        RepositoryError::UnsupportedId(format!("postgres store requires numeric ids, got '{id}'"))
    })
}

/// An update matched no row: the entity was deleted after it was read.
fn row_gone(table: &'static str, id: i64) -> RepositoryError {
    RepositoryError::integrity(format!("{table} {id} no longer exists"))
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());

            match db_err.code().as_deref() {
                // Foreign key violation: the parent row is gone.
                Some("23503") => RepositoryError::Integrity(msg),
                _ => RepositoryError::storage(operation, msg),
            }
        }
        sqlx::Error::PoolClosed => RepositoryError::storage(operation, "connection pool closed"),
        _ => RepositoryError::storage(operation, err.to_string()),
    }
}

// SQLx row types

#[derive(Debug)]
struct FranchiseRow {
    id: i64,
    name: String,
}

impl<'r> FromRow<'r, PgRow> for FranchiseRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(FranchiseRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}

#[derive(Debug)]
struct BranchRow {
    id: i64,
    name: String,
    franchise_id: i64,
}

impl<'r> FromRow<'r, PgRow> for BranchRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(BranchRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            franchise_id: row.try_get("franchise_id")?,
        })
    }
}

#[derive(Debug)]
struct ProductRow {
    id: i64,
    name: String,
    stock: i64,
    branch_id: i64,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            stock: row.try_get("stock")?,
            branch_id: row.try_get("branch_id")?,
        })
    }
}

fn franchise_from_row(row: FranchiseRow) -> Franchise {
    Franchise::restore(FranchiseId::numeric(row.id), row.name)
}

fn branch_from_row(row: BranchRow) -> Branch {
    Branch::restore(
        BranchId::numeric(row.id),
        row.name,
        FranchiseId::numeric(row.franchise_id),
    )
}

fn product_from_row(row: ProductRow) -> RepositoryResult<Product> {
    let stock = u32::try_from(row.stock).map_err(|_| {
        RepositoryError::integrity(format!("product {} has out-of-range stock {}", row.id, row.stock))
    })?;
    Ok(Product::restore(
        ProductId::numeric(row.id),
        row.name,
        stock,
        BranchId::numeric(row.branch_id),
    ))
}
