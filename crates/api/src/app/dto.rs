use axum::async_trait;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use stockline_catalog::{Branch, Franchise, Product, ProductWithBranch};
use stockline_core::{BranchId, Entity, FranchiseId, ProductId};

use crate::app::errors::ApiError;

// -------------------------
// Extractors
// -------------------------

/// `axum::Json` whose rejections use the API error body.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

// -------------------------
// Request DTOs
// -------------------------

const NAME_REQUIRED: &str = "name: The name is a required field.";
const STOCK_REQUIRED: &str = "stock: The stock is a required field.";
const STOCK_NEGATIVE: &str = "stock: Stock must be greater than or equal to 0.";
const STOCK_TOO_LARGE: &str = "stock: Stock must be less than or equal to 2147483647.";

/// Body for every endpoint that only carries a name.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: Option<String>,
}

impl NameRequest {
    pub fn validate(self) -> Result<String, ApiError> {
        required_name(self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub stock: Option<i64>,
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<(String, u32), ApiError> {
        let name = required_name(self.name)?;
        let stock = required_stock(self.stock)?;
        Ok((name, stock))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: Option<i64>,
}

impl UpdateStockRequest {
    pub fn validate(self) -> Result<u32, ApiError> {
        required_stock(self.stock)
    }
}

fn required_name(name: Option<String>) -> Result<String, ApiError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ApiError::invalid_format(NAME_REQUIRED)),
    }
}

fn required_stock(stock: Option<i64>) -> Result<u32, ApiError> {
    let stock = stock.ok_or_else(|| ApiError::invalid_format(STOCK_REQUIRED))?;
    if stock < 0 {
        return Err(ApiError::invalid_format(STOCK_NEGATIVE));
    }
    if stock > i64::from(i32::MAX) {
        return Err(ApiError::invalid_format(STOCK_TOO_LARGE));
    }
    u32::try_from(stock).map_err(|_| ApiError::invalid_format(STOCK_TOO_LARGE))
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct FranchiseResponse {
    pub id: Option<FranchiseId>,
    pub name: String,
}

impl From<Franchise> for FranchiseResponse {
    fn from(franchise: Franchise) -> Self {
        Self {
            id: franchise.id().cloned(),
            name: franchise.name().to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchResponse {
    pub id: Option<BranchId>,
    pub name: String,
    pub franchise_id: FranchiseId,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id().cloned(),
            name: branch.name().to_owned(),
            franchise_id: branch.franchise_id().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Option<ProductId>,
    pub name: String,
    pub stock: u32,
    pub branch_id: BranchId,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().cloned(),
            name: product.name().to_owned(),
            stock: product.stock(),
            branch_id: product.branch_id().clone(),
        }
    }
}

/// One row of the top-stock report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStockProductResponse {
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub stock: u32,
    pub branch_id: Option<BranchId>,
    pub branch_name: String,
}

impl From<ProductWithBranch> for TopStockProductResponse {
    fn from(row: ProductWithBranch) -> Self {
        let (product, branch) = row.into_parts();
        Self {
            product_id: product.id().cloned(),
            product_name: product.name().to_owned(),
            stock: product.stock(),
            branch_id: branch.id().cloned(),
            branch_name: branch.name().to_owned(),
        }
    }
}
