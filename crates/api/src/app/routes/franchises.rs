use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};

use crate::app::dto::{self, ApiJson};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_franchise))
        .route("/:id/name", patch(update_franchise_name))
        .route("/:id/branches", post(add_branch))
        .route("/:id/top-products", get(top_stock_products))
}

pub async fn create_franchise(
    Extension(services): Extension<AppServices>,
    ApiJson(body): ApiJson<dto::NameRequest>,
) -> Result<(StatusCode, Json<dto::FranchiseResponse>), ApiError> {
    let name = body.validate()?;
    let franchise = services.catalog.create_franchise.execute(name).await?;
    Ok((StatusCode::CREATED, Json(franchise.into())))
}

pub async fn update_franchise_name(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::NameRequest>,
) -> Result<Json<dto::FranchiseResponse>, ApiError> {
    let franchise_id = services.franchise_id(&id)?;
    let name = body.validate()?;
    let franchise = services
        .catalog
        .update_franchise_name
        .execute(franchise_id, name)
        .await?;
    Ok(Json(franchise.into()))
}

pub async fn add_branch(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::NameRequest>,
) -> Result<(StatusCode, Json<dto::BranchResponse>), ApiError> {
    let franchise_id = services.franchise_id(&id)?;
    let name = body.validate()?;
    let branch = services
        .catalog
        .add_branch
        .execute(franchise_id, name)
        .await?;
    Ok((StatusCode::CREATED, Json(branch.into())))
}

pub async fn top_stock_products(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> Result<Json<Vec<dto::TopStockProductResponse>>, ApiError> {
    let franchise_id = services.franchise_id(&id)?;
    let rows = services
        .catalog
        .top_stock_products
        .execute(franchise_id)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
