use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{patch, post},
    Json, Router,
};

use crate::app::dto::{self, ApiJson};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/:id/name", patch(update_branch_name))
        .route("/:id/products", post(add_product))
}

pub async fn update_branch_name(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::NameRequest>,
) -> Result<Json<dto::BranchResponse>, ApiError> {
    let branch_id = services.branch_id(&id)?;
    let name = body.validate()?;
    let branch = services
        .catalog
        .update_branch_name
        .execute(branch_id, name)
        .await?;
    Ok(Json(branch.into()))
}

pub async fn add_product(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::CreateProductRequest>,
) -> Result<(StatusCode, Json<dto::ProductResponse>), ApiError> {
    let branch_id = services.branch_id(&id)?;
    let (name, stock) = body.validate()?;
    let product = services
        .catalog
        .add_product
        .execute(branch_id, name, stock)
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}
