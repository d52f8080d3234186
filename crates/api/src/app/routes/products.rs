use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, patch},
    Json, Router,
};

use crate::app::dto::{self, ApiJson};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/:id", delete(delete_product))
        .route("/:id/name", patch(update_product_name))
        .route("/:id/stock", patch(update_product_stock))
}

pub async fn update_product_name(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::NameRequest>,
) -> Result<Json<dto::ProductResponse>, ApiError> {
    let product_id = services.product_id(&id)?;
    let name = body.validate()?;
    let product = services
        .catalog
        .update_product_name
        .execute(product_id, name)
        .await?;
    Ok(Json(product.into()))
}

pub async fn update_product_stock(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::UpdateStockRequest>,
) -> Result<Json<dto::ProductResponse>, ApiError> {
    let product_id = services.product_id(&id)?;
    let stock = body.validate()?;
    let product = services
        .catalog
        .update_product_stock
        .execute(product_id, stock)
        .await?;
    Ok(Json(product.into()))
}

pub async fn delete_product(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let product_id = services.product_id(&id)?;
    services.catalog.delete_product.execute(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
