//! 产品处理器

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, warn};

use super::model::{Product, ProductId, ProductResponse};
use crate::app::AppState;
use crate::core::{
    error::ApiError,
    extract::{ValidJson, ValidPath},
    response::MessageResponse,
};

/// 获取全部产品
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<ProductResponse>> {
    Json(state.products.list())
}

/// 获取单个产品
pub async fn get_product(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<ProductId>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = existing_id(id)?;
    let product = state.products.get(id).inspect_err(|_| {
        warn!("产品 {} 不存在", id);
    })?;
    Ok(Json(product))
}

/// 创建产品
pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<Product>,
) -> (StatusCode, Json<ProductResponse>) {
    let product = state.products.create(payload);
    info!("创建产品 {}: {}", product.id, product.name);
    (StatusCode::CREATED, Json(product))
}

/// 更新产品（整体替换）
pub async fn update_product(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<ProductId>,
    ValidJson(payload): ValidJson<Product>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = existing_id(id)?;
    let product = state.products.update(id, payload).inspect_err(|_| {
        warn!("更新失败，产品 {} 不存在", id);
    })?;
    info!("更新产品 {}", id);
    Ok(Json(product))
}

/// 删除产品
pub async fn delete_product(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<ProductId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = existing_id(id)?;
    state.products.delete(id).inspect_err(|_| {
        warn!("删除失败，产品 {} 不存在", id);
    })?;
    info!("删除产品 {}", id);
    Ok(Json(MessageResponse::new("Product deleted")))
}

// 超出范围的 ID 不可能存在
fn existing_id(id: ProductId) -> Result<i64, ApiError> {
    id.0.ok_or_else(|| {
        warn!("产品 ID 超出范围");
        ApiError::product_not_found()
    })
}
