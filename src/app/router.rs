//! 路由装配

use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    product::handler::{create_product, delete_product, get_product, list_products, update_product},
    system::{health_check, service_info},
    AppState,
};
use crate::core::{error::ApiError, middleware::request_logging_middleware};

/// 创建应用路由
///
/// 超时层由调用方按配置追加，测试中直接使用本函数返回的路由。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", with_405(get(service_info)))
        .route("/health", with_405(get(health_check)))
        .route(
            "/products",
            with_405(get(list_products).post(create_product)),
        )
        .route(
            "/products/:id",
            with_405(get(get_product).put(update_product).delete(delete_product)),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

fn with_405(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
