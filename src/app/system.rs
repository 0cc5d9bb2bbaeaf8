//! 服务信息与健康检查

use axum::response::Json;
use serde::{Deserialize, Serialize};

/// 根路径返回的服务信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub health: String,
    pub port: u16,
}

/// 对外公布的端口，与实际监听端口无关
pub const ADVERTISED_PORT: u16 = 14125;

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            message: "Product API with CI/CD".to_string(),
            version: "1.0.0".to_string(),
            health: "/health".to_string(),
            port: ADVERTISED_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// API 信息
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// 健康检查
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}
