//! # 产品 API
//!
//! 基于 Axum 的内存产品管理服务，采用分层架构：
//! - `app`: 应用层，路由与产品处理器
//! - `core`: 核心层，统一错误处理、提取器、中间件
//! - `infrastructure`: 基础设施层，配置与日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::router::create_router;
pub use app::AppState;
