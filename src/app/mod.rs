//! 应用层

pub mod product;
pub mod router;
pub mod system;

use product::service::ProductStore;

/// 应用共享状态，克隆时共享同一个产品存储
#[derive(Clone, Default)]
pub struct AppState {
    pub products: ProductStore,
}

impl AppState {
    /// 创建带有空存储的状态，ID 从 1 开始分配
    pub fn new() -> Self {
        Self {
            products: ProductStore::new(),
        }
    }
}
