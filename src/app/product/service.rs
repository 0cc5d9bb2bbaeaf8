//! 产品存储服务

use super::model::{Product, ProductResponse};
use crate::core::error::ApiError;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// 锁内数据：产品表与下一个待分配的 ID
#[derive(Debug)]
struct Inventory {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// 内存产品存储
///
/// 克隆得到的是同一份存储的句柄。每个操作只获取一次锁，
/// ID 分配与插入在同一临界区内完成，删除后的 ID 不会被再次分配。
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    inner: Arc<Mutex<Inventory>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    // 每次修改都是单个 map 操作，锁中毒后数据仍然一致
    fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 按 ID 升序返回全部产品
    pub fn list(&self) -> Vec<ProductResponse> {
        self.lock()
            .products
            .iter()
            .map(|(id, product)| ProductResponse::new(*id, product))
            .collect()
    }

    pub fn get(&self, id: i64) -> Result<ProductResponse, ApiError> {
        self.lock()
            .products
            .get(&id)
            .map(|product| ProductResponse::new(id, product))
            .ok_or_else(ApiError::product_not_found)
    }

    pub fn create(&self, product: Product) -> ProductResponse {
        let mut inventory = self.lock();
        let id = inventory.next_id;
        let response = ProductResponse::new(id, &product);
        inventory.products.insert(id, product);
        inventory.next_id += 1;
        response
    }

    /// 整体替换已有产品，不做字段合并
    pub fn update(&self, id: i64, product: Product) -> Result<ProductResponse, ApiError> {
        let mut inventory = self.lock();
        let slot = inventory
            .products
            .get_mut(&id)
            .ok_or_else(ApiError::product_not_found)?;
        *slot = product;
        Ok(ProductResponse::new(id, slot))
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.lock()
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(ApiError::product_not_found)
    }
}
