//! 产品管理：模型、存储服务、处理器

pub mod handler;
pub mod model;
pub mod service;
