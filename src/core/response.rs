//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 只带一条提示信息的响应，例如删除成功
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
