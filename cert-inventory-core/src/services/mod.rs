//! 业务逻辑服务层

mod inventory_service;

pub use inventory_service::{InventoryService, RefreshSummary};

use std::sync::Arc;

use crate::traits::{InventoryStore, PlatformSourceFactory, SourceFactory};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// 证书清单存储
    pub inventory_store: Arc<dyn InventoryStore>,
    /// 云证书平台工厂
    pub source_factory: Arc<dyn SourceFactory>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        inventory_store: Arc<dyn InventoryStore>,
        source_factory: Arc<dyn SourceFactory>,
    ) -> Self {
        Self {
            inventory_store,
            source_factory,
        }
    }

    /// 使用默认平台工厂创建上下文
    #[must_use]
    pub fn with_store(inventory_store: Arc<dyn InventoryStore>) -> Self {
        Self::new(inventory_store, Arc::new(PlatformSourceFactory))
    }
}
