// ==========================================
// 零售补货分配系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 批处理决策系统 (快照输入 → 发货计划输出)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 分配规则
pub mod engine;

// 导入层 - 外部数据与合成数据
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BranchId, ProductId, Qty};

// 领域实体
pub use domain::{
    BranchProfile, BranchStock, CentralStock, DistributionSnapshot, Need, Shipment,
};

// 引擎
pub use engine::{
    DeficitCalculator, DistributionOrchestrator, DistributionResult, LeftoverReallocator,
    ProportionalAllocator, RemainderDistributor, SnapshotValidator, ThresholdPruner,
};

// 仓储
pub use repository::{RepositoryError, RepositoryResult, ShipmentRepository, SnapshotRepository};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售补货分配系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
