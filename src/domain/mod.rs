// ==========================================
// 零售补货分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、快照结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod branch;
pub mod need;
pub mod shipment;
pub mod snapshot;
pub mod stock;
pub mod types;

// 重导出核心类型
pub use branch::BranchProfile;
pub use need::Need;
pub use shipment::Shipment;
pub use snapshot::DistributionSnapshot;
pub use stock::{BranchStock, CentralStock};
pub use types::{BranchId, ProductId, Qty};
