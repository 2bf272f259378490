// ==========================================
// 零售补货分配系统 - 领域类型定义
// ==========================================
// 红线: 门店/商品标识为不透明令牌,不得假设内部结构
// ==========================================

use uuid::Uuid;

/// 门店标识
///
/// 源系统中为 128 位 UUID，全局唯一。仅用于相等比较与排序兜底，
/// 不携带任何业务语义。
pub type BranchId = Uuid;

/// 商品标识
pub type ProductId = Uuid;

/// 整数数量（需求量 / 发货量 / 优先级权重）
pub type Qty = i64;
