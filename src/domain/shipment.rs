// ==========================================
// 零售补货分配系统 - 发货计划实体
// ==========================================

use crate::domain::types::{BranchId, ProductId, Qty};
use serde::{Deserialize, Serialize};

/// 发货计划行（(门店, 商品) 粒度，输出关系）
///
/// shipment_qty 恒为正整数；数量为零的行不落地，
/// 缺行即表示该 (门店, 商品) 本轮不发货。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub branch_id: BranchId,
    pub product_id: ProductId,
    pub shipment_qty: Qty,
}
