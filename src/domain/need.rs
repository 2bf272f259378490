// ==========================================
// 零售补货分配系统 - 需求实体
// ==========================================

use crate::domain::types::{BranchId, ProductId, Qty};
use serde::{Deserialize, Serialize};

/// 门店需求记录（(门店, 商品) 粒度）
///
/// need 为非负整数需求量。需求与库存的差额才是缺口，
/// 缺口计算见 engine::DeficitCalculator。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Need {
    pub branch_id: BranchId,
    pub product_id: ProductId,
    pub need: Qty,
}
