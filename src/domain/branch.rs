// ==========================================
// 零售补货分配系统 - 门店画像实体
// ==========================================

use crate::domain::types::{BranchId, Qty};
use serde::{Deserialize, Serialize};

/// 门店画像（门店粒度）
///
/// - priority: 正整数权重，越大越优先参与分配
/// - min_shipment: 起送量，整单发货量低于该值时门店本轮不发货
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchProfile {
    pub branch_id: BranchId,
    pub priority: Qty,
    pub min_shipment: Qty,
}
