// ==========================================
// 零售补货分配系统 - 库存实体
// ==========================================
// 职责: 门店库存与中央仓库存
// 红线: 库存量为任意精度小数,统一使用 Decimal,
//       禁止 f64 参与缺口符号判定
// ==========================================

use crate::domain::types::{BranchId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// BranchStock - 门店库存
// ==========================================

/// 门店在售库存记录（(门店, 商品) 粒度）
///
/// stock / reserve / transit 各自非负；
/// 有效可用量 = stock + transit - reserve，可以为负。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStock {
    pub branch_id: BranchId,
    pub product_id: ProductId,
    /// 在库量
    pub stock: Decimal,
    /// 预留量（已被订单锁定）
    pub reserve: Decimal,
    /// 在途量（已发出未到店）
    pub transit: Decimal,
}

impl BranchStock {
    /// 有效可用量 = stock + transit - reserve
    ///
    /// 预留超过在库+在途时结果为负，属于合法输入。
    pub fn effective_available(&self) -> Decimal {
        self.stock + self.transit - self.reserve
    }
}

// ==========================================
// CentralStock - 中央仓库存
// ==========================================

/// 中央仓（配送中心）库存记录（(商品, 仓点) 粒度）
///
/// 同一商品可分布在多个仓点，分配时按商品汇总。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralStock {
    pub product_id: ProductId,
    pub location_id: BranchId,
    pub stock: Decimal,
}
