// ==========================================
// 零售补货分配系统 - 输入校验引擎
// ==========================================
// 职责: 运行前校验输入快照的数据契约
// 红线: 违约即拒绝整轮运行, 不钳位、不静默修正
// ==========================================

use crate::domain::snapshot::DistributionSnapshot;
use crate::engine::error::{EngineError, EngineResult};
use rust_decimal::Decimal;

// ==========================================
// SnapshotValidator - 输入校验引擎
// ==========================================
pub struct SnapshotValidator {
    // 无状态引擎,不需要注入依赖
}

impl SnapshotValidator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 校验输入快照
    ///
    /// 契约：
    /// - 门店库存 stock / reserve / transit 各自非负（有效可用量可以为负）
    /// - 中央仓库存非负
    /// - 需求量非负
    /// - 优先级 ≥ 1，起送量 ≥ 1
    ///
    /// # 返回
    /// 第一处违约以 `EngineError::Validation` 返回
    pub fn validate(&self, snapshot: &DistributionSnapshot) -> EngineResult<()> {
        for row in &snapshot.branch_stock {
            if row.stock < Decimal::ZERO {
                return Err(Self::violation(
                    "branch_stock.stock",
                    format!(
                        "门店 {} 商品 {} 在库量为负: {}",
                        row.branch_id, row.product_id, row.stock
                    ),
                ));
            }
            if row.reserve < Decimal::ZERO {
                return Err(Self::violation(
                    "branch_stock.reserve",
                    format!(
                        "门店 {} 商品 {} 预留量为负: {}",
                        row.branch_id, row.product_id, row.reserve
                    ),
                ));
            }
            if row.transit < Decimal::ZERO {
                return Err(Self::violation(
                    "branch_stock.transit",
                    format!(
                        "门店 {} 商品 {} 在途量为负: {}",
                        row.branch_id, row.product_id, row.transit
                    ),
                ));
            }
        }

        for row in &snapshot.central_stock {
            if row.stock < Decimal::ZERO {
                return Err(Self::violation(
                    "central_stock.stock",
                    format!(
                        "仓点 {} 商品 {} 库存为负: {}",
                        row.location_id, row.product_id, row.stock
                    ),
                ));
            }
        }

        for row in &snapshot.needs {
            if row.need < 0 {
                return Err(Self::violation(
                    "needs.need",
                    format!(
                        "门店 {} 商品 {} 需求量为负: {}",
                        row.branch_id, row.product_id, row.need
                    ),
                ));
            }
        }

        for profile in &snapshot.profiles {
            if profile.priority < 1 {
                return Err(Self::violation(
                    "branch_profiles.priority",
                    format!("门店 {} 优先级非正: {}", profile.branch_id, profile.priority),
                ));
            }
            if profile.min_shipment < 1 {
                return Err(Self::violation(
                    "branch_profiles.min_shipment",
                    format!(
                        "门店 {} 起送量非正: {}",
                        profile.branch_id, profile.min_shipment
                    ),
                ));
            }
        }

        Ok(())
    }

    fn violation(field: &str, message: String) -> EngineError {
        EngineError::Validation {
            field: field.to_string(),
            message,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for SnapshotValidator {
    fn default() -> Self {
        Self::new()
    }
}
