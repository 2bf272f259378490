// ==========================================
// 零售补货分配系统 - 输入快照
// ==========================================
// 职责: 承载一次分配运行的四张只读输入关系
// 红线: 快照一经构建不再变更; 引擎不得回写快照
// ==========================================

use crate::domain::branch::BranchProfile;
use crate::domain::need::Need;
use crate::domain::stock::{BranchStock, CentralStock};
use crate::domain::types::{BranchId, ProductId, Qty};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, HashMap};

/// 一次分配运行的输入快照
///
/// 四张关系在同一时间点读取，运行期间不可变；
/// 快照一致性由外围系统保证。
#[derive(Debug, Clone, Default)]
pub struct DistributionSnapshot {
    pub branch_stock: Vec<BranchStock>,
    pub central_stock: Vec<CentralStock>,
    pub needs: Vec<Need>,
    pub profiles: Vec<BranchProfile>,
}

impl DistributionSnapshot {
    /// 按商品汇总中央仓库存
    ///
    /// 同一商品跨仓点求和后取整（四舍五入、半数远离零），
    /// 分配以整件为单位进行。
    pub fn total_central_stock(&self) -> BTreeMap<ProductId, Qty> {
        let mut sums: BTreeMap<ProductId, Decimal> = BTreeMap::new();
        for row in &self.central_stock {
            *sums.entry(row.product_id).or_insert(Decimal::ZERO) += row.stock;
        }

        sums.into_iter()
            .map(|(product_id, sum)| {
                let total = sum
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
                    .unwrap_or(0);
                (product_id, total)
            })
            .collect()
    }

    /// 门店画像索引（branch_id → 画像）
    pub fn profile_index(&self) -> HashMap<BranchId, &BranchProfile> {
        self.profiles.iter().map(|p| (p.branch_id, p)).collect()
    }

    /// 门店库存索引（(branch_id, product_id) → 库存行）
    pub fn branch_stock_index(&self) -> HashMap<(BranchId, ProductId), &BranchStock> {
        self.branch_stock
            .iter()
            .map(|s| ((s.branch_id, s.product_id), s))
            .collect()
    }
}
