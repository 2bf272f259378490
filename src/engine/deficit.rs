// ==========================================
// 零售补货分配系统 - 缺口计算引擎
// ==========================================
// 职责: 计算 (门店, 商品) 粒度的未满足需求
// 输入: 门店库存 × 需求 × 门店画像 (内连接)
// 输出: 按商品分组的缺口关系, 仅保留 deficit > 0
// 红线: 缺口永不为负; 全程 Decimal 精确运算
// ==========================================

use crate::domain::snapshot::DistributionSnapshot;
use crate::domain::stock::BranchStock;
use crate::domain::types::{BranchId, ProductId, Qty};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 缺口关系中的一行（deficit > 0 才会出现）
#[derive(Debug, Clone, PartialEq)]
pub struct DeficitEntry {
    pub branch_id: BranchId,
    pub product_id: ProductId,
    /// 缺口 = max(0, need - 有效可用量)，可为小数
    pub deficit: Decimal,
    /// 门店优先级权重
    pub priority: Qty,
}

// ==========================================
// DeficitCalculator - 缺口计算引擎
// ==========================================
pub struct DeficitCalculator {
    // 无状态引擎,不需要注入依赖
}

impl DeficitCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 单点缺口: max(0, need - (stock + transit - reserve))
    ///
    /// 无状态、无副作用。库存量为小数时缺口也为小数，
    /// Decimal 保证零附近的符号判定精确。
    pub fn deficit(need: Qty, stock: &BranchStock) -> Decimal {
        (Decimal::from(need) - stock.effective_available()).max(Decimal::ZERO)
    }

    /// 计算整个快照的缺口关系
    ///
    /// 连接语义与输入契约一致：(门店, 商品) 必须同时存在于
    /// 门店库存与需求两张关系中，且门店有画像，否则静默排除。
    /// 缺口为零的行不参与分配，在此处即被过滤。
    ///
    /// # 返回
    /// 按商品分组的缺口列表（BTreeMap 保证商品遍历顺序确定）
    pub fn compute(&self, snapshot: &DistributionSnapshot) -> BTreeMap<ProductId, Vec<DeficitEntry>> {
        let stock_index = snapshot.branch_stock_index();
        let profile_index = snapshot.profile_index();

        let mut by_product: BTreeMap<ProductId, Vec<DeficitEntry>> = BTreeMap::new();
        for need in &snapshot.needs {
            let stock = match stock_index.get(&(need.branch_id, need.product_id)) {
                Some(stock) => stock,
                None => continue,
            };
            let profile = match profile_index.get(&need.branch_id) {
                Some(profile) => profile,
                None => continue,
            };

            let deficit = Self::deficit(need.need, stock);
            if deficit <= Decimal::ZERO {
                continue;
            }

            by_product
                .entry(need.product_id)
                .or_default()
                .push(DeficitEntry {
                    branch_id: need.branch_id,
                    product_id: need.product_id,
                    deficit,
                    priority: profile.priority,
                });
        }

        by_product
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DeficitCalculator {
    fn default() -> Self {
        Self::new()
    }
}
