// ==========================================
// 零售补货分配系统 - 起送量剔除引擎
// ==========================================
// 职责: 整单发货量低于起送量的门店整体清零
// 输入: 全商品合并后的发货行 + 门店画像
// 输出: 存活发货行 + 按商品归集的释放余量
// 红线: 剔除是整店移除, 不是补足到起送量;
//       本阶段跨商品汇总, 必须在所有商品完成前两轮后执行
// ==========================================

use crate::domain::branch::BranchProfile;
use crate::domain::shipment::Shipment;
use crate::domain::types::{BranchId, ProductId, Qty};
use std::collections::{BTreeMap, HashMap, HashSet};

/// 剔除结果
#[derive(Debug, Clone)]
pub struct PruneOutcome {
    /// 存活发货行（整单发货量 ≥ 起送量的门店）
    pub surviving: Vec<Shipment>,
    /// 剔除释放的余量，按商品归集
    pub leftovers: BTreeMap<ProductId, Qty>,
    /// 被整体清零的门店（统计/日志用）
    pub pruned_branches: Vec<BranchId>,
}

// ==========================================
// ThresholdPruner - 起送量剔除引擎
// ==========================================
pub struct ThresholdPruner {
    // 无状态引擎,不需要注入依赖
}

impl ThresholdPruner {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 按起送量剔除门店
    ///
    /// 门店整单发货量（跨商品求和）低于其起送量时，该门店的
    /// 全部发货行被移除，每行数量计入对应商品的余量池。
    /// 存活门店必然满足 整单发货量 ≥ 起送量。
    ///
    /// # 参数
    /// - `shipments`: 全商品合并后的发货行
    /// - `profiles`: 门店画像索引
    pub fn prune(
        &self,
        shipments: Vec<Shipment>,
        profiles: &HashMap<BranchId, &BranchProfile>,
    ) -> PruneOutcome {
        // 1. 整单发货量 (门店粒度, 跨商品)
        let mut branch_totals: HashMap<BranchId, Qty> = HashMap::new();
        for shipment in &shipments {
            *branch_totals.entry(shipment.branch_id).or_insert(0) += shipment.shipment_qty;
        }

        // 2. 低于起送量的门店集合
        //    画像缺失的门店视为无起送门槛（发货行只会产生于有画像的门店）
        let to_zero: HashSet<BranchId> = branch_totals
            .iter()
            .filter(|(branch_id, total)| {
                profiles
                    .get(branch_id)
                    .map(|p| **total < p.min_shipment)
                    .unwrap_or(false)
            })
            .map(|(branch_id, _)| *branch_id)
            .collect();

        // 3. 移除并归集余量
        let mut surviving = Vec::with_capacity(shipments.len());
        let mut leftovers: BTreeMap<ProductId, Qty> = BTreeMap::new();
        for shipment in shipments {
            if to_zero.contains(&shipment.branch_id) {
                *leftovers.entry(shipment.product_id).or_insert(0) += shipment.shipment_qty;
            } else {
                surviving.push(shipment);
            }
        }

        let mut pruned_branches: Vec<BranchId> = to_zero.into_iter().collect();
        pruned_branches.sort();

        PruneOutcome {
            surviving,
            leftovers,
            pruned_branches,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ThresholdPruner {
    fn default() -> Self {
        Self::new()
    }
}
