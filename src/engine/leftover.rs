// ==========================================
// 零售补货分配系统 - 余量再分配引擎
// ==========================================
// 职责: 把剔除释放的余量逐件发给仍有缺口的门店
// 输入: 存活发货行 + 按商品归集的余量 + 缺口关系
// 输出: 最终发货行 + 无处可分的余量计数
// 红线: 单商品新增总量 ≤ 该商品余量;
//       资格集来自缺口关系本身, 不排除刚被剔除的门店
// ==========================================

use crate::domain::shipment::Shipment;
use crate::domain::types::{BranchId, ProductId, Qty};
use crate::engine::deficit::DeficitEntry;
use crate::engine::ranking::PriorityRanker;
use std::collections::BTreeMap;

/// 余量再分配结果
#[derive(Debug, Clone)]
pub struct ReallocationOutcome {
    /// 最终发货行（存活行与新增行合并后）
    pub shipments: Vec<Shipment>,
    /// 无处可分的余量（合格门店数少于余量件数时的损失），按商品计
    pub unallocated: BTreeMap<ProductId, Qty>,
}

// ==========================================
// LeftoverReallocator - 余量再分配引擎
// ==========================================
pub struct LeftoverReallocator {
    // 无状态引擎,不需要注入依赖
}

impl LeftoverReallocator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 余量再分配
    ///
    /// 对每个余量 > 0 的商品：合格门店为该商品缺口关系中
    /// deficit > 0 的门店（与首轮同一关系——刚被整店剔除的门店
    /// 若仍有缺口，依旧合格）。按 priority 降序、branch_id 升序
    /// 排名，名次 r ≤ 余量的门店各得 +1，并入存活行或新建行。
    /// 余量超出合格门店数的部分本轮不再发出，仅计数上报。
    ///
    /// # 参数
    /// - `surviving`: 剔除后的存活发货行
    /// - `leftovers`: 按商品归集的余量
    /// - `deficits`: 按商品分组的缺口关系（与首轮分配同源）
    pub fn reallocate(
        &self,
        surviving: Vec<Shipment>,
        leftovers: &BTreeMap<ProductId, Qty>,
        deficits: &BTreeMap<ProductId, Vec<DeficitEntry>>,
    ) -> ReallocationOutcome {
        // (门店, 商品) → 数量, BTreeMap 保证合并后输出顺序确定
        let mut merged: BTreeMap<(ProductId, BranchId), Qty> = BTreeMap::new();
        for shipment in surviving {
            *merged
                .entry((shipment.product_id, shipment.branch_id))
                .or_insert(0) += shipment.shipment_qty;
        }

        let mut unallocated: BTreeMap<ProductId, Qty> = BTreeMap::new();
        for (&product_id, &leftover) in leftovers {
            if leftover <= 0 {
                continue;
            }

            let mut eligible: Vec<&DeficitEntry> = deficits
                .get(&product_id)
                .map(|entries| entries.iter().collect())
                .unwrap_or_default();
            eligible.sort_by(|a, b| {
                PriorityRanker::compare(a.priority, &a.branch_id, b.priority, &b.branch_id)
            });

            let granted = leftover.min(eligible.len() as Qty);
            for entry in eligible.into_iter().take(granted as usize) {
                *merged.entry((product_id, entry.branch_id)).or_insert(0) += 1;
            }

            if granted < leftover {
                unallocated.insert(product_id, leftover - granted);
            }
        }

        let shipments = merged
            .into_iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|((product_id, branch_id), qty)| Shipment {
                branch_id,
                product_id,
                shipment_qty: qty,
            })
            .collect();

        ReallocationOutcome {
            shipments,
            unallocated,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for LeftoverReallocator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn entry(branch_id: BranchId, product_id: ProductId, deficit: i64, priority: i64) -> DeficitEntry {
        DeficitEntry {
            branch_id,
            product_id,
            deficit: Decimal::from(deficit),
            priority,
        }
    }

    fn shipment(branch_id: BranchId, product_id: ProductId, qty: i64) -> Shipment {
        Shipment {
            branch_id,
            product_id,
            shipment_qty: qty,
        }
    }

    #[test]
    fn test_leftover_goes_to_top_ranked_deficient_branches() {
        // 余量 2 件 → 排名前两位各得 1 件
        let reallocator = LeftoverReallocator::new();
        let product = Uuid::new_v4();
        let (a, b, c) = (Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3));

        let mut deficits = BTreeMap::new();
        deficits.insert(
            product,
            vec![
                entry(a, product, 5, 1),
                entry(b, product, 5, 9),
                entry(c, product, 5, 5),
            ],
        );
        let mut leftovers = BTreeMap::new();
        leftovers.insert(product, 2);

        let outcome = reallocator.reallocate(vec![], &leftovers, &deficits);
        let qty_of = |id: BranchId| {
            outcome
                .shipments
                .iter()
                .find(|s| s.branch_id == id)
                .map(|s| s.shipment_qty)
        };
        assert_eq!(qty_of(b), Some(1)); // 优先级 9
        assert_eq!(qty_of(c), Some(1)); // 优先级 5
        assert_eq!(qty_of(a), None);
        assert!(outcome.unallocated.is_empty());
    }

    #[test]
    fn test_addition_merges_into_surviving_row() {
        // 存活行已有 4 件, 余量 +1 → 并入为 5 件, 不新建行
        let reallocator = LeftoverReallocator::new();
        let product = Uuid::new_v4();
        let branch = Uuid::from_u128(1);

        let mut deficits = BTreeMap::new();
        deficits.insert(product, vec![entry(branch, product, 10, 2)]);
        let mut leftovers = BTreeMap::new();
        leftovers.insert(product, 1);

        let outcome =
            reallocator.reallocate(vec![shipment(branch, product, 4)], &leftovers, &deficits);
        assert_eq!(outcome.shipments.len(), 1);
        assert_eq!(outcome.shipments[0].shipment_qty, 5);
    }

    #[test]
    fn test_pruned_branch_with_deficit_stays_eligible() {
        // 资格集来自缺口关系, 刚被整店剔除的门店仍可获得余量件
        let reallocator = LeftoverReallocator::new();
        let product = Uuid::new_v4();
        let pruned = Uuid::from_u128(1);

        let mut deficits = BTreeMap::new();
        deficits.insert(product, vec![entry(pruned, product, 3, 4)]);
        let mut leftovers = BTreeMap::new();
        leftovers.insert(product, 1);

        // 存活行为空（该门店刚被剔除），但它依旧合格
        let outcome = reallocator.reallocate(vec![], &leftovers, &deficits);
        assert_eq!(outcome.shipments.len(), 1);
        assert_eq!(outcome.shipments[0].branch_id, pruned);
        assert_eq!(outcome.shipments[0].shipment_qty, 1);
    }

    #[test]
    fn test_surplus_leftover_reported_not_distributed() {
        // 余量 5 件但只有 2 家合格门店 → 发出 2 件, 报告损失 3 件
        let reallocator = LeftoverReallocator::new();
        let product = Uuid::new_v4();
        let (a, b) = (Uuid::from_u128(1), Uuid::from_u128(2));

        let mut deficits = BTreeMap::new();
        deficits.insert(product, vec![entry(a, product, 5, 1), entry(b, product, 5, 2)]);
        let mut leftovers = BTreeMap::new();
        leftovers.insert(product, 5);

        let outcome = reallocator.reallocate(vec![], &leftovers, &deficits);
        let total: Qty = outcome.shipments.iter().map(|s| s.shipment_qty).sum();
        assert_eq!(total, 2);
        assert_eq!(outcome.unallocated.get(&product), Some(&3));
    }

    #[test]
    fn test_no_eligible_branches_loses_all_leftover() {
        // 商品无缺口门店 → 余量整体损失, 仅计数
        let reallocator = LeftoverReallocator::new();
        let product = Uuid::new_v4();
        let deficits = BTreeMap::new();
        let mut leftovers = BTreeMap::new();
        leftovers.insert(product, 4);

        let outcome = reallocator.reallocate(vec![], &leftovers, &deficits);
        assert!(outcome.shipments.is_empty());
        assert_eq!(outcome.unallocated.get(&product), Some(&4));
    }

    #[test]
    fn test_additions_never_exceed_leftover() {
        // 新增总量恒 ≤ 余量
        let reallocator = LeftoverReallocator::new();
        let product = Uuid::new_v4();
        let entries: Vec<DeficitEntry> = (1..=6u128)
            .map(|i| entry(Uuid::from_u128(i), product, 10, i as i64))
            .collect();
        let mut deficits = BTreeMap::new();
        deficits.insert(product, entries);

        for leftover in [1, 3, 6, 9] {
            let mut leftovers = BTreeMap::new();
            leftovers.insert(product, leftover);
            let outcome = reallocator.reallocate(vec![], &leftovers, &deficits);
            let total: Qty = outcome.shipments.iter().map(|s| s.shipment_qty).sum();
            assert!(total <= leftover);
        }
    }
}
