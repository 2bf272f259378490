// ==========================================
// 零售补货分配系统 - 尾数分配引擎
// ==========================================
// 职责: 把取整后剩下的整件逐件发给排名靠前的门店
// 输入: 单商品首轮分配结果 + 中央仓总库存
// 输出: 发货行 (首轮 + 0/1 尾数加成, 数量为零的行不落地)
// 红线: 每门店尾数加成至多 +1; 总量恒 ≤ 中央仓总库存
// ==========================================

use crate::domain::shipment::Shipment;
use crate::domain::types::Qty;
use crate::engine::proportional::FirstPassAllocation;
use crate::engine::ranking::PriorityRanker;

// ==========================================
// RemainderDistributor - 尾数分配引擎
// ==========================================
pub struct RemainderDistributor {
    // 无状态引擎,不需要注入依赖
}

impl RemainderDistributor {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 单商品尾数分配
    ///
    /// remaining = total_stock - Σ shipped₁（首轮向下取整留下的整件数）。
    /// 门店按 priority 降序、branch_id 升序排名，名次 r ≤ remaining
    /// 的门店各得 +1。尾数加成可使发货量略超缺口（至多 +1），
    /// 与分配规则一致。
    ///
    /// # 参数
    /// - `allocations`: 该商品的首轮分配结果
    /// - `total_stock`: 该商品中央仓总库存
    ///
    /// # 返回
    /// 发货行列表，仅含 shipment_qty > 0 的行
    pub fn distribute(
        &self,
        mut allocations: Vec<FirstPassAllocation>,
        total_stock: Qty,
    ) -> Vec<Shipment> {
        let shipped_total: Qty = allocations.iter().map(|a| a.shipped).sum();
        let remaining = (total_stock - shipped_total).max(0);

        allocations.sort_by(|a, b| {
            PriorityRanker::compare(a.priority, &a.branch_id, b.priority, &b.branch_id)
        });

        let mut shipments = Vec::with_capacity(allocations.len());
        for (rank, allocation) in allocations.into_iter().enumerate() {
            let bonus = if (rank as Qty) < remaining { 1 } else { 0 };
            let qty = allocation.shipped + bonus;
            if qty > 0 {
                shipments.push(Shipment {
                    branch_id: allocation.branch_id,
                    product_id: allocation.product_id,
                    shipment_qty: qty,
                });
            }
        }

        shipments
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RemainderDistributor {
    fn default() -> Self {
        Self::new()
    }
}
