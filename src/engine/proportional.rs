// ==========================================
// 零售补货分配系统 - 加权比例分配引擎
// ==========================================
// 职责: 单商品第一轮整数分配
// 输入: 该商品的缺口关系 + 中央仓总库存
// 输出: 每门店的首轮发货量 (向下取整, 以缺口封顶)
// 红线: 首轮发货量 ≤ 缺口; 首轮总量 ≤ 中央仓总库存
// ==========================================

use crate::domain::types::{BranchId, ProductId, Qty};
use crate::engine::deficit::DeficitEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 首轮分配结果行
///
/// 缺口与优先级随行携带，供后续尾数分配/余量再分配排名使用。
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPassAllocation {
    pub branch_id: BranchId,
    pub product_id: ProductId,
    pub deficit: Decimal,
    pub priority: Qty,
    /// 首轮发货量 shipped₁
    pub shipped: Qty,
}

// ==========================================
// ProportionalAllocator - 加权比例分配引擎
// ==========================================
pub struct ProportionalAllocator {
    // 无状态引擎,不需要注入依赖
}

impl ProportionalAllocator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 单商品首轮分配
    ///
    /// 规则：
    /// 1) weight = deficit × priority
    /// 2) total_weight = Σ weight；为零（无缺口门店）则零份额，不是错误
    /// 3) raw_share = total_stock × weight / total_weight
    /// 4) shipped₁ = min(floor(raw_share), floor(deficit))
    ///
    /// 除法在 Decimal（28 位十进制有效数字）中进行，现实量级下
    /// 足以保证向下取整不被精度误差跨过整数边界。
    /// 缺口可为小数而发货以整件计，故封顶取 floor(deficit)，
    /// 严格保持 shipped₁ ≤ deficit。
    ///
    /// # 参数
    /// - `entries`: 该商品的缺口关系（均为 deficit > 0）
    /// - `total_stock`: 该商品中央仓总库存（整件）
    pub fn allocate(&self, entries: &[DeficitEntry], total_stock: Qty) -> Vec<FirstPassAllocation> {
        let total_weight: Decimal = entries
            .iter()
            .map(|e| e.deficit * Decimal::from(e.priority))
            .sum();

        let mut allocations = Vec::with_capacity(entries.len());
        for entry in entries {
            let weight = entry.deficit * Decimal::from(entry.priority);
            let raw_share = if total_weight.is_zero() || total_stock <= 0 {
                // 零分母按零份额处理，绝不视为故障
                Decimal::ZERO
            } else {
                Decimal::from(total_stock) * weight / total_weight
            };

            let floor_share = raw_share.floor().to_i64().unwrap_or(Qty::MAX);
            let deficit_cap = entry.deficit.floor().to_i64().unwrap_or(Qty::MAX);
            let shipped = floor_share.min(deficit_cap).max(0);

            allocations.push(FirstPassAllocation {
                branch_id: entry.branch_id,
                product_id: entry.product_id,
                deficit: entry.deficit,
                priority: entry.priority,
                shipped,
            });
        }

        allocations
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ProportionalAllocator {
    fn default() -> Self {
        Self::new()
    }
}
