// ==========================================
// 零售补货分配系统 - 引擎编排器
// ==========================================
// 用途: 协调五大分配引擎的执行顺序
// 流程: 校验 → 缺口 → (比例分配 → 尾数分配) 按商品
//       → 起送量剔除 (跨商品) → 余量再分配 按商品
// 红线: 商品分区内各阶段严格串行; 剔除依赖整单汇总,
//       必须等所有商品完成前两轮
// ==========================================

use crate::domain::shipment::Shipment;
use crate::domain::snapshot::DistributionSnapshot;
use crate::domain::types::{ProductId, Qty};
use crate::engine::deficit::DeficitCalculator;
use crate::engine::error::EngineResult;
use crate::engine::leftover::LeftoverReallocator;
use crate::engine::proportional::ProportionalAllocator;
use crate::engine::pruning::ThresholdPruner;
use crate::engine::remainder::RemainderDistributor;
use crate::engine::validation::SnapshotValidator;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

// ==========================================
// DistributionResult - 分配结果
// ==========================================

/// 运行统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionStats {
    /// 存在缺口的商品数
    pub products_with_deficit: usize,
    /// 最终发货行数
    pub shipment_rows: usize,
    /// 最终发货总件数
    pub units_shipped: Qty,
    /// 被整店剔除的门店数
    pub branches_pruned: usize,
    /// 无处可分的余量总件数
    pub units_unallocated: Qty,
}

/// 一次分配运行的完整输出
#[derive(Debug, Clone)]
pub struct DistributionResult {
    /// 最终发货行，按 (product_id, branch_id) 排序，
    /// 相同输入必然得到逐字节相同的输出
    pub shipments: Vec<Shipment>,
    /// 无处可分的余量（按商品计），可观测但不致失败
    pub unallocated_leftover: BTreeMap<ProductId, Qty>,
    /// 运行统计
    pub stats: DistributionStats,
}

// ==========================================
// DistributionOrchestrator - 引擎编排器
// ==========================================

pub struct DistributionOrchestrator {
    validator: SnapshotValidator,
    deficit: DeficitCalculator,
    allocator: ProportionalAllocator,
    remainder: RemainderDistributor,
    pruner: ThresholdPruner,
    reallocator: LeftoverReallocator,
}

impl DistributionOrchestrator {
    /// 创建新的编排器实例
    pub fn new() -> Self {
        Self {
            validator: SnapshotValidator::new(),
            deficit: DeficitCalculator::new(),
            allocator: ProportionalAllocator::new(),
            remainder: RemainderDistributor::new(),
            pruner: ThresholdPruner::new(),
            reallocator: LeftoverReallocator::new(),
        }
    }

    /// 执行完整分配流程
    ///
    /// 纯批处理：快照只读，输出按值返回；给定相同输入与固定的
    /// 排序兜底键，重复运行产生逐字节相同的结果。
    ///
    /// # 参数
    /// - `snapshot`: 一次运行的只读输入快照
    ///
    /// # 返回
    /// 分配结果；输入违反数据契约时返回 `EngineError::Validation`
    #[instrument(skip(self, snapshot), fields(
        branch_stock_rows = snapshot.branch_stock.len(),
        central_stock_rows = snapshot.central_stock.len(),
        need_rows = snapshot.needs.len(),
        profile_rows = snapshot.profiles.len(),
    ))]
    pub fn run(&self, snapshot: &DistributionSnapshot) -> EngineResult<DistributionResult> {
        info!("开始执行分配流程");

        // ==========================================
        // 步骤1: 输入校验
        // ==========================================
        debug!("步骤1: 校验输入快照");
        self.validator.validate(snapshot)?;

        // ==========================================
        // 步骤2: 缺口计算
        // ==========================================
        debug!("步骤2: 计算缺口关系");
        let deficits = self.deficit.compute(snapshot);
        let totals = snapshot.total_central_stock();
        info!(products_with_deficit = deficits.len(), "缺口计算完成");

        // ==========================================
        // 步骤3: 比例分配 + 尾数分配 (按商品)
        // ==========================================
        debug!("步骤3: 按商品执行比例分配与尾数分配");
        let mut first_round: Vec<Shipment> = Vec::new();
        for (product_id, entries) in &deficits {
            // 中央仓无该商品库存行时不参与分配
            let total_stock = match totals.get(product_id) {
                Some(total) => *total,
                None => continue,
            };

            let allocations = self.allocator.allocate(entries, total_stock);
            let mut shipments = self.remainder.distribute(allocations, total_stock);
            debug!(
                product_id = %product_id,
                total_stock,
                branches = entries.len(),
                rows = shipments.len(),
                "商品分配完成"
            );
            first_round.append(&mut shipments);
        }

        // ==========================================
        // 步骤4: 起送量剔除 (跨商品)
        // ==========================================
        debug!("步骤4: 起送量剔除");
        let profiles = snapshot.profile_index();
        let prune_outcome = self.pruner.prune(first_round, &profiles);
        info!(
            branches_pruned = prune_outcome.pruned_branches.len(),
            products_with_leftover = prune_outcome.leftovers.len(),
            "起送量剔除完成"
        );

        // ==========================================
        // 步骤5: 余量再分配 (按商品)
        // ==========================================
        debug!("步骤5: 余量再分配");
        let branches_pruned = prune_outcome.pruned_branches.len();
        let realloc_outcome =
            self.reallocator
                .reallocate(prune_outcome.surviving, &prune_outcome.leftovers, &deficits);

        let mut shipments = realloc_outcome.shipments;
        // 输出全序: (product_id, branch_id)
        shipments.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then_with(|| a.branch_id.cmp(&b.branch_id))
        });

        let units_unallocated: Qty = realloc_outcome.unallocated.values().sum();
        if units_unallocated > 0 {
            // 合格门店不足导致的余量损失是预期行为, 只上报不中止
            warn!(
                units_unallocated,
                products = realloc_outcome.unallocated.len(),
                "部分余量无合格门店可分, 本轮不再发出"
            );
        }

        let stats = DistributionStats {
            products_with_deficit: deficits.len(),
            shipment_rows: shipments.len(),
            units_shipped: shipments.iter().map(|s| s.shipment_qty).sum(),
            branches_pruned,
            units_unallocated,
        };
        info!(
            shipment_rows = stats.shipment_rows,
            units_shipped = stats.units_shipped,
            branches_pruned = stats.branches_pruned,
            "分配流程执行完成"
        );

        Ok(DistributionResult {
            shipments,
            unallocated_leftover: realloc_outcome.unallocated,
            stats,
        })
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DistributionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
