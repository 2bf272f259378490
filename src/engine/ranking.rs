// ==========================================
// 零售补货分配系统 - 门店排名比较器
// ==========================================
// 职责: 尾数分配与余量再分配共用的全序
// 红线: 排序必须是全序且可复现; 同权重门店以
//       branch_id 升序兜底, 消除重跑间的不确定性
// ==========================================

use crate::domain::types::{BranchId, Qty};
use std::cmp::Ordering;

// ==========================================
// PriorityRanker - 门店排名比较器
// ==========================================
pub struct PriorityRanker {
    // 无状态引擎,不需要注入依赖
}

impl PriorityRanker {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 比较两个门店的分配名次
    ///
    /// 排序键：
    /// 1) priority 降序（权重大者先拿整件）
    /// 2) branch_id 升序（确定性兜底）
    ///
    /// # 返回
    /// Ordering::Less 表示 a 名次在前
    pub fn compare(
        priority_a: Qty,
        branch_a: &BranchId,
        priority_b: Qty,
        branch_b: &BranchId,
    ) -> Ordering {
        match priority_b.cmp(&priority_a) {
            Ordering::Equal => branch_a.cmp(branch_b),
            other => other,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PriorityRanker {
    fn default() -> Self {
        Self::new()
    }
}
