// ==========================================
// 零售补货分配系统 - 引擎层
// ==========================================
// 职责: 实现分配规则引擎,纯内存计算,不拼 SQL
// 红线: 引擎不做 I/O; 输入快照只读, 输出按值返回
// ==========================================

pub mod deficit;
pub mod error;
pub mod leftover;
pub mod orchestrator;
pub mod proportional;
pub mod pruning;
pub mod ranking;
pub mod remainder;
pub mod validation;

// 重导出核心引擎
pub use deficit::{DeficitCalculator, DeficitEntry};
pub use error::{EngineError, EngineResult};
pub use leftover::{LeftoverReallocator, ReallocationOutcome};
pub use orchestrator::{DistributionOrchestrator, DistributionResult, DistributionStats};
pub use proportional::{FirstPassAllocation, ProportionalAllocator};
pub use pruning::{PruneOutcome, ThresholdPruner};
pub use ranking::PriorityRanker;
pub use remainder::RemainderDistributor;
pub use validation::SnapshotValidator;
