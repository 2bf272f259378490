// ==========================================
// 零售补货分配系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
///
/// 负数库存/需求、非正优先级等属于数据契约违约，
/// 引擎直接拒绝本轮运行，不做钳位（钳位会掩盖上游数据质量问题）。
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("数据校验失败 (field={field}): {message}")]
    Validation { field: String, message: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
