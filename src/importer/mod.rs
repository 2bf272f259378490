// ==========================================
// 零售补货分配系统 - 导入层
// ==========================================
// 职责: 外部 CSV 批量导入 + 合成数据生成
// 红线: 导入层不做分配逻辑; 只负责把输入关系喂进数据库
// ==========================================

pub mod need_generator;
pub mod stock_csv;

// 重导出
pub use need_generator::{NeedGenerator, NeedGeneratorConfig};
pub use stock_csv::StockCsvImporter;
