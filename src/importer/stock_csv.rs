// ==========================================
// 零售补货分配系统 - 库存 CSV 导入
// ==========================================
// 职责: 把中央仓/门店库存 CSV 批量装载进数据库
// 格式: 表头 product_id, branch_id, stock, reserve, transit
//       (中央仓文件的 branch_id 列即仓点标识)
// 红线: 字段解析失败即整体失败, 不静默跳行;
//       单文件导入在同一事务内提交
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// CSV 行结构（两类库存文件共用同一列布局）
#[derive(Debug, Deserialize)]
struct StockCsvRecord {
    product_id: String,
    branch_id: String,
    stock: String,
    reserve: String,
    transit: String,
}

const INSERT_CENTRAL: &str = "INSERT INTO central_stock(product_id, location_id, stock, reserve, transit) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_BRANCH: &str = "INSERT INTO branch_stock(product_id, branch_id, stock, reserve, transit) VALUES (?1, ?2, ?3, ?4, ?5)";

// ==========================================
// StockCsvImporter - 库存 CSV 导入器
// ==========================================
pub struct StockCsvImporter {
    conn: Arc<Mutex<Connection>>,
}

impl StockCsvImporter {
    /// 创建新的 StockCsvImporter 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)
                .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        }
        Ok(Self { conn })
    }

    /// 导入中央仓库存 CSV
    pub fn import_central_stock(&self, csv_path: &Path) -> RepositoryResult<usize> {
        let rows = self.import_file(csv_path, INSERT_CENTRAL)?;
        info!(rows, path = %csv_path.display(), "中央仓库存导入完成");
        Ok(rows)
    }

    /// 导入门店库存 CSV
    pub fn import_branch_stock(&self, csv_path: &Path) -> RepositoryResult<usize> {
        let rows = self.import_file(csv_path, INSERT_BRANCH)?;
        info!(rows, path = %csv_path.display(), "门店库存导入完成");
        Ok(rows)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn import_file(&self, csv_path: &Path, insert_sql: &str) -> RepositoryResult<usize> {
        let mut reader = csv::Reader::from_path(csv_path).map_err(|e| {
            RepositoryError::ImportError(format!("无法打开 CSV {}: {}", csv_path.display(), e))
        })?;

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut rows = 0usize;
        {
            let mut stmt = tx.prepare(insert_sql)?;
            for (line, record) in reader.deserialize::<StockCsvRecord>().enumerate() {
                let record = record.map_err(|e| {
                    RepositoryError::ImportError(format!("CSV 第 {} 行解析失败: {}", line + 2, e))
                })?;

                // 解析即校验: 写入标准化文本, 杜绝脏数据入库
                let product_id = parse_uuid("product_id", &record.product_id)?;
                let holder_id = parse_uuid("branch_id", &record.branch_id)?;
                let stock = parse_decimal("stock", &record.stock)?;
                let reserve = parse_decimal("reserve", &record.reserve)?;
                let transit = parse_decimal("transit", &record.transit)?;

                stmt.execute(params![
                    product_id.to_string(),
                    holder_id.to_string(),
                    stock.to_string(),
                    reserve.to_string(),
                    transit.to_string(),
                ])?;
                rows += 1;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(rows)
    }
}

fn parse_uuid(field: &str, value: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|e| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("非法 UUID '{}': {}", value, e),
    })
}

fn parse_decimal(field: &str, value: &str) -> RepositoryResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("非法十进制数 '{}': {}", value, e),
    })
}
