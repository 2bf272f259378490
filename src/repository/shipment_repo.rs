// ==========================================
// 零售补货分配系统 - 发货计划仓储
// ==========================================
// 职责: 每轮运行整体替换 shipments 关系
// 红线: 替换不是合并; 先删后建与写入在同一事务内,
//       保证输出关系的原子发布
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::shipment::Shipment;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::info;

// ==========================================
// ShipmentRepository - 发货计划仓储
// ==========================================
pub struct ShipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ShipmentRepository {
    /// 创建新的 ShipmentRepository 实例
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

    /// 从已有连接创建（与其他仓储共享同一连接）
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

    /// 用本轮结果整体替换 shipments 关系
    ///
    /// 上一轮结果被丢弃而非合并。重建与写入在同一事务中提交。
    ///
    /// # 返回
    /// 写入的行数
    pub fn replace_all(&self, shipments: &[Shipment]) -> RepositoryResult<usize> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute_batch(
            r#"
            DROP TABLE IF EXISTS shipments;
            CREATE TABLE shipments (
                branch_id    TEXT    NOT NULL,
                product_id   TEXT    NOT NULL,
                shipment_qty INTEGER NOT NULL
            );
            "#,
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO shipments(branch_id, product_id, shipment_qty) VALUES (?1, ?2, ?3)",
            )?;
            for shipment in shipments {
                stmt.execute(params![
                    shipment.branch_id.to_string(),
                    shipment.product_id.to_string(),
                    shipment.shipment_qty,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(rows = shipments.len(), "发货计划已写入 shipments 表");
        Ok(shipments.len())
    }

    /// 读取全部发货行（按 (product_id, branch_id) 排序）
    pub fn load_all(&self) -> RepositoryResult<Vec<Shipment>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut stmt = conn.prepare(
            "SELECT branch_id, product_id, shipment_qty FROM shipments
             ORDER BY product_id, branch_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (branch_id, product_id, shipment_qty) = row?;
            result.push(Shipment {
                branch_id: parse_uuid("shipments.branch_id", &branch_id)?,
                product_id: parse_uuid("shipments.product_id", &product_id)?,
                shipment_qty,
            });
        }
        Ok(result)
    }
}

fn parse_uuid(field: &str, value: &str) -> RepositoryResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value).map_err(|e| RepositoryError::FieldValueError {
        field: field.to_string(),
        message: format!("非法 UUID '{}': {}", value, e),
    })
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_connection;
    use crate::repository::schema::create_tables;
    use uuid::Uuid;

    fn shipment(qty: i64) -> Shipment {
        Shipment {
            branch_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            shipment_qty: qty,
        }
    }

    #[test]
    fn test_replace_all_discards_previous_run() {
        let conn = open_in_memory_connection().unwrap();
        create_tables(&conn).unwrap();
        let repo = ShipmentRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap();

        repo.replace_all(&[shipment(3), shipment(5)]).unwrap();
        assert_eq!(repo.load_all().unwrap().len(), 2);

        // 第二轮整体替换, 不与上一轮合并
        let only = shipment(7);
        repo.replace_all(&[only.clone()]).unwrap();
        let rows = repo.load_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], only);
    }

    #[test]
    fn test_replace_all_with_empty_result() {
        let conn = open_in_memory_connection().unwrap();
        create_tables(&conn).unwrap();
        let repo = ShipmentRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap();

        repo.replace_all(&[shipment(1)]).unwrap();
        let written = repo.replace_all(&[]).unwrap();
        assert_eq!(written, 0);
        assert!(repo.load_all().unwrap().is_empty());
    }
}
