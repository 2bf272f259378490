// ==========================================
// 零售补货分配系统 - 输入快照仓储
// ==========================================
// 职责: 在同一时间点读取四张输入关系, 构建只读快照
// 红线: 仓储不做分配逻辑; 解析失败即报错, 不静默跳行
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::branch::BranchProfile;
use crate::domain::need::Need;
use crate::domain::snapshot::DistributionSnapshot;
use crate::domain::stock::{BranchStock, CentralStock};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

// ==========================================
// SnapshotRepository - 输入快照仓储
// ==========================================
pub struct SnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SnapshotRepository {
    /// 创建新的 SnapshotRepository 实例
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

    /// 读取四张输入关系, 构建一次运行的快照
    pub fn load(&self) -> RepositoryResult<DistributionSnapshot> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let snapshot = DistributionSnapshot {
            branch_stock: Self::load_branch_stock(&conn)?,
            central_stock: Self::load_central_stock(&conn)?,
            needs: Self::load_needs(&conn)?,
            profiles: Self::load_profiles(&conn)?,
        };

        debug!(
            branch_stock_rows = snapshot.branch_stock.len(),
            central_stock_rows = snapshot.central_stock.len(),
            need_rows = snapshot.needs.len(),
            profile_rows = snapshot.profiles.len(),
            "输入快照加载完成"
        );
        Ok(snapshot)
    }

    // ==========================================
    // 单表加载
    // ==========================================

    fn load_branch_stock(conn: &Connection) -> RepositoryResult<Vec<BranchStock>> {
        let mut stmt = conn.prepare(
            "SELECT branch_id, product_id, stock, reserve, transit FROM branch_stock",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (branch_id, product_id, stock, reserve, transit) = row?;
            result.push(BranchStock {
                branch_id: parse_uuid("branch_stock.branch_id", &branch_id)?,
                product_id: parse_uuid("branch_stock.product_id", &product_id)?,
                stock: parse_decimal("branch_stock.stock", &stock)?,
                reserve: parse_decimal("branch_stock.reserve", &reserve)?,
                transit: parse_decimal("branch_stock.transit", &transit)?,
            });
        }
        Ok(result)
    }

    fn load_central_stock(conn: &Connection) -> RepositoryResult<Vec<CentralStock>> {
        let mut stmt = conn.prepare("SELECT product_id, location_id, stock FROM central_stock")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (product_id, location_id, stock) = row?;
            result.push(CentralStock {
                product_id: parse_uuid("central_stock.product_id", &product_id)?,
                location_id: parse_uuid("central_stock.location_id", &location_id)?,
                stock: parse_decimal("central_stock.stock", &stock)?,
            });
        }
        Ok(result)
    }

    fn load_needs(conn: &Connection) -> RepositoryResult<Vec<Need>> {
        let mut stmt = conn.prepare("SELECT branch_id, product_id, need FROM needs")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (branch_id, product_id, need) = row?;
            result.push(Need {
                branch_id: parse_uuid("needs.branch_id", &branch_id)?,
                product_id: parse_uuid("needs.product_id", &product_id)?,
                need,
            });
        }
        Ok(result)
    }

    fn load_profiles(conn: &Connection) -> RepositoryResult<Vec<BranchProfile>> {
        let mut stmt =
            conn.prepare("SELECT branch_id, priority, min_shipment FROM branch_profiles")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (branch_id, priority, min_shipment) = row?;
            result.push(BranchProfile {
                branch_id: parse_uuid("branch_profiles.branch_id", &branch_id)?,
                priority,
                min_shipment,
            });
        }
        Ok(result)
    }
}

// ==========================================
// 字段解析辅助
// ==========================================

fn parse_uuid(field: &str, value: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| RepositoryError::FieldValueError {
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
