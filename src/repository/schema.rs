// ==========================================
// 零售补货分配系统 - 数据库 Schema
// ==========================================
// 职责: 输入/输出关系的建表
// 约定: 标识列存 UUID 文本; 小数库存量存十进制文本,
//       由仓储层用 Decimal 精确解析 (不经过浮点)
// ==========================================

use crate::repository::error::RepositoryResult;
use rusqlite::Connection;

/// 全量重建五张表（先删后建）
///
/// 输入关系每轮导入前重建；shipments 由 ShipmentRepository
/// 在每轮运行时单独替换。
pub fn create_tables(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS central_stock;
        DROP TABLE IF EXISTS branch_stock;
        DROP TABLE IF EXISTS branch_profiles;
        DROP TABLE IF EXISTS needs;
        DROP TABLE IF EXISTS shipments;

        CREATE TABLE central_stock (
            product_id  TEXT NOT NULL,
            location_id TEXT NOT NULL,
            stock       TEXT NOT NULL,
            reserve     TEXT NOT NULL,
            transit     TEXT NOT NULL,
            PRIMARY KEY (product_id, location_id)
        );

        CREATE TABLE branch_stock (
            product_id TEXT NOT NULL,
            branch_id  TEXT NOT NULL,
            stock      TEXT NOT NULL,
            reserve    TEXT NOT NULL,
            transit    TEXT NOT NULL,
            PRIMARY KEY (product_id, branch_id)
        );

        CREATE TABLE branch_profiles (
            branch_id    TEXT    PRIMARY KEY,
            priority     INTEGER NOT NULL,
            min_shipment INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE needs (
            branch_id  TEXT    NOT NULL,
            product_id TEXT    NOT NULL,
            need       INTEGER NOT NULL,
            PRIMARY KEY (branch_id, product_id)
        );

        CREATE TABLE shipments (
            branch_id    TEXT    NOT NULL,
            product_id   TEXT    NOT NULL,
            shipment_qty INTEGER NOT NULL
        );
        "#,
    )?;
    Ok(())
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_connection;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = open_in_memory_connection().unwrap();
        create_tables(&conn).unwrap();
        // 先删后建, 重复执行不报错
        create_tables(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('central_stock','branch_stock','branch_profiles','needs','shipments')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 5);
    }
}
