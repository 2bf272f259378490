// ==========================================
// 零售补货分配系统 - 主程序入口
// ==========================================
// 流程: 加载配置 → 读取输入快照 → 执行分配 → 发布发货计划
// 用法: branch-distribution [config.json]
// ==========================================

use anyhow::Context;
use branch_distribution::config::AppConfig;
use branch_distribution::db::open_sqlite_connection;
use branch_distribution::engine::DistributionOrchestrator;
use branch_distribution::repository::{ShipmentRepository, SnapshotRepository};
use branch_distribution::{logging, APP_NAME, VERSION};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    logging::init();
    info!("{} v{} 启动", APP_NAME, VERSION);

    // ==========================================
    // 步骤1: 加载配置
    // ==========================================
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = AppConfig::load_or_default(Path::new(&config_path))?;
    info!(config = %config_path, db = %config.database.path, "配置加载完成");

    // ==========================================
    // 步骤2: 读取输入快照
    // ==========================================
    let conn = open_sqlite_connection(&config.database.path)
        .with_context(|| format!("无法打开数据库: {}", config.database.path))?;
    let conn = Arc::new(Mutex::new(conn));

    let snapshot_repo = SnapshotRepository::from_connection(conn.clone())?;
    let snapshot = snapshot_repo.load().context("读取输入快照失败")?;

    // ==========================================
    // 步骤3: 执行分配流程
    // ==========================================
    let orchestrator = DistributionOrchestrator::new();
    let result = orchestrator.run(&snapshot).context("分配流程执行失败")?;

    // ==========================================
    // 步骤4: 发布发货计划
    // ==========================================
    let shipment_repo = ShipmentRepository::from_connection(conn)?;
    shipment_repo
        .replace_all(&result.shipments)
        .context("发货计划写入失败")?;

    info!(
        products_with_deficit = result.stats.products_with_deficit,
        shipment_rows = result.stats.shipment_rows,
        units_shipped = result.stats.units_shipped,
        branches_pruned = result.stats.branches_pruned,
        "本轮补货分配完成"
    );
    if result.stats.units_unallocated > 0 {
        warn!(
            units_unallocated = result.stats.units_unallocated,
            "存在无处可分的余量, 详见运行日志"
        );
    }

    Ok(())
}
