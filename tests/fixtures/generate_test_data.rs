// ==========================================
// 零售补货分配系统 - 测试数据生成器
// ==========================================
// 用途: 重建数据库并灌入一套演示数据集
// 来源: 优先导入配置指定的 CSV; 文件缺失时合成随机库存
// 用法: generate_test_data [config.json]
// ==========================================

use anyhow::{Context, Result};
use branch_distribution::config::AppConfig;
use branch_distribution::db::open_sqlite_connection;
use branch_distribution::domain::{BranchProfile, Need};
use branch_distribution::importer::{NeedGenerator, NeedGeneratorConfig, StockCsvImporter};
use branch_distribution::repository::schema::create_tables;
use branch_distribution::repository::SnapshotRepository;
use branch_distribution::{logging, BranchId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

fn main() -> Result<()> {
    logging::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = AppConfig::load_or_default(Path::new(&config_path))?;

    let conn = open_sqlite_connection(&config.database.path)
        .with_context(|| format!("无法打开数据库: {}", config.database.path))?;
    create_tables(&conn).context("重建数据库表失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let mut rng = match config.generator.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // ==========================================
    // 步骤1: 库存数据 (CSV 导入或随机合成)
    // ==========================================
    let central_csv = Path::new(&config.csv_files.central_stock_csv);
    let branch_csv = Path::new(&config.csv_files.branch_stock_csv);
    if central_csv.exists() && branch_csv.exists() {
        let importer = StockCsvImporter::from_connection(conn.clone())?;
        importer.import_central_stock(central_csv)?;
        importer.import_branch_stock(branch_csv)?;
    } else {
        info!("未找到库存 CSV, 使用随机合成库存");
        synthesize_stock(&conn, &config, &mut rng)?;
    }

    // ==========================================
    // 步骤2: 门店画像与需求关系
    // ==========================================
    let snapshot = SnapshotRepository::from_connection(conn.clone())?.load()?;
    let branches: Vec<BranchId> = snapshot
        .branch_stock
        .iter()
        .map(|row| row.branch_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let generator = NeedGenerator::new(NeedGeneratorConfig {
        coverage_days: config.generator.coverage_days,
        priority_max: config.generator.priority_max,
        min_shipment_max: config.generator.min_shipment_max,
    });
    let profiles = generator.generate_profiles(&branches, &mut rng);
    let needs = generator.generate_needs(&snapshot.branch_stock, &profiles, &mut rng);
    write_profiles_and_needs(&conn, &profiles, &needs)?;

    info!(
        branches = branches.len(),
        branch_stock_rows = snapshot.branch_stock.len(),
        central_stock_rows = snapshot.central_stock.len(),
        need_rows = needs.len(),
        "测试数据生成完成"
    );
    Ok(())
}

/// 合成随机库存: 每个商品一条中央仓行 + 每家门店一行门店库存
fn synthesize_stock(
    conn: &Arc<Mutex<Connection>>,
    config: &AppConfig,
    rng: &mut StdRng,
) -> Result<()> {
    let products: Vec<Uuid> = (0..config.generator.products)
        .map(|_| Uuid::new_v4())
        .collect();
    let branches: Vec<Uuid> = (0..config.generator.branches)
        .map(|_| Uuid::new_v4())
        .collect();
    let location = Uuid::new_v4();

    let mut guard = conn
        .lock()
        .map_err(|e| anyhow::anyhow!("连接锁中毒: {}", e))?;
    let tx = guard.transaction()?;
    {
        let mut central = tx.prepare(
            "INSERT INTO central_stock(product_id, location_id, stock, reserve, transit)
             VALUES (?1, ?2, ?3, '0', '0')",
        )?;
        let mut branch_stock = tx.prepare(
            "INSERT INTO branch_stock(product_id, branch_id, stock, reserve, transit)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for product in &products {
            central.execute(params![
                product.to_string(),
                location.to_string(),
                rng.gen_range(0..=500i64).to_string(),
            ])?;
            for branch in &branches {
                branch_stock.execute(params![
                    product.to_string(),
                    branch.to_string(),
                    rng.gen_range(0..=50i64).to_string(),
                    rng.gen_range(0..=10i64).to_string(),
                    rng.gen_range(0..=10i64).to_string(),
                ])?;
            }
        }
    }
    tx.commit()?;
    Ok(())
}

fn write_profiles_and_needs(
    conn: &Arc<Mutex<Connection>>,
    profiles: &[BranchProfile],
    needs: &[Need],
) -> Result<()> {
    let mut guard = conn
        .lock()
        .map_err(|e| anyhow::anyhow!("连接锁中毒: {}", e))?;
    let tx = guard.transaction()?;
    {
        let mut profile_stmt = tx.prepare(
            "INSERT INTO branch_profiles(branch_id, priority, min_shipment) VALUES (?1, ?2, ?3)",
        )?;
        for profile in profiles {
            profile_stmt.execute(params![
                profile.branch_id.to_string(),
                profile.priority,
                profile.min_shipment,
            ])?;
        }
        let mut need_stmt =
            tx.prepare("INSERT INTO needs(branch_id, product_id, need) VALUES (?1, ?2, ?3)")?;
        for need in needs {
            need_stmt.execute(params![
                need.branch_id.to_string(),
                need.product_id.to_string(),
                need.need,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}
