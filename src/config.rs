// ==========================================
// 零售补货分配系统 - 运行配置
// ==========================================
// 职责: 配置加载与默认值管理
// 存储: JSON 配置文件 (数据库路径 / CSV 路径 / 生成器参数)
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 数据库文件路径
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "distribution.db".to_string(),
        }
    }
}

/// CSV 数据文件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFilesConfig {
    /// 中央仓库存 CSV
    pub central_stock_csv: String,
    /// 门店库存 CSV
    pub branch_stock_csv: String,
}

impl Default for CsvFilesConfig {
    fn default() -> Self {
        Self {
            central_stock_csv: "central_stock.csv".to_string(),
            branch_stock_csv: "branch_stock.csv".to_string(),
        }
    }
}

/// 合成数据生成器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// 补货覆盖天数
    pub coverage_days: i64,
    /// 优先级上限
    pub priority_max: i64,
    /// 起送量上限
    pub min_shipment_max: i64,
    /// 随机种子（缺省时使用系统熵）
    pub seed: Option<u64>,
    /// 合成门店数（无 CSV 时）
    pub branches: usize,
    /// 合成商品数（无 CSV 时）
    pub products: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            coverage_days: 7,
            priority_max: 5,
            min_shipment_max: 20,
            seed: None,
            branches: 20,
            products: 50,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub csv_files: CsvFilesConfig,
    pub generator: GeneratorSettings,
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))
    }

    /// 加载配置，文件不存在时回退默认值
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
