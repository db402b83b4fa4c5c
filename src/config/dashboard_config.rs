// ==========================================
// 过期库存管理看板 - 看板配置
// ==========================================
// 职责: 配置加载、默认值、校验
// 优先级: 命令行参数 > 配置文件 (JSON) > 默认值
// ==========================================

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 支持的界面语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

// ==========================================
// 配置键 / 环境变量
// ==========================================
pub mod config_keys {
    // 配置文件路径
    pub const ENV_CONFIG_PATH: &str = "EXPIRY_DASHBOARD_CONFIG";

    // 数据文件路径
    pub const ENV_DATA_PATH: &str = "EXPIRY_DASHBOARD_DATA_PATH";

    // 默认数据文件名
    pub const DEFAULT_DATA_FILE: &str = "perishables_analysis.csv";

    // 用户数据目录下的子目录
    pub const DATA_DIR_NAME: &str = "expiry-dashboard";
}

// ==========================================
// DashboardConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 数据文件路径（None → 默认路径）
    pub data_path: Option<PathBuf>,

    /// 标记真值（Expired / Expires next month）
    pub true_label: String,

    /// 问题物料榜单条数
    pub top_n: usize,

    /// 界面语言
    pub locale: String,

    /// 货币符号
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            true_label: "Y".to_string(),
            top_n: 10,
            locale: "en".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl DashboardConfig {
    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&raw)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))?;
        config.validate()?;
        tracing::debug!("已加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 加载配置
    ///
    /// # 顺序
    /// 1. 显式传入的路径
    /// 2. 环境变量 EXPIRY_DASHBOARD_CONFIG
    /// 3. 默认值
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        if let Ok(path) = std::env::var(config_keys::ENV_CONFIG_PATH) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_file(Path::new(trimmed));
            }
        }

        Ok(Self::default())
    }

    /// 校验配置值
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.true_label.trim().is_empty() {
            bail!("true_label 不能为空");
        }
        if self.top_n == 0 {
            bail!("top_n 必须大于 0");
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            bail!(
                "不支持的语言: {}（可选: {}）",
                self.locale,
                SUPPORTED_LOCALES.join(", ")
            );
        }
        Ok(())
    }

    /// 实际使用的数据文件路径
    pub fn resolve_data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(get_default_data_path)
    }
}

/// 默认数据文件路径
///
/// 1. 环境变量 EXPIRY_DASHBOARD_DATA_PATH
/// 2. 当前目录下的 perishables_analysis.csv（存在时）
/// 3. 用户数据目录/expiry-dashboard/perishables_analysis.csv
pub fn get_default_data_path() -> PathBuf {
    if let Ok(path) = std::env::var(config_keys::ENV_DATA_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    let local = PathBuf::from(config_keys::DEFAULT_DATA_FILE);
    if local.exists() {
        return local;
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir
            .join(config_keys::DATA_DIR_NAME)
            .join(config_keys::DEFAULT_DATA_FILE),
        None => local,
    }
}
