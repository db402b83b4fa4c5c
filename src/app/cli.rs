// ==========================================
// 过期库存管理看板 - 命令行参数
// ==========================================
// 职责: 解析参数，覆盖配置，生成过滤条件
// 未指定的过滤维度取全量可选值；传入空字符串（如 --warehouse ''）表示空选择
// ==========================================

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::domain::{FilterOptions, FilterSelection};

#[derive(Debug, Parser)]
#[command(name = "expiry-dashboard")]
#[command(about = "Expired inventory dashboard for perishable stock")]
#[command(version)]
pub struct Cli {
    /// Path to the inventory file (.csv, .xlsx, .xls)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Warehouse IDs to include (repeatable; default: all; '' selects none)
    #[arg(short, long = "warehouse")]
    pub warehouses: Vec<String>,

    /// Superclasses to include (repeatable; default: all; '' selects none)
    #[arg(short, long = "superclass")]
    pub superclasses: Vec<String>,

    /// Minimum months since received (inclusive)
    #[arg(long)]
    pub months_min: Option<f64>,

    /// Maximum months since received (inclusive)
    #[arg(long)]
    pub months_max: Option<f64>,

    /// Expired labels to include (repeatable; default: all; '' selects none)
    #[arg(long = "expired")]
    pub expired: Vec<String>,

    /// Expires-next-month labels to include (repeatable; default: all; '' selects none)
    #[arg(long = "expires-next-month")]
    pub expires_next_month: Vec<String>,

    /// Number of problematic items to list
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Output locale (en, zh-CN)
    #[arg(long)]
    pub locale: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Print the available filter values and exit
    #[arg(long)]
    pub list_options: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    pub fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data_path = Some(data.clone());
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(locale) = &self.locale {
            config.locale = locale.clone();
        }
    }

    /// 生成过滤条件（未指定的维度全选）
    pub fn selection(&self, options: &FilterOptions) -> FilterSelection {
        let mut selection = FilterSelection::select_all(options);

        if let Some(values) = explicit_values(&self.warehouses) {
            selection = selection.with_warehouses(values);
        }
        if let Some(values) = explicit_values(&self.superclasses) {
            selection = selection.with_superclasses(values);
        }
        if let Some(values) = explicit_values(&self.expired) {
            selection = selection.with_expired(values);
        }
        if let Some(values) = explicit_values(&self.expires_next_month) {
            selection = selection.with_expires_next_month(values);
        }

        let min = self.months_min.unwrap_or(selection.months.min);
        let max = self.months_max.unwrap_or(selection.months.max);
        selection.with_months(min, max)
    }
}

/// 未指定 → None（全选）；空白值被丢弃，全为空白 → 空选择
fn explicit_values(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> FilterOptions {
        FilterOptions {
            warehouses: vec!["W1".to_string(), "W2".to_string()],
            superclasses: vec!["CatA".to_string()],
            months_min: 0,
            months_max: 40,
            expired_labels: vec!["N".to_string(), "Y".to_string()],
            expires_next_month_labels: vec!["N".to_string(), "Y".to_string()],
        }
    }

    #[test]
    fn test_defaults_select_all() {
        let cli = Cli::parse_from(["expiry-dashboard"]);
        let selection = cli.selection(&options());

        assert_eq!(selection.warehouses.len(), 2);
        assert_eq!(selection.months.min, 0.0);
        assert_eq!(selection.months.max, 40.0);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_repeated_filters() {
        let cli = Cli::parse_from([
            "expiry-dashboard",
            "--warehouse",
            "W1",
            "--expired",
            "Y",
            "--months-min",
            "12",
            "--format",
            "json",
        ]);
        let selection = cli.selection(&options());

        assert_eq!(selection.warehouses.len(), 1);
        assert!(selection.warehouses.contains("W1"));
        assert_eq!(selection.expired.len(), 1);
        assert_eq!(selection.months.min, 12.0);
        assert_eq!(selection.months.max, 40.0);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_blank_value_selects_none() {
        let cli = Cli::parse_from(["expiry-dashboard", "--warehouse", "", "--superclass", "CatA"]);
        let selection = cli.selection(&options());

        assert!(selection.warehouses.is_empty());
        assert_eq!(selection.superclasses.len(), 1);
        assert_eq!(selection.expired.len(), 2);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "expiry-dashboard",
            "--data",
            "/tmp/inv.csv",
            "--top-n",
            "3",
            "--locale",
            "zh-CN",
        ]);
        let mut config = DashboardConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/inv.csv")));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.locale, "zh-CN");
        assert_eq!(config.true_label, "Y");
    }
}
