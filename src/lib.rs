// ==========================================
// 过期库存管理看板 - 核心库
// ==========================================
// 管道: 加载 → 过滤 → 派生字段 → 聚合 → KPI → 报表
// 系统定位: 只读分析工具，不写回数据
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录、数据集、过滤条件
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 过滤与聚合
pub mod engine;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 报表接口
pub mod api;

// 应用层 - 命令行
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Dataset, DatasetSchema, DqAction, DqViolation, FilterOptions, FilterSelection, InventoryColumn,
    InventoryRecord, MonthsRange, RowHighlight, TimeBucket,
};

// 导入
pub use importer::{DatasetLoader, DatasetSource, ImportError, ImportResult};

// 引擎
pub use engine::{Aggregator, FilterEngine, KpiCalculator, KpiSummary};

// 配置
pub use config::DashboardConfig;

// API
pub use api::{ApiError, ApiResult, DashboardApi, DashboardReport, ViewOutcome};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Expiry Dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
