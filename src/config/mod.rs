// ==========================================
// 过期库存管理看板 - 配置层
// ==========================================
// 职责: 看板配置加载与校验
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod dashboard_config;

// 重导出核心配置
pub use dashboard_config::{config_keys, get_default_data_path, DashboardConfig, SUPPORTED_LOCALES};
