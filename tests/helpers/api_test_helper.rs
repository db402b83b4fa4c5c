// ==========================================
// API 测试辅助 - 测试环境
// ==========================================

use std::sync::Arc;

use expiry_dashboard::api::DashboardApi;
use expiry_dashboard::config::DashboardConfig;
use expiry_dashboard::domain::{Dataset, DatasetSchema, InventoryColumn, InventoryRecord};
use expiry_dashboard::importer::{DatasetLoader, DatasetSource};
use tempfile::NamedTempFile;

use super::test_data_builder::write_csv;

/// 测试环境：临时数据文件 + DashboardApi
pub struct ApiTestEnv {
    _file: Option<NamedTempFile>,
    pub dashboard_api: DashboardApi,
}

impl ApiTestEnv {
    /// 从 CSV 内容创建（经过完整导入流程）
    pub fn from_csv(header: &[&str], rows: &[Vec<&str>]) -> Result<Self, Box<dyn std::error::Error>> {
        let file = write_csv(header, rows);
        let dataset = DatasetLoader::new().load(file.path())?;
        let dashboard_api = DashboardApi::new(Arc::new(dataset), DashboardConfig::default())?;
        Ok(Self {
            _file: Some(file),
            dashboard_api,
        })
    }

    /// 从内存记录创建（全部列存在）
    pub fn from_records(records: Vec<InventoryRecord>) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_records_with_columns(records, &InventoryColumn::all().collect::<Vec<_>>())
    }

    /// 从内存记录创建（指定存在的列）
    pub fn from_records_with_columns(
        records: Vec<InventoryRecord>,
        columns: &[InventoryColumn],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dataset = Dataset::new(records, DatasetSchema::with_columns(columns), "memory");
        let dashboard_api = DashboardApi::new(Arc::new(dataset), DashboardConfig::default())?;
        Ok(Self {
            _file: None,
            dashboard_api,
        })
    }
}
