// ==========================================
// 过期库存管理看板 - 应用状态
// ==========================================
// 职责: 启动时加载一次数据集，持有配置与 API 实例
// 生命周期: 一次命令行调用 = 一次加载 + 一次报表
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{ApiResult, DashboardApi};
use crate::config::DashboardConfig;
use crate::domain::Dataset;
use crate::importer::{DatasetLoader, DatasetSource, ImportResult};

/// 应用状态
pub struct AppState {
    /// 实际加载的数据文件
    pub data_path: PathBuf,

    /// 生效配置
    pub config: DashboardConfig,

    /// 只读数据集
    pub dataset: Arc<Dataset>,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 按配置加载数据集并创建 API
    ///
    /// # 返回
    /// - Err: 文件缺失 / 解析失败 / 缺少必需列 / 零行（均为致命错误）
    pub fn new(config: DashboardConfig) -> anyhow::Result<Self> {
        let data_path = config.resolve_data_path();
        tracing::info!("数据文件: {}", data_path.display());

        let dataset = load_dataset(&data_path)?;
        let state = Self::from_dataset(data_path, dataset, config)?;
        Ok(state)
    }

    /// 使用已加载的数据集创建（测试与嵌入调用使用）
    pub fn from_dataset(
        data_path: PathBuf,
        dataset: Dataset,
        config: DashboardConfig,
    ) -> ApiResult<Self> {
        let dataset = Arc::new(dataset);
        let dashboard_api = Arc::new(DashboardApi::new(dataset.clone(), config.clone())?);

        Ok(Self {
            data_path,
            config,
            dataset,
            dashboard_api,
        })
    }
}

/// 加载数据集
pub fn load_dataset(path: &Path) -> ImportResult<Dataset> {
    let dataset = DatasetLoader::new().load(path)?;
    let skipped: Vec<usize> = dataset
        .violations()
        .iter()
        .filter(|v| v.row_skipped())
        .map(|v| v.row_number)
        .collect();
    if let Some(first) = skipped.first() {
        tracing::warn!("{} 行因数据问题被跳过（首个: 第 {} 行）", skipped.len(), first);
    }
    Ok(dataset)
}
