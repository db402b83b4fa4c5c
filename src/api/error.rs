// ==========================================
// 过期库存管理看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入层错误转换为用户可读的消息
// 视图边界: 视图内的 ApiError 在 DashboardApi 中转换为 Notice，不向外传播
// ==========================================

use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 数据结构错误（视图降级）
    // ==========================================
    #[error("缺少列: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("数据集为空: {0}")]
    EmptyDataset(String),

    #[error("查询结果为空")]
    EmptyResult,

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 缺失列（非缺列错误返回空）
    pub fn missing_fields(&self) -> &[String] {
        match self {
            ApiError::MissingColumns(fields) => fields,
            _ => &[],
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::MissingColumns(fields) => ApiError::MissingColumns(fields),
            ImportError::EmptyDataset(source) => ApiError::EmptyDataset(source),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
