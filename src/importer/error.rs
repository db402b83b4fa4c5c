// ==========================================
// 过期库存管理看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 导入错误均为致命错误，出现即停止后续处理
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 结构错误 =====
    #[error("缺少必需列: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("数据集为空: {0}")]
    EmptyDataset(String),

    // ===== 数据映射错误 =====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 小于 {min}")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
        min: f64,
    },

    #[error("数值无效 (行 {row}, 字段 {field}): {value} 不是有限数值")]
    NonFiniteValue { row: usize, field: String, value: f64 },

    #[error("必填字段为空 (行 {row}, 字段 {field})")]
    RequiredFieldEmpty { row: usize, field: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 行级错误返回 (行号, 字段)，用于生成 DQ 记录
    pub fn row_context(&self) -> Option<(usize, &str)> {
        match self {
            ImportError::TypeConversionError { row, field, .. }
            | ImportError::ValueRangeError { row, field, .. }
            | ImportError::NonFiniteValue { row, field, .. }
            | ImportError::RequiredFieldEmpty { row, field } => Some((*row, field.as_str())),
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = ImportError::MissingColumns(vec!["Value".to_string(), "Expired".to_string()]);
        assert_eq!(err.to_string(), "缺少必需列: Value, Expired");
    }

    #[test]
    fn test_row_context() {
        let err = ImportError::TypeConversionError {
            row: 7,
            field: "Value".to_string(),
            message: "abc".to_string(),
        };
        assert_eq!(err.row_context(), Some((7, "Value")));
        assert!(ImportError::EmptyDataset("x.csv".to_string()).row_context().is_none());
    }
}
