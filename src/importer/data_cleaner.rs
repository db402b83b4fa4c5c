// ==========================================
// 过期库存管理看板 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值解析 / 数值范围校验
// ==========================================

use crate::importer::error::{ImportError, ImportResult};

/// 视为空值的单元格内容（与常见表格导出工具一致）
const NULL_MARKERS: &[&str] = &[
    "", "na", "n/a", "nan", "null", "none", "#n/a", "-nan", "<na>",
];

pub struct DataCleaner;

impl DataCleaner {
    /// 标识类字段：统一为去空白的字符串
    pub fn normalize_identifier(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 标准化 NULL 值（空字符串/空值标记 → None）
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if self.is_null_marker(trimmed) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    pub fn is_null_marker(&self, value: &str) -> bool {
        NULL_MARKERS.contains(&value.trim().to_lowercase().as_str())
    }

    /// 解析数值（允许货币符号与千分位）
    ///
    /// # 返回
    /// - Ok(None): 空值
    /// - Ok(Some(f64)): 解析成功
    /// - Err: 无法解析
    pub fn parse_number(&self, value: Option<&str>, row: usize, field: &str) -> ImportResult<Option<f64>> {
        let Some(cleaned) = self.normalize_null(value) else {
            return Ok(None);
        };

        let numeric: String = cleaned
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' '))
            .collect();

        numeric
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("无法解析为数值: {}", cleaned),
            })
    }

    /// 校验有限数值（拒绝 inf / NaN，如 "inf"、"1e400"）
    pub fn validate_finite(&self, value: f64, row: usize, field: &str) -> ImportResult<f64> {
        if !value.is_finite() {
            return Err(ImportError::NonFiniteValue {
                row,
                field: field.to_string(),
                value,
            });
        }
        Ok(value)
    }

    /// 校验非负有限数值（0 <= value < inf）
    pub fn validate_non_negative(&self, value: f64, row: usize, field: &str) -> ImportResult<f64> {
        let value = self.validate_finite(value, row, field)?;
        if value < 0.0 {
            return Err(ImportError::ValueRangeError {
                row,
                field: field.to_string(),
                value,
                min: 0.0,
            });
        }
        Ok(value)
    }
}
