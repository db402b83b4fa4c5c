// ==========================================
// 过期库存管理看板 - 数据集
// ==========================================
// 职责: 加载后的只读数据集 + 列解析结果 + DQ 记录
// 生命周期: 启动时加载一次，之后显式传递，不做全局状态
// ==========================================

use crate::domain::record::InventoryRecord;
use crate::domain::types::InventoryColumn;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// DatasetSchema - 列解析结果
// ==========================================

/// 规范列 → 源文件实际表头
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// 源文件表头（原样）
    pub headers: Vec<String>,

    /// 已解析的列
    resolved: HashMap<InventoryColumn, String>,
}

impl DatasetSchema {
    pub fn new(headers: Vec<String>, resolved: HashMap<InventoryColumn, String>) -> Self {
        Self { headers, resolved }
    }

    /// 按规范表头构造（测试与内存数据使用）
    pub fn with_columns(columns: &[InventoryColumn]) -> Self {
        let resolved: HashMap<InventoryColumn, String> = columns
            .iter()
            .map(|c| (*c, c.header().to_string()))
            .collect();
        let headers = columns.iter().map(|c| c.header().to_string()).collect();
        Self { headers, resolved }
    }

    /// 全部列均存在
    pub fn full() -> Self {
        let columns: Vec<InventoryColumn> = InventoryColumn::all().collect();
        Self::with_columns(&columns)
    }

    pub fn has(&self, column: InventoryColumn) -> bool {
        self.resolved.contains_key(&column)
    }

    /// 源文件中的实际表头
    pub fn header_for(&self, column: InventoryColumn) -> Option<&str> {
        self.resolved.get(&column).map(|s| s.as_str())
    }

    /// 返回缺失列的展示名（保持入参顺序）
    pub fn missing(&self, columns: &[InventoryColumn]) -> Vec<String> {
        columns
            .iter()
            .filter(|c| !self.has(**c))
            .map(|c| c.header().to_string())
            .collect()
    }
}

// ==========================================
// DqViolation - 数据质量问题
// ==========================================

/// 数据质量问题的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DqAction {
    /// 必需列无效，整行跳过
    RowSkipped,
    /// 可选列无效，该单元格按空值处理，行保留
    FieldCleared,
}

/// 行级数据质量问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub field: String,
    pub message: String,
    pub action: DqAction,
}

impl DqViolation {
    pub fn row_skipped(&self) -> bool {
        self.action == DqAction::RowSkipped
    }
}

// ==========================================
// Dataset - 只读数据集
// ==========================================

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<InventoryRecord>,
    schema: DatasetSchema,
    source: String,
    violations: Vec<DqViolation>,
    loaded_at: DateTime<Local>,
}

impl Dataset {
    pub fn new(records: Vec<InventoryRecord>, schema: DatasetSchema, source: impl Into<String>) -> Self {
        Self {
            records,
            schema,
            source: source.into(),
            violations: Vec::new(),
            loaded_at: Local::now(),
        }
    }

    /// 附带 DQ 问题列表
    pub fn with_violations(mut self, violations: Vec<DqViolation>) -> Self {
        self.violations = violations;
        self
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn violations(&self) -> &[DqViolation] {
        &self.violations
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
