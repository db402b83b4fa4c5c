// ==========================================
// 过期库存管理看板 - 过滤引擎
// ==========================================
// 职责: 全量记录 + 过滤选择 → 满足全部五个谓词的子集
// 规则:
// - 谓词之间为 AND
// - 成员谓词: 值必须在所选集合内；空集合 → 空结果
// - 区间谓词: months_since_received ∈ [min, max]
// - 稳定过滤: 保持原始顺序
// ==========================================

use crate::domain::{FilterSelection, InventoryRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 过滤谓词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterPredicate {
    Warehouse,
    Superclass,
    MonthsRange,
    Expired,
    ExpiresNextMonth,
}

impl FilterPredicate {
    pub const ALL: [FilterPredicate; 5] = [
        FilterPredicate::Warehouse,
        FilterPredicate::Superclass,
        FilterPredicate::MonthsRange,
        FilterPredicate::Expired,
        FilterPredicate::ExpiresNextMonth,
    ];

    /// 单个谓词是否成立
    pub fn holds(&self, selection: &FilterSelection, record: &InventoryRecord) -> bool {
        match self {
            FilterPredicate::Warehouse => selection.warehouses.contains(&record.warehouse_id),
            FilterPredicate::Superclass => selection.superclasses.contains(&record.superclass),
            FilterPredicate::MonthsRange => selection.months.contains(record.months_since_received),
            FilterPredicate::Expired => selection.expired.contains(&record.expired),
            FilterPredicate::ExpiresNextMonth => {
                selection.expires_next_month.contains(&record.expires_next_month)
            }
        }
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::Warehouse => write!(f, "WAREHOUSE"),
            FilterPredicate::Superclass => write!(f, "SUPERCLASS"),
            FilterPredicate::MonthsRange => write!(f, "MONTHS_RANGE"),
            FilterPredicate::Expired => write!(f, "EXPIRED"),
            FilterPredicate::ExpiresNextMonth => write!(f, "EXPIRES_NEXT_MONTH"),
        }
    }
}

// ==========================================
// FilterEngine - 过滤引擎（无状态）
// ==========================================
pub struct FilterEngine;

impl FilterEngine {
    /// 记录是否满足全部谓词
    pub fn matches(selection: &FilterSelection, record: &InventoryRecord) -> bool {
        FilterPredicate::ALL
            .iter()
            .all(|p| p.holds(selection, record))
    }

    /// 记录违反的谓词列表（空列表即通过）
    pub fn violations(selection: &FilterSelection, record: &InventoryRecord) -> Vec<FilterPredicate> {
        FilterPredicate::ALL
            .into_iter()
            .filter(|p| !p.holds(selection, record))
            .collect()
    }

    /// 应用过滤
    pub fn apply<'a>(
        records: &'a [InventoryRecord],
        selection: &FilterSelection,
    ) -> Vec<&'a InventoryRecord> {
        let filtered: Vec<&InventoryRecord> = records
            .iter()
            .filter(|r| Self::matches(selection, r))
            .collect();

        tracing::debug!(
            "过滤完成: {} / {} 行命中 (仓库 {} 个, 品类 {} 个, 月数 [{}, {}])",
            filtered.len(),
            records.len(),
            selection.warehouses.len(),
            selection.superclasses.len(),
            selection.months.min,
            selection.months.max
        );
        filtered
    }
}
