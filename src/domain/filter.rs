// ==========================================
// 过期库存管理看板 - 过滤条件
// ==========================================
// 职责: 过滤选项（全量取值域）与用户过滤选择
// 生命周期: 每次交互重建，不持久化
// ==========================================

use crate::domain::record::InventoryRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

// ==========================================
// MonthsRange - 入库月数区间（两端包含）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthsRange {
    pub min: f64,
    pub max: f64,
}

impl MonthsRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, months: f64) -> bool {
        months >= self.min && months <= self.max
    }
}

// ==========================================
// FilterOptions - 可选项
// ==========================================
// 始终从未过滤的全量数据派生，保证用户收窄后仍能重新放宽

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// 仓库（按首次出现顺序去重）
    pub warehouses: Vec<String>,

    /// 品类
    pub superclasses: Vec<String>,

    /// 月数下限（向下取整）
    pub months_min: i64,

    /// 月数上限（向上取整）
    pub months_max: i64,

    /// 过期标记取值
    pub expired_labels: Vec<String>,

    /// 下月过期标记取值
    pub expires_next_month_labels: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        let months = records
            .iter()
            .map(|r| r.months_since_received)
            .filter(|m| m.is_finite());
        let (min, max) = months.fold((None::<f64>, None::<f64>), |(lo, hi), m| {
            (
                Some(lo.map_or(m, |v| v.min(m))),
                Some(hi.map_or(m, |v| v.max(m))),
            )
        });

        Self {
            warehouses: unique_in_order(records.iter().map(|r| r.warehouse_id.as_str())),
            superclasses: unique_in_order(records.iter().map(|r| r.superclass.as_str())),
            months_min: min.map_or(0, |v| v.floor() as i64),
            months_max: max.map_or(0, |v| v.ceil() as i64),
            expired_labels: unique_in_order(records.iter().map(|r| r.expired.as_str())),
            expires_next_month_labels: unique_in_order(
                records.iter().map(|r| r.expires_next_month.as_str()),
            ),
        }
    }

    pub fn months_range(&self) -> MonthsRange {
        MonthsRange::new(self.months_min as f64, self.months_max as f64)
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(|v| v.to_string())
        .collect()
}

// ==========================================
// FilterSelection - 用户过滤选择
// ==========================================
// 五个谓词取交集；空集合表示不选任何值（结果为空），不是"全选"

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub warehouses: BTreeSet<String>,
    pub superclasses: BTreeSet<String>,
    pub months: MonthsRange,
    pub expired: BTreeSet<String>,
    pub expires_next_month: BTreeSet<String>,
}

impl FilterSelection {
    /// 默认选择：全量取值域
    pub fn select_all(options: &FilterOptions) -> Self {
        Self {
            warehouses: options.warehouses.iter().cloned().collect(),
            superclasses: options.superclasses.iter().cloned().collect(),
            months: options.months_range(),
            expired: options.expired_labels.iter().cloned().collect(),
            expires_next_month: options.expires_next_month_labels.iter().cloned().collect(),
        }
    }

    pub fn with_warehouses<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warehouses = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_superclasses<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.superclasses = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_months(mut self, min: f64, max: f64) -> Self {
        self.months = MonthsRange::new(min, max);
        self
    }

    pub fn with_expired<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expired = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expires_next_month<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expires_next_month = values.into_iter().map(Into::into).collect();
        self
    }
}
