// ==========================================
// 过期库存管理看板 - 聚合器
// ==========================================
// 职责: 记录集 + 分组键 + 归约规则 → 聚合视图
// 规则:
// - 每个出现过的分组键一行，不补齐缺失键（入库时长分桶除外，固定四行）
// - 分组键升序输出；降序排序为稳定排序，并列按分组键升序
// - 百分比 = 本组值 / 全部组值之和 * 100；分母为 0 时记为 0
// ==========================================

use crate::domain::TimeBucket;
use crate::engine::derivation::EnrichedRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// 分组键
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Item,
    Warehouse,
    Superclass,
    Location,
    Expired,
    ExpiresNextMonth,
    TimeBucket,
}

impl GroupKey {
    fn extract(&self, r: &EnrichedRecord<'_>) -> GroupValue {
        let record = r.record;
        match self {
            GroupKey::Item => GroupValue::Text(record.item_id.clone()),
            GroupKey::Warehouse => GroupValue::Text(record.warehouse_id.clone()),
            GroupKey::Superclass => GroupValue::Text(record.superclass.clone()),
            GroupKey::Location => GroupValue::Text(record.location.clone().unwrap_or_default()),
            GroupKey::Expired => GroupValue::Text(record.expired.clone()),
            GroupKey::ExpiresNextMonth => GroupValue::Text(record.expires_next_month.clone()),
            GroupKey::TimeBucket => GroupValue::Bucket(r.time_bucket),
        }
    }
}

/// 分组值：时间分桶按区间顺序排序，其余按字符串排序
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupValue {
    Bucket(TimeBucket),
    Text(String),
}

impl GroupValue {
    pub fn as_text(&self) -> &str {
        match self {
            GroupValue::Bucket(b) => b.label(),
            GroupValue::Text(s) => s.as_str(),
        }
    }
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

// ==========================================
// 度量与归约
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Value,
    ExpiredValue,
    QuantityOnHand,
    MonthlySales12mo,
    MonthsSinceReceived,
}

impl Measure {
    fn extract(&self, r: &EnrichedRecord<'_>) -> Option<f64> {
        match self {
            Measure::Value => Some(r.record.value),
            Measure::ExpiredValue => Some(r.expired_value),
            Measure::QuantityOnHand => r.record.quantity_on_hand,
            Measure::MonthlySales12mo => r.record.monthly_sales_12mo,
            Measure::MonthsSinceReceived => Some(r.record.months_since_received),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReduceOp {
    Sum,
    Count,
    Mean,
}

/// 归约规则
///
/// - Sum / Mean 忽略空值；全部为空时结果为 0
/// - Count 无度量时计行数，有度量时计非空值个数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    pub name: String,
    pub op: ReduceOp,
    pub measure: Option<Measure>,
}

impl Reduction {
    pub fn sum(name: &str, measure: Measure) -> Self {
        Self {
            name: name.to_string(),
            op: ReduceOp::Sum,
            measure: Some(measure),
        }
    }

    pub fn mean(name: &str, measure: Measure) -> Self {
        Self {
            name: name.to_string(),
            op: ReduceOp::Mean,
            measure: Some(measure),
        }
    }

    pub fn count(name: &str) -> Self {
        Self {
            name: name.to_string(),
            op: ReduceOp::Count,
            measure: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn feed(&mut self, reduction: &Reduction, r: &EnrichedRecord<'_>) {
        match reduction.measure {
            None => self.count += 1,
            Some(measure) => {
                if let Some(v) = measure.extract(r) {
                    self.sum += v;
                    self.count += 1;
                }
            }
        }
    }

    fn finish(&self, op: ReduceOp) -> f64 {
        match op {
            ReduceOp::Sum => self.sum,
            ReduceOp::Count => self.count as f64,
            ReduceOp::Mean => {
                if self.count > 0 {
                    self.sum / self.count as f64
                } else {
                    0.0
                }
            }
        }
    }
}

// ==========================================
// AggregateView - 聚合视图（只读）
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: Vec<GroupValue>,
    pub values: Vec<f64>,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateView {
    pub keys: Vec<GroupKey>,
    pub columns: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

impl AggregateView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// 取某行某列的值
    pub fn value(&self, row: &AggregateRow, column: &str) -> Option<f64> {
        self.column_index(column).and_then(|idx| row.values.get(idx).copied())
    }

    /// 某列合计
    pub fn total(&self, column: &str) -> f64 {
        match self.column_index(column) {
            Some(idx) => self.rows.iter().map(|r| r.values[idx]).sum(),
            None => 0.0,
        }
    }

    /// 按某列计算占比（分母为 0 时所有行记为 0）
    pub fn with_percentage(mut self, column: &str) -> Self {
        let Some(idx) = self.column_index(column) else {
            return self;
        };
        let total: f64 = self.rows.iter().map(|r| r.values[idx]).sum();
        for row in &mut self.rows {
            row.percentage = Some(if total == 0.0 {
                0.0
            } else {
                row.values[idx] / total * 100.0
            });
        }
        self
    }

    /// 按某列降序（稳定排序，并列保持分组键升序）
    pub fn sort_desc_by(mut self, column: &str) -> Self {
        if let Some(idx) = self.column_index(column) {
            self.rows
                .sort_by(|a, b| b.values[idx].total_cmp(&a.values[idx]));
        }
        self
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }
}

// ==========================================
// Aggregator - 聚合器（无状态）
// ==========================================
pub struct Aggregator;

impl Aggregator {
    /// 通用分组聚合
    pub fn group_by(
        records: &[EnrichedRecord<'_>],
        keys: &[GroupKey],
        reductions: &[Reduction],
    ) -> AggregateView {
        let mut groups: BTreeMap<Vec<GroupValue>, Vec<Accumulator>> = BTreeMap::new();

        for r in records {
            let key: Vec<GroupValue> = keys.iter().map(|k| k.extract(r)).collect();
            let accs = groups
                .entry(key)
                .or_insert_with(|| vec![Accumulator::default(); reductions.len()]);
            for (acc, reduction) in accs.iter_mut().zip(reductions) {
                acc.feed(reduction, r);
            }
        }

        let rows = groups
            .into_iter()
            .map(|(key, accs)| AggregateRow {
                key,
                values: accs
                    .iter()
                    .zip(reductions)
                    .map(|(acc, reduction)| acc.finish(reduction.op))
                    .collect(),
                percentage: None,
            })
            .collect();

        AggregateView {
            keys: keys.to_vec(),
            columns: reductions.iter().map(|r| r.name.clone()).collect(),
            rows,
        }
    }

    /// 入库时长分布：固定四行（缺失分桶补 0），含占比
    pub fn time_bucket_distribution(records: &[EnrichedRecord<'_>]) -> AggregateView {
        let mut view = Self::group_by(records, &[GroupKey::TimeBucket], &[Reduction::count("count")]);

        let present: Vec<GroupValue> = view.rows.iter().map(|r| r.key[0].clone()).collect();
        for bucket in TimeBucket::ALL {
            let key = GroupValue::Bucket(bucket);
            if !present.contains(&key) {
                view.rows.push(AggregateRow {
                    key: vec![key],
                    values: vec![0.0],
                    percentage: None,
                });
            }
        }
        view.rows.sort_by(|a, b| a.key.cmp(&b.key));

        view.with_percentage("count")
    }
}
