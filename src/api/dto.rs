// ==========================================
// 过期库存管理看板 - 报表 DTO 定义
// ==========================================
// 职责: 定义 DashboardApi 的响应结构
// 每个视图包装为 ViewOutcome: 正常 / 无数据提示 / 降级提示
// ==========================================

use crate::domain::{DqViolation, FilterSelection, RowHighlight, TimeBucket};
use crate::engine::KpiSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 提示信息
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// 面向用户的提示（消息已按当前语言翻译）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,

    /// 降级时缺失的列（展示名）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn with_missing_fields(mut self, fields: Vec<String>) -> Self {
        self.missing_fields = fields;
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ==========================================
// 视图结果
// ==========================================

/// 单个视图的构建结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ViewOutcome<T> {
    /// 正常
    Ready(T),
    /// 过滤结果为空（或无需展示的空结果）
    Empty(Notice),
    /// 缺列或构建失败，仅影响本视图
    Degraded(Notice),
}

impl<T> ViewOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewOutcome::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewOutcome::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ViewOutcome::Ready(_) => None,
            ViewOutcome::Empty(notice) | ViewOutcome::Degraded(notice) => Some(notice),
        }
    }
}

/// 报表视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    ExpiringItems,
    SuperclassValues,
    ProblemItems,
    WarehouseExpired,
    ExpirySales,
    TimeBuckets,
    MissingShelfLife,
    Detail,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::ExpiringItems => "expiring_items",
            ViewKind::SuperclassValues => "superclass_values",
            ViewKind::ProblemItems => "problem_items",
            ViewKind::WarehouseExpired => "warehouse_expired",
            ViewKind::ExpirySales => "expiry_sales",
            ViewKind::TimeBuckets => "time_buckets",
            ViewKind::MissingShelfLife => "missing_shelf_life",
            ViewKind::Detail => "detail",
        }
    }

    /// 报表标题的翻译键
    pub fn title_key(&self) -> &'static str {
        match self {
            ViewKind::ExpiringItems => "report.expiring_items",
            ViewKind::SuperclassValues => "report.superclass_values",
            ViewKind::ProblemItems => "report.problem_items",
            ViewKind::WarehouseExpired => "report.warehouse_expired",
            ViewKind::ExpirySales => "report.expiry_sales",
            ViewKind::TimeBuckets => "report.time_buckets",
            ViewKind::MissingShelfLife => "report.missing_shelf_life",
            ViewKind::Detail => "report.detail",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 视图数据行
// ==========================================

/// 下月过期物料（按 物料/仓库/库位 汇总）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringItemStat {
    pub item_id: String,
    pub warehouse_id: String,
    pub location: String,
    pub value: f64,
    pub quantity_on_hand: f64,
}

/// 品类库存金额 vs 过期金额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperclassValueStat {
    pub superclass: String,
    pub total_value: f64,
    pub expired_value: f64,
}

/// 问题物料（过期金额前 N）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemItemStat {
    pub item_id: String,
    pub expired_value: f64,

    /// 占所列前 N 项合计的百分比
    pub percentage: f64,
}

/// 仓库过期金额（全量数据）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseExpiredStat {
    pub warehouse_id: String,
    pub expired_value: f64,
}

/// 按过期标记的 12 个月平均销量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirySalesStat {
    pub expired: String,
    pub average_sales: f64,
    pub count: usize,
}

/// 入库时长分布
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketStat {
    pub bucket: TimeBucket,
    pub count: usize,
    pub percentage: f64,
}

/// 明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub row_number: usize,
    pub item_id: String,
    pub warehouse_id: String,
    pub superclass: String,
    pub months_since_received: f64,
    pub time_bucket: TimeBucket,
    pub expired: String,
    pub expires_next_month: String,
    pub value: f64,
    pub expired_value: f64,
    pub quantity_on_hand: Option<f64>,
    pub location: Option<String>,
    pub shelf_life: Option<String>,
    pub monthly_sales_12mo: Option<f64>,
    pub highlight: RowHighlight,
}

// ==========================================
// 完整报表
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// 数据源
    pub source: String,

    /// 数据集加载时间 (ISO 8601)
    pub loaded_at: String,

    /// 生成时间 (ISO 8601)
    pub generated_at: String,

    /// 全量行数
    pub total_rows: usize,

    /// 过滤后行数
    pub filtered_rows: usize,

    /// 本次使用的过滤条件
    pub selection: FilterSelection,

    pub kpis: KpiSummary,
    pub expiring_items: ViewOutcome<Vec<ExpiringItemStat>>,
    pub superclass_values: ViewOutcome<Vec<SuperclassValueStat>>,
    pub problem_items: ViewOutcome<Vec<ProblemItemStat>>,
    pub warehouse_expired: ViewOutcome<Vec<WarehouseExpiredStat>>,
    pub expiry_sales: ViewOutcome<Vec<ExpirySalesStat>>,
    pub time_buckets: ViewOutcome<Vec<TimeBucketStat>>,
    pub missing_shelf_life: ViewOutcome<Vec<String>>,
    pub detail: ViewOutcome<Vec<DetailRow>>,

    /// 加载时的数据质量问题（跳过的行与置空的可选字段）
    pub data_quality: Vec<DqViolation>,
}

impl DashboardReport {
    /// 所有非正常视图的提示（按报表顺序）
    pub fn notices(&self) -> Vec<(ViewKind, &Notice)> {
        [
            (ViewKind::ExpiringItems, self.expiring_items.notice()),
            (ViewKind::SuperclassValues, self.superclass_values.notice()),
            (ViewKind::ProblemItems, self.problem_items.notice()),
            (ViewKind::WarehouseExpired, self.warehouse_expired.notice()),
            (ViewKind::ExpirySales, self.expiry_sales.notice()),
            (ViewKind::TimeBuckets, self.time_buckets.notice()),
            (ViewKind::MissingShelfLife, self.missing_shelf_life.notice()),
            (ViewKind::Detail, self.detail.notice()),
        ]
        .into_iter()
        .filter_map(|(kind, notice)| notice.map(|n| (kind, n)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_outcome_accessors() {
        let ready: ViewOutcome<Vec<u32>> = ViewOutcome::Ready(vec![1, 2]);
        assert!(ready.is_ready());
        assert_eq!(ready.data(), Some(&vec![1, 2]));
        assert!(ready.notice().is_none());

        let degraded: ViewOutcome<Vec<u32>> = ViewOutcome::Degraded(
            Notice::warning("missing").with_missing_fields(vec!["Location".to_string()]),
        );
        assert!(!degraded.is_ready());
        assert!(degraded.data().is_none());
        assert_eq!(degraded.notice().map(|n| n.missing_fields.len()), Some(1));
    }

    #[test]
    fn test_view_outcome_serialization() {
        let empty: ViewOutcome<Vec<u32>> = ViewOutcome::Empty(Notice::info("no data"));
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(json["status"], "empty");
        assert_eq!(json["data"]["kind"], "INFO");
        assert!(json["data"].get("missing_fields").is_none());

        let ready: ViewOutcome<Vec<u32>> = ViewOutcome::Ready(vec![3]);
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["data"][0], 3);
    }
}
