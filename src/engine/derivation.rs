// ==========================================
// 过期库存管理看板 - 派生字段计算
// ==========================================
// 职责: 逐行纯函数，不依赖其他记录
// - expired_value: 过期则取 value，否则为 0
// - time_bucket: 入库月数分桶
// - highlight: 行高亮提示（缺少保质期 > 已过期 > 正常）
// 说明: 全量数据与过滤后数据分别独立计算，不互相推导
// ==========================================

use crate::domain::{InventoryRecord, RowHighlight, TimeBucket};

/// 过期金额
pub fn expired_value(record: &InventoryRecord, true_label: &str) -> f64 {
    if record.is_expired(true_label) {
        record.value
    } else {
        0.0
    }
}

/// 行分类
///
/// `shelf_life_tracked` 为 false（数据集无 Shelf Life 列）时不产生 MissingShelfLife。
pub fn classify_row(record: &InventoryRecord, true_label: &str, shelf_life_tracked: bool) -> RowHighlight {
    if shelf_life_tracked && record.is_missing_shelf_life() {
        RowHighlight::MissingShelfLife
    } else if record.is_expired(true_label) {
        RowHighlight::Expired
    } else {
        RowHighlight::Normal
    }
}

/// 带派生字段的记录视图（只在一次报表构建内有效）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichedRecord<'a> {
    pub record: &'a InventoryRecord,
    pub expired_value: f64,
    pub time_bucket: TimeBucket,
    pub highlight: RowHighlight,
}

impl<'a> EnrichedRecord<'a> {
    pub fn new(record: &'a InventoryRecord, true_label: &str, shelf_life_tracked: bool) -> Self {
        Self {
            record,
            expired_value: expired_value(record, true_label),
            time_bucket: TimeBucket::from_months(record.months_since_received),
            highlight: classify_row(record, true_label, shelf_life_tracked),
        }
    }
}

/// 批量计算派生字段
pub fn enrich<'a, I>(records: I, true_label: &str, shelf_life_tracked: bool) -> Vec<EnrichedRecord<'a>>
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    records
        .into_iter()
        .map(|r| EnrichedRecord::new(r, true_label, shelf_life_tracked))
        .collect()
}
