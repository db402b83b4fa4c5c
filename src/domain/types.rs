// ==========================================
// 过期库存管理看板 - 领域类型定义
// ==========================================
// 职责: 入库时长分桶 / 行高亮提示 / 数据列定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 入库时长分桶 (Time Bucket)
// ==========================================
// 四个有序、互不重叠的区间，覆盖全部月数
// 边界: 12 → 1-2y, 24 → 2-3y, 36 → >3y
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "<1y")]
    UnderOneYear, // [0, 12)
    #[serde(rename = "1-2y")]
    OneToTwoYears, // [12, 24)
    #[serde(rename = "2-3y")]
    TwoToThreeYears, // [24, 36)
    #[serde(rename = ">3y")]
    OverThreeYears, // [36, ∞)
}

impl TimeBucket {
    /// 全部分桶（按展示顺序）
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::UnderOneYear,
        TimeBucket::OneToTwoYears,
        TimeBucket::TwoToThreeYears,
        TimeBucket::OverThreeYears,
    ];

    /// 按入库月数分桶
    ///
    /// 负数与 NaN 落入 `<1y`（与最低区间的兜底分支一致）
    pub fn from_months(months: f64) -> Self {
        if months >= 36.0 {
            TimeBucket::OverThreeYears
        } else if months >= 24.0 {
            TimeBucket::TwoToThreeYears
        } else if months >= 12.0 {
            TimeBucket::OneToTwoYears
        } else {
            TimeBucket::UnderOneYear
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::UnderOneYear => "<1y",
            TimeBucket::OneToTwoYears => "1-2y",
            TimeBucket::TwoToThreeYears => "2-3y",
            TimeBucket::OverThreeYears => ">3y",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 行高亮提示 (Row Highlight)
// ==========================================
// 优先级固定: 缺少保质期 > 已过期 > 正常
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowHighlight {
    MissingShelfLife, // 保质期缺失
    Expired,          // 已过期
    Normal,           // 正常
}

impl fmt::Display for RowHighlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowHighlight::MissingShelfLife => write!(f, "MISSING_SHELF_LIFE"),
            RowHighlight::Expired => write!(f, "EXPIRED"),
            RowHighlight::Normal => write!(f, "NORMAL"),
        }
    }
}

// ==========================================
// 数据列 (Inventory Column)
// ==========================================
// 规范列名；源文件表头按大小写不敏感匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryColumn {
    Item,
    WarehouseId,
    Superclass,
    MonthsSinceReceived,
    Expired,
    ExpiresNextMonth,
    Value,
    QuantityOnHand,
    Location,
    ShelfLife,
    MonthlySales12mo,
}

impl InventoryColumn {
    /// 必需列：任一缺失即视为加载失败
    pub const REQUIRED: [InventoryColumn; 7] = [
        InventoryColumn::Item,
        InventoryColumn::WarehouseId,
        InventoryColumn::Superclass,
        InventoryColumn::MonthsSinceReceived,
        InventoryColumn::Expired,
        InventoryColumn::ExpiresNextMonth,
        InventoryColumn::Value,
    ];

    /// 可选列：缺失时仅影响对应视图
    pub const OPTIONAL: [InventoryColumn; 4] = [
        InventoryColumn::QuantityOnHand,
        InventoryColumn::Location,
        InventoryColumn::ShelfLife,
        InventoryColumn::MonthlySales12mo,
    ];

    /// 源文件中的标准表头
    pub fn header(&self) -> &'static str {
        match self {
            InventoryColumn::Item => "Item",
            InventoryColumn::WarehouseId => "Warehouse ID",
            InventoryColumn::Superclass => "Superclass",
            InventoryColumn::MonthsSinceReceived => "Months since received",
            InventoryColumn::Expired => "Expired",
            InventoryColumn::ExpiresNextMonth => "Expires next month",
            InventoryColumn::Value => "Value",
            InventoryColumn::QuantityOnHand => "Quantity on Hand",
            InventoryColumn::Location => "Location",
            InventoryColumn::ShelfLife => "Shelf Life",
            InventoryColumn::MonthlySales12mo => "12 months sales",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// 全部列（必需 + 可选）
    pub fn all() -> impl Iterator<Item = InventoryColumn> {
        Self::REQUIRED.into_iter().chain(Self::OPTIONAL)
    }
}

impl fmt::Display for InventoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bucket_boundaries() {
        for m in [0.0, 11.0, 11.9] {
            assert_eq!(TimeBucket::from_months(m), TimeBucket::UnderOneYear, "months={}", m);
        }
        for m in [12.0, 23.9] {
            assert_eq!(TimeBucket::from_months(m), TimeBucket::OneToTwoYears, "months={}", m);
        }
        for m in [24.0, 35.9] {
            assert_eq!(TimeBucket::from_months(m), TimeBucket::TwoToThreeYears, "months={}", m);
        }
        for m in [36.0, 1000.0] {
            assert_eq!(TimeBucket::from_months(m), TimeBucket::OverThreeYears, "months={}", m);
        }
    }

    #[test]
    fn test_time_bucket_兜底() {
        assert_eq!(TimeBucket::from_months(-1.0), TimeBucket::UnderOneYear);
        assert_eq!(TimeBucket::from_months(f64::NAN), TimeBucket::UnderOneYear);
    }

    #[test]
    fn test_time_bucket_serde_label() {
        let json = serde_json::to_string(&TimeBucket::OverThreeYears).unwrap();
        assert_eq!(json, "\">3y\"");
        assert_eq!(TimeBucket::UnderOneYear.to_string(), "<1y");
    }

    #[test]
    fn test_inventory_column_headers() {
        assert_eq!(InventoryColumn::WarehouseId.header(), "Warehouse ID");
        assert_eq!(InventoryColumn::MonthlySales12mo.header(), "12 months sales");
        assert!(InventoryColumn::Value.is_required());
        assert!(!InventoryColumn::ShelfLife.is_required());
        assert_eq!(InventoryColumn::all().count(), 11);
    }
}
