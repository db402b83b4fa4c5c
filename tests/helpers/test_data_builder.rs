// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use expiry_dashboard::domain::InventoryRecord;
use std::io::Write;
use tempfile::NamedTempFile;

// 完整表头（规范列名）
pub const FULL_HEADER: &[&str] = &[
    "Item",
    "Warehouse ID",
    "Superclass",
    "Months since received",
    "Expired",
    "Expires next month",
    "Value",
    "Quantity on Hand",
    "Location",
    "Shelf Life",
    "12 months sales",
];

// ==========================================
// InventoryRecord 构建器
// ==========================================

pub struct RecordBuilder {
    item_id: String,
    warehouse_id: String,
    superclass: String,
    months_since_received: f64,
    expired: String,
    expires_next_month: String,
    value: f64,
    quantity_on_hand: Option<f64>,
    location: Option<String>,
    shelf_life: Option<String>,
    monthly_sales_12mo: Option<f64>,
    row_number: usize,
}

impl RecordBuilder {
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            warehouse_id: "W1".to_string(),
            superclass: "CatA".to_string(),
            months_since_received: 0.0,
            expired: "N".to_string(),
            expires_next_month: "N".to_string(),
            value: 0.0,
            quantity_on_hand: Some(1.0),
            location: Some("L1".to_string()),
            shelf_life: Some("12".to_string()),
            monthly_sales_12mo: Some(0.0),
            row_number: 2,
        }
    }

    pub fn warehouse(mut self, warehouse: &str) -> Self {
        self.warehouse_id = warehouse.to_string();
        self
    }

    pub fn superclass(mut self, superclass: &str) -> Self {
        self.superclass = superclass.to_string();
        self
    }

    pub fn months(mut self, months: f64) -> Self {
        self.months_since_received = months;
        self
    }

    pub fn expired(mut self, label: &str) -> Self {
        self.expired = label.to_string();
        self
    }

    pub fn expires_next_month(mut self, label: &str) -> Self {
        self.expires_next_month = label.to_string();
        self
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity_on_hand = Some(quantity);
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn no_shelf_life(mut self) -> Self {
        self.shelf_life = None;
        self
    }

    pub fn sales(mut self, sales: f64) -> Self {
        self.monthly_sales_12mo = Some(sales);
        self
    }

    pub fn row(mut self, row_number: usize) -> Self {
        self.row_number = row_number;
        self
    }

    pub fn build(self) -> InventoryRecord {
        InventoryRecord {
            item_id: self.item_id,
            warehouse_id: self.warehouse_id,
            superclass: self.superclass,
            months_since_received: self.months_since_received,
            expired: self.expired,
            expires_next_month: self.expires_next_month,
            value: self.value,
            quantity_on_hand: self.quantity_on_hand,
            location: self.location,
            shelf_life: self.shelf_life,
            monthly_sales_12mo: self.monthly_sales_12mo,
            row_number: self.row_number,
        }
    }
}

// ==========================================
// 临时 CSV 文件
// ==========================================

/// 写出临时 CSV（表头 + 行），返回文件句柄（需保持存活）
pub fn write_csv(header: &[&str], rows: &[Vec<&str>]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("无法创建临时文件");

    {
        let mut wtr = csv::Writer::from_writer(file.as_file_mut());
        wtr.write_record(header).expect("写表头失败");
        for row in rows {
            wtr.write_record(row).expect("写数据行失败");
        }
        wtr.flush().expect("flush 失败");
    }
    file.flush().expect("flush 失败");
    file
}

/// 三行标准场景：两行 W1（1 行过期），一行 W2
pub fn three_record_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["A", "W1", "CatA", "5", "N", "Y", "100", "2", "L1", "12", "30"],
        vec!["B", "W1", "CatA", "40", "Y", "N", "50", "1", "L2", "6", "5"],
        vec!["C", "W2", "CatB", "13", "Y", "N", "200", "4", "L1", "", "10"],
    ]
}
