// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成看板演示与手工测试用的库存 CSV
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use csv::Writer;
use std::error::Error;
use std::fs::{self, File};

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// CSV 表头（规范列名）
const CSV_HEADER: &[&str] = &[
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

const WAREHOUSES: &[&str] = &["WH-01", "WH-02", "WH-03", "WH-04"];
const SUPERCLASSES: &[&str] = &["Dairy", "Bakery", "Produce", "Frozen", "Beverages"];

// 库存记录结构
#[derive(Clone)]
struct StockRecord {
    item: String,
    warehouse_id: String,
    superclass: String,
    months_since_received: String,
    expired: String,
    expires_next_month: String,
    value: String,
    quantity_on_hand: String,
    location: String,
    shelf_life: String,
    sales_12mo: String,
}

impl StockRecord {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.item.clone(),
            self.warehouse_id.clone(),
            self.superclass.clone(),
            self.months_since_received.clone(),
            self.expired.clone(),
            self.expires_next_month.clone(),
            self.value.clone(),
            self.quantity_on_hand.clone(),
            self.location.clone(),
            self.shelf_life.clone(),
            self.sales_12mo.clone(),
        ]
    }
}

// 生成正常库存记录（确定性，便于复现）
fn generate_record(index: usize) -> StockRecord {
    let months = (index * 7) % 48;
    let shelf_life_months = [6, 12, 18, 24, 36][index % 5];
    let expired = months >= shelf_life_months;
    let expires_next_month = !expired && months + 1 >= shelf_life_months;
    let quantity = 5 + (index * 13) % 120;
    let unit_cost = 1.25 + (index % 17) as f64 * 0.75;

    StockRecord {
        item: format!("ITM{:05}", 10000 + index % 60),
        warehouse_id: WAREHOUSES[index % WAREHOUSES.len()].to_string(),
        superclass: SUPERCLASSES[(index / 3) % SUPERCLASSES.len()].to_string(),
        months_since_received: format!("{}", months),
        expired: if expired { "Y" } else { "N" }.to_string(),
        expires_next_month: if expires_next_month { "Y" } else { "N" }.to_string(),
        value: format!("{:.2}", quantity as f64 * unit_cost),
        quantity_on_hand: format!("{}", quantity),
        location: format!("{}-{:02}", ["A", "B", "C"][index % 3], index % 20),
        // 每 11 行缺一个保质期
        shelf_life: if index % 11 == 0 {
            String::new()
        } else {
            format!("{}", shelf_life_months)
        },
        sales_12mo: format!("{}", (index * 31) % 500),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 完整数据 (200条)
    generate_full_data()?;

    // 2. 缺少 12 months sales 列
    generate_missing_sales_column()?;

    // 3. 列名大小写不一致
    generate_case_mismatched_headers()?;

    // 4. 含无效行
    generate_invalid_rows()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn generate_full_data() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/01_perishables_analysis.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(CSV_HEADER)?;
    for i in 0..200 {
        wtr.write_record(&generate_record(i).to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 {} (200条)", path);
    Ok(())
}

fn generate_missing_sales_column() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/02_missing_sales_column.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(&CSV_HEADER[..10])?;
    for i in 0..50 {
        let row = generate_record(i).to_row();
        wtr.write_record(&row[..10])?;
    }

    wtr.flush()?;
    println!("✓ 生成 {} (50条，无销量列)", path);
    Ok(())
}

fn generate_case_mismatched_headers() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/03_case_mismatched_headers.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    let header: Vec<String> = CSV_HEADER
        .iter()
        .enumerate()
        .map(|(i, h)| if i % 2 == 0 { h.to_lowercase() } else { h.to_uppercase() })
        .collect();
    wtr.write_record(&header)?;
    for i in 0..30 {
        wtr.write_record(&generate_record(i).to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 {} (30条，列名大小写混合)", path);
    Ok(())
}

fn generate_invalid_rows() -> Result<(), Box<dyn Error>> {
    let path = format!("{}/04_invalid_rows.csv", OUTPUT_DIR);
    let mut wtr = Writer::from_writer(File::create(&path)?);

    wtr.write_record(CSV_HEADER)?;
    for i in 0..20 {
        let mut record = generate_record(i);
        match i % 5 {
            1 => record.months_since_received = "abc".to_string(),
            2 => record.value = "-10".to_string(),
            3 => record.item = String::new(),
            _ => {}
        }
        wtr.write_record(&record.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 {} (20条，其中12条无效)", path);
    Ok(())
}
