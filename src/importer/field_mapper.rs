// ==========================================
// 过期库存管理看板 - 字段映射器实现
// ==========================================
// 职责: 原始行 → InventoryRecord（标准化 + 类型转换）
// 规则:
// - 标识类字段（Item/Warehouse ID/Superclass/标记）统一为字符串
// - Months since received / Value 必须为非负有限数值，否则整行跳过
// - 可选列缺失或单元格为空 → None
// - 可选数值列无效 → None + DQ 记录（行保留）
// ==========================================

use crate::domain::{DqAction, DqViolation, InventoryColumn, InventoryRecord};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::RecordMapper;
use std::collections::HashMap;

pub struct FieldMapper {
    indices: HashMap<InventoryColumn, usize>,
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new(resolver: &ColumnResolver) -> Self {
        let indices = InventoryColumn::all()
            .filter_map(|c| resolver.index_of(c).map(|idx| (c, idx)))
            .collect();
        Self {
            indices,
            cleaner: DataCleaner,
        }
    }

    /// 取单元格（列缺失或行过短 → None）
    fn cell<'a>(&self, row: &'a [String], column: InventoryColumn) -> Option<&'a str> {
        self.indices
            .get(&column)
            .and_then(|idx| row.get(*idx))
            .map(|s| s.as_str())
    }

    fn get_identifier(&self, row: &[String], column: InventoryColumn) -> String {
        self.cleaner
            .normalize_identifier(self.cell(row, column).unwrap_or(""))
    }

    fn get_optional_string(&self, row: &[String], column: InventoryColumn) -> Option<String> {
        self.cleaner.normalize_null(self.cell(row, column))
    }

    fn get_optional_number(
        &self,
        row: &[String],
        column: InventoryColumn,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        self.cleaner
            .parse_number(self.cell(row, column), row_number, column.header())
    }

    /// 可选数值（无效值记为 FieldCleared 并返回 None）
    fn get_lenient_number(
        &self,
        row: &[String],
        column: InventoryColumn,
        row_number: usize,
        non_negative: bool,
        violations: &mut Vec<DqViolation>,
    ) -> Option<f64> {
        let field = column.header();
        let result = self
            .get_optional_number(row, column, row_number)
            .and_then(|value| {
                value
                    .map(|v| {
                        if non_negative {
                            self.cleaner.validate_non_negative(v, row_number, field)
                        } else {
                            self.cleaner.validate_finite(v, row_number, field)
                        }
                    })
                    .transpose()
            });

        match result {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("第 {} 行字段 '{}' 无效，按空值处理: {}", row_number, field, err);
                violations.push(DqViolation {
                    row_number,
                    field: field.to_string(),
                    message: err.to_string(),
                    action: DqAction::FieldCleared,
                });
                None
            }
        }
    }

    /// 必填非负数值
    fn get_required_amount(
        &self,
        row: &[String],
        column: InventoryColumn,
        row_number: usize,
    ) -> ImportResult<f64> {
        let value = self
            .get_optional_number(row, column, row_number)?
            .ok_or_else(|| ImportError::RequiredFieldEmpty {
                row: row_number,
                field: column.header().to_string(),
            })?;
        self.cleaner
            .validate_non_negative(value, row_number, column.header())
    }
}

impl RecordMapper for FieldMapper {
    fn map_row(
        &self,
        row: &[String],
        row_number: usize,
        violations: &mut Vec<DqViolation>,
    ) -> ImportResult<InventoryRecord> {
        let item_id = self.get_identifier(row, InventoryColumn::Item);
        if item_id.is_empty() {
            return Err(ImportError::RequiredFieldEmpty {
                row: row_number,
                field: InventoryColumn::Item.header().to_string(),
            });
        }

        // 必需列先校验：整行跳过时不记录可选列问题
        let months_since_received =
            self.get_required_amount(row, InventoryColumn::MonthsSinceReceived, row_number)?;
        let value = self.get_required_amount(row, InventoryColumn::Value, row_number)?;

        let quantity_on_hand = self.get_lenient_number(
            row,
            InventoryColumn::QuantityOnHand,
            row_number,
            true,
            violations,
        );
        let monthly_sales_12mo = self.get_lenient_number(
            row,
            InventoryColumn::MonthlySales12mo,
            row_number,
            false,
            violations,
        );

        Ok(InventoryRecord {
            item_id,
            warehouse_id: self.get_identifier(row, InventoryColumn::WarehouseId),
            superclass: self.get_identifier(row, InventoryColumn::Superclass),
            months_since_received,
            expired: self.get_identifier(row, InventoryColumn::Expired),
            expires_next_month: self.get_identifier(row, InventoryColumn::ExpiresNextMonth),
            value,
            quantity_on_hand,
            location: self.get_optional_string(row, InventoryColumn::Location),
            shelf_life: self.get_optional_string(row, InventoryColumn::ShelfLife),
            monthly_sales_12mo,
            row_number,
        })
    }
}
