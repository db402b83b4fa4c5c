// ==========================================
// 过期库存管理看板 - 数据集加载器
// ==========================================
// 导入流程:
// 1. 文件读取与解析（CSV / Excel）
// 2. 列解析（大小写不敏感）+ 必需列校验
// 3. 字段映射与标准化（必需列失败 → 整行跳过；可选列失败 → 置空保留行；均记录 DQ）
// 4. 空数据集校验（零行即致命错误）
// ==========================================

use crate::domain::{Dataset, DqAction, DqViolation, InventoryColumn};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, RawTable, UniversalFileParser};
use crate::importer::importer_trait::{DatasetSource, FileParser, RecordMapper};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

pub struct DatasetLoader {
    parser: UniversalFileParser,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 从内存中的 CSV 加载（测试与管道输入使用）
    pub fn load_csv_reader<R: Read>(&self, reader: R, source: &str) -> ImportResult<Dataset> {
        let table = CsvParser.parse_reader(reader)?;
        build_dataset(table, source)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSource for DatasetLoader {
    fn load(&self, file_path: &Path) -> ImportResult<Dataset> {
        let start = Instant::now();
        let source = file_path.display().to_string();
        tracing::info!("开始加载数据集: {}", source);

        let table = self.parser.parse_to_raw_table(file_path)?;
        let dataset = build_dataset(table, &source)?;

        tracing::info!(
            "数据集加载完成: {} 行有效, {} 行跳过, 耗时 {} ms",
            dataset.len(),
            dataset.violations().iter().filter(|v| v.row_skipped()).count(),
            start.elapsed().as_millis()
        );
        Ok(dataset)
    }
}

fn build_dataset(table: RawTable, source: &str) -> ImportResult<Dataset> {
    let resolver = ColumnResolver::new(&table.headers);
    resolver.require(&InventoryColumn::REQUIRED)?;

    let schema = resolver.schema();
    for column in InventoryColumn::OPTIONAL {
        if !schema.has(column) {
            tracing::warn!("可选列缺失: '{}'，相关视图将降级显示", column.header());
        }
    }

    let mapper = FieldMapper::new(&resolver);
    let mut records = Vec::with_capacity(table.len());
    let mut violations = Vec::new();

    for (row_number, row) in &table.rows {
        match mapper.map_row(row, *row_number, &mut violations) {
            Ok(record) => records.push(record),
            Err(err) => {
                let field = err
                    .row_context()
                    .map(|(_, f)| f.to_string())
                    .unwrap_or_default();
                tracing::warn!("跳过第 {} 行: {}", row_number, err);
                violations.push(DqViolation {
                    row_number: *row_number,
                    field,
                    message: err.to_string(),
                    action: DqAction::RowSkipped,
                });
            }
        }
    }

    if records.is_empty() {
        return Err(ImportError::EmptyDataset(source.to_string()));
    }

    Ok(Dataset::new(records, schema, source).with_violations(violations))
}
