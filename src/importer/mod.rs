// ==========================================
// 过期库存管理看板 - 导入层
// ==========================================
// 职责: 外部文件 → 只读数据集
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod data_cleaner;
pub mod dataset_loader;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use column_resolver::ColumnResolver;
pub use data_cleaner::DataCleaner;
pub use dataset_loader::DatasetLoader;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, RawTable, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{DatasetSource, FileParser, RecordMapper};
