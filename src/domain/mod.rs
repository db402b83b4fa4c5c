// ==========================================
// 过期库存管理看板 - 领域模型层
// ==========================================
// 职责: 定义库存记录、数据集、过滤条件、领域类型
// 红线: 不含文件读取逻辑,不含过滤/聚合引擎逻辑
// ==========================================

pub mod dataset;
pub mod filter;
pub mod record;
pub mod types;

// 重导出核心类型
pub use dataset::{Dataset, DatasetSchema, DqAction, DqViolation};
pub use filter::{FilterOptions, FilterSelection, MonthsRange};
pub use record::InventoryRecord;
pub use types::{InventoryColumn, RowHighlight, TimeBucket};
