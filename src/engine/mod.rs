// ==========================================
// 过期库存管理看板 - 引擎层
// ==========================================
// 管道: 过滤 → 派生字段 → 聚合 → KPI
// 红线: 纯函数，无 I/O，无共享可变状态
// ==========================================

pub mod aggregator;
pub mod derivation;
pub mod filter_engine;
pub mod kpi;

// 重导出核心类型
pub use aggregator::{
    AggregateRow, AggregateView, Aggregator, GroupKey, GroupValue, Measure, ReduceOp, Reduction,
};
pub use derivation::{classify_row, enrich, expired_value, EnrichedRecord};
pub use filter_engine::{FilterEngine, FilterPredicate};
pub use kpi::{KpiCalculator, KpiSummary};
