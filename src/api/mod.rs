// ==========================================
// 过期库存管理看板 - API 层
// ==========================================
// 职责: 提供看板查询接口，供命令行入口调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use dto::{
    DashboardReport, DetailRow, ExpiringItemStat, ExpirySalesStat, Notice, NoticeKind,
    ProblemItemStat, SuperclassValueStat, TimeBucketStat, ViewKind, ViewOutcome,
    WarehouseExpiredStat,
};
pub use error::{ApiError, ApiResult};
