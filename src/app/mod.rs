// ==========================================
// 过期库存管理看板 - 应用层
// ==========================================
// 职责: 命令行参数、应用状态、文本渲染
// ==========================================

pub mod cli;
pub mod render;
pub mod state;

// 重导出
pub use cli::{Cli, OutputFormat};
pub use render::{format_currency, render_error, render_options, render_report};
pub use state::{load_dataset, AppState};
