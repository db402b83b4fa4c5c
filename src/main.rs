// ==========================================
// 过期库存管理看板 - 命令行入口
// ==========================================
// 流程: 参数 → 配置 → 语言 → 加载数据集 → 报表 → 输出
// 致命错误（加载失败/零行/参数或配置无效）: 输出一条错误并以非零码退出
// ==========================================

use std::process::ExitCode;

use clap::Parser;
use expiry_dashboard::app::{render_error, render_options, render_report, AppState, Cli, OutputFormat};
use expiry_dashboard::config::DashboardConfig;
use expiry_dashboard::i18n;
use expiry_dashboard::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    tracing::info!("{} v{}", expiry_dashboard::APP_NAME, expiry_dashboard::VERSION);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    i18n::set_locale(&config.locale);

    let state = AppState::new(config)?;
    let api = &state.dashboard_api;
    let options = api.filter_options();

    if cli.list_options {
        match cli.format {
            OutputFormat::Text => print!("{}", render_options(&options)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        }
        return Ok(());
    }

    let selection = cli.selection(&options);
    let report = api.build_report(&selection)?;

    match cli.format {
        OutputFormat::Text => print!("{}", render_report(&report, &state.config)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
