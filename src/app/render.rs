// ==========================================
// 过期库存管理看板 - 文本渲染
// ==========================================
// 职责: 报表 → 终端文本（KPI / 表格 / 图表序列 / 提示）
// 说明: 图表以表格形式输出，不做图形渲染
// ==========================================

use std::fmt::Write;

use crate::api::{ApiError, DashboardReport, Notice, NoticeKind, ViewKind, ViewOutcome};
use crate::config::DashboardConfig;
use crate::domain::{FilterOptions, RowHighlight};
use crate::i18n::{t, t_with_args};
use crate::importer::ImportError;

/// 货币格式: $1,234.56
pub fn format_currency(value: f64, symbol: &str) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    format!("{}{}{}.{:02}", sign, symbol, group_thousands(whole), frac)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// 简单等宽表格
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&table_line(headers, &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(|s| s.as_str()).collect();
        out.push_str(&table_line(&cells, &widths));
        out.push('\n');
    }
    out
}

fn table_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Info => "[i]",
        NoticeKind::Success => "[ok]",
        NoticeKind::Warning => "[!]",
        NoticeKind::Error => "[x]",
    };
    format!("{} {}\n", tag, notice.message)
}

fn section<T, F>(out: &mut String, title: &str, outcome: &ViewOutcome<T>, body: F)
where
    F: FnOnce(&T) -> String,
{
    let _ = writeln!(out, "\n== {} ==", title);
    match outcome {
        ViewOutcome::Ready(data) => out.push_str(&body(data)),
        ViewOutcome::Empty(notice) | ViewOutcome::Degraded(notice) => {
            out.push_str(&notice_line(notice))
        }
    }
}

fn highlight_marker(highlight: RowHighlight) -> &'static str {
    match highlight {
        RowHighlight::MissingShelfLife => "?",
        RowHighlight::Expired => "!",
        RowHighlight::Normal => "",
    }
}

/// 渲染完整报表
pub fn render_report(report: &DashboardReport, config: &DashboardConfig) -> String {
    let money = |v: f64| format_currency(v, &config.currency_symbol);
    let mut out = String::new();

    let _ = writeln!(out, "{}", t("report.title"));
    let _ = writeln!(out, "{}: {}", t("report.source"), report.source);
    let _ = writeln!(out, "{}: {}", t("report.loaded_at"), report.loaded_at);
    let _ = writeln!(
        out,
        "{}: {} / {}",
        t("report.rows"),
        report.filtered_rows,
        report.total_rows
    );

    // KPI
    let kpis = &report.kpis;
    let _ = writeln!(out, "\n== {} ==", t("report.kpis"));
    let max_months = kpis
        .max_months_since_received
        .map(format_number)
        .unwrap_or_else(|| t("report.none"));
    let kpi_lines = [
        (t("report.expired_value_all"), money(kpis.expired_value_all)),
        (t("report.expired_value_filtered"), money(kpis.expired_value_filtered)),
        (t("report.total_value_filtered"), money(kpis.total_value_filtered)),
        (
            t("report.items_expiring_next_month"),
            kpis.items_expiring_next_month.to_string(),
        ),
        (t("report.max_months_since_received"), max_months),
    ];
    for (label, value) in kpi_lines {
        let _ = writeln!(out, "{}: {}", label, value);
    }

    section(
        &mut out,
        &t(ViewKind::ExpiringItems.title_key()),
        &report.expiring_items,
        |items| {
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|i| {
                    vec![
                        i.item_id.clone(),
                        i.warehouse_id.clone(),
                        i.location.clone(),
                        money(i.value),
                        format_number(i.quantity_on_hand),
                    ]
                })
                .collect();
            table(&["Item", "Warehouse ID", "Location", "Value", "Quantity on Hand"], &rows)
        },
    );

    section(
        &mut out,
        &t(ViewKind::SuperclassValues.title_key()),
        &report.superclass_values,
        |stats| {
            let rows: Vec<Vec<String>> = stats
                .iter()
                .map(|s| vec![s.superclass.clone(), money(s.total_value), money(s.expired_value)])
                .collect();
            table(&["Superclass", "Total Value", "Expired Value"], &rows)
        },
    );

    section(
        &mut out,
        &t_with_args(
            ViewKind::ProblemItems.title_key(),
            &[("n", config.top_n.to_string().as_str())],
        ),
        &report.problem_items,
        |items| {
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|i| {
                    vec![
                        i.item_id.clone(),
                        money(i.expired_value),
                        format!("{:.1}%", i.percentage),
                    ]
                })
                .collect();
            table(&["Item", "Expired Value", "Share"], &rows)
        },
    );

    section(
        &mut out,
        &t(ViewKind::WarehouseExpired.title_key()),
        &report.warehouse_expired,
        |stats| {
            let rows: Vec<Vec<String>> = stats
                .iter()
                .map(|s| vec![s.warehouse_id.clone(), money(s.expired_value)])
                .collect();
            table(&["Warehouse ID", "Expired Value"], &rows)
        },
    );

    section(
        &mut out,
        &t(ViewKind::ExpirySales.title_key()),
        &report.expiry_sales,
        |stats| {
            let rows: Vec<Vec<String>> = stats
                .iter()
                .map(|s| vec![s.expired.clone(), format!("{:.2}", s.average_sales), s.count.to_string()])
                .collect();
            table(&["Expired", "Avg 12 months sales", "Count"], &rows)
        },
    );

    section(
        &mut out,
        &t(ViewKind::TimeBuckets.title_key()),
        &report.time_buckets,
        |stats| {
            let rows: Vec<Vec<String>> = stats
                .iter()
                .map(|s| {
                    vec![
                        s.bucket.label().to_string(),
                        s.count.to_string(),
                        format!("{:.1}%", s.percentage),
                    ]
                })
                .collect();
            table(&["Time Bucket", "Count", "Share"], &rows)
        },
    );

    section(
        &mut out,
        &t(ViewKind::MissingShelfLife.title_key()),
        &report.missing_shelf_life,
        |items| {
            let rows: Vec<Vec<String>> = items.iter().map(|i| vec![i.clone()]).collect();
            table(&["Item"], &rows)
        },
    );

    section(
        &mut out,
        &t(ViewKind::Detail.title_key()),
        &report.detail,
        |rows| {
            let rows: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        highlight_marker(r.highlight).to_string(),
                        r.item_id.clone(),
                        r.warehouse_id.clone(),
                        r.superclass.clone(),
                        format_number(r.months_since_received),
                        r.expired.clone(),
                        r.expires_next_month.clone(),
                        money(r.value),
                        money(r.expired_value),
                        r.shelf_life.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            table(
                &[
                    "",
                    "Item",
                    "Warehouse ID",
                    "Superclass",
                    "Months",
                    "Expired",
                    "Expires next month",
                    "Value",
                    "Expired Value",
                    "Shelf Life",
                ],
                &rows,
            )
        },
    );

    if !report.data_quality.is_empty() {
        let _ = writeln!(out, "\n== {} ==", t("report.data_quality"));
        let skipped = report.data_quality.iter().filter(|v| v.row_skipped()).count();
        let cleared = report.data_quality.len() - skipped;
        if skipped > 0 {
            let _ = writeln!(
                out,
                "{}",
                t_with_args("load.dq_skipped", &[("count", skipped.to_string().as_str())])
            );
        }
        if cleared > 0 {
            let _ = writeln!(
                out,
                "{}",
                t_with_args("load.dq_cleared", &[("count", cleared.to_string().as_str())])
            );
        }
        let rows: Vec<Vec<String>> = report
            .data_quality
            .iter()
            .map(|v| vec![v.row_number.to_string(), v.field.clone(), v.message.clone()])
            .collect();
        out.push_str(&table(&["Row", "Field", "Message"], &rows));
    }

    out
}

/// 致命错误对应的消息键
fn error_key(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<ImportError>() {
        Some(ImportError::EmptyDataset(_)) => "load.no_data",
        Some(_) => "load.failed",
        None => match err.downcast_ref::<ApiError>() {
            Some(ApiError::EmptyDataset(_)) => "load.no_data",
            _ => "run.failed",
        },
    }
}

/// 致命错误提示：空数据集 / 加载失败 / 其他运行错误
pub fn render_error(err: &anyhow::Error) -> String {
    let key = error_key(err);
    if key == "load.no_data" {
        let path = match (err.downcast_ref::<ImportError>(), err.downcast_ref::<ApiError>()) {
            (Some(ImportError::EmptyDataset(path)), _) | (_, Some(ApiError::EmptyDataset(path))) => {
                path.as_str()
            }
            _ => "",
        };
        return t_with_args(key, &[("path", path)]);
    }
    let reason = format!("{:#}", err);
    t_with_args(key, &[("reason", reason.as_str())])
}

/// 渲染过滤可选项
pub fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", t("report.filters"));
    let _ = writeln!(out, "Warehouse ID: {}", options.warehouses.join(", "));
    let _ = writeln!(out, "Superclass: {}", options.superclasses.join(", "));
    let _ = writeln!(
        out,
        "Months since received: {} - {}",
        options.months_min, options.months_max
    );
    let _ = writeln!(out, "Expired: {}", options.expired_labels.join(", "));
    let _ = writeln!(
        out,
        "Expires next month: {}",
        options.expires_next_month_labels.join(", ")
    );
    out
}
