// ==========================================
// 过期库存管理看板 - 看板 API
// ==========================================
// 职责: 过滤 → 派生字段 → 聚合 → KPI，组装完整报表
// 视图边界: 每个视图独立构建，ApiError 在视图边界转换为 Notice
//           单个视图失败不影响其他视图
// ==========================================

use std::sync::Arc;

use crate::api::dto::{
    DashboardReport, DetailRow, ExpiringItemStat, ExpirySalesStat, Notice, ProblemItemStat,
    SuperclassValueStat, TimeBucketStat, ViewKind, ViewOutcome, WarehouseExpiredStat,
};
use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::domain::{Dataset, FilterOptions, FilterSelection, InventoryColumn};
use crate::engine::{
    enrich, Aggregator, EnrichedRecord, FilterEngine, GroupKey, GroupValue, KpiCalculator,
    KpiSummary, Measure, Reduction,
};
use crate::i18n::{t, t_with_args};

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 持有只读数据集与配置；每次 `build_report` 都基于同一份数据重新计算，
/// 不缓存中间结果。
pub struct DashboardApi {
    dataset: Arc<Dataset>,
    config: DashboardConfig,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 返回
    /// - Err(ApiError::EmptyDataset): 数据集没有任何行
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> ApiResult<Self> {
        if dataset.is_empty() {
            return Err(ApiError::EmptyDataset(dataset.source().to_string()));
        }
        Ok(Self { dataset, config })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// 过滤可选项（始终来自全量数据）
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(self.dataset.records())
    }

    /// 默认过滤条件（全选）
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::select_all(&self.filter_options())
    }

    /// 仅计算 KPI
    pub fn kpis(&self, selection: &FilterSelection) -> ApiResult<KpiSummary> {
        validate_selection(selection)?;
        let (all, filtered) = self.enrich_both(selection);
        Ok(KpiCalculator::compute(&all, &filtered, &self.config.true_label))
    }

    /// 构建完整报表
    ///
    /// # 返回
    /// - Err(ApiError::InvalidInput): 月数区间非法
    /// - Ok(DashboardReport): 各视图结果（正常 / 无数据 / 降级）
    pub fn build_report(&self, selection: &FilterSelection) -> ApiResult<DashboardReport> {
        validate_selection(selection)?;
        tracing::debug!(?selection, "构建报表");

        let (all, filtered) = self.enrich_both(selection);
        let true_label = self.config.true_label.as_str();

        tracing::info!(
            total = all.len(),
            filtered = filtered.len(),
            "过滤完成"
        );

        let report = DashboardReport {
            source: self.dataset.source().to_string(),
            loaded_at: self.dataset.loaded_at().to_rfc3339(),
            generated_at: chrono::Local::now().to_rfc3339(),
            total_rows: all.len(),
            filtered_rows: filtered.len(),
            selection: selection.clone(),
            kpis: KpiCalculator::compute(&all, &filtered, true_label),
            expiring_items: into_outcome(
                ViewKind::ExpiringItems,
                self.build_expiring_items(&filtered),
            ),
            superclass_values: into_outcome(
                ViewKind::SuperclassValues,
                self.build_superclass_values(&filtered),
            ),
            problem_items: into_outcome(ViewKind::ProblemItems, self.build_problem_items(&filtered)),
            warehouse_expired: into_outcome(
                ViewKind::WarehouseExpired,
                self.build_warehouse_expired(&all),
            ),
            expiry_sales: into_outcome(ViewKind::ExpirySales, self.build_expiry_sales(&filtered)),
            time_buckets: into_outcome(ViewKind::TimeBuckets, self.build_time_buckets(&filtered)),
            missing_shelf_life: into_outcome(
                ViewKind::MissingShelfLife,
                self.build_missing_shelf_life(),
            ),
            detail: into_outcome(ViewKind::Detail, self.build_detail(&filtered)),
            data_quality: self.dataset.violations().to_vec(),
        };

        Ok(report)
    }

    // ==========================================
    // 内部: 派生字段
    // ==========================================

    /// 全量与过滤后数据分别独立计算派生字段
    fn enrich_both(&self, selection: &FilterSelection) -> (Vec<EnrichedRecord<'_>>, Vec<EnrichedRecord<'_>>) {
        let true_label = self.config.true_label.as_str();
        let shelf_life_tracked = self.dataset.schema().has(InventoryColumn::ShelfLife);
        let records = self.dataset.records();

        let all = enrich(records, true_label, shelf_life_tracked);
        let filtered = enrich(
            FilterEngine::apply(records, selection),
            true_label,
            shelf_life_tracked,
        );
        (all, filtered)
    }

    fn require_columns(&self, columns: &[InventoryColumn]) -> ApiResult<()> {
        let missing = self.dataset.schema().missing(columns);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::MissingColumns(missing))
        }
    }

    // ==========================================
    // 内部: 各视图
    // ==========================================

    /// 下月过期物料：按 物料/仓库/库位 汇总金额与数量，金额降序
    ///
    /// 无下月过期物料时给出成功提示，优先于缺列降级
    fn build_expiring_items(&self, filtered: &[EnrichedRecord<'_>]) -> ApiResult<Vec<ExpiringItemStat>> {
        let true_label = self.config.true_label.as_str();
        let expiring: Vec<EnrichedRecord<'_>> = filtered
            .iter()
            .filter(|r| r.record.expires_next_month(true_label))
            .copied()
            .collect();
        if expiring.is_empty() {
            return Err(ApiError::EmptyResult);
        }
        self.require_columns(&[InventoryColumn::QuantityOnHand, InventoryColumn::Location])?;

        let view = Aggregator::group_by(
            &expiring,
            &[GroupKey::Item, GroupKey::Warehouse, GroupKey::Location],
            &[
                Reduction::sum("value", Measure::Value),
                Reduction::sum("quantity_on_hand", Measure::QuantityOnHand),
            ],
        )
        .sort_desc_by("value");

        Ok(view
            .rows
            .iter()
            .map(|row| ExpiringItemStat {
                item_id: key_text(&row.key, 0),
                warehouse_id: key_text(&row.key, 1),
                location: key_text(&row.key, 2),
                value: view.value(row, "value").unwrap_or(0.0),
                quantity_on_hand: view.value(row, "quantity_on_hand").unwrap_or(0.0),
            })
            .collect())
    }

    /// 品类库存金额 vs 过期金额，按库存金额降序
    fn build_superclass_values(
        &self,
        filtered: &[EnrichedRecord<'_>],
    ) -> ApiResult<Vec<SuperclassValueStat>> {
        if filtered.is_empty() {
            return Err(ApiError::EmptyResult);
        }

        let view = Aggregator::group_by(
            filtered,
            &[GroupKey::Superclass],
            &[
                Reduction::sum("total_value", Measure::Value),
                Reduction::sum("expired_value", Measure::ExpiredValue),
            ],
        )
        .sort_desc_by("total_value");

        Ok(view
            .rows
            .iter()
            .map(|row| SuperclassValueStat {
                superclass: key_text(&row.key, 0),
                total_value: view.value(row, "total_value").unwrap_or(0.0),
                expired_value: view.value(row, "expired_value").unwrap_or(0.0),
            })
            .collect())
    }

    /// 过期金额前 N 的物料，占比相对于所列前 N 项合计
    fn build_problem_items(&self, filtered: &[EnrichedRecord<'_>]) -> ApiResult<Vec<ProblemItemStat>> {
        let true_label = self.config.true_label.as_str();
        let expired: Vec<EnrichedRecord<'_>> = filtered
            .iter()
            .filter(|r| r.record.is_expired(true_label))
            .copied()
            .collect();
        if expired.is_empty() {
            return Err(ApiError::EmptyResult);
        }

        let view = Aggregator::group_by(
            &expired,
            &[GroupKey::Item],
            &[Reduction::sum("expired_value", Measure::ExpiredValue)],
        )
        .sort_desc_by("expired_value")
        .top_n(self.config.top_n)
        .with_percentage("expired_value");

        Ok(view
            .rows
            .iter()
            .map(|row| ProblemItemStat {
                item_id: key_text(&row.key, 0),
                expired_value: view.value(row, "expired_value").unwrap_or(0.0),
                percentage: row.percentage.unwrap_or(0.0),
            })
            .collect())
    }

    /// 各仓库过期金额（全量数据），降序
    fn build_warehouse_expired(&self, all: &[EnrichedRecord<'_>]) -> ApiResult<Vec<WarehouseExpiredStat>> {
        if all.is_empty() {
            return Err(ApiError::EmptyResult);
        }

        let view = Aggregator::group_by(
            all,
            &[GroupKey::Warehouse],
            &[Reduction::sum("expired_value", Measure::ExpiredValue)],
        )
        .sort_desc_by("expired_value");

        Ok(view
            .rows
            .iter()
            .map(|row| WarehouseExpiredStat {
                warehouse_id: key_text(&row.key, 0),
                expired_value: view.value(row, "expired_value").unwrap_or(0.0),
            })
            .collect())
    }

    /// 按过期标记的 12 个月平均销量
    fn build_expiry_sales(&self, filtered: &[EnrichedRecord<'_>]) -> ApiResult<Vec<ExpirySalesStat>> {
        self.require_columns(&[InventoryColumn::MonthlySales12mo])?;
        if filtered.is_empty() {
            return Err(ApiError::EmptyResult);
        }

        let view = Aggregator::group_by(
            filtered,
            &[GroupKey::Expired],
            &[
                Reduction::mean("average_sales", Measure::MonthlySales12mo),
                Reduction::count("count"),
            ],
        );

        Ok(view
            .rows
            .iter()
            .map(|row| ExpirySalesStat {
                expired: key_text(&row.key, 0),
                average_sales: view.value(row, "average_sales").unwrap_or(0.0),
                count: view.value(row, "count").unwrap_or(0.0) as usize,
            })
            .collect())
    }

    /// 入库时长分布：固定四行
    fn build_time_buckets(&self, filtered: &[EnrichedRecord<'_>]) -> ApiResult<Vec<TimeBucketStat>> {
        let view = Aggregator::time_bucket_distribution(filtered);

        view.rows
            .iter()
            .map(|row| match row.key.first() {
                Some(GroupValue::Bucket(bucket)) => Ok(TimeBucketStat {
                    bucket: *bucket,
                    count: view.value(row, "count").unwrap_or(0.0) as usize,
                    percentage: row.percentage.unwrap_or(0.0),
                }),
                other => Err(ApiError::InternalError(format!(
                    "入库时长分组键异常: {:?}",
                    other
                ))),
            })
            .collect()
    }

    /// 缺少保质期的物料（全量数据，按首次出现顺序去重）
    fn build_missing_shelf_life(&self) -> ApiResult<Vec<String>> {
        self.require_columns(&[InventoryColumn::ShelfLife])?;

        let mut items: Vec<String> = Vec::new();
        for record in self.dataset.records() {
            if record.is_missing_shelf_life() && !items.contains(&record.item_id) {
                items.push(record.item_id.clone());
            }
        }

        if items.is_empty() {
            return Err(ApiError::EmptyResult);
        }
        Ok(items)
    }

    /// 明细数据
    fn build_detail(&self, filtered: &[EnrichedRecord<'_>]) -> ApiResult<Vec<DetailRow>> {
        if filtered.is_empty() {
            return Err(ApiError::EmptyResult);
        }

        Ok(filtered
            .iter()
            .map(|r| {
                let record = r.record;
                DetailRow {
                    row_number: record.row_number,
                    item_id: record.item_id.clone(),
                    warehouse_id: record.warehouse_id.clone(),
                    superclass: record.superclass.clone(),
                    months_since_received: record.months_since_received,
                    time_bucket: r.time_bucket,
                    expired: record.expired.clone(),
                    expires_next_month: record.expires_next_month.clone(),
                    value: record.value,
                    expired_value: r.expired_value,
                    quantity_on_hand: record.quantity_on_hand,
                    location: record.location.clone(),
                    shelf_life: record.shelf_life.clone(),
                    monthly_sales_12mo: record.monthly_sales_12mo,
                    highlight: r.highlight,
                }
            })
            .collect())
    }
}

// ==========================================
// 视图边界
// ==========================================

fn validate_selection(selection: &FilterSelection) -> ApiResult<()> {
    let range = selection.months;
    if range.min.is_nan() || range.max.is_nan() {
        return Err(ApiError::InvalidInput("月数区间不能为 NaN".to_string()));
    }
    if range.min > range.max {
        return Err(ApiError::InvalidInput(format!(
            "月数区间下限 {} 大于上限 {}",
            range.min, range.max
        )));
    }
    Ok(())
}

fn key_text(key: &[GroupValue], idx: usize) -> String {
    key.get(idx).map(|v| v.as_text().to_string()).unwrap_or_default()
}

/// 将视图构建结果转换为 ViewOutcome
fn into_outcome<T>(kind: ViewKind, result: ApiResult<Vec<T>>) -> ViewOutcome<Vec<T>> {
    match result {
        Ok(rows) => ViewOutcome::Ready(rows),
        Err(ApiError::EmptyResult) => {
            tracing::debug!(view = %kind, "视图无数据");
            ViewOutcome::Empty(empty_notice(kind))
        }
        Err(err) => {
            tracing::warn!(view = %kind, error = %err, "视图降级");
            ViewOutcome::Degraded(degraded_notice(kind, &err))
        }
    }
}

fn empty_notice(kind: ViewKind) -> Notice {
    match kind {
        ViewKind::ExpiringItems => Notice::success(t("notice.no_expiring_items")),
        ViewKind::MissingShelfLife => Notice::success(t("notice.all_shelf_life_present")),
        ViewKind::Detail => Notice::warning(t("notice.no_data")),
        _ => Notice::info(t("notice.no_data")),
    }
}

fn degraded_notice(kind: ViewKind, err: &ApiError) -> Notice {
    let fields = err.missing_fields().to_vec();
    if fields.is_empty() {
        let reason = err.to_string();
        return Notice::error(t_with_args("notice.view_failed", &[("reason", reason.as_str())]));
    }

    let message = match kind {
        ViewKind::ExpirySales => t_with_args(
            "notice.missing_sales_column",
            &[("field", InventoryColumn::MonthlySales12mo.header())],
        ),
        ViewKind::MissingShelfLife => t_with_args(
            "notice.missing_shelf_life_column",
            &[("field", InventoryColumn::ShelfLife.header())],
        ),
        _ => t_with_args("notice.missing_columns", &[("fields", fields.join(", ").as_str())]),
    };
    Notice::warning(message).with_missing_fields(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::NoticeKind;
    use crate::domain::{DatasetSchema, InventoryRecord, TimeBucket};

    fn record(
        item: &str,
        warehouse: &str,
        months: f64,
        expired: &str,
        enm: &str,
        value: f64,
    ) -> InventoryRecord {
        InventoryRecord {
            item_id: item.to_string(),
            warehouse_id: warehouse.to_string(),
            superclass: "CatA".to_string(),
            months_since_received: months,
            expired: expired.to_string(),
            expires_next_month: enm.to_string(),
            value,
            quantity_on_hand: Some(2.0),
            location: Some("L1".to_string()),
            shelf_life: Some("12".to_string()),
            monthly_sales_12mo: Some(10.0),
            row_number: 2,
        }
    }

    fn api_with(records: Vec<InventoryRecord>, schema: DatasetSchema) -> DashboardApi {
        let dataset = Dataset::new(records, schema, "memory");
        DashboardApi::new(Arc::new(dataset), DashboardConfig::default()).unwrap()
    }

    fn sample() -> Vec<InventoryRecord> {
        vec![
            record("A", "W1", 5.0, "N", "Y", 100.0),
            record("B", "W1", 40.0, "Y", "N", 50.0),
            record("C", "W2", 13.0, "Y", "N", 200.0),
        ]
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let dataset = Dataset::new(Vec::new(), DatasetSchema::full(), "empty.csv");
        let result = DashboardApi::new(Arc::new(dataset), DashboardConfig::default());
        assert!(matches!(result, Err(ApiError::EmptyDataset(_))));
    }

    #[test]
    fn test_build_report_w1() {
        let api = api_with(sample(), DatasetSchema::full());
        let selection = api.default_selection().with_warehouses(["W1"]);

        let report = api.build_report(&selection).unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.filtered_rows, 2);
        assert_eq!(report.kpis.expired_value_filtered, 50.0);
        assert_eq!(report.kpis.expired_value_all, 250.0);
        assert_eq!(api.kpis(&selection).unwrap(), report.kpis);

        let buckets = report.time_buckets.data().unwrap();
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1]);
        assert_eq!(buckets[0].bucket, TimeBucket::UnderOneYear);

        // 仓库视图基于全量数据
        let warehouses = report.warehouse_expired.data().unwrap();
        assert_eq!(warehouses[0].warehouse_id, "W2");
        assert_eq!(warehouses[0].expired_value, 200.0);
    }

    #[test]
    fn test_empty_selection_yields_notices() {
        let api = api_with(sample(), DatasetSchema::full());
        let selection = api.default_selection().with_warehouses(Vec::<String>::new());

        let report = api.build_report(&selection).unwrap();

        assert_eq!(report.filtered_rows, 0);
        assert_eq!(report.kpis.total_value_filtered, 0.0);
        assert!(matches!(report.detail, ViewOutcome::Empty(_)));
        assert!(matches!(report.superclass_values, ViewOutcome::Empty(_)));
        // 分布视图仍为四行
        assert_eq!(report.time_buckets.data().map(|d| d.len()), Some(4));
    }

    #[test]
    fn test_missing_sales_column_degrades_one_view() {
        let schema = DatasetSchema::with_columns(&[
            InventoryColumn::Item,
            InventoryColumn::WarehouseId,
            InventoryColumn::Superclass,
            InventoryColumn::MonthsSinceReceived,
            InventoryColumn::Expired,
            InventoryColumn::ExpiresNextMonth,
            InventoryColumn::Value,
            InventoryColumn::QuantityOnHand,
            InventoryColumn::Location,
            InventoryColumn::ShelfLife,
        ]);
        let api = api_with(sample(), schema);

        let report = api.build_report(&api.default_selection()).unwrap();

        match &report.expiry_sales {
            ViewOutcome::Degraded(notice) => {
                assert_eq!(notice.kind, NoticeKind::Warning);
                assert_eq!(notice.missing_fields, vec!["12 months sales".to_string()]);
            }
            other => panic!("Expected Degraded, got {:?}", other),
        }
        assert!(report.superclass_values.is_ready());
        assert!(report.problem_items.is_ready());
        assert!(report.warehouse_expired.is_ready());
        assert!(report.time_buckets.is_ready());
        assert!(report.detail.is_ready());
    }

    #[test]
    fn test_problem_items_top_n_percentage() {
        let api = api_with(sample(), DatasetSchema::full());
        let report = api.build_report(&api.default_selection()).unwrap();

        let items = report.problem_items.data().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_id, "C");
        let total: f64 = items.iter().map(|i| i.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_expiring_items_and_distinct_kpi() {
        let mut records = sample();
        records.push(record("A", "W1", 6.0, "N", "Y", 30.0));
        let api = api_with(records, DatasetSchema::full());

        let report = api.build_report(&api.default_selection()).unwrap();

        assert_eq!(report.kpis.items_expiring_next_month, 1);
        let items = report.expiring_items.data().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, 130.0);
        assert_eq!(items[0].quantity_on_hand, 4.0);
    }

    #[test]
    fn test_invalid_months_range() {
        let api = api_with(sample(), DatasetSchema::full());
        let selection = api.default_selection().with_months(10.0, 5.0);
        assert!(matches!(
            api.build_report(&selection),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_shelf_life_view() {
        let mut records = sample();
        records[1].shelf_life = None;
        records.push({
            let mut r = record("B", "W2", 1.0, "N", "N", 1.0);
            r.shelf_life = None;
            r
        });
        let api = api_with(records, DatasetSchema::full());

        let report = api.build_report(&api.default_selection()).unwrap();
        assert_eq!(report.missing_shelf_life.data(), Some(&vec!["B".to_string()]));

        let api = api_with(sample(), DatasetSchema::full());
        let report = api.build_report(&api.default_selection()).unwrap();
        match report.missing_shelf_life {
            ViewOutcome::Empty(notice) => assert_eq!(notice.kind, NoticeKind::Success),
            other => panic!("Expected Empty, got {:?}", other),
        }
    }
}
