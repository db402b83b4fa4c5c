// ==========================================
// 过期库存管理看板 - KPI 计算
// ==========================================
// 五项指标:
// 1. 全公司过期金额（全量数据）
// 2. 过滤后过期金额
// 3. 过滤后库存总额
// 4. 下月过期物料数（过滤后，按 item 去重）
// 5. 最大入库月数（过滤后；无数据为 None）
// ==========================================

use crate::engine::derivation::EnrichedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub expired_value_all: f64,
    pub expired_value_filtered: f64,
    pub total_value_filtered: f64,
    pub items_expiring_next_month: usize,
    pub max_months_since_received: Option<f64>,
}

pub struct KpiCalculator;

impl KpiCalculator {
    /// 计算 KPI
    ///
    /// # 参数
    /// - all: 全量数据（独立计算的派生字段）
    /// - filtered: 过滤后数据
    /// - true_label: 标记真值
    pub fn compute(
        all: &[EnrichedRecord<'_>],
        filtered: &[EnrichedRecord<'_>],
        true_label: &str,
    ) -> KpiSummary {
        let expiring_items: HashSet<&str> = filtered
            .iter()
            .filter(|r| r.record.expires_next_month(true_label))
            .map(|r| r.record.item_id.as_str())
            .collect();

        let max_months = filtered
            .iter()
            .map(|r| r.record.months_since_received)
            .fold(None, |acc: Option<f64>, m| Some(acc.map_or(m, |v| v.max(m))));

        KpiSummary {
            expired_value_all: all.iter().map(|r| r.expired_value).sum(),
            expired_value_filtered: filtered.iter().map(|r| r.expired_value).sum(),
            total_value_filtered: filtered.iter().map(|r| r.record.value).sum(),
            items_expiring_next_month: expiring_items.len(),
            max_months_since_received: max_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InventoryRecord;
    use crate::engine::derivation::enrich;

    fn record(item: &str, months: f64, expired: &str, enm: &str, value: f64) -> InventoryRecord {
        InventoryRecord {
            item_id: item.to_string(),
            warehouse_id: "W1".to_string(),
            superclass: "CatA".to_string(),
            months_since_received: months,
            expired: expired.to_string(),
            expires_next_month: enm.to_string(),
            value,
            quantity_on_hand: None,
            location: None,
            shelf_life: None,
            monthly_sales_12mo: None,
            row_number: 2,
        }
    }

    #[test]
    fn test_kpi_basic() {
        let records = vec![
            record("A", 5.0, "N", "Y", 100.0),
            record("A", 7.0, "N", "Y", 10.0),
            record("B", 40.0, "Y", "N", 50.0),
            record("C", 13.0, "Y", "Y", 200.0),
        ];
        let all = enrich(&records, "Y", false);
        let filtered = enrich(&records[..3], "Y", false);

        let kpi = KpiCalculator::compute(&all, &filtered, "Y");

        assert_eq!(kpi.expired_value_all, 250.0);
        assert_eq!(kpi.expired_value_filtered, 50.0);
        assert_eq!(kpi.total_value_filtered, 160.0);
        // A 出现两次，只计一次
        assert_eq!(kpi.items_expiring_next_month, 1);
        assert_eq!(kpi.max_months_since_received, Some(40.0));
    }

    #[test]
    fn test_kpi_empty_filtered() {
        let records = vec![record("A", 5.0, "Y", "Y", 100.0)];
        let all = enrich(&records, "Y", false);

        let kpi = KpiCalculator::compute(&all, &[], "Y");

        assert_eq!(kpi.expired_value_all, 100.0);
        assert_eq!(kpi.expired_value_filtered, 0.0);
        assert_eq!(kpi.total_value_filtered, 0.0);
        assert_eq!(kpi.items_expiring_next_month, 0);
        assert_eq!(kpi.max_months_since_received, None);
    }
}
