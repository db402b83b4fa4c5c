// ==========================================
// 过期库存管理看板 - 库存记录实体
// ==========================================
// 职责: 定义源数据的一行（标准化之后）
// 红线: 不含过滤与聚合逻辑
// ==========================================

use serde::{Deserialize, Serialize};

/// 库存记录 (InventoryRecord)
///
/// 同一 item 可出现在多个仓库/库位，item_id 不唯一。
/// 标识类字段统一为去空白后的字符串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// 物料号
    pub item_id: String,

    /// 仓库 ID
    pub warehouse_id: String,

    /// 品类
    pub superclass: String,

    /// 入库月数
    pub months_since_received: f64,

    /// 过期标记（如 "Y"/"N"）
    pub expired: String,

    /// 下月过期标记（如 "Y"/"N"）
    pub expires_next_month: String,

    /// 库存金额
    pub value: f64,

    /// 在库数量（列缺失或单元格为空时为 None）
    pub quantity_on_hand: Option<f64>,

    /// 库位
    pub location: Option<String>,

    /// 保质期（原样保留，只关心是否为空）
    pub shelf_life: Option<String>,

    /// 近 12 个月销量
    pub monthly_sales_12mo: Option<f64>,

    /// 源文件行号（表头为第 1 行）
    pub row_number: usize,
}

impl InventoryRecord {
    /// 是否已过期
    pub fn is_expired(&self, true_label: &str) -> bool {
        self.expired == true_label
    }

    /// 是否下月过期
    pub fn expires_next_month(&self, true_label: &str) -> bool {
        self.expires_next_month == true_label
    }

    /// 是否缺少保质期
    pub fn is_missing_shelf_life(&self) -> bool {
        self.shelf_life.is_none()
    }
}
