// ==========================================
// 过期库存管理看板 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 列解析 → 字段映射/清洗 → 数据集
// ==========================================

use crate::domain::{Dataset, DqViolation, InventoryRecord};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    /// 解析文件为原始表（表头 + 行）
    ///
    /// # 返回
    /// - Ok(RawTable): 已去除首尾空白、跳过全空行
    /// - Err: 文件不存在、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// RecordMapper Trait
// ==========================================
// 用途: 行映射接口（阶段 1-2）
// 实现者: FieldMapper
pub trait RecordMapper {
    /// 将原始行映射为 InventoryRecord
    ///
    /// # 参数
    /// - row: 原始单元格（与表头按下标对应）
    /// - row_number: 源文件行号（用于 DQ 记录）
    /// - violations: 可选列的无效值追加到此处（行保留，字段按空值处理）
    ///
    /// # 返回
    /// - Err: 必需列无效，整行跳过
    fn map_row(
        &self,
        row: &[String],
        row_number: usize,
        violations: &mut Vec<DqViolation>,
    ) -> ImportResult<InventoryRecord>;
}

// ==========================================
// DatasetSource Trait
// ==========================================
// 用途: 数据集加载主接口
// 实现者: DatasetLoader
pub trait DatasetSource {
    /// 从文件加载数据集
    ///
    /// # 返回
    /// - Ok(Dataset): 至少包含一行有效记录
    /// - Err: 致命错误（文件/结构/空数据集）
    fn load(&self, file_path: &Path) -> ImportResult<Dataset>;
}
