// ==========================================
// 过期库存管理看板 - 列解析器
// ==========================================
// 职责: 源表头 → 规范列（大小写不敏感）
// 说明: 上游导出的列名大小写不稳定（如 "Quantity On Hand" / "LOCATION"），
//       加载时一次性建立折叠表，下游只使用 InventoryColumn
// ==========================================

use crate::domain::{DatasetSchema, InventoryColumn};
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

pub struct ColumnResolver {
    headers: Vec<String>,
    /// 折叠后的表头 → 下标（重复表头取第一次出现）
    folded: HashMap<String, usize>,
}

impl ColumnResolver {
    pub fn new(headers: &[String]) -> Self {
        let mut folded = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let key = fold(header);
            if folded.contains_key(&key) {
                tracing::warn!("重复表头 '{}'（第 {} 列），已忽略", header, idx + 1);
                continue;
            }
            folded.insert(key, idx);
        }

        Self {
            headers: headers.to_vec(),
            folded,
        }
    }

    /// 规范列在源表中的下标
    pub fn index_of(&self, column: InventoryColumn) -> Option<usize> {
        self.folded.get(&fold(column.header())).copied()
    }

    /// 校验必需列，缺失时返回全部缺失列名
    pub fn require(&self, columns: &[InventoryColumn]) -> ImportResult<()> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| self.index_of(**c).is_none())
            .map(|c| c.header().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns(missing))
        }
    }

    /// 生成数据集列信息
    pub fn schema(&self) -> DatasetSchema {
        let resolved = InventoryColumn::all()
            .filter_map(|c| self.index_of(c).map(|idx| (c, self.headers[idx].clone())))
            .collect();
        DatasetSchema::new(self.headers.clone(), resolved)
    }
}

fn fold(header: &str) -> String {
    header.trim().to_lowercase()
}
