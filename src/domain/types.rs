// ==========================================
// 库存差异对比系统 - 领域类型定义
// ==========================================
// 依据: 标准字段表（五个逻辑列）
// 依据: 源文件格式（CSV / XLSX / XLS）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 逻辑字段 (Logical Field)
// ==========================================
// 红线: 仅识别这五个逻辑列，其余列全部丢弃
// 顺序: 即规范化后表格的列顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    ItemCode,         // 商品编码
    Description,      // 商品名称
    TheoreticalStock, // 理论库存
    PhysicalStock,    // 实盘库存
    Discrepancy,      // 差异（上游已计算）
}

impl LogicalField {
    /// 全部逻辑字段（按标准列顺序）
    pub const ALL: [LogicalField; 5] = [
        LogicalField::ItemCode,
        LogicalField::Description,
        LogicalField::TheoreticalStock,
        LogicalField::PhysicalStock,
        LogicalField::Discrepancy,
    ];

    /// 标准列名（输出报表与错误信息共用）
    pub fn canonical_label(&self) -> &'static str {
        match self {
            LogicalField::ItemCode => "Code article",
            LogicalField::Description => "Désignation",
            LogicalField::TheoreticalStock => "Stock théorique",
            LogicalField::PhysicalStock => "Stock physique",
            LogicalField::Discrepancy => "Ecart",
        }
    }

    /// 在 ALL 中的位置
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_label())
    }
}

// ==========================================
// 源文件格式 (Source Format)
// ==========================================
// 由文件名扩展名决定解析策略（大小写不敏感）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    /// 根据文件名推断格式
    ///
    /// # 返回
    /// - Some(SourceFormat): 受支持的扩展名
    /// - None: 无扩展名或不支持
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xlsx" => Some(SourceFormat::Xlsx),
            "xls" => Some(SourceFormat::Xls),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Xlsx => write!(f, "xlsx"),
            SourceFormat::Xls => write!(f, "xls"),
        }
    }
}
