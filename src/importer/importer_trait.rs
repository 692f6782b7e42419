// ==========================================
// 库存差异对比系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 列名清洗 → 列解析 → 投影 → 数值转换 → 过滤
// ==========================================

use crate::domain::inventory::CanonicalInventoryTable;
use crate::importer::column_resolver::ColumnMapping;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;

// ==========================================
// InventoryImporter Trait
// ==========================================
// 用途: 库存文件导入主接口
// 实现者: InventoryImporterImpl
pub trait InventoryImporter {
    /// 将一份命名的字节流解析为规范化库存表
    ///
    /// # 参数
    /// - file_name: 文件名（扩展名决定解析方式）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(CanonicalInventoryTable): 规范化库存表（可能为空表）
    /// - Err: UnsupportedFormat / UnparsableSource / SchemaMismatch
    fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<CanonicalInventoryTable>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    /// 解析字节流为原始表（首行为表头）
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 数据行（单元格均已渲染为文本）
    /// - Err: UnparsableSource
    fn parse_to_raw_table(&self, bytes: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// ColumnResolver Trait
// ==========================================
// 用途: 列解析接口（阶段 2）
// 实现者: ColumnResolverImpl
pub trait ColumnResolver {
    /// 将实际列名映射到五个逻辑字段
    ///
    /// # 参数
    /// - headers: 已清洗的列名（文件列顺序）
    ///
    /// # 返回
    /// - Ok(ColumnMapping): 映射
    /// - Err(SchemaMismatch): 缺失字段 + 全部列名
    fn resolve(&self, headers: &[String]) -> ImportResult<ColumnMapping>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 1、4、5）
// 实现者: DataCleanerImpl
pub trait DataCleaner {
    /// 清洗列名（NBSP → 空格 + TRIM）
    fn clean_header(&self, label: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None，否则 TRIM）
    fn normalize_null(&self, value: &str) -> Option<String>;

    /// 本地化数值文本 → 数值（无法解析 → None）
    fn coerce_numeric(&self, value: &str) -> Option<f64>;
}
