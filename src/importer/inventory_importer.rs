// ==========================================
// 库存差异对比系统 - 库存文件导入器实现
// ==========================================
// 职责: 整合导入流程，从字节流到规范化库存表
// 流程: 解析 → 列名清洗 → 列解析 → 投影 → 数值转换 → 过滤空编码 → TRIM 编码
// ==========================================

use crate::config::ParseConfigReader;
use crate::domain::inventory::{CanonicalInventoryRow, CanonicalInventoryTable};
use crate::domain::types::LogicalField;
use crate::importer::column_resolver::{ColumnMapping, ColumnResolver as ColumnResolverImpl};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{CsvParser, RawTable, UniversalFileParser};
use crate::importer::importer_trait::{ColumnResolver, DataCleaner, InventoryImporter};
use tracing::{debug, info, instrument};

// ==========================================
// InventoryImporterImpl - 库存文件导入器实现
// ==========================================
pub struct InventoryImporterImpl {
    file_parser: UniversalFileParser,
    column_resolver: Box<dyn ColumnResolver>,
    data_cleaner: Box<dyn DataCleaner>,
}

impl InventoryImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - column_resolver: 列解析器
    /// - data_cleaner: 数据清洗器
    pub fn new(
        file_parser: UniversalFileParser,
        column_resolver: Box<dyn ColumnResolver>,
        data_cleaner: Box<dyn DataCleaner>,
    ) -> Self {
        Self {
            file_parser,
            column_resolver,
            data_cleaner,
        }
    }

    /// 按配置组装默认组件
    pub fn from_config<C: ParseConfigReader + ?Sized>(config: &C) -> Self {
        let csv = CsvParser {
            delimiter: config.csv_delimiter(),
            fallback_encoding: config.csv_encoding(),
        };
        Self::new(
            UniversalFileParser::new(csv),
            Box::new(ColumnResolverImpl),
            Box::new(DataCleanerImpl),
        )
    }

    /// 投影到五个逻辑字段并做类型转换
    ///
    /// item_code 为空的行返回 None
    fn project_row(&self, cells: &[String], mapping: &ColumnMapping) -> Option<CanonicalInventoryRow> {
        let cell = |field: LogicalField| cell_text(cells, mapping, field);

        let item_code = self.data_cleaner.normalize_null(cell(LogicalField::ItemCode))?;

        Some(CanonicalInventoryRow {
            item_code,
            description: self.data_cleaner.normalize_null(cell(LogicalField::Description)),
            theoretical_stock: self
                .data_cleaner
                .coerce_numeric(cell(LogicalField::TheoreticalStock)),
            physical_stock: self
                .data_cleaner
                .coerce_numeric(cell(LogicalField::PhysicalStock)),
            discrepancy: self
                .data_cleaner
                .coerce_numeric(cell(LogicalField::Discrepancy)),
        })
    }

    /// 原始表 → 规范化库存表
    pub fn normalize(&self, raw: RawTable) -> ImportResult<CanonicalInventoryTable> {
        // === 步骤 1: 列名清洗 ===
        let headers: Vec<String> = raw
            .headers
            .iter()
            .map(|h| self.data_cleaner.clean_header(h))
            .collect();

        // === 步骤 2: 列解析（失败原样向上传递）===
        let mapping = self.column_resolver.resolve(&headers)?;
        debug!(mapping = ?mapping, "列解析完成");

        // === 步骤 3: 投影 + 数值转换 + 过滤空编码 ===
        let total_rows = raw.rows.len();
        let rows: Vec<CanonicalInventoryRow> = raw
            .rows
            .iter()
            .filter_map(|cells| self.project_row(cells, &mapping))
            .collect();

        info!(
            total_rows,
            kept = rows.len(),
            dropped = total_rows - rows.len(),
            "规范化完成"
        );

        Ok(CanonicalInventoryTable::new(rows))
    }
}

/// 取逻辑字段对应的单元格文本（缺失单元格视为空串）
fn cell_text<'a>(cells: &'a [String], mapping: &ColumnMapping, field: LogicalField) -> &'a str {
    cells
        .get(mapping.get(field).index)
        .map(String::as_str)
        .unwrap_or("")
}

impl Default for InventoryImporterImpl {
    fn default() -> Self {
        Self::new(
            UniversalFileParser::default(),
            Box::new(ColumnResolverImpl),
            Box::new(DataCleanerImpl),
        )
    }
}

impl InventoryImporter for InventoryImporterImpl {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<CanonicalInventoryTable> {
        debug!("步骤 0: 解析文件");
        let raw = self.file_parser.parse(file_name, bytes)?;
        info!(headers = raw.headers.len(), rows = raw.rows.len(), "文件解析完成");

        self.normalize(raw)
    }
}
