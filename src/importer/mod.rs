// ==========================================
// 库存差异对比系统 - 导入层
// ==========================================
// 职责: 机构库存文件 → 规范化库存表
// 支持: CSV (分号, Latin-1), Excel (.xlsx/.xls)
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod inventory_importer;

// 重导出核心类型
pub use column_resolver::{
    normalize_header, resolve_columns, ColumnMapping, ColumnResolver as ColumnResolverImpl,
    ResolvedColumn,
};
pub use data_cleaner::{clean_header, coerce_numeric, DataCleaner as DataCleanerImpl};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawTable, UniversalFileParser};
pub use inventory_importer::InventoryImporterImpl;

// 重导出 Trait 接口
pub use importer_trait::{ColumnResolver, DataCleaner, FileParser, InventoryImporter};
