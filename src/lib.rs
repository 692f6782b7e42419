// ==========================================
// 库存差异对比系统 - 核心库
// ==========================================
// 职责: 机构库存文件 → 规范化库存表 → 两两对比 → 每机构一份 Excel 报表
// 技术栈: Rust + calamine/csv + rust_xlsxwriter
// 系统定位: 单次运行、无持久化（请求级）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "fr");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 对比与报表组装
pub mod engine;

// 导出层 - Excel 写出
pub mod exporter;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能统计
pub mod perf;

// API 层 - 运行门面
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LogicalField, SourceFormat};

// 领域实体
pub use domain::{
    AgencyInventory, AgencyReport, AgencySubmission, CanonicalInventoryRow,
    CanonicalInventoryTable, ComparisonRow, ComparisonSheet,
};

// 导入
pub use importer::{ImportError, InventoryImporter, InventoryImporterImpl};

// 引擎
pub use engine::{PairwiseComparator, ReportAssembler};

// 导出
pub use exporter::{ExportError, GeneratedReport, XlsxReportWriter};

// 配置
pub use config::{ConfigManager, ReportConfig};

// API
pub use api::{ApiError, GenerationOutcome, LoadOutcome, ReportApi, RunSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Comparaison des écarts d'inventaire";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
