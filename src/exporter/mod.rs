// ==========================================
// 库存差异对比系统 - 导出层
// ==========================================
// 职责: 报表 → Excel 字节流 + 下载元信息
// ==========================================

pub mod error;
pub mod xlsx_writer;

pub use error::{ExportError, ExportResult};
pub use xlsx_writer::{report_file_name, GeneratedReport, XlsxReportWriter, XLSX_MIME_TYPE};
