// ==========================================
// 库存差异对比系统 - 引擎层
// ==========================================
// 职责: 两两对比与报表组装,不涉及文件读写
// 红线: 差异值原样采信,不重算
// ==========================================

pub mod comparator;
pub mod report_assembler;

// 重导出核心引擎
pub use comparator::{sort_by_relevance, PairwiseComparator};
pub use report_assembler::{
    forbidden_sheet_chars, sheet_name, ReportAssembler, SHEET_NAME_FORBIDDEN_CHARS,
    SHEET_NAME_MAX_CHARS,
};
