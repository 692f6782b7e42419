// ==========================================
// 库存差异对比系统 - API层
// ==========================================
// 职责: 对前端（命令行）暴露一次运行的完整流程
// ==========================================

pub mod error;
pub mod report_api;

pub use error::{ApiError, ApiResult};
pub use report_api::{
    AgencyLoadFailure, AgencyLoadSummary, FailureSummary, GenerationOutcome, LoadOutcome,
    ReportApi, ReportFailure, ReportFailureSummary, RunSummary, MIN_VALID_AGENCIES,
};
