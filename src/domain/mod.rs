// ==========================================
// 库存差异对比系统 - 领域模型层
// ==========================================
// 职责: 定义库存表、对比结果、报表等领域实体
// 红线: 不含文件解析逻辑,不含对比计算逻辑
// ==========================================

pub mod comparison;
pub mod inventory;
pub mod types;

// 重导出核心类型
pub use comparison::{AgencyReport, ComparisonRow, ComparisonSheet};
pub use inventory::{
    AgencyInventory, AgencySubmission, CanonicalInventoryRow, CanonicalInventoryTable,
};
pub use types::{LogicalField, SourceFormat};
