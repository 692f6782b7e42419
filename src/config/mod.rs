// ==========================================
// 库存差异对比系统 - 配置层
// ==========================================
// 职责: 运行配置管理,支持文件 + 环境变量覆写
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod config_manager;
pub mod import_config_trait;
pub mod report_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_config_path, ConfigError, ConfigManager};
pub use import_config_trait::ParseConfigReader;
pub use report_config::ReportConfig;
