use serde::{Deserialize, Serialize};

/// 报表运行配置（持久化对象）
///
/// 存储位置：`<config dir>/agency-ecart-report/config.json`，缺省字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV 分隔符（单个 ASCII 字符）
    pub csv_delimiter: String,

    /// CSV 非 UTF-8 时使用的单字节编码（WHATWG 标签，如 windows-1252 / latin1）
    pub csv_encoding: String,

    /// 导入后预览行数
    pub preview_rows: usize,

    /// 报表输出目录
    pub output_dir: String,

    /// 界面语言（fr / zh-CN）
    pub locale: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            csv_delimiter: ";".to_string(),
            csv_encoding: "windows-1252".to_string(),
            preview_rows: 10,
            output_dir: ".".to_string(),
            locale: "fr".to_string(),
        }
    }
}
