// ==========================================
// 库存差异对比系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use encoding_rs::Encoding;

// ==========================================
// ParseConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（JSON 文件 + 环境变量覆写）
pub trait ParseConfigReader {
    /// CSV 字段分隔符
    ///
    /// # 默认值
    /// - b';'
    fn csv_delimiter(&self) -> u8;

    /// CSV 非 UTF-8 内容的解码编码
    ///
    /// # 默认值
    /// - windows-1252（Latin-1 超集）
    fn csv_encoding(&self) -> &'static Encoding;

    /// 导入后预览行数
    ///
    /// # 默认值
    /// - 10
    fn preview_rows(&self) -> usize;
}
