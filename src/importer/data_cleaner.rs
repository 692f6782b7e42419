// ==========================================
// 库存差异对比系统 - 数据清洗器实现
// ==========================================
// 职责: 列名清洗 / 文本 TRIM / NULL 标准化 / 本地化数值转换
// 红线: 纯函数，不涉及文件 I/O
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_header(&self, label: &str) -> String {
        clean_header(label)
    }

    fn normalize_null(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn coerce_numeric(&self, value: &str) -> Option<f64> {
        coerce_numeric(value)
    }
}

/// 列名清洗: NBSP → 空格，去首尾空白
pub fn clean_header(label: &str) -> String {
    label.replace(NBSP, " ").trim().to_string()
}

/// 本地化数值文本 → f64
///
/// 规则（顺序执行）:
/// 1. 删除 NBSP / 窄 NBSP / 普通空格（千分位）
/// 2. 逗号小数点 → 点
/// 3. 解析失败、空串、NaN → None（不报错）
///
/// # 示例
/// - "1 234,56" → Some(1234.56)
/// - "abc" → None
/// - "7" → Some(7.0)
pub fn coerce_numeric(value: &str) -> Option<f64> {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| *c != NBSP && *c != NARROW_NBSP && *c != ' ')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if compact.is_empty() {
        return None;
    }

    compact.parse::<f64>().ok().filter(|v| !v.is_nan())
}
