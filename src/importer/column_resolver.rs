// ==========================================
// 库存差异对比系统 - 列解析器实现
// ==========================================
// 职责: 源文件实际列名 → 五个逻辑字段
// 规则: 有序规则表，逐列匹配，每个字段先到先得
// ==========================================
// 红线: 纯函数，不涉及文件 I/O
// 红线: 仅 Ecart 使用前缀匹配，其余均为包含匹配
// ==========================================

use crate::domain::types::LogicalField;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::ColumnResolver as ColumnResolverTrait;
use serde::Serialize;

/// 匹配谓词（作用于规范化后的列名）
#[derive(Debug, Clone, Copy)]
enum HeaderPredicate {
    Contains(&'static str),
    StartsWithFolded(&'static str),
}

impl HeaderPredicate {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            HeaderPredicate::Contains(needle) => normalized.contains(needle),
            HeaderPredicate::StartsWithFolded(prefix) => {
                fold_leading_accent(normalized).starts_with(prefix)
            }
        }
    }
}

/// 有序规则表（顺序即同一列命中多条规则时的优先级）
const RESOLUTION_RULES: [(LogicalField, HeaderPredicate); 5] = [
    (LogicalField::ItemCode, HeaderPredicate::Contains("code article")),
    (LogicalField::Description, HeaderPredicate::Contains("désignation")),
    (LogicalField::TheoreticalStock, HeaderPredicate::Contains("stock théorique")),
    (LogicalField::PhysicalStock, HeaderPredicate::Contains("stock physique")),
    (LogicalField::Discrepancy, HeaderPredicate::StartsWithFolded("ecart")),
];

// ==========================================
// ColumnMapping - 逻辑字段 → 实际列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    pub index: usize,  // 源文件列序号（0 起）
    pub header: String, // 源文件列名（已清洗）
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    columns: Vec<ResolvedColumn>, // 按 LogicalField::ALL 顺序，长度恒为 5
}

impl ColumnMapping {
    pub fn get(&self, field: LogicalField) -> &ResolvedColumn {
        &self.columns[field.index()]
    }

    pub fn header(&self, field: LogicalField) -> &str {
        &self.get(field).header
    }
}

pub struct ColumnResolver;

impl ColumnResolverTrait for ColumnResolver {
    fn resolve(&self, headers: &[String]) -> ImportResult<ColumnMapping> {
        resolve_columns(headers)
    }
}

/// 列名规范化: NBSP → 空格，去首尾空白，小写
pub fn normalize_header(label: &str) -> String {
    label.replace('\u{a0}', " ").trim().to_lowercase()
}

/// 将开头的带重音 e 折叠为 e（仅用于 Ecart 前缀判断）
fn fold_leading_accent(normalized: &str) -> std::borrow::Cow<'_, str> {
    let mut chars = normalized.chars();
    match chars.next() {
        Some('é' | 'è' | 'ê' | 'ë') => format!("e{}", chars.as_str()).into(),
        _ => normalized.into(),
    }
}

/// 单列匹配: 返回该列命中的、尚未分配的第一个逻辑字段
fn match_header(normalized: &str, assigned: &[Option<ResolvedColumn>; 5]) -> Option<LogicalField> {
    RESOLUTION_RULES
        .iter()
        .find(|(field, predicate)| {
            assigned[field.index()].is_none() && predicate.matches(normalized)
        })
        .map(|(field, _)| *field)
}

/// 解析列映射
///
/// # 参数
/// - headers: 源文件列名（按文件列顺序）
///
/// # 返回
/// - Ok(ColumnMapping): 五个逻辑字段全部命中
/// - Err(SchemaMismatch): 缺失字段列表 + 全部列名
pub fn resolve_columns(headers: &[String]) -> ImportResult<ColumnMapping> {
    let mut assigned: [Option<ResolvedColumn>; 5] = Default::default();

    for (index, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header);
        if let Some(field) = match_header(&normalized, &assigned) {
            assigned[field.index()] = Some(ResolvedColumn {
                index,
                header: header.clone(),
            });
        }
    }

    let mut columns = Vec::with_capacity(LogicalField::ALL.len());
    let mut missing = Vec::new();
    for (field, slot) in LogicalField::ALL.iter().zip(assigned) {
        match slot {
            Some(column) => columns.push(column),
            None => missing.push(*field),
        }
    }

    if !missing.is_empty() {
        return Err(ImportError::SchemaMismatch {
            missing,
            found: headers.to_vec(),
        });
    }

    Ok(ColumnMapping { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_standard_headers() {
        let h = headers(&[
            "Code article",
            "Désignation",
            "Stock théorique",
            "Stock physique",
            "Ecart",
        ]);
        let mapping = resolve_columns(&h).unwrap();
        assert_eq!(mapping.get(LogicalField::ItemCode).index, 0);
        assert_eq!(mapping.get(LogicalField::Discrepancy).index, 4);
    }

    #[test]
    fn test_resolve_tolerates_case_and_spacing() {
        let h = headers(&[
            "  CODE ARTICLE ",
            "Désignation article",
            "Stock\u{a0}Théorique (U)",
            "stock physique",
            "Ecart stock",
            "Emplacement",
        ]);
        let mapping = resolve_columns(&h).unwrap();
        assert_eq!(mapping.header(LogicalField::TheoreticalStock), "Stock\u{a0}Théorique (U)");
        assert_eq!(mapping.header(LogicalField::Discrepancy), "Ecart stock");
    }

    #[test]
    fn test_discrepancy_requires_prefix() {
        let h = headers(&[
            "Code article",
            "Désignation",
            "Stock théorique",
            "Stock physique",
            "Valeur ecart",
        ]);
        match resolve_columns(&h) {
            Err(ImportError::SchemaMismatch { missing, found }) => {
                assert_eq!(missing, vec![LogicalField::Discrepancy]);
                assert_eq!(found.len(), 5);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_discrepancy_prefix_is_accent_insensitive() {
        let h = headers(&[
            "Code article",
            "Désignation",
            "Stock théorique",
            "Stock physique",
            "Écart",
        ]);
        let mapping = resolve_columns(&h).unwrap();
        assert_eq!(mapping.header(LogicalField::Discrepancy), "Écart");
    }

    #[test]
    fn test_first_match_wins() {
        let h = headers(&[
            "Ecart valorisé",
            "Code article",
            "Désignation",
            "Stock théorique",
            "Stock physique",
            "Ecart",
        ]);
        let mapping = resolve_columns(&h).unwrap();
        assert_eq!(mapping.get(LogicalField::Discrepancy).index, 0);
    }

    #[test]
    fn test_header_order_does_not_change_mapping() {
        let a = headers(&[
            "Code article",
            "Désignation",
            "Stock théorique",
            "Stock physique",
            "Ecart",
        ]);
        let b = headers(&[
            "Ecart",
            "Stock physique",
            "Code article",
            "Stock théorique",
            "Désignation",
        ]);
        let ma = resolve_columns(&a).unwrap();
        let mb = resolve_columns(&b).unwrap();
        for field in LogicalField::ALL {
            assert_eq!(ma.header(field), mb.header(field));
        }
        // 幂等
        assert_eq!(resolve_columns(&a).unwrap(), ma);
    }

    #[test]
    fn test_assigned_header_falls_through_to_next_rule() {
        // 第二个“code article”列不会报错，也不会被误分配
        let h = headers(&[
            "Code article",
            "Code article fournisseur",
            "Désignation",
            "Stock théorique",
            "Stock physique",
            "Ecart",
        ]);
        let mapping = resolve_columns(&h).unwrap();
        assert_eq!(mapping.get(LogicalField::ItemCode).index, 0);
        assert_eq!(mapping.get(LogicalField::Description).index, 2);
    }

    #[test]
    fn test_all_missing_on_empty_headers() {
        match resolve_columns(&[]) {
            Err(ImportError::SchemaMismatch { missing, found }) => {
                assert_eq!(missing.len(), 5);
                assert!(found.is_empty());
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }
}
