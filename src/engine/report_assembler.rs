// ==========================================
// 库存差异对比系统 - 报表组装引擎
// ==========================================
// 职责: 每个机构作为参考机构生成一份报表，每个其他机构一个工作表
// 工作表名: "<ref>_vs_<other>"，拼接后截断至 31 字符（Excel 硬限制）
// ==========================================
// 说明: 截断可能导致重名或截断位置不直观，此处不做规避
// ==========================================

use crate::domain::comparison::{AgencyReport, ComparisonRow, ComparisonSheet};
use crate::domain::inventory::AgencyInventory;
use crate::engine::comparator::PairwiseComparator;
use tracing::{debug, info};

/// Excel 工作表名最大长度（字符）
pub const SHEET_NAME_MAX_CHARS: usize = 31;

/// Excel 工作表名禁用字符
pub const SHEET_NAME_FORBIDDEN_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// 机构标识中出现的禁用字符（去重，按出现顺序）
pub fn forbidden_sheet_chars(agency_id: &str) -> Vec<char> {
    let mut found: Vec<char> = Vec::new();
    for c in agency_id.chars() {
        if SHEET_NAME_FORBIDDEN_CHARS.contains(&c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// 工作表名: 拼接后按字符截断
pub fn sheet_name(reference_id: &str, other_id: &str) -> String {
    format!("{}_vs_{}", reference_id, other_id)
        .chars()
        .take(SHEET_NAME_MAX_CHARS)
        .collect()
}

// ==========================================
// ReportAssembler - 报表组装引擎
// ==========================================
pub struct ReportAssembler {
    comparator: PairwiseComparator,
}

impl ReportAssembler {
    pub fn new(comparator: PairwiseComparator) -> Self {
        Self { comparator }
    }

    /// 为单个参考机构组装报表
    ///
    /// # 参数
    /// - `reference_idx`: 参考机构在列表中的位置
    /// - `agencies`: 全部机构（上传顺序）
    pub fn assemble_for(&self, reference_idx: usize, agencies: &[AgencyInventory]) -> AgencyReport {
        let reference = &agencies[reference_idx];

        let sheets: Vec<ComparisonSheet> = agencies
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != reference_idx)
            .map(|(_, other)| {
                let rows = self.comparator.compare(reference, other);
                let name = sheet_name(&reference.agency_id, &other.agency_id);
                debug!(sheet = %name, rows = rows.len(), "工作表组装完成");

                ComparisonSheet {
                    sheet_name: name,
                    headers: ComparisonRow::column_headers(&reference.agency_id, &other.agency_id),
                    rows,
                }
            })
            .collect();

        AgencyReport {
            reference_agency: reference.agency_id.clone(),
            sheets,
        }
    }

    /// 为全部机构组装报表（每个机构一份）
    pub fn assemble_all(&self, agencies: &[AgencyInventory]) -> Vec<AgencyReport> {
        let reports: Vec<AgencyReport> = (0..agencies.len())
            .map(|idx| self.assemble_for(idx, agencies))
            .collect();

        info!(
            agencies = agencies.len(),
            reports = reports.len(),
            "报表组装完成"
        );
        reports
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(PairwiseComparator::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::{CanonicalInventoryRow, CanonicalInventoryTable};

    fn agency(id: &str, codes: &[&str]) -> AgencyInventory {
        let rows = codes
            .iter()
            .map(|c| CanonicalInventoryRow {
                item_code: c.to_string(),
                description: None,
                theoretical_stock: None,
                physical_stock: None,
                discrepancy: Some(1.0),
            })
            .collect();
        AgencyInventory::new(id, CanonicalInventoryTable::new(rows))
    }

    #[test]
    fn test_sheet_name_short() {
        assert_eq!(sheet_name("A", "B"), "A_vs_B");
    }

    #[test]
    fn test_sheet_name_within_limit() {
        // 25 + 4 + 1 = 30 字符，未超限
        let name = sheet_name("AgenceDuNordTresLongueAAA", "B");
        assert!(name.chars().count() <= SHEET_NAME_MAX_CHARS);
        assert_eq!(name, "AgenceDuNordTresLongueAAA_vs_B");
        // 可复现
        assert_eq!(name, sheet_name("AgenceDuNordTresLongueAAA", "B"));
    }

    #[test]
    fn test_sheet_name_truncation_cuts_other_id() {
        let name = sheet_name("AgenceDuNordTresLongueAAA", "Bordeaux");
        assert_eq!(name, "AgenceDuNordTresLongueAAA_vs_Bo");
    }

    #[test]
    fn test_sheet_name_truncation_counts_chars_not_bytes() {
        let name = sheet_name("ÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉÉ", "Été");
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_forbidden_sheet_chars() {
        assert!(forbidden_sheet_chars("Lyon Part-Dieu").is_empty());
        assert_eq!(forbidden_sheet_chars("Lyon/Villeurbanne"), vec!['/']);
        assert_eq!(forbidden_sheet_chars("A:B/C:D"), vec![':', '/']);
        assert_eq!(forbidden_sheet_chars("[Nord]\\"), vec!['[', ']', '\\']);
    }

    #[test]
    fn test_assemble_all_one_report_per_agency() {
        let agencies = vec![
            agency("A", &["1", "2"]),
            agency("B", &["2", "3"]),
            agency("C", &["2"]),
        ];
        let reports = ReportAssembler::default().assemble_all(&agencies);

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].sheet_names(), vec!["A_vs_B", "A_vs_C"]);
        assert_eq!(reports[1].sheet_names(), vec!["B_vs_A", "B_vs_C"]);
        assert_eq!(reports[2].sheet_names(), vec!["C_vs_A", "C_vs_B"]);
        assert_eq!(reports[0].sheets[0].rows.len(), 1);
        assert_eq!(reports[0].sheets[0].headers[6], "Ecart_A");
        assert_eq!(reports[0].sheets[0].headers[7], "Ecart_B");
    }
}
