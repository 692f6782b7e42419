// ==========================================
// 库存差异对比系统 - 两两对比引擎
// ==========================================
// 职责: 参考机构 × 对比机构，按商品编码内连接，计算派生差异
// 输入: 两个规范化库存表
// 输出: 按相关性排序的对比行
// ==========================================
// 红线: 差异值原样采信，空值参与运算结果为空（不按 0 处理）
// 红线: 重复编码按内连接语义展开，不去重
// ==========================================

use crate::domain::comparison::ComparisonRow;
use crate::domain::inventory::{AgencyInventory, CanonicalInventoryRow};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// PairwiseComparator - 两两对比引擎
// ==========================================
pub struct PairwiseComparator {
    // 无状态引擎,不需要注入依赖
}

impl PairwiseComparator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 对比两个机构
    ///
    /// 1) 仅保留两侧都存在的商品编码（内连接）
    /// 2) 名称/库存取参考机构一侧
    /// 3) net_difference = other - ref, combined_sum = ref + other
    /// 4) 按 |combined_sum| 降序稳定排序，空值置后
    ///
    /// # 参数
    /// - `reference`: 参考机构（报表所属机构）
    /// - `other`: 对比机构
    pub fn compare(&self, reference: &AgencyInventory, other: &AgencyInventory) -> Vec<ComparisonRow> {
        // 对比侧按编码分组（组内保持原顺序）
        let mut other_by_code: HashMap<&str, Vec<&CanonicalInventoryRow>> = HashMap::new();
        for row in other.table.rows() {
            other_by_code
                .entry(row.item_code.as_str())
                .or_default()
                .push(row);
        }

        let mut rows = Vec::new();
        for ref_row in reference.table.rows() {
            let Some(matches) = other_by_code.get(ref_row.item_code.as_str()) else {
                continue;
            };
            for other_row in matches {
                rows.push(self.build_row(
                    &reference.agency_id,
                    &other.agency_id,
                    ref_row,
                    other_row,
                ));
            }
        }

        debug!(
            reference = %reference.agency_id,
            other = %other.agency_id,
            matched = rows.len(),
            "内连接完成"
        );

        sort_by_relevance(&mut rows);
        rows
    }

    fn build_row(
        &self,
        reference_id: &str,
        other_id: &str,
        ref_row: &CanonicalInventoryRow,
        other_row: &CanonicalInventoryRow,
    ) -> ComparisonRow {
        let discrepancy_ref = ref_row.discrepancy;
        let discrepancy_other = other_row.discrepancy;

        ComparisonRow {
            reference_agency: reference_id.to_string(),
            compared_agency: other_id.to_string(),
            item_code: ref_row.item_code.clone(),
            description: ref_row.description.clone(),
            theoretical_stock: ref_row.theoretical_stock,
            physical_stock: ref_row.physical_stock,
            discrepancy_ref,
            discrepancy_other,
            net_difference: discrepancy_other.zip(discrepancy_ref).map(|(o, r)| o - r),
            combined_sum: discrepancy_ref.zip(discrepancy_other).map(|(r, o)| r + o),
        }
    }
}

impl Default for PairwiseComparator {
    fn default() -> Self {
        Self::new()
    }
}

/// 排序键: |combined_sum|；空值与 NaN 视为最小
fn relevance_key(row: &ComparisonRow) -> Option<f64> {
    row.combined_sum.map(f64::abs).filter(|v| !v.is_nan())
}

/// 相关性比较（降序）
fn compare_relevance(a: &ComparisonRow, b: &ComparisonRow) -> Ordering {
    match (relevance_key(a), relevance_key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 按 |combined_sum| 降序稳定排序（相等时保持输入顺序）
pub fn sort_by_relevance(rows: &mut [ComparisonRow]) {
    rows.sort_by(compare_relevance);
}
