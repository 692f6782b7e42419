// ==========================================
// 库存差异对比系统 - 对比结果领域模型
// ==========================================
// 依据: 两两对比结果 / 单机构报表
// ==========================================
// 说明: 派生数据，每次运行重新计算，不单独持久化
// 符号约定: net_difference 以参考机构为基准（other - ref）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ComparisonRow - 对比行
// ==========================================
// 名称、库存字段仅取自参考机构一侧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub reference_agency: String,
    pub compared_agency: String,
    pub item_code: String,
    pub description: Option<String>,
    pub theoretical_stock: Option<f64>,
    pub physical_stock: Option<f64>,
    pub discrepancy_ref: Option<f64>,
    pub discrepancy_other: Option<f64>,
    pub net_difference: Option<f64>, // other - ref（任一为空 → 空）
    pub combined_sum: Option<f64>,   // ref + other（任一为空 → 空）
}

impl ComparisonRow {
    /// 报表列名（顺序即输出列顺序）
    ///
    /// Ecart 两列带机构标识后缀
    pub fn column_headers(reference: &str, compared: &str) -> [String; 10] {
        [
            "Agence".to_string(),
            "Agence comparée".to_string(),
            "Code article".to_string(),
            "Désignation".to_string(),
            "Stock théorique".to_string(),
            "Stock physique".to_string(),
            format!("Ecart_{}", reference),
            format!("Ecart_{}", compared),
            "Ecart_des_2_agences".to_string(),
            "Somme_ecarts".to_string(),
        ]
    }
}

// ==========================================
// ComparisonSheet - 报表中的一个工作表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSheet {
    pub sheet_name: String, // "<ref>_vs_<other>"，截断至 31 字符
    pub headers: [String; 10],
    pub rows: Vec<ComparisonRow>,
}

// ==========================================
// AgencyReport - 单个参考机构的报表
// ==========================================
// 工作表数 = 机构总数 - 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyReport {
    pub reference_agency: String,
    pub sheets: Vec<ComparisonSheet>,
}

impl AgencyReport {
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.sheet_name.clone()).collect()
    }
}
