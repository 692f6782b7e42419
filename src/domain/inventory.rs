// ==========================================
// 库存差异对比系统 - 库存领域模型
// ==========================================
// 依据: 标准库存表（五列规范化结构）
// ==========================================
// 红线: 差异值 (Ecart) 原样采信，不做重算
// 生命周期: 解析时创建，之后只读，仅在一次对比运行内有效
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CanonicalInventoryRow - 规范化库存行
// ==========================================
// 用途: 导入层写入，引擎层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalInventoryRow {
    pub item_code: String,                 // 商品编码（非空，已 TRIM；文件内可能重复）
    pub description: Option<String>,       // 商品名称（仅展示）
    pub theoretical_stock: Option<f64>,    // 理论库存（无法解析 → None）
    pub physical_stock: Option<f64>,       // 实盘库存（无法解析 → None）
    pub discrepancy: Option<f64>,          // 差异（上游已计算，原样采信）
}

// ==========================================
// CanonicalInventoryTable - 规范化库存表
// ==========================================
// 不变量: 所有行 item_code 非空
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalInventoryTable {
    rows: Vec<CanonicalInventoryRow>,
}

impl CanonicalInventoryTable {
    /// 由已清洗的行构建
    ///
    /// 空 item_code 的行在此处再次过滤，保证不变量成立
    pub fn new(rows: Vec<CanonicalInventoryRow>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| !row.item_code.trim().is_empty())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[CanonicalInventoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 前 N 行预览（上传后展示用）
    pub fn preview(&self, limit: usize) -> &[CanonicalInventoryRow] {
        &self.rows[..self.rows.len().min(limit)]
    }
}

// ==========================================
// AgencyInventory - 机构库存
// ==========================================
// 机构标识: 用户输入（已 TRIM，非空），同时用作工作表名/文件名片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyInventory {
    pub agency_id: String,
    pub table: CanonicalInventoryTable,
}

impl AgencyInventory {
    pub fn new(agency_id: impl Into<String>, table: CanonicalInventoryTable) -> Self {
        Self {
            agency_id: agency_id.into(),
            table,
        }
    }
}

// ==========================================
// AgencySubmission - 前端提交的一份机构文件
// ==========================================
// 来源: 命令行 / 上传界面（不属于核心）
#[derive(Debug, Clone)]
pub struct AgencySubmission {
    pub agency_name: String, // 原始输入（未 TRIM）
    pub file_name: String,   // 文件名（扩展名决定解析方式）
    pub bytes: Vec<u8>,      // 文件内容
}

impl AgencySubmission {
    pub fn new(
        agency_name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            agency_name: agency_name.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}
