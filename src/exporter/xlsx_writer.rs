// ==========================================
// 库存差异对比系统 - Excel 报表写出
// ==========================================
// 职责: AgencyReport → .xlsx 字节流（内存中，不落盘）
// 格式: 表头加粗并冻结；数值写为数字；空值/非有限值留空
// ==========================================
// 红线: 非法或重复的工作表名直接报错，不自动改名
// ==========================================

use crate::domain::comparison::{AgencyReport, ComparisonRow, ComparisonSheet};
use crate::exporter::error::{ExportError, ExportResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Office Open XML 表格 MIME 类型
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 建议下载文件名
pub fn report_file_name(reference_agency: &str) -> String {
    format!("rapport_inventaire_{}.xlsx", reference_agency)
}

// ==========================================
// GeneratedReport - 交付给调用方的报表
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub reference_agency: String,
    pub file_name: String,
    pub mime_type: &'static str,
    pub sheet_names: Vec<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

// ==========================================
// XlsxReportWriter
// ==========================================
pub struct XlsxReportWriter {
    header_format: Format,
}

impl XlsxReportWriter {
    pub fn new() -> Self {
        Self {
            header_format: Format::new().set_bold(),
        }
    }

    /// 写出单个机构报表
    ///
    /// # 返回
    /// - Ok(GeneratedReport): 字节流 + 下载元信息
    /// - Err(InvalidSheetName): 工作表名被格式拒绝（含截断后重名）
    /// - Err(WriteFailed): 其他写出错误
    #[instrument(skip(self, report), fields(reference = %report.reference_agency))]
    pub fn write(&self, report: &AgencyReport) -> ExportResult<GeneratedReport> {
        let mut workbook = Workbook::new();
        let mut seen: HashSet<String> = HashSet::new();

        for sheet in &report.sheets {
            // Excel 工作表名不区分大小写
            if !seen.insert(sheet.sheet_name.to_lowercase()) {
                return Err(ExportError::InvalidSheetName {
                    name: sheet.sheet_name.clone(),
                    reason: "nom déjà utilisé dans ce classeur".to_string(),
                });
            }

            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.sheet_name)
                .map_err(|e| ExportError::InvalidSheetName {
                    name: sheet.sheet_name.clone(),
                    reason: e.to_string(),
                })?;
            self.write_sheet(worksheet, sheet)?;
            debug!(sheet = %sheet.sheet_name, rows = sheet.rows.len(), "工作表写出完成");
        }

        let bytes = workbook.save_to_buffer()?;

        Ok(GeneratedReport {
            reference_agency: report.reference_agency.clone(),
            file_name: report_file_name(&report.reference_agency),
            mime_type: XLSX_MIME_TYPE,
            sheet_names: report.sheet_names(),
            bytes,
        })
    }

    fn write_sheet(&self, worksheet: &mut Worksheet, sheet: &ComparisonSheet) -> ExportResult<()> {
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &self.header_format)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (idx, row) in sheet.rows.iter().enumerate() {
            write_row(worksheet, idx as u32 + 1, row)?;
        }

        worksheet.set_column_width(1, 16)?;
        worksheet.set_column_width(3, 40)?;
        Ok(())
    }
}

impl Default for XlsxReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_row(worksheet: &mut Worksheet, row_idx: u32, row: &ComparisonRow) -> ExportResult<()> {
    worksheet.write_string(row_idx, 0, &row.reference_agency)?;
    worksheet.write_string(row_idx, 1, &row.compared_agency)?;
    worksheet.write_string(row_idx, 2, &row.item_code)?;
    if let Some(description) = &row.description {
        worksheet.write_string(row_idx, 3, description)?;
    }

    let numbers = [
        row.theoretical_stock,
        row.physical_stock,
        row.discrepancy_ref,
        row.discrepancy_other,
        row.net_difference,
        row.combined_sum,
    ];
    for (offset, value) in numbers.into_iter().enumerate() {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            worksheet.write_number(row_idx, 4 + offset as u16, v)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn row(code: &str, ecart_ref: Option<f64>, ecart_other: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            reference_agency: "AIN".to_string(),
            compared_agency: "LYON".to_string(),
            item_code: code.to_string(),
            description: Some("Vis".to_string()),
            theoretical_stock: Some(10.0),
            physical_stock: Some(8.0),
            discrepancy_ref: ecart_ref,
            discrepancy_other: ecart_other,
            net_difference: ecart_other.zip(ecart_ref).map(|(o, r)| o - r),
            combined_sum: ecart_ref.zip(ecart_other).map(|(r, o)| r + o),
        }
    }

    fn report(sheet_names: &[&str], rows: Vec<ComparisonRow>) -> AgencyReport {
        AgencyReport {
            reference_agency: "AIN".to_string(),
            sheets: sheet_names
                .iter()
                .map(|name| ComparisonSheet {
                    sheet_name: name.to_string(),
                    headers: ComparisonRow::column_headers("AIN", "LYON"),
                    rows: rows.clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let generated = XlsxReportWriter::new()
            .write(&report(
                &["AIN_vs_LYON"],
                vec![row("A1", Some(-2.0), Some(5.0)), row("A2", None, Some(1.0))],
            ))
            .unwrap();

        assert_eq!(generated.file_name, "rapport_inventaire_AIN.xlsx");
        assert_eq!(generated.mime_type, XLSX_MIME_TYPE);

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(generated.bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["AIN_vs_LYON".to_string()]);

        let range = workbook.worksheet_range("AIN_vs_LYON").unwrap();
        let rows: Vec<&[Data]> = range.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][6], Data::String("Ecart_AIN".to_string()));
        assert_eq!(rows[1][8], Data::Float(7.0));
        assert_eq!(rows[1][9], Data::Float(3.0));
        // 空差异 → 空单元格
        assert_eq!(rows[2][6], Data::Empty);
        assert_eq!(rows[2][9], Data::Empty);
    }

    #[test]
    fn test_duplicate_sheet_name_is_an_error() {
        let result = XlsxReportWriter::new().write(&report(&["X_vs_Y", "x_vs_y"], vec![]));
        assert!(matches!(result, Err(ExportError::InvalidSheetName { .. })));
    }

    #[test]
    fn test_forbidden_sheet_name_is_an_error() {
        let result = XlsxReportWriter::new().write(&report(&["A/B_vs_C"], vec![]));
        assert!(matches!(result, Err(ExportError::InvalidSheetName { .. })));
    }
}
