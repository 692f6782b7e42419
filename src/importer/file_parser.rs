// ==========================================
// 库存差异对比系统 - 文件解析器实现
// ==========================================
// 阶段 0: 字节流读取与解析
// 支持: CSV (.csv, 分号分隔, Latin-1 兼容) / Excel (.xlsx/.xls, 首个工作表)
// ==========================================

use crate::domain::types::SourceFormat;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{Data, Range, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use std::fmt::Display;
use std::io::{Cursor, Read, Seek};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ==========================================
// RawTable - 原始表（解析结果）
// ==========================================
// 单元格统一渲染为文本（数值单元格亦然）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>, // 每行长度 == headers.len()
}

impl RawTable {
    /// 追加一行：不足补空，完全空白的行跳过
    fn push_row(&mut self, mut cells: Vec<String>) {
        if cells.iter().all(|c| c.trim().is_empty()) {
            return;
        }
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    pub delimiter: u8,
    pub fallback_encoding: &'static Encoding,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b';',
            fallback_encoding: encoding_rs::WINDOWS_1252,
        }
    }
}

impl CsvParser {
    /// 字节流 → 文本
    ///
    /// 去 UTF-8 BOM；合法 UTF-8 直接使用，否则按单字节编码解码
    fn decode(&self, bytes: &[u8]) -> String {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                let (decoded, _) = self
                    .fallback_encoding
                    .decode_without_bom_handling(bytes);
                decoded.into_owned()
            }
        }
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let text = self.decode(bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // 允许行长度不一致（短行补空）
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = RawTable {
            headers,
            rows: Vec::new(),
        };

        for result in reader.records() {
            let record = result?;
            let width = table.headers.len();

            // 多出的非空字段无法归属任何列
            if record.iter().skip(width).any(|v| !v.trim().is_empty()) {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(ImportError::csv(format!(
                    "ligne {} : {} champs attendus, {} trouvés",
                    line,
                    width,
                    record.len()
                )));
            }

            table.push_row(record.iter().take(width).map(str::to_string).collect());
        }

        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    pub format: SourceFormat,
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let cursor = Cursor::new(bytes.to_vec());

        let range = match self.format {
            SourceFormat::Xls => {
                let mut workbook: Xls<_> =
                    Xls::new(cursor).map_err(|e| ImportError::spreadsheet(e.to_string()))?;
                first_sheet_range(&mut workbook)?
            }
            SourceFormat::Xlsx => {
                let mut workbook: Xlsx<_> =
                    Xlsx::new(cursor).map_err(|e| ImportError::spreadsheet(e.to_string()))?;
                first_sheet_range(&mut workbook)?
            }
            SourceFormat::Csv => {
                return Err(ImportError::spreadsheet(
                    "un fichier CSV ne peut pas être lu comme classeur",
                ))
            }
        };

        Ok(range_to_raw_table(&range))
    }
}

/// 读取第一个工作表
fn first_sheet_range<RS, R>(workbook: &mut R) -> ImportResult<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let sheet_names = workbook.sheet_names();
    let first = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ImportError::spreadsheet("le classeur ne contient aucune feuille"))?;

    workbook
        .worksheet_range(&first)
        .map_err(|e| ImportError::spreadsheet(e.to_string()))
}

/// 首行为表头，其余为数据行；空工作表 → 空表
fn range_to_raw_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
        None => return RawTable::default(),
    };

    let mut table = RawTable {
        headers,
        rows: Vec::new(),
    };
    for data_row in rows {
        table.push_row(data_row.iter().map(|cell| cell.to_string()).collect());
    }
    table
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    pub csv: CsvParser,
}

impl UniversalFileParser {
    pub fn new(csv: CsvParser) -> Self {
        Self { csv }
    }

    pub fn parse(&self, file_name: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        match SourceFormat::from_file_name(file_name) {
            Some(SourceFormat::Csv) => self.csv.parse_to_raw_table(bytes),
            Some(format) => ExcelParser { format }.parse_to_raw_table(bytes),
            None => Err(ImportError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self::new(CsvParser::default())
    }
}
