// ==========================================
// 库存差异对比系统 - 导入层集成测试
// ==========================================
// 覆盖: Latin-1 CSV、Excel 表头变体、配置注入、配置文件加载
// ==========================================


use agency_ecart_report::config::{ConfigManager, ParseConfigReader};
use agency_ecart_report::domain::LogicalField;
use agency_ecart_report::importer::{ImportError, InventoryImporter, InventoryImporterImpl};
use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::{latin1_csv_bytes, xlsx_bytes, MockConfigReader, STANDARD_HEADERS};

// ==========================================
// 测试1: Windows-1252 编码的 CSV（重音表头 + 重音名称）
// ==========================================
#[test]
fn test_latin1_csv_with_accented_headers() {
    let bytes = latin1_csv_bytes(
        &STANDARD_HEADERS,
        &[
            ("A1", "Écrou à œillet", "1 234,5", "1 230", "-4,5"),
            ("A2", "Clé plate", "", "2", "abc"),
        ],
    );
    // 确认确实不是 UTF-8
    assert!(std::str::from_utf8(&bytes).is_err());

    let table = InventoryImporterImpl::default()
        .import_bytes("lyon.csv", &bytes)
        .expect("Latin-1 CSV 导入失败");

    assert_eq!(table.len(), 2);
    let first = &table.rows()[0];
    assert_eq!(first.description.as_deref(), Some("Écrou à œillet"));
    assert_eq!(first.theoretical_stock, Some(1234.5));
    assert_eq!(first.physical_stock, Some(1230.0));
    assert_eq!(first.discrepancy, Some(-4.5));

    let second = &table.rows()[1];
    assert_eq!(second.description.as_deref(), Some("Clé plate"));
    assert_eq!(second.theoretical_stock, None);
    assert_eq!(second.discrepancy, None);
}

// ==========================================
// 测试2: Excel 表头变体（大小写、附加文字、列顺序、重音 Écart）
// ==========================================
#[test]
fn test_xlsx_header_variants_resolve() {
    let headers = [
        "ÉCART (unités)",
        "Stock Physique au 31/12",
        "CODE ARTICLE",
        "Stock théorique",
        "Désignation produit",
    ];
    let bytes = xlsx_bytes(
        &headers,
        &[("-2", "8", "A1", "10", "Vis"), ("3", "4", " A2 ", "1", "Écrou")],
    )
    .unwrap();

    let table = InventoryImporterImpl::default()
        .import_bytes("ain.XLSX", &bytes)
        .expect("Excel 导入失败");

    assert_eq!(table.len(), 2);
    let row = &table.rows()[1];
    assert_eq!(row.item_code, "A2");
    assert_eq!(row.description.as_deref(), Some("Écrou"));
    assert_eq!(row.discrepancy, Some(3.0));
    assert_eq!(row.physical_stock, Some(4.0));
    assert_eq!(row.theoretical_stock, Some(1.0));
}

// ==========================================
// 测试3: Excel 缺列 → SchemaMismatch（列出缺失字段与实际表头）
// ==========================================
#[test]
fn test_xlsx_missing_columns() {
    let bytes = xlsx_bytes(&["Code article", "Ecart"], &[]).unwrap();

    let result = InventoryImporterImpl::default().import_bytes("ain.xlsx", &bytes);
    match result {
        Err(ImportError::SchemaMismatch { missing, found }) => {
            assert_eq!(
                missing,
                vec![
                    LogicalField::Description,
                    LogicalField::TheoreticalStock,
                    LogicalField::PhysicalStock
                ]
            );
            assert_eq!(found, vec!["Code article".to_string(), "Ecart".to_string()]);
        }
        other => panic!("意外结果: {:?}", other),
    }
}

// ==========================================
// 测试4: 配置注入（逗号分隔）
// ==========================================
#[test]
fn test_custom_delimiter_from_config() {
    let config = MockConfigReader {
        delimiter: b',',
        ..MockConfigReader::default()
    };
    let importer = InventoryImporterImpl::from_config(&config);
    assert_eq!(config.preview_rows(), 10);

    let data = "Code article,Désignation,Stock théorique,Stock physique,Ecart\nA1,Vis,10,8,-2\n";
    let table = importer.import_bytes("x.csv", data.as_bytes()).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].discrepancy, Some(-2.0));
}

// ==========================================
// 测试5: 损坏的 Excel 文件 → UnparsableSource
// ==========================================
#[test]
fn test_corrupt_xlsx_is_unparsable() {
    let result = InventoryImporterImpl::default().import_bytes("x.xlsx", b"not a zip archive");
    assert!(matches!(result, Err(ImportError::UnparsableSource { .. })));
}

// ==========================================
// 测试6: JSON 配置文件加载
// ==========================================
#[test]
fn test_config_file_drives_importer() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"csv_delimiter": "|", "preview_rows": 2, "locale": "zh-CN"}}"#
    )
    .unwrap();

    let config = ConfigManager::load(Some(file.path())).expect("配置加载失败");
    assert_eq!(config.csv_delimiter(), b'|');
    assert_eq!(config.preview_rows(), 2);
    assert_eq!(config.locale(), "zh-CN");

    let importer = InventoryImporterImpl::from_config(&config);
    let data = "Code article|Désignation|Stock théorique|Stock physique|Ecart\nA1|Vis|1|1|0\nA2|Vis|1|1|0\nA3|Vis|1|1|0\n";
    let table = importer.import_bytes("x.csv", data.as_bytes()).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.preview(config.preview_rows()).len(), 2);
}
