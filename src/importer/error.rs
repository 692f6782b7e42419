// ==========================================
// 库存差异对比系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 恢复策略: 按机构隔离，单个机构失败不影响其他机构
// ==========================================

use crate::domain::types::LogicalField;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("Format de fichier non supporté : {0} (formats acceptés : .csv, .xls, .xlsx)")]
    UnsupportedFormat(String),

    #[error("Fichier illisible ({format}) : {message}")]
    UnparsableSource { format: String, message: String },

    #[error("Lecture du fichier impossible ({path}) : {message}")]
    UnreadableFile { path: String, message: String },

    // ===== 列映射错误 =====
    #[error(
        "Colonnes manquantes ou non reconnues dans le fichier : {}\nColonnes trouvées : {:?}",
        format_fields(.missing),
        .found
    )]
    SchemaMismatch {
        missing: Vec<LogicalField>,
        found: Vec<String>,
    },

    // ===== 提交信息错误 =====
    #[error("Nom ou code d'agence manquant pour le fichier {0}")]
    EmptyAgencyName(String),

    #[error("Nom d'agence « {name} » invalide : caractères interdits {forbidden:?}")]
    InvalidAgencyName { name: String, forbidden: Vec<char> },
}

impl ImportError {
    pub fn csv(message: impl Into<String>) -> Self {
        ImportError::UnparsableSource {
            format: "csv".to_string(),
            message: message.into(),
        }
    }

    pub fn spreadsheet(message: impl Into<String>) -> Self {
        ImportError::UnparsableSource {
            format: "excel".to_string(),
            message: message.into(),
        }
    }
}

fn format_fields(fields: &[LogicalField]) -> String {
    let labels: Vec<&str> = fields.iter().map(|f| f.canonical_label()).collect();
    format!("{:?}", labels)
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::csv(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::spreadsheet(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
