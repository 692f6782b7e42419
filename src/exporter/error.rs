// ==========================================
// 库存差异对比系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nom d'onglet invalide « {name} » : {reason}")]
    InvalidSheetName { name: String, reason: String },

    #[error("Génération du fichier Excel impossible : {0}")]
    WriteFailed(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::WriteFailed(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
