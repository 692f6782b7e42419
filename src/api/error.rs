// ==========================================
// 库存差异对比系统 - API层错误类型
// ==========================================
// 职责: 定义整批运行级别的错误
// 单个机构的导入失败、单份报表的写出失败均不在此列（逐项汇总）
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 有效机构不足，整批拒绝（不生成任何报表）
    #[error("Au moins {required} agences valides sont nécessaires pour la comparaison ({valid} chargée(s))")]
    InsufficientAgencies { valid: usize, required: usize },

    #[error("Erreur de configuration : {0}")]
    Config(String),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_agencies_message() {
        let err = ApiError::InsufficientAgencies {
            valid: 1,
            required: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains('2'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::InvalidValue {
            key: "csv_delimiter".to_string(),
            value: ";;".to_string(),
            message: "un seul caractère ASCII attendu".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Config(ref m) if m.contains("csv_delimiter")));
    }
}
