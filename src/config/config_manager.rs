// ==========================================
// 库存差异对比系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、环境变量覆写
// 来源优先级: 环境变量 > JSON 配置文件 > 默认值
// ==========================================

use crate::config::import_config_trait::ParseConfigReader;
use crate::config::report_config::ReportConfig;
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Lecture de la configuration impossible ({path}) : {message}")]
    ReadError { path: String, message: String },

    #[error("Valeur de configuration invalide (key: {key}, value: {value}) : {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    raw: ReportConfig,
    delimiter: u8,
    encoding: &'static Encoding,
}

impl ConfigManager {
    /// 从 ReportConfig 创建（校验分隔符与编码）
    pub fn from_config(raw: ReportConfig) -> Result<Self, ConfigError> {
        let delimiter = parse_delimiter(&raw.csv_delimiter)?;
        let encoding = Encoding::for_label(raw.csv_encoding.trim().as_bytes()).ok_or_else(|| {
            ConfigError::InvalidValue {
                key: config_keys::CSV_ENCODING.to_string(),
                value: raw.csv_encoding.clone(),
                message: "encodage inconnu".to_string(),
            }
        })?;

        Ok(Self {
            raw,
            delimiter,
            encoding,
        })
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式配置文件路径（必须存在）；None 时使用默认路径（可不存在）
    ///
    /// # 返回
    /// - Ok(ConfigManager): 合并环境变量后的配置
    /// - Err: 文件读取/解析失败、取值非法
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut raw = match path {
            Some(p) => read_config_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => read_config_file(&p)?,
                _ => {
                    debug!("未找到配置文件，使用默认配置");
                    ReportConfig::default()
                }
            },
        };

        apply_overrides(&mut raw, |key| std::env::var(key).ok())?;
        info!(config = ?raw, "配置加载完成");

        Self::from_config(raw)
    }

    pub fn report_config(&self) -> &ReportConfig {
        &self.raw
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.raw.output_dir)
    }

    pub fn locale(&self) -> &str {
        &self.raw.locale
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            raw: ReportConfig::default(),
            delimiter: b';',
            encoding: encoding_rs::WINDOWS_1252,
        }
    }
}

impl ParseConfigReader for ConfigManager {
    fn csv_delimiter(&self) -> u8 {
        self.delimiter
    }

    fn csv_encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn preview_rows(&self) -> usize {
        self.raw.preview_rows
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agency-ecart-report").join("config.json"))
}

fn read_config_file(path: &Path) -> Result<ReportConfig, ConfigError> {
    let read_error = |message: String| ConfigError::ReadError {
        path: path.display().to_string(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| read_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| read_error(e.to_string()))
}

fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::InvalidValue {
            key: config_keys::CSV_DELIMITER.to_string(),
            value: value.to_string(),
            message: "un seul caractère ASCII attendu".to_string(),
        }),
    }
}

/// 环境变量覆写
///
/// lookup 参数便于测试注入，生产环境为 std::env::var
pub fn apply_overrides<F>(config: &mut ReportConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(config_keys::ENV_DELIMITER) {
        config.csv_delimiter = v;
    }
    if let Some(v) = lookup(config_keys::ENV_ENCODING) {
        config.csv_encoding = v;
    }
    if let Some(v) = lookup(config_keys::ENV_PREVIEW_ROWS) {
        config.preview_rows = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: config_keys::PREVIEW_ROWS.to_string(),
            value: v.clone(),
            message: "entier positif attendu".to_string(),
        })?;
    }
    if let Some(v) = lookup(config_keys::ENV_OUTPUT_DIR) {
        config.output_dir = v;
    }
    if let Some(v) = lookup(config_keys::ENV_LOCALE) {
        config.locale = v;
    }
    Ok(())
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // JSON 键
    pub const CSV_DELIMITER: &str = "csv_delimiter";
    pub const CSV_ENCODING: &str = "csv_encoding";
    pub const PREVIEW_ROWS: &str = "preview_rows";

    // 环境变量
    pub const ENV_DELIMITER: &str = "AGENCY_ECART_DELIMITER";
    pub const ENV_ENCODING: &str = "AGENCY_ECART_ENCODING";
    pub const ENV_PREVIEW_ROWS: &str = "AGENCY_ECART_PREVIEW_ROWS";
    pub const ENV_OUTPUT_DIR: &str = "AGENCY_ECART_OUTPUT_DIR";
    pub const ENV_LOCALE: &str = "AGENCY_ECART_LOCALE";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let manager = ConfigManager::from_config(ReportConfig::default()).unwrap();
        assert_eq!(manager.csv_delimiter(), b';');
        assert_eq!(manager.csv_encoding(), encoding_rs::WINDOWS_1252);
        assert_eq!(manager.preview_rows(), 10);
    }

    #[test]
    fn test_latin1_label_is_accepted() {
        let cfg = ReportConfig {
            csv_encoding: "latin1".to_string(),
            ..Default::default()
        };
        assert!(ConfigManager::from_config(cfg).is_ok());
    }

    #[test]
    fn test_invalid_delimiter_rejected() {
        let cfg = ReportConfig {
            csv_delimiter: ";;".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ConfigManager::from_config(cfg),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let cfg = ReportConfig {
            csv_encoding: "klingon".to_string(),
            ..Default::default()
        };
        assert!(ConfigManager::from_config(cfg).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (config_keys::ENV_DELIMITER, ","),
            (config_keys::ENV_PREVIEW_ROWS, "5"),
        ]
        .into_iter()
        .collect();

        let mut cfg = ReportConfig::default();
        apply_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.csv_delimiter, ",");
        assert_eq!(cfg.preview_rows, 5);
        assert_eq!(cfg.output_dir, ".");
    }

    #[test]
    fn test_env_override_invalid_number() {
        let mut cfg = ReportConfig::default();
        let result = apply_overrides(&mut cfg, |k| {
            (k == config_keys::ENV_PREVIEW_ROWS).then(|| "dix".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"csv_delimiter": ",", "output_dir": "/tmp/rapports"}}"#).unwrap();

        let manager = ConfigManager::load(Some(file.path())).unwrap();
        assert_eq!(manager.report_config().csv_delimiter, ",");
        assert_eq!(manager.output_dir(), PathBuf::from("/tmp/rapports"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = ConfigManager::load(Some(Path::new("/nonexistent/config.json")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
