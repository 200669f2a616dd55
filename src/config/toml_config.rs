use crate::utils::error::{CmpError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub compare: Option<CompareConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    pub identity_field: Option<String>,
    /// 設定時會取代預設的排除欄位
    pub excluded_fields: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CmpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CmpError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOG_IDENTITY_FIELD})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CmpError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn identity_field(&self) -> Option<&str> {
        self.compare.as_ref()?.identity_field.as_deref()
    }

    pub fn excluded_fields(&self) -> Option<&[String]> {
        self.compare.as_ref()?.excluded_fields.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(identity_field) = self.identity_field() {
            validation::validate_non_empty_string("compare.identity_field", identity_field)?;
        }
        if let Some(excluded) = self.excluded_fields() {
            validation::validate_field_names("compare.excluded_fields", excluded)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_compare_table() {
        let toml_content = r#"
[compare]
identity_field = "targetLabel"
excluded_fields = ["walltime", "startTime"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.identity_field(), Some("targetLabel"));
        assert_eq!(
            config.excluded_fields(),
            Some(&["walltime".to_string(), "startTime".to_string()][..])
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.identity_field().is_none());
        assert!(config.excluded_fields().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CMP_TEST_IDENTITY_FIELD", "mnemonic");

        let toml_content = r#"
[compare]
identity_field = "${CMP_TEST_IDENTITY_FIELD}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.identity_field(), Some("mnemonic"));

        std::env::remove_var("CMP_TEST_IDENTITY_FIELD");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[compare]
identity_field = "  "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[compare]
excluded_fields = ["walltime", ""]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[compare\nidentity_field = 1");
        assert!(matches!(result, Err(CmpError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[compare]\nidentity_field = \"progressMessage\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.identity_field(), Some("progressMessage"));
    }
}
