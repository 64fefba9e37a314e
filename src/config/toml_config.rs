use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default Gmail search, aimed at registration / verification / welcome mail.
pub const DEFAULT_GMAIL_QUERY: &str = "in:anywhere (\
subject:(welcome OR verify OR verification OR confirm OR confirmation \
OR 登録 OR 認証 OR 認証コード OR アカウント OR パスワード) \
OR \"confirm your email\" OR \"verify your email\"\
)";

pub const DEFAULT_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";
pub const DEFAULT_MAX_MESSAGES: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub gmail: GmailConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmailConfig {
    pub query: String,
    pub max_messages: usize,
    pub api_base: String,
    pub access_token: Option<String>,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            query: DEFAULT_GMAIL_QUERY.to_string(),
            max_messages: DEFAULT_MAX_MESSAGES,
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub sites_csv: String,
    pub catalog_csv: String,
    pub categories_yaml: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            sites_csv: "sites_from_gmail.csv".to_string(),
            catalog_csv: "sites_catalog.csv".to_string(),
            categories_yaml: "categories.yml".to_string(),
        }
    }
}

impl AuditConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GMAIL_ACCESS_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AuditError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks the settings both stages share.
    pub fn validate_config(&self) -> Result<()> {
        validate_url("gmail.api_base", &self.gmail.api_base)?;
        validate_positive_number("gmail.max_messages", self.gmail.max_messages, 1)?;
        validate_non_empty_string("gmail.query", &self.gmail.query)?;

        validate_path("output.directory", &self.output.directory)?;
        validate_file_extension("output.sites_csv", &self.output.sites_csv, &["csv"])?;
        validate_file_extension("output.catalog_csv", &self.output.catalog_csv, &["csv"])?;
        validate_file_extension(
            "output.categories_yaml",
            &self.output.categories_yaml,
            &["yml", "yaml"],
        )?;

        Ok(())
    }
}

impl Validate for AuditConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config, AuditConfig::default());
        assert_eq!(config.gmail.max_messages, 500);
        assert_eq!(config.output.sites_csv, "sites_from_gmail.csv");
        assert!(config.gmail.query.starts_with("in:anywhere ("));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[gmail]
max_messages = 50
query = "subject:welcome"

[output]
directory = "./audit"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gmail.max_messages, 50);
        assert_eq!(config.gmail.query, "subject:welcome");
        assert_eq!(config.gmail.api_base, DEFAULT_API_BASE);
        assert_eq!(config.output.directory, "./audit");
        assert_eq!(config.output.catalog_csv, "sites_catalog.csv");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GMAIL_AUDIT_TEST_TOKEN", "ya29.secret");

        let toml_content = r#"
[gmail]
access_token = "${GMAIL_AUDIT_TEST_TOKEN}"
api_base = "${GMAIL_AUDIT_TEST_UNSET_VAR}"
"#;

        let config = AuditConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gmail.access_token.as_deref(), Some("ya29.secret"));
        assert_eq!(config.gmail.api_base, "${GMAIL_AUDIT_TEST_UNSET_VAR}");

        std::env::remove_var("GMAIL_AUDIT_TEST_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let mut config = AuditConfig::default();
        config.gmail.max_messages = 0;
        assert!(config.validate().is_err());

        let mut config = AuditConfig::default();
        config.output.categories_yaml = "categories.json".to_string();
        assert!(config.validate().is_err());

        let mut config = AuditConfig::default();
        config.gmail.api_base = "invalid-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AuditConfig::from_toml_str("[gmail\nmax_messages = 1").unwrap_err();
        assert!(matches!(err, AuditError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\ncatalog_csv = \"catalog.csv\"\n")
            .unwrap();

        let config = AuditConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.catalog_csv, "catalog.csv");
    }
}
