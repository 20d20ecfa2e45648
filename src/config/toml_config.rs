use crate::core::pipeline::DEFAULT_ARCHIVE_NAME;
use crate::core::summary::DEFAULT_TOP_AUTHORS;
use crate::core::ConfigProvider;
use crate::utils::error::{InsightError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportInfo,
    pub source: SourceConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub current_year: Option<i32>,
    pub top_authors_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub archive_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InsightError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn archive_name(&self) -> &str {
        self.load
            .archive_name
            .as_deref()
            .unwrap_or(DEFAULT_ARCHIVE_NAME)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.source.data_dir
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn current_year(&self) -> Option<i32> {
        self.analytics.current_year
    }

    fn top_authors_limit(&self) -> usize {
        self.analytics
            .top_authors_limit
            .unwrap_or(DEFAULT_TOP_AUTHORS)
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_path("source.data_dir", &self.source.data_dir)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(limit) = self.analytics.top_authors_limit {
            validation::validate_positive_number("analytics.top_authors_limit", limit, 1)?;
        }
        if let Some(year) = self.analytics.current_year {
            validation::validate_range("analytics.current_year", year, 1900, 2200)?;
        }
        if let Some(name) = &self.load.archive_name {
            validation::validate_non_empty_string("load.archive_name", name)?;
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
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[report]
name = "faculty-report"
description = "Quarterly research insight report"

[source]
data_dir = "./data"

[analytics]
current_year = 2024
top_authors_limit = 3

[load]
output_path = "./output"
output_formats = ["csv", "json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.report.name, "faculty-report");
        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.current_year(), Some(2024));
        assert_eq!(config.top_authors_limit(), 3);
        assert_eq!(config.archive_name(), DEFAULT_ARCHIVE_NAME);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analytics_section_is_optional() {
        let toml_content = r#"
[report]
name = "minimal"

[source]
data_dir = "./data"

[load]
output_path = "./output"
output_formats = ["json"]
archive_name = "minimal.zip"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.current_year(), None);
        assert_eq!(config.top_authors_limit(), DEFAULT_TOP_AUTHORS);
        assert_eq!(config.archive_name(), "minimal.zip");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RESEARCH_INSIGHT_TEST_DATA_DIR", "/srv/facts");

        let toml_content = r#"
[report]
name = "env"

[source]
data_dir = "${RESEARCH_INSIGHT_TEST_DATA_DIR}"

[load]
output_path = "${RESEARCH_INSIGHT_TEST_UNSET_VAR}"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.data_dir, "/srv/facts");
        assert_eq!(
            config.load.output_path,
            "${RESEARCH_INSIGHT_TEST_UNSET_VAR}"
        );

        std::env::remove_var("RESEARCH_INSIGHT_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[report]
name = "bad"

[source]
data_dir = "./data"

[analytics]
top_authors_limit = 0

[load]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[report\nname=").unwrap_err();
        assert!(matches!(err, InsightError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[report]
name = "file-test"

[source]
data_dir = "./data"

[load]
output_path = "./output"
output_formats = ["csv"]

[logging]
verbose = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.report.name, "file-test");
        assert!(config.verbose());
        assert!(!config.json_logs());
    }
}
