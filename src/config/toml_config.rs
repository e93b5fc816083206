use crate::config::OutputFormat;
use crate::domain::model::{DestinyPolicy, EngineOptions};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{NumerologyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];
pub const DESTINY_POLICIES: [&str; 2] = ["digit_sum", "integer_sum"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub meanings: Option<MeaningsConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub destiny_policy: Option<String>,
    pub lunar_adjustment: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub kua_fills_missing: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeaningsConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NumerologyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NumerologyError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NUMEROLOGY_DATA})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NumerologyError::ConfigError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(policy) = &self.engine.destiny_policy {
            validate_one_of("engine.destiny_policy", policy, &DESTINY_POLICIES)?;
        }

        if let Some(meanings) = &self.meanings {
            validate_non_empty_string("meanings.path", &meanings.path).map_err(|_| {
                NumerologyError::ConfigError {
                    field: "meanings.path".to_string(),
                    message: "Path cannot be empty".to_string(),
                }
            })?;
        }

        if let Some(format) = &self.output.format {
            validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }

        Ok(())
    }

    pub fn destiny_policy(&self) -> Result<DestinyPolicy> {
        match &self.engine.destiny_policy {
            Some(policy) => {
                validate_one_of("engine.destiny_policy", policy, &DESTINY_POLICIES)?;
                policy.parse()
            }
            None => Ok(DestinyPolicy::default()),
        }
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        match self.output.format.as_deref() {
            None | Some("text") => Ok(OutputFormat::Text),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => Err(NumerologyError::ConfigError {
                field: "output.format".to_string(),
                message: format!(
                    "Unsupported value '{}'. Valid values: {}",
                    other,
                    OUTPUT_FORMATS.join(", ")
                ),
            }),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn engine_options(&self) -> Result<EngineOptions> {
        Ok(EngineOptions {
            destiny_policy: self.destiny_policy()?,
            lunar_adjustment: self.engine.lunar_adjustment.unwrap_or(false),
            kua_fills_missing: self.analysis.kua_fills_missing.unwrap_or(false),
        })
    }

    fn meanings_path(&self) -> Option<&str> {
        self.meanings.as_ref().map(|m| m.path.as_str())
    }
}

impl Validate for TomlConfig {
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
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[engine]
destiny_policy = "integer_sum"
lunar_adjustment = true

[analysis]
kua_fills_missing = true

[meanings]
path = "data/meanings.json"

[output]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let options = config.engine_options().unwrap();
        assert_eq!(options.destiny_policy, DestinyPolicy::IntegerSum);
        assert!(options.lunar_adjustment);
        assert!(options.kua_fills_missing);
        assert_eq!(config.meanings_path(), Some("data/meanings.json"));
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine_options().unwrap(), EngineOptions::default());
        assert_eq!(config.meanings_path(), None);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NUMEROLOGY_TEST_DATA_DIR", "/srv/numerology");

        let toml_content = r#"
[meanings]
path = "${NUMEROLOGY_TEST_DATA_DIR}/meanings.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.meanings_path(),
            Some("/srv/numerology/meanings.json")
        );

        std::env::remove_var("NUMEROLOGY_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_policy = TomlConfig::from_toml_str(
            r#"
[engine]
destiny_policy = "concatenation"
"#,
        )
        .unwrap();
        assert!(bad_policy.validate().is_err());
        assert!(bad_policy.engine_options().is_err());

        let bad_format = TomlConfig::from_toml_str(
            r#"
[output]
format = "html"
"#,
        )
        .unwrap();
        assert!(bad_format.validate().is_err());
        assert!(bad_format.output_format().is_err());

        let empty_path = TomlConfig::from_toml_str(
            r#"
[meanings]
path = "  "
"#,
        )
        .unwrap();
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[engine\nlunar_adjustment = ").unwrap_err();
        assert!(matches!(err, NumerologyError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[engine]\ndestiny_policy = \"digit_sum\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.destiny_policy().unwrap(), DestinyPolicy::DigitSum);
    }
}
