#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::model::EngineOptions;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Effective settings after layering command-line flags over a config file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub options: EngineOptions,
    pub meanings_path: Option<String>,
    pub output_format: OutputFormat,
}

impl Settings {
    pub fn from_file_config(file: &TomlConfig) -> Result<Self> {
        file.validate()?;
        Ok(Self {
            options: file.engine_options()?,
            meanings_path: file.meanings_path().map(str::to_string),
            output_format: file.output_format()?,
        })
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Result<Self> {
        let mut settings = match file {
            Some(file) => Self::from_file_config(file)?,
            None => Self::default(),
        };

        if let Some(policy) = cli.destiny_policy()? {
            settings.options.destiny_policy = policy;
        }
        if cli.lunar_adjustment {
            settings.options.lunar_adjustment = true;
        }
        if cli.kua_fills_missing {
            settings.options.kua_fills_missing = true;
        }
        if let Some(path) = &cli.meanings {
            settings.meanings_path = Some(path.clone());
        }
        if cli.json {
            settings.output_format = OutputFormat::Json;
        }

        tracing::debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn engine_options(&self) -> Result<EngineOptions> {
        Ok(self.options)
    }

    fn meanings_path(&self) -> Option<&str> {
        self.meanings_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DestinyPolicy;
    use crate::utils::error::NumerologyError;

    #[test]
    fn test_file_config_rejects_misspelled_values() {
        let bad_policy = TomlConfig::from_toml_str(
            r#"
[engine]
destiny_policy = "integer-sun"
"#,
        )
        .unwrap();
        let err = Settings::from_file_config(&bad_policy).unwrap_err();
        assert!(matches!(err, NumerologyError::ConfigError { ref field, .. } if field == "engine.destiny_policy"));

        let bad_format = TomlConfig::from_toml_str(
            r#"
[output]
format = "jsno"
"#,
        )
        .unwrap();
        let err = Settings::from_file_config(&bad_format).unwrap_err();
        assert!(matches!(err, NumerologyError::ConfigError { ref field, .. } if field == "output.format"));
    }

    #[test]
    fn test_file_config_settings() {
        let file = TomlConfig::from_toml_str(
            r#"
[engine]
destiny_policy = "integer_sum"

[output]
format = "json"
"#,
        )
        .unwrap();
        let settings = Settings::from_file_config(&file).unwrap();
        assert_eq!(settings.options.destiny_policy, DestinyPolicy::IntegerSum);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.meanings_path(), None);
    }
}
