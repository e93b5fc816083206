use crate::domain::model::{BirthDate, DestinyPolicy, Gender};
use crate::utils::error::{NumerologyError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use chrono::NaiveTime;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "numerology")]
#[command(about = "Compute a numerology profile from a birth date")]
pub struct CliConfig {
    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    pub dob: String,

    /// male or female; enables the KUA number
    #[arg(long)]
    pub gender: Option<String>,

    /// Birth time as HH:MM, shown in the report header
    #[arg(long)]
    pub time: Option<String>,

    /// Birth place, shown in the report header
    #[arg(long)]
    pub place: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a meanings.json interpretation file
    #[arg(long)]
    pub meanings: Option<String>,

    /// digit-sum or integer-sum
    #[arg(long)]
    pub destiny_policy: Option<String>,

    #[arg(long, help = "Use the previous year for KUA before the lunar new year cutoff")]
    pub lunar_adjustment: bool,

    #[arg(long, help = "Treat the KUA number as present when listing missing digits")]
    pub kua_fills_missing: bool,

    #[arg(long, help = "Print the profile as JSON instead of a text report")]
    pub json: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn birth_date(&self) -> Result<BirthDate> {
        self.dob.parse()
    }

    pub fn gender(&self) -> Result<Option<Gender>> {
        self.gender.as_deref().map(str::parse::<Gender>).transpose()
    }

    pub fn destiny_policy(&self) -> Result<Option<DestinyPolicy>> {
        self.destiny_policy.as_deref().map(str::parse::<DestinyPolicy>).transpose()
    }

    pub fn birth_time(&self) -> Result<Option<NaiveTime>> {
        self.time
            .as_deref()
            .map(|t| {
                NaiveTime::parse_from_str(t.trim(), "%H:%M").map_err(|e| {
                    NumerologyError::invalid_input("time", t, format!("Expected HH:MM: {}", e))
                })
            })
            .transpose()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("dob", &self.dob)?;
        self.birth_date()?;
        self.gender()?;
        self.destiny_policy()?;
        self.birth_time()?;
        if let Some(path) = &self.meanings {
            validate_non_empty_string("meanings", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("numerology").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_minimal_args() {
        let config = parse(&["--dob", "1990-07-16"]);
        assert!(config.validate().is_ok());
        assert_eq!(config.gender().unwrap(), None);
        assert_eq!(config.destiny_policy().unwrap(), None);
        assert!(!config.json);
    }

    #[test]
    fn test_parse_full_args() {
        let config = parse(&[
            "--dob",
            "1990-07-16",
            "--gender",
            "female",
            "--time",
            "06:45",
            "--place",
            "Pune, India",
            "--destiny-policy",
            "integer-sum",
            "--lunar-adjustment",
            "--json",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.gender().unwrap(), Some(Gender::Female));
        assert_eq!(
            config.destiny_policy().unwrap(),
            Some(DestinyPolicy::IntegerSum)
        );
        assert_eq!(
            config.birth_time().unwrap(),
            NaiveTime::from_hms_opt(6, 45, 0)
        );
        assert!(config.lunar_adjustment);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(parse(&["--dob", "1990-04-31"]).validate().is_err());
        assert!(parse(&["--dob", "1990-07-16", "--gender", "x"])
            .validate()
            .is_err());
        assert!(parse(&["--dob", "1990-07-16", "--time", "25:00"])
            .validate()
            .is_err());
    }
}
