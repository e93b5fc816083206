use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumerologyError {
    #[error("Invalid input for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Reason carried by `InvalidInput` when a required field was not given.
pub const MISSING: &str = "missing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NumerologyError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_input(field: impl Into<String>) -> Self {
        Self::invalid_input(field, "", MISSING)
    }

    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::InvalidInput { reason, .. } if reason == MISSING)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidInput { .. }
            | Self::ConfigError { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidInput { field, reason, .. } if reason == MISSING => {
                format!("Provide a value for '{}'", field)
            }
            Self::InvalidInput { field, .. } => {
                format!("Check the value given for '{}' and try again", field)
            }
            Self::ConfigError { field, .. } => {
                format!("Fix '{}' in the configuration file or pass it as a flag", field)
            }
            Self::IoError(_) => "Make sure the file exists and is readable".to_string(),
            Self::SerializationError(_) => {
                "Make sure the meanings file is valid JSON in the expected shape".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason, .. } if reason == MISSING => {
                format!("Please fill in the {} field", field)
            }
            Self::InvalidInput { field, value, .. } => {
                format!("'{}' is not a valid {}", value, field)
            }
            Self::ConfigError { message, .. } => format!("Configuration problem: {}", message),
            Self::IoError(e) => format!("Could not read a required file: {}", e),
            Self::SerializationError(e) => format!("Could not parse data file: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, NumerologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_high_severity() {
        let err = NumerologyError::missing_input("year");
        assert!(matches!(
            err,
            NumerologyError::InvalidInput { ref field, ref value, ref reason }
                if field == "year" && value.is_empty() && reason == MISSING
        ));
        assert!(err.is_missing_input());
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Please fill in the year field");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = NumerologyError::invalid_input("dob", "1990-02-30", "not a calendar date");
        assert_eq!(
            err.to_string(),
            "Invalid input for dob: '1990-02-30' (not a calendar date)"
        );
    }
}
