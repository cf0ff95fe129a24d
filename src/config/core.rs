use crate::io::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = ".middleware-gen.toml";

/// Root configuration structure read from `.middleware-gen.toml`
///
/// Every field is optional; command line flags win over file values and
/// file values win over built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MiddlewareGenConfig {
    /// Name of the generated factory function
    #[serde(default)]
    pub factory_function_name: Option<String>,

    /// Prefix for unnamed method parameters
    #[serde(default)]
    pub param_prefix: Option<String>,

    /// Prefix for unnamed method results
    #[serde(default)]
    pub result_prefix: Option<String>,

    /// Extra `src`-style roots searched for imported packages
    #[serde(default)]
    pub search_paths: Option<Vec<PathBuf>>,

    /// Output format
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl MiddlewareGenConfig {
    /// Check values that parse fine but cannot produce valid Go identifiers.
    pub fn validate(&self) -> Result<(), String> {
        let identifiers = [
            ("factory_function_name", &self.factory_function_name),
            ("param_prefix", &self.param_prefix),
            ("result_prefix", &self.result_prefix),
        ];
        for (field, value) in identifiers {
            if let Some(value) = value {
                if !is_identifier_prefix(value) {
                    return Err(format!("{field} {value:?} is not a valid Go identifier"));
                }
            }
        }
        Ok(())
    }
}

fn is_identifier_prefix(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_identifiers() {
        let config = MiddlewareGenConfig {
            param_prefix: Some("arg".into()),
            result_prefix: Some("out_".into()),
            factory_function_name: Some("WithLogging".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let config = MiddlewareGenConfig {
            param_prefix: Some("1st".into()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("param_prefix"));
    }
}
