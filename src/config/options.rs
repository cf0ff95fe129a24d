use crate::core::errors::{Error, Result};
use std::fmt;

pub const DEFAULT_FACTORY_FUNCTION_NAME: &str = "WithMiddleware";
pub const DEFAULT_PARAM_PREFIX: &str = "param";
pub const DEFAULT_RESULT_PREFIX: &str = "ret";

/// A `path/to/package.Type` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceQuery {
    pub package: String,
    pub name: String,
}

impl InterfaceQuery {
    /// Split at the last `.`; both halves must be non-empty.
    ///
    /// `gopkg.in/yaml.v3.Marshaler` is package `gopkg.in/yaml.v3`, type
    /// `Marshaler`.
    pub fn parse(query: &str) -> Result<Self> {
        let query = query.trim();
        match query.rsplit_once('.') {
            Some((package, name)) if !package.is_empty() && !name.is_empty() => Ok(Self {
                package: package.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::InvalidQuery(query.to_string())),
        }
    }
}

impl fmt::Display for InterfaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Everything the extraction pipeline needs besides the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub query: InterfaceQuery,
    /// `package.Type` or `Type` override for the generated wrapper.
    pub wrapper: Option<String>,
    pub factory_function_name: String,
    /// Prefix for unnamed parameters.
    pub param_prefix: String,
    /// Prefix for unnamed results.
    pub result_prefix: String,
}

impl GeneratorOptions {
    pub fn new(query: InterfaceQuery) -> Self {
        Self {
            query,
            wrapper: None,
            factory_function_name: DEFAULT_FACTORY_FUNCTION_NAME.to_string(),
            param_prefix: DEFAULT_PARAM_PREFIX.to_string(),
            result_prefix: DEFAULT_RESULT_PREFIX.to_string(),
        }
    }
}
