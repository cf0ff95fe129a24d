//! Configuration: the interface query, naming prefixes and the optional
//! `.middleware-gen.toml` project file.

pub mod core;
pub mod loader;
pub mod options;

pub use self::core::{MiddlewareGenConfig, CONFIG_FILE_NAME};
pub use loader::{load_config, parse_and_validate_config};
pub use options::{
    GeneratorOptions, InterfaceQuery, DEFAULT_FACTORY_FUNCTION_NAME, DEFAULT_PARAM_PREFIX,
    DEFAULT_RESULT_PREFIX,
};
