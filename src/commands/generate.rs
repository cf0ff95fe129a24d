use crate::analyzers::go::{GoSourceDatabase, SearchConfig};
use crate::cli::Cli;
use crate::config::{load_config, GeneratorOptions, InterfaceQuery, MiddlewareGenConfig};
use crate::extraction::build_interface;
use crate::io::output::{create_writer, open_destination, OutputFormat};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Inputs of one generation run, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    pub interface: String,
    pub wrapper: Option<String>,
    pub function_name: Option<String>,
    pub param_prefix: Option<String>,
    pub result_prefix: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub dir: PathBuf,
    pub search_paths: Vec<PathBuf>,
}

impl From<Cli> for GenerateConfig {
    fn from(cli: Cli) -> Self {
        Self {
            interface: cli.interface,
            wrapper: cli.wrapper,
            function_name: cli.function_name,
            param_prefix: cli.param_prefix,
            result_prefix: cli.result_prefix,
            format: cli.format,
            output: cli.output,
            dir: cli.dir,
            search_paths: cli.search_paths,
        }
    }
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: GeneratorOptions,
    pub format: OutputFormat,
    pub search_paths: Vec<PathBuf>,
}

/// Command line flag, then config file, then built-in default.
pub fn resolve_settings(
    config: &GenerateConfig,
    file: MiddlewareGenConfig,
) -> crate::core::errors::Result<Settings> {
    let query = InterfaceQuery::parse(&config.interface)?;
    let mut options = GeneratorOptions::new(query);
    options.wrapper = config.wrapper.clone();

    if let Some(name) = config.function_name.clone().or(file.factory_function_name) {
        options.factory_function_name = name;
    }
    if let Some(prefix) = config.param_prefix.clone().or(file.param_prefix) {
        options.param_prefix = prefix;
    }
    if let Some(prefix) = config.result_prefix.clone().or(file.result_prefix) {
        options.result_prefix = prefix;
    }

    let search_paths = if config.search_paths.is_empty() {
        file.search_paths.unwrap_or_default()
    } else {
        config.search_paths.clone()
    };

    Ok(Settings {
        options,
        format: config.format.or(file.format).unwrap_or_default(),
        search_paths,
    })
}

pub fn generate(config: GenerateConfig) -> Result<()> {
    // Reject a malformed query before touching the file system.
    InterfaceQuery::parse(&config.interface)?;

    let dir = fs::canonicalize(&config.dir)
        .with_context(|| format!("Cannot access directory {}", config.dir.display()))?;
    let settings = resolve_settings(&config, load_config(&dir))?;
    log::debug!("Effective settings: {settings:?}");

    let db = GoSourceDatabase::new(SearchConfig::from_environment(&dir, settings.search_paths));
    let model = build_interface(&db, &settings.options)?;

    let destination = open_destination(config.output.as_deref())?;
    create_writer(settings.format, destination).write_model(&model)?;

    if let Some(output) = &config.output {
        log::info!("Wrote {} to {}", model.name, output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::Error;
    use pretty_assertions::assert_eq;

    fn config(interface: &str) -> GenerateConfig {
        GenerateConfig {
            interface: interface.into(),
            dir: PathBuf::from("."),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_apply_without_flags_or_file() {
        let settings = resolve_settings(&config("io.Reader"), MiddlewareGenConfig::default()).unwrap();
        assert_eq!(settings.options.factory_function_name, "WithMiddleware");
        assert_eq!(settings.options.param_prefix, "param");
        assert_eq!(settings.options.result_prefix, "ret");
        assert_eq!(settings.format, OutputFormat::Go);
        assert!(settings.search_paths.is_empty());
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = MiddlewareGenConfig {
            factory_function_name: Some("FromFile".into()),
            param_prefix: Some("arg".into()),
            result_prefix: Some("out".into()),
            search_paths: Some(vec![PathBuf::from("/file")]),
            format: Some(OutputFormat::Json),
        };
        let mut flags = config("io.Reader");
        flags.function_name = Some("FromFlag".into());
        flags.search_paths = vec![PathBuf::from("/flag")];

        let settings = resolve_settings(&flags, file).unwrap();
        assert_eq!(settings.options.factory_function_name, "FromFlag");
        assert_eq!(settings.options.param_prefix, "arg");
        assert_eq!(settings.options.result_prefix, "out");
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.search_paths, vec![PathBuf::from("/flag")]);
    }

    #[test]
    fn test_invalid_query_is_rejected() {
        let err = resolve_settings(&config("Reader"), MiddlewareGenConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }
}
