use crate::core::model::InterfaceModel;
use crate::io::writers::{GoWriter, JsonWriter};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Generated Go middleware source
    #[default]
    Go,
    /// The interface model as pretty JSON
    Json,
}

pub trait OutputWriter {
    fn write_model(&mut self, model: &InterfaceModel) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Go => Box::new(GoWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

/// The `--output` file (created or truncated), or stdout when absent.
pub fn open_destination(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::NamingConfig;
    use tempfile::TempDir;

    fn model() -> InterfaceModel {
        InterfaceModel {
            name: "Reader".into(),
            documentation: String::new(),
            methods: Vec::new(),
            references: Vec::new(),
            naming: NamingConfig {
                wrapper_type_name: "reader".into(),
                wrapper_package_name: "io".into(),
                factory_function_name: "WithMiddleware".into(),
            },
        }
    }

    #[test]
    fn test_create_writer_dispatches_on_format() {
        let mut json = Vec::new();
        create_writer(OutputFormat::Json, &mut json)
            .write_model(&model())
            .unwrap();
        assert!(String::from_utf8(json).unwrap().starts_with('{'));

        let mut go = Vec::new();
        create_writer(OutputFormat::Go, &mut go)
            .write_model(&model())
            .unwrap();
        assert!(String::from_utf8(go).unwrap().contains("package io"));
    }

    #[test]
    fn test_open_destination_truncates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        std::fs::write(&path, "stale contents that are longer").unwrap();

        {
            let mut out = open_destination(Some(&path)).unwrap();
            out.write_all(b"fresh").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_format_names() {
        let format: OutputFormat = serde_json::from_str("\"go\"").unwrap();
        assert_eq!(format, OutputFormat::Go);
        assert_eq!(OutputFormat::default(), OutputFormat::Go);
    }
}
