// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod database;
pub mod extraction;
pub mod io;
pub mod testkit;
pub mod types;

// Re-export commonly used types
pub use crate::core::{
    Error, InterfaceModel, MethodModel, ModuleReference, NamingConfig, Parameter, Result,
    TypeDescriptor,
};

pub use crate::config::{GeneratorOptions, InterfaceQuery};

pub use crate::database::{MethodObject, Position, TypeDatabase, TypeObject, Underlying};

pub use crate::extraction::{build_interface, extract_interface, fixup_methods};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::analyzers::go::{GoSourceDatabase, SearchConfig};
