//! Core data model and error types.

pub mod errors;
pub mod model;

pub use errors::{Error, Result};
pub use model::{
    InterfaceModel, MethodModel, ModuleReference, NamingConfig, Parameter, TypeDescriptor,
};
