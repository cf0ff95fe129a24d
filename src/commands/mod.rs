//! CLI command implementations.
//!
//! - **generate**: build the model of one Go interface and render it

pub mod generate;

pub use generate::{generate, resolve_settings, GenerateConfig, Settings};
