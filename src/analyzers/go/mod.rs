//! Go source analysis
//!
//! Answers [`TypeDatabase`](crate::database::TypeDatabase) queries straight
//! from Go source trees, without the Go toolchain:
//!
//! - Package location (main module, `replace`, `vendor/`, module cache,
//!   GOPATH, GOROOT)
//! - Parsing with tree-sitter-go
//! - Name resolution and interface flattening
//! - Leading comment lookup
//!
//! # Example
//!
//! ```ignore
//! use middleware_gen::analyzers::go::{GoSourceDatabase, SearchConfig};
//! use middleware_gen::database::TypeDatabase;
//!
//! let db = GoSourceDatabase::new(SearchConfig::from_environment(&cwd, vec![]));
//! let reader = db.resolve("io", "Reader")?;
//! ```

pub mod comments;
pub mod database;
pub mod gomod;
pub mod loader;
pub mod parser;
pub mod resolve;
pub mod syntax;

pub use database::GoSourceDatabase;
pub use loader::{GoPackage, PackageLocator, SearchConfig};
pub use parser::parse_source;
