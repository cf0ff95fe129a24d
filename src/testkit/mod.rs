//! Testing infrastructure for middleware-gen.
//!
//! - **[`InMemoryDatabase`]**: a [`TypeDatabase`](crate::database::TypeDatabase)
//!   built in code, so extraction can be tested without Go sources on disk
//! - **Assertion macros**: Result assertions with location info
//! - **[`GoPackageFixture`]**: writes a throwaway Go module to a temp
//!   directory for adapter-level tests

pub mod assertions;
pub mod fixtures;
pub mod memory_db;

pub use fixtures::GoPackageFixture;
pub use memory_db::{InMemoryDatabase, InterfaceBuilder};
