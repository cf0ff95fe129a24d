//! The type database seam.
//!
//! Extraction never looks at source code itself. It asks a [`TypeDatabase`]
//! for the resolved declaration of a qualified type name and for the
//! documentation attached to a source position. [`GoSourceDatabase`]
//! answers from Go source trees, [`InMemoryDatabase`] from values built in
//! code.
//!
//! [`GoSourceDatabase`]: crate::analyzers::go::GoSourceDatabase
//! [`InMemoryDatabase`]: crate::testkit::InMemoryDatabase

use crate::core::errors::Result;
use crate::types::{PackageRef, Signature};
use std::fmt;
use std::path::PathBuf;

/// A location in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: PathBuf,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A method of a resolved interface, embedded methods already flattened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodObject {
    pub name: String,
    pub signature: Signature,
    pub position: Option<Position>,
}

/// Underlying shape of a resolved declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Underlying {
    /// Methods in declaration order.
    Interface(Vec<MethodObject>),
    /// Anything else, described by its kind (`struct`, `func`, `int`, ...).
    Other(String),
}

/// A resolved type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeObject {
    pub name: String,
    pub package: PackageRef,
    pub position: Option<Position>,
    pub underlying: Underlying,
}

impl TypeObject {
    pub fn methods(&self) -> Option<&[MethodObject]> {
        match &self.underlying {
            Underlying::Interface(methods) => Some(methods),
            Underlying::Other(_) => None,
        }
    }
}

pub trait TypeDatabase {
    /// Resolve `name` declared in the package with import path `package`.
    ///
    /// Fails with [`Error::NotFound`](crate::core::errors::Error::NotFound)
    /// when the package has no such declaration.
    fn resolve(&self, package: &str, name: &str) -> Result<TypeObject>;

    /// Leading comment of the smallest declaration enclosing `position`,
    /// or an empty string.
    fn leading_comment(&self, position: &Position) -> String;
}

impl<T: TypeDatabase + ?Sized> TypeDatabase for &T {
    fn resolve(&self, package: &str, name: &str) -> Result<TypeObject> {
        (**self).resolve(package, name)
    }

    fn leading_comment(&self, position: &Position) -> String {
        (**self).leading_comment(position)
    }
}
