//! Resolved Go types as handed out by a [`TypeDatabase`](crate::database::TypeDatabase).
//!
//! The shape set is closed: every type a database returns is one of the
//! [`GoType`] variants, and anything a database cannot express structurally
//! is carried as [`GoType::Opaque`] with its source text.

use std::fmt;

/// The package that declares a named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    /// Package clause name, e.g. `ast`.
    pub name: String,
    /// Import path, e.g. `go/ast`.
    pub path: String,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    /// Predeclared basic type (`int`, `string`, `byte`, ...).
    Basic(String),
    /// Declared type. `package` is `None` for universe types such as `error`.
    Named {
        name: String,
        package: Option<PackageRef>,
    },
    Pointer(Box<GoType>),
    Slice(Box<GoType>),
    /// `len` is kept as written (a literal or a constant name).
    Array { len: String, elem: Box<GoType> },
    Map { key: Box<GoType>, value: Box<GoType> },
    Chan { dir: ChanDir, elem: Box<GoType> },
    Func(Signature),
    /// Shape without structural support (struct and interface literals,
    /// generic instantiations, type parameters, unresolvable names).
    Opaque(String),
}

impl GoType {
    pub fn basic(name: impl Into<String>) -> Self {
        Self::Basic(name.into())
    }

    pub fn named(name: impl Into<String>, package: Option<PackageRef>) -> Self {
        Self::Named {
            name: name.into(),
            package,
        }
    }

    pub fn pointer(elem: GoType) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: GoType) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn array(len: impl Into<String>, elem: GoType) -> Self {
        Self::Array {
            len: len.into(),
            elem: Box::new(elem),
        }
    }

    pub fn map(key: GoType, value: GoType) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: GoType) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// The universe `error` interface.
    pub fn error() -> Self {
        Self::named("error", None)
    }
}

/// One parameter or result of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// `None` when the source leaves the position unnamed.
    pub name: Option<String>,
    pub ty: GoType,
}

impl Variable {
    pub fn named(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: GoType) -> Self {
        Self { name: None, ty }
    }
}

/// A method or function signature.
///
/// When `variadic` is set the last parameter has type `Slice(T)` for a
/// declared `...T`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Variable>,
    pub results: Vec<Variable>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Variable>, results: Vec<Variable>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

impl fmt::Display for ChanDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChanDir::Both => write!(f, "chan"),
            ChanDir::Send => write!(f, "chan<-"),
            ChanDir::Recv => write!(f, "<-chan"),
        }
    }
}
