//! Owned, unresolved view of the Go declarations extraction cares about.
//!
//! Tree-sitter nodes borrow their tree, so the parser copies type
//! expressions out into these plain values once per file. Names are still
//! unresolved here; `resolve` turns them into [`GoType`](crate::types::GoType)s.

use crate::types::ChanDir;
use std::path::PathBuf;
use tree_sitter::Tree;

/// A parsed `.go` file.
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
    pub package_name: String,
    pub imports: Vec<ImportSpec>,
    pub type_specs: Vec<TypeSpec>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("package_name", &self.package_name)
            .field("imports", &self.imports)
            .field("type_specs", &self.type_specs.len())
            .finish()
    }
}

/// `import name "path"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit local name, including `.` and `_`.
    pub name: Option<String>,
    pub path: String,
}

/// Location of a declared name inside its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
}

/// A top-level `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub span: Span,
    /// `type A = B`
    pub is_alias: bool,
    pub type_params: Vec<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Name(String),
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func(FuncExpr),
    Interface { elems: Vec<InterfaceElem>, text: String },
    /// Struct types, generic instantiations and anything else kept as text.
    Other { kind: String, text: String },
}

impl TypeExpr {
    /// Short kind used in error messages (`struct`, `map`, `func`, ...).
    pub fn kind(&self) -> String {
        match self {
            TypeExpr::Name(name) => name.clone(),
            TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
            TypeExpr::Pointer(_) => "pointer".into(),
            TypeExpr::Slice(_) => "slice".into(),
            TypeExpr::Array { .. } => "array".into(),
            TypeExpr::Map { .. } => "map".into(),
            TypeExpr::Chan { .. } => "chan".into(),
            TypeExpr::Func(_) => "func".into(),
            TypeExpr::Interface { .. } => "interface".into(),
            TypeExpr::Other { kind, .. } => kind.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncExpr {
    pub params: Vec<ParamExpr>,
    pub results: Vec<ParamExpr>,
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamExpr {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    Method {
        name: String,
        func: FuncExpr,
        span: Span,
    },
    /// An embedded interface name.
    Embedded(TypeExpr),
    /// Union or approximation element of a constraint; contributes no methods.
    TypeSet(String),
}
