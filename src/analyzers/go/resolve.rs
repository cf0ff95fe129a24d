//! Name resolution and interface flattening.
//!
//! A [`Scope`] is one file of one package: unqualified names are looked up
//! in the package (then in dot imports), qualified names through the file's
//! import table. Declarations in other packages are resolved in their own
//! scope.

use super::database::GoSourceDatabase;
use super::loader::GoPackage;
use super::syntax::{FuncExpr, InterfaceElem, ParamExpr, SourceFile, Span, TypeExpr, TypeSpec};
use crate::database::{MethodObject, Position, Underlying};
use crate::types::{GoType, PackageRef, Signature, Variable};
use std::collections::HashSet;

/// Predeclared types that are not `error`.
pub const BASIC_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "byte",
    "rune",
    "any",
    "comparable",
];

const MAX_ALIAS_DEPTH: usize = 16;

/// (import path, type name)
type DeclKey = (String, String);

pub(crate) struct Scope<'a> {
    db: &'a GoSourceDatabase,
    package: &'a GoPackage,
    file: &'a SourceFile,
    type_params: &'a [String],
}

impl<'a> Scope<'a> {
    pub fn new(
        db: &'a GoSourceDatabase,
        package: &'a GoPackage,
        file: &'a SourceFile,
        type_params: &'a [String],
    ) -> Self {
        Self {
            db,
            package,
            file,
            type_params,
        }
    }

    pub fn position(&self, span: Span) -> Position {
        Position {
            file: self.file.path.clone(),
            offset: span.offset,
            line: span.line,
            column: span.column,
        }
    }

    fn package_ref(&self) -> PackageRef {
        PackageRef::new(self.package.name.clone(), self.package.path.clone())
    }

    pub fn resolve_type(&self, expr: &TypeExpr) -> GoType {
        self.resolve_at(expr, 0)
    }

    fn resolve_at(&self, expr: &TypeExpr, depth: usize) -> GoType {
        match expr {
            TypeExpr::Name(name) => self.resolve_name(name, depth),
            TypeExpr::Qualified { package, name } => self.resolve_qualified(package, name, depth),
            TypeExpr::Pointer(elem) => GoType::pointer(self.resolve_at(elem, depth)),
            TypeExpr::Slice(elem) => GoType::slice(self.resolve_at(elem, depth)),
            TypeExpr::Array { len, elem } => GoType::array(len.clone(), self.resolve_at(elem, depth)),
            TypeExpr::Map { key, value } => {
                GoType::map(self.resolve_at(key, depth), self.resolve_at(value, depth))
            }
            TypeExpr::Chan { dir, elem } => GoType::chan(*dir, self.resolve_at(elem, depth)),
            TypeExpr::Func(func) => GoType::Func(self.signature(func)),
            TypeExpr::Interface { text, .. } | TypeExpr::Other { text, .. } => {
                GoType::Opaque(text.clone())
            }
        }
    }

    fn resolve_name(&self, name: &str, depth: usize) -> GoType {
        if self.type_params.iter().any(|p| p == name) {
            return GoType::Opaque(name.to_string());
        }

        let expr = TypeExpr::Name(name.to_string());
        if let Some(resolved) = self.with_decl(&expr, |scope, spec| scope.declared(spec, depth)) {
            return resolved;
        }

        if name == "error" {
            GoType::error()
        } else if BASIC_TYPES.contains(&name) {
            GoType::basic(name)
        } else {
            log::debug!("Unresolved identifier {name} in {}", self.file.path.display());
            GoType::Opaque(name.to_string())
        }
    }

    fn resolve_qualified(&self, alias: &str, name: &str, depth: usize) -> GoType {
        let Some(path) = self.import_path(alias) else {
            log::debug!("No import for {alias}.{name} in {}", self.file.path.display());
            return GoType::Opaque(format!("{alias}.{name}"));
        };

        if let Ok(loaded) = self.db.package(&path) {
            if let Some((file, spec)) = loaded.lookup(name) {
                return Scope::new(self.db, &loaded, file, &spec.type_params).declared(spec, depth);
            }
        }

        GoType::named(name, Some(self.db.package_ref(&path)))
    }

    /// The type a declaration stands for when referenced by name.
    fn declared(&self, spec: &TypeSpec, depth: usize) -> GoType {
        if !spec.is_alias {
            return GoType::named(spec.name.clone(), Some(self.package_ref()));
        }
        if depth >= MAX_ALIAS_DEPTH {
            log::warn!("Alias chain through {} is too deep", spec.name);
            return GoType::Opaque(spec.name.clone());
        }
        self.resolve_at(&spec.ty, depth + 1)
    }

    pub fn signature(&self, func: &FuncExpr) -> Signature {
        let variables = |params: &[ParamExpr]| -> Vec<Variable> {
            params
                .iter()
                .map(|param| Variable {
                    name: param.name.clone(),
                    ty: self.resolve_type(&param.ty),
                })
                .collect()
        };

        Signature {
            params: variables(&func.params),
            results: variables(&func.results),
            variadic: func.variadic,
        }
    }

    /// Import path bound to `alias` in this file.
    ///
    /// Explicitly named imports win. Unnamed imports are matched by their
    /// guessed name first and by their loaded package name second.
    fn import_path(&self, alias: &str) -> Option<String> {
        let imports = &self.file.imports;

        if let Some(import) = imports.iter().find(|i| i.name.as_deref() == Some(alias)) {
            return Some(import.path.clone());
        }

        let unnamed = || imports.iter().filter(|i| i.name.is_none());
        unnamed()
            .find(|i| guess_package_name(&i.path) == alias)
            .or_else(|| unnamed().find(|i| self.db.package_name(&i.path) == alias))
            .map(|i| i.path.clone())
    }

    /// Run `f` on the declaration `expr` names, in the declaration's scope.
    fn with_decl<R>(
        &self,
        expr: &TypeExpr,
        f: impl FnOnce(&Scope<'_>, &TypeSpec) -> R,
    ) -> Option<R> {
        match expr {
            TypeExpr::Name(name) => {
                if self.type_params.iter().any(|p| p == name) {
                    return None;
                }
                if let Some((file, spec)) = self.package.lookup(name) {
                    let scope = Scope::new(self.db, self.package, file, &spec.type_params);
                    return Some(f(&scope, spec));
                }

                let dot_imports = self
                    .file
                    .imports
                    .iter()
                    .filter(|i| i.name.as_deref() == Some("."));
                for import in dot_imports {
                    let Ok(loaded) = self.db.package(&import.path) else {
                        continue;
                    };
                    if let Some((file, spec)) = loaded.lookup(name) {
                        let scope = Scope::new(self.db, &loaded, file, &spec.type_params);
                        return Some(f(&scope, spec));
                    }
                }
                None
            }
            TypeExpr::Qualified { package, name } => {
                let path = self.import_path(package)?;
                let loaded = self.db.package(&path).ok()?;
                let (file, spec) = loaded.lookup(name)?;
                let scope = Scope::new(self.db, &loaded, file, &spec.type_params);
                Some(f(&scope, spec))
            }
            _ => None,
        }
    }

    /// Underlying shape of the declaration `spec` in this scope.
    pub fn underlying(&self, spec: &TypeSpec) -> Underlying {
        let mut visited = HashSet::new();
        visited.insert((self.package.path.clone(), spec.name.clone()));
        self.shape(&spec.ty, &mut visited)
    }

    fn shape(&self, expr: &TypeExpr, visited: &mut HashSet<DeclKey>) -> Underlying {
        match expr {
            TypeExpr::Interface { elems, .. } => Underlying::Interface(self.methods(elems, visited)),
            TypeExpr::Name(_) | TypeExpr::Qualified { .. } => {
                let found = self.with_decl(expr, |scope, spec| {
                    let key = (scope.package.path.clone(), spec.name.clone());
                    if !visited.insert(key) {
                        // Already expanded on this path.
                        return Underlying::Interface(Vec::new());
                    }
                    scope.shape(&spec.ty, visited)
                });
                match found {
                    Some(shape) => shape,
                    None if matches!(expr, TypeExpr::Name(n) if n == "error") => {
                        Underlying::Interface(vec![error_method()])
                    }
                    None => Underlying::Other(expr.kind()),
                }
            }
            other => Underlying::Other(other.kind()),
        }
    }

    /// Methods of an interface body, embedded interfaces expanded in place.
    fn methods(&self, elems: &[InterfaceElem], visited: &mut HashSet<DeclKey>) -> Vec<MethodObject> {
        let mut methods = Vec::new();

        for elem in elems {
            match elem {
                InterfaceElem::Method { name, func, span } => push_unique(
                    &mut methods,
                    MethodObject {
                        name: name.clone(),
                        signature: self.signature(func),
                        position: Some(self.position(*span)),
                    },
                ),
                InterfaceElem::Embedded(expr) => match self.shape(expr, visited) {
                    Underlying::Interface(embedded) => {
                        for method in embedded {
                            push_unique(&mut methods, method);
                        }
                    }
                    Underlying::Other(kind) => log::warn!(
                        "Ignoring embedded {} ({kind}) in {}: not a resolvable interface",
                        expr.kind(),
                        self.file.path.display()
                    ),
                },
                InterfaceElem::TypeSet(_) => {}
            }
        }

        methods
    }
}

fn push_unique(methods: &mut Vec<MethodObject>, method: MethodObject) {
    if !methods.iter().any(|m| m.name == method.name) {
        methods.push(method);
    }
}

/// `Error() string` of the universe `error` interface.
fn error_method() -> MethodObject {
    MethodObject {
        name: "Error".to_string(),
        signature: Signature::new(Vec::new(), vec![Variable::unnamed(GoType::basic("string"))]),
        position: None,
    }
}

/// Package name implied by an import path: the last segment, skipping a
/// `vN` major-version segment, without a `.vN` suffix or `go-` prefix.
pub fn guess_package_name(import_path: &str) -> String {
    let mut segments = import_path.rsplit('/').filter(|s| !s.is_empty());
    let mut last = segments.next().unwrap_or(import_path);
    if is_major_version(last) {
        if let Some(previous) = segments.next() {
            last = previous;
        }
    }

    let name = match last.rsplit_once('.') {
        Some((base, suffix)) if is_major_version(suffix) => base,
        _ => last,
    };
    let name = name.strip_prefix("go-").unwrap_or(name);
    name.replace(['-', '.'], "_")
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}
