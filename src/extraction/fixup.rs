//! Interface-wide reconciliation of descriptor text with references.
//!
//! After extraction every external type is qualified by its full import
//! path. This pass collects all references of the interface into one
//! path-keyed accumulator, rewrites each qualifier to the reference alias,
//! turns the trailing parameter of variadic methods into `...T`, and
//! returns the references sorted by path.

use crate::core::model::{MethodModel, ModuleReference, Parameter, TypeDescriptor};
use crate::extraction::descriptor::variadic_text;
use std::collections::BTreeMap;

/// Result of [`fixup_methods`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixupOutput {
    pub methods: Vec<MethodModel>,
    /// Sorted by path, one entry per path.
    pub references: Vec<ModuleReference>,
}

/// References of an interface keyed by import path.
#[derive(Debug, Clone, Default)]
pub struct ReferenceAccumulator {
    by_path: BTreeMap<String, ModuleReference>,
}

impl ReferenceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: &ModuleReference) {
        self.by_path
            .entry(reference.path.clone())
            .or_insert_with(|| reference.clone());
    }

    pub fn extend_from(&mut self, descriptor: &TypeDescriptor) {
        for reference in &descriptor.references {
            self.insert(reference);
        }
    }

    /// Pairs of references with the same alias but different paths.
    ///
    /// Generated code would import both under one name; nothing here tries
    /// to disambiguate them.
    pub fn alias_collisions(&self) -> Vec<(&ModuleReference, &ModuleReference)> {
        let mut seen: BTreeMap<&str, &ModuleReference> = BTreeMap::new();
        let mut collisions = Vec::new();
        for reference in self.by_path.values() {
            match seen.get(reference.alias.as_str()) {
                Some(first) => collisions.push((*first, reference)),
                None => {
                    seen.insert(reference.alias.as_str(), reference);
                }
            }
        }
        collisions
    }

    pub fn into_sorted(self) -> Vec<ModuleReference> {
        self.by_path.into_values().collect()
    }
}

/// Run the fixup pass. Never fails and is idempotent.
pub fn fixup_methods(methods: Vec<MethodModel>) -> FixupOutput {
    let mut references = ReferenceAccumulator::new();
    for method in &methods {
        for descriptor in method.descriptors() {
            references.extend_from(descriptor);
        }
    }

    for (first, second) in references.alias_collisions() {
        log::warn!(
            "Packages {:?} and {:?} share the name {:?}; generated imports will collide",
            first.path,
            second.path,
            first.alias
        );
    }

    let methods = methods.into_iter().map(fixup_method).collect();

    FixupOutput {
        methods,
        references: references.into_sorted(),
    }
}

fn fixup_method(mut method: MethodModel) -> MethodModel {
    for param in method.params.iter_mut().chain(method.results.iter_mut()) {
        alias_parameter(param);
    }

    if method.is_variadic {
        if let Some(last) = method.params.last_mut() {
            last.ty.text = variadic_text(&last.ty.text);
        }
    }

    method
}

fn alias_parameter(param: &mut Parameter) {
    let mut references: Vec<&ModuleReference> = param.ty.references.iter().collect();
    // A path that is a suffix of another path must not eat into it.
    references.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

    let mut text = std::mem::take(&mut param.ty.text);
    for reference in references {
        text = replace_qualifier(&text, &reference.path, &reference.alias);
    }
    param.ty.text = text;
}

/// Replace every `{path}.` that starts a qualified identifier with `{alias}.`.
///
/// An occurrence only counts when the character before it cannot belong to
/// an import path, so `go/ast.` is not matched inside `example.com/go/ast.`.
/// A variadic `...` never belongs to a path.
pub(crate) fn replace_qualifier(text: &str, path: &str, alias: &str) -> String {
    if path == alias || path.is_empty() {
        return text.to_string();
    }

    let needle = format!("{path}.");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(&needle) {
        out.push_str(&rest[..idx]);
        if starts_qualifier(&out) {
            out.push_str(alias);
            out.push('.');
        } else {
            out.push_str(&needle);
        }
        rest = &rest[idx + needle.len()..];
    }
    out.push_str(rest);
    out
}

fn starts_qualifier(preceding: &str) -> bool {
    preceding.ends_with("...") || !preceding.chars().last().is_some_and(is_path_char)
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '/' | '.' | '-' | '_' | '~' | '+')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::descriptor::describe_type;
    use crate::types::{GoType, PackageRef, Signature, Variable};
    use pretty_assertions::assert_eq;

    fn external(text: &str, refs: &[(&str, &str)]) -> TypeDescriptor {
        TypeDescriptor {
            text: text.to_string(),
            references: refs
                .iter()
                .map(|(alias, path)| ModuleReference::new(*alias, *path))
                .collect(),
        }
    }

    fn method(name: &str, params: Vec<Parameter>, results: Vec<Parameter>) -> MethodModel {
        MethodModel {
            name: name.to_string(),
            params,
            results,
            ..Default::default()
        }
    }

    #[test]
    fn test_references_are_merged_and_sorted_by_path() {
        let ast = ("ast", "go/ast");
        let uuid = ("uuid", "github.com/google/uuid");
        let methods = vec![method(
            "MultipleParamsWithSameType",
            vec![
                Parameter::new("typ1", external("*go/ast.TypeSpec", &[ast])),
                Parameter::new("typ2", external("*go/ast.TypeSpec", &[ast])),
                Parameter::new("uuid1", external("github.com/google/uuid.UUID", &[uuid])),
                Parameter::new("uuid2", external("github.com/google/uuid.UUID", &[uuid])),
            ],
            vec![Parameter::new("ret1", external("*go/ast.InterfaceType", &[ast]))],
        )];

        let out = fixup_methods(methods);

        assert_eq!(
            out.references,
            vec![
                ModuleReference::new("uuid", "github.com/google/uuid"),
                ModuleReference::new("ast", "go/ast"),
            ]
        );
        let texts: Vec<_> = out.methods[0].params.iter().map(|p| p.ty.text.as_str()).collect();
        assert_eq!(texts, vec!["*ast.TypeSpec", "*ast.TypeSpec", "uuid.UUID", "uuid.UUID"]);
        assert_eq!(out.methods[0].results[0].ty.text, "*ast.InterfaceType");
    }

    #[test]
    fn test_variadic_only_touches_last_parameter() {
        let mut m = method(
            "VariadicFunction",
            vec![
                Parameter::new("prefix", TypeDescriptor::local("[]string")),
                Parameter::new("values", TypeDescriptor::local("[]int")),
            ],
            vec![Parameter::new("ret1", TypeDescriptor::local("[]int"))],
        );
        m.is_variadic = true;

        let out = fixup_methods(vec![m]);

        let fixed = &out.methods[0];
        assert_eq!(fixed.params[0].ty.text, "[]string");
        assert_eq!(fixed.params[1].ty.text, "...int");
        assert_eq!(fixed.results[0].ty.text, "[]int");
    }

    #[test]
    fn test_variadic_of_external_pointer_is_aliased() {
        let mut m = method(
            "Walk",
            vec![Parameter::new(
                "nodes",
                external("[]*go/ast.Ident", &[("ast", "go/ast")]),
            )],
            vec![],
        );
        m.is_variadic = true;

        let out = fixup_methods(vec![m]);
        assert_eq!(out.methods[0].params[0].ty.text, "...*ast.Ident");
    }

    #[test]
    fn test_non_variadic_slice_is_untouched() {
        let m = method(
            "Slice",
            vec![Parameter::new("xs", TypeDescriptor::local("[]int"))],
            vec![],
        );
        let out = fixup_methods(vec![m]);
        assert_eq!(out.methods[0].params[0].ty.text, "[]int");
    }

    #[test]
    fn test_fixup_is_idempotent() {
        let mut m = method(
            "FuncTypeParams",
            vec![
                Parameter::new(
                    "f",
                    external("func(int, *go/ast.MapType) int", &[("ast", "go/ast")]),
                ),
                Parameter::new("rest", TypeDescriptor::local("[]int")),
            ],
            vec![Parameter::new(
                "ret1",
                external(
                    "func(github.com/google/uuid.UUID) error",
                    &[("uuid", "github.com/google/uuid")],
                ),
            )],
        );
        m.is_variadic = true;

        let once = fixup_methods(vec![m]);
        let twice = fixup_methods(once.methods.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_method_list() {
        let out = fixup_methods(Vec::new());
        assert!(out.methods.is_empty());
        assert!(out.references.is_empty());
    }

    #[test]
    fn test_replace_qualifier_respects_path_boundaries() {
        assert_eq!(
            replace_qualifier("map[go/ast.Ident]*example.com/go/ast.Node", "go/ast", "ast"),
            "map[ast.Ident]*example.com/go/ast.Node"
        );
        assert_eq!(
            replace_qualifier("func(a/b.T, []a/b.U) a/b.V", "a/b", "b"),
            "func(b.T, []b.U) b.V"
        );
    }

    #[test]
    fn test_longer_path_wins_over_its_suffix() {
        let mut param = Parameter::new(
            "m",
            external(
                "map[x/a/b.K]a/b.V",
                &[("b", "a/b"), ("b2", "x/a/b")],
            ),
        );
        alias_parameter(&mut param);
        assert_eq!(param.ty.text, "map[b2.K]b.V");
    }

    #[test]
    fn test_nested_variadic_func_param_is_aliased() {
        let ty = GoType::Func(
            Signature::new(
                vec![Variable::unnamed(GoType::slice(GoType::named(
                    "Ident",
                    Some(PackageRef::new("ast", "go/ast")),
                )))],
                vec![],
            )
            .variadic(),
        );
        let descriptor = describe_type(&ty, "example.com/app");
        assert_eq!(descriptor.text, "func(...go/ast.Ident)");

        let out = fixup_methods(vec![method(
            "Walk",
            vec![Parameter::new("f", descriptor)],
            vec![],
        )]);
        assert_eq!(out.methods[0].params[0].ty.text, "func(...ast.Ident)");
        assert_eq!(
            replace_qualifier("func(int, ...a/b.T)", "a/b", "b"),
            "func(int, ...b.T)"
        );
    }

    #[test]
    fn test_gopkg_style_path_with_dots() {
        assert_eq!(
            replace_qualifier("*gopkg.in/yaml.v3.Node", "gopkg.in/yaml.v3", "yaml"),
            "*yaml.Node"
        );
    }

    #[test]
    fn test_alias_collisions_are_reported() {
        let mut acc = ReferenceAccumulator::new();
        acc.insert(&ModuleReference::new("uuid", "github.com/google/uuid"));
        acc.insert(&ModuleReference::new("uuid", "github.com/gofrs/uuid"));
        acc.insert(&ModuleReference::new("ast", "go/ast"));

        let collisions = acc.alias_collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(acc.into_sorted().len(), 3);
    }
}
