//! Decomposition of one resolved type into a [`TypeDescriptor`].
//!
//! External named types are rendered with their full import path as
//! qualifier (`*go/ast.TypeSpec`); the fixup pass later swaps paths for
//! aliases once every reference of the interface is known.

use crate::core::model::{ModuleReference, TypeDescriptor};
use crate::types::{ChanDir, GoType, Signature, Variable};

/// Build the descriptor of `ty` as seen from the package `home`.
///
/// Types declared in `home` stay unqualified and add no reference.
/// Never fails: unsupported shapes come through as [`GoType::Opaque`] and
/// keep their text.
pub fn describe_type(ty: &GoType, home: &str) -> TypeDescriptor {
    match ty {
        GoType::Basic(name) => TypeDescriptor::local(name.clone()),
        GoType::Named { name, package } => match package {
            Some(package) if package.path != home => {
                let mut descriptor =
                    TypeDescriptor::local(format!("{}.{}", package.path, name));
                descriptor.add_reference(ModuleReference::new(
                    package.name.clone(),
                    package.path.clone(),
                ));
                descriptor
            }
            _ => TypeDescriptor::local(name.clone()),
        },
        GoType::Pointer(elem) => wrap(describe_type(elem, home), |t| format!("*{t}")),
        GoType::Slice(elem) => wrap(describe_type(elem, home), |t| format!("[]{t}")),
        GoType::Array { len, elem } => {
            wrap(describe_type(elem, home), |t| format!("[{len}]{t}"))
        }
        GoType::Chan { dir, elem } => {
            // `chan <-chan T` would parse as `chan<- chan T`.
            let needs_parens = *dir != ChanDir::Recv
                && matches!(elem.as_ref(), GoType::Chan { dir: ChanDir::Recv, .. });
            wrap(describe_type(elem, home), |t| {
                if needs_parens {
                    format!("{dir} ({t})")
                } else {
                    format!("{dir} {t}")
                }
            })
        }
        GoType::Map { key, value } => {
            let key = describe_type(key, home);
            let value = describe_type(value, home);
            let mut descriptor =
                TypeDescriptor::local(format!("map[{}]{}", key.text, value.text));
            descriptor.merge_references(&key);
            descriptor.merge_references(&value);
            descriptor
        }
        GoType::Func(signature) => describe_signature(signature, home),
        GoType::Opaque(text) => TypeDescriptor::local(text.clone()),
    }
}

fn wrap(inner: TypeDescriptor, render: impl FnOnce(&str) -> String) -> TypeDescriptor {
    TypeDescriptor {
        text: render(&inner.text),
        references: inner.references,
    }
}

/// Render a function type: `func(int, string) error`, `func() (T, error)`.
fn describe_signature(signature: &Signature, home: &str) -> TypeDescriptor {
    let mut descriptor = TypeDescriptor::default();

    let last = signature.params.len().saturating_sub(1);
    let params: Vec<String> = signature
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let described = describe_variable(param, home, &mut descriptor);
            if signature.variadic && i == last {
                variadic_text(&described)
            } else {
                described
            }
        })
        .collect();

    let results: Vec<String> = signature
        .results
        .iter()
        .map(|result| describe_variable(result, home, &mut descriptor))
        .collect();

    descriptor.text = match results.len() {
        0 => format!("func({})", params.join(", ")),
        1 => format!("func({}) {}", params.join(", "), results[0]),
        _ => format!("func({}) ({})", params.join(", "), results.join(", ")),
    };
    descriptor
}

fn describe_variable(variable: &Variable, home: &str, into: &mut TypeDescriptor) -> String {
    let described = describe_type(&variable.ty, home);
    into.merge_references(&described);
    described.text
}

/// `[]T` becomes `...T`; anything else is left alone.
pub(crate) fn variadic_text(text: &str) -> String {
    match text.strip_prefix("[]") {
        Some(elem) => format!("...{elem}"),
        None => text.to_string(),
    }
}
