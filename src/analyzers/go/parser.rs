//! Tree-sitter parser integration for Go
//!
//! Parses a file with the tree-sitter Go grammar and copies the package
//! clause, imports and top-level type declarations into [`syntax`] values.
//!
//! [`syntax`]: super::syntax

use super::syntax::{
    FuncExpr, ImportSpec, InterfaceElem, ParamExpr, SourceFile, Span, TypeExpr, TypeSpec,
};
use crate::core::errors::{Error, Result};
use crate::types::ChanDir;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Parse Go source code into a [`SourceFile`]
pub fn parse_source(content: &str, path: &Path) -> Result<SourceFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| Error::parse(path, 0, 0, format!("Failed to set tree-sitter language: {e}")))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| Error::parse(path, 0, 0, "Failed to parse source code"))?;

    if has_parse_errors(&tree) {
        log::warn!(
            "{} has syntax errors; continuing with the recovered tree",
            path.display()
        );
    }

    let root = tree.root_node();
    let mut package_name = String::new();
    let mut imports = Vec::new();
    let mut type_specs = Vec::new();

    for child in named_children(root) {
        match child.kind() {
            "package_clause" => {
                if let Some(ident) = named_children(child)
                    .into_iter()
                    .find(|n| n.kind() == "package_identifier")
                {
                    package_name = node_text(&ident, content).to_string();
                }
            }
            "import_declaration" => collect_imports(child, content, &mut imports),
            "type_declaration" => collect_type_specs(child, content, &mut type_specs),
            _ => {}
        }
    }

    Ok(SourceFile {
        path: path.to_path_buf(),
        source: content.to_string(),
        tree,
        package_name,
        imports,
        type_specs,
    })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Offset and 1-based line/column of a node's start
pub fn node_span(node: &Node) -> Span {
    let start = node.start_position();
    Span {
        offset: node.start_byte(),
        line: start.row + 1,
        column: start.column + 1,
    }
}

/// Named children without comments
fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn collect_imports(node: Node, source: &str, imports: &mut Vec<ImportSpec>) {
    for child in named_children(node) {
        match child.kind() {
            "import_spec" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| node_text(&n, source).to_string());
                if let Some(path) = child.child_by_field_name("path") {
                    imports.push(ImportSpec {
                        name,
                        path: unquote(node_text(&path, source)),
                    });
                }
            }
            "import_spec_list" => collect_imports(child, source, imports),
            _ => {}
        }
    }
}

fn unquote(literal: &str) -> String {
    literal.trim_matches(|c| c == '"' || c == '`').to_string()
}

fn collect_type_specs(node: Node, source: &str, specs: &mut Vec<TypeSpec>) {
    for child in named_children(node) {
        let is_alias = match child.kind() {
            "type_spec" => false,
            "type_alias" => true,
            _ => continue,
        };
        let (Some(name), Some(ty)) = (
            child.child_by_field_name("name"),
            child.child_by_field_name("type"),
        ) else {
            continue;
        };

        let type_params = child
            .child_by_field_name("type_parameters")
            .map(|list| type_parameter_names(list, source))
            .unwrap_or_default();

        specs.push(TypeSpec {
            name: node_text(&name, source).to_string(),
            span: node_span(&name),
            is_alias,
            type_params,
            ty: type_expr(ty, source),
        });
    }
}

fn type_parameter_names(list: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    for decl in named_children(list) {
        let mut cursor = decl.walk();
        for name in decl.children_by_field_name("name", &mut cursor) {
            names.push(node_text(&name, source).to_string());
        }
    }
    names
}

/// Convert a type node into a [`TypeExpr`]
pub fn type_expr(node: Node, source: &str) -> TypeExpr {
    let field = |name: &str| {
        node.child_by_field_name(name)
            .map(|n| type_expr(n, source))
            .unwrap_or_else(|| missing(node, source))
    };

    match node.kind() {
        "type_identifier" | "identifier" => TypeExpr::Name(node_text(&node, source).to_string()),
        "qualified_type" => match (
            node.child_by_field_name("package"),
            node.child_by_field_name("name"),
        ) {
            (Some(package), Some(name)) => TypeExpr::Qualified {
                package: node_text(&package, source).to_string(),
                name: node_text(&name, source).to_string(),
            },
            _ => missing(node, source),
        },
        "pointer_type" => TypeExpr::Pointer(Box::new(first_named(node, source))),
        "parenthesized_type" => first_named(node, source),
        "slice_type" => TypeExpr::Slice(Box::new(field("element"))),
        "array_type" | "implicit_length_array_type" => TypeExpr::Array {
            len: node
                .child_by_field_name("length")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_else(|| "...".to_string()),
            elem: Box::new(field("element")),
        },
        "map_type" => TypeExpr::Map {
            key: Box::new(field("key")),
            value: Box::new(field("value")),
        },
        "channel_type" => TypeExpr::Chan {
            dir: channel_direction(node),
            elem: Box::new(field("value")),
        },
        "function_type" => TypeExpr::Func(func_expr(node, source)),
        "interface_type" => TypeExpr::Interface {
            elems: interface_elems(node, source),
            text: node_text(&node, source).to_string(),
        },
        kind => TypeExpr::Other {
            kind: kind.trim_end_matches("_type").to_string(),
            text: node_text(&node, source).to_string(),
        },
    }
}

fn first_named(node: Node, source: &str) -> TypeExpr {
    named_children(node)
        .into_iter()
        .next()
        .map(|n| type_expr(n, source))
        .unwrap_or_else(|| missing(node, source))
}

fn missing(node: Node, source: &str) -> TypeExpr {
    TypeExpr::Other {
        kind: "invalid".to_string(),
        text: node_text(&node, source).to_string(),
    }
}

/// `<-chan T` starts with the arrow, `chan<- T` has it after `chan`.
fn channel_direction(node: Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node.children(&mut cursor).map(|c| c.kind()).collect();
    match tokens.iter().position(|k| *k == "<-") {
        Some(0) => ChanDir::Recv,
        Some(_) => ChanDir::Send,
        None => ChanDir::Both,
    }
}

/// Parameters and result of a `function_type` or `method_elem` node.
fn func_expr(node: Node, source: &str) -> FuncExpr {
    let mut func = FuncExpr::default();

    if let Some(params) = node.child_by_field_name("parameters") {
        func.variadic = parameter_list(params, source, &mut func.params);
    }

    if let Some(result) = node.child_by_field_name("result") {
        if result.kind() == "parameter_list" {
            parameter_list(result, source, &mut func.results);
        } else {
            func.results.push(ParamExpr {
                name: None,
                ty: type_expr(result, source),
            });
        }
    }

    func
}

/// Append the entries of a `parameter_list`; returns whether the last one
/// is variadic.
fn parameter_list(list: Node, source: &str, out: &mut Vec<ParamExpr>) -> bool {
    let mut variadic = false;

    for decl in named_children(list) {
        let Some(ty_node) = decl.child_by_field_name("type") else {
            continue;
        };
        let mut ty = type_expr(ty_node, source);

        variadic = decl.kind() == "variadic_parameter_declaration";
        if variadic {
            ty = TypeExpr::Slice(Box::new(ty));
        }

        let mut cursor = decl.walk();
        let names: Vec<String> = decl
            .children_by_field_name("name", &mut cursor)
            .map(|n| node_text(&n, source).to_string())
            .collect();

        if names.is_empty() {
            out.push(ParamExpr { name: None, ty });
        } else {
            for name in names {
                out.push(ParamExpr {
                    name: Some(name),
                    ty: ty.clone(),
                });
            }
        }
    }

    variadic
}

fn interface_elems(node: Node, source: &str) -> Vec<InterfaceElem> {
    let mut elems = Vec::new();

    for child in named_children(node) {
        match child.kind() {
            "method_elem" | "method_spec" => {
                let Some(name) = child.child_by_field_name("name") else {
                    continue;
                };
                elems.push(InterfaceElem::Method {
                    name: node_text(&name, source).to_string(),
                    func: func_expr(child, source),
                    span: node_span(&name),
                });
            }
            "type_elem" | "constraint_elem" => {
                let types = named_children(child);
                match types.as_slice() {
                    [single] if is_embeddable(single) => {
                        elems.push(InterfaceElem::Embedded(type_expr(*single, source)));
                    }
                    _ => elems.push(InterfaceElem::TypeSet(node_text(&child, source).to_string())),
                }
            }
            "type_identifier" | "qualified_type" | "interface_type_name" => {
                elems.push(InterfaceElem::Embedded(first_embedded(child, source)));
            }
            _ => elems.push(InterfaceElem::TypeSet(node_text(&child, source).to_string())),
        }
    }

    elems
}

fn is_embeddable(node: &Node) -> bool {
    matches!(node.kind(), "type_identifier" | "qualified_type")
}

fn first_embedded(node: Node, source: &str) -> TypeExpr {
    if node.kind() == "interface_type_name" {
        first_named(node, source)
    } else {
        type_expr(node, source)
    }
}
