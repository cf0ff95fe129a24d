//! Leading comment groups.
//!
//! A comment group is attached to the declaration directly below it: the
//! contiguous run of comment tokens with no blank line in between, ending on
//! the line above the declaration. A comment that follows code on the same
//! line belongs to that code and stops the group.

use super::syntax::SourceFile;
use tree_sitter::Node;

/// Leading comment of the smallest documented declaration enclosing `offset`.
///
/// Each comment token contributes its text with trailing whitespace removed
/// and a terminating `\n`. Returns an empty string when there is none.
pub fn leading_comment(file: &SourceFile, offset: usize) -> String {
    let source = file.source.as_str();
    let Some(mut node) = file
        .tree
        .root_node()
        .descendant_for_byte_range(offset, offset)
    else {
        return String::new();
    };

    loop {
        match node.kind() {
            "method_elem" | "method_spec" | "field_declaration" | "function_declaration"
            | "method_declaration" | "type_declaration" => {
                return comment_group(node, source);
            }
            "type_spec" | "type_alias" => {
                let own = comment_group(node, source);
                if !own.is_empty() {
                    return own;
                }
                return match node.parent() {
                    Some(decl) if decl.kind() == "type_declaration" => comment_group(decl, source),
                    _ => own,
                };
            }
            _ => {}
        }

        match node.parent() {
            Some(parent) => node = parent,
            None => return String::new(),
        }
    }
}

fn comment_group(node: Node, source: &str) -> String {
    let mut group = Vec::new();
    let mut next_row = node.start_position().row;
    let mut sibling = node.prev_sibling();

    while let Some(prev) = sibling {
        match prev.kind() {
            "comment" => {
                if prev.end_position().row + 1 < next_row || is_trailing(prev) {
                    break;
                }
                group.push(prev);
                next_row = prev.start_position().row;
            }
            "\n" | ";" => {}
            _ => break,
        }
        sibling = prev.prev_sibling();
    }

    group
        .iter()
        .rev()
        .map(|comment| {
            let text = &source[comment.start_byte()..comment.end_byte()];
            format!("{}\n", text.trim_end())
        })
        .collect()
}

/// True when the nearest preceding token on the comment's line is code.
fn is_trailing(comment: Node) -> bool {
    let row = comment.start_position().row;
    let mut sibling = comment.prev_sibling();

    while let Some(prev) = sibling {
        if prev.kind() != "comment" {
            return prev.kind() != "\n" && prev.end_position().row == row;
        }
        if prev.end_position().row < row {
            return false;
        }
        sibling = prev.prev_sibling();
    }

    false
}
