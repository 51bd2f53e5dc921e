//! Human-readable tree output for debugging.

use std::fmt::Write;

use bramble_dom::{DomTree, Namespace, NodeId, NodeType};
use owo_colors::OwoColorize;

/// Print the subtree rooted at `id` to stdout, indented by `indent` levels.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", format_tree(tree, id, indent));
}

/// Render the subtree rooted at `id` with terminal colors: tags in cyan, text
/// in green, comments dimmed. Whitespace in text is made visible.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, id, indent);
    out
}

fn write_node(out: &mut String, tree: &DomTree, id: NodeId, indent: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}{}", "#document".bold()),
        NodeType::DocumentFragment => writeln!(out, "{prefix}{}", "#content".bold()),
        NodeType::Doctype(doctype) => {
            writeln!(out, "{prefix}{}", format!("<!DOCTYPE {}>", doctype.name).magenta())
        }
        NodeType::Element(data) => {
            let mut tag = match data.namespace {
                Namespace::Html => data.tag_name.clone(),
                Namespace::Svg => format!("svg:{}", data.tag_name),
                Namespace::MathMl => format!("math:{}", data.tag_name),
            };
            for attr in &data.attrs {
                if attr.value.is_empty() {
                    let _ = write!(tag, " {}", attr.name);
                } else {
                    let _ = write!(tag, " {}=\"{}\"", attr.name, attr.value);
                }
            }
            writeln!(out, "{prefix}{}", format!("<{tag}>").cyan())
        }
        NodeType::Text(text) => {
            let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}{}", format!("\"{display}\"").green())
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}{}", format!("<!-- {data} -->").dimmed()),
    };

    if let Some(contents) = tree.template_contents(id) {
        write_node(out, tree, contents, indent + 1);
    }
    for &child in tree.children(id) {
        write_node(out, tree, child, indent + 1);
    }
}
