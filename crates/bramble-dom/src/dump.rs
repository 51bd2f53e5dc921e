//! Tree dumps in the html5lib-tests "#document" format.
//!
//! ```text
//! | <!DOCTYPE html>
//! | <html>
//! |   <head>
//! |   <body>
//! |     <p>
//! |       class="x"
//! |       "text"
//! ```
//!
//! Attributes are sorted by name, foreign elements are prefixed with their
//! namespace (`<svg svg>`), and template contents appear under a `content`
//! line.

use std::fmt::Write;

use crate::rcdom::{Handle, RcNodeData};
use crate::{Attribute, DoctypeData, DomTree, Namespace, NodeId, NodeType, RcDom};

fn indent(out: &mut String, depth: usize) {
    out.push_str("| ");
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn doctype_line(out: &mut String, depth: usize, doctype: &DoctypeData) {
    indent(out, depth);
    if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
        let _ = writeln!(out, "<!DOCTYPE {}>", doctype.name);
    } else {
        let _ = writeln!(
            out,
            "<!DOCTYPE {} \"{}\" \"{}\">",
            doctype.name, doctype.public_id, doctype.system_id
        );
    }
}

fn element_lines(out: &mut String, depth: usize, name: &str, namespace: Namespace, attrs: &[Attribute]) {
    indent(out, depth);
    match namespace {
        Namespace::Html => {
            let _ = writeln!(out, "<{name}>");
        }
        Namespace::Svg => {
            let _ = writeln!(out, "<svg {name}>");
        }
        Namespace::MathMl => {
            let _ = writeln!(out, "<math {name}>");
        }
    }
    let mut sorted: Vec<&Attribute> = attrs.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    for attr in sorted {
        indent(out, depth + 1);
        let name = match attr.foreign_name_parts() {
            Some((prefix, local)) if namespace != Namespace::Html => format!("{prefix} {local}"),
            _ => attr.name.clone(),
        };
        let _ = writeln!(out, "{name}=\"{}\"", attr.value);
    }
}

fn text_line(out: &mut String, depth: usize, text: &str) {
    indent(out, depth);
    let _ = writeln!(out, "\"{text}\"");
}

fn comment_line(out: &mut String, depth: usize, text: &str) {
    indent(out, depth);
    let _ = writeln!(out, "<!-- {text} -->");
}

impl DomTree {
    /// Serialize the document in html5lib-tests tree format.
    ///
    /// The walk keeps its own stack, so nesting depth is bounded by memory
    /// rather than by the thread's stack.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(NodeId, usize)> = Vec::new();
        push_children(&mut stack, self.children(NodeId::ROOT), 0);
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            push_children(&mut stack, node.children.as_slice(), depth + 1);
            match &node.node_type {
                NodeType::Document | NodeType::DocumentFragment => {}
                NodeType::Doctype(doctype) => doctype_line(&mut out, depth, doctype),
                NodeType::Element(data) => {
                    element_lines(&mut out, depth, &data.tag_name, data.namespace, &data.attrs);
                    if let Some(contents) = data.template_contents {
                        indent(&mut out, depth + 1);
                        out.push_str("content\n");
                        push_children(&mut stack, self.children(contents), depth + 2);
                    }
                }
                NodeType::Text(text) => text_line(&mut out, depth, text),
                NodeType::Comment(text) => comment_line(&mut out, depth, text),
            }
        }
        out
    }
}

/// Queue `children` so the first one is popped next.
fn push_children<T: Clone>(stack: &mut Vec<(T, usize)>, children: &[T], depth: usize) {
    stack.extend(children.iter().rev().map(|child| (child.clone(), depth)));
}

impl RcDom {
    /// Serialize the document in html5lib-tests tree format.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(Handle, usize)> = Vec::new();
        push_children(&mut stack, self.document.children.borrow().as_slice(), 0);
        while let Some((node, depth)) = stack.pop() {
            push_children(&mut stack, node.children.borrow().as_slice(), depth + 1);
            match &node.data {
                RcNodeData::Document | RcNodeData::DocumentFragment => {}
                RcNodeData::Doctype(doctype) => doctype_line(&mut out, depth, doctype),
                RcNodeData::Element {
                    name,
                    namespace,
                    attrs,
                    template_contents,
                } => {
                    element_lines(&mut out, depth, name, *namespace, &attrs.borrow());
                    if let Some(contents) = template_contents.borrow().as_ref() {
                        indent(&mut out, depth + 1);
                        out.push_str("content\n");
                        push_children(&mut stack, contents.children.borrow().as_slice(), depth + 2);
                    }
                }
                RcNodeData::Text(text) => text_line(&mut out, depth, &text.borrow()),
                RcNodeData::Comment(text) => comment_line(&mut out, depth, text),
            }
        }
        out
    }
}
