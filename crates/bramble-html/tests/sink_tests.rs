//! The tree builder must produce the same document through every sink.

use bramble_dom::{Attribute, DomTree, Namespace, NodeId, QuirksMode, RcDom, TreeSink};
use bramble_html::{ParserConfig, parse_with_sink};

const DOCUMENTS: &[&str] = &[
    "<!DOCTYPE html><title>t</title><p>a<b>b<i>c</b>d</i>e",
    "<table>x<tr><td>1<td>2</table>after",
    "<a href=1>one<div>two<a href=2>three</a></div>",
    "<template><tr><td>cell</td></tr></template><p>",
    "<svg viewbox='0 0 1 1'><foreignObject><p>x</svg><math><mi>y",
    "<select><option>a<optgroup><option>b</select>",
    "<frameset><frame><noframes>x</noframes></frameset><!--c-->",
    "<html a=1><body b=2><html c=3><body d=4>",
    "<p><b><b><b><b>x</p><p>y",
    "<ul><li>a<li>b</ul><dl><dt>c<dd>d</dl>",
];

/// Forwards to a `DomTree` and records which mutations the parser asked for.
struct RecordingSink {
    tree: DomTree,
    calls: Vec<&'static str>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            tree: DomTree::new(),
            calls: Vec::new(),
        }
    }

    fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }
}

impl TreeSink for RecordingSink {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        self.tree.document()
    }

    fn create_element(&mut self, name: &str, namespace: Namespace, attrs: Vec<Attribute>) -> NodeId {
        self.calls.push("create_element");
        self.tree.create_element(name, namespace, attrs)
    }

    fn create_comment_node(&mut self, data: &str) -> NodeId {
        self.calls.push("create_comment_node");
        self.tree.create_comment_node(data)
    }

    fn create_text_node(&mut self, data: &str) -> NodeId {
        self.calls.push("create_text_node");
        self.tree.create_text_node(data)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.calls.push("append_child");
        TreeSink::append_child(&mut self.tree, parent, child);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        self.calls.push("insert_before");
        TreeSink::insert_before(&mut self.tree, parent, child, reference);
    }

    fn append_text(&mut self, parent: &NodeId, text: &str) {
        self.calls.push("append_text");
        TreeSink::append_text(&mut self.tree, parent, text);
    }

    fn insert_text_before(&mut self, parent: &NodeId, text: &str, reference: &NodeId) {
        self.calls.push("insert_text_before");
        TreeSink::insert_text_before(&mut self.tree, parent, text, reference);
    }

    fn append_doctype(&mut self, name: &str, public_id: &str, system_id: &str) {
        self.calls.push("append_doctype");
        self.tree.append_doctype(name, public_id, system_id);
    }

    fn adopt_attributes(&mut self, node: &NodeId, attrs: Vec<Attribute>) {
        self.calls.push("adopt_attributes");
        self.tree.adopt_attributes(node, attrs);
    }

    fn set_document_mode(&mut self, mode: QuirksMode) {
        self.calls.push("set_document_mode");
        self.tree.set_document_mode(mode);
    }

    fn template_content(&mut self, node: &NodeId) -> NodeId {
        self.tree.template_content(node)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        TreeSink::parent(&self.tree, node)
    }

    fn detach(&mut self, node: &NodeId) {
        self.calls.push("detach");
        TreeSink::detach(&mut self.tree, node);
    }

    fn reparent_children(&mut self, from: &NodeId, to: &NodeId) {
        self.calls.push("reparent_children");
        self.tree.reparent_children(from, to);
    }

    fn same_node(&self, a: &NodeId, b: &NodeId) -> bool {
        self.tree.same_node(a, b)
    }
}

fn config() -> ParserConfig {
    ParserConfig::default()
}

#[test]
fn test_rc_dom_matches_dom_tree() {
    for html in DOCUMENTS {
        let arena = parse_with_sink(html, DomTree::new(), &config());
        let rc = parse_with_sink(html, RcDom::new(), &config());
        assert_eq!(arena.document.dump(), rc.document.dump(), "{html}");
        assert_eq!(arena.errors, rc.errors, "{html}");
        assert_eq!(arena.quirks_mode, rc.quirks_mode, "{html}");
    }
}

#[test]
fn test_recording_sink_matches_dom_tree() {
    for html in DOCUMENTS {
        let arena = parse_with_sink(html, DomTree::new(), &config());
        let recorded = parse_with_sink(html, RecordingSink::new(), &config());
        assert_eq!(arena.document.dump(), recorded.document.tree.dump(), "{html}");
    }
}

#[test]
fn test_adoption_agency_moves_nodes_through_sink() {
    let output = parse_with_sink("<a>1<p>2</a>3", RecordingSink::new(), &config());
    let sink = output.document;
    assert!(sink.count("detach") > 0);
    assert!(sink.count("reparent_children") > 0);
}

#[test]
fn test_foster_parenting_inserts_before_table() {
    let output = parse_with_sink("<table>x<b>y</b></table>", RecordingSink::new(), &config());
    let sink = output.document;
    assert!(sink.count("insert_text_before") > 0);
    assert!(sink.count("insert_before") > 0);
}

#[test]
fn test_document_mode_set_once() {
    let output = parse_with_sink("<!DOCTYPE html><p>", RecordingSink::new(), &config());
    assert_eq!(output.document.count("set_document_mode"), 1);
    assert_eq!(output.document.tree.quirks_mode(), QuirksMode::NoQuirks);

    let output = parse_with_sink("<p>", RecordingSink::new(), &config());
    assert_eq!(output.document.count("set_document_mode"), 1);
    assert_eq!(output.document.tree.quirks_mode(), QuirksMode::Quirks);
}

#[test]
fn test_pending_script_handle_from_rc_dom() {
    let output = parse_with_sink("<script>go()</script>", RcDom::new(), &config());
    let script = output.pending_script.expect("script element");
    assert_eq!(script.element_name(), Some("script"));
    assert_eq!(script.text_content(), "go()");
}
