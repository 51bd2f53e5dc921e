//! Tests for the `TreeSink` implementations and tree dumps.

use bramble_dom::{Attribute, DomTree, Namespace, QuirksMode, RcDom, TreeSink};

fn attr(name: &str, value: &str) -> Attribute {
    Attribute::new(name.to_string(), value.to_string())
}

/// Build the same small document through any sink.
fn build<S: TreeSink>(sink: &mut S) {
    let doc = sink.document();
    sink.append_doctype("html", "", "");
    let html = sink.create_element("html", Namespace::Html, vec![attr("lang", "en")]);
    sink.append_child(&doc, &html);
    let body = sink.create_element("body", Namespace::Html, Vec::new());
    sink.append_child(&html, &body);

    let table = sink.create_element("table", Namespace::Html, Vec::new());
    sink.append_child(&body, &table);
    // Foster-parented text lands before the table and merges.
    sink.insert_text_before(&body, "fos", &table);
    sink.insert_text_before(&body, "ter", &table);

    let p = sink.create_element("p", Namespace::Html, vec![attr("id", "a"), attr("class", "b")]);
    sink.append_child(&body, &p);
    sink.append_text(&p, "one ");
    sink.append_text(&p, "two");

    let comment = sink.create_comment_node(" note ");
    sink.append_child(&body, &comment);

    let svg = sink.create_element("svg", Namespace::Svg, vec![attr("xlink:href", "#x")]);
    sink.append_child(&body, &svg);

    let template = sink.create_element("template", Namespace::Html, Vec::new());
    sink.append_child(&body, &template);
    let contents = sink.template_content(&template);
    let b = sink.create_element("b", Namespace::Html, Vec::new());
    sink.append_child(&contents, &b);

    sink.adopt_attributes(&html, vec![attr("lang", "fr"), attr("dir", "ltr")]);
    sink.set_document_mode(QuirksMode::LimitedQuirks);
}

const EXPECTED: &str = "\
| <!DOCTYPE html>
| <html>
|   dir=\"ltr\"
|   lang=\"en\"
|   <body>
|     \"foster\"
|     <table>
|     <p>
|       class=\"b\"
|       id=\"a\"
|       \"one two\"
|     <!--  note  -->
|     <svg svg>
|       xlink href=\"#x\"
|     <template>
|       content
|         <b>
";

#[test]
fn test_arena_sink_dump() {
    let mut tree = DomTree::new();
    build(&mut tree);
    assert_eq!(tree.dump(), EXPECTED);
    assert_eq!(tree.quirks_mode(), QuirksMode::LimitedQuirks);
}

#[test]
fn test_rc_sink_dump_matches_arena() {
    let mut dom = RcDom::new();
    build(&mut dom);
    assert_eq!(dom.dump(), EXPECTED);
    assert_eq!(dom.quirks_mode, QuirksMode::LimitedQuirks);
}

#[test]
fn test_rc_detach_and_reparent() {
    let mut dom = RcDom::new();
    let doc = dom.document();
    let from = dom.create_element("div", Namespace::Html, Vec::new());
    let to = dom.create_element("span", Namespace::Html, Vec::new());
    dom.append_child(&doc, &from);
    dom.append_child(&doc, &to);
    let a = dom.create_element("a", Namespace::Html, Vec::new());
    let b = dom.create_element("b", Namespace::Html, Vec::new());
    dom.append_child(&from, &a);
    dom.append_child(&from, &b);

    dom.reparent_children(&from, &to);
    assert!(from.children.borrow().is_empty());
    assert_eq!(to.children.borrow().len(), 2);
    let parent = dom.parent(&a).expect("a has a parent");
    assert!(dom.same_node(&parent, &to));

    dom.detach(&a);
    assert!(dom.parent(&a).is_none());
    assert_eq!(to.children.borrow().len(), 1);
    assert_eq!(b.element_name(), Some("b"));
}

#[test]
fn test_rc_insert_before_reorders() {
    let mut dom = RcDom::new();
    let doc = dom.document();
    let div = dom.create_element("div", Namespace::Html, Vec::new());
    dom.append_child(&doc, &div);
    let a = dom.create_element("a", Namespace::Html, Vec::new());
    let c = dom.create_element("c", Namespace::Html, Vec::new());
    dom.append_child(&div, &a);
    dom.append_child(&div, &c);
    let b = dom.create_element("b", Namespace::Html, Vec::new());
    dom.insert_before(&div, &b, &c);
    // Moving an attached node detaches it first.
    dom.insert_before(&div, &c, &a);

    let names: Vec<String> = div
        .children
        .borrow()
        .iter()
        .filter_map(|n| n.element_name().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_rc_deep_tree_drops_without_overflow() {
    let mut dom = RcDom::new();
    let mut parent = dom.document();
    for _ in 0..100_000 {
        let child = dom.create_element("div", Namespace::Html, Vec::new());
        dom.append_child(&parent, &child);
        parent = child;
    }
    drop(parent);
    drop(dom);
}

#[test]
fn test_arena_template_content_is_stable() {
    let mut tree = DomTree::new();
    let template = tree.create_element("template", Namespace::Html, Vec::new());
    let first = tree.template_content(&template);
    let second = tree.template_content(&template);
    assert_eq!(first, second);
    assert_eq!(tree.template_contents(template), Some(first));
}
