//! Arena mutations, checked through the html5lib-style dump so each test
//! reads as the tree it leaves behind.

use bramble_dom::{DomTree, ElementData, Namespace, NodeId, NodeType};

fn new_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(
        tag.to_string(),
        Namespace::Html,
        Vec::new(),
    )))
}

/// Allocate `<tag>` and append it to `parent`.
fn child(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    let id = new_element(tree, tag);
    tree.append_child(parent, id);
    id
}

fn expected(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("| {line}\n")).collect()
}

/// `<body>` holding `<a>`, `<b>` and `<c>`.
fn body_with_three() -> (DomTree, NodeId, [NodeId; 3]) {
    let mut tree = DomTree::new();
    let body = child(&mut tree, NodeId::ROOT, "body");
    let a = child(&mut tree, body, "a");
    let b = child(&mut tree, body, "b");
    let c = child(&mut tree, body, "c");
    (tree, body, [a, b, c])
}

#[test]
fn test_remove_each_position_relinks_siblings() {
    for victim in 0..3 {
        let (mut tree, body, nodes) = body_with_three();
        tree.remove_child(body, nodes[victim]);

        let rest: Vec<NodeId> = nodes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != victim)
            .map(|(_, &id)| id)
            .collect();
        assert_eq!(tree.children(body), rest.as_slice());
        assert_eq!(tree.prev_sibling(rest[0]), None);
        assert_eq!(tree.next_sibling(rest[0]), Some(rest[1]));
        assert_eq!(tree.prev_sibling(rest[1]), Some(rest[0]));
        assert_eq!(tree.next_sibling(rest[1]), None);

        let removed = nodes[victim];
        assert_eq!(tree.parent(removed), None);
        assert_eq!(tree.prev_sibling(removed), None);
        assert_eq!(tree.next_sibling(removed), None);
    }
}

#[test]
fn test_remove_from_wrong_parent_keeps_tree() {
    let (mut tree, body, [a, ..]) = body_with_three();
    let before = tree.dump();
    tree.remove_child(a, body);
    tree.remove_child(NodeId::ROOT, a);
    assert_eq!(tree.dump(), before);
    assert_eq!(tree.parent(a), Some(body));
}

#[test]
fn test_detach_leaves_node_reusable() {
    let (mut tree, body, [a, b, _]) = body_with_three();
    tree.detach(b);
    tree.detach(b);
    tree.append_child(a, b);
    assert_eq!(tree.dump(), expected(&["<body>", "  <a>", "    <b>", "  <c>"]));
}

#[test]
fn test_insert_before_reorders_and_reparents() {
    let (mut tree, body, [a, b, c]) = body_with_three();
    // c moves in front of a; a moves under b.
    tree.insert_before(body, c, a);
    tree.insert_before(b, a, NodeId::ROOT);
    assert_eq!(tree.dump(), expected(&["<body>", "  <c>", "  <b>", "    <a>"]));
    assert_eq!(tree.first_child(body), Some(c));
    assert_eq!(tree.last_child(body), Some(b));
    assert_eq!(tree.next_sibling(c), Some(b));
}

#[test]
fn test_appending_a_child_moves_it() {
    let (mut tree, body, [a, _, c]) = body_with_three();
    tree.append_child(c, a);
    assert_eq!(tree.children(body).len(), 2);
    assert_eq!(tree.dump(), expected(&["<body>", "  <b>", "  <c>", "    <a>"]));
    assert!(tree.is_descendant_of(a, body));
    assert!(!tree.is_descendant_of(body, a));
}

#[test]
fn test_move_children_like_adoption_agency() {
    // The furthest block's children move under a fresh clone of the
    // formatting element, which then becomes its only child.
    let mut tree = DomTree::new();
    let p = child(&mut tree, NodeId::ROOT, "p");
    tree.append_text(p, "2");
    let _ = child(&mut tree, p, "i");
    let clone = new_element(&mut tree, "b");

    tree.move_children(p, clone);
    tree.append_child(p, clone);

    assert_eq!(tree.dump(), expected(&["<p>", "  <b>", "    \"2\"", "    <i>"]));

    let empty = new_element(&mut tree, "span");
    tree.move_children(empty, p);
    assert_eq!(tree.children(p), &[clone]);
}

#[test]
fn test_text_merges_only_with_adjacent_text() {
    let mut tree = DomTree::new();
    let td = child(&mut tree, NodeId::ROOT, "td");
    tree.append_text(td, "a");
    tree.append_text(td, "b");
    let _ = child(&mut tree, td, "br");
    tree.append_text(td, "c");
    assert_eq!(tree.dump(), expected(&["<td>", "  \"ab\"", "  <br>", "  \"c\""]));
    assert_eq!(tree.text_content(td), "abc");
}

#[test]
fn test_foster_parented_text_merges_before_table() {
    let mut tree = DomTree::new();
    let body = child(&mut tree, NodeId::ROOT, "body");
    let table = child(&mut tree, body, "table");
    tree.insert_text_before(body, "x", table);
    tree.insert_text_before(body, "y", table);
    let _ = child(&mut tree, table, "tbody");
    assert_eq!(
        tree.dump(),
        expected(&["<body>", "  \"xy\"", "  <table>", "    <tbody>"])
    );
}

#[test]
fn test_ancestor_and_sibling_walks() {
    let mut tree = DomTree::new();
    let html = child(&mut tree, NodeId::ROOT, "html");
    let head = child(&mut tree, html, "head");
    let body = child(&mut tree, html, "body");
    let ul = child(&mut tree, body, "ul");
    let items: Vec<NodeId> = (0..3).map(|_| child(&mut tree, ul, "li")).collect();

    assert_eq!(
        tree.ancestors(items[2]).collect::<Vec<_>>(),
        vec![ul, body, html, NodeId::ROOT]
    );
    assert_eq!(
        tree.preceding_siblings(items[2]).collect::<Vec<_>>(),
        vec![items[1], items[0]]
    );
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_template_contents_are_dumped_and_searched() {
    let mut tree = DomTree::new();
    let template = child(&mut tree, NodeId::ROOT, "template");
    let fragment = tree.alloc(NodeType::DocumentFragment);
    if let Some(data) = tree.as_element_mut(template) {
        data.template_contents = Some(fragment);
    }
    let td = child(&mut tree, fragment, "td");
    tree.append_text(td, "cell");

    assert_eq!(
        tree.dump(),
        expected(&["<template>", "  content", "    <td>", "      \"cell\""])
    );
    assert_eq!(tree.template_contents(template), Some(fragment));
    assert_eq!(tree.find_element(NodeId::ROOT, "td"), Some(td));
    // Contents are not children, so text_content skips them.
    assert_eq!(tree.text_content(template), "");
}

fn nested_divs(depth: usize) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let mut parent = NodeId::ROOT;
    for _ in 0..depth {
        parent = child(&mut tree, parent, "div");
    }
    let span = child(&mut tree, parent, "span");
    tree.append_text(span, "leaf");
    (tree, span)
}

#[test]
fn test_deep_nesting_walks_without_recursion() {
    const DEPTH: usize = 200_000;
    let (tree, span) = nested_divs(DEPTH);
    assert_eq!(tree.text_content(NodeId::ROOT), "leaf");
    assert_eq!(tree.find_element(NodeId::ROOT, "span"), Some(span));
    assert_eq!(tree.find_element(NodeId::ROOT, "p"), None);
    assert_eq!(tree.ancestors(span).count(), DEPTH + 1);
}

#[test]
fn test_deep_nesting_dump() {
    // Indentation grows with depth, so the dump is quadratic in size.
    const DEPTH: usize = 3_000;
    let (tree, _) = nested_divs(DEPTH);
    let dump = tree.dump();
    assert_eq!(dump.lines().count(), DEPTH + 2);
    let last = dump.lines().last().unwrap_or_default();
    assert_eq!(last.trim_start_matches(['|', ' ']), "\"leaf\"");
    assert_eq!(last.len(), "| ".len() + 2 * (DEPTH + 1) + "\"leaf\"".len());
}
