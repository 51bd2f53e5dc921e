//! "In body" rules: implied end tags, list items, headings, forms and
//! attribute handling, each checked as the tree the parser leaves behind.

use bramble_dom::NodeId;
use bramble_html::parse_document;

fn dump(html: &str) -> String {
    parse_document(html).document.dump()
}

/// Expected dump of a document with an empty head, given only the lines
/// under `<body>` (without their indentation).
fn in_body(lines: &[&str]) -> String {
    let mut out = String::from("| <html>\n|   <head>\n|   <body>\n");
    for line in lines {
        out.push_str("|     ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn expected(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("| {line}\n")).collect()
}

#[test]
fn test_list_items_close_each_other() {
    assert_eq!(
        dump("<ul><li>A<li>B</ul>"),
        in_body(&["<ul>", "  <li>", "    \"A\"", "  <li>", "    \"B\""])
    );
    assert_eq!(
        dump("<dl><dt>T<dd>D<dt>T2</dl>"),
        in_body(&[
            "<dl>",
            "  <dt>",
            "    \"T\"",
            "  <dd>",
            "    \"D\"",
            "  <dt>",
            "    \"T2\"",
        ])
    );
}

#[test]
fn test_list_item_stops_at_nested_list() {
    assert_eq!(
        dump("<ul><li>A<ul><li>B</ul>C</ul>"),
        in_body(&[
            "<ul>",
            "  <li>",
            "    \"A\"",
            "    <ul>",
            "      <li>",
            "        \"B\"",
            "    \"C\"",
        ])
    );
}

#[test]
fn test_list_item_closes_through_div() {
    assert_eq!(
        dump("<li><div><li>"),
        in_body(&["<li>", "  <div>", "<li>"])
    );
}

#[test]
fn test_heading_closes_open_heading() {
    assert_eq!(
        dump("<h1>a<h2>b</h1>c"),
        in_body(&["<h1>", "  \"a\"", "<h2>", "  \"b\"", "\"c\""])
    );
}

#[test]
fn test_paragraph_closed_by_block() {
    assert_eq!(
        dump("<p>a<div>b</div><p>c<p>d"),
        in_body(&[
            "<p>",
            "  \"a\"",
            "<div>",
            "  \"b\"",
            "<p>",
            "  \"c\"",
            "<p>",
            "  \"d\"",
        ])
    );
}

#[test]
fn test_formatting_split_by_block() {
    assert_eq!(
        dump("<b>1<div>2</b>3"),
        in_body(&["<b>", "  \"1\"", "<div>", "  <b>", "    \"2\"", "  \"3\""])
    );
}

#[test]
fn test_formatting_reopened_in_next_paragraph() {
    assert_eq!(
        dump("<p><b>bold</p><p>more"),
        in_body(&[
            "<p>",
            "  <b>",
            "    \"bold\"",
            "<p>",
            "  <b>",
            "    \"more\"",
        ])
    );
}

#[test]
fn test_nested_anchor_closes_outer() {
    assert_eq!(
        dump("<a href=1>x<a href=2>y"),
        in_body(&[
            "<a>",
            "  href=\"1\"",
            "  \"x\"",
            "<a>",
            "  href=\"2\"",
            "  \"y\"",
        ])
    );
}

#[test]
fn test_nested_button_closes_outer() {
    assert_eq!(
        dump("<button>a<button>b"),
        in_body(&["<button>", "  \"a\"", "<button>", "  \"b\""])
    );
}

#[test]
fn test_stray_end_tags_are_dropped() {
    assert_eq!(dump("<body></li>x</ol>y"), in_body(&["\"xy\""]));
    // `</span>` cannot cross the special `<div>` above it.
    assert_eq!(
        dump("<span><div>t</span>u"),
        in_body(&["<span>", "  <div>", "    \"tu\""])
    );
}

#[test]
fn test_nested_form_is_ignored() {
    assert_eq!(
        dump("<form><form>x</form>y"),
        in_body(&["<form>", "  \"x\"", "\"y\""])
    );
}

#[test]
fn test_pre_drops_one_leading_newline() {
    assert_eq!(dump("<pre>\nx</pre>"), in_body(&["<pre>", "  \"x\""]));
    assert_eq!(dump("<listing>\nx"), in_body(&["<listing>", "  \"x\""]));
}

#[test]
fn test_void_elements_do_not_nest() {
    assert_eq!(
        dump("<p>a<br>b<input type=text>c<image src=i>"),
        in_body(&[
            "<p>",
            "  \"a\"",
            "  <br>",
            "  \"b\"",
            "  <input>",
            "    type=\"text\"",
            "  \"c\"",
            "  <img>",
            "    src=\"i\"",
        ])
    );
}

#[test]
fn test_text_after_body_end_tag_returns_to_body() {
    assert_eq!(dump("<body>a</body>b</html>c"), in_body(&["\"abc\""]));
    assert_eq!(dump("<body>  hi  </body>"), in_body(&["\"  hi  \""]));
}

#[test]
fn test_style_in_head_is_raw_text() {
    assert_eq!(
        dump("<style><div>x</div></style>"),
        expected(&[
            "<html>",
            "  <head>",
            "    <style>",
            "      \"<div>x</div>\"",
            "  <body>",
        ])
    );
}

#[test]
fn test_meta_after_head_goes_into_head() {
    assert_eq!(
        dump("<head></head><meta charset=utf-8><body>"),
        expected(&[
            "<html>",
            "  <head>",
            "    <meta>",
            "      charset=\"utf-8\"",
            "  <body>",
        ])
    );
}

#[test]
fn test_comments_before_and_inside_document() {
    assert_eq!(
        dump("<!-- c --><p>x<!--d-->"),
        expected(&[
            "<!--  c  -->",
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"x\"",
            "      <!-- d -->",
        ])
    );
}

#[test]
fn test_attribute_values_decode_references() {
    // Legacy references are not expanded before "=" inside attributes, and
    // a repeated attribute keeps its first value.
    assert_eq!(
        dump(r#"<a href="?a=1&amp;b=2&copy=3" title='&lt;x&gt;' id=one id=two>"#),
        in_body(&[
            "<a>",
            "  href=\"?a=1&b=2&copy=3\"",
            "  id=\"one\"",
            "  title=\"<x>\"",
        ])
    );
}

#[test]
fn test_names_are_lowercased() {
    let tree = parse_document(r#"<DIV ID="x"><SPAN Class="y">z</SPAN></DIV>"#).document;
    let span = tree.find_element(NodeId::ROOT, "span");
    let class = span
        .and_then(|id| tree.as_element(id))
        .and_then(|data| data.get_attribute("class"));
    assert_eq!(class, Some("y"));
    assert_eq!(span.map(|id| tree.text_content(id)).as_deref(), Some("z"));
    assert_eq!(tree.find_element(NodeId::ROOT, "DIV"), None);
}
