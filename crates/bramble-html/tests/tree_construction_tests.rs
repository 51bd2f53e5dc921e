//! Tree construction checked against html5lib-style dumps.

use bramble_common::Position;
use bramble_dom::{DomTree, QuirksMode};
use bramble_html::{ParseErrorCode, ParserConfig, parse_document, parse_document_with};

fn dump(html: &str) -> String {
    parse_document(html).document.dump()
}

/// Build the expected dump from lines written without the `| ` prefix.
fn expected(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("| {line}\n")).collect()
}

fn codes(html: &str) -> Vec<ParseErrorCode> {
    parse_document(html)
        .errors
        .iter()
        .map(|error| error.code)
        .collect()
}

#[test]
fn test_misnested_formatting_across_paragraph() {
    assert_eq!(
        dump("<b>1<p>2</b>3</p>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      \"1\"",
            "    <p>",
            "      <b>",
            "        \"2\"",
            "      \"3\"",
        ])
    );
}

#[test]
fn test_noahs_ark_limits_reconstruction() {
    assert_eq!(
        dump("<p><b><b><b><b>x</p><p>y"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            <b>",
            "              \"x\"",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            \"y\"",
        ])
    );
}

#[test]
fn test_implied_table_sections() {
    assert_eq!(
        dump("<table><col><tr><td>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <colgroup>",
            "        <col>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"x\"",
        ])
    );
}

#[test]
fn test_foster_parenting_text_and_elements() {
    assert_eq!(
        dump("<table>aaa<b>x</b><tr><td>bbb</table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    \"aaa\"",
            "    <b>",
            "      \"x\"",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"bbb\"",
        ])
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_eq!(
        dump("<table> <tr><td>a</td></tr></table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      \" \"",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"a\"",
        ])
    );
}

#[test]
fn test_foster_parented_text_reported_once() {
    let errors = codes("<!DOCTYPE html><table>abc<tr><td></td></tr></table>");
    assert_eq!(
        errors
            .iter()
            .filter(|&&code| code == ParseErrorCode::FosterParentedContent)
            .count(),
        1
    );
}

#[test]
fn test_caption_closed_by_cell() {
    assert_eq!(
        dump("<table><caption>c<td>d</table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <caption>",
            "        \"c\"",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"d\"",
        ])
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        dump("<select><option>a<option>b</select>c"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <select>",
            "      <option>",
            "        \"a\"",
            "      <option>",
            "        \"b\"",
            "    \"c\"",
        ])
    );
}

#[test]
fn test_select_in_table_closed_by_cell() {
    assert_eq!(
        dump("<table><tr><td><select><td>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            <select>",
            "          <td>",
            "            \"x\"",
        ])
    );
}

#[test]
fn test_nested_select_closes_select() {
    assert_eq!(
        dump("<select><option>a<select>b"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <select>",
            "      <option>",
            "        \"a\"",
            "    \"b\"",
        ])
    );
}

#[test]
fn test_frameset_document() {
    assert_eq!(
        dump("<frameset><frame></frameset><!--after-->"),
        expected(&[
            "<html>",
            "  <head>",
            "  <frameset>",
            "    <frame>",
            "  <!-- after -->",
        ])
    );
}

#[test]
fn test_unclosed_frameset_reports_eof() {
    let errors = codes("<!DOCTYPE html><frameset><frame>");
    assert_eq!(errors, vec![ParseErrorCode::EofInFrameset]);
}

#[test]
fn test_comment_after_html_goes_to_document() {
    assert_eq!(
        dump("<!DOCTYPE html><html><body></body></html><!--x-->"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "<!-- x -->",
        ])
    );
}

#[test]
fn test_comment_after_body_goes_to_html() {
    assert_eq!(
        dump("<!DOCTYPE html><body></body><!--x-->"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "  <!-- x -->",
        ])
    );
}

#[test]
fn test_template_contents() {
    assert_eq!(
        dump("<!DOCTYPE html><template><td>x</td></template>"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    <template>",
            "      content",
            "        <td>",
            "          \"x\"",
            "  <body>",
        ])
    );
}

#[test]
fn test_unclosed_template_reports_eof() {
    let errors = codes("<!DOCTYPE html><template><p>x");
    assert!(errors.contains(&ParseErrorCode::EofInTemplate));
}

#[test]
fn test_svg_case_adjustment_and_integration_point() {
    assert_eq!(
        dump(r##"<svg viewbox="0 0 1 1"><foreignobject><p>hi</p></foreignobject><path xlink:href="#a"/></svg>"##),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      viewBox=\"0 0 1 1\"",
            "      <svg foreignObject>",
            "        <p>",
            "          \"hi\"",
            "      <svg path>",
            "        xlink href=\"#a\"",
        ])
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_eq!(
        dump("<svg><g><div>x</div>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg g>",
            "    <div>",
            "      \"x\"",
        ])
    );
}

#[test]
fn test_mathml_integration_points() {
    assert_eq!(
        dump(r#"<math definitionurl="u"><mi>x</mi><annotation-xml encoding="text/html"><div>y</div></annotation-xml></math>"#),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <math math>",
            "      definitionURL=\"u\"",
            "      <math mi>",
            "        \"x\"",
            "      <math annotation-xml>",
            "        encoding=\"text/html\"",
            "        <div>",
            "          \"y\"",
        ])
    );
}

#[test]
fn test_cdata_in_svg() {
    assert_eq!(
        dump("<svg><![CDATA[a<b]]></svg>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      \"a<b\"",
        ])
    );
}

#[test]
fn test_cdata_in_html_is_bogus_comment() {
    assert_eq!(
        dump("<div><![CDATA[x]]></div>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      <!-- [CDATA[x]] -->",
        ])
    );
}

#[test]
fn test_title_is_rcdata() {
    assert_eq!(
        dump("<title>a<b>&amp;c</title>"),
        expected(&[
            "<html>",
            "  <head>",
            "    <title>",
            "      \"a<b>&c\"",
            "  <body>",
        ])
    );
}

#[test]
fn test_textarea_drops_leading_newline() {
    assert_eq!(
        dump("<textarea>\nx</textarea>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <textarea>",
            "      \"x\"",
        ])
    );
}

#[test]
fn test_plaintext_swallows_rest() {
    assert_eq!(
        dump("<plaintext><b>x</plaintext>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <plaintext>",
            "      \"<b>x</plaintext>\"",
        ])
    );
}

#[test]
fn test_second_html_tag_merges_attributes() {
    assert_eq!(
        dump("<html a=1><body><html b=2 a=3>"),
        expected(&[
            "<html>",
            "  a=\"1\"",
            "  b=\"2\"",
            "  <head>",
            "  <body>",
        ])
    );
}

#[test]
fn test_noscript_depends_on_scripting_flag() {
    let html = "<body><noscript><p>x</p></noscript>";
    assert_eq!(
        dump(html),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <noscript>",
            "      \"<p>x</p>\"",
        ])
    );

    let config = ParserConfig {
        scripting_enabled: false,
        ..ParserConfig::default()
    };
    assert_eq!(
        parse_document_with(html, &config).document.dump(),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <noscript>",
            "      <p>",
            "        \"x\"",
        ])
    );
}

#[test]
fn test_script_is_left_pending() {
    let output = parse_document("<script>var a = 1;</script>");
    let script = output.pending_script.expect("script element");
    let tree: &DomTree = &output.document;
    assert_eq!(tree.as_element(script).map(|e| e.tag_name.as_str()), Some("script"));
    assert_eq!(tree.text_content(script), "var a = 1;");
}

#[test]
fn test_quirks_mode_detection() {
    let cases = [
        ("<p>", QuirksMode::Quirks),
        ("<!DOCTYPE html>", QuirksMode::NoQuirks),
        ("<!DOCTYPE html SYSTEM \"about:legacy-compat\">", QuirksMode::NoQuirks),
        (
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\">",
            QuirksMode::Quirks,
        ),
        (
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \"http://www.w3.org/TR/html4/loose.dtd\">",
            QuirksMode::LimitedQuirks,
        ),
        (
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">",
            QuirksMode::LimitedQuirks,
        ),
        ("<!DOCTYPE svg>", QuirksMode::Quirks),
    ];
    for (html, mode) in cases {
        let output = parse_document(html);
        assert_eq!(output.quirks_mode, mode, "{html}");
        assert_eq!(output.document.quirks_mode(), mode, "{html}");
    }
}

#[test]
fn test_quirks_table_does_not_close_paragraph() {
    assert_eq!(
        dump("<p><table></table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <table>",
        ])
    );
    assert_eq!(
        dump("<!DOCTYPE html><p><table></table>"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "    <table>",
        ])
    );
}

#[test]
fn test_missing_doctype_reported() {
    assert_eq!(codes("<p>x</p>"), vec![ParseErrorCode::MissingDoctype]);
    assert!(codes("<!DOCTYPE html><p>x</p>").is_empty());
}

#[test]
fn test_stray_end_tag_reported_once() {
    let errors = codes("<!DOCTYPE html><p>x</div>");
    assert_eq!(errors, vec![ParseErrorCode::EndTagWithoutMatchingOpenElement]);
}

#[test]
fn test_error_position_is_end_of_token() {
    let output = parse_document("<!DOCTYPE html>\n<p>\n</div>");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].position, Position::new(3, 6));
}

#[test]
fn test_error_limit_and_switch() {
    let html = "</a></b></c></d>";
    assert!(codes(html).len() > 2);

    let limited = ParserConfig {
        max_errors: Some(2),
        ..ParserConfig::default()
    };
    assert_eq!(parse_document_with(html, &limited).errors.len(), 2);

    let silent = ParserConfig {
        report_errors: false,
        ..ParserConfig::default()
    };
    let output = parse_document_with(html, &silent);
    assert!(output.errors.is_empty());
    assert_eq!(output.document.dump(), dump(html));
}

#[test]
fn test_reporter_sees_every_error() {
    let mut seen: Vec<bramble_html::ParseError> = Vec::new();
    let output = bramble_html::Parser::new("<p></div>", DomTree::new(), &ParserConfig::default())
        .run_with_reporter(&mut seen);
    assert_eq!(seen, output.errors);
    assert!(!seen.is_empty());
}

#[test]
fn test_empty_and_lone_angle_bracket() {
    for html in ["", "<", "</", "<!"] {
        let tree = parse_document(html).document;
        let roots = tree
            .children(tree.root())
            .iter()
            .filter(|&&id| tree.as_element(id).is_some())
            .count();
        assert_eq!(roots, 1, "{html:?}");
        assert!(tree.body().is_some(), "{html:?}");
    }
    assert_eq!(
        dump("<"),
        expected(&["<html>", "  <head>", "  <body>", "    \"<\""])
    );
}

#[test]
fn test_consecutive_cols_share_colgroup() {
    assert_eq!(
        dump("<table><col><col></table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <colgroup>",
            "        <col>",
            "        <col>",
        ])
    );
}

#[test]
fn test_stray_end_tag_in_empty_body() {
    let output = parse_document("<!DOCTYPE html><body></div>");
    assert_eq!(
        output.errors.iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![ParseErrorCode::EndTagWithoutMatchingOpenElement]
    );
    assert_eq!(
        output.document.dump(),
        expected(&["<!DOCTYPE html>", "<html>", "  <head>", "  <body>"])
    );
}

#[test]
fn test_title_markup_stays_text() {
    let tree = parse_document("<title><b>not bold</b></title>").document;
    let title = tree.find_element(tree.root(), "title").expect("title");
    assert_eq!(tree.children(title).len(), 1);
    assert_eq!(tree.as_text(tree.children(title)[0]), Some("<b>not bold</b>"));
    assert!(tree.find_element(tree.root(), "b").is_none());
}

#[test]
fn test_html_attributes_in_template_not_adopted() {
    assert_eq!(
        dump("<!DOCTYPE html><template><html lang=en></template>"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    <template>",
            "      content",
            "  <body>",
        ])
    );
    assert_eq!(
        dump("<!DOCTYPE html><p><html lang=en>"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  lang=\"en\"",
            "  <head>",
            "  <body>",
            "    <p>",
        ])
    );
}

#[test]
fn test_br_end_tag_at_svg_integration_point() {
    let output = parse_document("<!DOCTYPE html><svg><title></br>");
    assert_eq!(
        output.errors.iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![
            ParseErrorCode::UnexpectedEndTag,
            ParseErrorCode::UnexpectedEndTag,
            ParseErrorCode::OpenElementsLeftAfterEof,
        ]
    );
    assert_eq!(
        output.document.dump(),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg title>",
            "        <br>",
        ])
    );
}

#[test]
fn test_p_end_tag_at_mathml_text_integration_point() {
    assert_eq!(
        dump("<math><mi></p>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <math math>",
            "      <math mi>",
            "        <p>",
        ])
    );
}

#[test]
fn test_end_tags_at_html_integration_points() {
    assert_eq!(
        dump("<svg><desc></p>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg desc>",
            "        <p>",
            "        \"x\"",
        ])
    );
    assert_eq!(
        dump("<math><annotation-xml encoding=text/html></br>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <math math>",
            "      <math annotation-xml>",
            "        encoding=\"text/html\"",
            "        <br>",
        ])
    );
}

#[test]
fn test_eof_in_title_recovers() {
    let output = parse_document("<!DOCTYPE html><title>abc");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, ParseErrorCode::EofInElementThatCanOnlyContainText);
    assert_eq!(output.errors[0].position, Position::new(1, 25));
    // The title is popped, "in head" resumes and EOF still builds the body.
    assert_eq!(
        output.document.dump(),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    <title>",
            "      \"abc\"",
            "  <body>",
        ])
    );
}

#[test]
fn test_eof_in_script_reprocessed_in_body() {
    let output = parse_document("<!DOCTYPE html><body><div><script>x");
    assert_eq!(
        output.errors.iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![
            ParseErrorCode::EofInElementThatCanOnlyContainText,
            ParseErrorCode::OpenElementsLeftAfterEof,
        ]
    );
    assert_eq!(
        output.document.dump(),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      <script>",
            "        \"x\"",
        ])
    );
}
