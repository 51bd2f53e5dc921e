//! Integration tests for the HTML tokenizer.

use bramble_html::{HTMLTokenizer, ParseErrorCode, TagName, Token, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).run()
}

/// Tokenize the contents of a text-only element the way the tree builder
/// drives it: after the start tag, the tokenizer is switched to `state`.
fn tokenize_text_element(tag: &str, state: TokenizerState, input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let start = tokenizer.next_token();
    assert!(matches!(&start, Token::StartTag { name, .. } if name == tag));
    tokenizer.set_state(state);
    let mut tokens = vec![start];
    tokens.extend(tokenizer.run());
    tokens
}

fn character_data(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

fn error_codes(input: &str) -> Vec<ParseErrorCode> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let _ = tokenizer.run();
    tokenizer.take_errors().into_iter().map(|e| e.code).collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            tag,
            self_closing,
            attributes,
        } => {
            assert_eq!(*tag, TagName::Div);
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "bar");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "baz");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "disabled");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes[0].name, "type");
            assert_eq!(attributes[0].value, "text");
            assert_eq!(attributes[1].name, "id");
            assert_eq!(attributes[1].value, "name");
            assert_eq!(attributes[2].name, "disabled");
            assert_eq!(attributes[2].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>"#;
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    // Count tag tokens
    let start_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .collect();
    let end_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .collect();

    assert_eq!(start_tags.len(), 4); // html, head, title, body
    assert_eq!(end_tags.len(), 4); // /title, /head, /body, /html
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize_text_element("style", TokenizerState::Rawtext, "<style>body { color: red; }</style>");

    // Should have: <style>, characters for content, </style>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));

    // Collect the character content
    let content = character_data(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "body { color: red; }");

    // Last tokens should be </style> and EOF
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_title_element_rcdata() {
    // Title content should be treated as RCDATA (raw text, but character references are parsed)
    let tokens = tokenize_text_element("title", TokenizerState::Rcdata, "<title>My Page</title>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "title"));

    let content = character_data(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "My Page");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_style_with_fake_tags() {
    // Tags inside style should NOT be parsed as tags
    let tokens = tokenize_text_element("style", TokenizerState::Rawtext, "<style><div>not a tag</div></style>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));

    let content = character_data(&tokens[1..tokens.len() - 2]);

    // The <div> and </div> should appear as literal text, not as tags
    assert_eq!(content, "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_title_with_less_than() {
    // Less-than signs in title should be emitted as characters
    let tokens = tokenize_text_element("title", TokenizerState::Rcdata, "<title>a < b</title>");

    let content = character_data(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "a < b");
}

#[test]
fn test_style_with_wrong_end_tag() {
    // </notastyle> inside style should NOT close the style element
    let tokens = tokenize_text_element("style", TokenizerState::Rawtext, "<style>a</notastyle>b</style>");

    let content = character_data(&tokens[1..tokens.len() - 2]);

    // The </notastyle> should appear as literal text
    assert_eq!(content, "a</notastyle>b");
}

#[test]
fn test_textarea_element_rcdata() {
    let tokens = tokenize_text_element("textarea", TokenizerState::Rcdata, "<textarea><b>bold?</b></textarea>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "textarea"));

    let content = character_data(&tokens[1..tokens.len() - 2]);

    // Content should be literal text, not parsed tags
    assert_eq!(content, "<b>bold?</b>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_xmp_element_rawtext() {
    let tokens = tokenize_text_element("xmp", TokenizerState::Rawtext, "<xmp><html>is text</html></xmp>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "xmp"));

    let content = character_data(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "<html>is text</html>");
}

#[test]
fn test_iframe_element_rawtext() {
    let tokens = tokenize_text_element("iframe", TokenizerState::Rawtext, "<iframe>some content</iframe>");

    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "iframe"));

    let content = character_data(&tokens[1..tokens.len() - 2]);

    assert_eq!(content, "some content");
}

#[test]
fn test_character_reference_bare_ampersand() {
    // [§ 13.2.5.72 Character reference state]
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    // Should be: 'a', ' ', '&', ' ', 'b', EOF
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[0], Token::Character { data: 'a' }));
    assert!(matches!(tokens[1], Token::Character { data: ' ' }));
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert!(matches!(tokens[3], Token::Character { data: ' ' }));
    assert!(matches!(tokens[4], Token::Character { data: 'b' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_named_character_reference_amp() {
    // [§ 13.2.5.73 Named character reference state]
    // &amp; should be replaced with &
    let tokens = tokenize("a &amp; b");
    let content = character_data(&tokens);
    assert_eq!(content, "a & b");
}

#[test]
fn test_named_character_reference_lt_gt() {
    // &lt; and &gt; should be replaced with < and >
    let tokens = tokenize("&lt;div&gt;");
    let content = character_data(&tokens);
    assert_eq!(content, "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon should still work
    let tokens = tokenize("&amp is ok");
    let content = character_data(&tokens);
    assert_eq!(content, "& is ok");
}

#[test]
fn test_named_character_reference_unknown() {
    // Unknown entities should be passed through as-is
    let tokens = tokenize("&qqqq;");
    let content = character_data(&tokens);
    // The ampersand and entity name should be emitted as characters
    assert_eq!(content, "&qqqq;");
}

#[test]
fn test_named_character_reference_in_attribute() {
    // Entities in attribute values should be replaced
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?a=1&b=2");
        }
        _ => panic!("Expected StartTag token"),
    }
}

// ========== Script data and CDATA ==========

#[test]
fn test_script_data_escaped_end_tag() {
    // A `</script>` inside an escaped `<!-- -->` run still ends the script.
    let tokens = tokenize_text_element(
        "script",
        TokenizerState::ScriptData,
        "<script><!-- if (a</b) {} --></script>",
    );
    assert_eq!(character_data(&tokens), "<!-- if (a</b) {} -->");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_script_data_double_escaped() {
    // Inside `<!--<script>`, a `</script>` only leaves the double escape.
    let tokens = tokenize_text_element(
        "script",
        TokenizerState::ScriptData,
        "<script><!--<script></script>x--></script>",
    );
    assert_eq!(character_data(&tokens), "<!--<script></script>x-->");
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_text_element("plaintext", TokenizerState::Plaintext, "<plaintext></plaintext><b>");
    assert_eq!(character_data(&tokens), "</plaintext><b>");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_cdata_is_bogus_comment_in_html_content() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "[CDATA[x]]"));
    assert_eq!(error_codes("<![CDATA[x]]>"), vec![ParseErrorCode::CdataInHtmlContent]);
}

#[test]
fn test_cdata_section_in_foreign_content() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[a<b]]>");
    tokenizer.set_cdata_allowed(true);
    let tokens = tokenizer.run();
    assert_eq!(character_data(&tokens), "a<b");
    assert!(tokenizer.take_errors().is_empty());
}

// ========== Numeric character references ==========

#[test]
fn test_numeric_character_references() {
    assert_eq!(character_data(&tokenize("&#65;&#x42;&#X63;")), "ABc");
}

#[test]
fn test_numeric_character_reference_replacements() {
    // C1 controls map through the windows-1252 table; zero and surrogates
    // become U+FFFD.
    assert_eq!(character_data(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(character_data(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(character_data(&tokenize("&#xD800;")), "\u{FFFD}");
    assert_eq!(character_data(&tokenize("&#x110000;")), "\u{FFFD}");
}

// ========== Parse errors ==========

#[test]
fn test_error_abrupt_closing_of_empty_comment() {
    assert_eq!(
        error_codes("<!-->"),
        vec![ParseErrorCode::AbruptClosingOfEmptyComment]
    );
    assert_eq!(
        error_codes("<!--->"),
        vec![ParseErrorCode::AbruptClosingOfEmptyComment]
    );
}

#[test]
fn test_error_duplicate_attribute_keeps_first() {
    let tokens = tokenize("<div a=1 a=2>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].value, "1");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(error_codes("<div a=1 a=2>"), vec![ParseErrorCode::DuplicateAttribute]);
}

#[test]
fn test_error_quote_in_attribute_name() {
    let tokens = tokenize("<div a\"b=1>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "a\"b");
            assert_eq!(attributes[0].value, "1");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(
        error_codes("<div a\"b=1>"),
        vec![ParseErrorCode::UnexpectedCharacterInAttributeName]
    );
    assert_eq!(
        error_codes("<div x'<y>"),
        vec![
            ParseErrorCode::UnexpectedCharacterInAttributeName,
            ParseErrorCode::UnexpectedCharacterInAttributeName,
        ]
    );
}

#[test]
fn test_error_eof_in_tag() {
    let tokens = tokenize("<div class=");
    assert_eq!(tokens, vec![Token::EndOfFile]);
    assert_eq!(error_codes("<div class"), vec![ParseErrorCode::EofInTag]);
}

#[test]
fn test_error_missing_end_tag_name() {
    assert!(tokenize("</>").iter().all(Token::is_eof));
    assert_eq!(error_codes("</>"), vec![ParseErrorCode::MissingEndTagName]);
}

#[test]
fn test_error_unknown_named_reference_with_semicolon() {
    assert_eq!(
        error_codes("&qqqq;"),
        vec![ParseErrorCode::UnknownNamedCharacterReference]
    );
}

#[test]
fn test_legacy_prefix_of_longer_name() {
    // "&not" is a legacy reference, so it matches even inside "&notit;".
    assert_eq!(character_data(&tokenize("&notit;")), "\u{AC}it;");
    assert_eq!(
        error_codes("&notit;"),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_error_missing_semicolon() {
    assert_eq!(
        error_codes("&amp is ok"),
        vec![ParseErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_error_eof_before_tag_name() {
    let tokens = tokenize("a<");
    assert_eq!(character_data(&tokens), "a<");
    assert_eq!(error_codes("a<"), vec![ParseErrorCode::EofBeforeTagName]);
}

#[test]
fn test_error_positions_track_lines() {
    let mut tokenizer = HTMLTokenizer::new("ok\n\n<div a=1 a=2>");
    let _ = tokenizer.run();
    let errors = tokenizer.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].position.line, 3);
}

#[test]
fn test_crlf_normalized() {
    assert_eq!(character_data(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

#[test]
fn test_doctype_identifiers() {
    let tokens = tokenize(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#);
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    match &tokenize("<!DOCTYPE>")[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_uppercase_tag_names_are_lowercased_and_classified() {
    match &tokenize("<TABLE>")[0] {
        Token::StartTag { name, tag, .. } => {
            assert_eq!(name, "table");
            assert_eq!(*tag, TagName::Table);
        }
        _ => panic!("Expected StartTag token"),
    }
}
