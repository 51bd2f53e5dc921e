//! Randomized checks that hold for every input: the parser is total and
//! deterministic, and always produces the minimal document skeleton.

use bramble_html::{HTMLTokenizer, ParserConfig, Token, parse_document, parse_document_with};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const FRAGMENTS: &[&str] = &[
    "<!DOCTYPE html>", "<html>", "</html>", "<head>", "</head>", "<body>", "</body>", "<p>",
    "</p>", "<b>", "</b>", "<i>", "</i>", "<a href=x>", "</a>", "<div>", "</div>", "<table>",
    "</table>", "<tr>", "<td>", "</td>", "<caption>", "<colgroup>", "<col>", "<select>",
    "<option>", "</select>", "<template>", "</template>", "<svg>", "</svg>", "<math>", "<mi>",
    "<foreignObject>", "<frameset>", "<frame>", "<title>", "</title>", "<script>", "</script>",
    "<textarea>", "<style>", "<plaintext>", "<!--", "-->", "<![CDATA[", "]]>", "&amp;", "&",
    "&#x", "<", ">", "/", "=", "\"", "'", "text", " ", "\n", "\r", "\0", "<br/>", "<li>",
    "<ul>", "<button>", "<form>", "<nobr>", "<marquee>", "<image>", "<isindex>", "</br>",
    "<desc>", "<mtext>", "<annotation-xml encoding=text/html>", "<font color=red>",
];

/// A string stitched together from tag-heavy fragments, so random inputs
/// reach the interesting insertion modes.
#[derive(Debug, Clone)]
struct TagSoup(String);

impl Arbitrary for TagSoup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 48;
        let mut soup = String::new();
        for _ in 0..len {
            if let Some(fragment) = g.choose(FRAGMENTS) {
                soup.push_str(fragment);
            }
        }
        Self(soup)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

fn has_skeleton(html: &str) -> bool {
    let tree = parse_document(html).document;
    tree.document_element()
        .and_then(|html| tree.as_element(html))
        .is_some_and(|element| element.tag_name == "html")
        && tree.head().is_some()
        && tree.body().is_some()
}

#[quickcheck]
fn prop_any_string_builds_skeleton(input: String) -> bool {
    has_skeleton(&input)
}

#[quickcheck]
fn prop_tag_soup_builds_skeleton(soup: TagSoup) -> bool {
    has_skeleton(&soup.0)
}

#[quickcheck]
fn prop_parse_is_deterministic(soup: TagSoup) -> bool {
    let first = parse_document(&soup.0);
    let second = parse_document(&soup.0);
    first.document.dump() == second.document.dump()
        && first.errors == second.errors
        && first.quirks_mode == second.quirks_mode
}

#[quickcheck]
fn prop_error_reporting_does_not_change_tree(soup: TagSoup) -> bool {
    let config = ParserConfig {
        report_errors: false,
        ..ParserConfig::default()
    };
    let quiet = parse_document_with(&soup.0, &config);
    quiet.errors.is_empty() && quiet.document.dump() == parse_document(&soup.0).document.dump()
}

#[quickcheck]
fn prop_error_limit_is_respected(soup: TagSoup, limit: u8) -> bool {
    let limit = usize::from(limit % 8);
    let config = ParserConfig {
        max_errors: Some(limit),
        ..ParserConfig::default()
    };
    let limited = parse_document_with(&soup.0, &config).errors;
    let all = parse_document(&soup.0).errors;
    limited.len() == all.len().min(limit) && all.starts_with(&limited)
}

#[quickcheck]
fn prop_plain_text_round_trips_through_tokenizer(input: String) -> bool {
    let text: String = input
        .chars()
        .filter(|c| !matches!(c, '<' | '&' | '\r' | '\0'))
        .collect();
    let tokens = HTMLTokenizer::new(&text).run();
    let mut data = String::new();
    for token in &tokens {
        match token {
            Token::Character { data: c } => data.push(*c),
            Token::EndOfFile => {}
            _ => return false,
        }
    }
    data == text
}

#[quickcheck]
fn prop_tokenizer_ends_with_single_eof(soup: TagSoup) -> bool {
    let tokens = HTMLTokenizer::new(&soup.0).run();
    tokens.last().is_some_and(Token::is_eof)
        && tokens.iter().filter(|token| token.is_eof()).count() == 1
}
