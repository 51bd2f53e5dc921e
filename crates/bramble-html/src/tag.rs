//! Tag names the tree builder branches on.
//!
//! The tokenizer lowercases every tag name, so classification is an exact
//! match against the lowercase spelling. Anything the parser has no special
//! rule for becomes [`TagName::Unknown`] and takes the "any other start/end
//! tag" branches.

use bramble_dom::Namespace;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Closed set of tag names with parser-specific behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum TagName {
    A,
    Address,
    #[strum(serialize = "annotation-xml")]
    AnnotationXml,
    Applet,
    Area,
    Article,
    Aside,
    B,
    Base,
    Basefont,
    Bgsound,
    Big,
    Blockquote,
    Body,
    Br,
    Button,
    Caption,
    Center,
    Code,
    Col,
    Colgroup,
    Dd,
    Desc,
    Details,
    Dialog,
    Dir,
    Div,
    Dl,
    Dt,
    Em,
    Embed,
    Fieldset,
    Figcaption,
    Figure,
    Font,
    Footer,
    ForeignObject,
    Form,
    Frame,
    Frameset,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Head,
    Header,
    Hgroup,
    Hr,
    Html,
    I,
    Iframe,
    Image,
    Img,
    Input,
    Keygen,
    Li,
    Link,
    Listing,
    Main,
    Malignmark,
    Marquee,
    Math,
    Menu,
    Meta,
    Mglyph,
    Mi,
    Mn,
    Mo,
    Ms,
    Mtext,
    Nav,
    Nobr,
    Noembed,
    Noframes,
    Noscript,
    Object,
    Ol,
    Optgroup,
    Option,
    P,
    Param,
    Plaintext,
    Pre,
    Rb,
    Rp,
    Rt,
    Rtc,
    Ruby,
    S,
    Script,
    Search,
    Section,
    Select,
    Small,
    Source,
    Span,
    Strike,
    Strong,
    Style,
    Sub,
    Summary,
    Sup,
    Svg,
    Table,
    Tbody,
    Td,
    Template,
    Textarea,
    Tfoot,
    Th,
    Thead,
    Title,
    Tr,
    Track,
    Tt,
    U,
    Ul,
    Var,
    Wbr,
    Xmp,
    /// Any tag name without a dedicated rule.
    Unknown,
}

impl TagName {
    /// Classify a (lowercased) tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Unknown)
    }

    /// The lowercase spelling of a known tag name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
    ///
    /// "The following elements are in the formatting category: a, b, big, code,
    /// em, font, i, nobr, s, small, strike, strong, tt, and u."
    #[must_use]
    pub const fn is_formatting(self) -> bool {
        matches!(
            self,
            Self::A
                | Self::B
                | Self::Big
                | Self::Code
                | Self::Em
                | Self::Font
                | Self::I
                | Self::Nobr
                | Self::S
                | Self::Small
                | Self::Strike
                | Self::Strong
                | Self::Tt
                | Self::U
        )
    }

    /// `h1` through `h6`.
    #[must_use]
    pub const fn is_heading(self) -> bool {
        matches!(
            self,
            Self::H1 | Self::H2 | Self::H3 | Self::H4 | Self::H5 | Self::H6
        )
    }

    /// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "...while the current node is a dd element, a dt element, an li
    /// element, an optgroup element, an option element, a p element, an rb
    /// element, an rp element, an rt element, or an rtc element..."
    #[must_use]
    pub const fn has_implied_end_tag(self) -> bool {
        matches!(
            self,
            Self::Dd
                | Self::Dt
                | Self::Li
                | Self::Optgroup
                | Self::Option
                | Self::P
                | Self::Rb
                | Self::Rp
                | Self::Rt
                | Self::Rtc
        )
    }

    /// "Generate all implied end tags thoroughly" adds the table parts.
    #[must_use]
    pub const fn has_thorough_implied_end_tag(self) -> bool {
        self.has_implied_end_tag()
            || matches!(
                self,
                Self::Caption
                    | Self::Colgroup
                    | Self::Tbody
                    | Self::Td
                    | Self::Tfoot
                    | Self::Th
                    | Self::Thead
                    | Self::Tr
            )
    }

    /// Start tags that break out of SVG/MathML content back into HTML.
    ///
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    #[must_use]
    pub const fn breaks_out_of_foreign_content(self) -> bool {
        self.is_heading()
            || matches!(
                self,
                Self::B
                    | Self::Big
                    | Self::Blockquote
                    | Self::Body
                    | Self::Br
                    | Self::Center
                    | Self::Code
                    | Self::Dd
                    | Self::Div
                    | Self::Dl
                    | Self::Dt
                    | Self::Em
                    | Self::Embed
                    | Self::Head
                    | Self::Hr
                    | Self::I
                    | Self::Img
                    | Self::Li
                    | Self::Listing
                    | Self::Menu
                    | Self::Meta
                    | Self::Nobr
                    | Self::Ol
                    | Self::P
                    | Self::Pre
                    | Self::Ruby
                    | Self::S
                    | Self::Small
                    | Self::Span
                    | Self::Strong
                    | Self::Strike
                    | Self::Sub
                    | Self::Sup
                    | Self::Table
                    | Self::Tt
                    | Self::U
                    | Self::Ul
                    | Self::Var
            )
    }
}

/// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules..."
#[must_use]
pub const fn is_special(namespace: Namespace, tag: TagName) -> bool {
    match namespace {
        Namespace::Html => matches!(
            tag,
            TagName::Address
                | TagName::Applet
                | TagName::Area
                | TagName::Article
                | TagName::Aside
                | TagName::Base
                | TagName::Basefont
                | TagName::Bgsound
                | TagName::Blockquote
                | TagName::Body
                | TagName::Br
                | TagName::Button
                | TagName::Caption
                | TagName::Center
                | TagName::Col
                | TagName::Colgroup
                | TagName::Dd
                | TagName::Details
                | TagName::Dir
                | TagName::Div
                | TagName::Dl
                | TagName::Dt
                | TagName::Embed
                | TagName::Fieldset
                | TagName::Figcaption
                | TagName::Figure
                | TagName::Footer
                | TagName::Form
                | TagName::Frame
                | TagName::Frameset
                | TagName::H1
                | TagName::H2
                | TagName::H3
                | TagName::H4
                | TagName::H5
                | TagName::H6
                | TagName::Head
                | TagName::Header
                | TagName::Hgroup
                | TagName::Hr
                | TagName::Html
                | TagName::Iframe
                | TagName::Img
                | TagName::Input
                | TagName::Keygen
                | TagName::Li
                | TagName::Link
                | TagName::Listing
                | TagName::Main
                | TagName::Marquee
                | TagName::Menu
                | TagName::Meta
                | TagName::Nav
                | TagName::Noembed
                | TagName::Noframes
                | TagName::Noscript
                | TagName::Object
                | TagName::Ol
                | TagName::P
                | TagName::Param
                | TagName::Plaintext
                | TagName::Pre
                | TagName::Script
                | TagName::Search
                | TagName::Section
                | TagName::Select
                | TagName::Source
                | TagName::Style
                | TagName::Summary
                | TagName::Table
                | TagName::Tbody
                | TagName::Td
                | TagName::Template
                | TagName::Textarea
                | TagName::Tfoot
                | TagName::Th
                | TagName::Thead
                | TagName::Title
                | TagName::Tr
                | TagName::Track
                | TagName::Ul
                | TagName::Wbr
                | TagName::Xmp
        ),
        Namespace::MathMl => matches!(
            tag,
            TagName::Mi
                | TagName::Mo
                | TagName::Mn
                | TagName::Ms
                | TagName::Mtext
                | TagName::AnnotationXml
        ),
        Namespace::Svg => matches!(tag, TagName::ForeignObject | TagName::Desc | TagName::Title),
    }
}
