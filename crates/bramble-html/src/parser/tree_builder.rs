//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree builder consumes one token at a time. Every insertion mode has
//! its own module holding an `impl` block on [`TreeBuilder`]; this module
//! owns the shared state and the algorithms all the modes lean on.

use bramble_dom::{Attribute, Namespace, QuirksMode, TreeSink};
use strum_macros::Display;

use super::formatting::{ActiveFormattingList, FormattingEntry};
use super::open_elements::{OpenElement, OpenElements};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::{Token, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// What a mode handler wants done with the token it was given.
///
/// "Reprocess the token" never recurses: the handler hands the token back
/// and [`TreeBuilder::process_token`] runs it through the dispatcher again,
/// in whatever insertion mode is current by then.
#[derive(Debug)]
pub enum Step {
    /// The token has been fully handled.
    Done,
    /// Run the token through the dispatcher again.
    Reprocess(Token),
}

/// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
#[derive(Debug, Clone)]
pub(super) enum InsertionPoint<H> {
    /// "inside target, after its last child (if any)"
    LastChildOf(H),
    /// "inside parent, immediately before sibling"
    Before {
        /// The node that gains a child.
        parent: H,
        /// The child the new node goes in front of.
        sibling: H,
    },
}

/// Elements whose "foster parenting" redirect applies when they are the
/// insertion target.
const FOSTER_TARGETS: &[TagName] = &[
    TagName::Table,
    TagName::Tbody,
    TagName::Tfoot,
    TagName::Thead,
    TagName::Tr,
];

/// The tree construction stage.
///
/// Owns its sink for the duration of the parse. Everything it builds goes
/// through [`TreeSink`] calls, and everything it remembers about those nodes
/// lives in [`OpenElement`] records on its two stacks.
#[allow(clippy::struct_excessive_bools)]
pub struct TreeBuilder<S: TreeSink> {
    pub(super) sink: S,
    pub(super) mode: InsertionMode,
    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    pub(super) original_mode: InsertionMode,
    /// [§ 13.2.4.1 Stack of template insertion modes](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_modes: Vec<InsertionMode>,
    pub(super) open_elements: OpenElements<S::Handle>,
    pub(super) active_formatting: ActiveFormattingList<S::Handle>,
    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#head-element-pointer)
    pub(super) head_element: Option<OpenElement<S::Handle>>,
    /// [§ 13.2.4.4](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    pub(super) form_element: Option<OpenElement<S::Handle>>,
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    pub(super) frameset_ok: bool,
    pub(super) scripting: bool,
    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,
    pub(super) quirks_mode: QuirksMode,
    /// "pending table character tokens"
    pub(super) pending_table_text: String,
    /// Drop the next token if it is a line feed (after `<pre>`, `<listing>`,
    /// `<textarea>`).
    pub(super) ignore_lf: bool,
    /// Whether the start tag being processed had its self-closing flag
    /// acknowledged.
    pub(super) self_closing_acknowledged: bool,
    /// A tokenizer state switch the driver must apply before the next pull.
    pub(super) tokenizer_state: Option<TokenizerState>,
    /// The last `script` element whose end tag was seen.
    pub(super) pending_script: Option<S::Handle>,
    pub(super) errors: Vec<ParseErrorCode>,
    next_id: usize,
}

impl<S: TreeSink> TreeBuilder<S> {
    /// A tree builder in the "initial" insertion mode.
    pub fn new(sink: S, scripting: bool) -> Self {
        Self {
            sink,
            mode: InsertionMode::Initial,
            original_mode: InsertionMode::Initial,
            template_modes: Vec::new(),
            open_elements: OpenElements::new(),
            active_formatting: ActiveFormattingList::new(),
            head_element: None,
            form_element: None,
            frameset_ok: true,
            scripting,
            foster_parenting: false,
            quirks_mode: QuirksMode::NoQuirks,
            pending_table_text: String::new(),
            ignore_lf: false,
            self_closing_acknowledged: false,
            tokenizer_state: None,
            pending_script: None,
            errors: Vec::new(),
            next_id: 0,
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.mode
    }

    /// The document mode decided in the "initial" insertion mode.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// The sink being built into.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give up the builder and keep the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Take the tree construction errors reported since the last call.
    pub fn take_errors(&mut self) -> Vec<ParseErrorCode> {
        std::mem::take(&mut self.errors)
    }

    /// Take the tokenizer state switch requested by the last token, if any.
    pub const fn take_tokenizer_state(&mut self) -> Option<TokenizerState> {
        self.tokenizer_state.take()
    }

    /// Take the script element most recently closed by `</script>`.
    pub fn take_pending_script(&mut self) -> Option<S::Handle> {
        self.pending_script.take()
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace", CDATA sections are recognized.
    #[must_use]
    pub fn adjusted_current_node_is_foreign(&self) -> bool {
        self.open_elements
            .current()
            .is_some_and(|node| node.namespace != Namespace::Html)
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Handle one token, including every reprocessing it triggers.
    pub fn process_token(&mut self, token: Token) {
        if self.ignore_lf {
            self.ignore_lf = false;
            if matches!(token, Token::Character { data: '\n' }) {
                return;
            }
        }

        let self_closing = matches!(token, Token::StartTag { self_closing: true, .. });
        self.self_closing_acknowledged = false;

        let mut token = token;
        loop {
            log::trace!(target: "bramble::tree_builder", "{} in {}", token, self.mode);
            let step = if self.uses_html_rules(&token) {
                self.process_using_rules_for(self.mode, token)
            } else {
                self.in_foreign_content(token)
            };
            match step {
                Step::Done => break,
                Step::Reprocess(next) => token = next,
            }
        }

        // "When a start tag token is emitted with its self-closing flag set, if
        // the flag is not acknowledged when the token is processed by the tree
        // construction stage, that is a parse error."
        if self_closing && !self.self_closing_acknowledged {
            self.error(ParseErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus);
        }
    }

    /// Whether the token goes to the current insertion mode rather than the
    /// rules for foreign content.
    fn uses_html_rules(&self, token: &Token) -> bool {
        let Some(node) = self.open_elements.current() else {
            return true;
        };
        if node.namespace == Namespace::Html {
            return true;
        }
        let start_tag = match token {
            Token::StartTag { tag, .. } => Some(*tag),
            _ => None,
        };
        let is_character = matches!(token, Token::Character { .. });

        if node.is_mathml_text_integration_point() {
            if start_tag.is_some_and(|tag| !matches!(tag, TagName::Mglyph | TagName::Malignmark)) {
                return true;
            }
            if is_character {
                return true;
            }
        }
        if node.namespace == Namespace::MathMl
            && node.tag == TagName::AnnotationXml
            && start_tag == Some(TagName::Svg)
        {
            return true;
        }
        if node.html_integration_point && (start_tag.is_some() || is_character) {
            return true;
        }
        token.is_eof()
    }

    /// "Process the token using the rules for" a given insertion mode.
    pub(super) fn process_using_rules_for(&mut self, mode: InsertionMode, token: Token) -> Step {
        match mode {
            InsertionMode::Initial => self.initial(token),
            InsertionMode::BeforeHtml => self.before_html(token),
            InsertionMode::BeforeHead => self.before_head(token),
            InsertionMode::InHead => self.in_head(token),
            InsertionMode::InHeadNoscript => self.in_head_noscript(token),
            InsertionMode::AfterHead => self.after_head(token),
            InsertionMode::InBody => self.in_body(token),
            InsertionMode::Text => self.text(token),
            InsertionMode::InTable => self.in_table(token),
            InsertionMode::InTableText => self.in_table_text(token),
            InsertionMode::InCaption => self.in_caption(token),
            InsertionMode::InColumnGroup => self.in_column_group(token),
            InsertionMode::InTableBody => self.in_table_body(token),
            InsertionMode::InRow => self.in_row(token),
            InsertionMode::InCell => self.in_cell(token),
            InsertionMode::InSelect => self.in_select(token),
            InsertionMode::InSelectInTable => self.in_select_in_table(token),
            InsertionMode::InTemplate => self.in_template(token),
            InsertionMode::AfterBody => self.after_body(token),
            InsertionMode::InFrameset => self.in_frameset(token),
            InsertionMode::AfterFrameset => self.after_frameset(token),
            InsertionMode::AfterAfterBody => self.after_after_body(token),
            InsertionMode::AfterAfterFrameset => self.after_after_frameset(token),
        }
    }

    pub(super) fn error(&mut self, code: ParseErrorCode) {
        log::debug!(target: "bramble::tree_builder", "parse error {code} in {}", self.mode);
        self.errors.push(code);
    }

    pub(super) fn switch_to(&mut self, mode: InsertionMode) {
        if mode != self.mode {
            log::debug!(target: "bramble::tree_builder", "insertion mode {} -> {mode}", self.mode);
        }
        self.mode = mode;
    }

    /// "Acknowledge the token's self-closing flag"
    pub(super) const fn acknowledge_self_closing(&mut self) {
        self.self_closing_acknowledged = true;
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    pub(super) fn create_element(
        &mut self,
        name: &str,
        namespace: Namespace,
        attributes: &[Attribute],
    ) -> OpenElement<S::Handle> {
        let handle = self.sink.create_element(name, namespace, attributes.to_vec());
        let id = self.next_id;
        self.next_id += 1;
        OpenElement::new(id, handle, name, namespace, attributes)
    }

    /// The node new children of `handle` actually go into: the template
    /// contents for an HTML `template`, the element itself otherwise.
    fn content_target(&mut self, handle: S::Handle, is_template: bool) -> S::Handle {
        if is_template {
            self.sink.template_content(&handle)
        } else {
            handle
        }
    }

    /// [§ 13.2.6.1 Appropriate place for inserting a node](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    pub(super) fn appropriate_place(
        &mut self,
        override_target: Option<&OpenElement<S::Handle>>,
    ) -> InsertionPoint<S::Handle> {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the
        //          current node."
        let Some((handle, is_template, redirect)) = override_target
            .or_else(|| self.open_elements.current())
            .map(|target| {
                (
                    target.handle.clone(),
                    target.is_html(TagName::Template),
                    self.foster_parenting && target.is_html_one_of(FOSTER_TARGETS),
                )
            })
        else {
            return InsertionPoint::LastChildOf(self.sink.document());
        };

        // STEP 2: "If foster parenting is enabled and target is a table,
        //          tbody, tfoot, thead, or tr element"
        if redirect {
            return self.foster_parent_place();
        }

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents"
        InsertionPoint::LastChildOf(self.content_target(handle, is_template))
    }

    fn foster_parent_place(&mut self) -> InsertionPoint<S::Handle> {
        // STEP 2.1: "Let last template be the last template element in the
        //            stack of open elements, if any."
        let last_template = self.open_elements.last_position_of(TagName::Template);
        // STEP 2.2: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_table = self.open_elements.last_position_of(TagName::Table);

        // STEP 2.3: "If there is a last template and either there is no last
        //            table, or there is one, but last template is lower (more
        //            recently added) than last table in the stack of open
        //            elements, then: let adjusted insertion location be inside
        //            last template's template contents"
        if let Some(template) = last_template
            && last_table.is_none_or(|table| template > table)
            && let Some(handle) = self.open_elements.get(template).map(|e| e.handle.clone())
        {
            return InsertionPoint::LastChildOf(self.sink.template_content(&handle));
        }

        // STEP 2.4: "If there is no last table, then let adjusted insertion
        //            location be inside the first element in the stack of open
        //            elements (the html element)" (fragment case)
        let Some(table_index) = last_table else {
            return match self.open_elements.get(0) {
                Some(html) => InsertionPoint::LastChildOf(html.handle.clone()),
                None => InsertionPoint::LastChildOf(self.sink.document()),
            };
        };

        // STEP 2.5: "If last table has a parent node, then let adjusted
        //            insertion location be inside last table's parent node,
        //            immediately before last table"
        if let Some(table) = self.open_elements.get(table_index).map(|e| e.handle.clone())
            && let Some(parent) = self.sink.parent(&table)
        {
            return InsertionPoint::Before {
                parent,
                sibling: table,
            };
        }

        // STEP 2.6-2.7: "Let previous element be the element immediately above
        //                last table in the stack of open elements. Let adjusted
        //                insertion location be inside previous element, after
        //                its last child (if any)."
        let previous = table_index
            .checked_sub(1)
            .and_then(|index| self.open_elements.get(index))
            .map(|e| (e.handle.clone(), e.is_html(TagName::Template)));
        match previous {
            Some((handle, is_template)) => {
                InsertionPoint::LastChildOf(self.content_target(handle, is_template))
            }
            None => InsertionPoint::LastChildOf(self.sink.document()),
        }
    }

    pub(super) fn insert_at(&mut self, place: InsertionPoint<S::Handle>, node: &S::Handle) {
        match place {
            InsertionPoint::LastChildOf(parent) => self.sink.append_child(&parent, node),
            InsertionPoint::Before { parent, sibling } => {
                self.sink.insert_before(&parent, node, &sibling);
            }
        }
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// Create the element, put it at the appropriate place and push it onto
    /// the stack of open elements. Returns the new stack entry.
    pub(super) fn insert_element(
        &mut self,
        name: &str,
        namespace: Namespace,
        attributes: &[Attribute],
    ) -> OpenElement<S::Handle> {
        let place = self.appropriate_place(None);
        let element = self.create_element(name, namespace, attributes);
        self.insert_at(place, &element.handle);
        self.open_elements.push(element.clone());
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    pub(super) fn insert_html_element(
        &mut self,
        name: &str,
        attributes: &[Attribute],
    ) -> OpenElement<S::Handle> {
        self.insert_element(name, Namespace::Html, attributes)
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_text(&mut self, text: &str) {
        match self.appropriate_place(None) {
            InsertionPoint::LastChildOf(parent) => {
                // "If the adjusted insertion location's node is a Document
                // node, then return."
                if self.sink.same_node(&parent, &self.sink.document()) {
                    return;
                }
                self.sink.append_text(&parent, text);
            }
            InsertionPoint::Before { parent, sibling } => {
                self.sink.insert_text_before(&parent, text, &sibling);
            }
        }
    }

    pub(super) fn insert_character(&mut self, c: char) {
        let mut buffer = [0; 4];
        self.insert_text(c.encode_utf8(&mut buffer));
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let place = self.appropriate_place(None);
        let comment = self.sink.create_comment_node(data);
        self.insert_at(place, &comment);
    }

    /// Insert a comment as the last child of `parent`.
    pub(super) fn append_comment_to(&mut self, parent: &S::Handle, data: &str) {
        let comment = self.sink.create_comment_node(data);
        self.sink.append_child(parent, &comment);
    }

    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<&OpenElement<S::Handle>> {
        self.open_elements.current()
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct"
        if self.active_formatting.is_empty() {
            return;
        }
        let last = self.active_formatting.len() - 1;

        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there
        //          is nothing to reconstruct"
        if self.is_marker_or_open(last) {
            return;
        }

        // STEP 3-6 (Rewind): walk back to the entry after the last marker or
        //                    open element.
        let mut index = last;
        while index > 0 {
            index -= 1;
            if self.is_marker_or_open(index) {
                index += 1;
                break;
            }
        }

        // STEP 7-10 (Advance, Create): "Insert an HTML element for the token
        //          for which the element entry was created, to obtain new
        //          element. Replace the entry for entry in the list with an
        //          entry for new element."
        for position in index..self.active_formatting.len() {
            let Some(FormattingEntry::Element {
                token: Token::StartTag {
                    name, attributes, ..
                },
                ..
            }) = self.active_formatting.get(position).cloned()
            else {
                continue;
            };
            let element = self.insert_html_element(&name, &attributes);
            self.active_formatting.replace_element(position, element);
        }
    }

    fn is_marker_or_open(&self, index: usize) -> bool {
        match self.active_formatting.get(index) {
            Some(FormattingEntry::Element { element, .. }) => {
                self.open_elements.contains_id(element.id)
            }
            Some(FormattingEntry::Marker) | None => true,
        }
    }

    /// [§ 13.2.6.4.7 Close a p element](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    pub(super) fn close_p_element(&mut self) {
        // "Generate implied end tags, except for p elements."
        self.open_elements.generate_implied_end_tags(Some(TagName::P));
        // "If the current node is not a p element, then this is a parse error."
        if !self.open_elements.current_is(TagName::P) {
            self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // "Pop elements from the stack of open elements until a p element has
        // been popped from the stack."
        self.open_elements.pop_until(TagName::P);
    }

    /// Close a `p` element if one is in button scope. Most block-level start
    /// tags in body begin with this.
    pub(super) fn close_p_if_in_button_scope(&mut self) {
        if self.open_elements.has_in_button_scope(TagName::P) {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// "The generic raw text element parsing algorithm and the generic RCDATA
    /// element parsing algorithm consist of the following steps."
    pub(super) fn parse_text_only_element(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        state: TokenizerState,
    ) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(name, attributes);
        // STEP 2: "switch the tokenizer to the RAWTEXT state" / "RCDATA state"
        self.tokenizer_state = Some(state);
        // STEP 3: "Let the original insertion mode be the current insertion mode."
        self.original_mode = self.mode;
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.switch_to(InsertionMode::Text);
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        let mode = self.appropriate_insertion_mode();
        self.switch_to(mode);
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        // STEP 1-3: walk from the current node up, "last" being the html element.
        for (index, node) in self.open_elements.iter().enumerate().rev() {
            let last = index == 0;
            if node.namespace != Namespace::Html {
                if last {
                    return InsertionMode::InBody;
                }
                continue;
            }
            match node.tag {
                // STEP 4: "If node is a select element"
                TagName::Select => {
                    if !last {
                        for ancestor in self.open_elements.iter().take(index).rev() {
                            if ancestor.is_html(TagName::Template) {
                                break;
                            }
                            if ancestor.is_html(TagName::Table) {
                                return InsertionMode::InSelectInTable;
                            }
                        }
                    }
                    return InsertionMode::InSelect;
                }
                TagName::Td | TagName::Th if !last => return InsertionMode::InCell,
                TagName::Tr => return InsertionMode::InRow,
                TagName::Tbody | TagName::Thead | TagName::Tfoot => {
                    return InsertionMode::InTableBody;
                }
                TagName::Caption => return InsertionMode::InCaption,
                TagName::Colgroup => return InsertionMode::InColumnGroup,
                TagName::Table => return InsertionMode::InTable,
                // STEP 12: "If node is a template element, then switch the
                //           insertion mode to the current template insertion mode"
                TagName::Template => {
                    return self
                        .template_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate);
                }
                TagName::Head if !last => return InsertionMode::InHead,
                TagName::Body => return InsertionMode::InBody,
                TagName::Frameset => return InsertionMode::InFrameset,
                // STEP 16: "If node is an html element"
                TagName::Html => {
                    return if self.head_element.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ => {}
            }
            // STEP 17: "If last is true, then switch the insertion mode to "in body""
            if last {
                return InsertionMode::InBody;
            }
        }
        InsertionMode::InBody
    }

    /// [§ 13.2.6.5 Stop parsing](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(super) fn stop_parsing(&mut self) {
        log::debug!(target: "bramble::tree_builder", "stop parsing");
        self.open_elements.truncate(0);
    }

    /// Report `open-elements-left-after-eof` unless every open element is one
    /// the standard allows to remain open at end of file.
    ///
    /// "If there is a node in the stack of open elements that is not either a
    /// dd element, a dt element, an li element, an optgroup element, an option
    /// element, a p element, an rb element, an rp element, an rt element, an
    /// rtc element, a tbody element, a td element, a tfoot element, a th
    /// element, a thead element, a tr element, the body element, or the html
    /// element, then this is a parse error."
    pub(super) fn check_open_elements_at_eof(&mut self) {
        let stray = self.open_elements.iter().any(|element| {
            !element.is_html_one_of(&[
                TagName::Dd,
                TagName::Dt,
                TagName::Li,
                TagName::Optgroup,
                TagName::Option,
                TagName::P,
                TagName::Rb,
                TagName::Rp,
                TagName::Rt,
                TagName::Rtc,
                TagName::Tbody,
                TagName::Td,
                TagName::Tfoot,
                TagName::Th,
                TagName::Thead,
                TagName::Tr,
                TagName::Body,
                TagName::Html,
            ])
        });
        if stray {
            self.error(ParseErrorCode::OpenElementsLeftAfterEof);
        }
    }
}
