//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! "Initially, the stack of open elements is empty. The stack grows downwards;
//! the topmost node on the stack is the first one added to the stack, and the
//! bottommost node of the stack is the most recently added node in the stack."
//!
//! In a `Vec` the "bottommost" node is the last entry. Entries keep the tag
//! classification and namespace next to the sink handle, so no query here
//! ever has to ask the sink what an element is.

use bramble_dom::{Attribute, Namespace};

use crate::tag::{TagName, is_special};

/// An element the parser created, as remembered on its stacks.
#[derive(Debug, Clone)]
pub struct OpenElement<H> {
    /// Parser-assigned identity, unique per created element.
    pub id: usize,
    /// The sink's handle for the element.
    pub handle: H,
    /// Classification of the lowercase tag name.
    pub tag: TagName,
    /// The lowercase tag name as it came from the token.
    pub name: String,
    /// The element's namespace.
    pub namespace: Namespace,
    /// [§ 13.2.6.5 HTML integration point](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    pub html_integration_point: bool,
}

impl<H> OpenElement<H> {
    /// Build an entry, working out whether it is an HTML integration point.
    ///
    /// "A node is an HTML integration point if it is one of the following
    /// elements: A MathML annotation-xml element whose start tag token had an
    /// attribute with the name "encoding" whose value was an ASCII
    /// case-insensitive match for the string "text/html"; [or]
    /// "application/xhtml+xml"; An SVG foreignObject element; An SVG desc
    /// element; An SVG title element."
    #[must_use]
    pub fn new(id: usize, handle: H, name: &str, namespace: Namespace, attributes: &[Attribute]) -> Self {
        // SVG names arrive case-adjusted ("foreignObject"); classification is lowercase.
        let tag = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            TagName::from_name(&name.to_ascii_lowercase())
        } else {
            TagName::from_name(name)
        };
        let html_integration_point = match namespace {
            Namespace::MathMl => {
                tag == TagName::AnnotationXml
                    && attributes.iter().any(|attr| {
                        attr.name == "encoding"
                            && (attr.value.eq_ignore_ascii_case("text/html")
                                || attr.value.eq_ignore_ascii_case("application/xhtml+xml"))
                    })
            }
            Namespace::Svg => matches!(tag, TagName::ForeignObject | TagName::Desc | TagName::Title),
            Namespace::Html => false,
        };
        Self {
            id,
            handle,
            tag,
            name: name.to_string(),
            namespace,
            html_integration_point,
        }
    }

    /// An HTML element with the given tag.
    #[must_use]
    pub fn is_html(&self, tag: TagName) -> bool {
        self.namespace == Namespace::Html && self.tag == tag
    }

    /// An HTML element whose tag is one of `tags`.
    #[must_use]
    pub fn is_html_one_of(&self, tags: &[TagName]) -> bool {
        self.namespace == Namespace::Html && tags.contains(&self.tag)
    }

    /// An HTML element named `name`. Works for names without a [`TagName`].
    #[must_use]
    pub fn is_html_named(&self, name: &str) -> bool {
        self.namespace == Namespace::Html && self.name == name
    }

    /// [§ 13.2.4.3 special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    #[must_use]
    pub const fn is_special(&self) -> bool {
        is_special(self.namespace, self.tag)
    }

    /// [§ 13.2.6.5 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    ///
    /// "A MathML mi element, A MathML mo element, A MathML mn element, A
    /// MathML ms element, A MathML mtext element"
    #[must_use]
    pub fn is_mathml_text_integration_point(&self) -> bool {
        self.namespace == Namespace::MathMl
            && matches!(
                self.tag,
                TagName::Mi | TagName::Mo | TagName::Mn | TagName::Ms | TagName::Mtext
            )
    }
}

/// [§ 13.2.4.2 Has an element in scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
///
/// Which list of element types ends the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": default plus `ol`, `ul`.
    ListItem,
    /// "has an element in button scope": default plus `button`.
    Button,
    /// "has an element in table scope": `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": everything except `optgroup` and `option`.
    Select,
}

impl Scope {
    /// Whether `element` is one of the element types that end a search in
    /// this scope.
    fn is_boundary<H>(self, element: &OpenElement<H>) -> bool {
        match self {
            Self::Default => is_default_scope_boundary(element),
            Self::ListItem => {
                is_default_scope_boundary(element) || element.is_html_one_of(&[TagName::Ol, TagName::Ul])
            }
            Self::Button => is_default_scope_boundary(element) || element.is_html(TagName::Button),
            Self::Table => element.is_html_one_of(&[TagName::Html, TagName::Table, TagName::Template]),
            Self::Select => !element.is_html_one_of(&[TagName::Optgroup, TagName::Option]),
        }
    }
}

/// "The stack of open elements is said to have a particular element in scope
/// when it has that element in the specific scope consisting of the following
/// element types: applet, caption, html, table, td, th, marquee, object,
/// template, MathML mi, MathML mo, MathML mn, MathML ms, MathML mtext, MathML
/// annotation-xml, SVG foreignObject, SVG desc, SVG title"
fn is_default_scope_boundary<H>(element: &OpenElement<H>) -> bool {
    match element.namespace {
        Namespace::Html => matches!(
            element.tag,
            TagName::Applet
                | TagName::Caption
                | TagName::Html
                | TagName::Table
                | TagName::Td
                | TagName::Th
                | TagName::Marquee
                | TagName::Object
                | TagName::Template
        ),
        Namespace::MathMl => matches!(
            element.tag,
            TagName::Mi
                | TagName::Mo
                | TagName::Mn
                | TagName::Ms
                | TagName::Mtext
                | TagName::AnnotationXml
        ),
        Namespace::Svg => matches!(element.tag, TagName::ForeignObject | TagName::Desc | TagName::Title),
    }
}

/// The stack of open elements.
#[derive(Debug, Clone)]
pub struct OpenElements<H> {
    elements: Vec<OpenElement<H>>,
    /// Number of HTML `template` elements currently on the stack.
    template_count: usize,
}

impl<H> Default for OpenElements<H> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            template_count: 0,
        }
    }
}

impl<H> OpenElements<H> {
    /// An empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push onto the bottom of the stack; it becomes the current node.
    pub fn push(&mut self, element: OpenElement<H>) {
        if element.is_html(TagName::Template) {
            self.template_count += 1;
        }
        self.elements.push(element);
    }

    /// Pop the current node.
    pub fn pop(&mut self) -> Option<OpenElement<H>> {
        let element = self.elements.pop()?;
        if element.is_html(TagName::Template) {
            self.template_count -= 1;
        }
        Some(element)
    }

    /// "The current node is the bottommost node in this stack of open elements."
    #[must_use]
    pub fn current(&self) -> Option<&OpenElement<H>> {
        self.elements.last()
    }

    /// The current node is an HTML element with this tag.
    #[must_use]
    pub fn current_is(&self, tag: TagName) -> bool {
        self.current().is_some_and(|element| element.is_html(tag))
    }

    /// The current node is an HTML element with one of these tags.
    #[must_use]
    pub fn current_is_one_of(&self, tags: &[TagName]) -> bool {
        self.current().is_some_and(|element| element.is_html_one_of(tags))
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// No entries at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Entry at `index`, counting from the top (the `html` element is 0).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OpenElement<H>> {
        self.elements.get(index)
    }

    /// Entries from top to bottom.
    pub fn iter(&self) -> std::slice::Iter<'_, OpenElement<H>> {
        self.elements.iter()
    }

    /// Number of `template` elements on the stack.
    #[must_use]
    pub const fn template_count(&self) -> usize {
        self.template_count
    }

    /// The element with parser identity `id` is on the stack.
    #[must_use]
    pub fn contains_id(&self, id: usize) -> bool {
        self.position_of_id(id).is_some()
    }

    /// Index of the element with parser identity `id`.
    #[must_use]
    pub fn position_of_id(&self, id: usize) -> Option<usize> {
        self.elements.iter().rposition(|element| element.id == id)
    }

    /// Index of the bottommost HTML element with this tag.
    #[must_use]
    pub fn last_position_of(&self, tag: TagName) -> Option<usize> {
        self.elements.iter().rposition(|element| element.is_html(tag))
    }

    /// Remove the element with identity `id`, wherever it is.
    pub fn remove(&mut self, id: usize) -> Option<OpenElement<H>> {
        let index = self.position_of_id(id)?;
        let element = self.elements.remove(index);
        if element.is_html(TagName::Template) {
            self.template_count -= 1;
        }
        Some(element)
    }

    /// Put `element` in place of the entry with identity `id`.
    pub fn replace(&mut self, id: usize, element: OpenElement<H>) {
        if let Some(index) = self.position_of_id(id) {
            debug_assert!(!self.elements[index].is_html(TagName::Template));
            self.elements[index] = element;
        }
    }

    /// Insert `element` at `index`, shifting the rest down.
    pub fn insert(&mut self, index: usize, element: OpenElement<H>) {
        if element.is_html(TagName::Template) {
            self.template_count += 1;
        }
        self.elements.insert(index, element);
    }

    /// Drop every entry below `len`.
    pub fn truncate(&mut self, len: usize) {
        while self.elements.len() > len {
            let _ = self.pop();
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the
    /// stack). 2. If node is the target node, terminate in a match state.
    /// 3. Otherwise, if node is one of the element types in list, terminate
    /// in a failure state. 4. Otherwise, set node to the previous entry in the
    /// stack of open elements and return to step 2."
    fn has_matching_in_scope(&self, scope: Scope, is_target: impl Fn(&OpenElement<H>) -> bool) -> bool {
        for element in self.elements.iter().rev() {
            if is_target(element) {
                return true;
            }
            if scope.is_boundary(element) {
                return false;
            }
        }
        false
    }

    /// An HTML element with this tag is in `scope`.
    #[must_use]
    pub fn has_in_specific_scope(&self, tag: TagName, scope: Scope) -> bool {
        self.has_matching_in_scope(scope, |element| element.is_html(tag))
    }

    /// "has an element in scope"
    #[must_use]
    pub fn has_in_scope(&self, tag: TagName) -> bool {
        self.has_in_specific_scope(tag, Scope::Default)
    }

    /// "has an element in button scope"
    #[must_use]
    pub fn has_in_button_scope(&self, tag: TagName) -> bool {
        self.has_in_specific_scope(tag, Scope::Button)
    }

    /// "has an element in list item scope"
    #[must_use]
    pub fn has_in_list_item_scope(&self, tag: TagName) -> bool {
        self.has_in_specific_scope(tag, Scope::ListItem)
    }

    /// "has an element in table scope"
    #[must_use]
    pub fn has_in_table_scope(&self, tag: TagName) -> bool {
        self.has_in_specific_scope(tag, Scope::Table)
    }

    /// "has an element in select scope"
    #[must_use]
    pub fn has_in_select_scope(&self, tag: TagName) -> bool {
        self.has_in_specific_scope(tag, Scope::Select)
    }

    /// Any HTML element with one of `tags` is in (default) scope. Used for
    /// the heading elements and for `td`/`th` and the table sections.
    #[must_use]
    pub fn has_any_in_scope(&self, tags: &[TagName], scope: Scope) -> bool {
        self.has_matching_in_scope(scope, |element| element.is_html_one_of(tags))
    }

    /// A particular element node (not just a type) is in default scope.
    #[must_use]
    pub fn has_id_in_scope(&self, id: usize) -> bool {
        self.has_matching_in_scope(Scope::Default, |element| element.id == id)
    }

    /// Pop until an HTML element with this tag has been popped.
    pub fn pop_until(&mut self, tag: TagName) {
        while let Some(element) = self.pop() {
            if element.is_html(tag) {
                break;
            }
        }
    }

    /// Pop until an HTML element with one of `tags` has been popped.
    pub fn pop_until_one_of(&mut self, tags: &[TagName]) {
        while let Some(element) = self.pop() {
            if element.is_html_one_of(tags) {
                break;
            }
        }
    }

    /// Pop until the element with identity `id` has been popped.
    pub fn pop_until_id(&mut self, id: usize) {
        while let Some(element) = self.pop() {
            if element.id == id {
                break;
            }
        }
    }

    /// Pop until the current node is an HTML element with one of `tags`.
    fn pop_until_current_is_one_of(&mut self, tags: &[TagName]) {
        while !self.is_empty() && !self.current_is_one_of(tags) {
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.4.9 Clear the stack back to a table context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "...while the current node is not a table, template, or html element,
    /// pop elements from the stack of open elements."
    pub fn clear_back_to_table_context(&mut self) {
        self.pop_until_current_is_one_of(&[TagName::Table, TagName::Template, TagName::Html]);
    }

    /// [§ 13.2.6.4.13 Clear the stack back to a table body context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "...while the current node is not a tbody, tfoot, thead, template, or
    /// html element, pop elements from the stack of open elements."
    pub fn clear_back_to_table_body_context(&mut self) {
        self.pop_until_current_is_one_of(&[
            TagName::Tbody,
            TagName::Tfoot,
            TagName::Thead,
            TagName::Template,
            TagName::Html,
        ]);
    }

    /// [§ 13.2.6.4.14 Clear the stack back to a table row context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "...while the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub fn clear_back_to_table_row_context(&mut self) {
        self.pop_until_current_is_one_of(&[TagName::Tr, TagName::Template, TagName::Html]);
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "...while the current node is a dd element, a dt element, an li
    /// element, an optgroup element, an option element, a p element, an rb
    /// element, an rp element, an rt element, or an rtc element, the UA must
    /// pop the current node off the stack of open elements."
    ///
    /// "If a step requires the UA to generate implied end tags but lists an
    /// element to exclude from the process, then the UA must perform the above
    /// steps as if that element was not in the above list."
    pub fn generate_implied_end_tags(&mut self, except: Option<TagName>) {
        while let Some(current) = self.current() {
            let implied = current.namespace == Namespace::Html
                && current.tag.has_implied_end_tag()
                && Some(current.tag) != except;
            if !implied {
                break;
            }
            let _ = self.pop();
        }
    }

    /// "...while the current node is a caption element, a colgroup element, a
    /// dd element, a dt element, an li element, an optgroup element, an option
    /// element, a p element, an rb element, an rp element, an rt element, an
    /// rtc element, a tbody element, a td element, a tfoot element, a th
    /// element, a thead element, or a tr element, the UA must pop the current
    /// node off the stack of open elements."
    pub fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while let Some(current) = self.current() {
            if !(current.namespace == Namespace::Html && current.tag.has_thorough_implied_end_tag()) {
                break;
            }
            let _ = self.pop();
        }
    }
}
