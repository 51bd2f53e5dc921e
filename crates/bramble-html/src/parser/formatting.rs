//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
//!
//! "Initially, the list of active formatting elements is empty. It is used to
//! handle mis-nested formatting element tags."

use bramble_dom::Attribute;

use super::open_elements::OpenElement;
use crate::tokenizer::Token;

/// One entry in the list.
#[derive(Debug, Clone)]
pub enum FormattingEntry<H> {
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element." Pushed for applet, object, marquee,
    /// template, td, th and caption.
    Marker,
    /// A formatting element and the token it was created for, which is kept
    /// so the element can be recreated.
    Element {
        /// The element as it sits on the stack of open elements.
        element: OpenElement<H>,
        /// The start tag the element was created for.
        token: Token,
    },
}

impl<H> FormattingEntry<H> {
    /// The element of a non-marker entry.
    #[must_use]
    pub const fn element(&self) -> Option<&OpenElement<H>> {
        match self {
            Self::Element { element, .. } => Some(element),
            Self::Marker => None,
        }
    }

    /// Whether this is a marker.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }
}

/// The list of active formatting elements.
#[derive(Debug, Clone)]
pub struct ActiveFormattingList<H> {
    entries: Vec<FormattingEntry<H>>,
}

impl<H> Default for ActiveFormattingList<H> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<H> ActiveFormattingList<H> {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, markers included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FormattingEntry<H>> {
        self.entries.get(index)
    }

    /// Index just past the last marker, or 0 when there is none.
    fn after_last_marker(&self) -> usize {
        self.entries
            .iter()
            .rposition(FormattingEntry::is_marker)
            .map_or(0, |index| index + 1)
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub fn push(&mut self, element: OpenElement<H>, token: Token) {
        // STEP 1: "If there are already three elements in the list of active
        //          formatting elements after the last marker, if any, or
        //          anywhere in the list if there are no markers, that have the
        //          same tag name, namespace, and attributes as element, then
        //          remove the earliest such element from the list of active
        //          formatting elements."
        let start = self.after_last_marker();
        let matching: Vec<usize> = self.entries[start..]
            .iter()
            .enumerate()
            .filter_map(|(offset, entry)| match entry {
                FormattingEntry::Element {
                    element: existing,
                    token: existing_token,
                } if existing.name == element.name
                    && existing.namespace == element.namespace
                    && same_attributes(existing_token, &token) =>
                {
                    Some(start + offset)
                }
                _ => None,
            })
            .collect();
        if matching.len() >= 3 {
            log::trace!(target: "bramble::tree_builder", "noah's ark drops an earlier <{}>", element.name);
            let _ = self.entries.remove(matching[0]);
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.entries.push(FormattingEntry::Element { element, token });
    }

    /// Insert a marker at the end of the list.
    pub fn push_marker(&mut self) {
        self.entries.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list of
    /// active formatting elements. 2. Remove entry from the list of active
    /// formatting elements. 3. If entry was a marker, then stop the algorithm
    /// at this point. 4. Go to step 1."
    pub fn clear_to_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    /// Index of the last element named `name` between the end of the list
    /// and the last marker.
    #[must_use]
    pub fn find_after_last_marker(&self, name: &str) -> Option<usize> {
        for (index, entry) in self.entries.iter().enumerate().rev() {
            match entry {
                FormattingEntry::Marker => return None,
                FormattingEntry::Element { element, .. } if element.name == name => {
                    return Some(index);
                }
                FormattingEntry::Element { .. } => {}
            }
        }
        None
    }

    /// Index of the entry for the element with identity `id`.
    #[must_use]
    pub fn position_of_id(&self, id: usize) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.element().is_some_and(|element| element.id == id))
    }

    /// The element with identity `id` has an entry.
    #[must_use]
    pub fn contains_id(&self, id: usize) -> bool {
        self.position_of_id(id).is_some()
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> FormattingEntry<H> {
        self.entries.remove(index)
    }

    /// Remove the entry for the element with identity `id`, if any.
    pub fn remove_id(&mut self, id: usize) {
        if let Some(index) = self.position_of_id(id) {
            let _ = self.entries.remove(index);
        }
    }

    /// Replace the element of the entry at `index`, keeping its token.
    pub fn replace_element(&mut self, index: usize, element: OpenElement<H>) {
        if let Some(FormattingEntry::Element { element: slot, .. }) = self.entries.get_mut(index) {
            *slot = element;
        }
    }

    /// Insert `entry` at the position a bookmark points to.
    pub fn insert_at_bookmark(&mut self, entry: FormattingEntry<H>, bookmark: usize) {
        let index = bookmark.min(self.entries.len());
        self.entries.insert(index, entry);
    }
}

/// "two elements have the same attributes if all their parsed attributes can
/// be paired such that the two attributes in each pair have identical names,
/// namespaces, and values (the order of the attributes does not matter)."
fn same_attributes(a: &Token, b: &Token) -> bool {
    let (Token::StartTag { attributes: left, .. }, Token::StartTag { attributes: right, .. }) = (a, b)
    else {
        return false;
    };
    left.len() == right.len() && left.iter().all(|attr| contains_attribute(right, attr))
}

fn contains_attribute(list: &[Attribute], attr: &Attribute) -> bool {
    list.iter()
        .any(|candidate| candidate.name == attr.name && candidate.value == attr.value)
}
