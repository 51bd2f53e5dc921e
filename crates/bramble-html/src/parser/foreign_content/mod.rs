//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
//!
//! Tokens reach these rules while the current node is an SVG or MathML
//! element that is not an integration point for the token.

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use bramble_dom::{Namespace, TreeSink};

use super::tree_builder::{Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn in_foreign_content(&mut self, token: Token) -> Step {
        match token {
            Token::Character { data: '\0' } => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                self.insert_character('\u{FFFD}');
                Step::Done
            }
            Token::Character { data } => {
                self.insert_character(data);
                if !matches!(data, '\t' | '\n' | '\x0C' | '\r' | ' ') {
                    self.frameset_ok = false;
                }
                Step::Done
            }
            Token::Comment { data } => {
                self.insert_comment(&data);
                Step::Done
            }
            Token::Doctype { .. } => {
                self.error(ParseErrorCode::MisplacedDoctype);
                Step::Done
            }

            // "A start tag whose tag name is one of: "b", "big", ... A start
            // tag whose tag name is "font", if the token has any attributes
            // named "color", "face", or "size". An end tag whose tag name is
            // "br", "p": Parse error. While the current node is not a MathML
            // text integration point, an HTML integration point, or an element
            // in the HTML namespace, pop elements from the stack of open
            // elements. Reprocess the token according to the rules given in the
            // section corresponding to the current insertion mode in HTML
            // content."
            Token::StartTag {
                tag,
                ref attributes,
                ..
            } if tag.breaks_out_of_foreign_content()
                || (tag == TagName::Font
                    && attributes
                        .iter()
                        .any(|attr| matches!(attr.name.as_str(), "color" | "face" | "size"))) =>
            {
                self.break_out_of_foreign_content(ParseErrorCode::UnexpectedStartTag);
                self.process_using_rules_for(self.mode, token)
            }
            Token::EndTag {
                tag: TagName::Br | TagName::P,
                ..
            } => {
                self.break_out_of_foreign_content(ParseErrorCode::UnexpectedEndTag);
                // The loop can stop on an integration point, which is still
                // foreign; going back through dispatch would land here again.
                self.process_using_rules_for(self.mode, token)
            }

            Token::StartTag {
                ref name,
                ref attributes,
                self_closing,
                ..
            } => {
                let Some(namespace) = self.current_node().map(|node| node.namespace) else {
                    return Step::Done;
                };
                let mut attributes = attributes.clone();
                let mut name = name.as_str();
                // "If the adjusted current node is an element in the MathML
                // namespace, adjust MathML attributes for the token."
                if namespace == Namespace::MathMl {
                    adjust_mathml_attributes(&mut attributes);
                }
                // "If the adjusted current node is an element in the SVG
                // namespace, and the token's tag name is one of the ones in the
                // first column of the following table, change the tag name to
                // the name given in the corresponding cell in the second column.
                // Adjust SVG attributes for the token."
                if namespace == Namespace::Svg {
                    if let Some(adjusted) = adjust_svg_tag_name(name) {
                        name = adjusted;
                    }
                    adjust_svg_attributes(&mut attributes);
                }
                let element = self.insert_element(name, namespace, &attributes);

                // "If the token has its self-closing flag set, then run the
                // appropriate steps from the following list: If the token's tag
                // name is "script", and the new current node is in the SVG
                // namespace: Acknowledge the token's self-closing flag, and then
                // act as described in the steps for a "script" end tag below.
                // Otherwise: Pop the current node off the stack of open elements
                // and acknowledge the token's self-closing flag."
                if self_closing {
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing();
                    if namespace == Namespace::Svg && element.name == "script" {
                        self.pending_script = Some(element.handle);
                    }
                }
                Step::Done
            }

            // "An end tag whose tag name is "script", if the current node is an
            // SVG script element: Pop the current node off the stack of open
            // elements."
            Token::EndTag {
                tag: TagName::Script,
                ..
            } if self
                .current_node()
                .is_some_and(|node| node.namespace == Namespace::Svg && node.name == "script") =>
            {
                if let Some(script) = self.open_elements.pop() {
                    self.pending_script = Some(script.handle);
                }
                Step::Done
            }

            Token::EndTag { ref name, .. } => {
                let name = name.clone();
                self.foreign_end_tag(&name, token)
            }

            Token::EndOfFile => self.process_using_rules_for(self.mode, token),
        }
    }

    fn break_out_of_foreign_content(&mut self, code: ParseErrorCode) {
        self.error(code);
        while let Some(node) = self.current_node()
            && !(node.is_mathml_text_integration_point()
                || node.html_integration_point
                || node.namespace == Namespace::Html)
        {
            let _ = self.open_elements.pop();
        }
    }

    /// "Any other end tag"
    fn foreign_end_tag(&mut self, name: &str, token: Token) -> Step {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        let Some(mut index) = self.open_elements.len().checked_sub(1) else {
            return Step::Done;
        };

        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not the
        //          same as the tag name of the token, then this is a parse
        //          error."
        if self
            .open_elements
            .get(index)
            .is_some_and(|node| !node.name.eq_ignore_ascii_case(name))
        {
            self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            //          open elements, then return. (fragment case)"
            if index == 0 {
                return Step::Done;
            }
            let Some(node) = self.open_elements.get(index) else {
                return Step::Done;
            };

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //          same as the tag name of the token, pop elements from the
            //          stack of open elements until node has been popped from
            //          the stack, and then return."
            if node.name.eq_ignore_ascii_case(name) {
                let id = node.id;
                self.open_elements.pop_until_id(id);
                return Step::Done;
            }

            // STEP 5: "Set node to the previous entry in the stack of open
            //          elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return
            //          to the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules
            //          given in the section corresponding to the current
            //          insertion mode in HTML content."
            if self
                .open_elements
                .get(index)
                .is_some_and(|node| node.namespace == Namespace::Html)
            {
                return self.process_using_rules_for(self.mode, token);
            }
        }
    }
}
