//! [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Repairs mis-nested formatting elements: `<b>1<p>2</b>3</p>` becomes
//! `<b>1</b><p><b>2</b>3</p>`.

use bramble_dom::{Namespace, TreeSink};

use super::formatting::FormattingEntry;
use super::open_elements::OpenElement;
use super::tree_builder::TreeBuilder;
use crate::error::ParseErrorCode;
use crate::tokenizer::Token;

/// How the algorithm ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AdoptionOutcome {
    /// The token was handled.
    Done,
    /// "act as described in the "any other end tag" entry"
    AnyOtherEndTag,
}

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn run_adoption_agency(&mut self, subject: &str) -> AdoptionOutcome {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && current.is_html_named(subject)
            && !self.active_formatting.contains_id(current.id)
        {
            let _ = self.open_elements.pop();
            return AdoptionOutcome::Done;
        }

        // STEP 3-4: "Let outer loop counter be 0. While true: If outer loop
        //            counter is greater than or equal to 8, then return."
        for _ in 0..8 {
            // STEP 4.3: "Let formatting element be the last element in the list
            //            of active formatting elements that is between the end
            //            of the list and the last marker in the list, if any, or
            //            the start of the list otherwise, and has the tag name
            //            subject. If there is no such element, then return and
            //            instead act as described in the "any other end tag"
            //            entry above."
            let Some(formatting_index) = self.active_formatting.find_after_last_marker(subject) else {
                return AdoptionOutcome::AnyOtherEndTag;
            };
            let Some(FormattingEntry::Element {
                element: formatting_element,
                token: formatting_token,
            }) = self.active_formatting.get(formatting_index).cloned()
            else {
                return AdoptionOutcome::AnyOtherEndTag;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //            elements, then this is a parse error; remove the element
            //            from the list, and return."
            let Some(formatting_stack_index) = self.open_elements.position_of_id(formatting_element.id) else {
                self.error(ParseErrorCode::MisnestedTag);
                let _ = self.active_formatting.remove(formatting_index);
                return AdoptionOutcome::Done;
            };

            // STEP 4.5: "If formatting element is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self.open_elements.has_id_in_scope(formatting_element.id) {
                self.error(ParseErrorCode::MisnestedTag);
                return AdoptionOutcome::Done;
            }

            // STEP 4.6: "If formatting element is not the current node, this is
            //            a parse error. (But do not return.)"
            if self
                .current_node()
                .is_none_or(|current| current.id != formatting_element.id)
            {
                self.error(ParseErrorCode::MisnestedTag);
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack of
            //            open elements that is lower in the stack than formatting
            //            element, and is an element in the special category.
            //            There might not be one."
            let furthest_block = self
                .open_elements
                .iter()
                .skip(formatting_stack_index + 1)
                .find(|element| element.is_special())
                .cloned();

            // STEP 4.8: "If there is no furthest block, then the UA must first
            //            pop all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formatting element, then remove formatting element from
            //            the list of active formatting elements, and finally
            //            return."
            let Some(furthest_block) = furthest_block else {
                self.open_elements.pop_until_id(formatting_element.id);
                self.active_formatting.remove_id(formatting_element.id);
                return AdoptionOutcome::Done;
            };

            // STEP 4.9: "Let common ancestor be the element immediately above
            //            formatting element in the stack of open elements."
            let Some(common_ancestor) = formatting_stack_index
                .checked_sub(1)
                .and_then(|index| self.open_elements.get(index))
                .cloned()
            else {
                return AdoptionOutcome::Done;
            };

            // STEP 4.10: "Let a bookmark note the position of formatting element
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            let mut bookmark = formatting_index;

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = self
                .open_elements
                .position_of_id(furthest_block.id)
                .unwrap_or(formatting_stack_index + 1);
            let mut last_node = furthest_block.clone();

            // STEP 4.12-4.13: inner loop.
            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node
                //               in the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g.
                //               because it got removed by this algorithm), the
                //               element that was immediately above node in the
                //               stack of open elements before node was removed."
                let Some(index) = node_index.checked_sub(1) else {
                    break;
                };
                node_index = index;
                let Some(node) = self.open_elements.get(node_index).cloned() else {
                    break;
                };

                // STEP 4.13.3: "If node is formatting element, then break."
                if node.id == formatting_element.id {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and node
                //               is in the list of active formatting elements, then
                //               remove node from the list of active formatting
                //               elements."
                let mut node_list_index = self.active_formatting.position_of_id(node.id);
                if inner_loop_counter > 3
                    && let Some(index) = node_list_index
                {
                    let _ = self.active_formatting.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                    node_list_index = None;
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of open
                //               elements and continue."
                let Some(node_list_index) = node_list_index else {
                    let _ = self.open_elements.remove(node.id);
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML namespace,
                //               with common ancestor as the intended parent;
                //               replace the entry for node in the list of active
                //               formatting elements with an entry for the new
                //               element, replace the entry for node in the stack
                //               of open elements with an entry for the new
                //               element, and let node be the new element."
                let Some(FormattingEntry::Element { token, .. }) = self.active_formatting.get(node_list_index).cloned() else {
                    break;
                };
                let new_element = self.create_element_from_token(&token);
                self.active_formatting.replace_element(node_list_index, new_element.clone());
                self.open_elements.replace(node.id, new_element.clone());

                // STEP 4.13.7: "If last node is furthest block, then move the
                //               aforementioned bookmark to be immediately after
                //               the new node in the list of active formatting
                //               elements."
                if last_node.id == furthest_block.id {
                    bookmark = node_list_index + 1;
                }

                // STEP 4.13.8: "Append last node to node."
                self.sink.detach(&last_node.handle);
                self.sink.append_child(&new_element.handle, &last_node.handle);

                // STEP 4.13.9: "Set last node to node."
                last_node = new_element;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the
            //             previous step at the appropriate place for inserting a
            //             node, but using common ancestor as the override target."
            self.sink.detach(&last_node.handle);
            let place = self.appropriate_place(Some(&common_ancestor));
            self.insert_at(place, &last_node.handle);

            // STEP 4.15: "Create an element for the token for which formatting
            //             element was created, in the HTML namespace, with
            //             furthest block as the intended parent."
            let new_element = self.create_element_from_token(&formatting_token);

            // STEP 4.16: "Take all of the child nodes of furthest block and
            //             append them to the element created in the last step."
            self.sink.reparent_children(&furthest_block.handle, &new_element.handle);

            // STEP 4.17: "Append that new element to furthest block."
            self.sink.append_child(&furthest_block.handle, &new_element.handle);

            // STEP 4.18: "Remove formatting element from the list of active
            //             formatting elements, and insert the new element into the
            //             list of active formatting elements at the position of the
            //             aforementioned bookmark."
            if let Some(index) = self.active_formatting.position_of_id(formatting_element.id) {
                let _ = self.active_formatting.remove(index);
                if index < bookmark {
                    bookmark -= 1;
                }
            }
            self.active_formatting.insert_at_bookmark(
                FormattingEntry::Element {
                    element: new_element.clone(),
                    token: formatting_token,
                },
                bookmark,
            );

            // STEP 4.19: "Remove formatting element from the stack of open
            //             elements, and insert the new element into the stack of
            //             open elements immediately below the position of furthest
            //             block in that stack."
            let _ = self.open_elements.remove(formatting_element.id);
            if let Some(index) = self.open_elements.position_of_id(furthest_block.id) {
                self.open_elements.insert(index + 1, new_element);
            }
        }
        AdoptionOutcome::Done
    }

    /// Recreate an HTML element from the start tag it was first made for.
    fn create_element_from_token(&mut self, token: &Token) -> OpenElement<S::Handle> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => self.create_element(name, Namespace::Html, attributes),
            _ => unreachable!("formatting entries are created for start tags"),
        }
    }
}
