//! The tree construction sink.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree constructor never touches nodes directly. Every node it creates
//! and every edge it adds or removes goes through a [`TreeSink`], so the same
//! algorithm can build a [`DomTree`], an [`RcDom`](crate::RcDom), or
//! whatever DOM a host already owns.

use crate::{Attribute, DoctypeData, DomTree, ElementData, Namespace, NodeId, NodeType, QuirksMode};

/// Node factory and mutation interface used by the tree constructor.
///
/// Handles are cheap references to nodes owned by the sink. The parser keeps
/// them on its stack of open elements and list of active formatting
/// elements, but the sink remains the only owner of the nodes themselves.
pub trait TreeSink {
    /// A reference to a node in this sink's tree.
    type Handle: Clone;

    /// The Document node.
    fn document(&self) -> Self::Handle;

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Create a detached element. A `template` element in the HTML namespace
    /// must also get an empty template contents fragment.
    fn create_element(
        &mut self,
        name: &str,
        namespace: Namespace,
        attrs: Vec<Attribute>,
    ) -> Self::Handle;

    /// Create a detached comment node.
    fn create_comment_node(&mut self, data: &str) -> Self::Handle;

    /// Create a detached text node.
    fn create_text_node(&mut self, data: &str) -> Self::Handle;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Handle, child: &Self::Handle);

    /// Insert `child` into `parent` immediately before `reference`.
    fn insert_before(&mut self, parent: &Self::Handle, child: &Self::Handle, reference: &Self::Handle);

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// Append character data to `parent`. Sinks that can see their children
    /// should merge with a trailing text node; the default creates a fresh
    /// node every time.
    fn append_text(&mut self, parent: &Self::Handle, text: &str) {
        let node = self.create_text_node(text);
        self.append_child(parent, &node);
    }

    /// Insert character data before `reference`, merging with a preceding
    /// text node where the sink can.
    fn insert_text_before(&mut self, parent: &Self::Handle, text: &str, reference: &Self::Handle) {
        let node = self.create_text_node(text);
        self.insert_before(parent, &node, reference);
    }

    /// Append a DocumentType node to the Document.
    fn append_doctype(&mut self, name: &str, public_id: &str, system_id: &str);

    /// Add each attribute in `attrs` to `node` unless the node already has an
    /// attribute with that name.
    fn adopt_attributes(&mut self, node: &Self::Handle, attrs: Vec<Attribute>);

    /// Set the document's mode.
    fn set_document_mode(&mut self, mode: QuirksMode);

    /// The template contents fragment of a `template` element.
    fn template_content(&mut self, node: &Self::Handle) -> Self::Handle;

    /// The parent of `node`, if it has one.
    fn parent(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// Remove `node` from its parent.
    fn detach(&mut self, node: &Self::Handle);

    /// Move all children of `from` to the end of `to`.
    fn reparent_children(&mut self, from: &Self::Handle, to: &Self::Handle);

    /// Node identity.
    fn same_node(&self, a: &Self::Handle, b: &Self::Handle) -> bool;
}

impl TreeSink for DomTree {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        NodeId::ROOT
    }

    fn create_element(&mut self, name: &str, namespace: Namespace, attrs: Vec<Attribute>) -> NodeId {
        let mut data = ElementData::new(name.to_string(), namespace, attrs);
        if namespace == Namespace::Html && name == "template" {
            data.template_contents = Some(self.alloc(NodeType::DocumentFragment));
        }
        self.alloc(NodeType::Element(data))
    }

    fn create_comment_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        Self::append_child(self, *parent, *child);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        Self::insert_before(self, *parent, *child, *reference);
    }

    fn append_text(&mut self, parent: &NodeId, text: &str) {
        Self::append_text(self, *parent, text);
    }

    fn insert_text_before(&mut self, parent: &NodeId, text: &str, reference: &NodeId) {
        Self::insert_text_before(self, *parent, text, *reference);
    }

    fn append_doctype(&mut self, name: &str, public_id: &str, system_id: &str) {
        let id = self.alloc(NodeType::Doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }));
        Self::append_child(self, NodeId::ROOT, id);
    }

    fn adopt_attributes(&mut self, node: &NodeId, attrs: Vec<Attribute>) {
        if let Some(element) = self.as_element_mut(*node) {
            for attr in attrs {
                if element.get_attribute(&attr.name).is_none() {
                    element.attrs.push(attr);
                }
            }
        }
    }

    fn set_document_mode(&mut self, mode: QuirksMode) {
        self.set_quirks_mode(mode);
    }

    fn template_content(&mut self, node: &NodeId) -> NodeId {
        match self.template_contents(*node) {
            Some(contents) => contents,
            None => {
                // Only HTML templates get a fragment at creation time.
                let contents = self.alloc(NodeType::DocumentFragment);
                if let Some(element) = self.as_element_mut(*node) {
                    element.template_contents = Some(contents);
                }
                contents
            }
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent(self, *node)
    }

    fn detach(&mut self, node: &NodeId) {
        Self::detach(self, *node);
    }

    fn reparent_children(&mut self, from: &NodeId, to: &NodeId) {
        self.move_children(*from, *to);
    }

    fn same_node(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b
    }
}
