//! A reference-counted DOM.
//!
//! Nodes are `Rc<RcNode>`: children are owned by their parent, the parent
//! link is a `Weak` back-reference, so the tree has no ownership cycles.
//! This is the shape most host applications already use for their own
//! document model, and the parser drives it through the same [`TreeSink`]
//! interface as the arena [`DomTree`](crate::DomTree).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{Attribute, DoctypeData, Namespace, QuirksMode, TreeSink};

/// A shared reference to a node.
pub type Handle = Rc<RcNode>;

/// A node in an [`RcDom`].
#[derive(Debug)]
pub struct RcNode {
    /// What kind of node this is, with its payload.
    pub data: RcNodeData,
    /// Back-reference to the parent node.
    pub parent: RefCell<Option<Weak<RcNode>>>,
    /// Child nodes, in order.
    pub children: RefCell<Vec<Handle>>,
}

/// Node payloads for [`RcNode`].
#[derive(Debug)]
pub enum RcNodeData {
    /// The Document.
    Document,
    /// Template contents.
    DocumentFragment,
    /// A DOCTYPE.
    Doctype(DoctypeData),
    /// An element.
    Element {
        /// Local name.
        name: String,
        /// Element namespace.
        namespace: Namespace,
        /// Attributes in insertion order.
        attrs: RefCell<Vec<Attribute>>,
        /// Contents fragment for `template` elements.
        template_contents: RefCell<Option<Handle>>,
    },
    /// Character data.
    Text(RefCell<String>),
    /// A comment.
    Comment(String),
}

impl RcNode {
    /// Wrap a payload in a new, parentless node.
    #[must_use]
    pub fn new(data: RcNodeData) -> Handle {
        Rc::new(Self {
            data,
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }

    /// The parent node, if still alive and attached.
    #[must_use]
    pub fn parent_node(&self) -> Option<Handle> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Local name if this is an element.
    #[must_use]
    pub fn element_name(&self) -> Option<&str> {
        match &self.data {
            RcNodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Concatenated text of all text descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        if let RcNodeData::Text(text) = &self.data {
            out.push_str(&text.borrow());
        }
        for child in self.children.borrow().iter() {
            out.push_str(&child.text_content());
        }
        out
    }
}

impl Drop for RcNode {
    // Dropping a very deep tree recursively can overflow the stack, so
    // children are flattened onto a work list first.
    fn drop(&mut self) {
        let mut pending = std::mem::take(self.children.get_mut());
        if let RcNodeData::Element {
            template_contents, ..
        } = &mut self.data
            && let Some(contents) = template_contents.get_mut().take()
        {
            pending.push(contents);
        }
        while let Some(node) = pending.pop() {
            pending.extend(std::mem::take(&mut *node.children.borrow_mut()));
            if let RcNodeData::Element {
                template_contents, ..
            } = &node.data
                && let Some(contents) = template_contents.borrow_mut().take()
            {
                pending.push(contents);
            }
        }
    }
}

/// A document built from [`RcNode`]s.
#[derive(Debug)]
pub struct RcDom {
    /// The Document node.
    pub document: Handle,
    /// The document's mode.
    pub quirks_mode: QuirksMode,
}

impl RcDom {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: RcNode::new(RcNodeData::Document),
            quirks_mode: QuirksMode::NoQuirks,
        }
    }

    fn position_in_parent(parent: &Handle, child: &Handle) -> Option<usize> {
        parent
            .children
            .borrow()
            .iter()
            .position(|c| Rc::ptr_eq(c, child))
    }
}

impl Default for RcDom {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink for RcDom {
    type Handle = Handle;

    fn document(&self) -> Handle {
        Rc::clone(&self.document)
    }

    fn create_element(&mut self, name: &str, namespace: Namespace, attrs: Vec<Attribute>) -> Handle {
        let template_contents = (namespace == Namespace::Html && name == "template")
            .then(|| RcNode::new(RcNodeData::DocumentFragment));
        RcNode::new(RcNodeData::Element {
            name: name.to_string(),
            namespace,
            attrs: RefCell::new(attrs),
            template_contents: RefCell::new(template_contents),
        })
    }

    fn create_comment_node(&mut self, data: &str) -> Handle {
        RcNode::new(RcNodeData::Comment(data.to_string()))
    }

    fn create_text_node(&mut self, data: &str) -> Handle {
        RcNode::new(RcNodeData::Text(RefCell::new(data.to_string())))
    }

    fn append_child(&mut self, parent: &Handle, child: &Handle) {
        self.detach(child);
        *child.parent.borrow_mut() = Some(Rc::downgrade(parent));
        parent.children.borrow_mut().push(Rc::clone(child));
    }

    fn insert_before(&mut self, parent: &Handle, child: &Handle, reference: &Handle) {
        self.detach(child);
        *child.parent.borrow_mut() = Some(Rc::downgrade(parent));
        match Self::position_in_parent(parent, reference) {
            Some(index) => parent.children.borrow_mut().insert(index, Rc::clone(child)),
            None => parent.children.borrow_mut().push(Rc::clone(child)),
        }
    }

    fn append_text(&mut self, parent: &Handle, text: &str) {
        if let Some(last) = parent.children.borrow().last()
            && let RcNodeData::Text(existing) = &last.data
        {
            existing.borrow_mut().push_str(text);
            return;
        }
        let node = self.create_text_node(text);
        self.append_child(parent, &node);
    }

    fn insert_text_before(&mut self, parent: &Handle, text: &str, reference: &Handle) {
        if let Some(index) = Self::position_in_parent(parent, reference)
            && index > 0
            && let RcNodeData::Text(existing) = &parent.children.borrow()[index - 1].data
        {
            existing.borrow_mut().push_str(text);
            return;
        }
        let node = self.create_text_node(text);
        self.insert_before(parent, &node, reference);
    }

    fn append_doctype(&mut self, name: &str, public_id: &str, system_id: &str) {
        let node = RcNode::new(RcNodeData::Doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }));
        let document = Rc::clone(&self.document);
        self.append_child(&document, &node);
    }

    fn adopt_attributes(&mut self, node: &Handle, attrs: Vec<Attribute>) {
        if let RcNodeData::Element { attrs: existing, .. } = &node.data {
            let mut existing = existing.borrow_mut();
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(attr);
                }
            }
        }
    }

    fn set_document_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
    }

    fn template_content(&mut self, node: &Handle) -> Handle {
        match &node.data {
            RcNodeData::Element {
                template_contents, ..
            } => Rc::clone(
                template_contents
                    .borrow_mut()
                    .get_or_insert_with(|| RcNode::new(RcNodeData::DocumentFragment)),
            ),
            _ => Rc::clone(node),
        }
    }

    fn parent(&self, node: &Handle) -> Option<Handle> {
        node.parent_node()
    }

    fn detach(&mut self, node: &Handle) {
        let weak = node.parent.borrow_mut().take();
        let Some(parent) = weak.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        parent.children.borrow_mut().retain(|c| !Rc::ptr_eq(c, node));
    }

    fn reparent_children(&mut self, from: &Handle, to: &Handle) {
        let moved = std::mem::take(&mut *from.children.borrow_mut());
        for child in &moved {
            *child.parent.borrow_mut() = Some(Rc::downgrade(to));
        }
        to.children.borrow_mut().extend(moved);
    }

    fn same_node(&self, a: &Handle, b: &Handle) -> bool {
        Rc::ptr_eq(a, b)
    }
}
