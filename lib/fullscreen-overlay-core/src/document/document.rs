use crate::document::{Node, NodeIterator, NodeRef, Selector};

/// A headless page: an `html` root holding a single `body`.
#[derive(Debug)]
pub struct Document {
    root: NodeRef,
    body: NodeRef,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = Node::new("html");
        let body = Node::new("body");
        root.append_child(body.clone());
        Self { root, body }
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn body(&self) -> &NodeRef {
        &self.body
    }

    /// Create a detached element. It joins the page once appended somewhere under `body`.
    pub fn create_element(&self, tag: &str) -> NodeRef {
        Node::new(tag)
    }

    pub fn iter(&self) -> NodeIterator {
        NodeIterator::new(self.root.clone())
    }

    pub fn contains(&self, node: &Node) -> bool {
        node == self.root.as_ref() || node.is_descendant_of(&self.root)
    }

    /// Every attached node matching `selector`, in document order
    pub fn query(&self, selector: &Selector) -> Vec<NodeRef> {
        self.iter().filter(|node| selector.matches(node)).collect()
    }

    pub fn query_first(&self, selector: &Selector) -> Option<NodeRef> {
        self.iter().find(|node| selector.matches(node))
    }

    pub fn get_by_dom_id(&self, dom_id: &str) -> Option<NodeRef> {
        self.iter()
            .find(|node| node.dom_id().as_deref() == Some(dom_id))
    }
}
