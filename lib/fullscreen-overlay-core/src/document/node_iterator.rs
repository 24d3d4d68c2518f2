use crate::document::NodeRef;

/// Depth first, document order walk over a subtree, starting with its root
pub struct NodeIterator {
    stack: Vec<NodeRef>,
}

impl NodeIterator {
    pub fn new(root: NodeRef) -> Self {
        Self { stack: vec![root] }
    }
}

impl Iterator for NodeIterator {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev().cloned());
        Some(node)
    }
}
