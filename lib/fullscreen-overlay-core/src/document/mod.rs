pub use document::*;
pub use node::*;
pub use node_iterator::*;
pub use render::render;
pub use selector::*;
pub use serialization::*;

use std::sync::atomic::AtomicU64;

mod document;
mod node;
mod node_iterator;
mod render;
mod selector;
mod serialization;

pub type NodeId = u64;

static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn new_document() -> Document {
        Document::new()
    }

    pub fn new_div() -> NodeRef {
        Node::new("div")
    }

    pub fn new_div_with_id(id: &str) -> NodeRef {
        let node = Node::new("div");
        node.set_dom_id(id);
        node
    }

    pub fn new_div_with_class(class: &str) -> NodeRef {
        let node = Node::new("div");
        node.add_class(class);
        node
    }

    pub fn selector(source: &str) -> Selector {
        source.parse().unwrap()
    }

    #[test]
    fn test_node_ids_are_unique() {
        let a = new_div();
        let b = new_div();
        assert_ne!(a.id(), b.id());
    }
}
