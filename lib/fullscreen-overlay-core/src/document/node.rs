use crate::document::{NodeId, NODE_ID_COUNTER};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::sync::atomic::Ordering;

pub type NodeRef = Rc<Node>;
pub type ParentNodeRef = Weak<Node>;

/// An element in the headless page tree.
///
/// Every node knows its parent explicitly, so moving a node is always a detach from the old
/// parent followed by an attach to the new one. A node has at most one parent at a time.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    tag: String,
    dom_id: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<Vec<(String, String)>>,
    text: RefCell<Option<String>>,
    visible: Cell<bool>,
    parent: RefCell<Option<ParentNodeRef>>,
    children: RefCell<Vec<NodeRef>>,
    self_ref: RefCell<ParentNodeRef>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self as *const Self == other as *const Self
    }
}

impl Node {
    pub fn new(tag: &str) -> NodeRef {
        let id = NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let self_rc = Rc::new(Self {
            id,
            tag: tag.to_ascii_lowercase(),
            dom_id: RefCell::new(None),
            classes: RefCell::new(Vec::new()),
            attributes: RefCell::new(Vec::new()),
            text: RefCell::new(None),
            visible: Cell::new(true),
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
            self_ref: RefCell::new(Weak::new()),
        });

        self_rc.self_ref.replace(Rc::downgrade(&self_rc));
        self_rc
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn dom_id(&self) -> Option<String> {
        self.dom_id.borrow().clone()
    }

    pub fn set_dom_id(&self, dom_id: &str) {
        self.dom_id.replace(Some(dom_id.to_owned()));
    }

    pub fn classes(&self) -> Ref<Vec<String>> {
        self.classes.borrow()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.classes.borrow_mut().push(class.to_owned());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    pub fn attributes(&self) -> Ref<Vec<(String, String)>> {
        self.attributes.borrow()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .borrow()
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut attributes = self.attributes.borrow_mut();
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().retain(|(key, _)| key != name);
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: &str) {
        self.text.replace(Some(text.to_owned()));
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn show(&self) {
        self.set_visible(true);
    }

    pub fn hide(&self) {
        self.set_visible(false);
    }

    /// Whether this node and every one of its ancestors is visible
    pub fn is_displayed(&self) -> bool {
        if !self.is_visible() {
            return false;
        }

        let mut current = self.parent();
        while let Some(node) = current {
            if !node.is_visible() {
                return false;
            }
            current = node.parent();
        }

        true
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
            .borrow()
            .as_ref()
            .and_then(|parent| parent.upgrade())
    }

    fn set_parent(&self, parent: Option<ParentNodeRef>) {
        self.parent.replace(parent);
    }

    pub fn children(&self) -> Ref<Vec<NodeRef>> {
        self.children.borrow()
    }

    fn children_mut(&self) -> RefMut<Vec<NodeRef>> {
        self.children.borrow_mut()
    }

    pub fn self_ref(&self) -> ParentNodeRef {
        self.self_ref.borrow().clone()
    }

    pub fn index_of_child(&self, child: &Node) -> Option<usize> {
        self.children().iter().position(|c| c.as_ref() == child)
    }

    pub fn is_child_of(&self, parent: &Node) -> bool {
        self.parent().is_some_and(|p| p.as_ref() == parent)
    }

    pub fn is_descendant_of(&self, ancestor: &Node) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.as_ref() == ancestor {
                return true;
            }
            current = node.parent();
        }

        false
    }

    pub fn append_child(&self, child: NodeRef) -> bool {
        let index = self.children().len();
        self.insert_child(index, child)
    }

    /// Move `child` to `index` among this node's children, detaching it from its current parent
    /// first. Returns false, leaving the tree untouched, if the move would create a cycle.
    pub fn insert_child(&self, mut index: usize, child: NodeRef) -> bool {
        if self == child.as_ref() || self.is_descendant_of(&child) {
            return false;
        }

        // Moving within the same parent shifts the target index
        if let Some(current_index) = self.index_of_child(&child) {
            if current_index < index {
                index -= 1;
            }
            self.children_mut().remove(current_index);
        } else {
            child.detach();
        }

        let index = index.min(self.children().len());
        self.children_mut().insert(index, child.clone());
        child.set_parent(Some(self.self_ref()));
        true
    }

    pub fn remove_child(&self, child: &Node) -> bool {
        match self.index_of_child(child) {
            Some(index) => {
                self.children_mut().remove(index);
                child.set_parent(None);
                true
            }
            None => false,
        }
    }

    /// Remove this node from its parent. Returns the former parent.
    pub fn detach(&self) -> Option<NodeRef> {
        let parent = self.parent()?;
        parent.remove_child(self);
        Some(parent)
    }
}
