use crate::document::{Document, Node, NodeRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_tag() -> String {
    "div".to_owned()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// YAML form of a page element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNode {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space separated class list, as in markup
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SerializedNode>,
}

impl Default for SerializedNode {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            id: None,
            class: String::new(),
            attributes: IndexMap::new(),
            text: None,
            hidden: false,
            children: Vec::new(),
        }
    }
}

pub fn serialize_node(node: &Node) -> SerializedNode {
    SerializedNode {
        tag: node.tag().to_owned(),
        id: node.dom_id(),
        class: node.classes().join(" "),
        attributes: node.attributes().iter().cloned().collect(),
        text: node.text(),
        hidden: !node.is_visible(),
        children: node
            .children()
            .iter()
            .map(|child| serialize_node(child))
            .collect(),
    }
}

pub fn deserialize_node(serialized: &SerializedNode) -> NodeRef {
    let node = Node::new(&serialized.tag);

    if let Some(id) = &serialized.id {
        node.set_dom_id(id);
    }
    for class in serialized.class.split_whitespace() {
        node.add_class(class);
    }
    for (name, value) in &serialized.attributes {
        node.set_attribute(name, value);
    }
    if let Some(text) = &serialized.text {
        node.set_text(text);
    }
    node.set_visible(!serialized.hidden);

    for child in &serialized.children {
        node.append_child(deserialize_node(child));
    }

    node
}

impl Document {
    /// Build a page whose body holds `nodes`
    pub fn from_serialized(nodes: &[SerializedNode]) -> Self {
        let document = Document::new();
        for node in nodes {
            document.body().append_child(deserialize_node(node));
        }
        document
    }

    pub fn serialize_body(&self) -> Vec<SerializedNode> {
        self.body()
            .children()
            .iter()
            .map(|child| serialize_node(child))
            .collect()
    }
}
