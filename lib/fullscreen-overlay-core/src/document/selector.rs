use crate::document::Node;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Selector is empty")]
    Empty,
    #[error("Unsupported selector '{0}': only tag, #id and .class forms are supported")]
    Unsupported(String),
    #[error("Invalid name in selector '{0}'")]
    InvalidName(String),
}

/// A simple element selector: comma separated groups of `tag`, `#id` and `.class` parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector {
    source: String,
    groups: Vec<CompoundSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl CompoundSelector {
    fn parse(source: &str) -> Result<Self, SelectorError> {
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        if source
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '>' | '+' | '~' | '[' | ']' | ':' | '*'))
        {
            return Err(SelectorError::Unsupported(source.to_owned()));
        }

        let mut compound = CompoundSelector::default();
        let mut chars = source.char_indices();
        let mut start = 0;
        let mut kind = None;

        // Split into `[tag](.class|#id)*`
        loop {
            let next = chars.next();
            let at_boundary = matches!(next, None | Some((_, '.')) | Some((_, '#')));
            if !at_boundary {
                continue;
            }

            let end = next.map_or(source.len(), |(i, _)| i);
            let name = &source[start..end];
            match kind {
                None if name.is_empty() => {}
                None => compound.tag = Some(Self::validate(name, source)?.to_ascii_lowercase()),
                Some('#') => compound.id = Some(Self::validate(name, source)?.to_owned()),
                Some(_) => compound
                    .classes
                    .push(Self::validate(name, source)?.to_owned()),
            }

            match next {
                Some((i, c)) => {
                    kind = Some(c);
                    start = i + 1;
                }
                None => break,
            }
        }

        Ok(compound)
    }

    fn validate<'a>(name: &'a str, source: &str) -> Result<&'a str, SelectorError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(name)
        } else {
            Err(SelectorError::InvalidName(source.to_owned()))
        }
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if node.tag() != tag {
                return false;
            }
        }

        if let Some(id) = &self.id {
            if node.dom_id().as_deref() != Some(id.as_str()) {
                return false;
            }
        }

        self.classes.iter().all(|class| node.has_class(class))
    }
}

impl Selector {
    pub fn id(dom_id: &str) -> Self {
        Self {
            source: format!("#{}", dom_id),
            groups: vec![CompoundSelector {
                id: Some(dom_id.to_owned()),
                ..Default::default()
            }],
        }
    }

    pub fn class(class: &str) -> Self {
        Self {
            source: format!(".{}", class),
            groups: vec![CompoundSelector {
                classes: vec![class.to_owned()],
                ..Default::default()
            }],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.groups.iter().any(|group| group.matches(node))
    }

    /// Whether `node` or any of its ancestors matches, the way an activation bubbles up the tree
    pub fn matches_or_ancestor(&self, node: &Node) -> bool {
        if self.matches(node) {
            return true;
        }

        let mut current = node.parent();
        while let Some(ancestor) = current {
            if self.matches(&ancestor) {
                return true;
            }
            current = ancestor.parent();
        }

        false
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let groups = source
            .split(',')
            .map(|group| CompoundSelector::parse(group.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: source.to_owned(),
            groups,
        })
    }
}

impl TryFrom<String> for Selector {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
