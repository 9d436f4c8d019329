// crates/plastic-core/src/description.rs
use crate::{Length, PlasticError, Rect, Result};

pub const DEFAULT_TAG: &str = "View";

/// Immutable description of one node of a view tree.
///
/// Frames are relative to the parent node and expressed in design units.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescription<K> {
    pub tag: String,
    pub key: Option<K>,
    pub frame: Option<Rect>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub children: Vec<NodeDescription<K>>,
}

impl<K> NodeDescription<K> {
    pub fn new() -> Self {
        Self::with_tag(DEFAULT_TAG)
    }

    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            frame: None,
            width: None,
            height: None,
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: K) -> Self {
        self.key = Some(key);
        self
    }

    pub fn frame(mut self, frame: Rect) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn children(mut self, children: Vec<NodeDescription<K>>) -> Self {
        self.children = children;
        self
    }

    pub fn child(mut self, child: NodeDescription<K>) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, this node included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeDescription::count).sum::<usize>()
    }

    /// Rejects non-finite frames and lengths anywhere in the subtree.
    pub fn validate(&self) -> Result<()> {
        if let Some(frame) = self.frame {
            if !frame.is_finite() {
                return Err(PlasticError::InvalidFrame(format!(
                    "{} has a non-finite frame {:?}",
                    self.tag, frame
                )));
            }
        }
        for (name, length) in [("width", self.width), ("height", self.height)] {
            if let Some(length) = length.filter(|l| !l.is_finite()) {
                return Err(PlasticError::InvalidFrame(format!(
                    "{} has a non-finite {} {:?}",
                    self.tag, name, length
                )));
            }
        }
        self.children.iter().try_for_each(NodeDescription::validate)
    }
}

impl<K> Default for NodeDescription<K> {
    fn default() -> Self {
        Self::new()
    }
}
