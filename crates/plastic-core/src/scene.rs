// crates/plastic-core/src/scene.rs

//! Serializable layout scenes.
//!
//! A scene bundles everything one layout pass needs: the root frame, the
//! multiplier, a description tree with string keys and the ordered list of
//! constraints to apply once the container is built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Edge, EdgeInsets, Length, NodeDescription, PlasticError, Rect, Relation, Result, DEFAULT_TAG};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<FrameSpec> for Rect {
    fn from(spec: FrameSpec) -> Self {
        Rect::new(spec.x, spec.y, spec.width, spec.height)
    }
}

impl From<Rect> for FrameSpec {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.x,
            height: rect.size.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_multiplier() -> f32 {
    1.0
}

impl SceneNode {
    pub fn to_description(&self) -> NodeDescription<String> {
        NodeDescription {
            tag: self.tag.clone(),
            key: self.key.clone(),
            frame: self.frame.map(Rect::from),
            width: self.width,
            height: self.height,
            children: self.children.iter().map(SceneNode::to_description).collect(),
        }
    }
}

/// One constraint-setting call. A missing `target` means the root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SceneConstraint {
    Relation {
        node: String,
        relation: Relation,
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        insets: EdgeInsets,
    },
    Width {
        node: String,
        value: Length,
    },
    Height {
        node: String,
        value: Length,
    },
    Pin {
        node: String,
        edge: Edge,
        #[serde(default)]
        target: Option<String>,
        target_edge: Edge,
        #[serde(default)]
        offset: Option<Length>,
    },
}

impl SceneConstraint {
    pub fn node(&self) -> &str {
        match self {
            SceneConstraint::Relation { node, .. }
            | SceneConstraint::Width { node, .. }
            | SceneConstraint::Height { node, .. }
            | SceneConstraint::Pin { node, .. } => node,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub root: FrameSpec,
    #[serde(default = "default_multiplier")]
    pub multiplier: f32,
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
    #[serde(default)]
    pub constraints: Vec<SceneConstraint>,
}

impl Scene {
    pub fn from_json(source: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(source)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn root_frame(&self) -> Rect {
        self.root.into()
    }

    pub fn descriptions(&self) -> Vec<NodeDescription<String>> {
        self.nodes.iter().map(SceneNode::to_description).collect()
    }

    fn validate(&self) -> Result<()> {
        if !self.root_frame().is_finite() {
            return Err(PlasticError::Scene(format!("root frame {:?} is not finite", self.root)));
        }
        for constraint in &self.constraints {
            if constraint.node().is_empty() {
                return Err(PlasticError::Scene("constraint with an empty node key".to_string()));
            }
        }
        self.descriptions().iter().try_for_each(NodeDescription::validate)
    }
}
