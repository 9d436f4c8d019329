// crates/plastic-layout/src/container.rs

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use plastic_core::{validate_multiplier, Axis, NodeDescription, PlasticError, Rect};
use tracing::debug;

use crate::placeholder::Placeholder;
use crate::resolver::{Resolved, Resolver};
use crate::value::NodeId;
use crate::{LayoutError, LayoutResult};

/// Resolved frames of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFrame {
    pub id: NodeId,
    /// Relative to the parent
    pub frame: Rect,
    /// In root space
    pub absolute: Rect,
}

/// Arena of placeholders built from a description tree.
///
/// Placeholders are stored in depth-first pre-order, the root first. The
/// container is the only owner; placeholders refer to each other by
/// [`NodeId`].
#[derive(Debug)]
pub struct ViewsContainer<K> {
    nodes: Vec<Placeholder<K>>,
    keys: HashMap<K, NodeId>,
    multiplier: f32,
    revision: u64,
}

impl<K> ViewsContainer<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Builds the root from `root_frame` and one placeholder per node of
    /// `children`. All concrete frames are multiplied by `multiplier`.
    pub fn new(root_frame: Rect, children: &[NodeDescription<K>], multiplier: f32) -> LayoutResult<Self> {
        let multiplier = validate_multiplier(multiplier)?;
        if !root_frame.is_finite() {
            return Err(PlasticError::InvalidFrame(format!("root frame {:?} is not finite", root_frame)).into());
        }
        children.iter().try_for_each(NodeDescription::validate)?;

        let capacity = 1 + children.iter().map(NodeDescription::count).sum::<usize>();
        let mut container = Self {
            nodes: Vec::with_capacity(capacity),
            keys: HashMap::new(),
            multiplier,
            revision: 0,
        };
        container.nodes.push(Placeholder::root(root_frame.scaled(multiplier), multiplier));

        for child in children {
            container.insert(child, NodeId::ROOT)?;
        }

        debug!(
            "Built views container: {} placeholders, {} keyed, multiplier {}",
            container.nodes.len(),
            container.keys.len(),
            multiplier
        );
        Ok(container)
    }

    fn insert(&mut self, description: &NodeDescription<K>, parent: NodeId) -> LayoutResult<NodeId> {
        let id = NodeId(self.nodes.len());

        if let Some(key) = &description.key {
            match self.keys.entry(key.clone()) {
                Entry::Occupied(_) => return Err(LayoutError::DuplicateKey(format!("{:?}", key))),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
        }

        self.nodes
            .push(Placeholder::from_description(id, parent, description, self.multiplier));
        self.nodes[parent.0].push_child(id);

        for child in &description.children {
            self.insert(child, id)?;
        }
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn root_placeholder(&self) -> &Placeholder<K> {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn id_of(&self, key: &K) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    pub fn get(&self, key: &K) -> Option<&Placeholder<K>> {
        self.id_of(key).map(|id| &self.nodes[id.0])
    }

    /// Mutable access invalidates every memoized frame.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Placeholder<K>> {
        let id = self.id_of(key)?;
        self.revision += 1;
        Some(&mut self.nodes[id.0])
    }

    pub fn node(&self, id: NodeId) -> LayoutResult<&Placeholder<K>> {
        self.nodes.get(id.0).ok_or(LayoutError::UnknownNode(id))
    }

    /// Mutable access invalidates every memoized frame.
    pub fn node_mut(&mut self, id: NodeId) -> LayoutResult<&mut Placeholder<K>> {
        let node = self.nodes.get_mut(id.0).ok_or(LayoutError::UnknownNode(id))?;
        self.revision += 1;
        Ok(node)
    }

    pub fn parent_of(&self, id: NodeId) -> LayoutResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Placeholders in tree order, the root first.
    pub fn iter(&self) -> impl Iterator<Item = &Placeholder<K>> {
        self.nodes.iter()
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Human readable name of a node for diagnostics.
    pub fn label(&self, id: NodeId) -> String {
        match self.nodes.get(id.0) {
            Some(node) if node.is_root() => "root".to_string(),
            Some(node) => match node.key() {
                Some(key) => format!("{:?}", key),
                None => format!("{} {}", node.tag(), id),
            },
            None => id.to_string(),
        }
    }

    fn resolve(&self, id: NodeId) -> LayoutResult<Resolved> {
        Resolver::new(self).resolve(id)
    }

    /// Frame relative to the parent.
    pub fn frame(&self, id: NodeId) -> LayoutResult<Rect> {
        Ok(self.resolve(id)?.local)
    }

    pub fn absolute_frame(&self, id: NodeId) -> LayoutResult<Rect> {
        Ok(self.resolve(id)?.absolute)
    }

    pub fn absolute_origin(&self, id: NodeId) -> LayoutResult<Vec2> {
        Ok(self.resolve(id)?.absolute.origin)
    }

    /// Resolves every placeholder, in tree order.
    pub fn resolve_all(&self) -> LayoutResult<Vec<ResolvedFrame>> {
        let mut resolver = Resolver::new(self);
        self.nodes
            .iter()
            .map(|node| {
                let resolved = resolver.resolve(node.id())?;
                Ok(ResolvedFrame {
                    id: node.id(),
                    frame: resolved.local,
                    absolute: resolved.absolute,
                })
            })
            .collect()
    }

    fn parent_origin_of_key(&self, key: &K) -> LayoutResult<Vec2> {
        let id = self
            .id_of(key)
            .ok_or_else(|| LayoutError::KeyNotFound(format!("{:?}", key)))?;
        match self.node(id)?.parent() {
            Some(parent) => self.absolute_origin(parent),
            None => Ok(Vec2::ZERO),
        }
    }

    fn coordinate(&self, value: f32, axis: Axis, in_parent_of: &K) -> LayoutResult<f32> {
        Ok(value - axis.component(self.parent_origin_of_key(in_parent_of)?))
    }

    /// Re-expresses a root-space x coordinate in the coordinate system of
    /// the parent of the node keyed `in_parent_of`.
    pub fn x_coordinate(&self, value: f32, in_parent_of: &K) -> LayoutResult<f32> {
        self.coordinate(value, Axis::Horizontal, in_parent_of)
    }

    /// Y counterpart of [`ViewsContainer::x_coordinate`].
    pub fn y_coordinate(&self, value: f32, in_parent_of: &K) -> LayoutResult<f32> {
        self.coordinate(value, Axis::Vertical, in_parent_of)
    }

    pub fn point_in_parent_of(&self, point: Vec2, key: &K) -> LayoutResult<Vec2> {
        Ok(point - self.parent_origin_of_key(key)?)
    }
}
