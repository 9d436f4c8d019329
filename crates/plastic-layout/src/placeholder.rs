// crates/plastic-layout/src/placeholder.rs

//! Per-node layout state.
//!
//! Each axis keeps at most the two most recently set rules among start
//! edge, end edge, center line and size. Two rules are enough to place an
//! axis; a third one pushes the oldest out.

use std::cell::Cell;

use plastic_core::{axis_edges, center_edge, opposite, AxisPlan, Axis, Edge, EdgeInsets, NodeDescription, Rect, Relation};

use crate::value::{Anchor, NodeId, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Start,
    End,
    Center,
    Size,
}

impl RuleKind {
    pub fn for_edge(edge: Edge) -> (Axis, RuleKind) {
        match edge {
            Edge::Left => (Axis::Horizontal, RuleKind::Start),
            Edge::Right => (Axis::Horizontal, RuleKind::End),
            Edge::CenterX => (Axis::Horizontal, RuleKind::Center),
            Edge::Top => (Axis::Vertical, RuleKind::Start),
            Edge::Bottom => (Axis::Vertical, RuleKind::End),
            Edge::CenterY => (Axis::Vertical, RuleKind::Center),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub kind: RuleKind,
    pub value: Value,
}

/// Pending rules of one axis, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisRules {
    rules: Vec<Rule>,
}

impl AxisRules {
    const CAPACITY: usize = 2;

    /// Last write wins: a rule of the same kind is replaced, otherwise the
    /// oldest rule is dropped once the axis is full.
    pub fn set(&mut self, kind: RuleKind, value: Value) {
        self.remove(kind);
        if self.rules.len() == Self::CAPACITY {
            self.rules.remove(0);
        }
        self.rules.push(Rule { kind, value });
    }

    pub fn get(&self, kind: RuleKind) -> Option<&Value> {
        self.rules.iter().find(|r| r.kind == kind).map(|r| &r.value)
    }

    pub fn has(&self, kind: RuleKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn remove(&mut self, kind: RuleKind) {
        self.rules.retain(|r| r.kind != kind);
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Frame components declared up front; any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeclaredFrame {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl DeclaredFrame {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: Some(rect.origin.x),
            y: Some(rect.origin.y),
            width: Some(rect.size.x),
            height: Some(rect.size.y),
        }
    }

    pub fn origin(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn extent(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CachedFrame {
    pub revision: u64,
    pub local: Rect,
    pub absolute: Rect,
}

/// Mutable layout record of one node.
///
/// Setters only ever touch this placeholder; other placeholders are
/// referenced by [`NodeId`] and read at resolution time.
#[derive(Debug)]
pub struct Placeholder<K> {
    id: NodeId,
    key: Option<K>,
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    declared: DeclaredFrame,
    horizontal: AxisRules,
    vertical: AxisRules,
    multiplier: f32,
    pub(crate) cache: Cell<Option<CachedFrame>>,
}

impl<K> Placeholder<K> {
    pub(crate) fn root(frame: Rect, multiplier: f32) -> Self {
        Self {
            id: NodeId::ROOT,
            key: None,
            tag: "Root".to_string(),
            parent: None,
            children: Vec::new(),
            declared: DeclaredFrame::from_rect(frame),
            horizontal: AxisRules::default(),
            vertical: AxisRules::default(),
            multiplier,
            cache: Cell::new(None),
        }
    }

    /// Builds the placeholder for `description`; declared frame and lengths
    /// are scaled by `multiplier`. Children are linked by the container.
    pub(crate) fn from_description(
        id: NodeId,
        parent: NodeId,
        description: &NodeDescription<K>,
        multiplier: f32,
    ) -> Self
    where
        K: Clone,
    {
        let declared = description
            .frame
            .map(|frame| DeclaredFrame::from_rect(frame.scaled(multiplier)))
            .unwrap_or_default();

        let mut placeholder = Self {
            id,
            key: description.key.clone(),
            tag: description.tag.clone(),
            parent: Some(parent),
            children: Vec::new(),
            declared,
            horizontal: AxisRules::default(),
            vertical: AxisRules::default(),
            multiplier,
            cache: Cell::new(None),
        };

        if let Some(width) = description.width {
            placeholder.set_width(width);
        }
        if let Some(height) = description.height {
            placeholder.set_height(height);
        }
        placeholder
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn declared_frame(&self) -> &DeclaredFrame {
        &self.declared
    }

    pub fn rules(&self, axis: Axis) -> &AxisRules {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn rules_mut(&mut self, axis: Axis) -> &mut AxisRules {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    fn set_rule(&mut self, axis: Axis, kind: RuleKind, value: Value) -> &mut Self {
        let value = value.scaled(self.multiplier);
        self.rules_mut(axis).set(kind, value);
        self
    }

    pub fn set_width(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_rule(Axis::Horizontal, RuleKind::Size, value.into())
    }

    pub fn set_height(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_rule(Axis::Vertical, RuleKind::Size, value.into())
    }

    pub fn set_size(&mut self, width: impl Into<Value>, height: impl Into<Value>) -> &mut Self {
        self.set_width(width).set_height(height)
    }

    /// Positions one edge or center line, in parent coordinates.
    pub fn set_edge(&mut self, edge: Edge, value: impl Into<Value>) -> &mut Self {
        let (axis, kind) = RuleKind::for_edge(edge);
        self.set_rule(axis, kind, value.into())
    }

    pub fn set_left(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_edge(Edge::Left, value)
    }

    pub fn set_right(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_edge(Edge::Right, value)
    }

    pub fn set_top(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_edge(Edge::Top, value)
    }

    pub fn set_bottom(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_edge(Edge::Bottom, value)
    }

    pub fn set_center_x(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_edge(Edge::CenterX, value)
    }

    pub fn set_center_y(&mut self, value: impl Into<Value>) -> &mut Self {
        self.set_edge(Edge::CenterY, value)
    }

    /// Drops the pending rules of `axis`, falling back to the declared frame.
    pub fn clear_constraints(&mut self, axis: Axis) -> &mut Self {
        self.rules_mut(axis).clear();
        self
    }

    pub fn relate(&mut self, relation: Relation, target: NodeId, insets: EdgeInsets) -> &mut Self {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            match relation.plan(axis) {
                AxisPlan::Untouched => {}
                AxisPlan::Stretch => {
                    let (start, end) = axis_edges(axis);
                    self.rules_mut(axis).clear();
                    self.pin_to(start, target, start, insets);
                    self.pin_to(end, target, end, insets);
                }
                AxisPlan::Hug { anchored } => {
                    let sized = self.rules(axis).has(RuleKind::Size) || self.declared.extent(axis).is_some();
                    if !sized {
                        let far = opposite(anchored);
                        self.pin_to(far, target, far, insets);
                    }
                    self.pin_to(anchored, target, anchored, insets);
                }
                AxisPlan::Pin { own, target: target_edge } => {
                    self.pin_to(own, target, target_edge, insets);
                }
                AxisPlan::Center => {
                    let center = center_edge(axis);
                    self.pin_to(center, target, center, insets);
                }
            }
        }
        self
    }

    fn pin_to(&mut self, own: Edge, target: NodeId, target_edge: Edge, insets: EdgeInsets) {
        let inset = match own {
            Edge::Left | Edge::Top => insets.for_edge(own),
            Edge::Right | Edge::Bottom => -insets.for_edge(own),
            Edge::CenterX | Edge::CenterY => 0.0,
        };
        let value = if inset == 0.0 {
            Value::Edge(Anchor::new(target, target_edge))
        } else {
            Anchor::new(target, target_edge) + Value::Fixed(inset)
        };
        self.set_edge(own, value);
    }

    pub fn cover_left(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::CoverLeft, target, EdgeInsets::ZERO)
    }

    pub fn cover_left_inset(&mut self, target: NodeId, insets: EdgeInsets) -> &mut Self {
        self.relate(Relation::CoverLeft, target, insets)
    }

    pub fn cover_right(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::CoverRight, target, EdgeInsets::ZERO)
    }

    pub fn cover_right_inset(&mut self, target: NodeId, insets: EdgeInsets) -> &mut Self {
        self.relate(Relation::CoverRight, target, insets)
    }

    pub fn as_header(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::Header, target, EdgeInsets::ZERO)
    }

    pub fn as_header_inset(&mut self, target: NodeId, insets: EdgeInsets) -> &mut Self {
        self.relate(Relation::Header, target, insets)
    }

    pub fn as_footer(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::Footer, target, EdgeInsets::ZERO)
    }

    pub fn as_footer_inset(&mut self, target: NodeId, insets: EdgeInsets) -> &mut Self {
        self.relate(Relation::Footer, target, insets)
    }

    pub fn fill(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::Fill, target, EdgeInsets::ZERO)
    }

    pub fn fill_inset(&mut self, target: NodeId, insets: EdgeInsets) -> &mut Self {
        self.relate(Relation::Fill, target, insets)
    }

    pub fn fill_horizontally(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::FillHorizontally, target, EdgeInsets::ZERO)
    }

    pub fn fill_vertically(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::FillVertically, target, EdgeInsets::ZERO)
    }

    pub fn center_in(&mut self, target: NodeId) -> &mut Self {
        self.relate(Relation::Center, target, EdgeInsets::ZERO)
    }

    pub fn below(&mut self, target: NodeId, spacing: f32) -> &mut Self {
        self.relate(Relation::Below, target, EdgeInsets::new(spacing, 0.0, 0.0, 0.0))
    }

    pub fn above(&mut self, target: NodeId, spacing: f32) -> &mut Self {
        self.relate(Relation::Above, target, EdgeInsets::new(0.0, 0.0, spacing, 0.0))
    }

    pub fn left_of(&mut self, target: NodeId, spacing: f32) -> &mut Self {
        self.relate(Relation::LeftOf, target, EdgeInsets::new(0.0, 0.0, 0.0, spacing))
    }

    pub fn right_of(&mut self, target: NodeId, spacing: f32) -> &mut Self {
        self.relate(Relation::RightOf, target, EdgeInsets::new(0.0, spacing, 0.0, 0.0))
    }
}
