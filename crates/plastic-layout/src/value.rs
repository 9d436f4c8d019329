// crates/plastic-layout/src/value.rs

//! Relative values.
//!
//! A [`Value`] is an unresolved expression: a fixed length, a fraction of
//! the parent extent, an edge or extent of another placeholder, or a
//! combination of those. Expressions are only evaluated by the resolver, so
//! offsets can be chained freely before any frame is known.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use plastic_core::{Axis, Edge, Length};

/// Stable index of a placeholder inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An edge (or center line) of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub node: NodeId,
    pub edge: Edge,
}

impl Anchor {
    pub fn new(node: NodeId, edge: Edge) -> Self {
        Self { node, edge }
    }

    pub fn left(node: NodeId) -> Self {
        Self::new(node, Edge::Left)
    }

    pub fn right(node: NodeId) -> Self {
        Self::new(node, Edge::Right)
    }

    pub fn top(node: NodeId) -> Self {
        Self::new(node, Edge::Top)
    }

    pub fn bottom(node: NodeId) -> Self {
        Self::new(node, Edge::Bottom)
    }

    pub fn center_x(node: NodeId) -> Self {
        Self::new(node, Edge::CenterX)
    }

    pub fn center_y(node: NodeId) -> Self {
        Self::new(node, Edge::CenterY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Design units, multiplied by the container multiplier when stored
    Fixed(f32),
    /// Output units
    Device(f32),
    /// Fraction of the parent extent along the resolved axis
    Percent(f32),
    /// Position of another placeholder's edge
    Edge(Anchor),
    /// Width or height of another placeholder
    Extent(NodeId, Axis),
    Sum(Vec<Value>),
    Scale(Box<Value>, f32),
}

impl Value {
    pub fn width_of(node: NodeId) -> Self {
        Value::Extent(node, Axis::Horizontal)
    }

    pub fn height_of(node: NodeId) -> Self {
        Value::Extent(node, Axis::Vertical)
    }

    /// Replaces every design-unit term with its output-unit equivalent.
    pub fn scaled(self, multiplier: f32) -> Value {
        match self {
            Value::Fixed(v) => Value::Device(v * multiplier),
            Value::Sum(terms) => Value::Sum(terms.into_iter().map(|t| t.scaled(multiplier)).collect()),
            Value::Scale(inner, factor) => Value::Scale(Box::new(inner.scaled(multiplier)), factor),
            other => other,
        }
    }

    /// Placeholders this expression reads from.
    pub fn references(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<NodeId>) {
        match self {
            Value::Edge(anchor) => out.push(anchor.node),
            Value::Extent(node, _) => out.push(*node),
            Value::Sum(terms) => terms.iter().for_each(|t| t.collect_references(out)),
            Value::Scale(inner, _) => inner.collect_references(out),
            Value::Fixed(_) | Value::Device(_) | Value::Percent(_) => {}
        }
    }
}

impl From<Length> for Value {
    fn from(length: Length) -> Self {
        match length {
            Length::Fixed(v) => Value::Fixed(v),
            Length::Device(v) => Value::Device(v),
            Length::Percent(p) => Value::Percent(p),
        }
    }
}

impl From<Anchor> for Value {
    fn from(anchor: Anchor) -> Self {
        Value::Edge(anchor)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Fixed(v)
    }
}

impl<T: Into<Value>> Add<T> for Value {
    type Output = Value;

    fn add(self, rhs: T) -> Value {
        let rhs: Value = rhs.into();
        let mut terms = match self {
            Value::Sum(terms) => terms,
            other => vec![other],
        };
        match rhs {
            Value::Sum(more) => terms.extend(more),
            other => terms.push(other),
        }
        Value::Sum(terms)
    }
}

impl<T: Into<Value>> Add<T> for Anchor {
    type Output = Value;

    fn add(self, rhs: T) -> Value {
        Value::from(self) + rhs
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        self * -1.0
    }
}

impl<T: Into<Value>> Sub<T> for Value {
    type Output = Value;

    fn sub(self, rhs: T) -> Value {
        let rhs: Value = rhs.into();
        self + (-rhs)
    }
}

impl<T: Into<Value>> Sub<T> for Anchor {
    type Output = Value;

    fn sub(self, rhs: T) -> Value {
        Value::from(self) - rhs
    }
}

impl Mul<f32> for Value {
    type Output = Value;

    fn mul(self, factor: f32) -> Value {
        match self {
            Value::Scale(inner, f) => Value::Scale(inner, f * factor),
            other => Value::Scale(Box::new(other), factor),
        }
    }
}
