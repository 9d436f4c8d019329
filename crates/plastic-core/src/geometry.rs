// crates/plastic-core/src/geometry.rs
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

/// Named edge or center line of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
    CenterX,
    CenterY,
}

impl Edge {
    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right | Edge::CenterX => Axis::Horizontal,
            Edge::Top | Edge::Bottom | Edge::CenterY => Axis::Vertical,
        }
    }
}

/// Axis-aligned rectangle: origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect { origin: Vec2::ZERO, size: Vec2::ZERO };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn mid_x(&self) -> f32 {
        self.origin.x + self.size.x * 0.5
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn mid_y(&self) -> f32 {
        self.origin.y + self.size.y * 0.5
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn edge(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.min_x(),
            Edge::Right => self.max_x(),
            Edge::Top => self.min_y(),
            Edge::Bottom => self.max_y(),
            Edge::CenterX => self.mid_x(),
            Edge::CenterY => self.mid_y(),
        }
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        axis.component(self.size)
    }

    pub fn start(&self, axis: Axis) -> f32 {
        axis.component(self.origin)
    }

    /// Multiplies all four components.
    pub fn scaled(&self, multiplier: f32) -> Rect {
        Rect {
            origin: self.origin * multiplier,
            size: self.size * multiplier,
        }
    }

    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }
}

/// Distances to shrink a target rectangle by when relating to it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets { top: 0.0, left: 0.0, bottom: 0.0, right: 0.0 };

    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self { top, left, bottom, right }
    }

    pub fn uniform(amount: f32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Inset applied on the given edge; center lines are never inset.
    pub fn for_edge(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::CenterX | Edge::CenterY => 0.0,
        }
    }
}
