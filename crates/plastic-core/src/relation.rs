// crates/plastic-core/src/relation.rs
use serde::{Deserialize, Serialize};

use crate::{Axis, Edge};

/// Positional rules linking a node to a target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Same vertical span as the target, hugging its left edge
    CoverLeft,
    /// Same vertical span as the target, hugging its right edge
    CoverRight,
    /// Same horizontal span as the target, hugging its top edge
    Header,
    /// Same horizontal span as the target, hugging its bottom edge
    Footer,
    Fill,
    FillHorizontally,
    FillVertically,
    /// Center lines match the target's, size untouched
    Center,
    Below,
    Above,
    LeftOf,
    RightOf,
}

/// What a relation does to one axis of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPlan {
    Untouched,
    /// Both edges follow the target; any size rule on the axis is dropped.
    Stretch,
    /// Both edges follow the target unless the node already has a size on
    /// the axis (a size rule or a declared frame), in which case only
    /// `anchored` is pinned. `anchored` is always pinned last.
    Hug { anchored: Edge },
    /// One own edge follows one target edge.
    Pin { own: Edge, target: Edge },
    /// Own center line follows the target's.
    Center,
}

impl Relation {
    pub fn plan(self, axis: Axis) -> AxisPlan {
        use AxisPlan::*;

        match (self, axis) {
            (Relation::CoverLeft, Axis::Horizontal) => Hug { anchored: Edge::Left },
            (Relation::CoverRight, Axis::Horizontal) => Hug { anchored: Edge::Right },
            (Relation::CoverLeft | Relation::CoverRight, Axis::Vertical) => Stretch,

            (Relation::Header, Axis::Vertical) => Hug { anchored: Edge::Top },
            (Relation::Footer, Axis::Vertical) => Hug { anchored: Edge::Bottom },
            (Relation::Header | Relation::Footer, Axis::Horizontal) => Stretch,

            (Relation::Fill, _) => Stretch,
            (Relation::FillHorizontally, Axis::Horizontal) => Stretch,
            (Relation::FillVertically, Axis::Vertical) => Stretch,
            (Relation::FillHorizontally | Relation::FillVertically, _) => Untouched,

            (Relation::Center, _) => Center,

            (Relation::Below, Axis::Vertical) => Pin { own: Edge::Top, target: Edge::Bottom },
            (Relation::Above, Axis::Vertical) => Pin { own: Edge::Bottom, target: Edge::Top },
            (Relation::LeftOf, Axis::Horizontal) => Pin { own: Edge::Right, target: Edge::Left },
            (Relation::RightOf, Axis::Horizontal) => Pin { own: Edge::Left, target: Edge::Right },
            (Relation::Below | Relation::Above | Relation::LeftOf | Relation::RightOf, _) => Untouched,
        }
    }
}

/// Start and end edges of an axis.
pub fn axis_edges(axis: Axis) -> (Edge, Edge) {
    match axis {
        Axis::Horizontal => (Edge::Left, Edge::Right),
        Axis::Vertical => (Edge::Top, Edge::Bottom),
    }
}

pub fn center_edge(axis: Axis) -> Edge {
    match axis {
        Axis::Horizontal => Edge::CenterX,
        Axis::Vertical => Edge::CenterY,
    }
}

/// The edge facing `edge` on the same axis.
pub fn opposite(edge: Edge) -> Edge {
    match edge {
        Edge::Left => Edge::Right,
        Edge::Right => Edge::Left,
        Edge::Top => Edge::Bottom,
        Edge::Bottom => Edge::Top,
        Edge::CenterX => Edge::CenterX,
        Edge::CenterY => Edge::CenterY,
    }
}
