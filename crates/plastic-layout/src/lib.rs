// crates/plastic-layout/src/lib.rs

//! Plastic: relative layout over a tree of placeholders.
//!
//! A [`ViewsContainer`] is built from a description tree, a root frame and a
//! multiplier. Placeholders are then constrained relative to each other
//! (`cover_right`, `as_header`, fixed or relative sizes, ...) and frames are
//! resolved lazily when read.
//!
//! ```
//! use plastic_core::{NodeDescription, Rect};
//! use plastic_layout::ViewsContainer;
//!
//! let tree = vec![NodeDescription::new().key("sidebar")];
//! let mut container = ViewsContainer::new(Rect::new(0.0, 0.0, 1000.0, 800.0), &tree, 1.0).unwrap();
//! let root = container.root();
//!
//! container.get_mut(&"sidebar").unwrap().cover_right(root).set_width(300.0);
//!
//! let sidebar = container.id_of(&"sidebar").unwrap();
//! assert_eq!(container.frame(sidebar).unwrap(), Rect::new(700.0, 0.0, 300.0, 800.0));
//! ```

use plastic_core::{Axis, Edge, PlasticError, Rect};

pub mod value;
pub mod placeholder;
pub mod container;
pub mod scene;
mod resolver;

pub use value::*;
pub use placeholder::*;
pub use container::*;
pub use scene::*;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Constraint cycle: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("Unresolved {axis:?} layout for {node}")]
    Unresolved { node: String, axis: Axis },

    #[error("Edge {edge:?} cannot position the {axis:?} axis of {node}")]
    AxisMismatch { node: String, edge: Edge, axis: Axis },

    #[error("Non-finite frame for {node}: {frame:?}")]
    NonFinite { node: String, frame: Rect },

    #[error(transparent)]
    Description(#[from] PlasticError),
}

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
