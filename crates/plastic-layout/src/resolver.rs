// crates/plastic-layout/src/resolver.rs

//! Demand-driven frame resolution.
//!
//! Reading a frame first resolves the node's parent and every placeholder
//! its rules reference. Dependencies are walked with an explicit work list,
//! so long relation chains never deepen the call stack. Results are memoized
//! per placeholder and stamped with the container revision; the in-progress
//! path turns reference cycles into errors.

use std::fmt::Debug;
use std::hash::Hash;

use plastic_core::{Axis, Rect};
use tracing::trace;

use crate::container::ViewsContainer;
use crate::placeholder::{CachedFrame, Placeholder, RuleKind};
use crate::value::{NodeId, Value};
use crate::{LayoutError, LayoutResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Resolved {
    pub local: Rect,
    pub absolute: Rect,
}

pub(crate) struct Resolver<'a, K> {
    container: &'a ViewsContainer<K>,
    /// Nodes waiting on their dependencies, outermost first
    path: Vec<NodeId>,
}

impl<'a, K> Resolver<'a, K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(container: &'a ViewsContainer<K>) -> Self {
        Self {
            container,
            path: Vec::new(),
        }
    }

    pub fn resolve(&mut self, id: NodeId) -> LayoutResult<Resolved> {
        if let Some(resolved) = self.cached(id) {
            return Ok(resolved);
        }

        let result = self.walk(id);
        if result.is_err() {
            self.path.clear();
        }
        result
    }

    fn cached(&self, id: NodeId) -> Option<Resolved> {
        let cached = self.container.node(id).ok()?.cache.get()?;
        (cached.revision == self.container.revision()).then_some(Resolved {
            local: cached.local,
            absolute: cached.absolute,
        })
    }

    /// Resolves `id` after everything it depends on, deepest dependency first.
    fn walk(&mut self, id: NodeId) -> LayoutResult<Resolved> {
        let container = self.container;
        // (node, dependencies already queued)
        let mut work = vec![(id, false)];
        let mut last = None;

        while let Some(&(current, expanded)) = work.last() {
            if let Some(resolved) = self.cached(current) {
                work.pop();
                last = Some(resolved);
                continue;
            }

            let node = container.node(current)?;
            if expanded {
                let resolved = self.compute(node)?;
                self.store(node, resolved);
                self.path.pop();
                work.pop();
                last = Some(resolved);
                continue;
            }

            self.path.push(current);
            if let Some(entry) = work.last_mut() {
                entry.1 = true;
            }

            for dependency in dependencies(node) {
                if self.cached(dependency).is_some() {
                    continue;
                }
                if let Some(position) = self.path.iter().position(|&n| n == dependency) {
                    let chain = self.path[position..]
                        .iter()
                        .chain(std::iter::once(&dependency))
                        .map(|&n| container.label(n))
                        .collect();
                    return Err(LayoutError::Cycle { chain });
                }
                work.push((dependency, false));
            }
        }

        last.ok_or(LayoutError::UnknownNode(id))
    }

    fn store(&self, node: &Placeholder<K>, resolved: Resolved) {
        node.cache.set(Some(CachedFrame {
            revision: self.container.revision(),
            local: resolved.local,
            absolute: resolved.absolute,
        }));
        trace!(
            "Resolved {}: frame={:?}, absolute={:?}",
            self.container.label(node.id()),
            resolved.local,
            resolved.absolute
        );
    }

    fn compute(&mut self, node: &Placeholder<K>) -> LayoutResult<Resolved> {
        // The root is positioned in root space, which has no extent of its own.
        let parent = match node.parent() {
            Some(parent) => self.resolve(parent)?.absolute,
            None => Rect::ZERO,
        };

        let (x, width) = self.resolve_axis(node, Axis::Horizontal, parent)?;
        let (y, height) = self.resolve_axis(node, Axis::Vertical, parent)?;

        let local = Rect::new(x, y, width, height);
        if !local.is_finite() {
            return Err(LayoutError::NonFinite {
                node: self.container.label(node.id()),
                frame: local,
            });
        }
        Ok(Resolved {
            local,
            absolute: local.translated(parent.origin),
        })
    }

    /// Local start and extent of `node` along `axis`.
    fn resolve_axis(&mut self, node: &Placeholder<K>, axis: Axis, parent: Rect) -> LayoutResult<(f32, f32)> {
        let mut start = None;
        let mut end = None;
        let mut center = None;
        let mut size = None;

        for rule in node.rules(axis).iter() {
            let value = self.value(node, axis, &rule.value, parent)?;
            match rule.kind {
                RuleKind::Start => start = Some(value),
                RuleKind::End => end = Some(value),
                RuleKind::Center => center = Some(value),
                RuleKind::Size => size = Some(value),
            }
        }

        let declared = *node.declared_frame();
        let require = |component: Option<f32>| {
            component.ok_or_else(|| LayoutError::Unresolved {
                node: self.container.label(node.id()),
                axis,
            })
        };

        let span = match (start, end, center, size) {
            (Some(s), _, _, Some(z)) => (s, z),
            (_, Some(e), _, Some(z)) => (e - z, z),
            (_, _, Some(c), Some(z)) => (c - z * 0.5, z),
            (Some(s), Some(e), _, _) => (s, e - s),
            (Some(s), None, Some(c), None) => (s, (c - s) * 2.0),
            (None, Some(e), Some(c), None) => {
                let z = (e - c) * 2.0;
                (e - z, z)
            }
            (Some(s), None, None, None) => (s, require(declared.extent(axis))?),
            (None, Some(e), None, None) => {
                let z = require(declared.extent(axis))?;
                (e - z, z)
            }
            (None, None, Some(c), None) => {
                let z = require(declared.extent(axis))?;
                (c - z * 0.5, z)
            }
            (None, None, None, Some(z)) => (require(declared.origin(axis))?, z),
            (None, None, None, None) => (require(declared.origin(axis))?, require(declared.extent(axis))?),
        };
        Ok(span)
    }

    /// Evaluates `value` in the parent coordinates of `node`.
    fn value(&mut self, node: &Placeholder<K>, axis: Axis, value: &Value, parent: Rect) -> LayoutResult<f32> {
        match value {
            Value::Fixed(v) | Value::Device(v) => Ok(*v),
            Value::Percent(p) => Ok(p * parent.extent(axis)),
            Value::Edge(anchor) => {
                if anchor.edge.axis() != axis {
                    return Err(LayoutError::AxisMismatch {
                        node: self.container.label(node.id()),
                        edge: anchor.edge,
                        axis,
                    });
                }
                let target = self.resolve(anchor.node)?.absolute;
                Ok(target.edge(anchor.edge) - parent.start(axis))
            }
            Value::Extent(target, target_axis) => Ok(self.resolve(*target)?.absolute.extent(*target_axis)),
            Value::Sum(terms) => {
                let mut total = 0.0;
                for term in terms {
                    total += self.value(node, axis, term, parent)?;
                }
                Ok(total)
            }
            Value::Scale(inner, factor) => Ok(self.value(node, axis, inner, parent)? * factor),
        }
    }
}

/// The parent and every placeholder referenced by a rule of `node`.
fn dependencies<K>(node: &Placeholder<K>) -> Vec<NodeId> {
    let mut dependencies: Vec<NodeId> = node.parent().into_iter().collect();
    for axis in [Axis::Horizontal, Axis::Vertical] {
        for rule in node.rules(axis).iter() {
            dependencies.extend(rule.value.references());
        }
    }
    dependencies
}
