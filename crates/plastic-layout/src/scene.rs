// crates/plastic-layout/src/scene.rs

//! Building containers from [`Scene`] documents.

use plastic_core::{Scene, SceneConstraint};
use tracing::debug;

use crate::container::ViewsContainer;
use crate::value::{Anchor, NodeId, Value};
use crate::{LayoutError, LayoutResult};

/// Builds the container described by `scene` and applies its constraints in
/// order. `multiplier` overrides the scene's own multiplier when given.
pub fn build_scene(scene: &Scene, multiplier: Option<f32>) -> LayoutResult<ViewsContainer<String>> {
    let multiplier = multiplier.unwrap_or(scene.multiplier);
    let mut container = ViewsContainer::new(scene.root_frame(), &scene.descriptions(), multiplier)?;

    for constraint in &scene.constraints {
        apply_constraint(&mut container, constraint)?;
    }

    debug!("Applied {} scene constraints", scene.constraints.len());
    Ok(container)
}

/// Applies one scene constraint. A missing target refers to the root.
pub fn apply_constraint(container: &mut ViewsContainer<String>, constraint: &SceneConstraint) -> LayoutResult<()> {
    let node = lookup(container, constraint.node())?;

    match constraint {
        SceneConstraint::Relation { relation, target, insets, .. } => {
            let target = target_id(container, target.as_deref())?;
            container.node_mut(node)?.relate(*relation, target, *insets);
        }
        SceneConstraint::Width { value, .. } => {
            container.node_mut(node)?.set_width(*value);
        }
        SceneConstraint::Height { value, .. } => {
            container.node_mut(node)?.set_height(*value);
        }
        SceneConstraint::Pin { edge, target, target_edge, offset, .. } => {
            let target = target_id(container, target.as_deref())?;
            let value = match offset {
                Some(offset) => Anchor::new(target, *target_edge) + *offset,
                None => Value::Edge(Anchor::new(target, *target_edge)),
            };
            container.node_mut(node)?.set_edge(*edge, value);
        }
    }
    Ok(())
}

fn lookup(container: &ViewsContainer<String>, key: &str) -> LayoutResult<NodeId> {
    container
        .id_of(&key.to_string())
        .ok_or_else(|| LayoutError::KeyNotFound(key.to_string()))
}

fn target_id(container: &ViewsContainer<String>, target: Option<&str>) -> LayoutResult<NodeId> {
    match target {
        Some(key) => lookup(container, key),
        None => Ok(container.root()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plastic_core::Rect;

    const SCENE: &str = r#"{
        "root": { "x": 0, "y": 0, "width": 1000, "height": 1000 },
        "nodes": [
            { "key": "One", "children": [ { "key": "Badge" } ] }
        ],
        "constraints": [
            { "op": "relation", "node": "One", "relation": "cover_right" },
            { "op": "width", "node": "One", "value": { "fixed": 400 } },
            { "op": "pin", "node": "Badge", "edge": "left", "target": "One", "target_edge": "left",
              "offset": { "fixed": 8 } },
            { "op": "pin", "node": "Badge", "edge": "top", "target": "One", "target_edge": "top" },
            { "op": "width", "node": "Badge", "value": { "percent": 0.25 } },
            { "op": "height", "node": "Badge", "value": { "device": 20 } }
        ]
    }"#;

    #[test]
    fn test_build_scene() {
        let scene = Scene::from_json(SCENE).unwrap();
        let container = build_scene(&scene, None).unwrap();

        let one = container.id_of(&"One".to_string()).unwrap();
        let badge = container.id_of(&"Badge".to_string()).unwrap();
        assert_eq!(container.frame(one).unwrap(), Rect::new(600.0, 0.0, 400.0, 1000.0));
        assert_eq!(container.frame(badge).unwrap(), Rect::new(8.0, 0.0, 100.0, 20.0));
        assert_eq!(container.absolute_frame(badge).unwrap(), Rect::new(608.0, 0.0, 100.0, 20.0));
    }

    #[test]
    fn test_multiplier_override() {
        let scene = Scene::from_json(SCENE).unwrap();
        let container = build_scene(&scene, Some(2.0)).unwrap();

        let one = container.id_of(&"One".to_string()).unwrap();
        assert_eq!(container.frame(one).unwrap(), Rect::new(1200.0, 0.0, 800.0, 2000.0));
    }

    #[test]
    fn test_unknown_constraint_node() {
        let mut scene = Scene::from_json(SCENE).unwrap();
        scene.constraints.push(SceneConstraint::Width {
            node: "Ghost".to_string(),
            value: plastic_core::Length::Fixed(1.0),
        });

        match build_scene(&scene, None) {
            Err(LayoutError::KeyNotFound(key)) => assert_eq!(key, "Ghost"),
            other => panic!("unexpected result: {:?}", other.map(|c| c.len())),
        }
    }
}
