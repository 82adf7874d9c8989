//! Overlap tracking between trigger bodies
//!
//! Every tick the world compares all body pairs that test against each
//! other and reports which pairs started or stopped touching. Only bodies
//! on visible nodes that are still in the scene take part.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::{BodyShape, Contact, ContactCategory, PhysicsBody};
use crate::scene::{Bounds, NodeId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Begin(Contact),
    End(Contact),
}

/// Scene-space footprint of a body
#[derive(Debug, Clone, Copy)]
enum Footprint {
    Rect(Bounds),
    Circle { center: Vec2, radius: f32 },
}

impl Footprint {
    fn overlaps(&self, other: &Footprint) -> bool {
        match (self, other) {
            (Footprint::Rect(a), Footprint::Rect(b)) => a.overlaps(b),
            (Footprint::Circle { center, radius }, Footprint::Rect(rect))
            | (Footprint::Rect(rect), Footprint::Circle { center, radius }) => {
                let closest = center.clamp(rect.min, rect.max);
                closest.distance_squared(*center) <= radius * radius
            }
            (
                Footprint::Circle {
                    center: ca,
                    radius: ra,
                },
                Footprint::Circle {
                    center: cb,
                    radius: rb,
                },
            ) => ca.distance(*cb) <= ra + rb,
        }
    }
}

/// All trigger bodies of one scene
#[derive(Debug)]
pub struct ContactWorld<C> {
    bodies: BTreeMap<NodeId, PhysicsBody<C>>,
    touching: BTreeSet<(NodeId, NodeId)>,
}

impl<C: ContactCategory> Default for ContactWorld<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ContactCategory> ContactWorld<C> {
    pub fn new() -> Self {
        Self {
            bodies: BTreeMap::new(),
            touching: BTreeSet::new(),
        }
    }

    pub fn attach(&mut self, node: NodeId, body: PhysicsBody<C>) {
        self.bodies.insert(node, body);
    }

    pub fn body(&self, node: NodeId) -> Option<&PhysicsBody<C>> {
        self.bodies.get(&node)
    }

    /// Drop a body; ongoing contacts end silently
    pub fn remove_body(&mut self, node: NodeId) {
        self.bodies.remove(&node);
        self.touching.retain(|(a, b)| *a != node && *b != node);
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Whether the pair was touching as of the last step
    pub fn is_contacting(&self, a: NodeId, b: NodeId) -> bool {
        self.touching.contains(&(a.min(b), a.max(b)))
    }

    /// Instantaneous overlap test, independent of the last step
    pub fn overlaps_now(&self, graph: &SceneGraph, a: NodeId, b: NodeId) -> bool {
        match (self.footprint(graph, a), self.footprint(graph, b)) {
            (Some(fa), Some(fb)) => fa.overlaps(&fb),
            _ => false,
        }
    }

    fn footprint(&self, graph: &SceneGraph, node: NodeId) -> Option<Footprint> {
        let body = self.bodies.get(&node)?;
        if !graph.is_in_scene(node) || graph.is_effectively_hidden(node) {
            return None;
        }
        let transform = graph.world_transform(node);
        Some(match body.shape {
            BodyShape::Rect { size } => {
                let half = size * 0.5;
                let corners = [
                    Vec2::new(-half.x, -half.y),
                    Vec2::new(half.x, -half.y),
                    Vec2::new(half.x, half.y),
                    Vec2::new(-half.x, half.y),
                ]
                .map(|c| transform.transform_point2(c));
                Footprint::Rect(Bounds::from_points(&corners))
            }
            BodyShape::Circle { radius } => {
                let scale = transform.matrix2.x_axis.length();
                Footprint::Circle {
                    center: transform.translation,
                    radius: radius * scale,
                }
            }
        })
    }

    fn contact(&self, a: NodeId, b: NodeId) -> Option<Contact> {
        let body_a = self.bodies.get(&a)?;
        let body_b = self.bodies.get(&b)?;
        Some(Contact::new(
            a,
            body_a.category.mask(),
            b,
            body_b.category.mask(),
        ))
    }

    /// Recompute overlaps and report changes, ends before begins
    pub fn step(&mut self, graph: &SceneGraph) -> Vec<ContactEvent> {
        let footprints: Vec<(NodeId, Footprint)> = self
            .bodies
            .keys()
            .filter_map(|id| self.footprint(graph, *id).map(|f| (*id, f)))
            .collect();

        let mut now = BTreeSet::new();
        for (i, (a, fa)) in footprints.iter().enumerate() {
            for (b, fb) in &footprints[i + 1..] {
                let (Some(body_a), Some(body_b)) = (self.bodies.get(a), self.bodies.get(b)) else {
                    continue;
                };
                if body_a.tests_against(body_b) && fa.overlaps(fb) {
                    now.insert((*a, *b));
                }
            }
        }

        let mut events = Vec::new();
        for (a, b) in self.touching.difference(&now) {
            if let Some(contact) = self.contact(*a, *b) {
                events.push(ContactEvent::End(contact));
            }
        }
        for (a, b) in now.difference(&self.touching) {
            if let Some(contact) = self.contact(*a, *b) {
                events.push(ContactEvent::Begin(contact));
            }
        }
        self.touching = now;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u32)]
    enum Probe {
        Lens = 1 << 0,
        Light = 1 << 1,
        Wall = 1 << 2,
    }

    impl ContactCategory for Probe {
        const ALL: &'static [Self] = &[Probe::Lens, Probe::Light, Probe::Wall];

        fn mask(self) -> u32 {
            self as u32
        }
    }

    fn at(graph: &mut SceneGraph, name: &str, x: f32, y: f32) -> NodeId {
        let mut node = Node::new(name);
        node.position = Vec2::new(x, y);
        graph.add(node, None).unwrap()
    }

    #[test]
    fn test_begin_then_end() {
        let mut graph = SceneGraph::new();
        let lens = at(&mut graph, "lens", 0.0, 0.0);
        let light = at(&mut graph, "light", 300.0, 0.0);
        let mut world = ContactWorld::new();
        world.attach(lens, PhysicsBody::rect(Vec2::splat(10.0), &[Probe::Light], Probe::Lens));
        world.attach(light, PhysicsBody::circle(150.0, &[Probe::Lens], Probe::Light));

        assert!(world.step(&graph).is_empty());

        graph.node_mut(light).position.x = 100.0;
        let events = world.step(&graph);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ContactEvent::Begin(c) if c.involves(lens) && c.involves(light)));
        assert!(world.is_contacting(light, lens));

        // Still touching: no new event
        assert!(world.step(&graph).is_empty());

        graph.node_mut(light).position.x = 400.0;
        let events = world.step(&graph);
        assert!(matches!(events.as_slice(), [ContactEvent::End(_)]));
        assert!(!world.is_contacting(lens, light));
    }

    #[test]
    fn test_pairs_without_interest_never_report() {
        let mut graph = SceneGraph::new();
        let lens = at(&mut graph, "lens", 0.0, 0.0);
        let wall = at(&mut graph, "wall", 0.0, 0.0);
        let mut world = ContactWorld::new();
        world.attach(lens, PhysicsBody::rect(Vec2::splat(10.0), &[Probe::Light], Probe::Lens));
        world.attach(wall, PhysicsBody::rect(Vec2::splat(10.0), &[], Probe::Wall));
        assert!(world.step(&graph).is_empty());
        assert!(world.overlaps_now(&graph, lens, wall));
    }

    #[test]
    fn test_hidden_and_removed_nodes_drop_out() {
        let mut graph = SceneGraph::new();
        let lens = at(&mut graph, "lens", 0.0, 0.0);
        let light = at(&mut graph, "light", 0.0, 0.0);
        let mut world = ContactWorld::new();
        world.attach(lens, PhysicsBody::rect(Vec2::splat(10.0), &[Probe::Light], Probe::Lens));
        world.attach(light, PhysicsBody::circle(5.0, &[], Probe::Light));
        assert_eq!(world.step(&graph).len(), 1);

        graph.node_mut(light).hidden = true;
        assert!(matches!(world.step(&graph).as_slice(), [ContactEvent::End(_)]));

        graph.node_mut(light).hidden = false;
        assert_eq!(world.step(&graph).len(), 1);
        graph.remove_from_parent(lens);
        assert!(matches!(world.step(&graph).as_slice(), [ContactEvent::End(_)]));
    }

    #[test]
    fn test_nested_body_uses_world_transform() {
        let mut graph = SceneGraph::new();
        let razor = at(&mut graph, "razor", 100.0, 0.0);
        let mut top = Node::new("razor_top");
        top.position = Vec2::new(0.0, 50.0);
        let top = graph.add(top, Some(razor)).unwrap();
        let hair = at(&mut graph, "hair", 100.0, 50.0);
        let mut world = ContactWorld::new();
        world.attach(top, PhysicsBody::rect(Vec2::splat(4.0), &[Probe::Lens], Probe::Light));
        world.attach(hair, PhysicsBody::rect(Vec2::splat(4.0), &[], Probe::Lens));
        assert_eq!(world.step(&graph).len(), 1);
    }
}
