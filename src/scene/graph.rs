//! Node arena with parent/child nesting, name lookup and hit testing

use std::collections::HashMap;

use glam::{Affine2, Vec2};

use super::node::{Node, NodeId};
use crate::error::{SceneError, SceneResult};

/// Name of the implicit root node every scene hangs off
pub const ROOT_NAME: &str = "scene";

/// Axis-aligned rectangle in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// The scene's node tree
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeId>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            by_name: HashMap::new(),
        };
        let root = NodeId(0);
        graph.nodes.push(Node::new(ROOT_NAME));
        graph.by_name.insert(ROOT_NAME.to_owned(), root);
        graph
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Add a node under `parent` (the root when `None`)
    pub fn add(&mut self, node: Node, parent: Option<NodeId>) -> SceneResult<NodeId> {
        if self.by_name.contains_key(&node.name) {
            return Err(SceneError::DuplicateNode(node.name));
        }
        let id = NodeId(self.nodes.len() as u32);
        let parent = parent.unwrap_or(self.root());
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        self.attach(id, parent);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Look up a node the scene cannot run without
    pub fn require(&self, scene: &'static str, name: &str) -> SceneResult<NodeId> {
        self.find(name).ok_or_else(|| SceneError::MissingNode {
            scene,
            name: name.to_owned(),
        })
    }

    /// Like [`Self::require`] but the node must sit somewhere under `parent`
    pub fn require_in(&self, scene: &'static str, parent: NodeId, name: &str) -> SceneResult<NodeId> {
        self.find_in(parent, name).ok_or_else(|| SceneError::MissingNode {
            scene,
            name: name.to_owned(),
        })
    }

    /// Find `name` among the descendants of `parent`
    pub fn find_in(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        let id = self.find(name)?;
        let mut cursor = self.node(id).parent;
        while let Some(p) = cursor {
            if p == parent {
                return Some(id);
            }
            cursor = self.node(p).parent;
        }
        None
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    fn attach(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(id);
    }

    /// Detach a node (and its subtree) from the scene
    pub fn remove_from_parent(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != id);
        }
    }

    /// Whether the node is still reachable from the root
    pub fn is_in_scene(&self, id: NodeId) -> bool {
        let mut cursor = id;
        loop {
            if cursor == self.root() {
                return true;
            }
            match self.node(cursor).parent {
                Some(p) => cursor = p,
                None => return false,
            }
        }
    }

    /// Hidden if the node or any ancestor is hidden
    pub fn is_effectively_hidden(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            let node = self.node(c);
            if node.hidden {
                return true;
            }
            cursor = node.parent;
        }
        false
    }

    /// Scene-space transform of the node
    pub fn world_transform(&self, id: NodeId) -> Affine2 {
        let node = self.node(id);
        match node.parent {
            Some(parent) => self.world_transform(parent) * node.local_transform(),
            None => node.local_transform(),
        }
    }

    /// Scene-space position of the node's anchor
    pub fn world_position(&self, id: NodeId) -> Vec2 {
        match self.node(id).parent {
            Some(parent) => self
                .world_transform(parent)
                .transform_point2(self.node(id).position),
            None => self.node(id).position,
        }
    }

    /// Convert a scene-space point into `id`'s child coordinate space
    pub fn convert_to_local(&self, point: Vec2, id: NodeId) -> Vec2 {
        self.world_transform(id).inverse().transform_point2(point)
    }

    /// Accumulated z used for draw order and hit priority
    pub fn world_z(&self, id: NodeId) -> f32 {
        let mut z = 0.0;
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            z += self.node(c).z_position;
            cursor = self.node(c).parent;
        }
        z
    }

    /// Move a node under a new parent without changing where it is on screen.
    ///
    /// Detaches first, converts the world position into the new parent's
    /// space, then attaches. Callers set local scale/rotation afterwards.
    pub fn reparent_keep_world(&mut self, id: NodeId, new_parent: NodeId) {
        let world = self.world_position(id);
        self.remove_from_parent(id);
        let local = self.convert_to_local(world, new_parent);
        self.attach(id, new_parent);
        self.nodes[id.index()].position = local;
    }

    /// World-space bounds of the node's sprite rectangle scaled by `shrink`
    pub fn world_bounds(&self, id: NodeId, shrink: Vec2) -> Bounds {
        let half = self.node(id).size * shrink * 0.5;
        let transform = self.world_transform(id);
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|c| transform.transform_point2(c));
        Bounds::from_points(&corners)
    }

    /// Whether a scene-space point falls inside the node's sprite rectangle
    pub fn contains_point(&self, id: NodeId, point: Vec2) -> bool {
        let node = self.node(id);
        if node.size == Vec2::ZERO {
            return false;
        }
        let local = self.world_transform(id).inverse().transform_point2(point);
        let half = node.size * 0.5;
        local.x.abs() <= half.x && local.y.abs() <= half.y
    }

    /// All visible in-scene nodes under `point`, topmost first
    pub fn nodes_at(&self, point: Vec2) -> Vec<NodeId> {
        let mut hits: Vec<NodeId> = self
            .ids()
            .filter(|id| *id != self.root())
            .filter(|id| self.is_in_scene(*id) && !self.is_effectively_hidden(*id))
            .filter(|id| self.contains_point(*id, point))
            .collect();
        hits.sort_by(|a, b| {
            self.world_z(*b)
                .partial_cmp(&self.world_z(*a))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.cmp(a))
        });
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(name: &str, pos: Vec2, size: Vec2) -> Node {
        let mut node = Node::new(name);
        node.position = pos;
        node.size = size;
        node
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut graph = SceneGraph::new();
        graph.add(Node::new("fly"), None).unwrap();
        let err = graph.add(Node::new("fly"), None).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateNode(name) if name == "fly"));
    }

    #[test]
    fn test_nested_world_position() {
        let mut graph = SceneGraph::new();
        let mut razor = sprite("razor", Vec2::new(100.0, 50.0), Vec2::new(40.0, 120.0));
        razor.scale = Vec2::splat(2.0);
        let razor = graph.add(razor, None).unwrap();
        let top = graph
            .add(sprite("razor_top", Vec2::new(0.0, 30.0), Vec2::new(40.0, 20.0)), Some(razor))
            .unwrap();
        assert_eq!(graph.world_position(top), Vec2::new(100.0, 110.0));
        assert_eq!(graph.find_in(razor, "razor_top"), Some(top));
        assert_eq!(graph.find_in(top, "razor"), None);
    }

    #[test]
    fn test_reparent_keeps_world_position() {
        let mut graph = SceneGraph::new();
        let mut razor = sprite("razor", Vec2::new(100.0, 50.0), Vec2::new(40.0, 120.0));
        razor.rotation = std::f32::consts::FRAC_PI_2;
        razor.scale = Vec2::splat(0.5);
        let razor = graph.add(razor, None).unwrap();
        let fly = graph
            .add(sprite("fly", Vec2::new(80.0, 90.0), Vec2::new(20.0, 20.0)), None)
            .unwrap();

        graph.reparent_keep_world(fly, razor);
        assert_eq!(graph.node(fly).parent(), Some(razor));
        assert!(graph.node(razor).children().contains(&fly));
        let world = graph.world_position(fly);
        assert!((world - Vec2::new(80.0, 90.0)).length() < 1e-3);
        // Local space is rotated and scaled
        assert!((graph.node(fly).position - Vec2::new(80.0, 40.0)).length() < 1e-3);
    }

    #[test]
    fn test_require_reports_missing_node() {
        let mut graph = SceneGraph::new();
        let razor = graph.add(Node::new("razor"), None).unwrap();
        graph.add(Node::new("comb"), None).unwrap();
        assert_eq!(graph.require("bath", "razor").unwrap(), razor);
        let err = graph.require_in("bath", razor, "comb").unwrap_err();
        assert!(matches!(err, SceneError::MissingNode { scene: "bath", name } if name == "comb"));
    }

    #[test]
    fn test_removed_nodes_leave_scene() {
        let mut graph = SceneGraph::new();
        let bandage = graph
            .add(sprite("bandage", Vec2::ZERO, Vec2::splat(10.0)), None)
            .unwrap();
        assert!(graph.is_in_scene(bandage));
        graph.remove_from_parent(bandage);
        assert!(!graph.is_in_scene(bandage));
        assert!(graph.nodes_at(Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_hit_test_orders_by_z() {
        let mut graph = SceneGraph::new();
        let mut cup = sprite("cup", Vec2::ZERO, Vec2::splat(50.0));
        cup.z_position = 1.0;
        let cup = graph.add(cup, None).unwrap();
        let mut brush = sprite("brush", Vec2::new(5.0, 0.0), Vec2::splat(50.0));
        brush.z_position = 3.0;
        let brush = graph.add(brush, None).unwrap();
        let mut hidden = sprite("hidden", Vec2::ZERO, Vec2::splat(50.0));
        hidden.hidden = true;
        graph.add(hidden, None).unwrap();

        assert_eq!(graph.nodes_at(Vec2::new(1.0, 1.0)), vec![brush, cup]);
        assert!(graph.nodes_at(Vec2::new(100.0, 0.0)).is_empty());
    }
}
