//! Scene layout: the name-addressed asset contract
//!
//! A layout is a flat list of node specs (parents listed before their
//! children). Built-in layouts ship with each scene; hosts may load their
//! own from JSON as long as every required name is present.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::graph::SceneGraph;
use super::node::Node;
use crate::error::{SceneError, SceneResult};

fn one() -> Vec2 {
    Vec2::ONE
}

fn opaque() -> f32 {
    1.0
}

/// One node of a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub size: Vec2,
    #[serde(default = "one")]
    pub scale: Vec2,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "opaque")]
    pub alpha: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl NodeSpec {
    /// A visible sprite at `(x, y)` with size `(w, h)`
    pub fn sprite(name: impl Into<String>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            name: name.into(),
            parent: None,
            position: Vec2::new(x, y),
            size: Vec2::new(w, h),
            scale: Vec2::ONE,
            rotation: 0.0,
            alpha: 1.0,
            z: 0.0,
            texture: None,
            hidden: false,
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    fn to_node(&self) -> Node {
        let mut node = Node::new(self.name.clone());
        node.position = self.position;
        node.size = self.size;
        node.scale = self.scale;
        node.rotation = self.rotation;
        node.alpha = self.alpha;
        node.z_position = self.z;
        node.texture = self.texture.clone();
        node.hidden = self.hidden;
        node
    }
}

/// A complete scene description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub name: String,
    pub nodes: Vec<NodeSpec>,
}

impl SceneLayout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, spec: NodeSpec) -> &mut Self {
        self.nodes.push(spec);
        self
    }

    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Instantiate the layout into a fresh scene graph
    pub fn build(&self) -> SceneResult<SceneGraph> {
        let mut graph = SceneGraph::new();
        for spec in &self.nodes {
            let parent = match &spec.parent {
                Some(parent) => Some(graph.find(parent).ok_or_else(|| {
                    SceneError::UnknownParent {
                        node: spec.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };
            graph.add(spec.to_node(), parent)?;
        }
        log::debug!(
            "Built scene {:?} with {} nodes",
            self.name,
            graph.len() - 1
        );
        Ok(graph)
    }
}
