//! Scene node: transform, rest pose and drag flags

use std::fmt;

use glam::{Affine2, Vec2};

/// Stable handle into a [`super::SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Extra work done after a node snaps back to its rest pose
pub type ResetHook = Box<dyn Fn(&mut Node)>;

/// A named 2D sprite
pub struct Node {
    pub name: String,
    pub position: Vec2,
    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,
    /// Non-uniform scale; negative x mirrors the sprite
    pub scale: Vec2,
    pub alpha: f32,
    pub z_position: f32,
    /// Unscaled sprite size, centered on `position`
    pub size: Vec2,
    pub texture: Option<String>,
    pub hidden: bool,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    // Rest pose captured by `setup`
    pub init_point: Vec2,
    pub init_scale: Vec2,
    pub init_rotation: f32,
    pub init_z_position: f32,

    pub draggable: bool,
    pub in_use: bool,
    /// When false the next `reset` is skipped and the flag re-arms
    pub needs_reset: bool,
    pub additional_reset_logic: Option<ResetHook>,

    is_setup: bool,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            alpha: 1.0,
            z_position: 0.0,
            size: Vec2::ZERO,
            texture: None,
            hidden: false,
            parent: None,
            children: Vec::new(),
            init_point: Vec2::ZERO,
            init_scale: Vec2::ONE,
            init_rotation: 0.0,
            init_z_position: 0.0,
            draggable: false,
            in_use: false,
            needs_reset: true,
            additional_reset_logic: None,
            is_setup: false,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Capture the current transform as the rest pose.
    ///
    /// Only the first call records the pose; later calls just update
    /// draggability, so animations that already moved the node cannot
    /// corrupt its rest pose.
    pub fn setup(&mut self, draggable: bool) {
        self.draggable = draggable;
        if self.is_setup {
            return;
        }
        self.init_point = self.position;
        self.init_scale = self.scale;
        self.init_rotation = self.rotation;
        self.init_z_position = self.z_position;
        self.is_setup = true;
    }

    pub fn is_setup(&self) -> bool {
        self.is_setup
    }

    /// Move the rest pose somewhere else (e.g. a tool that gets a new home)
    pub fn rehome(&mut self, point: Vec2, rotation: f32) {
        self.init_point = point;
        self.init_rotation = rotation;
    }

    /// Snap back to the rest pose.
    ///
    /// A node with `needs_reset == false` skips exactly one reset and is
    /// re-armed for the next one.
    pub fn reset(&mut self) {
        self.in_use = false;
        if !self.needs_reset {
            self.needs_reset = true;
            return;
        }
        self.position = self.init_point;
        self.scale = self.init_scale;
        self.rotation = self.init_rotation;
        self.z_position = self.init_z_position;
        if let Some(hook) = self.additional_reset_logic.take() {
            hook(self);
            self.additional_reset_logic = Some(hook);
        }
    }

    pub fn start_using(&mut self) {
        self.in_use = true;
    }

    pub fn stop_using(&mut self) {
        self.in_use = false;
    }

    /// Local transform relative to the parent
    pub fn local_transform(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.position)
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("alpha", &self.alpha)
            .field("z_position", &self.z_position)
            .field("texture", &self.texture)
            .field("hidden", &self.hidden)
            .field("draggable", &self.draggable)
            .field("in_use", &self.in_use)
            .field("needs_reset", &self.needs_reset)
            .finish_non_exhaustive()
    }
}
