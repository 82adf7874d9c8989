//! Input events delivered by the host
//!
//! Points are in scene space (origin at the scene center, y up). Face
//! frames arrive once per rendered frame, motion samples at about 10 Hz.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::gesture::SwipeDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// Facial blend shapes the scenes react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendShape {
    BrowDownLeft,
    BrowDownRight,
    BrowOuterUpLeft,
    BrowOuterUpRight,
    EyeLookDownLeft,
    EyeLookUpLeft,
    EyeLookInLeft,
    EyeLookOutLeft,
    JawOpen,
    MouthShrugUpper,
    CheekPuff,
}

/// One frame of tracked blend shape values in `[0, 1]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceFrame {
    shapes: BTreeMap<BlendShape, f32>,
}

impl FaceFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, shape: BlendShape, value: f32) -> Self {
        self.set(shape, value);
        self
    }

    pub fn set(&mut self, shape: BlendShape, value: f32) {
        self.shapes.insert(shape, value.clamp(0.0, 1.0));
    }

    /// Value of `shape`; shapes the tracker did not report read as neutral
    pub fn get(&self, shape: BlendShape) -> f32 {
        self.shapes.get(&shape).copied().unwrap_or(0.0)
    }
}

/// Everything a scene can be told
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Touch {
        id: u64,
        phase: TouchPhase,
        point: Vec2,
    },
    /// Two-finger pinch, both finger locations in scene space
    Pinch {
        first: Vec2,
        second: Vec2,
        scale: f32,
        velocity: f32,
    },
    /// Discrete swipe recognised by the platform
    Swipe {
        point: Vec2,
        direction: SwipeDirection,
    },
    Face(FaceFrame),
    /// Gravity in g, compass heading in degrees `[0, 360)`
    DeviceMotion { gravity: Vec3, heading: f32 },
    /// Raw acceleration in g
    Accelerometer { acceleration: Vec3 },
    /// Forget any calibration taken from earlier motion samples
    Recalibrate,
}
