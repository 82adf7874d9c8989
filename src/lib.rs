//! Mirror Chores - a face-tracked bathroom minigame core
//!
//! Core modules:
//! - `scene`: Name-addressed 2D node graph and layout loading
//! - `action`: Declarative timed actions and the per-scene runner
//! - `contact`: Bitmask contact categories and pairwise contact routing
//! - `gesture`: Swipe classification and threshold-oscillation progress
//! - `bath` / `warehouse`: Puzzle state, animators and scene controllers
//!
//! Face capture, rendering and device I/O live outside this crate; scenes
//! consume [`input::InputEvent`]s and emit [`feedback::Output`]s.

pub mod action;
pub mod bath;
pub mod contact;
pub mod error;
pub mod feedback;
pub mod gesture;
pub mod input;
pub mod scene;
pub mod script;
pub mod settings;
pub mod warehouse;

pub use error::{SceneError, SceneResult};
pub use settings::{Settings, Tuning};

/// Timing constants
pub mod consts {
    /// Fixed scene tick (60 Hz, one rendered frame)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Device motion / accelerometer sample interval (seconds)
    pub const MOTION_INTERVAL: f32 = 0.1;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
