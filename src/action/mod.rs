//! Declarative timed actions
//!
//! An [`Action`] describes one visual effect with a duration. Actions nest
//! into sequences (run in order), groups (run together) and repeats. A
//! running action graph is stepped by the scene's [`ActionRunner`]; the
//! controller never blocks on it and learns about completion only through
//! zero-duration [`Effect::Cue`] steps placed at the end of a sequence.

pub mod runner;

pub use runner::{ActionRunner, RunnerEvent};

use glam::Vec2;

use crate::scene::NodeId;

/// Zero-duration side effect executed once when the runner reaches it
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<C> {
    /// Mirror the sprite horizontally (`scale.x *= -1`)
    FlipX,
    /// Swap the node's z between two layers
    ToggleZ { front: f32, back: f32 },
    SetHidden(bool),
    /// Strip every queued action from this node, including the current one
    RemoveAllActions,
    /// Move under `parent` keeping the on-screen position, then apply the
    /// given local pose
    Reparent {
        parent: NodeId,
        position: Option<Vec2>,
        scale: Option<Vec2>,
        rotation: Option<f32>,
    },
    /// Hand a scene-specific notification back to the controller
    Cue(C),
}

/// A timed animation primitive or a composite of them
#[derive(Debug, Clone, PartialEq)]
pub enum Action<C> {
    MoveTo { target: Vec2, duration: f32 },
    MoveBy { delta: Vec2, duration: f32 },
    RotateBy { angle: f32, duration: f32 },
    RotateTo { angle: f32, duration: f32 },
    ScaleTo { scale: Vec2, duration: f32 },
    FadeTo { alpha: f32, duration: f32 },
    FadeBy { delta: f32, duration: f32 },
    SetTexture(String),
    Wait(f32),
    PlaySound(String),
    Run(Effect<C>),
    Sequence(Vec<Action<C>>),
    Group(Vec<Action<C>>),
    Repeat { action: Box<Action<C>>, count: u32 },
    RepeatForever(Box<Action<C>>),
}

impl<C> Action<C> {
    pub fn move_to(target: Vec2, duration: f32) -> Self {
        Action::MoveTo { target, duration }
    }

    pub fn move_by(delta: Vec2, duration: f32) -> Self {
        Action::MoveBy { delta, duration }
    }

    pub fn rotate_by(angle: f32, duration: f32) -> Self {
        Action::RotateBy { angle, duration }
    }

    pub fn rotate_to(angle: f32, duration: f32) -> Self {
        Action::RotateTo { angle, duration }
    }

    pub fn scale_to(scale: f32, duration: f32) -> Self {
        Action::ScaleTo {
            scale: Vec2::splat(scale),
            duration,
        }
    }

    pub fn fade_in(duration: f32) -> Self {
        Action::FadeTo {
            alpha: 1.0,
            duration,
        }
    }

    pub fn fade_out(duration: f32) -> Self {
        Action::FadeTo {
            alpha: 0.0,
            duration,
        }
    }

    pub fn fade_to(alpha: f32, duration: f32) -> Self {
        Action::FadeTo { alpha, duration }
    }

    pub fn fade_by(delta: f32, duration: f32) -> Self {
        Action::FadeBy { delta, duration }
    }

    pub fn texture(name: impl Into<String>) -> Self {
        Action::SetTexture(name.into())
    }

    pub fn wait(duration: f32) -> Self {
        Action::Wait(duration)
    }

    pub fn sound(name: impl Into<String>) -> Self {
        Action::PlaySound(name.into())
    }

    pub fn run(effect: Effect<C>) -> Self {
        Action::Run(effect)
    }

    pub fn cue(cue: C) -> Self {
        Action::Run(Effect::Cue(cue))
    }

    pub fn sequence(actions: impl IntoIterator<Item = Action<C>>) -> Self {
        Action::Sequence(actions.into_iter().collect())
    }

    pub fn group(actions: impl IntoIterator<Item = Action<C>>) -> Self {
        Action::Group(actions.into_iter().collect())
    }

    pub fn repeat(self, count: u32) -> Self {
        Action::Repeat {
            action: Box::new(self),
            count,
        }
    }

    pub fn forever(self) -> Self {
        Action::RepeatForever(Box::new(self))
    }

    /// Cycle through texture frames, holding each for `pause` seconds
    pub fn frames(textures: &[&str], pause: f32) -> Self {
        Action::sequence(
            textures
                .iter()
                .flat_map(|t| [Action::texture(*t), Action::wait(pause)]),
        )
    }

    /// Total running time, `None` for actions that never end
    pub fn duration(&self) -> Option<f32> {
        match self {
            Action::MoveTo { duration, .. }
            | Action::MoveBy { duration, .. }
            | Action::RotateBy { duration, .. }
            | Action::RotateTo { duration, .. }
            | Action::ScaleTo { duration, .. }
            | Action::FadeTo { duration, .. }
            | Action::FadeBy { duration, .. } => Some(*duration),
            Action::Wait(duration) => Some(*duration),
            Action::SetTexture(_) | Action::PlaySound(_) | Action::Run(_) => Some(0.0),
            Action::Sequence(actions) => actions.iter().map(Action::duration).sum(),
            Action::Group(actions) => actions
                .iter()
                .map(Action::duration)
                .try_fold(0.0_f32, |max, d| d.map(|d| max.max(d))),
            Action::Repeat { action, count } => action.duration().map(|d| d * *count as f32),
            Action::RepeatForever(_) => None,
        }
    }
}
