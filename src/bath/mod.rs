//! The bath scene
//!
//! A frozen, unkempt character in front of a fogged mirror. Eleven small
//! chores (warm water, teeth, hair, shaving, the fly, pimples, dirt,
//! smell, shirt, both ears) must all be done to win.
//!
//! - `names`: asset names the scene is addressed by
//! - `nodes`: typed node table resolved at load
//! - `physics`: contact categories and trigger bodies
//! - `state`: puzzle progress and the win predicate
//! - `animator`: one action graph per game move
//! - `controller`: input and contact dispatch

pub mod animator;
pub mod controller;
mod layout;
pub mod names;
pub mod nodes;
pub mod physics;
pub mod state;

pub use animator::{BathAnimator, BathCue};
pub use controller::BathScene;
pub use state::BathState;
