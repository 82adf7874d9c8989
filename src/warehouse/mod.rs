//! The warehouse scene
//!
//! A dark storeroom seen through a flashlight. Turning the phone pans the
//! room, tilting it moves the light; the scene is won once the light finds
//! the lens hidden on the wall.

pub mod animator;
pub mod controller;
mod layout;
pub mod names;
pub mod nodes;
pub mod physics;
pub mod state;

pub use controller::WarehouseScene;
pub use state::WarehouseState;
