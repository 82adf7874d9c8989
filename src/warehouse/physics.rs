//! Warehouse contact categories

use glam::Vec2;

use super::nodes::WarehouseNodes;
use crate::contact::{ContactCategory, ContactWorld, PhysicsBody};
use crate::scene::SceneGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WarehouseContact {
    Lens = 1 << 0,
    Flashlight = 1 << 1,
}

impl ContactCategory for WarehouseContact {
    const ALL: &'static [Self] = &[WarehouseContact::Lens, WarehouseContact::Flashlight];

    fn mask(self) -> u32 {
        self as u32
    }
}

/// The lens only counts when the light is right on it
const LENS_SIZE: Vec2 = Vec2::new(10.0, 10.0);

pub fn create_bodies(graph: &SceneGraph, nodes: &WarehouseNodes) -> ContactWorld<WarehouseContact> {
    use WarehouseContact::*;

    let mut world = ContactWorld::new();
    world.attach(nodes.lens, PhysicsBody::rect(LENS_SIZE, &[Flashlight], Lens));
    let radius = graph.node(nodes.flashlight).size.y / 2.0;
    world.attach(nodes.flashlight, PhysicsBody::circle(radius, &[Lens], Flashlight));
    world
}
