//! Bath contact categories and trigger bodies

use glam::Vec2;

use super::nodes::BathNodes;
use crate::contact::{ContactCategory, ContactWorld, PhysicsBody};
use crate::scene::{NodeId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BathContact {
    Comb = 1 << 0,
    Hair = 1 << 1,
    Teeth = 1 << 2,
    ToothBrush = 1 << 3,
    Cup = 1 << 4,
    Water = 1 << 5,
    HairPiece = 1 << 6,
    Razor = 1 << 7,
    MouthBrushed = 1 << 8,
    Pimple = 1 << 9,
    Bandage = 1 << 10,
    Towel = 1 << 11,
    Dirt = 1 << 12,
    Shirt = 1 << 13,
    ToiletWater = 1 << 14,
    LeftEar = 1 << 15,
    RightEar = 1 << 16,
    StickLeft = 1 << 17,
    StickRight = 1 << 18,
    Deodorant = 1 << 19,
    Armpit = 1 << 20,
}

impl ContactCategory for BathContact {
    const ALL: &'static [Self] = &[
        BathContact::Comb,
        BathContact::Hair,
        BathContact::Teeth,
        BathContact::ToothBrush,
        BathContact::Cup,
        BathContact::Water,
        BathContact::HairPiece,
        BathContact::Razor,
        BathContact::MouthBrushed,
        BathContact::Pimple,
        BathContact::Bandage,
        BathContact::Towel,
        BathContact::Dirt,
        BathContact::Shirt,
        BathContact::ToiletWater,
        BathContact::LeftEar,
        BathContact::RightEar,
        BathContact::StickLeft,
        BathContact::StickRight,
        BathContact::Deodorant,
        BathContact::Armpit,
    ];

    fn mask(self) -> u32 {
        self as u32
    }
}

// Body sizes relative to the sprite
const HAIR_SHRINK: Vec2 = Vec2::new(0.4, 0.35);
const COMB_SHRINK: f32 = 0.75;
const MOUTH_SHRINK: f32 = 0.7;
const HAIR_PIECE_SHRINK: Vec2 = Vec2::new(0.3, 0.7);
const CLOTH_SHRINK: f32 = 0.6;

fn rect(
    graph: &SceneGraph,
    node: NodeId,
    shrink: Vec2,
    contact: &[BathContact],
    category: BathContact,
) -> PhysicsBody<BathContact> {
    PhysicsBody::rect(graph.node(node).size * shrink, contact, category)
}

/// Attach every trigger body of the bath scene
pub fn create_bodies(graph: &SceneGraph, nodes: &BathNodes) -> ContactWorld<BathContact> {
    use BathContact::*;

    let mut world = ContactWorld::new();
    let full = Vec2::ONE;

    let hair = [
        nodes.hair_left_initial,
        nodes.hair_left_fixed,
        nodes.hair_right_initial,
        nodes.hair_right_fixed_left,
        nodes.hair_right_fixed_right,
        nodes.hair_right_fixed_up,
        nodes.hair_right_fixed_down,
    ];
    for id in hair {
        world.attach(id, rect(graph, id, HAIR_SHRINK, &[Comb], Hair));
    }
    world.attach(
        nodes.comb,
        rect(graph, nodes.comb, Vec2::splat(COMB_SHRINK), &[Hair], Comb),
    );

    // Teeth and rinsing
    world.attach(
        nodes.toothbrush_top,
        rect(graph, nodes.toothbrush_top, full, &[Teeth], ToothBrush),
    );
    for jaw in [nodes.jaw_top, nodes.jaw_bottom] {
        world.attach(jaw, rect(graph, jaw, Vec2::splat(MOUTH_SHRINK), &[ToothBrush], Teeth));
    }
    world.attach(
        nodes.mouth_brushed,
        rect(graph, nodes.mouth_brushed, Vec2::splat(MOUTH_SHRINK), &[Cup], MouthBrushed),
    );
    world.attach(
        nodes.water,
        rect(graph, nodes.water, Vec2::splat(MOUTH_SHRINK), &[Cup, Towel], Water),
    );
    world.attach(
        nodes.magenta_cup,
        rect(graph, nodes.magenta_cup, Vec2::splat(MOUTH_SHRINK), &[Water], Cup),
    );

    // Shaving
    for piece in &nodes.hair_pieces {
        world.attach(*piece, rect(graph, *piece, HAIR_PIECE_SHRINK, &[Razor], HairPiece));
    }
    world.attach(
        nodes.razor_top,
        rect(graph, nodes.razor_top, full, &[HairPiece], Razor),
    );

    world.attach(
        nodes.pimple1_bleeding,
        rect(graph, nodes.pimple1_bleeding, full, &[Bandage], Pimple),
    );
    world.attach(
        nodes.bandage,
        rect(graph, nodes.bandage, full, &[Pimple], Bandage),
    );

    let cloth = Vec2::splat(CLOTH_SHRINK);
    world.attach(nodes.towel, rect(graph, nodes.towel, cloth, &[Dirt, Water], Towel));
    world.attach(nodes.dirt, rect(graph, nodes.dirt, cloth, &[Towel], Dirt));
    world.attach(
        nodes.toilet_water,
        rect(graph, nodes.toilet_water, cloth, &[Shirt], ToiletWater),
    );
    world.attach(
        nodes.shirt_zone,
        rect(graph, nodes.shirt_zone, full, &[ToiletWater], Shirt),
    );

    // Each stick reaches across to the opposite ear
    world.attach(
        nodes.stick_left,
        rect(graph, nodes.stick_left, full, &[RightEar], StickLeft),
    );
    world.attach(
        nodes.stick_right,
        rect(graph, nodes.stick_right, full, &[LeftEar], StickRight),
    );
    world.attach(nodes.ear_left, rect(graph, nodes.ear_left, full, &[StickRight], LeftEar));
    world.attach(nodes.ear_right, rect(graph, nodes.ear_right, full, &[StickLeft], RightEar));

    world.attach(
        nodes.deodorant,
        rect(graph, nodes.deodorant, full, &[Armpit], Deodorant),
    );
    world.attach(nodes.armpit, rect(graph, nodes.armpit, full, &[Deodorant], Armpit));

    log::debug!("bath: {} trigger bodies", world.len());
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bath::state::HairSide;
    use crate::contact::ContactEvent;
    use crate::scene::SceneLayout;
    use proptest::prelude::*;

    fn scene() -> (SceneGraph, BathNodes) {
        let mut graph = SceneLayout::bath().build().unwrap();
        let nodes = BathNodes::resolve(&mut graph).unwrap();
        (graph, nodes)
    }

    #[test]
    fn test_rest_layout_has_no_contacts() {
        let (graph, nodes) = scene();
        let mut world = create_bodies(&graph, &nodes);
        assert_eq!(world.len(), 7 + 1 + 1 + 2 + 1 + 1 + 1 + 44 + 1 + 2 + 4 + 4 + 2);
        assert!(world.step(&graph).is_empty());
    }

    #[test]
    fn test_comb_over_hair_orders_comb_first() {
        let (mut graph, nodes) = scene();
        let mut world = create_bodies(&graph, &nodes);
        let target = graph.node(nodes.hair_left_initial).position;
        graph.node_mut(nodes.comb).position = target;
        let events = world.step(&graph);
        let ordered: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ContactEvent::Begin(c) => c.ordered(&[BathContact::Comb]),
                ContactEvent::End(_) => None,
            })
            .collect();
        // Initial and fixed styles share a spot
        assert_eq!(ordered.len(), 2);
        for contact in ordered {
            assert_eq!(contact.main.node, nodes.comb);
            assert_eq!(contact.other.category, BathContact::Hair);
            assert_eq!(nodes.hair_side(contact.other.node), HairSide::Left);
        }
    }

    #[test]
    fn test_sticks_only_reach_opposite_ear() {
        let (mut graph, nodes) = scene();
        let mut world = create_bodies(&graph, &nodes);
        let left_ear = graph.node(nodes.ear_left).position;
        graph.node_mut(nodes.stick_left).position = left_ear;
        assert!(world.step(&graph).is_empty());
        graph.node_mut(nodes.stick_right).position = left_ear;
        assert_eq!(world.step(&graph).len(), 1);
        assert!(world.is_contacting(nodes.stick_right, nodes.ear_left));
    }

    fn category() -> impl Strategy<Value = BathContact> {
        prop::sample::select(BathContact::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_bath_bits_are_distinct(a in category(), b in category()) {
            prop_assert_eq!(a.mask().count_ones(), 1);
            prop_assert_eq!(BathContact::from_mask(a.mask()), Some(a));
            if a != b {
                prop_assert_eq!(a.mask() & b.mask(), 0);
            }
        }
    }
}
