//! Built-in bath layout
//!
//! Scene space is centered on the mirror with y pointing up. The face sits
//! in the upper half, the sink along the bottom edge and the tools on both
//! sides of it.

use super::names::{self, tex};
use crate::scene::{NodeSpec, SceneLayout};

fn zone(name: &str, x: f32, y: f32, w: f32, h: f32) -> NodeSpec {
    NodeSpec::sprite(name, x, y, w, h).alpha(0.0)
}

impl SceneLayout {
    pub fn bath() -> Self {
        let mut layout = SceneLayout::new(names::SCENE);

        // Face
        layout
            .push(NodeSpec::sprite(names::FACE, 0.0, 150.0, 460.0, 560.0).z(-1.0))
            .push(NodeSpec::sprite(names::FROST, 0.0, 150.0, 480.0, 580.0).z(6.0).alpha(0.8))
            .push(NodeSpec::sprite(names::LEFT_BROW, -90.0, 300.0, 90.0, 24.0).z(1.0))
            .push(NodeSpec::sprite(names::RIGHT_BROW, 90.0, 300.0, 90.0, 24.0).z(1.0))
            .push(
                NodeSpec::sprite(names::EYES, 0.0, 240.0, 260.0, 80.0)
                    .z(1.0)
                    .texture(tex::EYES_DEFAULT),
            )
            .push(NodeSpec::sprite(names::LEFT_EYEBALL, -60.0, 240.0, 28.0, 28.0).z(2.0))
            .push(NodeSpec::sprite(names::RIGHT_EYEBALL, 60.0, 240.0, 28.0, 28.0).z(2.0))
            .push(NodeSpec::sprite(names::MOUTH_DEFAULT, 0.0, 60.0, 120.0, 36.0).z(1.0))
            .push(zone(names::MOUTH_INSIDE, 0.0, 60.0, 110.0, 70.0).z(1.0))
            .push(zone(names::MOUTH_BRUSHED, 0.0, 60.0, 130.0, 60.0).z(1.0))
            .push(zone(names::JAW_TOP, 0.0, 75.0, 100.0, 24.0).z(2.0).texture(tex::JAW_TOP))
            .push(
                zone(names::JAW_BOTTOM, 0.0, 45.0, 100.0, 24.0)
                    .z(2.0)
                    .texture(tex::JAW_BOTTOM),
            )
            .push(zone(names::LIP_TOP, 0.0, 90.0, 130.0, 18.0).z(3.0))
            .push(zone(names::LIP_BOTTOM, 0.0, 30.0, 130.0, 18.0).z(3.0))
            .push(zone(names::LEFT_CHEEK, -110.0, 80.0, 90.0, 90.0).z(1.0))
            .push(zone(names::RIGHT_CHEEK, 110.0, 80.0, 90.0, 90.0).z(1.0))
            .push(NodeSpec::sprite(names::EAR_LEFT, -250.0, 170.0, 50.0, 110.0))
            .push(NodeSpec::sprite(names::EAR_RIGHT, 250.0, 170.0, 50.0, 110.0))
            .push(NodeSpec::sprite(names::DIRT, 150.0, 100.0, 90.0, 60.0).z(2.0));

        // Hair
        layout
            .push(NodeSpec::sprite(names::HAIR_LEFT_INITIAL, -140.0, 400.0, 170.0, 120.0).z(1.0))
            .push(zone(names::HAIR_LEFT_FIXED, -140.0, 400.0, 170.0, 120.0).z(1.0))
            .push(NodeSpec::sprite(names::HAIR_RIGHT_INITIAL, 140.0, 400.0, 170.0, 120.0).z(1.0));
        for name in [
            names::HAIR_RIGHT_FIXED_LEFT,
            names::HAIR_RIGHT_FIXED_RIGHT,
            names::HAIR_RIGHT_FIXED_UP,
            names::HAIR_RIGHT_FIXED_DOWN,
        ] {
            layout.push(zone(name, 140.0, 400.0, 170.0, 120.0).z(1.0));
        }
        // Stubble: 4 rows of 11 on the chin
        for index in names::HAIR_PIECE_FIRST..=names::HAIR_PIECE_LAST {
            let slot = index - names::HAIR_PIECE_FIRST;
            let (col, row) = ((slot % 11) as f32, (slot / 11) as f32);
            layout.push(
                NodeSpec::sprite(
                    names::hair_piece(index),
                    -100.0 + col * 20.0,
                    -40.0 + row * 10.0,
                    6.0,
                    14.0,
                )
                .z(2.0),
            );
        }

        // Pimples
        layout
            .push(NodeSpec::sprite(names::PIMPLE1_INITIAL, -130.0, 170.0, 30.0, 30.0).z(2.0))
            .push(zone(names::PIMPLE1_BLEEDING, -130.0, 170.0, 30.0, 30.0).z(2.0))
            .push(zone(names::PIMPLE1_FIXED, -130.0, 170.0, 30.0, 30.0).z(2.0))
            .push(zone(names::PIMPLE1_PINCH_ZONE, -130.0, 170.0, 80.0, 80.0).z(5.0))
            .push(NodeSpec::sprite(names::PIMPLE2, 140.0, 180.0, 26.0, 26.0).z(2.0))
            .push(zone(names::PIMPLE2_PINCH_ZONE, 140.0, 180.0, 80.0, 80.0).z(5.0))
            .push(NodeSpec::sprite(names::PIMPLE3, 20.0, 340.0, 24.0, 24.0).z(2.0))
            .push(zone(names::PIMPLE3_PINCH_ZONE, 20.0, 340.0, 70.0, 70.0).z(5.0));

        // Body
        layout
            .push(NodeSpec::sprite(names::SHIRT, 0.0, -250.0, 520.0, 220.0).z(-1.0))
            .push(zone(names::SHIRT_ZONE, 60.0, -250.0, 200.0, 120.0))
            .push(NodeSpec::sprite(names::SHIRT_STAIN, 60.0, -240.0, 120.0, 60.0).z(1.0))
            .push(zone(names::ARMPIT, -200.0, -190.0, 80.0, 80.0))
            .push(NodeSpec::sprite(names::SMELL, -200.0, -130.0, 100.0, 80.0).z(2.0).alpha(0.9));
        for (i, name) in names::SPRAY.iter().enumerate() {
            let step = i as f32 * 15.0;
            layout.push(zone(name, -170.0 - step, -170.0 - step, 50.0, 50.0).z(3.0));
        }
        for (i, name) in names::WATER_FALLING.iter().enumerate() {
            layout.push(zone(name, 0.0, -(i as f32) * 40.0, 24.0, 36.0).z(3.0));
        }

        // Sink
        layout
            .push(NodeSpec::sprite(names::SINK, 0.0, -540.0, 520.0, 180.0).z(-2.0))
            .push(
                NodeSpec::sprite(names::CRANE, 0.0, -420.0, 90.0, 60.0)
                    .texture(tex::CRANE_DEFAULT),
            )
            .push(NodeSpec::sprite(names::COLD_VALVE, -110.0, -440.0, 60.0, 60.0).z(1.0))
            .push(NodeSpec::sprite(names::HOT_VALVE, 110.0, -440.0, 60.0, 60.0).z(1.0))
            .push(zone(names::WATER, 0.0, -505.0, 40.0, 110.0).z(1.0).texture(tex::TAP_WATER[2]));
        for (i, name) in names::STEAM.iter().enumerate() {
            let x = -40.0 + i as f32 * 40.0;
            let y = if i == 1 { -370.0 } else { -390.0 };
            layout.push(zone(name, x, y, 70.0, 70.0).z(3.0));
        }

        // Tools
        layout
            .push(
                NodeSpec::sprite(names::MAGENTA_CUP, -250.0, -560.0, 80.0, 100.0)
                    .z(2.0)
                    .texture(tex::CUP),
            )
            .push(
                NodeSpec::sprite(names::TOOTHBRUSH, -250.0, -490.0, 36.0, 160.0)
                    .z(3.0)
                    .texture(tex::TOOTHBRUSH_PASTE),
            )
            .push(
                NodeSpec::sprite(names::TOOTHBRUSH_TOP, 0.0, 65.0, 36.0, 30.0)
                    .parent(names::TOOTHBRUSH),
            )
            .push(
                NodeSpec::sprite(names::TOWEL, 250.0, -560.0, 120.0, 100.0)
                    .z(2.0)
                    .texture(tex::TOWEL_DRY),
            )
            .push(
                NodeSpec::sprite(names::DEODORANT, 330.0, -400.0, 50.0, 110.0)
                    .z(3.0)
                    .texture(tex::DEODORANT),
            )
            .push(
                NodeSpec::sprite(names::RAZOR, 320.0, -260.0, 50.0, 150.0)
                    .z(3.0)
                    .texture(tex::RAZOR),
            )
            .push(NodeSpec::sprite(names::RAZOR_TOP, 0.0, 62.0, 50.0, 26.0).parent(names::RAZOR))
            .push(NodeSpec::sprite(names::COMB, -320.0, -260.0, 40.0, 150.0).z(3.0))
            .push(NodeSpec::sprite(names::BANDAGE, 320.0, -100.0, 70.0, 30.0).z(3.0))
            .push(NodeSpec::sprite(names::TOILET_WATER, -320.0, -100.0, 70.0, 90.0).z(3.0))
            .push(NodeSpec::sprite(names::STICK_LEFT, -330.0, 30.0, 14.0, 90.0).z(3.0))
            .push(NodeSpec::sprite(names::STICK_RIGHT, 330.0, 30.0, 14.0, 90.0).z(3.0));

        // Fly and its web
        layout
            .push(NodeSpec::sprite(names::WEB, 290.0, 580.0, 160.0, 160.0).z(-1.0))
            .push(NodeSpec::sprite(names::FLY, -300.0, 560.0, 60.0, 60.0))
            .push(NodeSpec::sprite(names::FLY_BODY, 0.0, 0.0, 50.0, 40.0).parent(names::FLY))
            .push(
                NodeSpec::sprite(names::FLY_NOSE, 22.0, 0.0, 12.0, 12.0)
                    .parent(names::FLY)
                    .z(1.0),
            )
            .push(
                NodeSpec::sprite(names::FLY_WINGS, 0.0, 18.0, 40.0, 20.0)
                    .parent(names::FLY)
                    .z(1.0)
                    .texture(tex::FLY_WINGS[1]),
            );

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bath_layout_builds() {
        let layout = SceneLayout::bath();
        let graph = layout.build().unwrap();
        assert!(graph.find(&names::hair_piece(2)).is_some());
        assert!(graph.find(&names::hair_piece(45)).is_some());
        assert!(graph.find(&names::hair_piece(46)).is_none());
        let razor = graph.find(names::RAZOR).unwrap();
        assert!(graph.find_in(razor, names::RAZOR_TOP).is_some());
    }

    #[test]
    fn test_bath_layout_survives_json() {
        let layout = SceneLayout::bath();
        let json = layout.to_json().unwrap();
        assert_eq!(SceneLayout::from_json_str(&json).unwrap(), layout);
    }
}
