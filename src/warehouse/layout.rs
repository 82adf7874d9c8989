//! Built-in warehouse layout
//!
//! The room is wider than the screen and pans with the compass heading.
//! Everything in the room is a child of the background.

use super::names;
use crate::scene::{NodeSpec, SceneLayout};

impl SceneLayout {
    pub fn warehouse() -> Self {
        let mut layout = SceneLayout::new(names::SCENE);
        layout
            .push(NodeSpec::sprite(names::BACKGROUND, 0.0, 0.0, 2400.0, 900.0).z(-1.0))
            .push(
                NodeSpec::sprite(names::MOUSE, -450.0, -330.0, 80.0, 40.0)
                    .parent(names::BACKGROUND)
                    .z(1.0)
                    .texture(names::tex::MOUSE_WALK[4]),
            )
            .push(
                NodeSpec::sprite(names::CANDLE, -700.0, 60.0, 40.0, 120.0)
                    .parent(names::BACKGROUND)
                    .z(1.0),
            )
            .push(
                NodeSpec::sprite(names::CANDLE_FIRE, 0.0, 80.0, 30.0, 40.0)
                    .parent(names::CANDLE)
                    .z(1.0)
                    .texture(names::tex::CANDLE_FIRE[3]),
            )
            .push(
                NodeSpec::sprite(names::CHEESE, 250.0, -340.0, 70.0, 50.0)
                    .parent(names::BACKGROUND)
                    .z(1.0),
            )
            .push(
                NodeSpec::sprite(names::LENS, 500.0, 150.0, 60.0, 60.0)
                    .parent(names::BACKGROUND)
                    .z(1.0),
            )
            .push(
                NodeSpec::sprite(names::LENS_BEAM, 0.0, -200.0, 120.0, 400.0)
                    .parent(names::LENS)
                    .alpha(0.0)
                    .hidden(),
            )
            .push(NodeSpec::sprite(names::DARKNESS, 0.0, 0.0, 2400.0, 900.0).z(9.0).alpha(0.95))
            .push(NodeSpec::sprite(names::FLASHLIGHT, 0.0, 0.0, 300.0, 300.0).z(10.0).alpha(0.001));
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_layout_builds() {
        let graph = SceneLayout::warehouse().build().unwrap();
        let background = graph.find(names::BACKGROUND).unwrap();
        let fire = graph.find(names::CANDLE_FIRE).unwrap();
        let candle = graph.find(names::CANDLE).unwrap();
        assert_eq!(graph.node(fire).parent(), Some(candle));
        assert_eq!(graph.node(candle).parent(), Some(background));
        let beam = graph.find(names::LENS_BEAM).unwrap();
        assert!(graph.is_effectively_hidden(beam));
    }
}
