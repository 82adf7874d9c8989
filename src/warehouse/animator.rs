//! Warehouse animations

use glam::Vec2;

use super::names::tex;
use super::nodes::WarehouseNodes;
use crate::action::{Action, Effect};
use crate::scene::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarehouseCue {
    LensRevealed,
}

pub type WarehouseStage = Stage<WarehouseCue>;
type A = Action<WarehouseCue>;

const FRAME: f32 = 0.1;
/// Each walk step covers this much floor
const STEP: f32 = 150.0;
const STEP_TIME: f32 = 0.4;
const STEPS: u32 = 6;
/// Follow time for motion samples, one sample interval
const PAN_TIME: f32 = 0.1;
const REVEAL_TIME: f32 = 0.5;

/// One walk leg: `STEPS` steps in `direction`, then turn round
fn walk_leg(direction: f32) -> A {
    let step = A::group([
        A::frames(&tex::MOUSE_WALK, FRAME),
        A::move_by(Vec2::new(direction * STEP, 0.0), STEP_TIME),
        A::wait(FRAME),
    ]);
    A::sequence([step.repeat(STEPS), A::run(Effect::FlipX), A::wait(2.0 * FRAME)])
}

pub fn walk_mouse(stage: &mut WarehouseStage, nodes: &WarehouseNodes) {
    stage.run(nodes.mouse, A::sequence([walk_leg(1.0), walk_leg(-1.0)]).forever());
}

pub fn burn_candle(stage: &mut WarehouseStage, nodes: &WarehouseNodes) {
    stage.run(nodes.candle_fire, A::frames(&tex::CANDLE_FIRE, FRAME).forever());
}

/// Glide the room and the light towards the latest motion sample
pub fn pan(stage: &mut WarehouseStage, nodes: &WarehouseNodes, background_x: f32, light: Vec2) {
    let background_y = stage.node(nodes.background).init_point.y;
    for (node, target) in [
        (nodes.background, Vec2::new(background_x, background_y)),
        (nodes.flashlight, light),
    ] {
        stage.remove_all_actions(node);
        stage.run(node, A::move_to(target, PAN_TIME));
    }
}

pub fn reveal_lens(stage: &mut WarehouseStage, nodes: &WarehouseNodes) {
    stage.run(
        nodes.lens_beam,
        A::sequence([
            A::run(Effect::SetHidden(false)),
            A::fade_in(REVEAL_TIME),
            A::cue(WarehouseCue::LensRevealed),
        ]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::RunnerEvent;
    use crate::consts::TICK_DT;
    use crate::scene::SceneLayout;

    fn stage() -> (WarehouseStage, WarehouseNodes) {
        let mut graph = SceneLayout::warehouse().build().unwrap();
        let nodes = WarehouseNodes::resolve(&mut graph).unwrap();
        (Stage::new(graph), nodes)
    }

    fn run_for(stage: &mut WarehouseStage, seconds: f32) -> Vec<RunnerEvent<WarehouseCue>> {
        stage.runner.advance(&mut stage.graph, seconds, TICK_DT)
    }

    #[test]
    fn test_mouse_turns_after_six_steps() {
        let (mut stage, nodes) = stage();
        let start = stage.node(nodes.mouse).init_point;
        walk_mouse(&mut stage, &nodes);

        run_for(&mut stage, 1.6);
        assert_eq!(stage.node(nodes.mouse).scale.x, 1.0);

        run_for(&mut stage, 1.5);
        let mouse = stage.node(nodes.mouse);
        assert!((mouse.position.x - (start.x + 900.0)).abs() < 0.5);
        assert_eq!(mouse.scale.x, -1.0);

        // Back home and facing forward again
        run_for(&mut stage, 3.2);
        let mouse = stage.node(nodes.mouse);
        assert!((mouse.position.x - start.x).abs() < 0.5);
        assert_eq!(mouse.scale.x, 1.0);
        assert!(stage.has_actions(nodes.mouse));
    }

    #[test]
    fn test_candle_flickers() {
        let (mut stage, nodes) = stage();
        burn_candle(&mut stage, &nodes);
        run_for(&mut stage, 0.15);
        assert_eq!(stage.node(nodes.candle_fire).texture.as_deref(), Some(tex::CANDLE_FIRE[1]));
        run_for(&mut stage, 0.3);
        assert_eq!(stage.node(nodes.candle_fire).texture.as_deref(), Some(tex::CANDLE_FIRE[0]));
    }

    #[test]
    fn test_pan_replaces_previous_target() {
        let (mut stage, nodes) = stage();
        pan(&mut stage, &nodes, 300.0, Vec2::new(-150.0, 40.0));
        run_for(&mut stage, 0.05);
        pan(&mut stage, &nodes, -100.0, Vec2::new(50.0, 0.0));
        run_for(&mut stage, 0.2);
        let close = |a: Vec2, b: Vec2| a.distance(b) < 1e-3;
        assert!(close(stage.node(nodes.background).position, Vec2::new(-100.0, 0.0)));
        assert!(close(stage.node(nodes.flashlight).position, Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn test_lens_reveal_cues_once_done() {
        let (mut stage, nodes) = stage();
        reveal_lens(&mut stage, &nodes);
        let events = run_for(&mut stage, 0.25);
        assert!(events.is_empty());
        assert!(!stage.graph.is_effectively_hidden(nodes.lens_beam));
        let events = run_for(&mut stage, 0.35);
        assert!(matches!(
            events[..],
            [RunnerEvent::Cue {
                cue: WarehouseCue::LensRevealed,
                ..
            }]
        ));
        assert_eq!(stage.node(nodes.lens_beam).alpha, 1.0);
    }
}
