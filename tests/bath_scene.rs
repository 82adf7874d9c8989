//! End-to-end runs of both scenes through their public input API

use glam::{Vec2, Vec3};

use mirror_chores::bath::BathScene;
use mirror_chores::bath::names::sound;
use mirror_chores::feedback::Output;
use mirror_chores::gesture::SwipeDirection;
use mirror_chores::input::{InputEvent, TouchPhase};
use mirror_chores::scene::{GameScene, NodeId, NodeSpec, SceneLayout};
use mirror_chores::script::Script;
use mirror_chores::warehouse::WarehouseScene;
use mirror_chores::{SceneError, Settings};

fn at(scene: &BathScene, node: NodeId) -> Vec2 {
    scene.stage().graph.world_position(node)
}

fn swipe(scene: &BathScene, node: NodeId, direction: SwipeDirection) -> InputEvent {
    InputEvent::Swipe {
        point: at(scene, node),
        direction,
    }
}

fn sounds(replay: &[(f32, Output)], name: &str) -> usize {
    replay
        .iter()
        .filter(|(_, o)| matches!(o, Output::PlaySound(s) if s == name))
        .count()
}

#[test]
fn test_warming_the_water_thaws_the_character() {
    let mut scene = BathScene::builtin(&Settings::default()).unwrap();
    let nodes = scene.nodes().clone();
    assert!(scene.state().is_character_freezing());

    let mut script = Script::new();
    script
        .push(0.2, swipe(&scene, nodes.cold_valve, SwipeDirection::Down))
        .push(
            1.0,
            InputEvent::Touch {
                id: 1,
                phase: TouchPhase::Began,
                point: at(&scene, nodes.water),
            },
        )
        .push(
            1.1,
            InputEvent::Touch {
                id: 1,
                phase: TouchPhase::Ended,
                point: at(&scene, nodes.water),
            },
        )
        .push(2.5, swipe(&scene, nodes.hot_valve, SwipeDirection::Down));
    let replay = script.replay(&mut scene, 1.5);

    assert_eq!(sounds(&replay.outputs, sound::VALVE), 2);
    assert_eq!(sounds(&replay.outputs, sound::OUCH), 1);
    assert!(!scene.state().is_character_freezing());
    assert_eq!(scene.stage().node(nodes.frost).alpha, 0.0);
    assert!(!replay.won);
}

#[test]
fn test_small_pimples_pop_with_a_pinch() {
    let mut scene = BathScene::builtin(&Settings::default()).unwrap();
    let nodes = scene.nodes().clone();
    for (index, zone) in [(1, nodes.pimple2_pinch), (2, nodes.pimple3_pinch)] {
        let center = at(&scene, zone);
        scene.handle(&InputEvent::Pinch {
            first: center - Vec2::new(2.0, 0.0),
            second: center + Vec2::new(2.0, 0.0),
            scale: 0.6,
            velocity: -1.0,
        });
        assert!(scene.state().is_pimple_fixed(index));
    }
    assert!(!scene.state().are_pimples_fixed());
}

#[test]
fn test_layout_missing_a_tool_is_rejected() {
    let mut layout = SceneLayout::bath();
    layout.nodes.retain(|spec| spec.name != "comb");
    match BathScene::new(&layout, &Settings::default()) {
        Err(SceneError::MissingNode { scene, name }) => {
            assert_eq!(scene, "bath");
            assert_eq!(name, "comb");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("scene built without a comb"),
    }

    let mut layout = SceneLayout::warehouse();
    layout.push(NodeSpec::sprite("lens", 0.0, 0.0, 1.0, 1.0));
    assert!(matches!(
        WarehouseScene::new(&layout, &Settings::default()),
        Err(SceneError::DuplicateNode(_))
    ));
}

#[test]
fn test_warehouse_found_by_looking_around() {
    let mut scene = WarehouseScene::builtin(&Settings::default()).unwrap();
    let mut script = Script::new();
    for i in 0..=20 {
        script.push(
            i as f32 * 0.1,
            InputEvent::DeviceMotion {
                gravity: Vec3::new(0.0, -0.9, i as f32 * 0.005),
                heading: 100.0 + i as f32 * 1.7,
            },
        );
    }
    let replay = script.replay(&mut scene, 1.5);
    assert!(replay.won);
    assert_eq!(
        replay.outputs.iter().filter(|(_, o)| *o == Output::Won).count(),
        1
    );
}
