//! Mirror Chores headless driver
//!
//! Builds a scene from its built-in layout, replays a script of input
//! events at the fixed tick and logs what the scene asks the host to do.
//!
//! Usage: `mirror-chores [bath|warehouse] [script.json] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use mirror_chores::{
    SceneResult, Settings,
    bath::BathScene,
    gesture::SwipeDirection,
    input::{BlendShape, FaceFrame, InputEvent},
    scene::GameScene,
    script::Script,
    warehouse::WarehouseScene,
};

/// Seconds of ticking after the last scripted event
#[cfg(not(target_arch = "wasm32"))]
const TAIL: f32 = 3.0;

#[cfg(not(target_arch = "wasm32"))]
fn swipe_on(scene: &BathScene, node: mirror_chores::scene::NodeId, direction: SwipeDirection) -> InputEvent {
    InputEvent::Swipe {
        point: scene.stage().graph.world_position(node),
        direction,
    }
}

/// Warm the water and pull a few faces
#[cfg(not(target_arch = "wasm32"))]
fn bath_demo(scene: &BathScene) -> Script {
    let nodes = scene.nodes();
    let mut script = Script::new();
    script
        .push(0.5, swipe_on(scene, nodes.cold_valve, SwipeDirection::Down))
        .push(1.5, swipe_on(scene, nodes.hot_valve, SwipeDirection::Down))
        .push(
            2.5,
            InputEvent::Face(
                FaceFrame::new()
                    .with(BlendShape::BrowOuterUpLeft, 0.8)
                    .with(BlendShape::MouthShrugUpper, 0.4)
                    .with(BlendShape::JawOpen, 0.3),
            ),
        )
        .push(3.5, InputEvent::Face(FaceFrame::new()));
    script
}

/// Look around until the light lands on the lens
#[cfg(not(target_arch = "wasm32"))]
fn warehouse_demo() -> Script {
    let mut script = Script::new();
    let sample = |heading: f32, z: f32| InputEvent::DeviceMotion {
        gravity: glam::Vec3::new(0.0, -0.9, z),
        heading,
    };
    for i in 0..=20 {
        let t = i as f32 * mirror_chores::consts::MOTION_INTERVAL;
        script.push(t, sample(100.0 + i as f32 * 1.7, i as f32 * 0.005));
    }
    script
}

#[cfg(not(target_arch = "wasm32"))]
fn run(scene: &mut dyn GameScene, script: &Script) -> bool {
    let replay = script.replay(scene, TAIL);
    for (t, output) in &replay.outputs {
        log::info!("t={t:>6.2} {output:?}");
    }
    log::info!(
        "{}: {} ticks, {} outputs, won: {}",
        scene.name(),
        replay.ticks,
        replay.outputs.len(),
        replay.won
    );
    replay.won
}

#[cfg(not(target_arch = "wasm32"))]
fn play(kind: &str, script_path: Option<&str>, settings: &Settings) -> SceneResult<bool> {
    let load = |demo: Script| -> SceneResult<Script> {
        match script_path {
            Some(path) => {
                log::info!("Replaying {path}");
                Script::from_path(path)
            }
            None => Ok(demo),
        }
    };

    Ok(match kind {
        "warehouse" => {
            let mut scene = WarehouseScene::builtin(settings)?;
            let script = load(warehouse_demo())?;
            run(&mut scene, &script)
        }
        _ => {
            let mut scene = BathScene::builtin(settings)?;
            let script = load(bath_demo(&scene))?;
            run(&mut scene, &script)
        }
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let kind = args.first().map(String::as_str).unwrap_or("bath");
    if !matches!(kind, "bath" | "warehouse") {
        eprintln!("usage: mirror-chores [bath|warehouse] [script.json] [settings.json]");
        return ExitCode::from(2);
    }
    let settings = args.get(2).map(Settings::load).unwrap_or_default();

    match play(kind, args.get(1).map(String::as_str), &settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{kind}: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
