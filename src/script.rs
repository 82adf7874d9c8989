//! Timestamped input scripts
//!
//! A script is a JSON list of `{ "at": seconds, "event": InputEvent }`
//! steps. Replaying one feeds every event once the fixed-tick clock reaches
//! its timestamp, so a recorded session plays back identically.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_DT;
use crate::error::SceneResult;
use crate::feedback::Output;
use crate::input::InputEvent;
use crate::scene::GameScene;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Seconds since the start of the replay
    pub at: f32,
    pub event: InputEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

/// What came out of a replay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replay {
    /// Outputs in emission order, stamped with the tick time
    pub outputs: Vec<(f32, Output)>,
    pub ticks: u32,
    pub won: bool,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at `at` seconds
    pub fn push(&mut self, at: f32, event: InputEvent) -> &mut Self {
        self.steps.push(ScriptStep { at, event });
        self
    }

    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Time of the last step
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|s| s.at).fold(0.0, f32::max)
    }

    /// Play the script against `scene`, then keep ticking for `tail`
    /// seconds so trailing animations finish.
    pub fn replay(&self, scene: &mut dyn GameScene, tail: f32) -> Replay {
        let mut steps: Vec<&ScriptStep> = self.steps.iter().collect();
        // Stable: equal timestamps keep file order
        steps.sort_by(|a, b| a.at.total_cmp(&b.at));

        let end = self.duration() + tail;
        let mut replay = Replay::default();
        let mut next = 0;
        let mut clock = 0.0_f32;
        loop {
            while next < steps.len() && steps[next].at <= clock {
                log::trace!("t={:.3} {:?}", clock, steps[next].event);
                scene.handle(&steps[next].event);
                next += 1;
            }
            scene.update(TICK_DT);
            replay.ticks += 1;
            clock = replay.ticks as f32 * TICK_DT;
            replay
                .outputs
                .extend(scene.drain_outputs().into_iter().map(|o| (clock, o)));
            if clock >= end && next >= steps.len() {
                break;
            }
        }
        replay.won = scene.is_won();
        replay
    }
}
