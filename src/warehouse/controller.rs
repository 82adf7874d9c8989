//! Warehouse scene controller
//!
//! Only device motion drives this scene: the compass pans the room, the
//! tilt raises and lowers the flashlight. Finding the lens with the light
//! wins.

use glam::Vec2;

use super::animator::{self, WarehouseCue, WarehouseStage};
use super::names;
use super::nodes::WarehouseNodes;
use super::physics::{self, WarehouseContact};
use super::state::WarehouseState;
use crate::action::RunnerEvent;
use crate::contact::{Contact, ContactEvent, ContactWorld};
use crate::error::SceneResult;
use crate::feedback::{Feedback, Output, WinCallback};
use crate::input::InputEvent;
use crate::scene::{GameScene, SceneLayout, Stage};
use crate::settings::Settings;

/// Background travel per degree of heading
const PAN_PER_DEGREE: f32 = 10.0;
/// Flashlight travel per degree, against the background
const LIGHT_PER_DEGREE: f32 = 5.0;
/// Flashlight travel per unit of gravity-z
const LIGHT_PER_TILT: f32 = 1500.0;

pub struct WarehouseScene {
    stage: WarehouseStage,
    nodes: WarehouseNodes,
    state: WarehouseState,
    contacts: ContactWorld<WarehouseContact>,
    feedback: Feedback,
    clock: f32,
}

impl WarehouseScene {
    pub fn new(layout: &SceneLayout, settings: &Settings) -> SceneResult<Self> {
        let mut graph = layout.build()?;
        let nodes = WarehouseNodes::resolve(&mut graph)?;
        let contacts = physics::create_bodies(&graph, &nodes);
        let mut stage = Stage::new(graph);
        animator::walk_mouse(&mut stage, &nodes);
        animator::burn_candle(&mut stage, &nodes);
        log::info!("warehouse: loaded {} nodes", stage.graph.len());
        Ok(Self {
            stage,
            nodes,
            state: WarehouseState::new(&settings.tuning),
            contacts,
            feedback: Feedback::new(settings),
            clock: 0.0,
        })
    }

    pub fn builtin(settings: &Settings) -> SceneResult<Self> {
        Self::new(&SceneLayout::warehouse(), settings)
    }

    pub fn set_win_callback(&mut self, callback: WinCallback) {
        self.feedback.set_win_callback(callback);
    }

    pub fn state(&self) -> &WarehouseState {
        &self.state
    }

    pub fn nodes(&self) -> &WarehouseNodes {
        &self.nodes
    }

    pub fn stage(&self) -> &WarehouseStage {
        &self.stage
    }

    fn device_motion(&mut self, gravity_z: f32, heading: f32) {
        self.state.calibrate(heading, gravity_z);
        let delta = self.state.heading_delta(heading);
        let z_delta = self.state.gravity_delta(gravity_z);
        let home = self.stage.node(self.nodes.background).init_point;
        let light = Vec2::new(
            home.x - delta * LIGHT_PER_DEGREE,
            home.y + z_delta * LIGHT_PER_TILT,
        );
        log::trace!("warehouse: heading delta {delta:.1}, tilt delta {z_delta:.2}");
        animator::pan(
            &mut self.stage,
            &self.nodes,
            home.x + delta * PAN_PER_DEGREE,
            light,
        );
    }

    fn contact_began(&mut self, event: &Contact) {
        let Some(contact) = event.ordered(&[WarehouseContact::Flashlight]) else {
            return;
        };
        if contact.other.category == WarehouseContact::Lens && self.state.light_lens() {
            log::info!("warehouse: lens found at t={:.2}", self.clock);
            animator::reveal_lens(&mut self.stage, &self.nodes);
        }
    }

    fn cue(&mut self, cue: WarehouseCue) {
        match cue {
            WarehouseCue::LensRevealed => {
                if self.state.check_win() {
                    log::info!("warehouse: won at t={:.2}", self.clock);
                    self.feedback.vibrate();
                    self.feedback.won();
                }
            }
        }
    }
}

impl GameScene for WarehouseScene {
    fn name(&self) -> &'static str {
        names::SCENE
    }

    fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::DeviceMotion { gravity, heading } => self.device_motion(gravity.z, *heading),
            InputEvent::Recalibrate => {
                log::debug!("warehouse: recalibrating heading");
                self.state.recalibrate();
            }
            other => log::trace!("warehouse: ignoring {other:?}"),
        }
    }

    fn update(&mut self, dt: f32) {
        self.clock += dt;
        for event in self.stage.tick(dt) {
            match event {
                RunnerEvent::Cue { cue, .. } => self.cue(cue),
                RunnerEvent::Sound { name, .. } => self.feedback.play_sound(name),
            }
        }
        for event in self.contacts.step(&self.stage.graph) {
            if let ContactEvent::Begin(contact) = event {
                self.contact_began(&contact);
            }
        }
    }

    fn drain_outputs(&mut self) -> Vec<Output> {
        self.feedback.drain()
    }

    fn is_won(&self) -> bool {
        self.state.is_won()
    }
}
