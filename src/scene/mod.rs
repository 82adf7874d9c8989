//! Scene graph, layouts and the stage a scene plays on
//!
//! A [`Stage`] couples the node tree with the action runner that animates
//! it. Scene controllers own exactly one stage and step it at the fixed
//! tick; nothing else mutates node transforms.

pub mod graph;
pub mod layout;
pub mod node;

pub use graph::{Bounds, ROOT_NAME, SceneGraph};
pub use layout::{NodeSpec, SceneLayout};
pub use node::{Node, NodeId, ResetHook};

use crate::action::{Action, ActionRunner, RunnerEvent};
use crate::consts::{MAX_SUBSTEPS, TICK_DT};
use crate::feedback::Output;
use crate::input::InputEvent;

/// Node tree plus its action scheduler
pub struct Stage<C> {
    pub graph: SceneGraph,
    pub runner: ActionRunner<C>,
}

impl<C: Clone> Stage<C> {
    pub fn new(graph: SceneGraph) -> Self {
        Self {
            graph,
            runner: ActionRunner::new(),
        }
    }

    pub fn run(&mut self, node: NodeId, action: Action<C>) {
        self.runner.run(node, action);
    }

    pub fn has_actions(&self, node: NodeId) -> bool {
        self.runner.has_actions(node)
    }

    pub fn remove_all_actions(&mut self, node: NodeId) {
        self.runner.remove_all_actions(node);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.graph.node(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.graph.node_mut(id)
    }

    /// Step every running action once
    pub fn tick(&mut self, dt: f32) -> Vec<RunnerEvent<C>> {
        self.runner.tick(&mut self.graph, dt)
    }
}

/// A playable scene driven by host input
pub trait GameScene {
    fn name(&self) -> &'static str;

    /// Interpret one input event against the current state
    fn handle(&mut self, event: &InputEvent);

    /// Advance animations and contact detection by one tick
    fn update(&mut self, dt: f32);

    /// Take the feedback produced since the last call
    fn drain_outputs(&mut self) -> Vec<Output>;

    fn is_won(&self) -> bool;
}

/// Fixed-timestep accumulator for hosts with a variable frame rate
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed ticks as `frame_dt` covers
    pub fn advance(&mut self, scene: &mut dyn GameScene, frame_dt: f32) -> Vec<Output> {
        // Long stalls (backgrounded app) are not caught up
        self.accumulator += frame_dt.min(0.1);
        let mut outputs = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            scene.update(TICK_DT);
            outputs.extend(scene.drain_outputs());
            self.accumulator -= TICK_DT;
            substeps += 1;
        }
        outputs
    }
}
