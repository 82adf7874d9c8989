//! Per-scene action scheduler
//!
//! Every scene owns one runner. `tick` advances all running action graphs by
//! a fixed timestep, in node-id order so a run is reproducible. Time left
//! over when a step finishes mid-tick flows into the next step of the same
//! sequence, which keeps staggered waits exact regardless of frame rate.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;

use super::{Action, Effect};
use crate::scene::{NodeId, SceneGraph};

/// Something the controller has to react to after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEvent<C> {
    Cue { node: NodeId, cue: C },
    Sound { node: NodeId, name: String },
}

enum Progress {
    Running,
    /// Finished with this much of the step's time unused
    Done(f32),
}

struct StepCtx<'a, C> {
    graph: &'a mut SceneGraph,
    node: NodeId,
    events: &'a mut Vec<RunnerEvent<C>>,
    cancelled: bool,
}

#[derive(Debug, Clone, Copy)]
enum Tween {
    MoveTo { from: Vec2, to: Vec2 },
    MoveBy { delta: Vec2 },
    RotateBy { angle: f32 },
    RotateTo { from: f32, to: f32 },
    ScaleTo { from: Vec2, to: Vec2 },
    FadeTo { from: f32, to: f32 },
    FadeBy { delta: f32 },
}

impl Tween {
    /// Capture start values for absolute tweens
    fn begin(&mut self, graph: &SceneGraph, node: NodeId) {
        let n = graph.node(node);
        match self {
            Tween::MoveTo { from, .. } => *from = n.position,
            Tween::RotateTo { from, .. } => *from = n.rotation,
            Tween::ScaleTo { from, .. } => *from = n.scale,
            Tween::FadeTo { from, .. } => *from = n.alpha,
            Tween::MoveBy { .. } | Tween::RotateBy { .. } | Tween::FadeBy { .. } => {}
        }
    }

    /// Apply progress going from fraction `prev` to `next`
    fn apply(&self, graph: &mut SceneGraph, node: NodeId, prev: f32, next: f32) {
        let n = graph.node_mut(node);
        match *self {
            Tween::MoveTo { from, to } => n.position = from.lerp(to, next),
            Tween::MoveBy { delta } => n.position += delta * (next - prev),
            Tween::RotateBy { angle } => n.rotation += angle * (next - prev),
            Tween::RotateTo { from, to } => n.rotation = crate::lerp(from, to, next),
            Tween::ScaleTo { from, to } => n.scale = from.lerp(to, next),
            Tween::FadeTo { from, to } => n.alpha = crate::lerp(from, to, next),
            Tween::FadeBy { delta } => {
                n.alpha = (n.alpha + delta * (next - prev)).clamp(0.0, 1.0);
            }
        }
    }
}

enum Running<C> {
    Tween {
        tween: Tween,
        elapsed: f32,
        duration: f32,
        started: bool,
    },
    Wait {
        elapsed: f32,
        duration: f32,
    },
    Instant(Option<Action<C>>),
    Sequence {
        pending: VecDeque<Action<C>>,
        current: Option<Box<Running<C>>>,
    },
    Group {
        children: Vec<Option<Running<C>>>,
    },
    Repeat {
        template: Action<C>,
        remaining: Option<u32>,
        current: Box<Running<C>>,
        zero_length: bool,
    },
}

impl<C: Clone> Running<C> {
    fn start(action: Action<C>) -> Self {
        let tween = |tween: Tween, duration: f32| Running::Tween {
            tween,
            elapsed: 0.0,
            duration,
            started: false,
        };
        match action {
            Action::MoveTo { target, duration } => tween(
                Tween::MoveTo {
                    from: Vec2::ZERO,
                    to: target,
                },
                duration,
            ),
            Action::MoveBy { delta, duration } => tween(Tween::MoveBy { delta }, duration),
            Action::RotateBy { angle, duration } => tween(Tween::RotateBy { angle }, duration),
            Action::RotateTo { angle, duration } => {
                tween(Tween::RotateTo { from: 0.0, to: angle }, duration)
            }
            Action::ScaleTo { scale, duration } => tween(
                Tween::ScaleTo {
                    from: Vec2::ONE,
                    to: scale,
                },
                duration,
            ),
            Action::FadeTo { alpha, duration } => {
                tween(Tween::FadeTo { from: 0.0, to: alpha }, duration)
            }
            Action::FadeBy { delta, duration } => tween(Tween::FadeBy { delta }, duration),
            Action::Wait(duration) => Running::Wait {
                elapsed: 0.0,
                duration,
            },
            Action::Sequence(actions) => Running::Sequence {
                pending: actions.into(),
                current: None,
            },
            Action::Group(actions) => Running::Group {
                children: actions
                    .into_iter()
                    .map(|a| Some(Running::start(a)))
                    .collect(),
            },
            Action::Repeat { action, count } => Running::repeat(*action, Some(count)),
            Action::RepeatForever(action) => Running::repeat(*action, None),
            instant @ (Action::SetTexture(_) | Action::PlaySound(_) | Action::Run(_)) => {
                Running::Instant(Some(instant))
            }
        }
    }

    fn repeat(template: Action<C>, remaining: Option<u32>) -> Self {
        let zero_length = template.duration() == Some(0.0);
        let current = Box::new(Running::start(template.clone()));
        Running::Repeat {
            template,
            remaining,
            current,
            zero_length,
        }
    }

    fn step(&mut self, ctx: &mut StepCtx<'_, C>, dt: f32) -> Progress {
        match self {
            Running::Tween {
                tween,
                elapsed,
                duration,
                started,
            } => {
                let first = !*started;
                if first {
                    tween.begin(ctx.graph, ctx.node);
                    *started = true;
                }
                let fraction = |t: f32| {
                    if *duration <= 0.0 {
                        1.0
                    } else {
                        (t / *duration).min(1.0)
                    }
                };
                // Zero-length tweens jump straight to the end on their first step
                let prev = if first { 0.0 } else { fraction(*elapsed) };
                *elapsed += dt;
                let next = fraction(*elapsed);
                tween.apply(ctx.graph, ctx.node, prev, next);
                if *elapsed >= *duration {
                    Progress::Done(*elapsed - duration.max(0.0))
                } else {
                    Progress::Running
                }
            }
            Running::Wait { elapsed, duration } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    Progress::Done(*elapsed - *duration)
                } else {
                    Progress::Running
                }
            }
            Running::Instant(action) => {
                if let Some(action) = action.take() {
                    execute(action, ctx);
                }
                Progress::Done(dt)
            }
            Running::Sequence { pending, current } => {
                let mut left = dt;
                loop {
                    if ctx.cancelled {
                        return Progress::Running;
                    }
                    if current.is_none() {
                        match pending.pop_front() {
                            Some(next) => *current = Some(Box::new(Running::start(next))),
                            None => return Progress::Done(left),
                        }
                    }
                    let Some(running) = current.as_mut() else {
                        return Progress::Done(left);
                    };
                    match running.step(ctx, left) {
                        Progress::Running => return Progress::Running,
                        Progress::Done(rest) => {
                            *current = None;
                            left = rest;
                        }
                    }
                }
            }
            Running::Group { children } => {
                let mut finished_left: Option<f32> = None;
                for slot in children.iter_mut() {
                    if let Some(child) = slot {
                        if let Progress::Done(rest) = child.step(ctx, dt) {
                            *slot = None;
                            finished_left = Some(finished_left.map_or(rest, |l| l.min(rest)));
                        }
                    }
                }
                if children.iter().all(Option::is_none) {
                    Progress::Done(finished_left.unwrap_or(dt))
                } else {
                    Progress::Running
                }
            }
            Running::Repeat {
                template,
                remaining,
                current,
                zero_length,
            } => {
                if *remaining == Some(0) {
                    return Progress::Done(dt);
                }
                let mut left = dt;
                loop {
                    match current.step(ctx, left) {
                        Progress::Running => return Progress::Running,
                        Progress::Done(rest) => {
                            if let Some(count) = remaining {
                                *count -= 1;
                                if *count == 0 {
                                    return Progress::Done(rest);
                                }
                            }
                            *current = Box::new(Running::start(template.clone()));
                            left = rest;
                            if ctx.cancelled || (*zero_length && remaining.is_none()) {
                                // One pass per tick for instant bodies
                                return Progress::Running;
                            }
                        }
                    }
                }
            }
        }
    }
}

fn execute<C>(action: Action<C>, ctx: &mut StepCtx<'_, C>) {
    match action {
        Action::SetTexture(texture) => ctx.graph.node_mut(ctx.node).texture = Some(texture),
        Action::PlaySound(name) => ctx.events.push(RunnerEvent::Sound {
            node: ctx.node,
            name,
        }),
        Action::Run(effect) => apply_effect(effect, ctx),
        _ => {}
    }
}

fn apply_effect<C>(effect: Effect<C>, ctx: &mut StepCtx<'_, C>) {
    match effect {
        Effect::FlipX => ctx.graph.node_mut(ctx.node).scale.x *= -1.0,
        Effect::ToggleZ { front, back } => {
            let node = ctx.graph.node_mut(ctx.node);
            node.z_position = if node.z_position == front { back } else { front };
        }
        Effect::SetHidden(hidden) => ctx.graph.node_mut(ctx.node).hidden = hidden,
        Effect::RemoveAllActions => ctx.cancelled = true,
        Effect::Reparent {
            parent,
            position,
            scale,
            rotation,
        } => {
            ctx.graph.reparent_keep_world(ctx.node, parent);
            let node = ctx.graph.node_mut(ctx.node);
            if let Some(position) = position {
                node.position = position;
            }
            if let Some(scale) = scale {
                node.scale = scale;
            }
            if let Some(rotation) = rotation {
                node.rotation = rotation;
            }
        }
        Effect::Cue(cue) => ctx.events.push(RunnerEvent::Cue {
            node: ctx.node,
            cue,
        }),
    }
}

/// Runs action graphs against scene nodes
pub struct ActionRunner<C> {
    running: BTreeMap<NodeId, Vec<Running<C>>>,
}

impl<C: Clone> Default for ActionRunner<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> ActionRunner<C> {
    pub fn new() -> Self {
        Self {
            running: BTreeMap::new(),
        }
    }

    /// Submit an action to a node; it starts on the next tick
    pub fn run(&mut self, node: NodeId, action: Action<C>) {
        self.running
            .entry(node)
            .or_default()
            .push(Running::start(action));
    }

    pub fn has_actions(&self, node: NodeId) -> bool {
        self.running.get(&node).is_some_and(|a| !a.is_empty())
    }

    pub fn action_count(&self, node: NodeId) -> usize {
        self.running.get(&node).map_or(0, Vec::len)
    }

    /// Cancel everything queued on the node
    pub fn remove_all_actions(&mut self, node: NodeId) {
        self.running.remove(&node);
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Advance every running action by `dt` seconds
    pub fn tick(&mut self, graph: &mut SceneGraph, dt: f32) -> Vec<RunnerEvent<C>> {
        let mut events = Vec::new();
        let ids: Vec<NodeId> = self.running.keys().copied().collect();
        for id in ids {
            let Some(mut actions) = self.running.remove(&id) else {
                continue;
            };
            let mut ctx = StepCtx {
                graph: &mut *graph,
                node: id,
                events: &mut events,
                cancelled: false,
            };
            actions.retain_mut(|action| {
                if ctx.cancelled {
                    return false;
                }
                matches!(action.step(&mut ctx, dt), Progress::Running)
            });
            if ctx.cancelled {
                actions.clear();
            }
            if !actions.is_empty() {
                self.running.insert(id, actions);
            }
        }
        events
    }

    /// Tick repeatedly for `seconds`, collecting every event. A step that
    /// is not positive runs nothing.
    pub fn advance(&mut self, graph: &mut SceneGraph, seconds: f32, dt: f32) -> Vec<RunnerEvent<C>> {
        let mut events = Vec::new();
        if dt.is_nan() || dt <= 0.0 {
            return events;
        }
        let steps = (seconds / dt).round() as u32;
        for _ in 0..steps {
            events.extend(self.tick(graph, dt));
        }
        events
    }
}
