//! Bath scene controller
//!
//! Turns host input and contact events into state mutations and animator
//! calls. The controller owns everything: stage, node table, puzzle state,
//! animator and the contact world. One `update` is one fixed tick.

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};

use super::animator::{BathAnimator, BathCue, BathStage};
use super::names::{self, sound};
use super::nodes::BathNodes;
use super::physics::{self, BathContact};
use super::state::{BathState, EarStroke, HairSide, TeethState, Valve, WaterTemperature};
use crate::action::RunnerEvent;
use crate::contact::{ContactEvent, ContactWorld};
use crate::error::SceneResult;
use crate::feedback::{Feedback, Output, WinCallback};
use crate::gesture::{OscillationStep, SwipeDirection};
use crate::input::{BlendShape, FaceFrame, InputEvent, TouchPhase};
use crate::scene::{GameScene, NodeId, SceneLayout, Stage};
use crate::settings::{Settings, Tuning};

/// Scale of a picked-up tool relative to its rest scale
const DRAG_SCALE: f32 = 1.5;
/// z of a dragged tool, above everything else
const DRAG_Z: f32 = 10.0;
const VALVE_TURN: f32 = 1.0;

pub struct BathScene {
    stage: BathStage,
    nodes: BathNodes,
    state: BathState,
    animator: BathAnimator,
    contacts: ContactWorld<BathContact>,
    feedback: Feedback,
    tuning: Tuning,
    /// Scene time in seconds, advanced by `update`
    clock: f32,
    /// Touch id -> dragged node
    touches: BTreeMap<u64, NodeId>,
}

impl BathScene {
    /// Build the scene from a layout and start the idle animations
    pub fn new(layout: &SceneLayout, settings: &Settings) -> SceneResult<Self> {
        let mut graph = layout.build()?;
        let nodes = BathNodes::resolve(&mut graph)?;
        let contacts = physics::create_bodies(&graph, &nodes);
        let state = BathState::new(&settings.tuning, nodes.hair_pieces.len() as u32);
        let mut scene = Self {
            stage: Stage::new(graph),
            nodes,
            state,
            animator: BathAnimator::new(settings.seed, settings.reduced_motion),
            contacts,
            feedback: Feedback::new(settings),
            tuning: settings.tuning.clone(),
            clock: 0.0,
            touches: BTreeMap::new(),
        };
        scene.animator.fly_patrol(&mut scene.stage, &scene.nodes);
        log::info!(
            "bath: loaded {} nodes, {} trigger bodies",
            scene.stage.graph.len(),
            scene.contacts.len()
        );
        Ok(scene)
    }

    /// Scene on the built-in layout
    pub fn builtin(settings: &Settings) -> SceneResult<Self> {
        Self::new(&SceneLayout::bath(), settings)
    }

    pub fn set_win_callback(&mut self, callback: WinCallback) {
        self.feedback.set_win_callback(callback);
    }

    pub fn state(&self) -> &BathState {
        &self.state
    }

    pub fn nodes(&self) -> &BathNodes {
        &self.nodes
    }

    pub fn stage(&self) -> &BathStage {
        &self.stage
    }

    pub fn time(&self) -> f32 {
        self.clock
    }

    /// Node currently dragged by `touch`
    pub fn dragged(&self, touch: u64) -> Option<NodeId> {
        self.touches.get(&touch).copied()
    }

    fn check_win(&mut self) {
        if self.state.check_win() {
            log::info!("bath: every chore done at t={:.2}", self.clock);
            self.feedback.vibrate();
            self.feedback.won();
        }
    }

    fn is_held(&self, node: NodeId) -> bool {
        self.touches.values().any(|n| *n == node)
    }

    // === Touches ===

    fn touch_began(&mut self, id: u64, point: Vec2) {
        let hits = self.stage.graph.nodes_at(point);
        let brush = self.nodes.toothbrush;

        // Grabbing the cup with the brush in hand takes the brush out for good
        if hits.contains(&self.nodes.magenta_cup)
            && self.stage.node(brush).in_use
            && self.state.take_toothbrush_out()
        {
            let towel_home = self.stage.node(self.nodes.towel).init_point;
            self.stage
                .node_mut(brush)
                .rehome(Vec2::new(-towel_home.x + 30.0, towel_home.y), -0.9);
            self.stage.node_mut(self.nodes.magenta_cup).init_z_position = 0.0;
            log::debug!("bath: toothbrush left the cup");
        }

        let draggable = hits.iter().copied().find(|n| {
            let node = self.stage.node(*n);
            node.draggable && !node.in_use
        });

        if let Some(target) = draggable {
            self.pick_up(id, target, point);
        } else if hits.contains(&self.nodes.water)
            && self.state.is_water_running()
            && self.state.water_temperature() != WaterTemperature::Normal
        {
            if self
                .animator
                .damage(&mut self.stage, &self.nodes, &mut self.state)
            {
                self.feedback.vibrate();
            }
        } else if hits
            .iter()
            .any(|n| *n == self.nodes.fly || *n == self.nodes.fly_body)
        {
            self.feedback.play_sound(sound::FLY_BUZZ);
        }

        self.update_cup_draggability();
    }

    fn pick_up(&mut self, id: u64, target: NodeId, point: Vec2) {
        let local = match self.stage.node(target).parent() {
            Some(parent) => self.stage.graph.convert_to_local(point, parent),
            None => point,
        };
        let node = self.stage.node_mut(target);
        node.start_using();
        node.scale = node.init_scale * DRAG_SCALE;
        node.position = local;
        node.z_position = DRAG_Z;
        self.touches.insert(id, target);
        log::debug!("bath: touch {} picked up {}", id, self.stage.node(target).name);

        if target == self.nodes.razor {
            self.animator.pick_up_razor(&mut self.stage, &self.nodes);
            if self.state.send_fly_to_razor() {
                log::info!("bath: the fly goes for the razor");
                self.animator.fly_to_razor(&mut self.stage, &self.nodes);
            }
        }
    }

    fn touch_moved(&mut self, id: u64, point: Vec2) {
        let Some(node) = self.dragged(id) else {
            return;
        };
        let local = match self.stage.node(node).parent() {
            Some(parent) => self.stage.graph.convert_to_local(point, parent),
            None => point,
        };
        self.stage.node_mut(node).position = local;

        if node == self.nodes.comb {
            if let Some((side, direction)) =
                self.state.track_comb(point, self.clock, &self.tuning.swipe)
            {
                self.hair_swiped(side, direction);
            }
            self.rearm_comb(point);
        } else if node == self.nodes.towel {
            if let Some(left) = self.state.track_wipe(point, self.clock, &self.tuning.swipe) {
                self.animator.wipe_dirt(
                    &mut self.stage,
                    &self.nodes,
                    self.tuning.dirt_alpha_step,
                );
                self.feedback.vibrate();
                log::debug!("bath: dirt wiped, {} to go", left);
                if left == 0 {
                    self.check_win();
                }
            }
            if !self.state.is_wiping()
                && self.contacts.is_contacting(self.nodes.towel, self.nodes.dirt)
            {
                self.state.start_wipe(point, self.clock);
            }
        }
    }

    /// A finished or failed stroke re-arms while the comb still touches hair
    fn rearm_comb(&mut self, point: Vec2) {
        let hair = [
            self.nodes.hair_left_initial,
            self.nodes.hair_left_fixed,
            self.nodes.hair_right_initial,
            self.nodes.hair_right_fixed_left,
            self.nodes.hair_right_fixed_right,
            self.nodes.hair_right_fixed_up,
            self.nodes.hair_right_fixed_down,
        ];
        for node in hair {
            let side = self.nodes.hair_side(node);
            if !self.state.is_combing(side) && self.contacts.is_contacting(self.nodes.comb, node) {
                self.state.comb_hair(side, point, self.clock);
            }
        }
    }

    fn hair_swiped(&mut self, side: HairSide, direction: SwipeDirection) {
        match side {
            HairSide::Left => {
                if self.state.fix_left_hair(direction) {
                    self.animator.swap(
                        &mut self.stage,
                        self.nodes.hair_left_initial,
                        self.nodes.hair_left_fixed,
                        0.0,
                    );
                    log::info!("bath: left hair combed down");
                }
            }
            HairSide::Right => {
                let previous = self.state.restyle_right_hair(direction);
                let old = previous
                    .map(|d| self.nodes.right_hair_for(d))
                    .unwrap_or(self.nodes.hair_right_initial);
                let new = self.nodes.right_hair_for(direction);
                if old != new {
                    self.animator.swap(&mut self.stage, old, new, 0.0);
                }
                log::debug!("bath: right hair styled {:?}", direction);
            }
        }
        self.feedback.vibrate();
        self.check_win();
    }

    fn touch_ended(&mut self, id: u64) {
        let Some(node) = self.touches.remove(&id) else {
            return;
        };
        self.before_end(node);
        self.stage.node_mut(node).reset();
        log::debug!("bath: touch {} released {}", id, self.stage.node(node).name);
        self.update_cup_draggability();
    }

    /// Drop checks, run while the tool is still where the finger left it
    fn before_end(&mut self, node: NodeId) {
        let graph = &self.stage.graph;
        let n = &self.nodes;

        if node == n.magenta_cup {
            if self.contacts.overlaps_now(graph, n.magenta_cup, n.mouth_brushed)
                && self.state.put_water_in_mouth()
            {
                self.feedback.vibrate();
                self.update_cheeks_alpha();
                self.animator.empty_cup(&mut self.stage, &self.nodes);
                self.stage.node_mut(self.nodes.magenta_cup).draggable = false;
                log::info!("bath: water in mouth, puff the cheeks");
            }
        } else if node == n.bandage {
            if self.contacts.overlaps_now(graph, n.bandage, n.pimple1_bleeding)
                && self.state.bandage_pimple1()
            {
                self.feedback.vibrate();
                self.animator.swap(
                    &mut self.stage,
                    self.nodes.pimple1_bleeding,
                    self.nodes.pimple1_fixed,
                    0.5,
                );
                self.stage.graph.remove_from_parent(self.nodes.bandage);
                log::info!("bath: pimple bandaged");
                self.check_win();
            }
        } else if node == n.deodorant {
            if self.contacts.overlaps_now(graph, n.deodorant, n.armpit) && self.state.start_spray() {
                self.animator.spray(&mut self.stage, &self.nodes);
            }
        } else if let Some(ear) = n.ear_for_stick(node) {
            let ear_node = n.ear(ear);
            // Refused unless this is the stick sitting in the cleaned ear
            if self.state.undock_stick(ear) {
                log::debug!("bath: stick pulled out");
                self.check_win();
            } else if self.contacts.overlaps_now(graph, node, ear_node) && self.state.dock_stick(ear) {
                let stick = self.stage.node_mut(node);
                stick.needs_reset = false;
                stick.draggable = false;
                stick.scale = stick.init_scale;
                stick.z_position = stick.init_z_position;
                self.animator.dock_stick(&mut self.stage, node, ear_node);
                log::info!("bath: stick in the {:?} ear", ear);
            }
        }
    }

    fn update_cup_draggability(&mut self) {
        let brush_held = self.stage.node(self.nodes.toothbrush).in_use;
        let needed = !self.state.is_mouth_flushing()
            && self.state.teeth_state() != TeethState::Fixed;
        self.stage.node_mut(self.nodes.magenta_cup).draggable =
            needed && (brush_held || self.state.is_toothbrush_not_in_cup());
    }

    fn update_cheeks_alpha(&mut self) {
        let alpha = if self.state.is_mouth_flushing() { 1.0 } else { 0.0 };
        self.stage.node_mut(self.nodes.left_cheek).alpha = alpha;
        self.stage.node_mut(self.nodes.right_cheek).alpha = alpha;
    }

    // === Gestures ===

    fn swipe(&mut self, point: Vec2, direction: SwipeDirection) {
        let graph = &self.stage.graph;
        if graph.contains_point(self.nodes.cold_valve, point) {
            self.valve_swiped(Valve::Cold, direction);
            return;
        }
        if graph.contains_point(self.nodes.hot_valve, point) {
            self.valve_swiped(Valve::Hot, direction);
            return;
        }

        let on_ear = [self.nodes.ear_left, self.nodes.ear_right]
            .into_iter()
            .any(|ear| graph.contains_point(ear, point));
        match self.state.docked_ear() {
            Some(ear) => {
                let stick = self.nodes.stick_for(ear);
                if on_ear || graph.contains_point(stick, point) {
                    self.ear_swiped(stick);
                }
            }
            None if on_ear => self.drop_sticks(),
            None => {}
        }
    }

    fn valve_swiped(&mut self, valve: Valve, direction: SwipeDirection) {
        let on = match direction {
            SwipeDirection::Down => true,
            SwipeDirection::Up => false,
            SwipeDirection::Left | SwipeDirection::Right => return,
        };
        if !self.state.set_valve(valve, on) {
            return;
        }
        let node = match valve {
            Valve::Cold => self.nodes.cold_valve,
            Valve::Hot => self.nodes.hot_valve,
        };
        let angle = if on { -VALVE_TURN } else { VALVE_TURN };
        self.animator.rotate_valve(&mut self.stage, node, angle);
        self.update_water();
    }

    fn update_water(&mut self) {
        let temperature = self.state.water_temperature();
        log::debug!("bath: water {:?}", temperature);
        let (stage, nodes) = (&mut self.stage, &self.nodes);
        match temperature {
            WaterTemperature::None => {
                self.animator.stop_sink_water(stage, nodes);
                self.animator.stop_steam(stage, nodes);
                self.animator.set_crane(stage, nodes, false);
            }
            WaterTemperature::Cold => {
                self.animator.run_sink_water(stage, nodes);
                self.animator.stop_steam(stage, nodes);
                self.animator.set_crane(stage, nodes, true);
            }
            WaterTemperature::Hot => {
                self.animator.run_sink_water(stage, nodes);
                self.animator.run_steam(stage, nodes);
                self.animator.set_crane(stage, nodes, false);
            }
            WaterTemperature::Normal => {
                self.animator.run_sink_water(stage, nodes);
                self.animator.stop_steam(stage, nodes);
                self.animator.set_crane(stage, nodes, false);
                if self.state.warm_up() {
                    self.animator.melt_frost(stage, nodes);
                    log::info!("bath: warm water, no more shivering");
                    self.check_win();
                }
            }
        }
    }

    fn ear_swiped(&mut self, stick: NodeId) {
        match self.state.clean_ear_stroke() {
            Some(EarStroke::Progress(left)) => {
                self.animator.wiggle_stick(&mut self.stage, stick);
                log::debug!("bath: ear stroke, {} to go", left);
            }
            Some(EarStroke::Cleaned(ear)) => {
                self.animator.wiggle_stick(&mut self.stage, stick);
                let node = self.stage.node_mut(stick);
                node.draggable = true;
                node.needs_reset = true;
                self.feedback.vibrate();
                log::info!("bath: {:?} ear clean", ear);
            }
            None => {}
        }
    }

    /// Swiping an ear with no stick docked throws any held stick back
    fn drop_sticks(&mut self) {
        let sticks = [self.nodes.stick_left, self.nodes.stick_right];
        let held: Vec<u64> = self
            .touches
            .iter()
            .filter(|(_, n)| sticks.contains(*n))
            .map(|(id, _)| *id)
            .collect();
        for id in held {
            if let Some(node) = self.touches.remove(&id) {
                self.stage.node_mut(node).reset();
            }
        }
    }

    fn pinch(&mut self, first: Vec2, second: Vec2) {
        if !self.touches.is_empty() {
            return;
        }
        let n = &self.nodes;
        let zones = [
            (n.pimple1_pinch, 0),
            (n.pimple2_pinch, 1),
            (n.pimple3_pinch, 2),
        ];
        let graph = &self.stage.graph;
        let Some((zone, index)) = zones.into_iter().find(|(zone, _)| {
            !graph.node(*zone).hidden
                && graph.contains_point(*zone, first)
                && graph.contains_point(*zone, second)
        }) else {
            return;
        };

        if index == 0 {
            if !self.state.squeeze_pimple1() {
                return;
            }
            self.stage.node_mut(zone).hidden = true;
            self.feedback.vibrate();
            self.animator.swap(
                &mut self.stage,
                self.nodes.pimple1_initial,
                self.nodes.pimple1_bleeding,
                0.5,
            );
            self.animator
                .damage(&mut self.stage, &self.nodes, &mut self.state);
            log::info!("bath: pimple squeezed, it bleeds");
        } else {
            if !self.state.pop_pimple(index) {
                return;
            }
            self.stage.node_mut(zone).hidden = true;
            self.feedback.vibrate();
            let pimple = if index == 1 {
                self.nodes.pimple2
            } else {
                self.nodes.pimple3
            };
            self.animator.pop_pimple(&mut self.stage, pimple);
            self.check_win();
        }
    }

    // === Face and device ===

    fn face(&mut self, frame: &FaceFrame) {
        use BlendShape::*;
        let stage = &mut self.stage;
        let n = &self.nodes;

        // The camera mirrors the face: left brow follows the right shapes
        let brow = |stage: &mut BathStage, id: NodeId, up: f32, down: f32| {
            let node = stage.node_mut(id);
            node.position.y = node.init_point.y + 10.0 * (up - down);
        };
        brow(stage, n.left_brow, frame.get(BrowOuterUpRight), frame.get(BrowDownRight));
        brow(stage, n.right_brow, frame.get(BrowOuterUpLeft), frame.get(BrowDownLeft));

        let gaze = Vec2::new(
            18.0 * (frame.get(EyeLookInLeft) - frame.get(EyeLookOutLeft)),
            10.0 * (frame.get(EyeLookDownLeft) - frame.get(EyeLookUpLeft)),
        );
        for eyeball in [n.left_eyeball, n.right_eyeball] {
            let node = stage.node_mut(eyeball);
            node.position = node.init_point + gaze;
        }

        let jaw = frame.get(JawOpen);
        let lip = frame.get(MouthShrugUpper);
        self.update_mouth(lip > self.tuning.mouth_open_threshold);
        let lip_offset = lip * (40.0 + 3.0 * jaw / 0.2);
        let stage = &mut self.stage;
        let n = &self.nodes;
        for (id, offset) in [
            (n.lip_top, lip_offset),
            (n.lip_bottom, -lip_offset),
            (n.jaw_top, jaw * 20.0),
            (n.jaw_bottom, -jaw * 20.0),
        ] {
            let node = stage.node_mut(id);
            node.position.y = node.init_point.y + offset;
        }

        let puff = frame.get(CheekPuff);
        for cheek in [n.left_cheek, n.right_cheek] {
            let node = stage.node_mut(cheek);
            node.scale = node.init_scale + Vec2::splat(puff * 0.1);
        }
        match self.state.rinse(puff) {
            OscillationStep::Completed => {
                log::info!("bath: rinsed, spitting");
                self.animator.spit(&mut self.stage, &self.nodes);
            }
            OscillationStep::Crossed(left) => log::trace!("bath: rinse, {} to go", left),
            OscillationStep::Idle => {}
        }
    }

    fn update_mouth(&mut self, show: bool) {
        let busy = self.state.is_mouth_busy();
        let opened = show && !busy;
        self.state.is_mouth_opened = opened;

        let n = &self.nodes;
        let stage = &mut self.stage;
        stage.node_mut(n.mouth_brushed).alpha = if busy { 1.0 } else { 0.0 };
        stage.node_mut(n.mouth_default).alpha = if busy || show { 0.0 } else { 1.0 };
        let inner = if opened { 1.0 } else { 0.0 };
        for id in [n.jaw_bottom, n.lip_bottom, n.jaw_top, n.lip_top, n.mouth_inside] {
            stage.node_mut(id).alpha = inner;
        }
    }

    fn device_motion(&mut self, gravity_x: f32) {
        if self.stage.node(self.nodes.razor).in_use {
            let limit = self.tuning.razor_rotation_limit;
            self.stage.node_mut(self.nodes.razor).rotation = (-gravity_x).clamp(-1.0, 1.0) * limit;
        }
        if self.stage.node(self.nodes.deodorant).in_use {
            match self.state.shake_deodorant(gravity_x) {
                OscillationStep::Completed => {
                    self.animator.deodorant_shaken(&mut self.stage, &self.nodes);
                    self.feedback.vibrate();
                    log::info!("bath: deodorant shaken");
                }
                OscillationStep::Crossed(left) => log::trace!("bath: shake, {} to go", left),
                OscillationStep::Idle => {}
            }
        }
    }

    fn accelerometer(&mut self, acceleration: Vec3) {
        if acceleration.length() <= self.tuning.jerk_threshold {
            return;
        }
        if !self.state.send_fly_to_web() {
            return;
        }
        // The jerk knocks the razor out of the hand
        let held: Vec<u64> = self
            .touches
            .iter()
            .filter(|(_, n)| **n == self.nodes.razor)
            .map(|(id, _)| *id)
            .collect();
        for id in held {
            self.touches.remove(&id);
        }
        self.stage.node_mut(self.nodes.razor).reset();
        log::info!("bath: razor shaken, the fly heads for the web");
        self.animator.fly_to_web(&mut self.stage, &self.nodes);
    }

    // === Contacts and cues ===

    fn contact_began(&mut self, event: &crate::contact::Contact) {
        use BathContact::*;
        let Some(contact) = event.ordered(&[Comb, ToothBrush, Cup, Razor, Towel, ToiletWater]) else {
            return;
        };
        let (main, other) = (contact.main.node, contact.other.node);
        match (contact.main.category, contact.other.category) {
            (Comb, Hair) => {
                if self.is_held(main) {
                    let point = self.stage.graph.world_position(main);
                    self.state.comb_hair(self.nodes.hair_side(other), point, self.clock);
                }
            }
            (ToothBrush, Teeth) => {
                if !self.stage.node(self.nodes.toothbrush).in_use {
                    return;
                }
                let Some(left) = self.state.brush_stroke() else {
                    return;
                };
                self.feedback.vibrate();
                if left == self.tuning.paste_removed_at {
                    self.animator.remove_paste(&mut self.stage, &self.nodes);
                }
                if left == 0 {
                    self.animator.clean_teeth(&mut self.stage, &self.nodes);
                    log::info!("bath: teeth brushed, rinse with the cup");
                }
            }
            (Cup, Water) => {
                if self.state.fill_cup() {
                    self.feedback.vibrate();
                    self.animator.fill_cup(&mut self.stage, &self.nodes);
                }
            }
            (Razor, HairPiece) => {
                if self.state.can_shave() && self.animator.fall_hair_piece(&mut self.stage, other) {
                    self.feedback.play_sound(sound::SHAVE);
                }
            }
            (Towel, Water) => {
                if self.state.wet_towel() {
                    self.animator.wet_towel(&mut self.stage, &self.nodes);
                }
            }
            (Towel, Dirt) => {
                if self.is_held(main) {
                    let point = self.stage.graph.world_position(main);
                    self.state.start_wipe(point, self.clock);
                }
            }
            (ToiletWater, Shirt) => {
                if self.state.start_shirt_wash() {
                    self.animator.wash_shirt(&mut self.stage, &self.nodes);
                }
            }
            _ => {}
        }
    }

    fn contact_ended(&mut self, event: &crate::contact::Contact) {
        use BathContact::*;
        let Some(contact) = event.ordered(&[Comb, Towel]) else {
            return;
        };
        match (contact.main.category, contact.other.category) {
            (Comb, Hair) => self.state.release_hair(self.nodes.hair_side(contact.other.node)),
            (Towel, Dirt) => self.state.stop_wipe(),
            _ => {}
        }
    }

    fn cue(&mut self, cue: BathCue) {
        log::trace!("bath: cue {:?}", cue);
        match cue {
            BathCue::DamageOver => {
                self.animator
                    .finish_damage(&mut self.stage, &self.nodes, &mut self.state);
                return;
            }
            BathCue::FlyLanded => {
                self.state.fly_arrived(false);
                return;
            }
            BathCue::FlyOnWeb => {
                self.state.fly_arrived(true);
                self.animator.fold_wings(&mut self.stage, &self.nodes);
                log::info!("bath: the fly is stuck in the web");
            }
            BathCue::TeethRinsed => {
                if self.state.finish_rinsing() {
                    log::info!("bath: teeth clean");
                }
                self.update_cheeks_alpha();
                self.update_cup_draggability();
            }
            BathCue::HairPieceFell => {
                if self.state.hair_piece_fell() {
                    log::info!("bath: clean shaven");
                }
            }
            BathCue::SmellFixed => {
                self.state.finish_spray();
            }
            BathCue::ShirtWashed => {
                self.state.finish_shirt_wash();
            }
        }
        self.check_win();
    }
}

impl GameScene for BathScene {
    fn name(&self) -> &'static str {
        names::SCENE
    }

    fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Touch { id, phase, point } => match phase {
                TouchPhase::Began => self.touch_began(*id, *point),
                TouchPhase::Moved => self.touch_moved(*id, *point),
                TouchPhase::Ended | TouchPhase::Cancelled => self.touch_ended(*id),
            },
            InputEvent::Pinch { first, second, .. } => self.pinch(*first, *second),
            InputEvent::Swipe { point, direction } => self.swipe(*point, *direction),
            InputEvent::Face(frame) => self.face(frame),
            InputEvent::DeviceMotion { gravity, .. } => self.device_motion(gravity.x),
            InputEvent::Accelerometer { acceleration } => self.accelerometer(*acceleration),
            InputEvent::Recalibrate => log::debug!("bath: nothing to recalibrate"),
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
            match event {
                ContactEvent::Begin(contact) => self.contact_began(&contact),
                ContactEvent::End(contact) => self.contact_ended(&contact),
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
