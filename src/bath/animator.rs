//! Bath animation sequencer
//!
//! One method per game move. Each builds an action graph, submits it to the
//! stage and returns at once. Long moves report back through a trailing
//! [`BathCue`]; guards keep a move from stacking on top of itself.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::names::{sound, tex};
use super::nodes::BathNodes;
use super::state::BathState;
use crate::action::{Action, Effect};
use crate::scene::{NodeId, Stage};

/// Notifications bath animations hand back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BathCue {
    DamageOver,
    TeethRinsed,
    FlyLanded,
    FlyOnWeb,
    HairPieceFell,
    SmellFixed,
    ShirtWashed,
}

pub type BathStage = Stage<BathCue>;
type A = Action<BathCue>;

const BROW_TILT: f32 = 0.3;
const DAMAGE_TIME: f32 = 1.0;
const WATER_FRAME: f32 = 0.15;
const FADE: f32 = 0.3;
const STEAM_DELAY: f32 = 2.0;
const VALVE_TIME: f32 = 0.5;
/// Fly patrol: vertical leg length and leg durations
const PATROL_DROP: f32 = 130.0;
const PATROL_ACROSS: f32 = 2.0;
const PATROL_DOWN: f32 = 4.0;
const FLY_FLIGHT: f32 = 1.0;
/// Where the fly sits on the razor, in razor space
const FLY_ON_RAZOR: Vec2 = Vec2::new(0.0, 72.0);
const HAIR_DRIFT: f32 = 50.0;
const HAIR_SPIN: f32 = 4.0;
const HAIR_DROP: f32 = 200.0;
const SPRAY_DELAY: f32 = 0.2;

pub struct BathAnimator {
    rng: Pcg32,
    reduced_motion: bool,
    // Loop guards; a stop that is still fading out does not block a restart
    sink_running: bool,
    steam_running: bool,
}

/// Identical bodies started one `delay` apart, `index` being the slot
fn staggered(index: usize, delay: f32, body: impl IntoIterator<Item = A>) -> Vec<A> {
    let mut steps: Vec<A> = (0..index).map(|_| A::wait(delay)).collect();
    steps.extend(body);
    steps
}

impl BathAnimator {
    pub fn new(seed: u64, reduced_motion: bool) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            reduced_motion,
            sink_running: false,
            steam_running: false,
        }
    }

    // === Face ===

    /// Wince: brows tilt, eyes squeeze for a second. Returns false while
    /// the previous wince is still playing.
    pub fn damage(&mut self, stage: &mut BathStage, nodes: &BathNodes, state: &mut BathState) -> bool {
        if state.is_taking_damage {
            return false;
        }
        state.is_taking_damage = true;

        let tilt = |angle: f32| {
            A::sequence([
                A::rotate_by(angle, 0.0),
                A::wait(DAMAGE_TIME),
                A::rotate_by(-angle, 0.0),
            ])
        };
        stage.run(nodes.left_brow, tilt(-BROW_TILT));
        stage.run(nodes.right_brow, tilt(BROW_TILT));

        stage.node_mut(nodes.left_eyeball).hidden = true;
        stage.node_mut(nodes.right_eyeball).hidden = true;

        stage.run(
            nodes.eyes,
            A::sequence([
                A::sound(sound::OUCH),
                A::texture(tex::EYES_DAMAGED),
                A::wait(DAMAGE_TIME),
                A::texture(tex::EYES_DEFAULT),
                A::cue(BathCue::DamageOver),
            ]),
        );
        true
    }

    pub fn finish_damage(&self, stage: &mut BathStage, nodes: &BathNodes, state: &mut BathState) {
        stage.node_mut(nodes.left_eyeball).hidden = false;
        stage.node_mut(nodes.right_eyeball).hidden = false;
        state.is_taking_damage = false;
    }

    /// Squeeze a small pimple flat
    pub fn pop_pimple(&self, stage: &mut BathStage, pimple: NodeId) {
        stage.run(pimple, A::group([A::sound(sound::SQUEEZE), A::fade_out(0.5)]));
    }

    /// Fade the frost off the mirror
    pub fn melt_frost(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.frost, A::fade_out(1.0));
    }

    /// Cross-fade from one sprite to another
    pub fn swap(&self, stage: &mut BathStage, old: NodeId, new: NodeId, duration: f32) {
        stage.run(old, A::fade_out(duration));
        stage.run(new, A::fade_in(duration));
    }

    pub fn spit(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.left_cheek, A::fade_out(FADE));
        stage.run(nodes.right_cheek, A::fade_out(FADE));
        let last = nodes.falling_water.len() - 1;
        for (i, drop) in nodes.falling_water.iter().enumerate() {
            let mut steps = staggered(i, FADE, [A::fade_in(FADE), A::wait(FADE), A::fade_out(FADE)]);
            if i == 0 {
                steps.insert(0, A::sound(sound::SPIT));
            }
            if i == last {
                steps.push(A::cue(BathCue::TeethRinsed));
            }
            stage.run(*drop, A::sequence(steps));
        }
    }

    // === Sink ===

    pub fn run_sink_water(&mut self, stage: &mut BathStage, nodes: &BathNodes) -> bool {
        if self.sink_running {
            return false;
        }
        self.sink_running = true;
        stage.remove_all_actions(nodes.water);
        stage.run(nodes.water, A::frames(&tex::TAP_WATER, WATER_FRAME).forever());
        stage.run(nodes.water, A::fade_in(FADE));
        true
    }

    pub fn stop_sink_water(&mut self, stage: &mut BathStage, nodes: &BathNodes) -> bool {
        if !self.sink_running {
            return false;
        }
        self.sink_running = false;
        stage.run(
            nodes.water,
            A::sequence([A::fade_out(FADE), A::run(Effect::RemoveAllActions)]),
        );
        true
    }

    /// Three puffs on a staggered loop
    pub fn run_steam(&mut self, stage: &mut BathStage, nodes: &BathNodes) -> bool {
        if self.steam_running {
            return false;
        }
        self.steam_running = true;
        let puff = [
            A::group([A::scale_to(1.5, 2.0), A::fade_to(1.0, 0.8)]),
            A::fade_to(0.0, 0.8),
            A::scale_to(1.0, 0.0),
        ];
        for (i, steam) in nodes.steam.iter().enumerate() {
            let steps = staggered(i, STEAM_DELAY, puff.clone());
            stage.remove_all_actions(*steam);
            stage.run(*steam, A::sequence(steps).forever());
        }
        true
    }

    pub fn stop_steam(&mut self, stage: &mut BathStage, nodes: &BathNodes) -> bool {
        if !self.steam_running {
            return false;
        }
        self.steam_running = false;
        for steam in nodes.steam {
            stage.run(
                steam,
                A::sequence([A::fade_out(FADE), A::run(Effect::RemoveAllActions)]),
            );
        }
        true
    }

    pub fn rotate_valve(&self, stage: &mut BathStage, valve: NodeId, angle: f32) {
        stage.run(
            valve,
            A::group([A::sound(sound::VALVE), A::rotate_by(angle, VALVE_TIME)]),
        );
    }

    pub fn set_crane(&self, stage: &mut BathStage, nodes: &BathNodes, cold: bool) {
        let texture = if cold { tex::CRANE_COLD } else { tex::CRANE_DEFAULT };
        stage.run(nodes.crane, A::texture(texture));
    }

    // === Teeth ===

    pub fn fill_cup(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.magenta_cup, A::texture(tex::CUP_FILLED));
    }

    pub fn empty_cup(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.magenta_cup, A::texture(tex::CUP));
    }

    pub fn remove_paste(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.toothbrush, A::texture(tex::TOOTHBRUSH));
    }

    pub fn clean_teeth(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.jaw_top, A::texture(tex::JAW_TOP_FIXED));
        stage.run(nodes.jaw_bottom, A::texture(tex::JAW_BOTTOM_FIXED));
    }

    // === Dirt ===

    pub fn wet_towel(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(
            nodes.towel,
            A::group([A::sound(sound::SPLASH), A::texture(tex::TOWEL_WET)]),
        );
    }

    pub fn wipe_dirt(&self, stage: &mut BathStage, nodes: &BathNodes, step: f32) -> bool {
        if stage.node(nodes.dirt).alpha <= 0.0 {
            return false;
        }
        stage.run(nodes.dirt, A::fade_by(-step, 0.2));
        true
    }

    // === Razor and the fly ===

    /// Takes effect at once, not on the next tick
    pub fn pick_up_razor(&self, stage: &mut BathStage, nodes: &BathNodes) {
        let razor = stage.node_mut(nodes.razor);
        razor.texture = Some(tex::RAZOR_IN_USE.to_owned());
        razor.rotation = 0.0;
    }

    /// Rectangular patrol around the top corners, plus wing and nose loops
    pub fn fly_patrol(&self, stage: &mut BathStage, nodes: &BathNodes) {
        let start = stage.node(nodes.fly).init_point;
        let left_low = Vec2::new(start.x, start.y - PATROL_DROP);
        let right_low = Vec2::new(-start.x, start.y - PATROL_DROP);
        let right_high = Vec2::new(-start.x, start.y);
        let turn = || {
            [
                A::run(Effect::ToggleZ {
                    front: 0.0,
                    back: -2.0,
                }),
                A::run(Effect::FlipX),
            ]
        };
        let mut path = vec![
            A::move_to(right_high, PATROL_ACROSS),
            A::move_to(right_low, PATROL_DOWN),
        ];
        path.extend(turn());
        path.push(A::move_to(left_low, PATROL_ACROSS));
        path.push(A::move_to(start, PATROL_DOWN));
        path.extend(turn().into_iter().rev());
        stage.run(nodes.fly, A::sequence(path).forever());

        let wings = A::sequence([
            A::wait(0.1),
            A::texture(tex::FLY_WINGS[0]),
            A::wait(0.1),
            A::texture(tex::FLY_WINGS[1]),
        ]);
        stage.run(nodes.fly_wings, wings.forever());
        if !self.reduced_motion {
            stage.run(
                nodes.fly_nose,
                A::sequence([A::scale_to(1.6, 0.5), A::scale_to(1.0, 0.5)]).forever(),
            );
        }
    }

    /// Break off the patrol and land on the razor blade
    pub fn fly_to_razor(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.remove_all_actions(nodes.fly);
        let target = stage.graph.world_position(nodes.razor_top);
        stage.run(
            nodes.fly,
            A::sequence([
                A::sound(sound::FLY_BUZZ),
                A::move_to(target, FLY_FLIGHT),
                A::run(Effect::Reparent {
                    parent: nodes.razor,
                    position: Some(FLY_ON_RAZOR),
                    scale: Some(Vec2::splat(0.5)),
                    rotation: Some(0.0),
                }),
                A::cue(BathCue::FlyLanded),
            ]),
        );
    }

    /// Take off from the razor and stick to the web
    pub fn fly_to_web(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.remove_all_actions(nodes.fly);
        let root = stage.graph.root();
        let web = stage.graph.world_position(nodes.web);
        stage.run(
            nodes.fly,
            A::sequence([
                A::run(Effect::Reparent {
                    parent: root,
                    position: None,
                    scale: Some(Vec2::ONE),
                    rotation: Some(0.0),
                }),
                A::sound(sound::FLY_BUZZ),
                A::move_to(web, FLY_FLIGHT * 1.5),
                A::run(Effect::Reparent {
                    parent: nodes.web,
                    position: Some(Vec2::ZERO),
                    scale: None,
                    rotation: None,
                }),
                A::cue(BathCue::FlyOnWeb),
            ]),
        );
    }

    /// Stuck flies stop flapping
    pub fn fold_wings(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.remove_all_actions(nodes.fly_wings);
        stage.remove_all_actions(nodes.fly_nose);
        stage.node_mut(nodes.fly_nose).scale = Vec2::ONE;
    }

    /// Drop a shaved hair piece with a random drift; false if already falling
    pub fn fall_hair_piece(&mut self, stage: &mut BathStage, piece: NodeId) -> bool {
        let node = stage.node_mut(piece);
        if node.in_use {
            return false;
        }
        node.in_use = true;

        let drift = self.rng.random_range(-HAIR_DRIFT..=HAIR_DRIFT);
        let spin = if self.reduced_motion {
            0.0
        } else {
            self.rng.random_range(-HAIR_SPIN..=HAIR_SPIN)
        };
        let fall = A::group([
            A::move_by(Vec2::new(drift, -HAIR_DROP), 2.0),
            A::rotate_by(spin, 2.0),
            A::sequence([A::wait(1.5), A::fade_out(0.5)]),
        ]);
        stage.run(
            piece,
            A::sequence([
                fall,
                A::run(Effect::SetHidden(true)),
                A::cue(BathCue::HairPieceFell),
            ]),
        );
        true
    }

    // === Ears ===

    /// Slide a released stick into its ear
    pub fn dock_stick(&self, stage: &mut BathStage, stick: NodeId, ear: NodeId) {
        let target = stage.graph.world_position(ear);
        stage.run(
            stick,
            A::group([A::move_to(target, 0.2), A::rotate_to(0.0, 0.2)]),
        );
    }

    pub fn wiggle_stick(&self, stage: &mut BathStage, stick: NodeId) {
        stage.run(
            stick,
            A::sequence([
                A::sound(sound::EAR_CLEAN),
                A::rotate_by(0.2, 0.1),
                A::rotate_by(-0.4, 0.2),
                A::rotate_by(0.2, 0.1),
            ]),
        );
    }

    // === Smell and shirt ===

    pub fn deodorant_shaken(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(nodes.deodorant, A::texture(tex::DEODORANT_SHAKEN));
    }

    /// Three staggered bursts; the smell clears as the last one fades
    pub fn spray(&self, stage: &mut BathStage, nodes: &BathNodes) {
        let last = nodes.spray.len() - 1;
        for (i, burst) in nodes.spray.iter().enumerate() {
            let mut steps = staggered(
                i,
                SPRAY_DELAY,
                [
                    A::sound(sound::SPRAY),
                    A::fade_in(0.2),
                    A::wait(0.2),
                    A::fade_out(0.2),
                ],
            );
            if i == last {
                steps.push(A::cue(BathCue::SmellFixed));
            }
            stage.run(*burst, A::sequence(steps));
        }
        stage.run(
            nodes.smell,
            A::sequence([A::wait(SPRAY_DELAY * last as f32), A::fade_out(0.6)]),
        );
    }

    pub fn wash_shirt(&self, stage: &mut BathStage, nodes: &BathNodes) {
        stage.run(
            nodes.shirt_stain,
            A::sequence([
                A::sound(sound::SPLASH),
                A::fade_out(1.0),
                A::cue(BathCue::ShirtWashed),
            ]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::RunnerEvent;
    use crate::consts::TICK_DT;
    use crate::scene::SceneLayout;
    use crate::settings::Tuning;

    struct Fixture {
        stage: BathStage,
        nodes: BathNodes,
        state: BathState,
        animator: BathAnimator,
    }

    fn fixture() -> Fixture {
        let mut graph = SceneLayout::bath().build().unwrap();
        let nodes = BathNodes::resolve(&mut graph).unwrap();
        let state = BathState::new(&Tuning::default(), nodes.hair_pieces.len() as u32);
        Fixture {
            stage: Stage::new(graph),
            nodes,
            state,
            animator: BathAnimator::new(7, false),
        }
    }

    fn run_for(stage: &mut BathStage, seconds: f32) -> Vec<BathCue> {
        stage
            .runner
            .advance(&mut stage.graph, seconds, TICK_DT)
            .into_iter()
            .filter_map(|e| match e {
                RunnerEvent::Cue { cue, .. } => Some(cue),
                RunnerEvent::Sound { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_damage_is_not_reentrant() {
        let mut f = fixture();
        assert!(f.animator.damage(&mut f.stage, &f.nodes, &mut f.state));
        assert!(!f.animator.damage(&mut f.stage, &f.nodes, &mut f.state));
        assert!(f.stage.node(f.nodes.left_eyeball).hidden);

        run_for(&mut f.stage, 0.5);
        assert_eq!(
            f.stage.node(f.nodes.eyes).texture.as_deref(),
            Some(tex::EYES_DAMAGED)
        );
        assert!((f.stage.node(f.nodes.left_brow).rotation + BROW_TILT).abs() < 1e-5);

        let cues = run_for(&mut f.stage, 0.6);
        assert_eq!(cues, vec![BathCue::DamageOver]);
        f.animator.finish_damage(&mut f.stage, &f.nodes, &mut f.state);
        assert!(!f.stage.node(f.nodes.left_eyeball).hidden);
        assert!(f.stage.node(f.nodes.left_brow).rotation.abs() < 1e-5);
        assert!(f.animator.damage(&mut f.stage, &f.nodes, &mut f.state));
    }

    #[test]
    fn test_sink_water_start_and_stop() {
        let mut f = fixture();
        assert!(!f.animator.stop_sink_water(&mut f.stage, &f.nodes));
        assert!(f.animator.run_sink_water(&mut f.stage, &f.nodes));
        assert!(!f.animator.run_sink_water(&mut f.stage, &f.nodes));
        run_for(&mut f.stage, 0.5);
        assert_eq!(f.stage.node(f.nodes.water).alpha, 1.0);
        assert!(f.stage.has_actions(f.nodes.water));

        assert!(f.animator.stop_sink_water(&mut f.stage, &f.nodes));
        run_for(&mut f.stage, 0.5);
        assert_eq!(f.stage.node(f.nodes.water).alpha, 0.0);
        assert!(!f.stage.has_actions(f.nodes.water));
    }

    #[test]
    fn test_sink_water_restarts_during_fade_out() {
        let mut f = fixture();
        f.animator.run_sink_water(&mut f.stage, &f.nodes);
        run_for(&mut f.stage, 0.5);
        f.animator.stop_sink_water(&mut f.stage, &f.nodes);
        run_for(&mut f.stage, 0.1);
        assert!(f.animator.run_sink_water(&mut f.stage, &f.nodes));
        run_for(&mut f.stage, 1.0);
        assert_eq!(f.stage.node(f.nodes.water).alpha, 1.0);
        assert!(f.stage.has_actions(f.nodes.water));
    }

    #[test]
    fn test_steam_staggers_two_seconds_apart() {
        let mut f = fixture();
        assert!(f.animator.run_steam(&mut f.stage, &f.nodes));
        assert!(!f.animator.run_steam(&mut f.stage, &f.nodes));
        let visible = |stage: &BathStage| -> Vec<bool> {
            f.nodes.steam.iter().map(|s| stage.node(*s).alpha > 0.0).collect()
        };
        run_for(&mut f.stage, 0.5);
        assert_eq!(visible(&f.stage), vec![true, false, false]);
        run_for(&mut f.stage, 2.0);
        assert_eq!(visible(&f.stage), vec![true, true, false]);
        run_for(&mut f.stage, 2.0);
        assert_eq!(visible(&f.stage), vec![true, true, true]);

        assert!(f.animator.stop_steam(&mut f.stage, &f.nodes));
        run_for(&mut f.stage, 0.5);
        assert_eq!(visible(&f.stage), vec![false, false, false]);
        assert!(!f.stage.has_actions(f.nodes.steam[2]));
    }

    #[test]
    fn test_fly_patrol_and_landing() {
        let mut f = fixture();
        let start = f.stage.node(f.nodes.fly).init_point;
        f.animator.fly_patrol(&mut f.stage, &f.nodes);
        run_for(&mut f.stage, PATROL_ACROSS);
        let pos = f.stage.node(f.nodes.fly).position;
        assert!((pos - Vec2::new(-start.x, start.y)).length() < 1e-2);
        run_for(&mut f.stage, PATROL_DOWN + 0.1);
        assert_eq!(f.stage.node(f.nodes.fly).z_position, -2.0);
        assert_eq!(f.stage.node(f.nodes.fly).scale.x, -1.0);

        f.animator.fly_to_razor(&mut f.stage, &f.nodes);
        let cues = run_for(&mut f.stage, FLY_FLIGHT + 0.1);
        assert_eq!(cues, vec![BathCue::FlyLanded]);
        let fly = f.stage.node(f.nodes.fly);
        assert_eq!(fly.parent(), Some(f.nodes.razor));
        assert_eq!(fly.position, FLY_ON_RAZOR);
        assert_eq!(fly.scale, Vec2::splat(0.5));

        f.animator.fly_to_web(&mut f.stage, &f.nodes);
        let cues = run_for(&mut f.stage, FLY_FLIGHT * 1.5 + 0.1);
        assert_eq!(cues, vec![BathCue::FlyOnWeb]);
        assert_eq!(f.stage.node(f.nodes.fly).parent(), Some(f.nodes.web));
        let web = f.stage.graph.world_position(f.nodes.web);
        assert!((f.stage.graph.world_position(f.nodes.fly) - web).length() < 1e-3);
    }

    #[test]
    fn test_hair_piece_falls_once_and_hides() {
        let mut f = fixture();
        let piece = f.nodes.hair_pieces[0];
        let start = f.stage.node(piece).position;
        assert!(f.animator.fall_hair_piece(&mut f.stage, piece));
        assert!(!f.animator.fall_hair_piece(&mut f.stage, piece));
        let cues = run_for(&mut f.stage, 2.1);
        assert_eq!(cues, vec![BathCue::HairPieceFell]);
        let node = f.stage.node(piece);
        assert!(node.hidden);
        assert!((node.position.y - (start.y - HAIR_DROP)).abs() < 1e-2);
        assert!((node.position.x - start.x).abs() <= HAIR_DRIFT + 1e-3);
    }

    #[test]
    fn test_hair_drift_is_seeded() {
        let drift = |seed: u64| {
            let mut f = fixture();
            f.animator = BathAnimator::new(seed, false);
            let piece = f.nodes.hair_pieces[3];
            f.animator.fall_hair_piece(&mut f.stage, piece);
            run_for(&mut f.stage, 2.1);
            f.stage.node(piece).position
        };
        assert_eq!(drift(11), drift(11));
    }

    #[test]
    fn test_spit_cue_after_last_drop() {
        let mut f = fixture();
        f.animator.spit(&mut f.stage, &f.nodes);
        // Last drop waits 2 * 0.3 then runs 0.9
        assert!(run_for(&mut f.stage, 1.4).is_empty());
        assert_eq!(run_for(&mut f.stage, 0.2), vec![BathCue::TeethRinsed]);
        assert_eq!(f.stage.node(f.nodes.left_cheek).alpha, 0.0);
    }

    #[test]
    fn test_spray_clears_smell() {
        let mut f = fixture();
        f.animator.spray(&mut f.stage, &f.nodes);
        let cues = run_for(&mut f.stage, 1.2);
        assert_eq!(cues, vec![BathCue::SmellFixed]);
        assert_eq!(f.stage.node(f.nodes.smell).alpha, 0.0);
    }
}
