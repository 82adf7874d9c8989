//! Typed node table for the bath scene
//!
//! Every name the scene touches is resolved once at load. A missing node
//! fails the whole scene with [`SceneError::MissingNode`].

use super::names::{self, tex};
use super::state::{Ear, HairSide};
use crate::error::SceneResult;
use crate::gesture::SwipeDirection;
use crate::scene::{Node, NodeId, SceneGraph};

#[cfg(doc)]
use crate::error::SceneError;

#[derive(Debug, Clone)]
pub struct BathNodes {
    // Face
    pub frost: NodeId,
    pub left_brow: NodeId,
    pub right_brow: NodeId,
    pub eyes: NodeId,
    pub left_eyeball: NodeId,
    pub right_eyeball: NodeId,
    pub mouth_default: NodeId,
    pub mouth_inside: NodeId,
    pub mouth_brushed: NodeId,
    pub jaw_top: NodeId,
    pub jaw_bottom: NodeId,
    pub lip_top: NodeId,
    pub lip_bottom: NodeId,
    pub left_cheek: NodeId,
    pub right_cheek: NodeId,
    pub ear_left: NodeId,
    pub ear_right: NodeId,
    pub dirt: NodeId,

    // Hair
    pub hair_left_initial: NodeId,
    pub hair_left_fixed: NodeId,
    pub hair_right_initial: NodeId,
    pub hair_right_fixed_left: NodeId,
    pub hair_right_fixed_right: NodeId,
    pub hair_right_fixed_up: NodeId,
    pub hair_right_fixed_down: NodeId,
    pub hair_pieces: Vec<NodeId>,

    // Pimples
    pub pimple1_initial: NodeId,
    pub pimple1_bleeding: NodeId,
    pub pimple1_fixed: NodeId,
    pub pimple1_pinch: NodeId,
    pub pimple2: NodeId,
    pub pimple2_pinch: NodeId,
    pub pimple3: NodeId,
    pub pimple3_pinch: NodeId,

    // Body
    pub shirt_zone: NodeId,
    pub shirt_stain: NodeId,
    pub armpit: NodeId,
    pub smell: NodeId,
    pub spray: [NodeId; 3],

    // Sink
    pub crane: NodeId,
    pub cold_valve: NodeId,
    pub hot_valve: NodeId,
    pub water: NodeId,
    pub steam: [NodeId; 3],
    pub falling_water: [NodeId; 3],

    // Tools
    pub toothbrush: NodeId,
    pub toothbrush_top: NodeId,
    pub magenta_cup: NodeId,
    pub razor: NodeId,
    pub razor_top: NodeId,
    pub towel: NodeId,
    pub bandage: NodeId,
    pub toilet_water: NodeId,
    pub comb: NodeId,
    pub deodorant: NodeId,
    pub stick_left: NodeId,
    pub stick_right: NodeId,

    // Fly
    pub fly: NodeId,
    pub fly_body: NodeId,
    pub fly_nose: NodeId,
    pub fly_wings: NodeId,
    pub web: NodeId,
}

fn setup(graph: &mut SceneGraph, name: &str, draggable: bool) -> SceneResult<NodeId> {
    let id = graph.require(names::SCENE, name)?;
    graph.node_mut(id).setup(draggable);
    Ok(id)
}

fn setup_in(graph: &mut SceneGraph, parent: NodeId, name: &str) -> SceneResult<NodeId> {
    let id = graph.require_in(names::SCENE, parent, name)?;
    graph.node_mut(id).setup(false);
    Ok(id)
}

fn setup_all(graph: &mut SceneGraph, list: [&str; 3]) -> SceneResult<[NodeId; 3]> {
    Ok([
        setup(graph, list[0], false)?,
        setup(graph, list[1], false)?,
        setup(graph, list[2], false)?,
    ])
}

impl BathNodes {
    /// Resolve and set up every bath node
    pub fn resolve(graph: &mut SceneGraph) -> SceneResult<Self> {
        let g = graph;

        let hair_pieces = (names::HAIR_PIECE_FIRST..=names::HAIR_PIECE_LAST)
            .map(|i| setup(g, &names::hair_piece(i), false))
            .collect::<SceneResult<Vec<_>>>()?;

        let toothbrush = setup(g, names::TOOTHBRUSH, true)?;
        let razor = setup(g, names::RAZOR, true)?;
        g.node_mut(razor).additional_reset_logic = Some(Box::new(|node: &mut Node| {
            node.texture = Some(tex::RAZOR.to_owned());
        }));
        let fly = setup(g, names::FLY, false)?;

        Ok(Self {
            frost: setup(g, names::FROST, false)?,
            left_brow: setup(g, names::LEFT_BROW, false)?,
            right_brow: setup(g, names::RIGHT_BROW, false)?,
            eyes: setup(g, names::EYES, false)?,
            left_eyeball: setup(g, names::LEFT_EYEBALL, false)?,
            right_eyeball: setup(g, names::RIGHT_EYEBALL, false)?,
            mouth_default: setup(g, names::MOUTH_DEFAULT, false)?,
            mouth_inside: setup(g, names::MOUTH_INSIDE, false)?,
            mouth_brushed: setup(g, names::MOUTH_BRUSHED, false)?,
            jaw_top: setup(g, names::JAW_TOP, false)?,
            jaw_bottom: setup(g, names::JAW_BOTTOM, false)?,
            lip_top: setup(g, names::LIP_TOP, false)?,
            lip_bottom: setup(g, names::LIP_BOTTOM, false)?,
            left_cheek: setup(g, names::LEFT_CHEEK, false)?,
            right_cheek: setup(g, names::RIGHT_CHEEK, false)?,
            ear_left: setup(g, names::EAR_LEFT, false)?,
            ear_right: setup(g, names::EAR_RIGHT, false)?,
            dirt: setup(g, names::DIRT, false)?,

            hair_left_initial: setup(g, names::HAIR_LEFT_INITIAL, false)?,
            hair_left_fixed: setup(g, names::HAIR_LEFT_FIXED, false)?,
            hair_right_initial: setup(g, names::HAIR_RIGHT_INITIAL, false)?,
            hair_right_fixed_left: setup(g, names::HAIR_RIGHT_FIXED_LEFT, false)?,
            hair_right_fixed_right: setup(g, names::HAIR_RIGHT_FIXED_RIGHT, false)?,
            hair_right_fixed_up: setup(g, names::HAIR_RIGHT_FIXED_UP, false)?,
            hair_right_fixed_down: setup(g, names::HAIR_RIGHT_FIXED_DOWN, false)?,
            hair_pieces,

            pimple1_initial: setup(g, names::PIMPLE1_INITIAL, false)?,
            pimple1_bleeding: setup(g, names::PIMPLE1_BLEEDING, false)?,
            pimple1_fixed: setup(g, names::PIMPLE1_FIXED, false)?,
            pimple1_pinch: setup(g, names::PIMPLE1_PINCH_ZONE, false)?,
            pimple2: setup(g, names::PIMPLE2, false)?,
            pimple2_pinch: setup(g, names::PIMPLE2_PINCH_ZONE, false)?,
            pimple3: setup(g, names::PIMPLE3, false)?,
            pimple3_pinch: setup(g, names::PIMPLE3_PINCH_ZONE, false)?,

            shirt_zone: setup(g, names::SHIRT_ZONE, false)?,
            shirt_stain: setup(g, names::SHIRT_STAIN, false)?,
            armpit: setup(g, names::ARMPIT, false)?,
            smell: setup(g, names::SMELL, false)?,
            spray: setup_all(g, names::SPRAY)?,

            crane: setup(g, names::CRANE, false)?,
            cold_valve: setup(g, names::COLD_VALVE, false)?,
            hot_valve: setup(g, names::HOT_VALVE, false)?,
            water: setup(g, names::WATER, false)?,
            steam: setup_all(g, names::STEAM)?,
            falling_water: setup_all(g, names::WATER_FALLING)?,

            toothbrush,
            toothbrush_top: setup_in(g, toothbrush, names::TOOTHBRUSH_TOP)?,
            magenta_cup: setup(g, names::MAGENTA_CUP, false)?,
            razor,
            razor_top: setup_in(g, razor, names::RAZOR_TOP)?,
            towel: setup(g, names::TOWEL, true)?,
            bandage: setup(g, names::BANDAGE, true)?,
            toilet_water: setup(g, names::TOILET_WATER, true)?,
            comb: setup(g, names::COMB, true)?,
            deodorant: setup(g, names::DEODORANT, true)?,
            stick_left: setup(g, names::STICK_LEFT, true)?,
            stick_right: setup(g, names::STICK_RIGHT, true)?,

            fly,
            fly_body: setup_in(g, fly, names::FLY_BODY)?,
            fly_nose: setup_in(g, fly, names::FLY_NOSE)?,
            fly_wings: setup_in(g, fly, names::FLY_WINGS)?,
            web: setup(g, names::WEB, false)?,
        })
    }

    pub fn hair_side(&self, node: NodeId) -> HairSide {
        if node == self.hair_left_initial || node == self.hair_left_fixed {
            HairSide::Left
        } else {
            HairSide::Right
        }
    }

    /// Right-side hairstyle shown after a swipe in `direction`
    pub fn right_hair_for(&self, direction: SwipeDirection) -> NodeId {
        match direction {
            SwipeDirection::Up => self.hair_right_fixed_up,
            SwipeDirection::Down => self.hair_right_fixed_down,
            SwipeDirection::Left => self.hair_right_fixed_left,
            SwipeDirection::Right => self.hair_right_fixed_right,
        }
    }

    pub fn ear(&self, ear: Ear) -> NodeId {
        match ear {
            Ear::Left => self.ear_left,
            Ear::Right => self.ear_right,
        }
    }

    /// The stick that cleans `ear`; sticks sit on the opposite side
    pub fn stick_for(&self, ear: Ear) -> NodeId {
        match ear {
            Ear::Left => self.stick_right,
            Ear::Right => self.stick_left,
        }
    }

    /// The ear a stick belongs to, if `node` is a stick
    pub fn ear_for_stick(&self, node: NodeId) -> Option<Ear> {
        if node == self.stick_right {
            Some(Ear::Left)
        } else if node == self.stick_left {
            Some(Ear::Right)
        } else {
            None
        }
    }

    pub fn is_hair_piece(&self, node: NodeId) -> bool {
        self.hair_pieces.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::scene::SceneLayout;

    #[test]
    fn test_resolves_builtin_layout() {
        let mut graph = SceneLayout::bath().build().unwrap();
        let nodes = BathNodes::resolve(&mut graph).unwrap();
        assert_eq!(nodes.hair_pieces.len(), 44);
        assert!(graph.node(nodes.razor).draggable);
        assert!(!graph.node(nodes.magenta_cup).draggable);
        assert!(graph.node(nodes.fly).is_setup());
        assert_eq!(nodes.stick_for(Ear::Left), nodes.stick_right);
        assert_eq!(nodes.ear_for_stick(nodes.stick_left), Some(Ear::Right));
    }

    #[test]
    fn test_missing_node_is_fatal() {
        let mut layout = SceneLayout::bath();
        layout.nodes.retain(|spec| spec.name != names::hair_piece(17));
        let mut graph = layout.build().unwrap();
        let err = BathNodes::resolve(&mut graph).unwrap_err();
        assert!(
            matches!(err, SceneError::MissingNode { scene: "bath", ref name } if name == "hair_piece17")
        );
    }

    #[test]
    fn test_razor_reset_restores_texture() {
        let mut graph = SceneLayout::bath().build().unwrap();
        let nodes = BathNodes::resolve(&mut graph).unwrap();
        let razor = graph.node_mut(nodes.razor);
        razor.texture = Some(tex::RAZOR_IN_USE.to_owned());
        razor.position.x += 40.0;
        razor.reset();
        assert_eq!(razor.texture.as_deref(), Some(tex::RAZOR));
        assert_eq!(razor.position, razor.init_point);
    }
}
