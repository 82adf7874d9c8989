//! Typed node table for the warehouse scene

use super::names;
use crate::error::SceneResult;
use crate::scene::{NodeId, SceneGraph};

#[derive(Debug, Clone)]
pub struct WarehouseNodes {
    pub background: NodeId,
    pub mouse: NodeId,
    pub candle: NodeId,
    pub candle_fire: NodeId,
    pub cheese: NodeId,
    pub lens: NodeId,
    pub lens_beam: NodeId,
    pub darkness: NodeId,
    pub flashlight: NodeId,
}

fn setup(graph: &mut SceneGraph, name: &str) -> SceneResult<NodeId> {
    let id = graph.require(names::SCENE, name)?;
    graph.node_mut(id).setup(false);
    Ok(id)
}

fn setup_in(graph: &mut SceneGraph, parent: NodeId, name: &str) -> SceneResult<NodeId> {
    let id = graph.require_in(names::SCENE, parent, name)?;
    graph.node_mut(id).setup(false);
    Ok(id)
}

impl WarehouseNodes {
    pub fn resolve(graph: &mut SceneGraph) -> SceneResult<Self> {
        let background = setup(graph, names::BACKGROUND)?;
        let candle = setup_in(graph, background, names::CANDLE)?;
        let lens = setup_in(graph, background, names::LENS)?;
        Ok(Self {
            background,
            mouse: setup_in(graph, background, names::MOUSE)?,
            candle,
            candle_fire: setup_in(graph, candle, names::CANDLE_FIRE)?,
            cheese: setup_in(graph, background, names::CHEESE)?,
            lens,
            lens_beam: setup_in(graph, lens, names::LENS_BEAM)?,
            darkness: setup(graph, names::DARKNESS)?,
            flashlight: setup(graph, names::FLASHLIGHT)?,
        })
    }
}
