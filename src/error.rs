//! Scene setup errors
//!
//! Gameplay itself never fails: ignored input is logged and dropped. The only
//! fatal class is a scene whose asset contract does not hold.

use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("No such node for {scene} scene: {name}")]
    MissingNode { scene: &'static str, name: String },
    #[error("Node name {0:?} is used more than once")]
    DuplicateNode(String),
    #[error("Node {node:?} refers to unknown parent {parent:?}")]
    UnknownParent { node: String, parent: String },
    #[error("Malformed scene layout: {0}")]
    Layout(#[from] serde_json::Error),
    #[error("Could not read scene file: {0}")]
    Io(#[from] std::io::Error),
}
