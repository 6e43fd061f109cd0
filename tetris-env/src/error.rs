use std::io;

use crate::action::ACTION_COUNT;

#[derive(thiserror::Error, Debug)]
pub enum EnvError {
    #[error("invalid action {0}, expected a value below {max}", max = ACTION_COUNT)]
    InvalidAction(usize),
    #[error("engine board is {height}x{width}, both dimensions must be positive")]
    MalformedEngineState { height: usize, width: usize },
    #[error("cell size {cell_size} gives no valid render surface for a {height}x{width} board")]
    InvalidCellSize {
        cell_size: u32,
        height: usize,
        width: usize,
    },
    #[error("unsupported render mode {0:?}, only \"human\" is supported")]
    UnsupportedRenderMode(String),
    #[error("hard drop fallback did not lock the piece after {moves} moves")]
    EngineStalled { moves: usize },
    #[error("display failed")]
    Display(#[source] io::Error),
    #[error("invalid config")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
