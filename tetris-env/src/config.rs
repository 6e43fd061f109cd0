use std::{fs, path::Path};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use tetris_core::tetris::{GameConfig, GameSettings, RandomSeed};

use crate::Result;

pub const DEFAULT_CELL_SIZE: u32 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct EnvConfig {
    /// Pixels per board cell on the render surface.
    pub cell_size: u32,
    /// Bound on synthesized hard drops, defaults to four times the board height.
    pub max_fallback_moves: Option<usize>,
    pub game: GameSettings,
    /// Seed for the engine's piece generator. Random when absent.
    pub engine_seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            max_fallback_moves: None,
            game: GameSettings::default(),
            engine_seed: None,
        }
    }
}

impl EnvConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fallback_moves(&self, height: usize) -> usize {
        self.max_fallback_moves.unwrap_or(4 * height)
    }

    pub fn game_config(&self) -> GameConfig {
        match self.engine_seed {
            Some(seed) => {
                let mut buffer = RandomSeed::default();
                SmallRng::seed_from_u64(seed).fill(&mut buffer);
                GameConfig::with_seed(self.game, buffer)
            }
            None => GameConfig::default_seed(self.game),
        }
    }
}
