//! Reinforcement learning environment over a turn based tetris engine.
//!
//! An agent picks one of five [`Action`]s, the environment applies it to the
//! [`Engine`], advances exactly one engine tick and answers with a binary
//! occupancy [`Observation`], the score delta as reward, the game over flag and
//! an [`Info`] carrying the score.
//!
//! ```no_run
//! use tetris_env::{Action, EnvConfig, TetrisEnv};
//!
//! # fn main() -> tetris_env::Result<()> {
//! let mut env = TetrisEnv::tetris(&EnvConfig::default())?;
//! env.seed(Some(42));
//! env.reset();
//! loop {
//!     let step = env.step(Action::HardDrop.into())?;
//!     if step.done {
//!         println!("final score {}", step.info.score);
//!         break;
//!     }
//! }
//! env.close();
//! # Ok(())
//! # }
//! ```

mod action;
mod config;
mod engine;
mod env;
mod error;
mod observation;
mod render;
mod space;
mod tetris;

pub use action::{ACTION_COUNT, Action, dispatch};
pub use config::EnvConfig;
pub use engine::{Engine, HardDrop};
pub use env::{Info, Step, TetrisEnv};
pub use error::{EnvError, Result};
pub use observation::{Observation, encode};
pub use render::{Display, Headless, RenderMode, Rgb, Surface, TerminalDisplay};
pub use space::{Discrete, MultiBinary};
pub use tetris::base_color;
