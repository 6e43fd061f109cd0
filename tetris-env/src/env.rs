use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tetris_core::tetris::Game;

use crate::{
    EnvConfig, EnvError, Result,
    action::{ACTION_COUNT, Action, dispatch},
    engine::Engine,
    observation::{Observation, encode},
    render::{BLACK, Display, Headless, RenderMode, Surface},
    space::{Discrete, MultiBinary},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    pub score: u32,
}

/// Result of one environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: Info,
}

/// Wraps one engine behind the reset / step / render / close / seed contract.
///
/// Every step applies the action once and then advances exactly one engine tick.
/// The environment never resets itself: once a step reports `done`, call
/// [`TetrisEnv::reset`] before stepping again.
pub struct TetrisEnv<E: Engine, D: Display = Headless> {
    engine: E,
    display: D,
    display_open: bool,
    surface: Option<Surface>,
    cell_size: u32,
    surface_size: (u32, u32),
    action_space: Discrete,
    observation_space: MultiBinary,
    max_fallback_moves: usize,
    last_score: u32,
    rng: SmallRng,
}

impl TetrisEnv<Game> {
    /// Headless environment over a fresh `tetris-core` game.
    pub fn tetris(config: &EnvConfig) -> Result<Self> {
        Self::new(Game::new(config.game_config()), config)
    }
}

impl<E: Engine> TetrisEnv<E> {
    pub fn new(engine: E, config: &EnvConfig) -> Result<Self> {
        Self::with_display(engine, Headless, config)
    }
}

impl<E: Engine, D: Display> TetrisEnv<E, D> {
    pub fn with_display(engine: E, display: D, config: &EnvConfig) -> Result<Self> {
        let (height, width) = (engine.height(), engine.width());
        if height == 0 || width == 0 {
            return Err(EnvError::MalformedEngineState { height, width });
        }
        let cell_size = config.cell_size;
        let surface_size =
            Surface::size_for(height, width, cell_size).ok_or(EnvError::InvalidCellSize {
                cell_size,
                height,
                width,
            })?;
        debug!("Environment over a {height}x{width} board");
        Ok(Self {
            engine,
            display,
            display_open: false,
            surface: None,
            cell_size,
            surface_size,
            action_space: Discrete::new(ACTION_COUNT),
            observation_space: MultiBinary::new(height, width),
            max_fallback_moves: config.fallback_moves(height),
            last_score: 0,
            rng: SmallRng::from_os_rng(),
        })
    }

    pub const fn action_space(&self) -> Discrete {
        self.action_space
    }

    pub const fn observation_space(&self) -> MultiBinary {
        self.observation_space
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn display(&self) -> &D {
        &self.display
    }

    /// Score at the end of the previous step, or right after the last reset.
    pub const fn last_score(&self) -> u32 {
        self.last_score
    }

    /// The render surface, present between the first render and close.
    pub const fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn reset(&mut self) -> Observation {
        self.engine.reset();
        self.last_score = self.engine.score();
        debug!("Reset, starting score {}", self.last_score);
        encode(&self.engine)
    }

    /// Applies the action with index `action`, then advances one tick.
    pub fn step(&mut self, action: usize) -> Result<Step> {
        let action = Action::try_from(action)?;
        dispatch(&mut self.engine, action, self.max_fallback_moves)?;
        self.engine.tick();

        let observation = encode(&self.engine);
        let score = self.engine.score();
        let reward = (i64::from(score) - i64::from(self.last_score)) as f32;
        self.last_score = score;
        let done = self.engine.game_over();
        trace!("{action:?}: reward {reward}, score {score}, done {done}");

        Ok(Step {
            observation,
            reward,
            done,
            info: Info { score },
        })
    }

    /// Draws the current board. Only `"human"` is supported.
    ///
    /// The display and surface are created on the first call and reused after that.
    /// Rendering after [`TetrisEnv::close`] creates them again.
    pub fn render(&mut self, mode: &str) -> Result<()> {
        let RenderMode::Human = mode.parse::<RenderMode>()?;
        let (height, width) = self.observation_space.shape();
        let (pixels_x, pixels_y) = self.surface_size;
        if !self.display_open {
            self.display
                .open(pixels_x, pixels_y)
                .map_err(EnvError::Display)?;
            self.display_open = true;
        }
        let mut surface = match self.surface.take() {
            Some(surface) => surface,
            None => {
                debug!("Creating {pixels_x}x{pixels_y} render surface");
                Surface::new(height, width, self.cell_size).ok_or(EnvError::InvalidCellSize {
                    cell_size: self.cell_size,
                    height,
                    width,
                })?
            }
        };
        surface.fill(BLACK);
        self.engine.draw(&mut surface);
        let presented = self.display.present(&surface);
        self.surface = Some(surface);
        presented.map_err(EnvError::Display)
    }

    /// Releases the surface and the display. Calling it again does nothing.
    pub fn close(&mut self) {
        self.surface = None;
        if self.display_open {
            self.display.close();
            self.display_open = false;
        }
    }

    /// Seeds the environment's own generator, used by [`TetrisEnv::sample_action`].
    /// The engine keeps its own randomness. Returns the seed in effect.
    pub fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        self.rng = SmallRng::seed_from_u64(seed);
        vec![seed]
    }

    /// A uniformly drawn action index.
    pub fn sample_action(&mut self) -> usize {
        self.action_space.sample(&mut self.rng)
    }
}

impl<E: Engine, D: Display> Drop for TetrisEnv<E, D> {
    fn drop(&mut self) {
        self.close();
    }
}
