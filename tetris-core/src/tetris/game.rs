use rand::{SeedableRng, prelude::Rng, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{Board, Mino, Tetrimino};

const LEVEL_GOAL: i8 = 5;
const QUEUE_LEN: usize = 5;

pub type RandomSeed = [u8; 32];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GameSettings {
    /// Stay on level 1 forever.
    pub easy: bool,
    /// Draw pieces uniformly instead of from a shuffled 7-bag.
    pub random: bool,
}

impl GameSettings {
    pub fn new(easy: bool, random: bool) -> Self {
        Self { easy, random }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub settings: GameSettings,
    pub seed: Option<RandomSeed>,
}

impl GameConfig {
    pub fn default_seed(settings: GameSettings) -> Self {
        Self {
            settings,
            seed: None,
        }
    }

    pub fn with_seed(settings: GameSettings, seed: RandomSeed) -> Self {
        Self {
            settings,
            seed: Some(seed),
        }
    }
}

pub fn getrandom(seed: Option<RandomSeed>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::from_seed(seed),
        None => SmallRng::from_os_rng(),
    }
}

/// Turn based tetris: every call is one discrete mutation, [`Game::step`] is one gravity tick.
#[derive(Debug)]
pub struct Game {
    pub board: Board,
    pub piece: Tetrimino,
    pub ghost: Tetrimino,
    pub score: u32,
    pub level: u8,
    pub lines: u32,
    bag: [Mino; 7],
    bag_idx: usize,
    pub next_queue: VecDeque<Tetrimino>,
    level_goal: i8,
    piece_rng: SmallRng,
    /// The active piece has been written into the board and waits for the next tick.
    pub locked: bool,
    pub done: bool,
    pub settings: GameSettings,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut new = Self {
            board: Board::default(),
            piece: Tetrimino::new(Mino::I, 0, 0),
            ghost: Tetrimino::new(Mino::I, 0, 0),
            score: 0,
            level: 1,
            lines: 0,
            bag: [
                Mino::O,
                Mino::I,
                Mino::J,
                Mino::L,
                Mino::S,
                Mino::Z,
                Mino::T,
            ],
            bag_idx: 7,
            next_queue: VecDeque::with_capacity(QUEUE_LEN),
            level_goal: LEVEL_GOAL,
            piece_rng: getrandom(config.seed),
            locked: false,
            done: false,
            settings: config.settings,
        };
        new.start();
        new
    }

    /// Starts a new game on an empty board. The piece generator keeps its stream,
    /// so consecutive games see different pieces.
    pub fn reset(&mut self) {
        self.board = Board::default();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.level_goal = LEVEL_GOAL;
        self.bag_idx = 7;
        self.next_queue.clear();
        self.locked = false;
        self.done = false;
        self.start();
    }

    fn start(&mut self) {
        for _ in 0..QUEUE_LEN {
            let next_kind = self.next_kind();
            self.next_queue.push_back(Tetrimino::new(next_kind, 0, 0));
        }
        let piece = self.get_next_piece();
        self.next_piece(piece);
    }

    const fn active(&self) -> bool {
        !self.done && !self.locked
    }

    pub fn move_left(&mut self) -> bool {
        self.move_x(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_x(1)
    }

    /// Clockwise rotation with wall kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.active() {
            return false;
        }
        let success = self.board.rotate(&mut self.piece);
        self.update_ghost();
        success
    }

    /// Soft drop by one row. A piece that cannot fall any further locks.
    pub fn move_down(&mut self) -> bool {
        if !self.active() {
            return false;
        }
        if self.board.move_down(&mut self.piece) {
            self.score += 1;
            true
        } else {
            self.lock();
            false
        }
    }

    pub fn hard_drop(&mut self) {
        if !self.active() {
            return;
        }
        let rows = self.board.drop(&mut self.piece);
        self.score += 2 * u32::from(rows);
        self.lock();
    }

    /// One gravity tick. A falling piece moves down a row (locking if it can't),
    /// a locked piece gets its lines cleared and the next piece spawns.
    pub fn step(&mut self) {
        if self.done {
            return;
        }
        if !self.locked && !self.board.move_down(&mut self.piece) {
            self.lock();
        }
        if self.locked {
            self.complete();
        }
    }

    /// Whether the active piece is placed. Always true once the game is over.
    pub fn is_locked(&self) -> bool {
        self.locked || self.done
    }

    fn lock(&mut self) {
        self.board.place(&self.piece);
        self.locked = true;
    }

    fn complete(&mut self) {
        let rows = self.board.clear_lines();
        self.score += u32::from(self.level)
            * match rows {
                1 => 100,
                2 => 300,
                3 => 500,
                4 => 800,
                _ => 0,
            };
        self.lines += u32::from(rows);
        if !self.settings.easy {
            self.level_goal -= rows as i8;
            if self.level_goal <= 0 {
                self.level = self.level.saturating_add(1);
                self.level_goal += LEVEL_GOAL;
            }
        }
        self.locked = false;
        let piece = self.get_next_piece();
        self.next_piece(piece);
    }

    fn move_x(&mut self, offset: i8) -> bool {
        if !self.active() {
            return false;
        }
        let success = self.board.move_x(&mut self.piece, offset);
        self.update_ghost();
        success
    }

    fn update_ghost(&mut self) {
        let mut clone = self.piece.clone();
        self.board.drop(&mut clone);
        self.ghost = clone;
    }

    fn next_kind(&mut self) -> Mino {
        if self.settings.random {
            return self.bag[self.piece_rng.random_range(0..7)];
        }
        if self.bag_idx < 7 {
            let next = self.bag[self.bag_idx];
            self.bag_idx += 1;
            return next;
        }
        for i in 0..7 {
            let swap = self.piece_rng.random_range(i..7);
            self.bag.swap(i, swap);
        }
        self.bag_idx = 1;
        self.bag[0]
    }

    const fn place_next_piece(tetrimino: &mut Tetrimino) {
        let (x, y) = match tetrimino.kind {
            Mino::Empty => (0, 0),
            Mino::O => (4, 18),
            Mino::I => (3, 19),
            Mino::L | Mino::J | Mino::S | Mino::Z | Mino::T => (3, 18),
        };
        tetrimino.offset_x = x;
        tetrimino.offset_y = y;
    }

    fn next_piece(&mut self, mut piece: Tetrimino) {
        Self::place_next_piece(&mut piece);
        if !self.board.can_place(&piece) || !self.board.move_down(&mut piece) {
            return self.gameover();
        }
        let mut ghost = piece.clone();
        self.board.drop(&mut ghost);
        // no room to fall, it would lock above the playfield
        if ghost.offset_y == piece.offset_y {
            return self.gameover();
        }

        self.ghost = ghost;
        self.piece = piece;
    }

    fn get_next_piece(&mut self) -> Tetrimino {
        let kind = self.next_kind();
        self.next_queue.push_back(Tetrimino::new(kind, 0, 0));
        // the queue holds QUEUE_LEN + 1 pieces at this point
        self.next_queue
            .pop_front()
            .unwrap_or_else(|| Tetrimino::new(kind, 0, 0))
    }

    fn gameover(&mut self) {
        self.done = true;
    }
}
