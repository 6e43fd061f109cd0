use std::io;

use tetris_env::{Display, Engine, HardDrop, Surface};

pub const PIECE_COLOR: [u8; 3] = [10, 20, 30];
pub const LOCKED_COLOR: [u8; 3] = [40, 50, 60];

/// Single-cell pieces that spawn in column 0 of row 0.
///
/// Every call is recorded so tests can check which primitives ran and in what order.
pub struct ScriptedEngine {
    pub grid: Vec<Vec<u8>>,
    pub row: usize,
    pub col: usize,
    pub locked: bool,
    pub score: u32,
    pub game_over: bool,
    /// Score the engine starts with after `reset`.
    pub reset_score: u32,
    /// Points added each time a locked piece is completed by a tick.
    pub lock_points: u32,
    pub native_hard_drop: bool,
    /// `move_down` never locks, emulating a broken engine.
    pub stuck: bool,
    pub calls: Vec<&'static str>,
}

impl ScriptedEngine {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            grid: vec![vec![0; width]; height],
            row: 0,
            col: 0,
            locked: false,
            score: 0,
            game_over: false,
            reset_score: 0,
            lock_points: 10,
            native_hard_drop: false,
            stuck: false,
            calls: vec![],
        }
    }

    pub fn with_native_hard_drop(mut self) -> Self {
        self.native_hard_drop = true;
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    fn fall(&mut self) -> bool {
        if self.stuck {
            return true;
        }
        let below = self.row + 1;
        if below < self.grid.len() && self.grid[below][self.col] == 0 {
            self.row = below;
            true
        } else {
            self.grid[self.row][self.col] = 1;
            self.locked = true;
            false
        }
    }

    fn spawn(&mut self) {
        self.row = 0;
        self.col = 0;
        self.locked = false;
        if self.grid[0][0] != 0 {
            self.game_over = true;
        }
    }
}

impl HardDrop for ScriptedEngine {
    fn hard_drop(&mut self) {
        self.calls.push("hard_drop");
        while self.fall() {}
    }
}

impl Engine for ScriptedEngine {
    fn reset(&mut self) {
        self.calls.push("reset");
        for row in &mut self.grid {
            row.fill(0);
        }
        self.score = self.reset_score;
        self.game_over = false;
        self.spawn();
    }

    fn move_left(&mut self) {
        self.calls.push("move_left");
        if self.col > 0 && self.grid[self.row][self.col - 1] == 0 {
            self.col -= 1;
        }
    }

    fn move_right(&mut self) {
        self.calls.push("move_right");
        if self.col + 1 < self.grid[0].len() && self.grid[self.row][self.col + 1] == 0 {
            self.col += 1;
        }
    }

    fn rotate(&mut self) {
        self.calls.push("rotate");
    }

    fn move_down(&mut self) {
        self.calls.push("move_down");
        if !self.locked && self.fall() {
            self.score += 1;
        }
    }

    fn tick(&mut self) {
        self.calls.push("tick");
        if self.game_over {
            return;
        }
        if !self.locked {
            self.fall();
        }
        if self.locked {
            self.score += self.lock_points;
            self.spawn();
        }
    }

    fn locked(&self) -> bool {
        self.locked
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn game_over(&self) -> bool {
        self.game_over
    }

    fn height(&self) -> usize {
        self.grid.len()
    }

    fn width(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    fn cell(&self, row: usize, col: usize) -> u8 {
        self.grid[row][col]
    }

    fn draw(&self, surface: &mut Surface) {
        for (r, row) in self.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if *cell != 0 {
                    surface.fill_cell(r, c, LOCKED_COLOR);
                }
            }
        }
        surface.fill_cell(self.row, self.col, PIECE_COLOR);
    }

    fn hard_drop_handle(&mut self) -> Option<&mut dyn HardDrop> {
        if self.native_hard_drop {
            Some(self)
        } else {
            None
        }
    }
}

/// Remembers everything the environment asked of it.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub opened: Vec<(u32, u32)>,
    pub presented: Vec<(u32, u32)>,
    pub closed: usize,
    pub fail_open: bool,
}

impl Display for RecordingDisplay {
    fn open(&mut self, width: u32, height: u32) -> io::Result<()> {
        if self.fail_open {
            return Err(io::Error::other("no display"));
        }
        self.opened.push((width, height));
        Ok(())
    }

    fn present(&mut self, surface: &Surface) -> io::Result<()> {
        self.presented.push((surface.width(), surface.height()));
        Ok(())
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}
