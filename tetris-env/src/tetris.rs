use tetris_core::tetris::{BOARD_WIDTH, Game, HIDDEN_ROWS, Mino, Tetrimino, VISIBLE_HEIGHT};

use crate::{
    engine::{Engine, HardDrop},
    render::{Rgb, Surface},
};

pub const fn base_color(kind: Mino) -> Rgb {
    match kind {
        Mino::Empty => [0, 0, 0],
        Mino::I => [0, 200, 255],
        Mino::O => [255, 255, 0],
        Mino::T => [127, 0, 127],
        Mino::S => [0, 255, 0],
        Mino::Z => [255, 0, 0],
        Mino::J => [0, 0, 255],
        Mino::L => [255, 150, 0],
    }
}

const fn ghost_color(kind: Mino) -> Rgb {
    let [r, g, b] = base_color(kind);
    [r / 4, g / 4, b / 4]
}

fn draw_tetrimino(surface: &mut Surface, tetrimino: &Tetrimino, color: Rgb) {
    for (x, y) in tetrimino.cells() {
        let row = isize::from(y) - HIDDEN_ROWS as isize;
        if row >= 0 && x >= 0 {
            surface.fill_cell(row as usize, x as usize, color);
        }
    }
}

impl HardDrop for Game {
    fn hard_drop(&mut self) {
        Game::hard_drop(self);
    }
}

/// Exposes the visible 20x10 field; the hidden spawn rows are not part of the board.
impl Engine for Game {
    fn reset(&mut self) {
        Game::reset(self);
    }

    fn move_left(&mut self) {
        Game::move_left(self);
    }

    fn move_right(&mut self) {
        Game::move_right(self);
    }

    fn rotate(&mut self) {
        Game::rotate(self);
    }

    fn move_down(&mut self) {
        Game::move_down(self);
    }

    fn tick(&mut self) {
        Game::step(self);
    }

    fn locked(&self) -> bool {
        self.is_locked()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn game_over(&self) -> bool {
        self.done
    }

    fn height(&self) -> usize {
        VISIBLE_HEIGHT
    }

    fn width(&self) -> usize {
        BOARD_WIDTH
    }

    fn cell(&self, row: usize, col: usize) -> u8 {
        self.board.visible_cell(row, col).code()
    }

    fn draw(&self, surface: &mut Surface) {
        for row in 0..VISIBLE_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let mino = self.board.visible_cell(row, col);
                if mino != Mino::Empty {
                    surface.fill_cell(row, col, base_color(mino));
                }
            }
        }
        if self.is_locked() {
            return;
        }
        draw_tetrimino(surface, &self.ghost, ghost_color(self.piece.kind));
        draw_tetrimino(surface, &self.piece, base_color(self.piece.kind));
    }

    fn hard_drop_handle(&mut self) -> Option<&mut dyn HardDrop> {
        Some(self)
    }
}
