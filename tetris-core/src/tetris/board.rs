pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 40;
/// Rows at the top of the buffer that act as the spawn area and are never shown.
pub const HIDDEN_ROWS: usize = 20;
pub const VISIBLE_HEIGHT: usize = BOARD_HEIGHT - HIDDEN_ROWS;

#[repr(u8)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Mino {
    #[default]
    Empty,
    I,
    O,
    J,
    L,
    S,
    Z,
    T,
}

impl Mino {
    /// Cell code, 0 for an empty cell.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rotation {
    #[default]
    Zero,
    Right,
    Two,
    Left,
}

impl Rotation {
    #[inline]
    const fn cw(self) -> Self {
        match self {
            Self::Zero => Self::Right,
            Self::Right => Self::Two,
            Self::Two => Self::Left,
            Self::Left => Self::Zero,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    pub buffer: [[Mino; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            buffer: [[Mino::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }
}

impl Board {
    /// Cell of the visible field, row 0 being the topmost visible row.
    pub fn visible_cell(&self, row: usize, col: usize) -> Mino {
        self.buffer[row + HIDDEN_ROWS][col]
    }

    /// Writes the piece into the buffer. Cells outside the buffer are skipped.
    pub fn place(&mut self, tetrimino: &Tetrimino) {
        for (x, y) in tetrimino.cells() {
            if Self::in_bounds(x, y) {
                self.buffer[y as usize][x as usize] = tetrimino.kind;
            }
        }
    }

    const fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < BOARD_WIDTH && y >= 0 && (y as usize) < BOARD_HEIGHT
    }

    pub fn can_place(&self, tetrimino: &Tetrimino) -> bool {
        tetrimino.cells().all(|(x, y)| {
            Self::in_bounds(x, y) && self.buffer[y as usize][x as usize] == Mino::Empty
        })
    }

    /// Moves the piece down as far as it goes. Returns the number of rows fallen.
    pub fn drop(&self, tetrimino: &mut Tetrimino) -> u8 {
        let mut rows = 0;
        while self.move_down(tetrimino) {
            rows += 1;
        }
        rows
    }

    /// Rotates the tetrimino clockwise with wall-kicks. Returns if the rotation was successful.
    pub fn rotate(&self, tetrimino: &mut Tetrimino) -> bool {
        let to = tetrimino.rotation.cw();
        let offsets = match tetrimino.kind {
            Mino::J | Mino::L | Mino::S | Mino::Z | Mino::T => Self::three_offsets(to),
            Mino::I => Self::i_offsets(tetrimino.rotation),
            Mino::O | Mino::Empty => return true,
        };

        let mut candidate = tetrimino.clone();
        candidate.rotate_grid_cw();
        candidate.rotation = to;
        let (base_x, base_y) = (candidate.offset_x, candidate.offset_y);

        for (x, y) in offsets {
            candidate.offset_x = base_x + x;
            candidate.offset_y = base_y + y;
            if self.can_place(&candidate) {
                *tetrimino = candidate;
                return true;
            }
        }

        false
    }

    fn three_offsets(to: Rotation) -> [(i8, i8); 5] {
        match to {
            Rotation::Right => [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
            Rotation::Two => [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
            Rotation::Left => [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
            Rotation::Zero => [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        }
    }

    fn i_offsets(from: Rotation) -> [(i8, i8); 5] {
        match from {
            Rotation::Zero => [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
            Rotation::Right => [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
            Rotation::Two => [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
            Rotation::Left => [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
        }
    }

    /// Move along the x-axis. Returns if movement was a success
    pub fn move_x(&self, tetrimino: &mut Tetrimino, offset: i8) -> bool {
        tetrimino.offset_x += offset;
        if self.can_place(tetrimino) {
            return true;
        }
        tetrimino.offset_x -= offset;
        false
    }

    /// Move along the y-axis. Returns if movement was a success
    pub fn move_down(&self, tetrimino: &mut Tetrimino) -> bool {
        tetrimino.offset_y += 1;
        if self.can_place(tetrimino) {
            return true;
        }
        tetrimino.offset_y -= 1;
        false
    }

    /// Removes every full row, shifting the rows above down. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> u8 {
        let mut count = 0;
        for i in 0..BOARD_HEIGHT {
            if self.buffer[i].iter().all(|x| *x != Mino::Empty) {
                count += 1;
                for j in (1..=i).rev() {
                    self.buffer[j] = self.buffer[j - 1];
                }
                self.buffer[0] = [Mino::Empty; BOARD_WIDTH];
            }
        }
        count
    }
}

/// The falling piece, or a ghost / queue preview of one
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tetrimino {
    pub kind: Mino,
    pub rotation: Rotation,
    pub grid: Vec<Vec<bool>>,
    pub offset_x: i8,
    pub offset_y: i8,
}

impl Tetrimino {
    pub fn new(kind: Mino, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::Zero,
            offset_x: x,
            offset_y: y,
            grid: match kind {
                Mino::Empty => vec![],
                Mino::O => vec![vec![true, true], vec![true, true]],
                Mino::I => vec![
                    vec![false, false, false, false],
                    vec![true, true, true, true],
                    vec![false, false, false, false],
                    vec![false, false, false, false],
                ],
                Mino::T => vec![
                    vec![false, true, false],
                    vec![true, true, true],
                    vec![false, false, false],
                ],
                Mino::L => vec![
                    vec![false, false, true],
                    vec![true, true, true],
                    vec![false, false, false],
                ],
                Mino::J => vec![
                    vec![true, false, false],
                    vec![true, true, true],
                    vec![false, false, false],
                ],
                Mino::S => vec![
                    vec![false, true, true],
                    vec![true, true, false],
                    vec![false, false, false],
                ],
                Mino::Z => vec![
                    vec![true, true, false],
                    vec![false, true, true],
                    vec![false, false, false],
                ],
            },
        }
    }

    /// Absolute `(x, y)` buffer coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.grid.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| (x as i8 + self.offset_x, y as i8 + self.offset_y))
        })
    }

    fn rotate_grid_cw(&mut self) {
        if self.kind == Mino::O {
            return;
        }
        let n = self.grid.len();
        for i in 0..(n / 2) {
            for j in i..(n - i - 1) {
                let temp = self.grid[i][j];
                self.grid[i][j] = self.grid[n - 1 - j][i];
                self.grid[n - 1 - j][i] = self.grid[n - 1 - i][n - 1 - j];
                self.grid[n - 1 - i][n - 1 - j] = self.grid[j][n - 1 - i];
                self.grid[j][n - 1 - i] = temp;
            }
        }
    }
}
