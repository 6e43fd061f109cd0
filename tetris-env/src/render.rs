use std::{io, io::Stdout, str::FromStr};

use log::debug;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph},
};

use crate::EnvError;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Human,
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "human" => Ok(Self::Human),
            other => Err(EnvError::UnsupportedRenderMode(other.to_owned())),
        }
    }
}

/// Row-major RGB pixel buffer covering the board, `cell_size` pixels per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    cell_size: u32,
    pixels: Vec<Rgb>,
}

impl Surface {
    /// `None` when `cell_size` is zero or the pixel size does not fit in `u32`.
    pub fn new(rows: usize, cols: usize, cell_size: u32) -> Option<Self> {
        let (width, height) = Self::size_for(rows, cols, cell_size)?;
        Some(Self {
            width,
            height,
            cell_size,
            pixels: vec![BLACK; width as usize * height as usize],
        })
    }

    /// Pixel `(width, height)` of a `rows` x `cols` board.
    pub fn size_for(rows: usize, cols: usize, cell_size: u32) -> Option<(u32, u32)> {
        if cell_size == 0 {
            return None;
        }
        let width = u32::try_from(cols).ok()?.checked_mul(cell_size)?;
        let height = u32::try_from(rows).ok()?.checked_mul(cell_size)?;
        width.checked_mul(height)?;
        Some((width, height))
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub const fn rows(&self) -> usize {
        (self.height / self.cell_size) as usize
    }

    pub const fn cols(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fills one board cell, leaving a one pixel gap on every side.
    /// Cells outside the surface are ignored.
    pub fn fill_cell(&mut self, row: usize, col: usize, color: Rgb) {
        if row >= self.rows() || col >= self.cols() {
            return;
        }
        let size = self.cell_size as usize;
        let inset = usize::from(size > 2);
        let (left, top) = (col * size, row * size);
        for y in (top + inset)..(top + size - inset) {
            let start = y * self.width as usize;
            self.pixels[start + left + inset..start + left + size - inset].fill(color);
        }
    }

    /// Color at the center of a board cell.
    pub fn cell_color(&self, row: usize, col: usize) -> Option<Rgb> {
        let half = self.cell_size / 2;
        self.pixel(
            col as u32 * self.cell_size + half,
            row as u32 * self.cell_size + half,
        )
    }
}

/// Where rendered frames end up. Opened once before the first frame, closed on
/// [`crate::TetrisEnv::close`].
pub trait Display {
    fn open(&mut self, width: u32, height: u32) -> io::Result<()>;

    fn present(&mut self, surface: &Surface) -> io::Result<()>;

    fn close(&mut self);
}

/// Discards every frame. Nothing is initialized, so it is safe without a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Display for Headless {
    fn open(&mut self, _width: u32, _height: u32) -> io::Result<()> {
        Ok(())
    }

    fn present(&mut self, _surface: &Surface) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) {}
}

/// Shows frames in a terminal, one pair of colored blocks per board cell.
pub struct TerminalDisplay<B: Backend> {
    terminal: Option<Terminal<B>>,
    connect: fn() -> io::Result<Terminal<B>>,
    disconnect: fn(),
}

impl TerminalDisplay<CrosstermBackend<Stdout>> {
    /// Takes over stdout on open and restores it on close.
    pub fn stdout() -> Self {
        Self::new(ratatui::try_init, ratatui::restore)
    }
}

impl<B: Backend> TerminalDisplay<B> {
    pub fn new(connect: fn() -> io::Result<Terminal<B>>, disconnect: fn()) -> Self {
        Self {
            terminal: None,
            connect,
            disconnect,
        }
    }

    pub fn terminal(&self) -> Option<&Terminal<B>> {
        self.terminal.as_ref()
    }

    fn as_text(surface: &Surface) -> Text<'static> {
        Text::from(
            (0..surface.rows())
                .map(|row| {
                    Line::from(
                        (0..surface.cols())
                            .map(|col| {
                                let [r, g, b] = surface.cell_color(row, col).unwrap_or(BLACK);
                                Span::styled("  ", Style::default().bg(Color::Rgb(r, g, b)))
                            })
                            .collect::<Vec<_>>(),
                    )
                })
                .collect::<Vec<_>>(),
        )
    }
}

impl<B: Backend> Display for TerminalDisplay<B> {
    fn open(&mut self, width: u32, height: u32) -> io::Result<()> {
        if self.terminal.is_none() {
            debug!("Opening terminal display for a {width}x{height} surface");
            self.terminal = Some((self.connect)()?);
        }
        Ok(())
    }

    fn present(&mut self, surface: &Surface) -> io::Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "terminal display is not open",
            ));
        };
        let text = Self::as_text(surface);
        terminal.draw(|frame| {
            frame.render_widget(
                Paragraph::new(text).block(
                    Block::bordered()
                        .title("Tetris")
                        .border_type(BorderType::Rounded),
                ),
                frame.area(),
            );
        })?;
        Ok(())
    }

    fn close(&mut self) {
        if self.terminal.take().is_some() {
            debug!("Closing terminal display");
            (self.disconnect)();
        }
    }
}
