use crate::render::Surface;

/// Native instant placement, offered by engines that have one.
pub trait HardDrop {
    fn hard_drop(&mut self);
}

/// What the environment needs from a game engine.
///
/// The board is read through [`Engine::cell`]; `height` and `width` must not
/// change over the lifetime of the engine.
pub trait Engine {
    /// Reinitializes board, score and game over flag.
    fn reset(&mut self);

    fn move_left(&mut self);

    fn move_right(&mut self);

    /// Legality and kicks are up to the engine.
    fn rotate(&mut self);

    /// Moves the active piece down one row, locking it when it cannot fall.
    fn move_down(&mut self);

    /// Advances game time by one gravity unit.
    fn tick(&mut self);

    /// Whether the active piece has been placed.
    fn locked(&self) -> bool;

    fn score(&self) -> u32;

    fn game_over(&self) -> bool;

    fn height(&self) -> usize;

    fn width(&self) -> usize;

    /// Cell value at `row`, `col`. 0 is empty, anything else is occupied.
    fn cell(&self, row: usize, col: usize) -> u8;

    /// Draws the current state onto a cleared surface.
    fn draw(&self, surface: &mut Surface);

    /// Handle to the native hard drop, `None` when the engine has none.
    fn hard_drop_handle(&mut self) -> Option<&mut dyn HardDrop> {
        None
    }
}
