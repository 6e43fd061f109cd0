use ndarray::Array2;

use crate::engine::Engine;

/// Binary occupancy grid, 1 where the board holds a block.
pub type Observation = Array2<u8>;

pub fn encode<E: Engine + ?Sized>(engine: &E) -> Observation {
    Array2::from_shape_fn((engine.height(), engine.width()), |(row, col)| {
        u8::from(engine.cell(row, col) > 0)
    })
}
