use crate::{EnvError, Result, engine::Engine};

pub const ACTION_COUNT: usize = 5;

/// The discrete action space. The discriminant is the index an agent submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft = 0,
    MoveRight = 1,
    Rotate = 2,
    SoftDrop = 3,
    HardDrop = 4,
}

impl Action {
    pub const ALL: [Self; ACTION_COUNT] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
    ];
}

impl TryFrom<usize> for Action {
    type Error = EnvError;

    fn try_from(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EnvError::InvalidAction(index))
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action as Self
    }
}

/// Applies exactly one engine mutation for `action`.
///
/// Engines without a native hard drop get one synthesized from `move_down`
/// calls until the piece locks. `max_fallback_moves` bounds that loop.
pub fn dispatch<E: Engine + ?Sized>(
    engine: &mut E,
    action: Action,
    max_fallback_moves: usize,
) -> Result<()> {
    match action {
        Action::MoveLeft => engine.move_left(),
        Action::MoveRight => engine.move_right(),
        Action::Rotate => engine.rotate(),
        Action::SoftDrop => engine.move_down(),
        Action::HardDrop => match engine.hard_drop_handle() {
            Some(handle) => handle.hard_drop(),
            None => {
                let mut moves = 0;
                while !engine.locked() && !engine.game_over() {
                    if moves == max_fallback_moves {
                        return Err(EnvError::EngineStalled { moves });
                    }
                    engine.move_down();
                    moves += 1;
                }
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{ACTION_COUNT, Action};
    use crate::EnvError;

    #[test]
    fn test_indices_round_trip() {
        for (index, action) in Action::ALL.iter().enumerate() {
            assert_eq!(Action::try_from(index).ok(), Some(*action));
            assert_eq!(usize::from(*action), index);
        }
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        for index in [ACTION_COUNT, 17, usize::MAX] {
            assert!(matches!(
                Action::try_from(index),
                Err(EnvError::InvalidAction(i)) if i == index
            ));
        }
    }
}
