mod board;
mod game;

pub use board::*;
pub use game::*;

#[cfg(test)]
mod test {
    use serde_test::{Token, assert_tokens};

    use super::{
        BOARD_HEIGHT, BOARD_WIDTH, Board, Game, GameConfig, GameSettings, Mino, Tetrimino,
    };

    fn seeded() -> Game {
        Game::new(GameConfig::with_seed(GameSettings::default(), [7; 32]))
    }

    #[test]
    fn test_settings_ser_de() {
        assert_tokens(
            &GameSettings::new(true, false),
            &[
                Token::Struct {
                    name: "GameSettings",
                    len: 2,
                },
                Token::Str("easy"),
                Token::Bool(true),
                Token::Str("random"),
                Token::Bool(false),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_mino_codes() {
        assert_eq!(Mino::Empty.code(), 0);
        assert!(
            [Mino::I, Mino::O, Mino::J, Mino::L, Mino::S, Mino::Z, Mino::T]
                .iter()
                .all(|m| m.code() > 0)
        );
    }

    #[test]
    fn test_place_skips_out_of_bounds() {
        let mut board = Board::default();
        let piece = Tetrimino::new(Mino::O, -1, 0);
        assert!(!board.can_place(&piece));
        board.place(&piece);
        assert_eq!(board.buffer[0][0], Mino::O);
        assert_eq!(board.buffer[1][0], Mino::O);
    }

    #[test]
    fn test_rotation_kicks_off_wall() {
        let board = Board::default();
        let mut piece = Tetrimino::new(Mino::T, 0, 10);
        assert!(board.rotate(&mut piece));
        assert!(board.rotate(&mut piece));
        assert!(board.rotate(&mut piece));
        assert!(board.can_place(&piece));
    }

    #[test]
    fn test_hard_drop_locks_and_step_spawns() {
        let mut game = seeded();
        assert!(!game.is_locked());
        game.hard_drop();
        assert!(game.is_locked());
        assert!(game.score > 0);

        game.step();
        assert!(!game.is_locked());
        assert!(!game.done);
        let filled = game
            .board
            .buffer
            .iter()
            .flatten()
            .filter(|m| **m != Mino::Empty)
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_soft_drop_scores_and_locks_at_bottom() {
        let mut game = seeded();
        let mut moves = 0;
        while game.move_down() {
            moves += 1;
        }
        assert!(game.is_locked());
        assert_eq!(game.score, moves);
    }

    #[test]
    fn test_gravity_tick_moves_piece() {
        let mut game = seeded();
        let y = game.piece.offset_y;
        game.step();
        assert_eq!(game.piece.offset_y, y + 1);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_line_clear_scores() {
        let mut game = seeded();
        game.board.buffer[BOARD_HEIGHT - 1] = [Mino::I; BOARD_WIDTH];
        game.hard_drop();
        let after_drop = game.score;
        game.step();
        assert_eq!(game.lines, 1);
        assert_eq!(game.score - after_drop, 100);
    }

    #[test]
    fn test_stacking_ends_the_game() {
        let mut game = seeded();
        for _ in 0..200 {
            if game.done {
                break;
            }
            game.hard_drop();
            game.step();
        }
        assert!(game.done);
        assert!(game.is_locked());
        let score = game.score;
        game.move_left();
        game.hard_drop();
        game.step();
        assert_eq!(game.score, score);
    }

    #[test]
    fn test_reset_clears_board() {
        let mut game = seeded();
        game.hard_drop();
        game.step();
        game.reset();
        assert_eq!(game.score, 0);
        assert_eq!(game.level, 1);
        assert!(!game.done);
        assert!(game.board.buffer.iter().flatten().all(|m| *m == Mino::Empty));
        assert_eq!(game.next_queue.len(), 5);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = seeded();
        let b = seeded();
        let kinds = |g: &Game| g.next_queue.iter().map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(a.piece.kind, b.piece.kind);
        assert_eq!(kinds(&a), kinds(&b));
    }
}
