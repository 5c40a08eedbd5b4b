//! Threat analysis and legal moves
//!
//! The state is rebuilt from scratch after every board mutation by one scan
//! of the line catalog. Nothing is maintained incrementally.
//!
//! For every line X has not touched ("open"):
//! - O one cell short: the empty cell is a win threat (recorded on X's turn)
//! - O two cells short: the empty cells are forcing moves for that direction
//!
//! Legal moves:
//! - O to move: every empty cell, or nothing once no line is open
//! - X to move: every empty cell with no threat, the single threat cell with
//!   one, nothing with two or more

use crate::board::{Bitboard, Player};

use super::lines::{Direction, LineCatalog};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// X faces two or more win threats and cannot block them all
    MakerWins,
    /// Every line holds an X stone, O can never complete one
    BreakerWins,
}

/// Derived threat state of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreatState {
    /// O (Black) stones
    pub o: Bitboard,
    /// X (White) stones
    pub x: Bitboard,
    /// Cells completing an open line for O. Only filled on X's turn.
    pub win_threat: Bitboard,
    /// Per direction, cells bringing an open line one cell from completion
    pub forcing_moves: [Bitboard; 4],
    /// Lines without an X stone
    pub open_lines: u32,
    /// One O move would create win threats in two directions. Only set on O's turn.
    pub o_fork: bool,
    /// Legal moves for the side to move
    pub legal: Bitboard,
}

impl ThreatState {
    /// Analyse a position given its occupancy masks.
    ///
    /// `empty` must be the playable cells holding no stone; `to_move` is the
    /// side on turn.
    pub fn compute(
        lines: &LineCatalog,
        o: Bitboard,
        x: Bitboard,
        empty: Bitboard,
        to_move: Player,
    ) -> Self {
        let mut state = ThreatState {
            o,
            x,
            ..ThreatState::default()
        };

        for (dir, &line) in lines.iter() {
            if !(x & line).is_empty() {
                continue;
            }
            state.open_lines += 1;

            let size = line.count();
            let overlap = (o & line).count();
            if overlap + 1 == size && to_move == Player::White {
                state.win_threat |= empty & line;
            }
            if overlap + 2 == size {
                state.forcing_moves[dir.index()] |= empty & line;
            }
        }

        match to_move {
            Player::Black => {
                state.o_fork = Self::has_fork(&state.forcing_moves);
                if state.open_lines > 0 {
                    state.legal = empty;
                }
            }
            Player::White => {
                state.legal = match state.win_threat.count() {
                    0 => empty,
                    1 => state.win_threat,
                    _ => Bitboard::new(),
                };
            }
        }

        state
    }

    /// Forcing moves of two different directions share a cell
    fn has_fork(forcing_moves: &[Bitboard; 4]) -> bool {
        (0..4).any(|d1| (d1 + 1..4).any(|d2| !(forcing_moves[d1] & forcing_moves[d2]).is_empty()))
    }

    /// Forcing moves of one direction
    #[inline]
    pub fn forcing(&self, dir: Direction) -> Bitboard {
        self.forcing_moves[dir.index()]
    }

    /// Forcing moves of every direction combined
    pub fn all_forcing(&self) -> Bitboard {
        self.forcing_moves
            .iter()
            .fold(Bitboard::new(), |acc, &f| acc | f)
    }

    /// Result of the game if `to_move` has no legal move
    pub fn outcome(&self, to_move: Player) -> Option<Outcome> {
        if !self.legal.is_empty() {
            return None;
        }
        match to_move {
            Player::Black if self.open_lines == 0 => Some(Outcome::BreakerWins),
            Player::White if self.win_threat.count() >= 2 => Some(Outcome::MakerWins),
            // Board full with nothing decided
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BOARD_HEIGHT, MAX_LEN};

    fn catalog() -> LineCatalog {
        LineCatalog::build(MAX_LEN)
    }

    fn cell(x: usize, y: usize) -> usize {
        y * MAX_LEN + x
    }

    fn all_cells() -> Bitboard {
        Bitboard::from_indices(0..MAX_LEN * BOARD_HEIGHT)
    }

    fn analyse(o: &[usize], x: &[usize], to_move: Player) -> ThreatState {
        let o = Bitboard::from_indices(o.iter().copied());
        let x = Bitboard::from_indices(x.iter().copied());
        let empty = all_cells() & !(o | x);
        ThreatState::compute(&catalog(), o, x, empty, to_move)
    }

    #[test]
    fn test_empty_board() {
        let state = analyse(&[], &[], Player::Black);
        assert_eq!(state.open_lines, 124);
        assert_eq!(state.legal, all_cells());
        assert!(state.win_threat.is_empty());
        assert!(!state.o_fork);
        // Two-cell corner diagonals are already forcing on an empty board
        assert_eq!(
            state.forcing(Direction::NorthEast),
            Bitboard::from_indices([cell(1, 0), cell(0, 1)])
        );
        assert_eq!(state.outcome(Player::Black), None);
    }

    #[test]
    fn test_x_stone_closes_lines() {
        let before = analyse(&[], &[], Player::Black);
        let after = analyse(&[], &[cell(0, 0)], Player::Black);
        // (0,0) lies on one 7-run, one short run, one column and one diagonal
        assert_eq!(before.open_lines - after.open_lines, 4);
    }

    #[test]
    fn test_single_threat_forces_block() {
        let state = analyse(&[cell(5, 0), cell(5, 1), cell(5, 2)], &[], Player::White);
        assert_eq!(state.win_threat, Bitboard::from_indices([cell(5, 3)]));
        assert_eq!(state.legal, state.win_threat);
        assert_eq!(state.outcome(Player::White), None);
    }

    #[test]
    fn test_threats_ignored_on_o_turn() {
        let state = analyse(&[cell(5, 0), cell(5, 1), cell(5, 2)], &[], Player::Black);
        assert!(state.win_threat.is_empty());
        assert_eq!(state.legal.count() as usize, MAX_LEN * BOARD_HEIGHT - 3);
    }

    #[test]
    fn test_double_threat_has_no_legal_move() {
        let o = [cell(5, 0), cell(5, 1), cell(5, 2), cell(12, 0), cell(12, 1), cell(12, 2)];
        let state = analyse(&o, &[], Player::White);
        assert_eq!(state.win_threat.count(), 2);
        assert!(state.legal.is_empty());
        assert_eq!(state.outcome(Player::White), Some(Outcome::MakerWins));
    }

    #[test]
    fn test_blocked_line_makes_no_threat() {
        let state = analyse(
            &[cell(5, 0), cell(5, 1), cell(5, 2)],
            &[cell(5, 3)],
            Player::White,
        );
        assert!(state.win_threat.is_empty());
        assert_eq!(state.legal.count() as usize, MAX_LEN * BOARD_HEIGHT - 4);
    }

    #[test]
    fn test_forcing_moves_by_direction() {
        let state = analyse(&[cell(9, 0), cell(9, 1)], &[], Player::Black);
        assert_eq!(
            state.forcing(Direction::North),
            Bitboard::from_indices([cell(9, 2), cell(9, 3)])
        );
        assert!(state.all_forcing().contains(cell(9, 2)));
    }

    #[test]
    fn test_fork_across_directions() {
        // Column 9 with O at (9,0),(9,1) forces (9,2),(9,3).
        // NW diagonal (7,0),(8,1),(9,2),(10,3) with O at (7,0),(8,1) forces (9,2),(10,3).
        let state = analyse(
            &[cell(9, 0), cell(9, 1), cell(7, 0), cell(8, 1)],
            &[],
            Player::Black,
        );
        assert!(state.o_fork);
        assert!(state.forcing(Direction::North).contains(cell(9, 2)));
        assert!(state.forcing(Direction::NorthWest).contains(cell(9, 2)));
    }

    #[test]
    fn test_fork_not_reported_on_x_turn() {
        let state = analyse(
            &[cell(9, 0), cell(9, 1), cell(7, 0), cell(8, 1)],
            &[cell(19, 3)],
            Player::White,
        );
        assert!(!state.o_fork);
    }

    #[test]
    fn test_no_open_lines_is_terminal_for_o() {
        // Full top and bottom rows touch every column, diagonal and edge
        // line; every fourth cell of the middle rows touches their runs.
        let mut x: Vec<usize> = (0..MAX_LEN).flat_map(|c| [cell(c, 0), cell(c, 3)]).collect();
        x.extend((0..MAX_LEN).step_by(4).flat_map(|c| [cell(c, 1), cell(c, 2)]));

        let state = analyse(&[], &x, Player::Black);
        assert_eq!(state.open_lines, 0);
        assert!(state.legal.is_empty());
        assert_eq!(state.outcome(Player::Black), Some(Outcome::BreakerWins));
    }
}
