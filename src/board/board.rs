//! Board structure with incremental hashing and derived threat state

use crate::error::{BoardError, MoveError};
use crate::rules::{LineCatalog, ThreatState};
use crate::tables::Tables;
use crate::zobrist::Hash128;

use super::bitboard::Bitboard;
use super::{Color, Loc, Player, ADJ_OFFSETS, BOARD_HEIGHT, MAX_ARR_SIZE, MAX_LEN};

/// Game board.
///
/// Turn order is not enforced by the mutation methods; the side to move is
/// derived from the stone count (even: Black/O, odd: White/X), and the
/// [`ThreatState`] is rebuilt for that side after every mutation.
///
/// The packed masks and the line catalog index cells over `MAX_LEN`
/// columns. A board narrower than `MAX_LEN` is accepted, but catalog lines
/// that reach past its right edge can never be completed there.
#[derive(Debug, Clone)]
pub struct Board {
    tables: &'static Tables,
    x_size: usize,
    y_size: usize,
    colors: [Color; MAX_ARR_SIZE],
    num_stones: u32,
    /// Zobrist hash of the stones plus the board size (not the side to move)
    pos_hash: Hash128,
    state: ThreatState,
}

/// Record of a move for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub loc: Loc,
    pub pla: Player,
    /// Stone count right after the move, checked by `undo` in debug builds
    ply: u32,
}

impl Board {
    /// Create an empty board of `x_size` columns and `y_size` rows.
    ///
    /// Fails if `x_size > MAX_LEN` or `y_size > BOARD_HEIGHT`.
    pub fn new(tables: &'static Tables, x_size: usize, y_size: usize) -> Result<Self, BoardError> {
        if x_size > MAX_LEN || y_size > BOARD_HEIGHT {
            log::debug!("rejected board size {x_size}x{y_size}");
            return Err(BoardError::InvalidSize {
                width: x_size,
                height: y_size,
            });
        }
        Ok(Self::build(tables, x_size, y_size))
    }

    /// Create an empty `MAX_LEN` by `BOARD_HEIGHT` board
    pub fn with_max_size(tables: &'static Tables) -> Self {
        Self::build(tables, MAX_LEN, BOARD_HEIGHT)
    }

    fn build(tables: &'static Tables, x_size: usize, y_size: usize) -> Self {
        let mut colors = [Color::Wall; MAX_ARR_SIZE];
        for y in 0..y_size {
            for x in 0..x_size {
                colors[Loc::new(x, y).index()] = Color::Empty;
            }
        }

        let mut board = Self {
            tables,
            x_size,
            y_size,
            colors,
            num_stones: 0,
            pos_hash: tables.zobrist().empty_board(x_size, y_size),
            state: ThreatState::default(),
        };
        board.update_state();
        board
    }

    #[inline]
    pub fn tables(&self) -> &'static Tables {
        self.tables
    }

    /// The shared winning-line catalog
    #[inline]
    pub fn lines(&self) -> &'static LineCatalog {
        self.tables.lines()
    }

    #[inline]
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    #[inline]
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Occupant of a location. Anything outside the grid reads as wall.
    #[inline]
    pub fn get(&self, loc: Loc) -> Color {
        self.colors.get(loc.index()).copied().unwrap_or(Color::Wall)
    }

    /// Playable locations, row by row
    pub fn cells(&self) -> impl Iterator<Item = Loc> {
        let (x_size, y_size) = (self.x_size, self.y_size);
        (0..y_size).flat_map(move |y| (0..x_size).map(move |x| Loc::new(x, y)))
    }

    #[inline]
    pub fn is_on_board(&self, loc: Loc) -> bool {
        self.get(loc) != Color::Wall
    }

    /// Check if moving here is legal: on the board and empty
    #[inline]
    pub fn is_legal(&self, loc: Loc, _pla: Player) -> bool {
        self.get(loc) == Color::Empty
    }

    pub fn is_adjacent_to_pla(&self, loc: Loc, pla: Player) -> bool {
        ADJ_OFFSETS[..4]
            .iter()
            .any(|&d| self.get(loc.offset(d)) == pla.color())
    }

    pub fn is_adjacent_or_diagonal_to_pla(&self, loc: Loc, pla: Player) -> bool {
        ADJ_OFFSETS
            .iter()
            .any(|&d| self.get(loc.offset(d)) == pla.color())
    }

    /// No stone anywhere on the board
    pub fn is_empty(&self) -> bool {
        self.cells().all(|loc| self.get(loc) == Color::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.num_stones as usize == self.x_size * self.y_size
    }

    /// Maintained stone counter
    #[inline]
    pub fn num_stones(&self) -> u32 {
        self.num_stones
    }

    /// Count the stones by scanning the grid
    pub fn count_stones(&self) -> u32 {
        self.cells()
            .filter(|&loc| matches!(self.get(loc), Color::Black | Color::White))
            .count() as u32
    }

    /// Side to move, from stone-count parity
    #[inline]
    pub fn next_player(&self) -> Player {
        if self.num_stones % 2 == 0 {
            Player::Black
        } else {
            Player::White
        }
    }

    #[inline]
    pub fn pos_hash(&self) -> Hash128 {
        self.pos_hash
    }

    /// Hash after `pla` plays at the empty location `loc`, without playing it
    #[inline]
    pub fn pos_hash_after_move(&self, loc: Loc, pla: Player) -> Hash128 {
        debug_assert!(loc != Loc::NULL);
        self.pos_hash ^ self.tables.zobrist().stone(loc, pla.color())
    }

    /// Hash recomputed from the grid; always equal to [`Board::pos_hash`]
    pub fn recompute_hash(&self) -> Hash128 {
        let zobrist = self.tables.zobrist();
        self.cells().fold(
            zobrist.empty_board(self.x_size, self.y_size),
            |h, loc| h ^ zobrist.stone(loc, self.get(loc)),
        )
    }

    #[inline]
    pub fn state(&self) -> &ThreatState {
        &self.state
    }

    /// Legal moves for the side to move
    pub fn legal_moves(&self) -> impl Iterator<Item = Loc> {
        self.state.legal.iter_ones().map(Loc::from_cell_index)
    }

    /// Set a cell to any of `Empty`, `Black` or `White`, replacing what was there.
    pub fn set_stone(&mut self, loc: Loc, color: Color) -> Result<(), MoveError> {
        if !self.is_on_board(loc) {
            return Err(MoveError::OutOfBounds(loc));
        }
        if color == Color::Wall {
            return Err(MoveError::InvalidColor(color));
        }

        let current = self.get(loc);
        if current == color {
            return Ok(());
        }
        if current != Color::Empty {
            self.toggle_stone(loc, current);
            self.num_stones -= 1;
        }
        if color != Color::Empty {
            self.toggle_stone(loc, color);
            self.num_stones += 1;
        }
        self.colors[loc.index()] = color;
        self.update_state();
        Ok(())
    }

    /// Play `pla` at `loc` if it is on the board and empty
    pub fn play_move(&mut self, loc: Loc, pla: Player) -> Result<(), MoveError> {
        match self.get(loc) {
            Color::Empty => {
                self.play_move_assume_legal(loc, pla);
                Ok(())
            }
            Color::Wall => Err(MoveError::OutOfBounds(loc)),
            Color::Black | Color::White => Err(MoveError::Occupied(loc)),
        }
    }

    /// Play a move already known to be legal
    pub fn play_move_assume_legal(&mut self, loc: Loc, pla: Player) {
        debug_assert!(self.is_legal(loc, pla), "illegal move at {loc:?}");
        self.colors[loc.index()] = pla.color();
        self.toggle_stone(loc, pla.color());
        self.num_stones += 1;
        self.update_state();
    }

    /// Play a move and return the record needed to undo it
    pub fn play_move_recorded(&mut self, loc: Loc, pla: Player) -> Result<MoveRecord, MoveError> {
        self.play_move(loc, pla)?;
        Ok(MoveRecord {
            loc,
            pla,
            ply: self.num_stones,
        })
    }

    /// Take back a recorded move.
    ///
    /// Moves MUST be undone in the reverse order they were made. This is only
    /// checked in debug builds; out-of-order undo corrupts the hash.
    pub fn undo(&mut self, record: MoveRecord) {
        let loc = record.loc;
        debug_assert_eq!(record.ply, self.num_stones, "undo out of order at {loc:?}");
        debug_assert_eq!(self.get(loc), record.pla.color(), "undo of a stone not on {loc:?}");

        let color = self.get(loc);
        self.toggle_stone(loc, color);
        self.colors[loc.index()] = Color::Empty;
        self.num_stones -= 1;
        self.update_state();
    }

    #[inline]
    fn toggle_stone(&mut self, loc: Loc, color: Color) {
        self.pos_hash ^= self.tables.zobrist().stone(loc, color);
    }

    /// Rebuild the threat state from the grid
    fn update_state(&mut self) {
        let mut o = Bitboard::new();
        let mut x = Bitboard::new();
        let mut empty = Bitboard::new();
        for loc in self.cells() {
            let idx = loc.cell_index();
            match self.get(loc) {
                Color::Black => o.insert(idx),
                Color::White => x.insert(idx),
                _ => empty.insert(idx),
            }
        }
        self.state = ThreatState::compute(self.lines(), o, x, empty, self.next_player());
    }
}

/// Boards are equal when size and stones match; the rest is derived.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.x_size == other.x_size
            && self.y_size == other.y_size
            && self.num_stones == other.num_stones
            && self.pos_hash == other.pos_hash
            && self.colors == other.colors
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::with_max_size(Tables::init())
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = board();
        assert!(b.is_empty());
        assert!(!b.is_full());
        assert_eq!(b.num_stones(), 0);
        assert_eq!(b.next_player(), Player::Black);
        assert_eq!(b.state().legal.count() as usize, MAX_LEN * BOARD_HEIGHT);
        assert_eq!(b.pos_hash(), b.recompute_hash());
    }

    #[test]
    fn test_invalid_size_rejected() {
        let tables = Tables::init();
        assert_eq!(
            Board::new(tables, MAX_LEN + 1, 4).unwrap_err(),
            BoardError::InvalidSize { width: MAX_LEN + 1, height: 4 }
        );
        assert!(Board::new(tables, 10, BOARD_HEIGHT + 1).is_err());
        assert!(Board::new(tables, 10, 3).is_ok());
    }

    #[test]
    fn test_size_is_part_of_hash() {
        let tables = Tables::init();
        let a = Board::new(tables, 20, 4).unwrap();
        let b = Board::new(tables, 19, 4).unwrap();
        assert_ne!(a.pos_hash(), b.pos_hash());
    }

    #[test]
    fn test_walls_surround_board() {
        let b = Board::new(Tables::init(), 10, 3).unwrap();
        assert!(b.is_on_board(Loc::new(9, 2)));
        assert!(!b.is_on_board(Loc::new(10, 0)));
        assert!(!b.is_on_board(Loc::new(0, 3)));
        assert!(!b.is_on_board(Loc::NULL));
        assert!(!b.is_on_board(Loc::from_raw(u16::MAX)));
    }

    #[test]
    fn test_play_move() {
        let mut b = board();
        let loc = Loc::new(4, 1);
        assert!(b.play_move(loc, Player::Black).is_ok());
        assert_eq!(b.get(loc), Color::Black);
        assert_eq!(b.num_stones(), 1);
        assert_eq!(b.next_player(), Player::White);
        assert!(b.state().o.contains(loc.cell_index()));
    }

    #[test]
    fn test_play_move_rejects_occupied_and_walls() {
        let mut b = board();
        let loc = Loc::new(4, 1);
        b.play_move(loc, Player::Black).unwrap();
        let before = b.clone();

        assert_eq!(b.play_move(loc, Player::White), Err(MoveError::Occupied(loc)));
        assert_eq!(b.play_move(Loc::NULL, Player::White), Err(MoveError::OutOfBounds(Loc::NULL)));
        assert_eq!(b, before);
    }

    #[test]
    fn test_set_stone_replaces() {
        let mut b = board();
        let loc = Loc::new(2, 2);
        b.set_stone(loc, Color::Black).unwrap();
        let hash_black = b.pos_hash();

        b.set_stone(loc, Color::White).unwrap();
        assert_eq!(b.get(loc), Color::White);
        assert_eq!(b.num_stones(), 1);
        assert_ne!(b.pos_hash(), hash_black);
        assert_eq!(b.pos_hash(), b.recompute_hash());

        b.set_stone(loc, Color::Empty).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.pos_hash(), board().pos_hash());
    }

    #[test]
    fn test_set_stone_same_color_is_noop() {
        let mut b = board();
        let loc = Loc::new(2, 2);
        b.set_stone(loc, Color::Black).unwrap();
        let before = b.clone();
        assert!(b.set_stone(loc, Color::Black).is_ok());
        assert_eq!(b, before);
    }

    #[test]
    fn test_set_stone_rejects_wall() {
        let mut b = board();
        let before = b.clone();
        assert_eq!(
            b.set_stone(Loc::new(0, 0), Color::Wall),
            Err(MoveError::InvalidColor(Color::Wall))
        );
        assert!(matches!(
            b.set_stone(Loc::NULL, Color::Black),
            Err(MoveError::OutOfBounds(_))
        ));
        assert_eq!(b, before);
    }

    #[test]
    fn test_hash_after_move_matches_play() {
        let mut b = board();
        let loc = Loc::new(7, 3);
        let predicted = b.pos_hash_after_move(loc, Player::Black);
        let before = b.pos_hash();
        b.play_move(loc, Player::Black).unwrap();
        assert_eq!(b.pos_hash(), predicted);
        assert_ne!(before, predicted);
    }

    #[test]
    fn test_undo_restores() {
        let mut b = board();
        let original = b.clone();
        let r1 = b.play_move_recorded(Loc::new(1, 1), Player::Black).unwrap();
        let r2 = b.play_move_recorded(Loc::new(2, 1), Player::White).unwrap();
        b.undo(r2);
        b.undo(r1);
        assert_eq!(b, original);
        assert_eq!(b.state(), original.state());
    }

    #[test]
    fn test_recorded_move_rejects_occupied() {
        let mut b = board();
        b.play_move(Loc::new(1, 1), Player::Black).unwrap();
        assert!(b.play_move_recorded(Loc::new(1, 1), Player::White).is_err());
        assert_eq!(b.num_stones(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "undo out of order")]
    fn test_out_of_order_undo_caught_in_debug() {
        let mut b = board();
        let r1 = b.play_move_recorded(Loc::new(1, 1), Player::Black).unwrap();
        let _r2 = b.play_move_recorded(Loc::new(2, 1), Player::White).unwrap();
        b.undo(r1);
    }

    #[test]
    fn test_adjacency() {
        let mut b = board();
        b.play_move(Loc::new(5, 1), Player::Black).unwrap();
        assert!(b.is_adjacent_to_pla(Loc::new(5, 2), Player::Black));
        assert!(!b.is_adjacent_to_pla(Loc::new(6, 2), Player::Black));
        assert!(b.is_adjacent_or_diagonal_to_pla(Loc::new(6, 2), Player::Black));
        assert!(!b.is_adjacent_or_diagonal_to_pla(Loc::new(6, 2), Player::White));
        // Edge cells look into the wall without panicking
        assert!(!b.is_adjacent_or_diagonal_to_pla(Loc::new(0, 0), Player::White));
    }

    #[test]
    fn test_full_board() {
        let mut b = Board::new(Tables::init(), 7, 1).unwrap();
        let cells: Vec<Loc> = b.cells().collect();
        for (i, loc) in cells.into_iter().enumerate() {
            let pla = if i % 2 == 0 { Player::Black } else { Player::White };
            b.play_move(loc, pla).unwrap();
        }
        assert!(b.is_full());
        assert_eq!(b.count_stones(), 7);
    }

    #[test]
    fn test_legal_moves_follow_state() {
        let mut b = board();
        for y in 0..3 {
            b.set_stone(Loc::new(8, y), Color::Black).unwrap();
        }
        // Three stones: White to move and must block the column
        assert_eq!(b.next_player(), Player::White);
        let legal: Vec<Loc> = b.legal_moves().collect();
        assert_eq!(legal, vec![Loc::new(8, 3)]);
    }
}
