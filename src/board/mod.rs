//! Board representation for the four-row Maker-Breaker game

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, MoveRecord};

/// Compiled maximum board width
pub const MAX_LEN: usize = 20;
/// Board height; the line catalog and the packed masks cover exactly this many rows
pub const BOARD_HEIGHT: usize = 4;
/// Row length of the walled grid (one wall column shared between rows)
pub const STRIDE: usize = MAX_LEN + 1;
/// Maximum number of playable cells
pub const MAX_PLAY_SIZE: usize = MAX_LEN * BOARD_HEIGHT; // 80
/// Size of the walled grid: a wall row above and below, plus one trailing cell
pub const MAX_ARR_SIZE: usize = STRIDE * (BOARD_HEIGHT + 2) + 1; // 127

/// Longest winning line (horizontal)
pub const LONG_LINE: usize = 7;

const _: () = assert!(MAX_PLAY_SIZE <= Bitboard::CAPACITY);
const _: () = assert!(MAX_LEN >= LONG_LINE);

/// Occupant of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Empty = 0,
    /// O, the Maker
    Black = 1,
    /// X, the Breaker
    White = 2,
    /// Sentinel surrounding the playable rectangle
    Wall = 3,
}

pub const NUM_COLORS: usize = 4;

impl Color {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            other => other,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The player owning a stone of this color
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            Color::Black => Some(Player::Black),
            Color::White => Some(Player::White),
            Color::Empty | Color::Wall => None,
        }
    }
}

/// Side to move. Black is O (Maker) and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    #[inline]
    pub fn color(self) -> Color {
        match self {
            Player::Black => Color::Black,
            Player::White => Color::White,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.color().index()
    }
}

impl From<Player> for Color {
    fn from(pla: Player) -> Color {
        pla.color()
    }
}

/// A stone placed by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub loc: Loc,
    pub pla: Player,
}

/// Location on the walled grid.
///
/// `(x, y)` is stored as `(x + 1) + (y + 1) * STRIDE`, so every playable
/// cell has a wall or another cell on all eight sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Loc(u16);

/// Offsets to the eight neighbours. 0-3 orthogonal (2 is +x, 3 is +y), 4-7 diagonal.
pub const ADJ_OFFSETS: [i16; 8] = [
    -(STRIDE as i16),
    -1,
    1,
    STRIDE as i16,
    -(STRIDE as i16) - 1,
    -(STRIDE as i16) + 1,
    STRIDE as i16 - 1,
    STRIDE as i16 + 1,
];

impl Loc {
    /// Marks "no location" (a pass when parsed from text)
    pub const NULL: Loc = Loc(0);

    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        debug_assert!(x < MAX_LEN && y < BOARD_HEIGHT, "({x},{y}) outside the grid");
        Self(((x + 1) + (y + 1) * STRIDE) as u16)
    }

    /// Checked constructor for coordinates from untrusted sources
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if x >= 0 && y >= 0 && (x as usize) < MAX_LEN && (y as usize) < BOARD_HEIGHT {
            Some(Self::new(x as usize, y as usize))
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn x(self) -> i32 {
        (self.0 as i32 % STRIDE as i32) - 1
    }

    #[inline]
    pub fn y(self) -> i32 {
        (self.0 as i32 / STRIDE as i32) - 1
    }

    /// Index into the packed masks: row-major with row length `MAX_LEN`.
    #[inline]
    pub fn cell_index(self) -> usize {
        debug_assert!(self.x() >= 0 && self.y() >= 0, "{self:?} is not a cell");
        self.y() as usize * MAX_LEN + self.x() as usize
    }

    #[inline]
    pub fn from_cell_index(idx: usize) -> Self {
        Self::new(idx % MAX_LEN, idx / MAX_LEN)
    }

    /// Step by one of [`ADJ_OFFSETS`]
    #[inline]
    pub fn offset(self, delta: i16) -> Self {
        Self(self.0.wrapping_add_signed(delta))
    }

    pub fn is_adjacent(self, other: Loc) -> bool {
        ADJ_OFFSETS[..4].iter().any(|&d| self.offset(d) == other)
    }

    /// Point reflection through the centre of an `x_size` by `y_size` board.
    ///
    /// `Loc::NULL` for a location not on that board.
    pub fn mirror(self, x_size: usize, y_size: usize) -> Self {
        let (x, y) = (self.x(), self.y());
        if self == Loc::NULL || x < 0 || y < 0 || x as usize >= x_size || y as usize >= y_size {
            return Loc::NULL;
        }
        Self::try_new(x_size as i32 - 1 - x, y_size as i32 - 1 - y).unwrap_or(Loc::NULL)
    }

    /// Centre cell, or `Loc::NULL` when either side is even
    pub fn center(x_size: usize, y_size: usize) -> Self {
        if x_size % 2 == 0 || y_size % 2 == 0 {
            return Loc::NULL;
        }
        Self::new(x_size / 2, y_size / 2)
    }

    pub fn is_central(self, x_size: usize, y_size: usize) -> bool {
        let (x, y) = (self.x(), self.y());
        let (xs, ys) = (x_size as i32, y_size as i32);
        x >= (xs - 1) / 2 && x <= xs / 2 && y >= (ys - 1) / 2 && y <= ys / 2
    }

    /// Manhattan distance
    pub fn distance(self, other: Loc) -> i32 {
        let dx = other.x() - self.x();
        let dy = other.y() - self.y();
        dx.abs() + dy.abs()
    }

    pub fn euclidean_distance_squared(self, other: Loc) -> i32 {
        let dx = other.x() - self.x();
        let dy = other.y() - self.y();
        dx * dx + dy * dy
    }
}
