//! Catalog of winning lines
//!
//! Line geometry for a four-row board of width `m`:
//! - East: every 7-cell horizontal run, plus the 4 leftmost and 4 rightmost
//!   cells of each row
//! - North: every full column (4 cells)
//! - NorthEast / NorthWest: every 4-cell diagonal, plus three short
//!   diagonals per direction cut by the board corners
//!
//! Cells are indexed row-major with row length `m`. The catalog built by
//! [`Tables`](crate::Tables) uses `m = MAX_LEN`, which is the indexing
//! [`Loc::cell_index`](crate::Loc::cell_index) produces.

use crate::board::{Bitboard, BOARD_HEIGHT, LONG_LINE};

/// Line directions, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    North,
    NorthEast,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::NorthEast,
        Direction::NorthWest,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Winning lines grouped by direction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCatalog {
    width: usize,
    lines: [Vec<Bitboard>; 4],
}

/// Mask of the given `(x, y)` cells on a board of width `m`
fn line<I: IntoIterator<Item = (usize, usize)>>(m: usize, cells: I) -> Bitboard {
    Bitboard::from_indices(cells.into_iter().map(|(x, y)| y * m + x))
}

impl LineCatalog {
    /// Enumerate every winning line for a board of width `m`.
    ///
    /// `m` must be at least `LONG_LINE` and `m * BOARD_HEIGHT` must fit in a
    /// [`Bitboard`].
    pub fn build(m: usize) -> Self {
        assert!(m >= LONG_LINE, "board width {m} is shorter than a line");
        assert!(m * BOARD_HEIGHT <= Bitboard::CAPACITY, "board width {m} overflows a bitboard");

        let h = BOARD_HEIGHT;

        let mut east = Vec::new();
        for y in 0..h {
            for x in 0..=m - LONG_LINE {
                east.push(line(m, (0..LONG_LINE).map(move |t| (x + t, y))));
            }
        }

        let north: Vec<Bitboard> = (0..m).map(|x| line(m, (0..h).map(move |t| (x, t)))).collect();

        let mut north_east: Vec<Bitboard> =
            (h - 1..m).map(|x| line(m, (0..h).map(move |t| (x - t, t)))).collect();

        let mut north_west: Vec<Bitboard> =
            (0..=m - h).map(|x| line(m, (0..h).map(move |t| (x + t, t)))).collect();

        // Short horizontals at both ends of each row
        for y in 0..h {
            east.push(line(m, (0..4).map(|t| (t, y))));
            east.push(line(m, (0..4).map(|t| (m - 4 + t, y))));
        }

        // Short diagonals in the corners the 4-cell diagonals miss
        north_east.push(line(m, [(1, 0), (0, 1)]));
        north_east.push(line(m, [(2, 0), (1, 1), (0, 2)]));
        north_east.push(line(m, [(m - 1, 1), (m - 2, 2), (m - 3, 3)]));

        north_west.push(line(m, [(m - 2, 0), (m - 1, 1)]));
        north_west.push(line(m, [(m - 3, 0), (m - 2, 1), (m - 1, 2)]));
        north_west.push(line(m, [(0, 1), (1, 2), (2, 3)]));

        Self {
            width: m,
            lines: [east, north, north_east, north_west],
        }
    }

    /// Width the catalog was built for
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lines of one direction
    #[inline]
    pub fn lines(&self, dir: Direction) -> &[Bitboard] {
        &self.lines[dir.index()]
    }

    /// Every line with its direction, direction by direction
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &Bitboard)> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |dir| self.lines(dir).iter().map(move |l| (dir, l)))
    }

    /// Total number of lines
    pub fn len(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
