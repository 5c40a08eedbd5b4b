//! Process-wide lookup tables
//!
//! The Zobrist keys and the line catalog are built once and shared read-only
//! by every board. [`Tables::init`] hands out the `&'static Tables` that
//! [`Board::new`](crate::Board::new) requires, so a board cannot be created
//! before the tables exist.

use std::fmt;
use std::sync::OnceLock;

use crate::board::MAX_LEN;
use crate::rules::{Direction, LineCatalog};
use crate::zobrist::ZobristTable;

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Zobrist keys plus the winning-line catalog for the compiled `MAX_LEN`
pub struct Tables {
    zobrist: ZobristTable,
    lines: LineCatalog,
}

impl Tables {
    /// Build the tables on first call; later calls return the same instance.
    ///
    /// Safe to race from several threads: exactly one build runs.
    pub fn init() -> &'static Tables {
        TABLES.get_or_init(|| {
            let tables = Tables {
                zobrist: ZobristTable::new(),
                lines: LineCatalog::build(MAX_LEN),
            };
            log::info!(
                "board tables ready: width {}, {} lines (E {}, N {}, NE {}, NW {})",
                MAX_LEN,
                tables.lines.len(),
                tables.lines.lines(Direction::East).len(),
                tables.lines.lines(Direction::North).len(),
                tables.lines.lines(Direction::NorthEast).len(),
                tables.lines.lines(Direction::NorthWest).len(),
            );
            tables
        })
    }

    /// The tables, if [`Tables::init`] has run
    pub fn get() -> Option<&'static Tables> {
        TABLES.get()
    }

    #[inline]
    pub fn zobrist(&self) -> &ZobristTable {
        &self.zobrist
    }

    #[inline]
    pub fn lines(&self) -> &LineCatalog {
        &self.lines
    }
}

impl fmt::Debug for Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tables")
            .field("width", &self.lines.width())
            .field("lines", &self.lines.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let a = Tables::init();
        let b = Tables::init();
        assert!(std::ptr::eq(a, b));
        assert!(Tables::get().is_some_and(|t| std::ptr::eq(t, a)));
    }

    #[test]
    fn test_catalog_matches_compiled_width() {
        let tables = Tables::init();
        assert_eq!(tables.lines().width(), MAX_LEN);
        assert_eq!(tables.lines(), &LineCatalog::build(MAX_LEN));
    }

    #[test]
    fn test_concurrent_first_use() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| Tables::init() as *const Tables as usize))
            .collect();
        let ptrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ptrs.windows(2).all(|w| w[0] == w[1]));
    }
}
