//! Board engine for a four-row Maker-Breaker game
//!
//! Two players alternate placing stones on a board up to 20 columns wide
//! and 4 rows tall:
//! - O (Black, the Maker) moves first and wins by completing any line
//! - X (White, the Breaker) wins by putting a stone on every line
//! - Lines are horizontal 7-runs, columns, diagonals, and a few short
//!   lines at the board edges
//!
//! After every mutation the board rebuilds a [`ThreatState`]: win threats,
//! forcing moves per direction, the number of open lines, fork detection
//! and the legal move set. Positions carry an incrementally updated
//! 128-bit Zobrist hash.
//!
//! # Architecture
//!
//! - [`board`]: walled grid, locations and packed cell masks
//! - [`rules`]: line catalog and threat analysis
//! - [`zobrist`]: position hashing
//! - [`tables`]: one-time shared initialisation
//! - [`notation`]: text formats for locations and boards
//!
//! # Quick Start
//!
//! ```
//! use maker_breaker::{Board, Loc, Player, Tables};
//!
//! let tables = Tables::init();
//! let mut board = Board::with_max_size(tables);
//!
//! // O builds three of a column; X must block the fourth cell
//! board.play_move(Loc::new(5, 0), Player::Black).unwrap();
//! board.play_move(Loc::new(15, 0), Player::White).unwrap();
//! board.play_move(Loc::new(5, 1), Player::Black).unwrap();
//! board.play_move(Loc::new(15, 1), Player::White).unwrap();
//! board.play_move(Loc::new(5, 2), Player::Black).unwrap();
//!
//! let legal: Vec<Loc> = board.legal_moves().collect();
//! assert_eq!(legal, vec![Loc::new(5, 3)]);
//! ```

pub mod board;
pub mod error;
pub mod notation;
pub mod rules;
pub mod tables;
pub mod zobrist;

// Re-export commonly used types for convenience
pub use board::{Bitboard, Board, Color, Loc, Move, MoveRecord, Player, BOARD_HEIGHT, MAX_LEN};
pub use error::{BoardError, MoveError, ParseError};
pub use rules::{Direction, LineCatalog, Outcome, ThreatState};
pub use tables::Tables;
pub use zobrist::Hash128;
