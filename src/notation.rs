//! Text formats for players, locations and boards
//!
//! Columns are lettered `A`..`Z` skipping `I`; rows are numbered from the
//! bottom, so `A1` is the bottom-left cell. Boards are one line per row
//! using `O` (Black), `X` (White) and `.` (empty).

use std::fmt::{self, Write as _};

use crate::board::{Bitboard, Board, Color, Loc, Move, Player, BOARD_HEIGHT, MAX_LEN};
use crate::error::ParseError;
use crate::rules::{Direction, ThreatState};
use crate::tables::Tables;

const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

pub fn color_to_char(c: Color) -> char {
    match c {
        Color::Black => 'O',
        Color::White => 'X',
        Color::Empty => '.',
        Color::Wall => '#',
    }
}

pub fn player_to_string(pla: Player) -> &'static str {
    match pla {
        Player::Black => "Black",
        Player::White => "White",
    }
}

pub fn player_to_string_short(pla: Player) -> &'static str {
    match pla {
        Player::Black => "B",
        Player::White => "W",
    }
}

/// Parse `black`, `b`, `white` or `w`, ignoring case
pub fn parse_player(s: &str) -> Result<Player, ParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "black" | "b" => Ok(Player::Black),
        "white" | "w" => Ok(Player::White),
        _ => Err(ParseError::Player(s.to_string())),
    }
}

/// Machine form `(x,y)`, or `null`
pub fn loc_to_string_mach(loc: Loc) -> String {
    if loc == Loc::NULL {
        return "null".to_string();
    }
    format!("({},{})", loc.x(), loc.y())
}

/// Human form such as `C2` on a board of the given size
pub fn loc_to_string(loc: Loc, x_size: usize, y_size: usize) -> String {
    if loc == Loc::NULL {
        return "null".to_string();
    }
    let (x, y) = (loc.x(), loc.y());
    if x < 0 || y < 0 || x as usize >= x_size || y as usize >= y_size {
        return loc_to_string_mach(loc);
    }
    let x = x as usize;
    let row = y_size - y as usize;
    if x <= 24 {
        format!("{}{}", COLUMN_LETTERS[x] as char, row)
    } else {
        format!(
            "{}{}{}",
            COLUMN_LETTERS[x / 25 - 1] as char,
            COLUMN_LETTERS[x % 25] as char,
            row
        )
    }
}

fn parse_letter(c: char) -> Option<usize> {
    let c = c.to_ascii_uppercase();
    match c {
        'A'..='H' => Some(c as usize - 'A' as usize),
        'J'..='Z' => Some(c as usize - 'A' as usize - 1),
        _ => None,
    }
}

/// Parse a location: `pass`/`pss` (giving `Loc::NULL`), `(x,y)`, or `C2` style
pub fn parse_loc(s: &str, x_size: usize, y_size: usize) -> Result<Loc, ParseError> {
    let err = || ParseError::Location(s.to_string());
    let t = s.trim();
    if t.len() < 2 {
        return Err(err());
    }
    if t.eq_ignore_ascii_case("pass") || t.eq_ignore_ascii_case("pss") {
        return Ok(Loc::NULL);
    }

    if let Some(inner) = t.strip_prefix('(') {
        let inner = inner.strip_suffix(')').ok_or_else(err)?;
        let (xs, ys) = inner.split_once(',').ok_or_else(err)?;
        let x: i32 = xs.trim().parse().map_err(|_| err())?;
        let y: i32 = ys.trim().parse().map_err(|_| err())?;
        return Loc::try_new(x, y).ok_or_else(err);
    }

    let mut chars = t.chars();
    let mut x = chars.next().and_then(parse_letter).ok_or_else(err)?;
    let rest = chars.as_str();
    let digits = match rest.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {
            let x1 = parse_letter(c).ok_or_else(err)?;
            x = (x + 1) * 25 + x1;
            &rest[c.len_utf8()..]
        }
        _ => rest,
    };

    let row: i64 = digits.parse().map_err(|_| err())?;
    let y = y_size as i64 - row;
    if x >= x_size || y < 0 || y >= y_size as i64 {
        return Err(err());
    }
    Loc::try_new(x as i32, y as i32).ok_or_else(err)
}

/// Parse whitespace-separated locations
pub fn parse_sequence(s: &str, board: &Board) -> Result<Vec<Loc>, ParseError> {
    s.split_whitespace()
        .map(|piece| parse_loc(piece, board.x_size(), board.y_size()))
        .collect()
}

/// Board as rows of occupant characters, each row followed by `delimiter`
pub fn to_string_simple(board: &Board, delimiter: char) -> String {
    let mut s = String::with_capacity((board.x_size() + 1) * board.y_size());
    for y in 0..board.y_size() {
        for x in 0..board.x_size() {
            s.push(color_to_char(board.get(Loc::new(x, y))));
        }
        s.push(delimiter);
    }
    s
}

/// Human-readable board with hash and coordinates.
///
/// An empty `mark` cell prints as `@`. With `hist`, the last three moves get
/// their age (1 oldest, 3 newest) printed after the stone.
pub fn render_board(board: &Board, mark: Loc, hist: Option<&[Move]>) -> String {
    let mut out = String::new();
    write_board(&mut out, board, mark, hist).expect("writing to a String cannot fail");
    out
}

fn write_board<W: fmt::Write>(
    out: &mut W,
    board: &Board,
    mark: Loc,
    hist: Option<&[Move]>,
) -> fmt::Result {
    if let Some(hist) = hist {
        write!(out, "MoveNum: {} ", hist.len())?;
    }
    writeln!(out, "HASH: {}", board.pos_hash())?;

    let (x_size, y_size) = (board.x_size(), board.y_size());
    write!(out, "  ")?;
    for x in 0..x_size {
        if x <= 24 {
            write!(out, " {}", COLUMN_LETTERS[x] as char)?;
        } else {
            write!(out, "A{}", COLUMN_LETTERS[x - 25] as char)?;
        }
    }
    writeln!(out)?;

    for y in 0..y_size {
        write!(out, "{:2} ", y_size - y)?;
        for x in 0..x_size {
            let loc = Loc::new(x, y);
            let color = board.get(loc);
            if color == Color::Empty && loc == mark {
                out.write_char('@')?;
            } else {
                out.write_char(color_to_char(color))?;
            }

            let mut hist_marked = false;
            if let Some(hist) = hist {
                let start = hist.len().saturating_sub(3);
                if let Some(i) = (start..hist.len()).find(|&i| hist[i].loc == loc) {
                    write!(out, "{}", i + 4 - hist.len())?;
                    hist_marked = true;
                }
            }

            if x + 1 < x_size && !hist_marked {
                out.write_char(' ')?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Mask as `BOARD_HEIGHT` rows of `MAX_LEN` zeros and ones
pub fn format_mask(mask: Bitboard) -> String {
    let mut s = String::with_capacity(2 * MAX_LEN * BOARD_HEIGHT);
    for y in 0..BOARD_HEIGHT {
        let row: Vec<&str> = (0..MAX_LEN)
            .map(|x| if mask.contains(y * MAX_LEN + x) { "1" } else { "0" })
            .collect();
        s.push_str(&row.join(" "));
        s.push('\n');
    }
    s
}

/// Every mask of a threat state, labelled
pub fn render_state(state: &ThreatState) -> String {
    let mut s = String::new();
    let mut section = |label: &str, mask: Bitboard| {
        s.push_str(label);
        s.push_str("=\n");
        s.push_str(&format_mask(mask));
    };
    section("O", state.o);
    section("X", state.x);
    section("win_threat", state.win_threat);
    for dir in Direction::ALL {
        section(&format!("forcing_moves[{dir:?}]"), state.forcing(dir));
    }
    section("legal", state.legal);
    s.push_str(&format!("open_lines={}\n", state.open_lines));
    s.push_str(&format!("o_fork={}\n", state.o_fork));
    s
}

/// `{}` prints the board; `{:#}` adds the threat state dump
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(f, self, Loc::NULL, None)?;
        if f.alternate() {
            f.write_str(&render_state(self.state()))?;
        }
        Ok(())
    }
}

/// Parse a board written one row per line
pub fn parse_board(
    tables: &'static Tables,
    x_size: usize,
    y_size: usize,
    s: &str,
) -> Result<Board, ParseError> {
    parse_board_with_delimiter(tables, x_size, y_size, s, '\n')
}

/// Parse a board whose rows are separated by `delimiter`.
///
/// Accepts an optional column-letter header line, optional row numbers,
/// and rows written either compactly (`O.X`) or space separated (`O . X`).
/// `.`, `*`, `,`, `` ` `` and space are empty cells.
pub fn parse_board_with_delimiter(
    tables: &'static Tables,
    x_size: usize,
    y_size: usize,
    s: &str,
    delimiter: char,
) -> Result<Board, ParseError> {
    parse_rows(tables, x_size, y_size, s, delimiter).map_err(|e| {
        log::debug!("board parse failed: {e}");
        e
    })
}

fn parse_rows(
    tables: &'static Tables,
    x_size: usize,
    y_size: usize,
    s: &str,
    delimiter: char,
) -> Result<Board, ParseError> {
    let mut board = Board::new(tables, x_size, y_size)?;

    let mut lines: Vec<&str> = s.trim().split(delimiter).collect();
    if lines.len() == y_size + 1 && lines[0].trim().starts_with('A') {
        lines.remove(0);
    }
    if lines.len() != y_size {
        return Err(ParseError::RowCount {
            expected: y_size,
            found: lines.len(),
        });
    }

    for (y, line) in lines.iter().enumerate() {
        let row: Vec<char> = line
            .trim()
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim()
            .chars()
            .collect();
        let compact = row.len() == x_size;
        if !compact && row.len() + 1 != 2 * x_size {
            return Err(ParseError::RowLength {
                row: y,
                len: row.len(),
                width: x_size,
            });
        }

        for x in 0..x_size {
            let c = if compact { row[x] } else { row[2 * x] };
            let color = match c {
                '.' | ' ' | '*' | ',' | '`' => continue,
                'o' | 'O' => Color::Black,
                'x' | 'X' => Color::White,
                other => return Err(ParseError::Character(other)),
            };
            board.set_stone(Loc::new(x, y), color)?;
        }
    }
    Ok(board)
}
