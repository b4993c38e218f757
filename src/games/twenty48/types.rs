//! Core domain types for 2048: board size, player name and the board.

use super::{Direction, rules};
use crate::GameError;
use rand::Rng;
use tracing::{debug, instrument};

/// Side length of a square board, validated to `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardSize(usize);

impl BoardSize {
    /// Smallest supported board.
    pub const MIN: usize = 3;
    /// Largest supported board.
    pub const MAX: usize = 6;

    /// Validates a side length. Out-of-range sizes are rejected, not clamped.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(GameError::InvalidConfig(format!(
                "board size must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                size
            )))
        }
    }

    /// Parses a size typed at a prompt, either `4` or `4*4`.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let input = input.trim();
        let not_a_size = || GameError::InvalidConfig(format!("'{}' is not a board size", input));

        let side = match input.split_once('*') {
            Some((rows, cols)) if rows.trim() == cols.trim() => rows.trim(),
            Some(_) => return Err(not_a_size()),
            None => input,
        };
        let size = side.parse::<usize>().map_err(|_| not_a_size())?;
        Self::new(size)
    }

    /// Returns the side length.
    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*{}", self.0, self.0)
    }
}

/// Player name: 1 to 4 printable characters.
///
/// Only [`PlayerName::new`] builds one; there is no unchecked path.
///
/// ```compile_fail
/// let name: twenty48::PlayerName = toml::from_str("\"toolongname\"").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    /// Maximum name length in characters.
    pub const MAX_CHARS: usize = 4;

    /// Validates a name typed at a prompt (surrounding whitespace is trimmed).
    #[instrument]
    pub fn new(name: &str) -> Result<Self, GameError> {
        let name = name.trim();
        let chars = name.chars().count();

        if chars == 0 || chars > Self::MAX_CHARS {
            return Err(GameError::InvalidConfig(format!(
                "name must be 1 to {} characters, got {}",
                Self::MAX_CHARS,
                chars
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(GameError::InvalidConfig(
                "name must contain only printable characters".to_string(),
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// Returns the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Square 2048 board. Each cell is 0 (empty) or a power of two.
///
/// Built only through [`Board::new`] or the validating [`Board::from_rows`].
///
/// ```compile_fail
/// let board: twenty48::Board =
///     toml::from_str("size = 3\ncells = [[3, 3, 3], [0, 0, 0]]").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Vec<u32>>,
}

impl Board {
    /// Value placed by [`Board::spawn_tile`].
    pub const SPAWN_VALUE: u32 = 2;

    /// Creates an empty board.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        let n = size.get();
        Self {
            size,
            cells: vec![vec![0; n]; n],
        }
    }

    /// Builds a board from explicit rows.
    ///
    /// Rows must form a square of a supported size and every value must be
    /// 0 or a power of two.
    #[instrument(skip(rows))]
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, GameError> {
        let size = BoardSize::new(rows.len())?;

        if rows.iter().any(|row| row.len() != size.get()) {
            return Err(GameError::InvalidConfig("board rows must form a square".to_string()));
        }
        if let Some(bad) = rows.iter().flatten().find(|&&v| !is_tile_value(v)) {
            return Err(GameError::InvalidConfig(format!(
                "cell value {} is not 0 or a power of two",
                bad
            )));
        }

        Ok(Self { size, cells: rows })
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the rows, top to bottom.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Gets the value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, v)| **v == 0)
                    .map(move |(c, _)| (r, c))
            })
            .collect()
    }

    /// Returns true if at least one cell is empty.
    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().flatten().any(|&v| v == 0)
    }

    /// Largest tile on the board (0 for an empty board).
    pub fn max_value(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Places a 2 on an empty cell chosen uniformly at random.
    ///
    /// Returns false, leaving the board untouched, when no cell is empty.
    #[instrument(skip(self, rng))]
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let empty = self.empty_cells();
        if empty.is_empty() {
            debug!("No empty cell to spawn into");
            return false;
        }

        let (row, col) = empty[rng.gen_range(0..empty.len())];
        self.cells[row][col] = Self::SPAWN_VALUE;
        debug!(row, col, "Spawned tile");
        true
    }

    /// Slides and merges all tiles in `direction`. `None` is a no-op.
    ///
    /// Returns true if any tile moved or merged.
    #[instrument(skip(self))]
    pub fn apply_direction(&mut self, direction: Option<Direction>) -> bool {
        let Some(direction) = direction else {
            return false;
        };

        let (shifted, changed) = rules::shift(&self.cells, direction);
        self.cells = shifted;
        changed
    }

    /// Rendered lines: a blank line, then one tab-separated line per row.
    pub fn render_lines(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(self.cells.iter().map(|row| {
                row.iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join("\t")
            }))
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self.render_lines();
        write!(f, "{}", lines[1..].join("\n"))
    }
}

/// True for 0 and positive powers of two (1 is not a tile).
pub(crate) fn is_tile_value(value: u32) -> bool {
    value == 0 || (value > 1 && value.is_power_of_two())
}
