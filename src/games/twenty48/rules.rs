//! Pure grid transformations: quarter-turn rotation and collapse-left.
//!
//! Every direction is realised as rotate, collapse left, rotate back, so
//! these two functions are the whole move algorithm.

use super::Direction;
use tracing::instrument;

/// Rotates a square grid one quarter turn: `new[r][c] = old[c][n - 1 - r]`.
pub fn rotate_clockwise(grid: &[Vec<u32>]) -> Vec<Vec<u32>> {
    let n = grid.len();
    (0..n)
        .map(|r| (0..n).map(|c| grid[c][n - 1 - r]).collect())
        .collect()
}

/// Applies [`rotate_clockwise`] `times` times.
pub fn rotate_times(grid: &[Vec<u32>], times: usize) -> Vec<Vec<u32>> {
    let mut rotated = grid.to_vec();
    for _ in 0..times % 4 {
        rotated = rotate_clockwise(&rotated);
    }
    rotated
}

/// Slides and merges one row towards index 0.
///
/// Scans adjacent pairs left to right, sliding a tile into an empty cell on
/// its left or merging it into an equal left neighbour (left doubles, right
/// becomes 0), and repeats full passes until a pass changes nothing.
///
/// A tile produced by a merge is flagged and travels with its flag, so it
/// never merges again in the same call: `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
/// Two `2^31` tiles stay apart, since their sum does not fit a cell.
///
/// Returns true if the row changed.
pub fn collapse_left(row: &mut [u32]) -> bool {
    let mut merged = vec![false; row.len()];
    let mut changed = false;
    let mut active = true;

    while active {
        active = false;
        for col in 0..row.len().saturating_sub(1) {
            let (left, right) = (row[col], row[col + 1]);
            if left == 0 && right != 0 {
                row.swap(col, col + 1);
                merged.swap(col, col + 1);
                active = true;
            } else if left != 0
                && left == right
                && !merged[col]
                && !merged[col + 1]
                && let Some(doubled) = left.checked_mul(2)
            {
                row[col] = doubled;
                row[col + 1] = 0;
                merged[col] = true;
                merged[col + 1] = false;
                active = true;
            }
        }
        changed |= active;
    }

    changed
}

/// Moves every tile of the grid in `direction`.
///
/// Returns the new grid and whether anything moved or merged.
#[instrument(skip(grid))]
pub fn shift(grid: &[Vec<u32>], direction: Direction) -> (Vec<Vec<u32>>, bool) {
    let turns = direction.clockwise_turns();
    let mut rotated = rotate_times(grid, turns);

    let mut changed = false;
    for row in &mut rotated {
        changed |= collapse_left(row);
    }

    (rotate_times(&rotated, (4 - turns) % 4), changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_across_gaps() {
        let mut row = [0, 2, 0, 2];
        assert!(collapse_left(&mut row));
        assert_eq!(row, [4, 0, 0, 0]);
    }

    #[test]
    fn four_equal_tiles_merge_pairwise() {
        let mut row = [2, 2, 2, 2];
        collapse_left(&mut row);
        assert_eq!(row, [4, 4, 0, 0]);
    }

    #[test]
    fn merged_tile_does_not_merge_again() {
        let mut row = [2, 2, 4, 0];
        collapse_left(&mut row);
        assert_eq!(row, [4, 4, 0, 0]);

        let mut row = [4, 4, 8, 8];
        collapse_left(&mut row);
        assert_eq!(row, [8, 16, 0, 0]);
    }

    #[test]
    fn leftmost_pair_merges_first() {
        let mut row = [0, 2, 2, 2];
        collapse_left(&mut row);
        assert_eq!(row, [4, 2, 0, 0]);
    }

    #[test]
    fn largest_tiles_do_not_overflow() {
        let top = 1u32 << 31;
        let mut row = [top, top, 0];
        assert!(!collapse_left(&mut row));
        assert_eq!(row, [top, top, 0]);

        let mut row = [0, 1 << 30, 1 << 30];
        assert!(collapse_left(&mut row));
        assert_eq!(row, [top, 0, 0]);
    }

    #[test]
    fn full_distinct_row_is_unchanged() {
        let mut row = [2, 4, 8, 16];
        assert!(!collapse_left(&mut row));
        assert_eq!(row, [2, 4, 8, 16]);
    }

    #[test]
    fn empty_row_is_unchanged() {
        let mut row = [0, 0, 0];
        assert!(!collapse_left(&mut row));
    }

    #[test]
    fn rotation_moves_top_right_to_top_left() {
        let grid = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(rotate_clockwise(&grid), vec![vec![2, 4], vec![1, 3]]);
    }

    #[test]
    fn four_rotations_are_identity() {
        let grid = vec![vec![2, 0, 4], vec![0, 8, 0], vec![16, 0, 32]];
        assert_eq!(rotate_times(&grid, 4), grid);
    }

    #[test]
    fn shift_up_moves_column_to_top() {
        let grid = vec![vec![0, 0, 0], vec![2, 0, 0], vec![2, 0, 4]];
        let (shifted, changed) = shift(&grid, Direction::Up);
        assert!(changed);
        assert_eq!(shifted, vec![vec![4, 0, 4], vec![0, 0, 0], vec![0, 0, 0]]);
    }

    #[test]
    fn shift_down_moves_column_to_bottom() {
        let grid = vec![vec![2, 0, 4], vec![2, 0, 0], vec![0, 0, 0]];
        let (shifted, _) = shift(&grid, Direction::Down);
        assert_eq!(shifted, vec![vec![0, 0, 0], vec![0, 0, 0], vec![4, 0, 4]]);
    }

    #[test]
    fn shift_right_moves_row_to_end() {
        let grid = vec![vec![2, 2, 0], vec![0, 0, 0], vec![4, 0, 0]];
        let (shifted, _) = shift(&grid, Direction::Right);
        assert_eq!(shifted, vec![vec![0, 0, 4], vec![0, 0, 0], vec![0, 0, 4]]);
    }
}
