//! Parity filter: keep only the cells that will be drawn.

use crate::types::Grid;

/// Keep the cells whose value is even.
///
/// Relative order and original indices are preserved; the pixel mapper
/// relies on the unfiltered index to place each cell.
#[must_use]
pub fn filter_grid(grid: Grid) -> Grid {
    grid.into_cells()
        .into_iter()
        .filter(|cell| cell.is_filled())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn drops_odd_values() {
        let grid = Grid::new(vec![
            Cell::new(1, 0),
            Cell::new(2, 1),
            Cell::new(3, 2),
            Cell::new(2, 3),
            Cell::new(1, 4),
        ]);
        assert_eq!(
            filter_grid(grid).cells(),
            &[Cell::new(2, 1), Cell::new(2, 3)]
        );
    }

    #[test]
    fn empty_grid_stays_empty() {
        assert!(filter_grid(Grid::default()).is_empty());
    }

    #[test]
    fn survivors_are_even() {
        let grid = crate::grid::build_grid(&crate::hash::hash_to_bytes("parity"));
        for cell in filter_grid(grid).cells() {
            assert_eq!(cell.value % 2, 0);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let grid = crate::grid::build_grid(&crate::hash::hash_to_bytes("apple"));
        let once = filter_grid(grid);
        let twice = filter_grid(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn indices_are_not_renumbered() {
        let grid = crate::grid::build_grid(&crate::hash::hash_to_bytes("apple"));
        let filtered = filter_grid(grid.clone());
        for cell in filtered.cells() {
            assert_eq!(grid.cells()[cell.index as usize], *cell);
        }
    }

    #[test]
    fn apple_keeps_expected_indices() {
        // apple's first row is [31, 56, 112, 56, 31]: only the middle three survive.
        let grid = crate::grid::build_grid(&crate::hash::hash_to_bytes("apple"));
        let first_row: Vec<u32> = filter_grid(grid)
            .cells()
            .iter()
            .map(|c| c.index)
            .take_while(|&i| i < 5)
            .collect();
        assert_eq!(first_row, vec![1, 2, 3]);
    }
}
