//! Box layout partitioning: weighted flex tracks and grid cells.

/// One track of a weighted axis partition, as fractions of the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexCell {
    /// Start position in `[0, 1]`.
    pub start: f64,
    /// Extent in `[0, 1]`.
    pub extent: f64,
}

/// Partition the unit axis proportionally to `weights`.
///
/// Extents sum to one for any positive weight total; a zero total leaves
/// every cell empty, so nothing is hittable.
pub fn weighted_cells(weights: &[f64]) -> Vec<FlexCell> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return weights
            .iter()
            .map(|_| FlexCell {
                start: 0.0,
                extent: 0.0,
            })
            .collect();
    }
    let mut cells = Vec::with_capacity(weights.len());
    let mut start = 0.0;
    for w in weights {
        let extent = w / total;
        cells.push(FlexCell { start, extent });
        start += extent;
    }
    cells
}

/// Index of the cell containing `position` on the unit axis, if any.
pub fn cell_at(cells: &[FlexCell], position: f64) -> Option<usize> {
    cells
        .iter()
        .position(|cell| position >= cell.start && position < cell.start + cell.extent)
}

/// Row-major grid cell index for a normalized point, if it lands on one
/// of the `count` occupied cells.
///
/// A zero column count renders unusably in the host style layer; for hit
/// purposes it behaves as a single column.
pub fn grid_cell(columns: usize, count: usize, x: f64, y: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let columns = columns.max(1);
    let rows = count.div_ceil(columns);

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let col = ((x * columns as f64).floor() as usize).min(columns - 1);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let row = ((y * rows as f64).floor() as usize).min(rows - 1);

    let index = row * columns + col;
    (index < count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_cells_proportional() {
        let cells = weighted_cells(&[1.0, 3.0]);
        assert_eq!(cells[0].start, 0.0);
        assert_eq!(cells[0].extent, 0.25);
        assert_eq!(cells[1].start, 0.25);
        assert_eq!(cells[1].extent, 0.75);
    }

    #[test]
    fn test_weighted_cells_zero_total() {
        let cells = weighted_cells(&[0.0, 0.0]);
        assert!(cells.iter().all(|c| c.extent == 0.0));
        assert_eq!(cell_at(&cells, 0.5), None);
    }

    #[test]
    fn test_cell_at_boundaries() {
        let cells = weighted_cells(&[1.0, 1.0]);
        assert_eq!(cell_at(&cells, 0.0), Some(0));
        assert_eq!(cell_at(&cells, 0.499), Some(0));
        assert_eq!(cell_at(&cells, 0.5), Some(1));
        assert_eq!(cell_at(&cells, 1.0), None);
    }

    #[test]
    fn test_grid_cell_row_major() {
        // 5 cells in 2 columns: three rows, last row half filled
        assert_eq!(grid_cell(2, 5, 0.1, 0.1), Some(0));
        assert_eq!(grid_cell(2, 5, 0.9, 0.1), Some(1));
        assert_eq!(grid_cell(2, 5, 0.1, 0.5), Some(2));
        assert_eq!(grid_cell(2, 5, 0.1, 0.9), Some(4));
    }

    #[test]
    fn test_grid_cell_trailing_gap_misses() {
        assert_eq!(grid_cell(2, 5, 0.9, 0.9), None);
    }

    #[test]
    fn test_grid_cell_zero_columns_acts_as_one() {
        assert_eq!(grid_cell(0, 2, 0.5, 0.1), Some(0));
        assert_eq!(grid_cell(0, 2, 0.5, 0.9), Some(1));
    }

    #[test]
    fn test_grid_cell_empty() {
        assert_eq!(grid_cell(2, 0, 0.5, 0.5), None);
    }
}
