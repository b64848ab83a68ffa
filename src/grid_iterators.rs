use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::GridDimensions;
use crate::units::{ColumnIndex, RowIndex};

/// Row-major iteration over every coordinate of a grid.
#[derive(Clone)]
pub struct CellIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(dimensions: GridDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size(),
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.index_to_grid_coordinate(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Iteration over the grid one whole row of coordinates at a time, starting at row zero.
#[derive(Debug, Clone)]
pub struct RowIter {
    dimensions: GridDimensions,
    current_row: usize,
}

impl RowIter {
    pub fn new(dimensions: GridDimensions) -> RowIter {
        RowIter {
            dimensions,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.dimensions.height().0 {
            let row_index = RowIndex(self.current_row);
            let row = (0..self.dimensions.width().0)
                .map(|x| Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(x), row_index))
                .collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimensions.height().0 - self.current_row;
        (remaining, Some(remaining))
    }
}
