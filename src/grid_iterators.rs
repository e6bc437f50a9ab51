use std::fmt;

use crate::coordinates::Coordinate;
use crate::grid_dimensions::GridDimensions;

/// Visits every cell coordinate in raster order: axis 0 fastest.
#[derive(Clone)]
pub struct CellIter<'a> {
    dimensions: &'a GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl<'a> CellIter<'a> {
    pub fn new(dimensions: &'a GridDimensions) -> CellIter<'a> {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl<'a> fmt::Debug for CellIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl<'a> ExactSizeIterator for CellIter<'a> {} // default impl using size_hint()
impl<'a> Iterator for CellIter<'a> {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.index_to_coordinate(self.current_cell_number);
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

/// Batches of cells sharing every component except the first: the rows of a 2D grid.
#[derive(Clone)]
pub struct RowIter<'a> {
    dimensions: &'a GridDimensions,
    current_row: usize,
    rows_count: usize,
    row_length: usize,
}

impl<'a> RowIter<'a> {
    pub fn new(dimensions: &'a GridDimensions) -> RowIter<'a> {
        let row_length = dimensions.axis_length(0).map_or(0, |len| len.0);
        let rows_count = if row_length == 0 { 0 } else { dimensions.size().0 / row_length };
        RowIter {
            dimensions,
            current_row: 0,
            rows_count,
            row_length,
        }
    }
}

impl<'a> fmt::Debug for RowIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "RowIter :: current_row: {:?}, rows_count: {:?}",
               self.current_row,
               self.rows_count)
    }
}

impl<'a> ExactSizeIterator for RowIter<'a> {}
impl<'a> Iterator for RowIter<'a> {
    type Item = Vec<Coordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let first_index = self.current_row * self.row_length;
            let row = (first_index..first_index + self.row_length)
                .map(|index| self.dimensions.index_to_coordinate(index))
                .collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count - self.current_row;
        (remaining, Some(remaining))
    }
}
