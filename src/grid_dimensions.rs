use std::error::Error;
use std::fmt;
use std::mem;

use rand::Rng;
use smallvec::SmallVec;

use crate::coordinates::Coordinate;
use crate::directions::{Mask, MAX_DIMENSIONS};
use crate::units::{AxisLength, CellsCount, DimensionsCount, EdgesCount};

/// Reasons a grid shape is refused at construction.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridShapeError {
    NoAxes,
    EmptyAxis(usize),
    TooManyAxes(usize),
    TooManyCells,
}

impl fmt::Display for GridShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridShapeError::NoAxes => write!(f, "a grid needs at least one axis"),
            GridShapeError::EmptyAxis(axis) => write!(f, "axis {} has length zero", axis),
            GridShapeError::TooManyAxes(count) => {
                write!(f, "{} axes requested, at most {} are supported", count, MAX_DIMENSIONS)
            }
            GridShapeError::TooManyCells => write!(f, "too many cells to hold a mask for each"),
        }
    }
}

impl Error for GridShapeError {}

/// Shape of a box grid: axis lengths plus the row-major strides mapping coordinates to flat indices.
///
/// Axis 0 varies fastest, so for a 2D grid the flat index is `y * width + x`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    lengths: SmallVec<[usize; 4]>,
    strides: SmallVec<[usize; 4]>,
    size: usize,
}

impl GridDimensions {
    pub fn new(lengths: &[usize]) -> Result<GridDimensions, GridShapeError> {
        if lengths.is_empty() {
            return Err(GridShapeError::NoAxes);
        }
        if lengths.len() > MAX_DIMENSIONS {
            return Err(GridShapeError::TooManyAxes(lengths.len()));
        }
        if let Some(axis) = lengths.iter().position(|&len| len == 0) {
            return Err(GridShapeError::EmptyAxis(axis));
        }

        let mut strides = SmallVec::with_capacity(lengths.len());
        let mut size: usize = 1;
        for &len in lengths {
            strides.push(size);
            size = size.checked_mul(len).ok_or(GridShapeError::TooManyCells)?;
        }
        // One mask per cell must fit in a single allocation.
        let bytes = size.checked_mul(mem::size_of::<Mask>()).ok_or(GridShapeError::TooManyCells)?;
        if bytes > isize::MAX as usize {
            return Err(GridShapeError::TooManyCells);
        }

        Ok(GridDimensions {
            lengths: lengths.iter().cloned().collect(),
            strides,
            size,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.size)
    }

    #[inline(always)]
    pub fn dimensions_count(&self) -> DimensionsCount {
        DimensionsCount(self.lengths.len())
    }

    #[inline]
    pub fn axis_length(&self, axis: usize) -> Option<AxisLength> {
        self.lengths.get(axis).map(|&len| AxisLength(len))
    }

    #[inline]
    pub fn axis_lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of adjacent cell pairs: every edge a maze on this grid could open.
    pub fn possible_edges(&self) -> EdgesCount {
        let edges = self.lengths
            .iter()
            .map(|&len| (self.size / len) * (len - 1))
            .sum();
        EdgesCount(edges)
    }

    /// Does the coordinate have one component per axis, each within the axis length?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: &Coordinate) -> bool {
        coord.dimensions_count() == self.lengths.len() &&
        coord.iter().zip(self.lengths.iter()).all(|(&c, &len)| c < len)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: &Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.iter().zip(self.strides.iter()).map(|(c, stride)| c * stride).sum())
        } else {
            None
        }
    }

    /// Inverse of `coordinate_to_index`. Indices beyond the grid wrap on the last axis.
    pub fn index_to_coordinate(&self, index: usize) -> Coordinate {
        let mut remainder = index;
        self.lengths
            .iter()
            .map(|&len| {
                let component = remainder % len;
                remainder /= len;
                component
            })
            .collect()
    }

    pub fn origin(&self) -> Coordinate {
        Coordinate::origin(self.lengths.len())
    }

    /// Middle cell, rounding down on even length axes.
    pub fn centre(&self) -> Coordinate {
        self.lengths.iter().map(|len| len / 2).collect()
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        self.index_to_coordinate(rng.gen_range(0..self.size))
    }
}
