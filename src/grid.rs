use log::warn;
use rand::Rng;
use std::error::Error;
use std::fmt;

use crate::coordinates::{Coordinate, CoordinateSmallVec};
use crate::directions::{CompassPrimary, Direction, DirectionSmallVec, Mask};
use crate::grid_dimensions::{GridDimensions, GridShapeError};
use crate::grid_iterators::{CellIter, RowIter};
use crate::tracker::CellSet;
use crate::units::CellsCount;

/// Dense N dimensional maze: one connectivity `Mask` per cell.
///
/// Every open edge is recorded on both of its cells, and a cell's mask is zero exactly when no
/// edge touches it, which is what "unvisited" means to the generators.
pub struct MazeGrid {
    dimensions: GridDimensions,
    masks: Vec<Mask>,
    visited: CellSet,
    links_count: usize,
}

/// Contract violations reported by `connect` and `disconnect`. The grid is left unchanged.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ConnectError {
    DimensionMismatch,
    InvalidGridCoordinate,
    SelfLink,
    MalformedDirection,
    NeighbourOutOfBounds,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            ConnectError::DimensionMismatch => "coordinate or direction arity differs from the grid",
            ConnectError::InvalidGridCoordinate => "cell is outside the grid",
            ConnectError::SelfLink => "direction does not move, a cell cannot link to itself",
            ConnectError::MalformedDirection => "direction moves along more than one axis",
            ConnectError::NeighbourOutOfBounds => "neighbour in that direction is outside the grid",
        };
        write!(f, "invalid connection: {}", reason)
    }
}

impl Error for ConnectError {}

/// Both ends of a validated edge.
struct EdgeEnds {
    index: usize,
    bit: Mask,
    neighbour: Coordinate,
    neighbour_index: usize,
    neighbour_bit: Mask,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: axis lengths: {:?}, links: {:?}, visited: {:?}",
               self.axis_lengths(), self.links_count, self.visited.len())
    }
}

impl MazeGrid {
    /// Refuses shapes with no cells, more axes than a `Mask` can encode, or more cells than can be
    /// allocated.
    pub fn new(axis_lengths: &[usize]) -> Result<MazeGrid, GridShapeError> {
        let dimensions = GridDimensions::new(axis_lengths)?;
        let CellsCount(cells) = dimensions.size();

        let mut masks = Vec::new();
        masks.try_reserve_exact(cells).map_err(|_| GridShapeError::TooManyCells)?;
        masks.resize(cells, 0);
        let visited = CellSet::try_with_capacity(cells).ok_or(GridShapeError::TooManyCells)?;

        Ok(MazeGrid {
            dimensions,
            masks,
            visited,
            links_count: 0,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn dimensions_count(&self) -> usize {
        self.dimensions.dimensions_count().0
    }

    #[inline]
    pub fn axis_lengths(&self) -> &[usize] {
        self.dimensions.axis_lengths()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.masks.len()
    }

    /// Number of open edges.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.links_count
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Flat indices of the visited cells, in the order they were first visited until a
    /// `disconnect` reorders them.
    pub fn visited_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited.iter().cloned()
    }

    pub fn visited_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.visited.iter().map(move |&index| self.dimensions.index_to_coordinate(index))
    }

    #[inline]
    pub fn origin(&self) -> Coordinate {
        self.dimensions.origin()
    }

    #[inline]
    pub fn centre(&self) -> Coordinate {
        self.dimensions.centre()
    }

    #[inline]
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        self.dimensions.random_cell(rng)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: &Coordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    #[inline]
    pub fn coordinate_to_index(&self, coord: &Coordinate) -> Option<usize> {
        self.dimensions.coordinate_to_index(coord)
    }

    #[inline]
    pub fn coordinate_at(&self, index: usize) -> Coordinate {
        self.dimensions.index_to_coordinate(index)
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(&self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(&self.dimensions)
    }

    /// Creates a new `Coordinate` offset 1 cell away in the given direction.
    /// Returns None if the Coordinate is not representable. The upper grid bounds are not checked.
    pub fn offset_coordinate(&self, coord: &Coordinate, direction: &Direction) -> Option<Coordinate> {
        if coord.dimensions_count() != direction.dimensions_count() {
            return None;
        }
        coord.iter()
            .zip(direction.steps())
            .map(|(&component, step)| step.offset(component))
            .collect::<Option<Vec<usize>>>()
            .map(Coordinate::from)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: &Coordinate,
                                  direction: &Direction)
                                  -> Option<Coordinate> {
        self.offset_coordinate(coord, direction)
            .filter(|neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Cells adjacent along one axis, linked or not.
    pub fn neighbours(&self, coord: &Coordinate) -> CoordinateSmallVec {
        Direction::all(self.dimensions_count())
            .iter()
            .filter_map(|direction| self.neighbour_at_direction(coord, direction))
            .collect()
    }

    /// Directions leading to an in bounds neighbour that has not been visited yet.
    /// Empty when the cell is a dead end or not in the grid.
    pub fn available_directions(&self, coord: &Coordinate) -> DirectionSmallVec {
        if !self.is_valid_coordinate(coord) {
            return DirectionSmallVec::new();
        }
        Direction::all(self.dimensions_count())
            .into_iter()
            .filter(|direction| {
                self.neighbour_at_direction(coord, direction)
                    .map_or(false, |neighbour| !self.is_visited(&neighbour))
            })
            .collect()
    }

    #[inline]
    pub fn has_available_direction(&self, coord: &Coordinate) -> bool {
        !self.available_directions(coord).is_empty()
    }

    /// Open the edge from `coord` in `direction`, marking both cells visited.
    /// Returns the neighbour that was connected to.
    ///
    /// Connecting an already open edge changes nothing.
    pub fn connect(&mut self,
                   coord: &Coordinate,
                   direction: &Direction)
                   -> Result<Coordinate, ConnectError> {
        let ends = self.edge_ends(coord, direction)
            .map_err(|e| {
                warn!("refused connect from {} towards {}: {}", coord, direction, e);
                e
            })?;

        let was_open = self.masks[ends.index] & ends.bit != 0;
        self.set_mask(ends.index, self.masks[ends.index] | ends.bit);
        self.set_mask(ends.neighbour_index,
                      self.masks[ends.neighbour_index] | ends.neighbour_bit);
        if !was_open {
            self.links_count += 1;
        }
        Ok(ends.neighbour)
    }

    /// Close the edge from `coord` in `direction`. Closing a closed edge changes nothing.
    /// Cells left with no open edge become unvisited again.
    pub fn disconnect(&mut self, coord: &Coordinate, direction: &Direction) -> Result<(), ConnectError> {
        let ends = self.edge_ends(coord, direction)
            .map_err(|e| {
                warn!("refused disconnect from {} towards {}: {}", coord, direction, e);
                e
            })?;

        let was_open = self.masks[ends.index] & ends.bit != 0;
        self.set_mask(ends.index, self.masks[ends.index] & !ends.bit);
        self.set_mask(ends.neighbour_index,
                      self.masks[ends.neighbour_index] & !ends.neighbour_bit);
        if was_open {
            self.links_count -= 1;
        }
        Ok(())
    }

    #[inline]
    pub fn is_visited(&self, coord: &Coordinate) -> bool {
        self.mask(coord).map_or(false, |mask| mask != 0)
    }

    /// The connectivity bits of a cell, None for a coordinate outside the grid.
    #[inline]
    pub fn mask(&self, coord: &Coordinate) -> Option<Mask> {
        self.coordinate_to_index(coord).map(|index| self.masks[index])
    }

    #[inline]
    pub fn mask_at(&self, index: usize) -> Option<Mask> {
        self.masks.get(index).cloned()
    }

    /// Is there an open edge leaving `coord` in `direction`?
    pub fn is_linked(&self, coord: &Coordinate, direction: &Direction) -> bool {
        if direction.dimensions_count() != self.dimensions_count() {
            return false;
        }
        match (self.mask(coord), direction.bit()) {
            (Some(mask), Some(bit)) => mask & bit != 0,
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: &Coordinate, compass: CompassPrimary) -> bool {
        self.dimensions_count() == 2 && self.mask(coord).map_or(false, |mask| mask & compass.bit() != 0)
    }

    /// Cells linked to a particular cell by a passage. None for a coordinate outside the grid.
    pub fn links(&self, coord: &Coordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = Direction::all(self.dimensions_count())
            .iter()
            .filter(|direction| self.is_linked(coord, direction))
            .filter_map(|direction| self.offset_coordinate(coord, direction))
            .collect();
        Some(linked)
    }

    /// Every open edge once, as (cell, forward neighbour) pairs in raster order of the first cell.
    pub fn iter_links(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        let dimensions_count = self.dimensions_count();
        self.iter().flat_map(move |coord| {
            (0..dimensions_count)
                .map(|axis| Direction::forward(axis, dimensions_count))
                .filter(|direction| self.is_linked(&coord, direction))
                .filter_map(|direction| self.offset_coordinate(&coord, &direction))
                .map(|neighbour| (coord.clone(), neighbour))
                .collect::<Vec<_>>()
        })
    }

    fn edge_ends(&self, coord: &Coordinate, direction: &Direction) -> Result<EdgeEnds, ConnectError> {
        let dimensions_count = self.dimensions_count();
        if coord.dimensions_count() != dimensions_count ||
           direction.dimensions_count() != dimensions_count {
            return Err(ConnectError::DimensionMismatch);
        }
        let index = self.coordinate_to_index(coord).ok_or(ConnectError::InvalidGridCoordinate)?;
        if direction.is_stationary() {
            return Err(ConnectError::SelfLink);
        }
        let bit = direction.bit().ok_or(ConnectError::MalformedDirection)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or(ConnectError::NeighbourOutOfBounds)?;
        let neighbour_index = self.coordinate_to_index(&neighbour)
            .ok_or(ConnectError::NeighbourOutOfBounds)?;
        let neighbour_bit = direction.inverse().bit().ok_or(ConnectError::MalformedDirection)?;

        Ok(EdgeEnds {
            index,
            bit,
            neighbour,
            neighbour_index,
            neighbour_bit,
        })
    }

    /// The only place masks change, keeping the visited set in step with them.
    fn set_mask(&mut self, index: usize, mask: Mask) {
        let was_visited = self.masks[index] != 0;
        self.masks[index] = mask;
        match (was_visited, mask != 0) {
            (false, true) => {
                let _ = self.visited.insert(index);
            }
            (true, false) => {
                let _ = self.visited.remove(index);
            }
            _ => {}
        }
    }
}
