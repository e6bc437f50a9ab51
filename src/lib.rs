//! **mazes** generates perfect mazes over N dimensional box grids.
//!
//! A `grid::MazeGrid` stores one connectivity bitmask per cell. The `generators` module grows a
//! spanning tree over it, either frontier first (`prims`) or by random walks with restarts
//! (`hunt_and_kill`, `hunt_and_kill_2d`).

pub mod coordinates;
pub mod directions;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod tracker;
pub mod units;
pub mod utils;
