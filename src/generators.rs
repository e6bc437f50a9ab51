//! Randomized perfect maze generators.
//!
//! Every generator only ever connects a cell to an unvisited neighbour, so each connection adds
//! exactly one new cell to the maze: the result is a spanning tree of the cells reached, built
//! in at most `size - 1` connections.

use log::{debug, trace};
use rand::Rng;
use std::cmp;
use std::error::Error;
use std::fmt;

use crate::coordinates::Coordinate;
use crate::directions::{CompassPrimary, Direction};
use crate::grid::{ConnectError, MazeGrid};
use crate::tracker::{CellSet, Frontier};
use crate::units::MaxDepth;

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum GenerateError {
    InvalidStart(Coordinate),
    UnsupportedDimensions { expected: usize, found: usize },
    InvalidMaxDepth,
    Connect(ConnectError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerateError::InvalidStart(ref start) => {
                write!(f, "start cell {} is outside the grid", start)
            }
            GenerateError::UnsupportedDimensions { expected, found } => {
                write!(f, "generator needs a {}D grid, found {}D", expected, found)
            }
            GenerateError::InvalidMaxDepth => write!(f, "maximum carve depth must be at least 1"),
            GenerateError::Connect(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            GenerateError::Connect(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConnectError> for GenerateError {
    fn from(e: ConnectError) -> GenerateError {
        GenerateError::Connect(e)
    }
}

/// What a generator did to the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct GenerationStats {
    /// Edges opened.
    pub connections: usize,
    /// Hunt-and-Kill carve phases started, one per successful hunt.
    pub carve_phases: usize,
    /// Most connections made by a single carve phase.
    pub longest_carve: usize,
    /// Frontier cells retired for having no unvisited neighbour left.
    pub frontier_evictions: usize,
}

/// How the frontier growth algorithm picks among a cell's available directions.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum BranchPolicy {
    /// Uniformly random.
    Uniform,
    /// On 2D grids prefer south below the diagonal (`x > y`), otherwise east, then random.
    /// The resulting mazes lean heavily along those two axes. Uniform on other grids.
    AxisBiased,
}

impl Default for BranchPolicy {
    fn default() -> BranchPolicy {
        BranchPolicy::AxisBiased
    }
}

/// Grow a maze outwards from `start` by repeatedly extending a random cell of the frontier.
///
/// The frontier holds maze cells that may still border unvisited cells. A frontier cell found with
/// no available direction is evicted for good, and each extension adds one freshly visited cell,
/// so the loop ends once every cell reachable from `start` is in the maze.
pub fn prims<R>(grid: &mut MazeGrid,
                start: &Coordinate,
                rng: &mut R,
                policy: BranchPolicy)
                -> Result<GenerationStats, GenerateError>
    where R: Rng + ?Sized
{
    if !grid.is_valid_coordinate(start) {
        return Err(GenerateError::InvalidStart(start.clone()));
    }

    let mut stats = GenerationStats::default();
    if random_connection(grid, start, rng)?.is_none() {
        debug!("prims: start {} has nowhere to go", start);
        return Ok(stats);
    }
    stats.connections += 1;

    let mut frontier = Frontier::with_capacity(grid.size());
    for index in grid.visited_indices() {
        let _ = frontier.insert(index);
    }

    while let Some(index) = frontier.random(rng) {
        let cell = grid.coordinate_at(index);
        let directions = grid.available_directions(&cell);
        if directions.is_empty() {
            if frontier.evict(index) {
                stats.frontier_evictions += 1;
            }
            continue;
        }

        let direction = choose_branch(&cell, &directions, rng, policy);
        let next = grid.connect(&cell, direction)?;
        stats.connections += 1;
        if let Some(next_index) = grid.coordinate_to_index(&next) {
            if !frontier.insert(next_index) {
                trace!("prims: {} was already on the frontier", next);
            }
        }
    }

    debug!("prims: {} connections, {} evictions, {} of {} cells visited",
           stats.connections, stats.frontier_evictions, grid.visited_count(), grid.size());
    Ok(stats)
}

/// Hunt-and-Kill on a 2D grid, starting from the centre cell.
///
/// Runs until every cell is visited. After each carve phase the hunt resumes a raster scan where the
/// previous hunt stopped, wrapping around at the end of the grid.
pub fn hunt_and_kill_2d<R>(grid: &mut MazeGrid,
                           rng: &mut R,
                           max_depth: Option<MaxDepth>)
                           -> Result<GenerationStats, GenerateError>
    where R: Rng + ?Sized
{
    if grid.dimensions_count() != 2 {
        return Err(GenerateError::UnsupportedDimensions {
            expected: 2,
            found: grid.dimensions_count(),
        });
    }
    let start = grid.centre();
    let mut hunter = RasterHunter::default();
    hunt_and_kill_with(grid, &start, rng, max_depth, &mut hunter)
}

/// Hunt-and-Kill on a grid of any dimension, starting from the origin.
///
/// Rather than scanning the whole grid, the hunt works through a list of visited cells that
/// still had unvisited neighbours when they were reached, dropping the ones that have filled up
/// since. The maze is done when the list is empty.
pub fn hunt_and_kill<R>(grid: &mut MazeGrid,
                        rng: &mut R,
                        max_depth: Option<MaxDepth>)
                        -> Result<GenerationStats, GenerateError>
    where R: Rng + ?Sized
{
    let start = grid.origin();
    let mut hunter = WorklistHunter::with_capacity(grid.size());
    hunt_and_kill_with(grid, &start, rng, max_depth, &mut hunter)
}

/// Restart strategy for Hunt-and-Kill.
trait Hunter {
    /// Called for every cell as it joins the maze.
    fn record_visit(&mut self, grid: &MazeGrid, cell: &Coordinate);

    /// A visited cell with at least one available direction, or None when the maze is finished.
    fn hunt(&mut self, grid: &MazeGrid) -> Option<Coordinate>;
}

/// Raster order scan that remembers where it stopped. Ends when every cell is visited.
#[derive(Debug, Default)]
struct RasterHunter {
    position: usize,
}

impl Hunter for RasterHunter {
    fn record_visit(&mut self, _: &MazeGrid, _: &Coordinate) {}

    fn hunt(&mut self, grid: &MazeGrid) -> Option<Coordinate> {
        if grid.visited_count() == grid.size() {
            return None;
        }
        // At most one full lap, continuing from the last stop.
        for _ in 0..grid.size() {
            let cell = grid.coordinate_at(self.position);
            if grid.is_visited(&cell) && grid.has_available_direction(&cell) {
                return Some(cell);
            }
            self.position = (self.position + 1) % grid.size();
        }
        None
    }
}

/// Restart candidates kept as an explicit list. Ends when the list runs dry.
#[derive(Debug)]
struct WorklistHunter {
    worklist: CellSet,
}

impl WorklistHunter {
    fn with_capacity(capacity: usize) -> WorklistHunter {
        WorklistHunter { worklist: CellSet::with_capacity(capacity) }
    }
}

impl Hunter for WorklistHunter {
    fn record_visit(&mut self, grid: &MazeGrid, cell: &Coordinate) {
        if grid.has_available_direction(cell) {
            if let Some(index) = grid.coordinate_to_index(cell) {
                let _ = self.worklist.insert(index);
            }
        }
    }

    fn hunt(&mut self, grid: &MazeGrid) -> Option<Coordinate> {
        while let Some(index) = self.worklist.first() {
            let cell = grid.coordinate_at(index);
            if grid.has_available_direction(&cell) {
                return Some(cell);
            }
            let _ = self.worklist.remove(index);
        }
        None
    }
}

fn hunt_and_kill_with<R, H>(grid: &mut MazeGrid,
                            start: &Coordinate,
                            rng: &mut R,
                            max_depth: Option<MaxDepth>,
                            hunter: &mut H)
                            -> Result<GenerationStats, GenerateError>
    where R: Rng + ?Sized,
          H: Hunter
{
    if max_depth == Some(MaxDepth(0)) {
        return Err(GenerateError::InvalidMaxDepth);
    }

    let mut stats = GenerationStats::default();
    let first = match random_connection(grid, start, rng)? {
        Some(neighbour) => neighbour,
        None => {
            debug!("hunt and kill: start {} has nowhere to go", start);
            return Ok(stats);
        }
    };
    stats.connections += 1;
    hunter.record_visit(grid, start);
    hunter.record_visit(grid, &first);

    while let Some(cell) = hunter.hunt(grid) {
        trace!("hunt and kill: carving from {}", cell);
        let carved = carve(grid, cell, rng, max_depth, hunter)?;
        stats.connections += carved;
        stats.carve_phases += 1;
        stats.longest_carve = cmp::max(stats.longest_carve, carved);
    }

    debug!("hunt and kill: {} connections in {} carve phases, {} of {} cells visited",
           stats.connections, stats.carve_phases, grid.visited_count(), grid.size());
    Ok(stats)
}

/// Random walk into unvisited cells until a dead end or `max_depth` steps.
/// Returns the number of connections made.
fn carve<R, H>(grid: &mut MazeGrid,
               mut cell: Coordinate,
               rng: &mut R,
               max_depth: Option<MaxDepth>,
               hunter: &mut H)
               -> Result<usize, ConnectError>
    where R: Rng + ?Sized,
          H: Hunter
{
    let mut steps = 0;
    loop {
        if let Some(MaxDepth(limit)) = max_depth {
            if steps >= limit {
                break;
            }
        }
        let directions = grid.available_directions(&cell);
        if directions.is_empty() {
            break;
        }
        let direction = &directions[rng.gen_range(0..directions.len())];
        cell = grid.connect(&cell, direction)?;
        steps += 1;
        hunter.record_visit(grid, &cell);
    }
    Ok(steps)
}

/// Connect `cell` to a uniformly random unvisited neighbour, if it has one.
fn random_connection<R>(grid: &mut MazeGrid,
                        cell: &Coordinate,
                        rng: &mut R)
                        -> Result<Option<Coordinate>, ConnectError>
    where R: Rng + ?Sized
{
    let directions = grid.available_directions(cell);
    if directions.is_empty() {
        return Ok(None);
    }
    let direction = &directions[rng.gen_range(0..directions.len())];
    grid.connect(cell, direction).map(Some)
}

fn choose_branch<'a, R>(cell: &Coordinate,
                        directions: &'a [Direction],
                        rng: &mut R,
                        policy: BranchPolicy)
                        -> &'a Direction
    where R: Rng + ?Sized
{
    if policy == BranchPolicy::AxisBiased && cell.dimensions_count() == 2 {
        let find = |compass: CompassPrimary| {
            let wanted = compass.direction();
            directions.iter().find(|d| **d == wanted)
        };
        let below_diagonal = cell[0] > cell[1];
        let preferred = if below_diagonal {
            find(CompassPrimary::South).or_else(|| find(CompassPrimary::East))
        } else {
            find(CompassPrimary::East)
        };
        if let Some(direction) = preferred {
            return direction;
        }
    }
    &directions[rng.gen_range(0..directions.len())]
}
