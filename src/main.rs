use docopt::Docopt;
use error_chain::bail;
use log::info;
use rand::Rng;
use serde_derive::Deserialize;
use mazes::{
    generators::{self, BranchPolicy, GenerationStats},
    grid::MazeGrid,
    grid_displays::TextView,
    units::MaxDepth,
    utils,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
    str::FromStr,
};

use itertools::Itertools;

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--algorithm=<name>] [--max-depth=<n>] [--seed=<n>] [--uniform] [--masks] [--text-out=<path>] [--save-edges=<path>] <lengths>...

Options:
    -h --help              Show this screen.
    --algorithm=<name>     One of prims, hunt-kill or hunt-kill-2d [default: hunt-kill].
    --max-depth=<n>        Limit each Hunt-and-Kill carve phase to n steps before hunting again.
    --seed=<n>             Seed the random number generator to repeat a maze.
    --uniform              Prims picks branch directions uniformly instead of favouring south and east.
    --masks                List every cell's connectivity mask in raster order. Always used for grids that are not 2D.
    --text-out=<path>      Output file path for the maze text, printed to stdout otherwise.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_lengths: Vec<usize>,
    flag_algorithm: String,
    flag_max_depth: Option<usize>,
    flag_seed: Option<u64>,
    flag_uniform: bool,
    flag_masks: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            GridShape(::mazes::grid_dimensions::GridShapeError);
            Generate(::mazes::generators::GenerateError);
        }
    }
}
use crate::errors::*;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Algorithm {
    Prims,
    HuntKill,
    HuntKill2D,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Algorithm> {
        match name {
            "prims" => Ok(Algorithm::Prims),
            "hunt-kill" => Ok(Algorithm::HuntKill),
            "hunt-kill-2d" => Ok(Algorithm::HuntKill2D),
            _ => bail!("unknown algorithm '{}', expected prims, hunt-kill or hunt-kill-2d", name),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let algorithm: Algorithm = args.flag_algorithm.parse()?;
    let mut maze_grid = MazeGrid::new(&args.arg_lengths)?;
    let mut rng = match args.flag_seed {
        Some(seed) => utils::seeded_rng(seed),
        None => utils::weak_rng(),
    };

    let stats = generate_maze_on_grid(&mut maze_grid, algorithm, &args, &mut rng)?;
    info!("{:?} maze on a {} grid: {} of {} cells visited, {} passages, {} carve phases",
          algorithm,
          maze_grid.axis_lengths().iter().join("x"),
          maze_grid.visited_count(),
          maze_grid.size(),
          stats.connections,
          stats.carve_phases);

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let maze_text = match TextView::new(&maze_grid) {
        Some(ref view) if !args.flag_masks => view.to_string(),
        _ => masks_listing(&maze_grid),
    };

    if args.flag_text_out.is_empty() {
        println!("{}", maze_text);
    } else {
        write_text_to_file(&maze_text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn generate_maze_on_grid<R: Rng>(maze_grid: &mut MazeGrid,
                                 algorithm: Algorithm,
                                 maze_args: &MazeArgs,
                                 rng: &mut R)
                                 -> Result<GenerationStats> {

    let max_depth = maze_args.flag_max_depth.map(MaxDepth);
    let stats = match algorithm {
        Algorithm::Prims => {
            let policy = if maze_args.flag_uniform {
                BranchPolicy::Uniform
            } else {
                BranchPolicy::AxisBiased
            };
            let start = maze_grid.random_cell(rng);
            generators::prims(maze_grid, &start, rng, policy)?
        }
        Algorithm::HuntKill => generators::hunt_and_kill(maze_grid, rng, max_depth)?,
        Algorithm::HuntKill2D => generators::hunt_and_kill_2d(maze_grid, rng, max_depth)?,
    };
    Ok(stats)
}

/// One line per cell in raster order: the coordinate then its mask in binary, 2 bits per axis.
fn masks_listing(maze_grid: &MazeGrid) -> String {
    let bits = 2 * maze_grid.dimensions_count();
    maze_grid.iter()
        .enumerate()
        .map(|(index, coord)| {
            let mask = maze_grid.mask_at(index).unwrap_or(0);
            format!("{} {:0width$b}", coord, mask, width = bits)
        })
        .join("\n")
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &MazeGrid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.links_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_links() {
        let index_a = maze_grid
            .coordinate_to_index(&src)
            .ok_or("Links iter should give valid coordinate")?;
        let index_b = maze_grid
            .coordinate_to_index(&dst)
            .ok_or("Links iter should give valid coordinate")?;
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
