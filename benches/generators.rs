use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    generators::{self, BranchPolicy},
    grid::MazeGrid,
    units::MaxDepth,
    utils,
};

fn bench_prims_maze_32(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(32);
    c.bench_function("prims_maze_32", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(&[32, 32]).unwrap();
            let start = g.centre();
            generators::prims(&mut g, &start, &mut rng, BranchPolicy::AxisBiased).unwrap()
        })
    });
}

fn bench_prims_uniform_maze_32(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(32);
    c.bench_function("prims_uniform_maze_32", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(&[32, 32]).unwrap();
            let start = g.origin();
            generators::prims(&mut g, &start, &mut rng, BranchPolicy::Uniform).unwrap()
        })
    });
}

fn bench_hunt_and_kill_2d_maze_32(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(32);
    c.bench_function("hunt_and_kill_2d_maze_32", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(&[32, 32]).unwrap();
            generators::hunt_and_kill_2d(&mut g, &mut rng, None).unwrap()
        })
    });
}

fn bench_hunt_and_kill_maze_32(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(32);
    c.bench_function("hunt_and_kill_maze_32", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(&[32, 32]).unwrap();
            generators::hunt_and_kill(&mut g, &mut rng, None).unwrap()
        })
    });
}

fn bench_hunt_and_kill_depth_4_maze_32(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(32);
    c.bench_function("hunt_and_kill_depth_4_maze_32", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(&[32, 32]).unwrap();
            generators::hunt_and_kill(&mut g, &mut rng, Some(MaxDepth(4))).unwrap()
        })
    });
}

fn bench_hunt_and_kill_maze_10_cubed(c: &mut Criterion) {
    let mut rng = utils::seeded_rng(10);
    c.bench_function("hunt_and_kill_maze_10_cubed", move |b| {
        b.iter(|| {
            let mut g = MazeGrid::new(&[10, 10, 10]).unwrap();
            generators::hunt_and_kill(&mut g, &mut rng, None).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_prims_maze_32,
    bench_prims_uniform_maze_32,
    bench_hunt_and_kill_2d_maze_32,
    bench_hunt_and_kill_maze_32,
    bench_hunt_and_kill_depth_4_maze_32,
    bench_hunt_and_kill_maze_10_cubed
);
criterion_main!(benches);
