use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    coordinates::Coordinate,
    generators,
    grid::MazeGrid,
    utils,
};

fn bench_grid_32(c: &mut Criterion) {
    c.bench_function("grid_32", |b| b.iter(|| MazeGrid::new(&[32, 32]).unwrap()));
}

fn bench_grid_16_4d(c: &mut Criterion) {
    c.bench_function("grid_16_4d", |b| b.iter(|| MazeGrid::new(&[16, 16, 16, 16]).unwrap()));
}

fn bench_available_directions_32(c: &mut Criterion) {
    let g = MazeGrid::new(&[32, 32]).unwrap();
    let coord = Coordinate::from((16, 16));
    c.bench_function("available_directions_32", move |b| {
        b.iter(|| g.available_directions(&coord))
    });
}

fn bench_index_to_coordinate_4d(c: &mut Criterion) {
    let g = MazeGrid::new(&[16, 16, 16, 16]).unwrap();
    let last = g.size() - 1;
    c.bench_function("index_to_coordinate_4d", move |b| {
        b.iter(|| g.coordinate_at(last))
    });
}

fn bench_iter_links_32(c: &mut Criterion) {
    let mut g = MazeGrid::new(&[32, 32]).unwrap();
    let mut rng = utils::seeded_rng(7);
    generators::hunt_and_kill(&mut g, &mut rng, None).unwrap();
    c.bench_function("iter_links_32", move |b| {
        b.iter(|| g.iter_links().count())
    });
}

criterion_group!(
    benches,
    bench_grid_32,
    bench_grid_16_4d,
    bench_available_directions_32,
    bench_index_to_coordinate_4d,
    bench_iter_links_32
);
criterion_main!(benches);
