use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use npuzzle::{AStarSolver, BreadthFirstSolver, HeuristicKind, Shuffler, Solver};

fn eight_puzzle(c: &mut Criterion) {
    let boards: Vec<_> = (0..4)
        .map(|seed| Shuffler::from_seed(seed).shuffled(3, 1000).unwrap())
        .collect();

    let mut group = c.benchmark_group("eight_puzzle");
    group.sample_size(10);

    group.bench_function("bfs", |b| {
        b.iter(|| {
            for board in &boards {
                black_box(BreadthFirstSolver::new().solve(board));
            }
        })
    });

    for heuristic in HeuristicKind::ALL {
        group.bench_with_input(
            BenchmarkId::new("a_star", heuristic),
            &heuristic,
            |b, &heuristic| {
                b.iter(|| {
                    for board in &boards {
                        black_box(AStarSolver::new(heuristic).solve(board));
                    }
                })
            },
        );
    }

    group.finish();
}

fn fifteen_puzzle(c: &mut Criterion) {
    let board = Shuffler::from_seed(42).shuffled(4, 40).unwrap();

    let mut group = c.benchmark_group("fifteen_puzzle");
    group.sample_size(10);
    for heuristic in [HeuristicKind::Manhattan, HeuristicKind::LinearConflict] {
        group.bench_with_input(
            BenchmarkId::new("a_star", heuristic),
            &heuristic,
            |b, &heuristic| b.iter(|| black_box(AStarSolver::new(heuristic).solve(&board))),
        );
    }
    group.finish();
}

criterion_group!(benches, eight_puzzle, fifteen_puzzle);
criterion_main!(benches);
