use criterion::{criterion_group, criterion_main, Criterion};
use minesweeper_inference::{
    run_batch, run_solver,
    solver::{create_hybrid_solver, ConstraintSolver, EvolutionConfig, EvolutionarySolver, Solver},
    CancelToken, Grid, SolveOptions,
};

fn evolution_config() -> EvolutionConfig {
    EvolutionConfig {
        max_generations: 500,
        ..Default::default()
    }
}

fn solvers() -> Vec<(Box<dyn Solver>, &'static str)> {
    vec![
        (Box::new(ConstraintSolver::default()), "Constraint"),
        (
            Box::new(EvolutionarySolver::new(evolution_config()).unwrap()),
            "Evolutionary",
        ),
        (
            Box::new(create_hybrid_solver(evolution_config()).unwrap()),
            "Hybrid",
        ),
    ]
}

fn benchmark_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solvers");
    group.sample_size(10);

    let test_configs = vec![
        (8, 8, 10),   // Beginner
        (16, 16, 40), // Intermediate
    ];

    for (rows, columns, mines) in test_configs {
        for (mut solver, name) in solvers() {
            let mut seed = 0;

            // Performance benchmark
            group.bench_function(format!("{} {}x{}", name, rows, columns), |b| {
                b.iter_with_setup(
                    || {
                        seed += 1;
                        let mut grid = Grid::new(rows, columns).unwrap();
                        grid.set_target_mine_count(mines);
                        (grid, seed)
                    },
                    |(mut grid, seed)| {
                        let options = SolveOptions {
                            seed: Some(seed),
                            ..Default::default()
                        };
                        let outcome =
                            run_solver(&mut grid, solver.as_mut(), &options, &CancelToken::new())
                                .unwrap();
                        criterion::black_box(outcome)
                    },
                );
            });

            // Effectiveness stats (20 games)
            let mut grid = Grid::new(rows, columns).unwrap();
            let options = SolveOptions {
                seed: Some(1000),
                ..Default::default()
            };
            let stats = run_batch(
                &mut grid,
                solver.as_mut(),
                20,
                mines,
                &options,
                &CancelToken::new(),
            )
            .unwrap();

            println!("\n{} on {}x{} board:", name, rows, columns);
            println!("Success rate: {:.1}%", stats.success_rate() * 100.0);
            println!("Games played: {}", stats.played());
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_solvers);
criterion_main!(benches);
