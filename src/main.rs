use clap::{Parser, ValueEnum};
use minesweeper_inference::solver::{
    create_hybrid_solver, ConstraintSolver, EvolutionConfig, EvolutionarySolver, Solver,
};
use minesweeper_inference::{run_batch, CancelToken, Grid, SolveError, SolveOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    Constraint,
    Evolutionary,
    Hybrid,
}

#[derive(Parser, Debug)]
#[command(version, about = "Plays minesweeper games with an inference solver", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[arg(short, long, value_enum, default_value_t = SolverKind::Hybrid)]
    solver: SolverKind,

    #[arg(long, default_value_t = 9)]
    rows: usize,

    #[arg(long, default_value_t = 9)]
    columns: usize,

    #[arg(short, long, default_value_t = 10)]
    mines: usize,

    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,

    /// Generation cap for the evolutionary solver
    #[arg(long, default_value_t = EvolutionConfig::default().max_generations)]
    max_generations: usize,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match run(&args) {
        Ok(_) => {}
        Err(e) => eprintln!("Solver error: {}", e),
    }
}

fn build_solver(args: &Args) -> Result<Box<dyn Solver>, SolveError> {
    let config = EvolutionConfig {
        max_generations: args.max_generations,
        ..Default::default()
    };
    let solver: Box<dyn Solver> = match args.solver {
        SolverKind::Constraint => Box::new(ConstraintSolver::default()),
        SolverKind::Evolutionary => Box::new(EvolutionarySolver::new(config)?),
        SolverKind::Hybrid => Box::new(create_hybrid_solver(config)?),
    };
    Ok(solver)
}

fn run(args: &Args) -> Result<(), SolveError> {
    let mut grid = Grid::new(args.rows, args.columns)?;
    let mut solver = build_solver(args)?;
    let options = SolveOptions {
        seed: args.seed,
        ..Default::default()
    };

    log::info!(
        "{} on {}x{} with {} mines, {} runs",
        solver.name(),
        args.rows,
        args.columns,
        args.mines,
        args.runs
    );
    let stats = run_batch(
        &mut grid,
        solver.as_mut(),
        args.runs,
        args.mines,
        &options,
        &CancelToken::new(),
    )?;

    println!("{}", grid);
    println!(
        "Won {} of {} games ({:.1}%)",
        stats.wins,
        stats.played(),
        stats.success_rate() * 100.0
    );
    Ok(())
}
