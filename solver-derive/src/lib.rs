use darling::FromDeriveInput;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};

#[derive(FromDeriveInput)]
#[darling(attributes(solver_test))]
struct SolverTestOpts {
    ident: syn::Ident,
    /// Adds soundness checks for solvers whose deterministic moves must never be wrong.
    #[darling(default)]
    deterministic: bool,
}

/// Derives the standard test suite for a minesweeper solver.
///
/// The solver type must implement `Default` and `Solver`. Adding
/// `#[solver_test(deterministic)]` also checks that every move reported as
/// deterministic is correct on randomly generated grids.
///
/// # Example
/// ```ignore
/// #[derive(Default, SolverTest)]
/// #[solver_test(deterministic)]
/// struct MySolver;
///
/// impl Solver for MySolver {
///     // ... solver implementation
/// }
/// ```
#[proc_macro_derive(SolverTest, attributes(solver_test))]
pub fn derive_solver_test(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let opts = match SolverTestOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(err) => return err.write_errors().into(),
    };
    let name = &opts.ident;
    let deterministic = opts.deterministic;
    let test_mod_name = format_ident!("{}_tests", name.to_string().to_lowercase());

    let soundness = if deterministic {
        quote! {
            /// Deterministic moves must match the hidden layout
            #[test]
            fn test_deterministic_moves_are_sound() {
                use crate::solver::Certainty;

                for seed in 0..50u64 {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut grid = Grid::new(8, 8).unwrap();
                    let start = Position::new((seed % 8) as i32, (seed / 8 % 8) as i32);
                    grid.generate_map(10, Some(start), &mut rng).unwrap();
                    grid.reveal(start).unwrap();

                    let mut solver = super::#name::default();
                    let result = solver
                        .next_move(&grid, &mut rng, &CancelToken::new())
                        .unwrap();
                    if result.certainty != Certainty::Deterministic {
                        continue;
                    }
                    for action in result.actions {
                        match action {
                            SolverAction::Reveal(pos) => {
                                assert!(!grid.is_mine(pos), "Revealed mine at {} (seed {})", pos, seed)
                            }
                            SolverAction::Flag(pos) => {
                                assert!(grid.is_mine(pos), "Flagged safe cell {} (seed {})", pos, seed)
                            }
                        }
                    }
                }
            }
        }
    } else {
        quote! {}
    };

    let expanded = quote! {
        #[cfg(test)]
        mod #test_mod_name {
            use crate::solver::{Solver, SolverAction};
            use crate::{CancelToken, Grid, Position};
            use rand::{rngs::StdRng, SeedableRng};

            /// Test solver name consistency
            #[test]
            fn test_solver_name() {
                let solver = super::#name::default();
                assert!(!solver.name().is_empty(), "Solver name must not be empty");
            }

            /// Test the determinism flag matches the declared behavior
            #[test]
            fn test_determinism_flag() {
                let solver = super::#name::default();
                assert_eq!(solver.is_deterministic(), #deterministic);
            }

            /// A fully revealed grid leaves nothing to do
            #[test]
            fn test_fully_revealed_grid() {
                let mut grid = Grid::new(2, 2).unwrap();
                grid.reveal_all();
                let mut solver = super::#name::default();
                let mut rng = StdRng::seed_from_u64(0);

                let result = solver
                    .next_move(&grid, &mut rng, &CancelToken::new())
                    .unwrap();
                assert!(result.actions.is_empty(), "Fully revealed grid should produce no actions");
            }

            /// Test that solver actions target available cells
            #[test]
            fn test_action_validity() {
                let mines = [Position::new(0, 0), Position::new(4, 4), Position::new(2, 3)];
                let mut grid = Grid::with_mines(5, 5, &mines).unwrap();
                grid.reveal(Position::new(4, 0)).unwrap();
                let mut solver = super::#name::default();
                let mut rng = StdRng::seed_from_u64(1);

                let result = solver
                    .next_move(&grid, &mut rng, &CancelToken::new())
                    .unwrap();

                assert!(!result.actions.is_empty(), "Solver should produce at least one action");
                for action in result.actions {
                    match action {
                        SolverAction::Reveal(pos) | SolverAction::Flag(pos) => {
                            assert!(grid.contains(pos), "Solver action must be within grid bounds");
                            assert!(!grid.is_revealed(pos), "Solver action must target a hidden cell");
                            assert!(!grid.is_flagged(pos), "Solver action must not repeat a flag");
                        }
                    }
                }
            }

            #soundness
        }
    };

    TokenStream::from(expanded)
}
