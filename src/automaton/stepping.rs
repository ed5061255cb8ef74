//! Randomized trials and whole steps, serial or on a worker pool.
//!
//! A step is a fixed number of independent trials. Each trial draws a source
//! cell, an action and a neighbour, then applies the action to that pair.
//!
//! In parallel mode trials are not coordinated: two workers can
//! read-modify-write overlapping cell pairs at the same time. Cells are
//! atomics, so every read sees a value some trial actually stored and tags
//! stay in range, but a pair update can interleave with another one (a Move
//! may duplicate or drop an individual). This nondeterminism is accepted;
//! use serial mode for strictly sequential semantics.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;

use super::grid::{Grid, Neighborhood, Species};
use super::rules::{apply_action, Action, Outcome};

/// How the trials of one step are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One trial after another on the calling thread.
    Serial,
    /// Trials spread over the worker pool with no locking between them.
    #[default]
    Parallel,
}

/// Fresh generator seeded from thread-local entropy.
pub fn entropy_rng() -> SmallRng {
    SmallRng::seed_from_u64(rand::random())
}

/// Run one trial: draw source, action and target, then apply.
pub fn run_trial<R: Rng + ?Sized>(
    grid: &Grid,
    neighborhood: Neighborhood,
    species_count: Species,
    rng: &mut R,
) -> Outcome {
    let source = rng.random_range(0..grid.len());
    let action = Action::ALL[rng.random_range(0..Action::ALL.len())];

    let (x, y) = grid.coords(source);
    let neighbors = grid.neighbors(x, y, neighborhood);
    if neighbors.is_empty() {
        return Outcome::Unchanged;
    }

    let (tx, ty) = neighbors[rng.random_range(0..neighbors.len())];
    let target = grid.index(tx, ty);

    apply_action(grid, source, target, action, species_count)
}

/// Run `trials` trials one after another.
pub fn step_serial(grid: &Grid, neighborhood: Neighborhood, species_count: Species, trials: usize) {
    if grid.is_empty() {
        return;
    }

    let mut rng = entropy_rng();
    for _ in 0..trials {
        run_trial(grid, neighborhood, species_count, &mut rng);
    }
}

/// Run `trials` trials on `pool`, each worker with its own generator.
pub fn step_parallel(
    pool: &ThreadPool,
    grid: &Grid,
    neighborhood: Neighborhood,
    species_count: Species,
    trials: usize,
) {
    if grid.is_empty() {
        return;
    }

    pool.install(|| {
        (0..trials)
            .into_par_iter()
            .for_each_init(entropy_rng, |rng, _| {
                run_trial(grid, neighborhood, species_count, rng);
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::grid::EMPTY;

    fn pool(threads: usize) -> ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    /// Pseudo-random grid contents from a simple LCG.
    fn noisy_state(len: usize, species_count: Species, seed: u32) -> Vec<Species> {
        let mut lcg = seed.wrapping_mul(1103515245).wrapping_add(12345);
        (0..len)
            .map(|_| {
                lcg = lcg.wrapping_mul(1103515245).wrapping_add(12345);
                ((lcg >> 16) % (species_count as u32 + 1)) as Species
            })
            .collect()
    }

    #[test]
    fn test_trial_on_single_cell_is_noop() {
        let grid = Grid::new(1, 1);
        grid.set(0, 0, 2);
        let mut rng = entropy_rng();

        for _ in 0..100 {
            let outcome = run_trial(&grid, Neighborhood::Moore, 3, &mut rng);
            assert_eq!(outcome, Outcome::Unchanged);
        }
        assert_eq!(grid.get(0, 0), 2);
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let grid = Grid::new(16, 16);
        step_serial(&grid, Neighborhood::Moore, 3, grid.len());
        assert!(grid.snapshot().iter().all(|&c| c == EMPTY));

        step_parallel(&pool(2), &grid, Neighborhood::VonNeumann, 3, grid.len());
        assert!(grid.snapshot().iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_full_grid_without_predation_is_frozen() {
        // With two species, 1 only eats 2, so a grid full of 1s cannot change.
        let grid = Grid::new(8, 8);
        grid.load(&vec![1; 64]);

        for _ in 0..10 {
            step_serial(&grid, Neighborhood::Moore, 2, grid.len());
        }
        assert!(grid.snapshot().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_lone_species_only_spreads() {
        // No predation between 2s with three species: 2 only ever spreads.
        let grid = Grid::new(10, 10);
        let mut state = vec![EMPTY; 100];
        state[55] = 2;
        grid.load(&state);

        for _ in 0..20 {
            step_serial(&grid, Neighborhood::VonNeumann, 3, grid.len());
        }

        let counts = grid.species_counts(3);
        assert_eq!(counts[1], 0);
        assert_eq!(counts[3], 0);
        assert!(counts[2] >= 1);
        assert_eq!(counts[0] + counts[2], 100);
    }

    #[test]
    fn test_serial_keeps_values_in_range() {
        let grid = Grid::new(20, 20);
        grid.load(&noisy_state(400, 3, 7));

        for _ in 0..25 {
            step_serial(&grid, Neighborhood::Moore, 3, grid.len());
            assert!(grid.snapshot().iter().all(|&c| c <= 3));
        }
        assert_eq!(grid.len(), 400);
    }

    #[test]
    fn test_parallel_keeps_values_in_range() {
        let grid = Grid::new(64, 64);
        grid.load(&noisy_state(64 * 64, 4, 11));
        let pool = pool(4);

        for _ in 0..10 {
            step_parallel(&pool, &grid, Neighborhood::VonNeumann, 4, grid.len());
            assert!(grid.snapshot().iter().all(|&c| c <= 4));
        }
        assert_eq!(grid.len(), 64 * 64);
    }

    #[test]
    fn test_trials_change_a_mixed_grid() {
        // Columns alternate between species 1 and empty cells.
        let grid = Grid::new(4, 4);
        grid.load(&[1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0]);
        let mut rng = entropy_rng();

        let changed = (0..1000)
            .filter(|_| run_trial(&grid, Neighborhood::Moore, 3, &mut rng) != Outcome::Unchanged)
            .count();
        assert!(changed > 0);
        assert!(grid.snapshot().iter().all(|&c| c <= 1));
    }

    /// Outcome counts of `trials` seeded trials, each starting from `state`.
    fn outcome_counts(state: &[Species], trials: usize, seed: u64) -> [usize; 4] {
        let grid = Grid::new(state.len(), 1);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut counts = [0; 4];

        for _ in 0..trials {
            grid.load(state);
            let slot = match run_trial(&grid, Neighborhood::VonNeumann, 3, &mut rng) {
                Outcome::Moved => 0,
                Outcome::Predated => 1,
                Outcome::Reproduced => 2,
                Outcome::Unchanged => 3,
            };
            counts[slot] += 1;
        }
        counts
    }

    #[test]
    fn test_actions_are_drawn_uniformly() {
        // Source 0 (p = 1/2) into an empty cell: Move and Reproduce each
        // succeed a third of the time, Predate never does.
        let [moved, predated, reproduced, unchanged] = outcome_counts(&[1, EMPTY], 6000, 42);
        assert!((850..1150).contains(&moved), "moved {moved}");
        assert!((850..1150).contains(&reproduced), "reproduced {reproduced}");
        assert_eq!(predated, 0);
        assert_eq!(moved + reproduced + unchanged, 6000);

        // 1 eats 2 only when 1 is the source and Predate is drawn.
        let [moved, predated, reproduced, _] = outcome_counts(&[1, 2], 6000, 7);
        assert!((850..1150).contains(&predated), "predated {predated}");
        assert_eq!(moved + reproduced, 0);
    }

    /// How often each cell of a 3x3 grid ends up holding the individual
    /// that starts alone in the corner, over `trials` seeded single trials.
    fn corner_landings(neighborhood: Neighborhood, trials: usize, seed: u64) -> [usize; 9] {
        let grid = Grid::new(3, 3);
        let mut start = [EMPTY; 9];
        start[0] = 1;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut landings = [0; 9];

        for _ in 0..trials {
            grid.load(&start);
            run_trial(&grid, neighborhood, 3, &mut rng);
            for (index, &value) in grid.snapshot().iter().enumerate().skip(1) {
                if value != EMPTY {
                    assert_eq!(value, 1);
                    landings[index] += 1;
                }
            }
        }
        landings
    }

    #[test]
    fn test_corner_targets_are_topology_neighbors() {
        // Source (0, 0), Move or Reproduce, one of three targets: p = 2/81, about 200 hits.
        let moore = corner_landings(Neighborhood::Moore, 8100, 3);
        for (index, &count) in moore.iter().enumerate().skip(1) {
            if [1, 3, 4].contains(&index) {
                assert!((120..280).contains(&count), "cell {index} hit {count} times");
            } else {
                assert_eq!(count, 0, "cell {index} is not a Moore neighbour of (0, 0)");
            }
        }

        // Two targets: p = 1/27, again about 200 hits.
        let von_neumann = corner_landings(Neighborhood::VonNeumann, 5400, 5);
        for (index, &count) in von_neumann.iter().enumerate().skip(1) {
            if [1, 3].contains(&index) {
                assert!((120..280).contains(&count), "cell {index} hit {count} times");
            } else {
                assert_eq!(count, 0, "cell {index} is not a von Neumann neighbour of (0, 0)");
            }
        }
    }
}
