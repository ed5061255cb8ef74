//! The automaton engine: owns the grid and drives steps.

use std::fmt;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace, warn};

use crate::automaton::{
    random_initial_state, step_parallel, step_serial, stepping::entropy_rng, ExecutionMode, Grid,
    Neighborhood, Species,
};
use crate::config::AutomatonConfig;
use crate::error::AutomatonError;

/// Transition rule callback: neighbour values in, new value out.
pub type RuleFn = Box<dyn Fn(&[Species]) -> Species + Send + Sync>;

/// A cyclic predator-prey automaton.
///
/// After construction the grid only changes through
/// [`Automaton::load_initial_state`], [`Automaton::generate_random_initial_state`]
/// and [`Automaton::step`]. The grid itself is not reachable from outside:
///
/// ```compile_fail
/// use cyclic_automata::{Automaton, Neighborhood};
///
/// let automaton = Automaton::with_dimensions(2, 2, 3, Neighborhood::Moore).unwrap();
/// automaton.grid().load(&[9; 4]);
/// ```
pub struct Automaton {
    config: AutomatonConfig,
    grid: Grid,
    generation: u64,
    /// Present only in parallel mode.
    thread_pool: Option<ThreadPool>,
    /// Stored for callers; stepping never consults it.
    rule: Option<RuleFn>,
}

fn build_thread_pool(num_threads: usize) -> Result<ThreadPool, AutomatonError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .or_else(|err| {
            warn!(%err, num_threads, "worker pool failed to build, falling back to one thread");
            ThreadPoolBuilder::new().num_threads(1).build()
        })?;
    Ok(pool)
}

impl Automaton {
    /// Build an engine with an all-empty grid.
    pub fn new(config: AutomatonConfig) -> Result<Self, AutomatonError> {
        config.validate()?;

        let thread_pool = match config.execution {
            ExecutionMode::Serial => None,
            ExecutionMode::Parallel => Some(build_thread_pool(config.num_threads)?),
        };

        debug!(
            width = config.width,
            height = config.height,
            species = config.species_count,
            neighborhood = ?config.neighborhood,
            execution = ?config.execution,
            workers = thread_pool.as_ref().map_or(1, ThreadPool::current_num_threads),
            "created automaton"
        );

        Ok(Self {
            grid: Grid::new(config.width, config.height),
            config,
            generation: 0,
            thread_pool,
            rule: None,
        })
    }

    /// Build an engine with default execution settings.
    pub fn with_dimensions(
        width: usize,
        height: usize,
        species_count: Species,
        neighborhood: Neighborhood,
    ) -> Result<Self, AutomatonError> {
        Self::new(AutomatonConfig::new(width, height, species_count, neighborhood))
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Copy of every cell in row-major order.
    pub fn snapshot(&self) -> Vec<Species> {
        self.grid.snapshot()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn species_count(&self) -> Species {
        self.config.species_count
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.config.neighborhood
    }

    pub fn execution(&self) -> ExecutionMode {
        self.config.execution
    }

    /// Number of completed steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bounds-checked cell read.
    pub fn cell(&self, x: usize, y: usize) -> Result<Species, AutomatonError> {
        self.grid.try_get(x, y)
    }

    /// Values of the in-bounds neighbours of `(x, y)`, in enumeration order.
    pub fn neighborhood_values(&self, x: usize, y: usize) -> Result<Vec<Species>, AutomatonError> {
        self.grid.try_get(x, y)?;
        Ok(self
            .grid
            .neighbors(x, y, self.config.neighborhood)
            .into_iter()
            .map(|(nx, ny)| self.grid.get(nx, ny))
            .collect())
    }

    /// Cells per tag; index 0 counts empty cells.
    pub fn species_counts(&self) -> Vec<usize> {
        self.grid.species_counts(self.config.species_count)
    }

    /// Replace the whole grid.
    ///
    /// Ignored (returns false) unless `values` has exactly one entry per cell
    /// and every entry is a valid tag.
    pub fn load_initial_state(&mut self, values: &[Species]) -> bool {
        if let Some(&bad) = values.iter().find(|&&v| v > self.config.species_count) {
            debug!(value = bad, "ignoring initial state with unknown species");
            return false;
        }
        let loaded = self.grid.load(values);
        if !loaded {
            debug!(
                expected = self.grid.len(),
                got = values.len(),
                "ignoring initial state of the wrong length"
            );
        }
        loaded
    }

    /// Fill the grid with equal shares of each species and shuffle.
    pub fn generate_random_initial_state(&mut self) {
        let state = random_initial_state(
            self.grid.len(),
            self.config.species_count,
            &mut entropy_rng(),
        );
        self.grid.load(&state);
    }

    /// Advance one step of `trials_per_step` randomized trials.
    pub fn step(&mut self) {
        let trials = self.config.trials();
        let neighborhood = self.config.neighborhood;
        let species = self.config.species_count;

        match &self.thread_pool {
            Some(pool) => step_parallel(pool, &self.grid, neighborhood, species, trials),
            None => step_serial(&self.grid, neighborhood, species, trials),
        }

        self.generation += 1;
        trace!(generation = self.generation, trials, "step complete");
    }

    /// Advance `steps` steps.
    pub fn step_n(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Store a transition rule. It is kept for callers but not used by [`Self::step`].
    pub fn set_rule<F>(&mut self, rule: F)
    where
        F: Fn(&[Species]) -> Species + Send + Sync + 'static,
    {
        self.rule = Some(Box::new(rule));
    }

    pub fn has_rule(&self) -> bool {
        self.rule.is_some()
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("config", &self.config)
            .field("generation", &self.generation)
            .field("has_rule", &self.rule.is_some())
            .finish_non_exhaustive()
    }
}
