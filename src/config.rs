//! Construction parameters for an [`crate::Automaton`].

use crate::automaton::grid::Neighborhood;
use crate::automaton::stepping::ExecutionMode;
use crate::error::AutomatonError;

/// Static configuration of one simulation run.
///
/// Everything here is fixed for the lifetime of the engine built from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutomatonConfig {
    pub width: usize,
    pub height: usize,
    /// Number of species; tags run from 1 to this value.
    pub species_count: u8,
    pub neighborhood: Neighborhood,
    pub execution: ExecutionMode,
    /// Worker threads for parallel stepping (0 = one per core).
    pub num_threads: usize,
    /// Trials per step; `None` means one per cell.
    pub trials_per_step: Option<usize>,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            species_count: 3,
            neighborhood: Neighborhood::Moore,
            execution: ExecutionMode::Parallel,
            num_threads: 0,
            trials_per_step: None,
        }
    }
}

impl AutomatonConfig {
    pub fn new(width: usize, height: usize, species_count: u8, neighborhood: Neighborhood) -> Self {
        Self {
            width,
            height,
            species_count,
            neighborhood,
            ..Self::default()
        }
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_trials_per_step(mut self, trials: usize) -> Self {
        self.trials_per_step = Some(trials);
        self
    }

    /// Number of cells in the configured grid.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Trials performed by one step.
    pub fn trials(&self) -> usize {
        self.trials_per_step.unwrap_or_else(|| self.cell_count())
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), AutomatonError> {
        if self.width == 0 || self.height == 0 {
            return Err(AutomatonError::InvalidConfig(
                "grid dimensions must be positive",
            ));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(AutomatonError::InvalidConfig(
                "grid dimensions overflow the cell count",
            ));
        }
        if self.species_count == 0 {
            return Err(AutomatonError::InvalidConfig(
                "species_count must be at least 1",
            ));
        }
        if self.trials_per_step == Some(0) {
            return Err(AutomatonError::InvalidConfig(
                "trials_per_step must be positive",
            ));
        }
        Ok(())
    }
}
