//! Core automaton logic and grid operations.
//!
//! This module contains the grid store, the interaction rules, the
//! randomized stepping loop and initial-state generation.
//! The engine in `state` and the FFI layer in `ffi/` call these functions.

pub mod grid;
pub mod rules;
pub mod seeding;
pub mod stepping;

pub use grid::{Grid, Neighborhood, Neighbors, Species, EMPTY};
pub use rules::{apply_action, preys_on, Action, Outcome};
pub use seeding::random_initial_state;
pub use stepping::{run_trial, step_parallel, step_serial, ExecutionMode};
