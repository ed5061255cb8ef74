//! Cyclic Automata - stochastic predator-prey cellular automaton
//!
//! Cells on a 2-D grid hold a species tag (0 = empty). Each step runs one
//! randomized trial per cell: a random cell moves, preys on, or reproduces
//! into a random neighbour. Species `s` preys on `(s mod N) + 1`.
//!
//! The engine is [`Automaton`]; the C ABI in [`ffi`] lets an external
//! render driver own one through an opaque handle.

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod state;


pub use automaton::{Action, ExecutionMode, Grid, Neighborhood, Outcome, Species, EMPTY};
pub use config::AutomatonConfig;
pub use error::AutomatonError;
pub use state::{Automaton, RuleFn};
