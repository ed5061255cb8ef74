//! Interaction rules between a source cell and one of its neighbours.
//!
//! - Move: an occupied source swaps with an empty target
//! - Predate: the source eliminates the target if the target is its prey
//! - Reproduce: an occupied source copies itself into an empty target
//!
//! Species `s` preys on `(s mod N) + 1`, so with three species 1 eats 2,
//! 2 eats 3 and 3 eats 1.

use super::grid::{Grid, Species, EMPTY};

/// Action drawn for a trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move,
    Predate,
    Reproduce,
}

impl Action {
    /// Every action, each drawn with equal probability.
    pub const ALL: [Action; 3] = [Action::Move, Action::Predate, Action::Reproduce];
}

/// What applying an action did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Predated,
    Reproduced,
    Unchanged,
}

/// Whether `predator` eats `prey` under the cyclic order of `species_count` species.
#[inline]
pub fn preys_on(predator: Species, prey: Species, species_count: Species) -> bool {
    if predator == EMPTY || prey == EMPTY || species_count == 0 {
        return false;
    }
    (predator % species_count) as u16 + 1 == prey as u16
}

/// Apply `action` from the cell at `source` to the cell at `target` (linear indices).
///
/// Both cells are read once up front; every failed precondition is a no-op.
pub fn apply_action(
    grid: &Grid,
    source: usize,
    target: usize,
    action: Action,
    species_count: Species,
) -> Outcome {
    let from = grid.get_index(source);
    let to = grid.get_index(target);

    match action {
        Action::Move if from != EMPTY && to == EMPTY => {
            grid.set_index(source, to);
            grid.set_index(target, from);
            Outcome::Moved
        }
        Action::Predate if preys_on(from, to, species_count) => {
            grid.set_index(target, EMPTY);
            Outcome::Predated
        }
        Action::Reproduce if from != EMPTY && to == EMPTY => {
            grid.set_index(target, from);
            Outcome::Reproduced
        }
        _ => Outcome::Unchanged,
    }
}
