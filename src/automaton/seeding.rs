//! Proportional-fill-and-shuffle initial states.

use rand::seq::SliceRandom;
use rand::Rng;

use super::grid::{Species, EMPTY};

/// Build a state of `cells` cells holding `cells / (species_count + 1)` cells
/// of each species, empty cells for the rest, in uniformly random order.
///
/// Leftovers from the integer division are always empty.
pub fn random_initial_state<R: Rng + ?Sized>(
    cells: usize,
    species_count: Species,
    rng: &mut R,
) -> Vec<Species> {
    let per_species = cells / (species_count as usize + 1);

    let mut state: Vec<Species> = (1..=species_count)
        .flat_map(|species| std::iter::repeat(species).take(per_species))
        .collect();
    state.resize(cells, EMPTY);
    state.shuffle(rng);
    state
}
