//! Runs the automaton without a window and logs population counts.
//!
//! Set `RUST_LOG=info` (or `debug`) to see output.

use std::time::Instant;

use anyhow::Result;
use cyclic_automata::{Automaton, AutomatonConfig, ExecutionMode, Neighborhood};
use tracing::info;

const WIDTH: usize = 600;
const HEIGHT: usize = 600;
const SPECIES_COUNT: u8 = 3;
const NEIGHBORHOOD: Neighborhood = Neighborhood::Moore;
const EXECUTION: ExecutionMode = ExecutionMode::Parallel;
const STEPS: u64 = 200;
const REPORT_EVERY: u64 = 20;

fn main() -> Result<()> {
    init_tracing();

    let config = AutomatonConfig::new(WIDTH, HEIGHT, SPECIES_COUNT, NEIGHBORHOOD)
        .with_execution(EXECUTION);
    let mut automaton = Automaton::new(config)?;
    automaton.generate_random_initial_state();
    info!(counts = ?automaton.species_counts(), "seeded grid");

    let started = Instant::now();
    for _ in 0..STEPS {
        automaton.step();
        if automaton.generation() % REPORT_EVERY == 0 {
            info!(
                generation = automaton.generation(),
                counts = ?automaton.species_counts(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "population"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
