//! C FFI layer for an external render driver.
//!
//! This module exports C ABI functions so a windowing/rendering host can own
//! an automaton through an opaque handle, advance it and read cells back.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module and the engine in `state`.
//! These functions are thin wrappers that handle null checks, pointer safety,
//! and C-to-Rust conversions.

pub mod grid;
pub mod lifecycle;

pub use grid::{
    ca_generate_random_state, ca_get_cell, ca_get_height, ca_get_width, ca_load_state, ca_step,
};
pub use lifecycle::{
    ca_create, ca_destroy, ca_get_generation, CA_MOORE, CA_PARALLEL, CA_SERIAL, CA_VON_NEUMANN,
};
