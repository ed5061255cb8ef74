//! Automaton creation, destruction, and generation queries.

use crate::automaton::{ExecutionMode, Neighborhood};
use crate::config::AutomatonConfig;
use crate::state::Automaton;

/// `neighborhood` value selecting the 4-connected topology.
pub const CA_VON_NEUMANN: u8 = 0;
/// `neighborhood` value selecting the 8-connected topology.
pub const CA_MOORE: u8 = 1;

/// `execution` value for serial stepping.
pub const CA_SERIAL: u8 = 0;
/// `execution` value for parallel stepping on all cores.
pub const CA_PARALLEL: u8 = 1;

/// Creates a new automaton with an empty grid and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new Automaton, or null if the dimensions, species count,
/// neighborhood or execution value is invalid.
///
/// # Safety
/// The returned pointer must eventually be freed with `ca_destroy()`.
#[no_mangle]
pub extern "C" fn ca_create(
    width: u32,
    height: u32,
    species_count: u8,
    neighborhood: u8,
    execution: u8,
) -> *mut Automaton {
    let neighborhood = match neighborhood {
        CA_VON_NEUMANN => Neighborhood::VonNeumann,
        CA_MOORE => Neighborhood::Moore,
        _ => return std::ptr::null_mut(),
    };
    let execution = match execution {
        CA_SERIAL => ExecutionMode::Serial,
        CA_PARALLEL => ExecutionMode::Parallel,
        _ => return std::ptr::null_mut(),
    };

    let config = AutomatonConfig::new(width as usize, height as usize, species_count, neighborhood)
        .with_execution(execution);
    match Automaton::new(config) {
        Ok(automaton) => Box::into_raw(Box::new(automaton)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroys an automaton and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `ca_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn ca_destroy(ptr: *mut Automaton) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the number of completed steps.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn ca_get_generation(ptr: *const Automaton) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}
