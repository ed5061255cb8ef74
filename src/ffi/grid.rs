//! Grid queries, state loading, and stepping.

use crate::automaton::Species;
use crate::state::Automaton;

/// Gets the grid width, or 0 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
#[no_mangle]
pub unsafe extern "C" fn ca_get_width(ptr: *const Automaton) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    u32::try_from((*ptr).width()).unwrap_or(u32::MAX)
}

/// Gets the grid height, or 0 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
#[no_mangle]
pub unsafe extern "C" fn ca_get_height(ptr: *const Automaton) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    u32::try_from((*ptr).height()).unwrap_or(u32::MAX)
}

/// Gets the species tag of a cell (0 = empty).
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
///
/// # Returns
/// 0 if out of bounds or null pointer; the cell's tag otherwise.
#[no_mangle]
pub unsafe extern "C" fn ca_get_cell(ptr: *const Automaton, x: i32, y: i32) -> u8 {
    if ptr.is_null() || x < 0 || y < 0 {
        return 0;
    }

    let automaton = &*ptr;
    automaton.cell(x as usize, y as usize).unwrap_or(0)
}

/// Replaces the whole grid with `len` tags read from `values` (row-major).
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
/// - `values` must point to at least `len` readable bytes, or be null
///
/// # Returns
/// 0 if the state was loaded, 1 if it was ignored (null pointer, length
/// different from width * height, or an unknown species tag).
#[no_mangle]
pub unsafe extern "C" fn ca_load_state(
    ptr: *mut Automaton,
    values: *const Species,
    len: usize,
) -> i32 {
    if ptr.is_null() || values.is_null() {
        return 1;
    }

    let automaton = &mut *ptr;
    let values = std::slice::from_raw_parts(values, len);
    if automaton.load_initial_state(values) {
        0
    } else {
        1
    }
}

/// Fills the grid with equal shares of every species plus empty cells, shuffled.
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
#[no_mangle]
pub unsafe extern "C" fn ca_generate_random_state(ptr: *mut Automaton) {
    if ptr.is_null() {
        return;
    }

    let automaton = &mut *ptr;
    automaton.generate_random_initial_state();
}

/// Advances the automaton by one step (width * height randomized trials).
///
/// # Safety
/// - `ptr` must be a valid pointer to an Automaton, or null
#[no_mangle]
pub unsafe extern "C" fn ca_step(ptr: *mut Automaton) {
    if ptr.is_null() {
        return;
    }

    let automaton = &mut *ptr;
    automaton.step();
}
