//! Grid storage, coordinate mapping and neighbour enumeration.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use smallvec::SmallVec;

use crate::error::AutomatonError;

/// Species tag stored in a cell. 0 is an empty cell.
pub type Species = u8;

/// Tag of an empty cell.
pub const EMPTY: Species = 0;

/// Neighbour set of a cell. Never more than 8 entries.
pub type Neighbors = SmallVec<[(usize, usize); 8]>;

/// Adjacency rule used to pick interaction partners. There is no wraparound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighborhood {
    /// 4-connected: up, right, down, left.
    VonNeumann,
    /// 8-connected: the 3x3 block around the cell, scanned row by row.
    Moore,
}

const VON_NEUMANN_OFFSETS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Neighborhood {
    /// Neighbour offsets in enumeration order.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Neighborhood::VonNeumann => &VON_NEUMANN_OFFSETS,
            Neighborhood::Moore => &MOORE_OFFSETS,
        }
    }
}

/// Dense row-major store of species tags.
///
/// Cells are atomics so trials running on several workers can share the
/// grid through `&Grid`. Every access is `Relaxed`: single cells are never
/// torn, but an update touching two cells is not atomic as a pair.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<AtomicU8>,
}

impl Grid {
    /// Allocate a grid with every cell empty.
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..width * height).map(|_| AtomicU8::new(EMPTY)).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (always `width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of a coordinate.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "({x}, {y}) outside grid");
        y * self.width + x
    }

    /// Coordinate of a linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Read a cell. The coordinate must be inside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Species {
        self.get_index(self.index(x, y))
    }

    /// Write a cell. The coordinate must be inside the grid.
    #[inline]
    pub(crate) fn set(&self, x: usize, y: usize, value: Species) {
        self.set_index(self.index(x, y), value);
    }

    #[inline]
    pub fn get_index(&self, index: usize) -> Species {
        self.cells[index].load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn set_index(&self, index: usize, value: Species) {
        self.cells[index].store(value, Ordering::Relaxed);
    }

    /// Bounds-checked read.
    pub fn try_get(&self, x: usize, y: usize) -> Result<Species, AutomatonError> {
        if !self.in_bounds(x, y) {
            return Err(AutomatonError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.get(x, y))
    }

    /// In-bounds neighbours of `(x, y)` in the topology's fixed order.
    pub fn neighbors(&self, x: usize, y: usize, neighborhood: Neighborhood) -> Neighbors {
        neighborhood
            .offsets()
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                self.in_bounds(nx, ny).then_some((nx, ny))
            })
            .collect()
    }

    /// Replace every cell. Ignored unless `values` covers the grid exactly.
    pub(crate) fn load(&self, values: &[Species]) -> bool {
        if values.len() != self.cells.len() {
            return false;
        }
        for (cell, &value) in self.cells.iter().zip(values) {
            cell.store(value, Ordering::Relaxed);
        }
        true
    }

    /// Copy of every cell in row-major order.
    pub fn snapshot(&self) -> Vec<Species> {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .collect()
    }

    /// Cells per tag, indexed by tag (index 0 counts empty cells).
    ///
    /// Writers are crate-private and only store tags up to `species_count`,
    /// so the counts always add up to `len()`.
    pub fn species_counts(&self, species_count: Species) -> Vec<usize> {
        let mut counts = vec![0; species_count as usize + 1];
        for cell in &self.cells {
            if let Some(count) = counts.get_mut(cell.load(Ordering::Relaxed) as usize) {
                *count += 1;
            }
        }
        debug_assert_eq!(
            counts.iter().sum::<usize>(),
            self.cells.len(),
            "grid holds a tag above {species_count}"
        );
        counts
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
