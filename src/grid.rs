//! Toroidal grid storage: food cells and critter occupancy.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::critter::CritterId;
use crate::error::WorldError;

/// Dimensions of a toroidal grid.
///
/// Callers may pass unnormalized coordinates (e.g. `x - 1` at column 0);
/// every accessor reduces modulo the dimensions, so no coordinate is ever
/// out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torus {
    pub width: usize,
    pub height: usize,
}

impl Torus {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Reduce a possibly-negative coordinate pair onto the grid.
    #[inline]
    pub fn normalize(&self, x: i64, y: i64) -> (usize, usize) {
        (
            x.rem_euclid(self.width as i64) as usize,
            y.rem_euclid(self.height as i64) as usize,
        )
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// Food map for the world.
///
/// Each cell either holds one unit of food or none. Food is seeded once at
/// world creation and never regenerated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodGrid {
    torus: Torus,
    cells: Vec<Vec<bool>>,
}

impl FoodGrid {
    /// Create an empty food grid.
    pub fn new(torus: Torus) -> Self {
        Self {
            torus,
            cells: vec![vec![false; torus.width]; torus.height],
        }
    }

    /// Seed each cell with `probability` chance of holding food.
    pub fn seed(&mut self, probability: f64, rng: &mut impl Rng) {
        for row in &mut self.cells {
            for cell in row {
                if rng.gen::<f64>() < probability {
                    *cell = true;
                }
            }
        }
    }

    /// Whether there is food at the given (unnormalized) location.
    #[inline]
    pub fn has(&self, x: i64, y: i64) -> bool {
        let (x, y) = self.torus.normalize(x, y);
        self.cells[y][x]
    }

    /// Remove the food unit at the given location.
    ///
    /// Feeding where no food exists is a caller bug; callers must check
    /// [`FoodGrid::has`] first.
    pub fn take(&mut self, x: i64, y: i64) -> Result<(), WorldError> {
        let (x, y) = self.torus.normalize(x, y);
        if !self.cells[y][x] {
            return Err(WorldError::NoFoodHere { x, y });
        }
        self.cells[y][x] = false;
        Ok(())
    }

    /// Total food units left in the world.
    pub fn remaining(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c).count())
            .sum()
    }
}

/// Critter placement index: at most one critter per cell, plus the set of
/// open cells maintained as the exact complement of the occupied cells.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    torus: Torus,
    cells: Vec<Vec<Option<CritterId>>>,
    open: Vec<(usize, usize)>,
    open_slots: HashMap<(usize, usize), usize>,
}

impl OccupancyGrid {
    /// Create an occupancy grid with every cell open.
    pub fn new(torus: Torus) -> Self {
        let mut open = Vec::with_capacity(torus.cell_count());
        let mut open_slots = HashMap::with_capacity(torus.cell_count());
        for y in 0..torus.height {
            for x in 0..torus.width {
                open_slots.insert((x, y), open.len());
                open.push((x, y));
            }
        }
        Self {
            torus,
            cells: vec![vec![None; torus.width]; torus.height],
            open,
            open_slots,
        }
    }

    /// The critter occupying the given (unnormalized) location, if any.
    #[inline]
    pub fn occupant(&self, x: i64, y: i64) -> Option<CritterId> {
        let (x, y) = self.torus.normalize(x, y);
        self.cells[y][x]
    }

    /// Register `id` as the occupant of `(x, y)`.
    ///
    /// The cell must not already hold a critter. A cell reserved through
    /// [`OccupancyGrid::reserve_random`] may be placed into.
    pub fn place(&mut self, id: CritterId, x: usize, y: usize) -> Result<(), WorldError> {
        let (x, y) = self.torus.normalize(x as i64, y as i64);
        if self.cells[y][x].is_some() {
            return Err(WorldError::InvalidPlacement { x, y });
        }
        self.cells[y][x] = Some(id);
        self.claim(x, y);
        Ok(())
    }

    /// Clear the occupant of `(x, y)`, returning the cell to the open set.
    pub fn vacate(&mut self, x: usize, y: usize) -> Option<CritterId> {
        let (x, y) = self.torus.normalize(x as i64, y as i64);
        let previous = self.cells[y][x].take();
        if previous.is_some() {
            self.release(x, y);
        }
        previous
    }

    /// Pick one open cell uniformly at random and reserve it.
    ///
    /// The reserved cell stays out of the open set until placed into.
    pub fn reserve_random(&mut self, rng: &mut impl Rng) -> Result<(usize, usize), WorldError> {
        if self.open.is_empty() {
            return Err(WorldError::WorldFull);
        }
        let idx = rng.gen_range(0..self.open.len());
        let cell = self.open[idx];
        self.claim(cell.0, cell.1);
        Ok(cell)
    }

    /// Number of cells currently in the open set.
    #[inline]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    fn claim(&mut self, x: usize, y: usize) {
        if let Some(idx) = self.open_slots.remove(&(x, y)) {
            self.open.swap_remove(idx);
            if idx < self.open.len() {
                let swapped = self.open[idx];
                self.open_slots.insert(swapped, idx);
            }
        }
    }

    fn release(&mut self, x: usize, y: usize) {
        if !self.open_slots.contains_key(&(x, y)) {
            self.open_slots.insert((x, y), self.open.len());
            self.open.push((x, y));
        }
    }
}
