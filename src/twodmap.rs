// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Scratch storage for the seam searches.

use std::ops::{Index, IndexMut};

/// The cumulative score of the best path ending at a cell, and the
/// column in the row above that path came through.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct CostAndBackPointer {
    pub cost: u64,
    pub parent: usize,
}

impl CostAndBackPointer {
    pub fn new(cost: u64, parent: usize) -> Self {
        CostAndBackPointer { cost, parent }
    }
}

/// An addressable two-dimensional field of working values, laid out
/// row-major.  The searches keep their accumulators here rather than
/// in the pixels, so a search never disturbs the per-pixel metrics.
#[derive(Debug)]
pub(crate) struct TwoDimensionalMap<P: Default + Copy> {
    pub width: usize,
    pub height: usize,
    cells: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    pub fn new(width: usize, height: usize) -> Self {
        TwoDimensionalMap {
            width,
            height,
            cells: vec![P::default(); width * height],
        }
    }

    // Keep the index math in exactly one place.
    fn get_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// One full row of cells.
    pub fn row(&self, y: usize) -> &[P] {
        let start = self.get_index(0, y);
        &self.cells[start..start + self.width]
    }
}

impl<P: Default + Copy> Index<(usize, usize)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (usize, usize)) -> &P {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Default + Copy> IndexMut<(usize, usize)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}
