// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam search
//!
//! Both searches are the same dynamic program, run top to bottom: the
//! score of a cell is its own metric plus the best score among the (up
//! to) three cells above it that a seam could have come from.  Cells
//! past either edge are left out of the running rather than padded.
//! What differs is the metric and what "best" means: the bluest seam
//! maximizes saturation, the lowest-energy seam minimizes gradient
//! energy.
//!
//! Ties always go to the leftmost candidate, both when choosing a
//! parent (left, then middle, then right) and when choosing where the
//! seam ends on the bottom row.

use crate::cq;
use crate::error::{Result, SeamError};
use crate::grid::PixelGrid;
use crate::pixel::Pixel;
use crate::seam::Seam;
use crate::twodmap::{CostAndBackPointer, TwoDimensionalMap};
use log::trace;

/// Something that can pick a top-to-bottom seam out of a grid.
pub trait SeamFinder {
    /// Find the best vertical seam in `grid`, or fail with
    /// `SeamError::EmptyGrid` if there is nothing to search.
    fn find_vertical_seam(&self, grid: &PixelGrid) -> Result<Seam>;
}

/// Finds the seam with the greatest total blue saturation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bluest;

/// Finds the seam with the least total gradient energy.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestEnergy;

impl SeamFinder for Bluest {
    fn find_vertical_seam(&self, grid: &PixelGrid) -> Result<Seam> {
        best_vertical_seam(grid, |p| u64::from(p.saturation), |a, b| a > b)
    }
}

impl SeamFinder for LowestEnergy {
    fn find_vertical_seam(&self, grid: &PixelGrid) -> Result<Seam> {
        best_vertical_seam(grid, |p| u64::from(p.energy), |a, b| a < b)
    }
}

pub fn find_bluest_seam(grid: &PixelGrid) -> Result<Seam> {
    Bluest.find_vertical_seam(grid)
}

pub fn find_lowest_energy_seam(grid: &PixelGrid) -> Result<Seam> {
    LowestEnergy.find_vertical_seam(grid)
}

// `beats(a, b)` must be strict: a candidate replaces the current pick
// only when it is strictly better, which is what leaves ties with the
// earlier (more leftward) column.
fn best_vertical_seam<M, B>(grid: &PixelGrid, metric: M, beats: B) -> Result<Seam>
where
    M: Fn(&Pixel) -> u64,
    B: Fn(u64, u64) -> bool,
{
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return Err(SeamError::EmptyGrid { width, height });
    }

    let mut target: TwoDimensionalMap<CostAndBackPointer> = TwoDimensionalMap::new(width, height);
    let maxwidth = width - 1;

    for (y, row) in grid.rows().enumerate() {
        if row.len() != width {
            return Err(SeamError::StructuralInconsistency {
                x: row.len().min(width),
                y,
            });
        }
        for (x, pixel) in row.iter().enumerate() {
            let cell = if y == 0 {
                CostAndBackPointer::new(metric(pixel), x)
            } else {
                let above = target.row(y - 1);
                let parent_x = (cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1))
                    .reduce(|best, candidate| {
                        cq!(beats(above[candidate].cost, above[best].cost), candidate, best)
                    })
                    .unwrap_or(x);
                CostAndBackPointer::new(metric(pixel) + above[parent_x].cost, parent_x)
            };
            target[(x, y)] = cell;
        }
    }

    let bottom = target.row(height - 1);
    let mut seam_col = (0..width)
        .reduce(|best, x| cq!(beats(bottom[x].cost, bottom[best].cost), x, best))
        .unwrap_or(0);
    trace!(
        "best seam ends at column {} with score {}",
        seam_col,
        bottom[seam_col].cost
    );

    // Walk the back pointers from the bottom row up, then flip.
    let columns: Vec<usize> = (0..height)
        .rev()
        .fold(Vec::with_capacity(height), |mut acc, y| {
            acc.push(seam_col);
            seam_col = target[(seam_col, y)].parent;
            acc
        })
        .into_iter()
        .rev()
        .collect();
    Ok(Seam::new(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn blues(width: usize, values: &[u8]) -> PixelGrid {
        let colors = values.iter().map(|&b| Rgb([0, 0, b])).collect::<Vec<_>>();
        PixelGrid::new(width, values.len() / width, colors).unwrap()
    }

    // A small deterministic pseudo-random image.
    fn noise(width: usize, height: usize) -> PixelGrid {
        let mut state: u32 = 0x2545_f491;
        let colors = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let [a, b, c, _] = state.to_be_bytes();
                Rgb([a, b, c])
            })
            .collect();
        PixelGrid::new(width, height, colors).unwrap()
    }

    #[test]
    fn bluest_follows_the_blue_column() {
        #[rustfmt::skip]
        let grid = blues(4, &[
            0, 0, 255, 0,
            0, 0, 255, 0,
            0, 0, 255, 0,
        ]);
        assert_eq!(find_bluest_seam(&grid).unwrap().as_slice(), &[2, 2, 2]);
    }

    #[test]
    fn bluest_accumulates_through_the_rows() {
        #[rustfmt::skip]
        let grid = blues(3, &[
            1, 5, 2,
            3, 0, 9,
            4, 4, 1,
        ]);
        assert_eq!(find_bluest_seam(&grid).unwrap().as_slice(), &[1, 2, 1]);
    }

    #[test]
    fn parent_ties_prefer_the_left() {
        #[rustfmt::skip]
        let grid = blues(3, &[
            5, 0, 5,
            0, 1, 0,
        ]);
        assert_eq!(find_bluest_seam(&grid).unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn uniform_image_yields_the_leftmost_column() {
        let grid = PixelGrid::new(5, 4, vec![Rgb([12, 34, 56]); 20]).unwrap();
        assert_eq!(
            find_lowest_energy_seam(&grid).unwrap().as_slice(),
            &[0, 0, 0, 0]
        );
        assert_eq!(find_bluest_seam(&grid).unwrap().as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn lowest_energy_avoids_an_edge() {
        let (w, k) = (Rgb([255, 255, 255]), Rgb([0, 0, 0]));
        #[rustfmt::skip]
        let grid = PixelGrid::new(4, 3, vec![
            w, k, k, k,
            w, k, k, k,
            w, k, k, k,
        ]).unwrap();
        assert_eq!(find_lowest_energy_seam(&grid).unwrap().as_slice(), &[2, 2, 2]);
    }

    #[test]
    fn seams_are_connected_and_in_bounds() {
        let grid = noise(17, 23);
        for seam in &[
            find_bluest_seam(&grid).unwrap(),
            find_lowest_energy_seam(&grid).unwrap(),
        ] {
            assert!(seam.validate(grid.width(), grid.height()).is_ok());
        }
    }

    #[test]
    fn searching_leaves_pixel_metrics_alone() {
        let grid = noise(9, 6);
        let before: Vec<_> = grid.rows().flatten().cloned().collect();
        let first = find_lowest_energy_seam(&grid).unwrap();
        let second = find_lowest_energy_seam(&grid).unwrap();
        assert_eq!(first, second);
        let after: Vec<_> = grid.rows().flatten().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn single_column_is_its_own_seam() {
        let grid = noise(1, 4);
        assert_eq!(find_bluest_seam(&grid).unwrap().as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn empty_grids_have_no_seam() {
        let narrow = PixelGrid::new(0, 3, vec![]).unwrap();
        assert_eq!(
            find_bluest_seam(&narrow),
            Err(SeamError::EmptyGrid {
                width: 0,
                height: 3
            })
        );
        let flat = PixelGrid::new(3, 0, vec![]).unwrap();
        assert!(matches!(
            find_lowest_energy_seam(&flat),
            Err(SeamError::EmptyGrid { .. })
        ));
    }
}
