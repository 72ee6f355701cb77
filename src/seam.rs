// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seams, and the records needed to put one back.

use crate::error::{Result, SeamError};
use image::Rgb;
use itertools::Itertools;
use std::ops::Index;

/// A top-to-bottom path through a grid: one column index per row,
/// index 0 being the top row.  Neighboring entries never differ by
/// more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<usize>);

impl Seam {
    pub fn new(columns: Vec<usize>) -> Self {
        Seam(columns)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Check this seam against a grid of the given dimensions: one
    /// entry per row, every entry a present column, and no step wider
    /// than one column.
    pub fn validate(&self, width: usize, height: usize) -> Result<()> {
        if self.0.len() != height {
            return Err(SeamError::InvalidSeam(format!(
                "seam has {} rows but the grid has {}",
                self.0.len(),
                height
            )));
        }
        if let Some((y, x)) = self.0.iter().enumerate().find(|(_, x)| **x >= width) {
            return Err(SeamError::InvalidSeam(format!(
                "column {} in row {} is outside a grid {} wide",
                x, y, width
            )));
        }
        if let Some((y, (a, b))) = self
            .0
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (a, b))| a.abs_diff(**b) > 1)
        {
            return Err(SeamError::InvalidSeam(format!(
                "seam jumps from column {} to {} between rows {} and {}",
                a,
                b,
                y,
                y + 1
            )));
        }
        Ok(())
    }
}

impl Index<usize> for Seam {
    type Output = usize;

    fn index(&self, row: usize) -> &usize {
        &self.0[row]
    }
}

/// Everything needed to exactly reverse one seam removal: where each
/// row's pixel stood and what color it was.  Holds no pixels, so it
/// stays valid after those pixels are gone from the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedSeam {
    seam: Seam,
    colors: Vec<Rgb<u8>>,
}

impl RemovedSeam {
    pub fn new(seam: Seam, colors: Vec<Rgb<u8>>) -> Self {
        debug_assert_eq!(seam.len(), colors.len());
        RemovedSeam { seam, colors }
    }

    /// (column, color) for every row, top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rgb<u8>)> + '_ {
        self.seam.iter().copied().zip(self.colors.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_diagonal_steps() {
        let seam = Seam::new(vec![0, 1, 2, 1, 1]);
        assert!(seam.validate(3, 5).is_ok());
        assert_eq!(seam[2], 2);
        assert!(!seam.is_empty());
        assert!(Seam::new(vec![]).validate(3, 0).is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        let seam = Seam::new(vec![0, 0]);
        match seam.validate(4, 3) {
            Err(SeamError::InvalidSeam(msg)) => assert!(msg.contains("2 rows")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_out_of_range_column() {
        let seam = Seam::new(vec![1, 2, 3]);
        assert!(matches!(seam.validate(3, 3), Err(SeamError::InvalidSeam(_))));
    }

    #[test]
    fn rejects_wide_step() {
        let seam = Seam::new(vec![0, 2, 2]);
        match seam.validate(3, 3) {
            Err(SeamError::InvalidSeam(msg)) => assert!(msg.contains("from column 0 to 2")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn record_pairs_columns_with_colors() {
        let record = RemovedSeam::new(
            Seam::new(vec![2, 1]),
            vec![Rgb([1, 2, 3]), Rgb([4, 5, 6])],
        );
        assert!(!record.is_empty());
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![(2, Rgb([1, 2, 3])), (1, Rgb([4, 5, 6]))]);
    }
}
