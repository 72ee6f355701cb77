// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The editable pixel grid
//!
//! Rows are plain vectors addressed by current position, and every
//! pixel carries its logical column as an explicit field.  Removing or
//! reinserting a seam splices one pixel out of (or into) each row and
//! renumbers everything to its right, so the invariant
//! `rows[y][x].x == x` holds between edits and neighbor lookups are
//! constant time.  All rows share one width, which every seam edit
//! changes by exactly one.

use crate::error::{Result, SeamError};
use crate::metrics;
use crate::pixel::Pixel;
use crate::seam::{RemovedSeam, Seam};
use image::{GenericImageView, ImageBuffer, Pixel as ImagePixel, Primitive, Rgb, RgbImage};
use itertools::iproduct;
use log::trace;
use num_traits::NumCast;

/// A rectangular arrangement of pixels that can lose and regain
/// vertical seams.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: usize,
    rows: Vec<Vec<Pixel>>,
}

impl PixelGrid {
    /// Build a grid from row-major colors and compute its metrics.
    pub fn new(width: usize, height: usize, colors: Vec<Rgb<u8>>) -> Result<Self> {
        let expected = width * height;
        if colors.len() != expected {
            return Err(SeamError::DimensionMismatch {
                expected,
                actual: colors.len(),
            });
        }

        let mut rows: Vec<Vec<Pixel>> = (0..height).map(|_| Vec::with_capacity(width)).collect();
        for (i, color) in colors.into_iter().enumerate() {
            let (x, y) = (i % width, i / width);
            rows[y].push(Pixel::new(x, y, color));
        }

        let mut grid = PixelGrid { width, rows };
        grid.recompute_metrics();
        Ok(grid)
    }

    /// Build a grid from anything the `image` crate can view.  Every
    /// channel must fit in a `u8`; convert wider images with
    /// `to_rgb8()` first.
    pub fn from_image<I, P, S>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
        P: ImagePixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        fn channel<S: Primitive>(s: S) -> Result<u8> {
            <u8 as NumCast>::from(s).ok_or(SeamError::ChannelOutOfRange)
        }

        let (width, height) = image.dimensions();
        let colors = iproduct!(0..height, 0..width)
            .map(|(y, x)| {
                let [r, g, b] = image.get_pixel(x, y).to_rgb().0;
                Ok(Rgb([channel(r)?, channel(g)?, channel(b)?]))
            })
            .collect::<Result<Vec<_>>>()?;
        PixelGrid::new(width as usize, height as usize, colors)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&Pixel> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    pub fn row(&self, y: usize) -> Option<&[Pixel]> {
        self.rows.get(y).map(|row| row.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// The pixel at (`dx`, `dy`) relative to `pixel`, or `None` if that
    /// falls outside the grid.  A candidate whose logical column does
    /// not match the requested one is also reported as absent.
    pub fn neighbor(&self, pixel: &Pixel, dx: isize, dy: isize) -> Option<&Pixel> {
        let x = pixel.x.checked_add_signed(dx)?;
        let y = pixel.y.checked_add_signed(dy)?;
        self.pixel(x, y).filter(|p| p.x == x)
    }

    /// Fails with `SeamError::EmptyGrid` if there is no pixel to edit.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.width == 0 || self.height() == 0 {
            return Err(SeamError::EmptyGrid {
                width: self.width,
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Copy the colors under `seam` into an undo record.  The seam is
    /// validated against the current dimensions.
    pub fn capture_seam(&self, seam: &Seam) -> Result<RemovedSeam> {
        seam.validate(self.width, self.height())?;
        let colors = seam
            .iter()
            .enumerate()
            .map(|(y, &x)| self.rows[y][x].color)
            .collect();
        Ok(RemovedSeam::new(seam.clone(), colors))
    }

    /// Splice one pixel per row out of the grid and renumber the pixels
    /// to its right.  Returns the detached pixels, top to bottom.
    ///
    /// Metrics are stale afterwards; call `recompute_metrics()`.
    pub fn remove_seam(&mut self, seam: &Seam) -> Result<Vec<Pixel>> {
        self.ensure_not_empty()?;
        seam.validate(self.width, self.height())?;

        let removed: Vec<Pixel> = self
            .rows
            .iter_mut()
            .zip(seam.iter())
            .map(|(row, &x)| {
                let pixel = row.remove(x);
                row[x..].iter_mut().for_each(|p| p.x -= 1);
                pixel
            })
            .collect();
        self.width -= 1;
        Ok(removed)
    }

    /// Recreate the pixels described by `record` at their recorded
    /// columns, renumbering everything at or to the right of each.
    ///
    /// Metrics are stale afterwards; call `recompute_metrics()`.
    pub fn insert_seam(&mut self, record: &RemovedSeam) -> Result<()> {
        // A grid with no rows has no columns to regain.
        if self.height() == 0 {
            return Err(SeamError::EmptyGrid {
                width: self.width,
                height: 0,
            });
        }
        if record.len() != self.height() {
            return Err(SeamError::InvalidSeam(format!(
                "record has {} rows but the grid has {}",
                record.len(),
                self.height()
            )));
        }
        if let Some((y, (x, _))) = record.iter().enumerate().find(|(_, (x, _))| *x > self.width) {
            return Err(SeamError::InvalidSeam(format!(
                "cannot reinsert at column {} in row {} of a grid {} wide",
                x, y, self.width
            )));
        }

        for (y, (row, (x, color))) in self.rows.iter_mut().zip(record.iter()).enumerate() {
            row[x..].iter_mut().for_each(|p| p.x += 1);
            row.insert(x, Pixel::new(x, y, color));
        }
        self.width += 1;
        Ok(())
    }

    /// Overwrite the colors under `seam`, returning what was there.
    /// Derived metrics are left alone.
    pub fn paint_seam(&mut self, seam: &Seam, color: Rgb<u8>) -> Result<Vec<Rgb<u8>>> {
        seam.validate(self.width, self.height())?;
        Ok(self
            .rows
            .iter_mut()
            .zip(seam.iter())
            .map(|(row, &x)| std::mem::replace(&mut row[x].color, color))
            .collect())
    }

    /// Overwrite a single pixel's color, returning the old one, or
    /// `None` if there is no pixel at (`x`, `y`).
    pub fn paint_pixel(&mut self, x: usize, y: usize, color: Rgb<u8>) -> Option<Rgb<u8>> {
        self.rows
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .map(|p| std::mem::replace(&mut p.color, color))
    }

    /// Recompute brightness everywhere, then energy (which reads the
    /// neighbors' brightness), then saturation.
    pub fn recompute_metrics(&mut self) {
        trace!("recomputing metrics for {}x{}", self.width, self.height());
        for pixel in self.rows.iter_mut().flatten() {
            pixel.brightness = metrics::brightness(&pixel.color);
        }

        let energies: Vec<u32> = iproduct!(0..self.height(), 0..self.width)
            .map(|(y, x)| metrics::energy(self, &self.rows[y][x]))
            .collect();
        for (pixel, energy) in self.rows.iter_mut().flatten().zip(energies) {
            pixel.energy = energy;
        }

        for pixel in self.rows.iter_mut().flatten() {
            pixel.saturation = metrics::saturation(&pixel.color);
        }
    }

    /// Confirm that every row is `width()` long and that every pixel's
    /// coordinates match its position.
    pub fn verify(&self) -> Result<()> {
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != self.width {
                return Err(SeamError::StructuralInconsistency {
                    x: row.len().min(self.width),
                    y,
                });
            }
            if let Some((x, _)) = row
                .iter()
                .enumerate()
                .find(|(x, p)| p.x != *x || p.y != y)
            {
                return Err(SeamError::StructuralInconsistency { x, y });
            }
        }
        Ok(())
    }

    /// Current colors, row-major.
    pub fn snapshot(&self) -> Vec<Rgb<u8>> {
        self.rows.iter().flatten().map(|p| p.color).collect()
    }

    /// Render the current grid as an image.
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width as u32, self.height() as u32, |x, y| {
            self.rows[y as usize][x as usize].color
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Rgb<u8> = Rgb([255, 0, 0]);
    const G: Rgb<u8> = Rgb([0, 255, 0]);
    const B: Rgb<u8> = Rgb([0, 0, 255]);
    const K: Rgb<u8> = Rgb([0, 0, 0]);

    // R G B
    // K R G
    fn sample() -> PixelGrid {
        PixelGrid::new(3, 2, vec![R, G, B, K, R, G]).unwrap()
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert_eq!(
            PixelGrid::new(3, 2, vec![R; 5]).unwrap_err(),
            SeamError::DimensionMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn neighbors_stop_at_the_edges() {
        let grid = sample();
        let corner = grid.pixel(0, 0).unwrap();
        assert!(grid.neighbor(corner, -1, 0).is_none());
        assert!(grid.neighbor(corner, 0, -1).is_none());
        assert_eq!(grid.neighbor(corner, 1, 1).unwrap().color, R);
        let right = grid.pixel(2, 1).unwrap();
        assert!(grid.neighbor(right, 1, 0).is_none());
        assert!(grid.neighbor(right, 0, 1).is_none());
        assert_eq!(grid.neighbor(right, -1, -1).unwrap().color, G);
    }

    #[test]
    fn removal_renumbers_the_right_side() {
        let mut grid = sample();
        let removed = grid.remove_seam(&Seam::new(vec![1, 0])).unwrap();
        assert_eq!(removed.iter().map(|p| p.color).collect::<Vec<_>>(), vec![G, K]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.snapshot(), vec![R, B, R, G]);
        assert!(grid.verify().is_ok());
        assert_eq!(grid.pixel(1, 0).unwrap().x, 1);
    }

    #[test]
    fn removing_the_leftmost_pixel_promotes_its_neighbor() {
        let mut grid = sample();
        grid.remove_seam(&Seam::new(vec![0, 0])).unwrap();
        assert_eq!(grid.row(0).unwrap()[0].color, G);
        assert_eq!(grid.row(1).unwrap()[0].color, R);
        assert!(grid.verify().is_ok());
    }

    #[test]
    fn invalid_removal_leaves_grid_untouched() {
        let mut grid = sample();
        let before = grid.snapshot();
        assert!(grid.remove_seam(&Seam::new(vec![2, 3])).is_err());
        assert!(grid.remove_seam(&Seam::new(vec![0])).is_err());
        assert_eq!(grid.snapshot(), before);
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn insertion_restores_a_removal() {
        let mut grid = sample();
        let before = grid.snapshot();
        let seam = Seam::new(vec![2, 1]);
        let record = grid.capture_seam(&seam).unwrap();
        grid.remove_seam(&seam).unwrap();
        grid.insert_seam(&record).unwrap();
        assert_eq!(grid.snapshot(), before);
        assert_eq!(grid.width(), 3);
        assert!(grid.verify().is_ok());
    }

    #[test]
    fn empty_grids_refuse_structural_edits() {
        let mut flat = PixelGrid::new(3, 0, vec![]).unwrap();
        assert_eq!(
            flat.remove_seam(&Seam::new(vec![])),
            Err(SeamError::EmptyGrid {
                width: 3,
                height: 0
            })
        );
        let record = RemovedSeam::new(Seam::new(vec![]), vec![]);
        assert!(matches!(
            flat.insert_seam(&record),
            Err(SeamError::EmptyGrid { .. })
        ));
        assert_eq!(flat.width(), 3);

        let mut narrow = PixelGrid::new(0, 2, vec![]).unwrap();
        assert!(matches!(
            narrow.remove_seam(&Seam::new(vec![0, 0])),
            Err(SeamError::EmptyGrid { .. })
        ));
        assert_eq!(narrow.width(), 0);
    }

    #[test]
    fn insertion_rejects_columns_past_the_end() {
        let mut grid = sample();
        let record = RemovedSeam::new(Seam::new(vec![4, 3]), vec![R, R]);
        assert!(matches!(
            grid.insert_seam(&record),
            Err(SeamError::InvalidSeam(_))
        ));
        assert_eq!(grid.width(), 3);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut grid = sample();
        let first: Vec<Pixel> = grid.rows().flatten().cloned().collect();
        grid.recompute_metrics();
        let second: Vec<Pixel> = grid.rows().flatten().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn painting_keeps_metrics_until_recompute() {
        let mut grid = sample();
        let seam = Seam::new(vec![0, 1]);
        let saturation = grid.pixel(0, 0).unwrap().saturation;
        let old = grid.paint_seam(&seam, B).unwrap();
        assert_eq!(old, vec![R, R]);
        assert_eq!(grid.pixel(0, 0).unwrap().color, B);
        assert_eq!(grid.pixel(0, 0).unwrap().saturation, saturation);
        grid.recompute_metrics();
        assert_eq!(grid.pixel(0, 0).unwrap().color, B);
        assert_eq!(grid.pixel(0, 0).unwrap().saturation, 255);
    }

    #[test]
    fn verify_catches_desynchronized_columns() {
        let mut grid = sample();
        grid.rows[1][2].x = 7;
        assert_eq!(
            grid.verify(),
            Err(SeamError::StructuralInconsistency { x: 2, y: 1 })
        );
    }

    #[test]
    fn converts_to_and_from_images() {
        let grid = sample();
        let image = grid.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(*image.get_pixel(2, 0), B);
        let again = PixelGrid::from_image(&image).unwrap();
        assert_eq!(again.snapshot(), grid.snapshot());
    }
}
