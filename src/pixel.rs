// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A single pixel of an editable grid.

use image::Rgb;

/// One pixel, its position in the grid, and the metrics derived from
/// its neighborhood.  `x` is the pixel's *logical* column and moves
/// whenever a seam is removed or reinserted to its left; `y` never
/// changes.
///
/// The derived fields are only meaningful after the grid's last
/// `recompute_metrics()` and before its next structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixel {
    pub y: usize,
    pub x: usize,
    pub color: Rgb<u8>,
    pub brightness: u8,
    pub energy: u32,
    pub saturation: u32,
}

impl Pixel {
    /// A freshly placed pixel.  Its metrics are zero until the owning
    /// grid recomputes them.
    pub fn new(x: usize, y: usize, color: Rgb<u8>) -> Self {
        Pixel {
            y,
            x,
            color,
            brightness: 0,
            energy: 0,
            saturation: 0,
        }
    }
}
