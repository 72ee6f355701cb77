// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-pixel metrics
//!
//! Brightness is the rounded mean of the three channels.  Energy is a
//! Sobel gradient magnitude over the 3×3 brightness neighborhood, with
//! the center pixel standing in for any neighbor that falls off the
//! edge of the grid (no wraparound).  Saturation is simply the blue
//! channel; it is what the "bluest seam" search maximizes.

use crate::grid::PixelGrid;
use crate::pixel::Pixel;
use image::Rgb;

/// round((R + G + B) / 3)
#[inline]
pub fn brightness(color: &Rgb<u8>) -> u8 {
    let [r, g, b] = color.0;
    let sum = u16::from(r) + u16::from(g) + u16::from(b);
    // (sum + 1) / 3 rounds thirds to the nearest integer; the maximum
    // is (765 + 1) / 3 = 255.
    ((sum + 1) / 3) as u8
}

/// The blue channel, unmodified.
#[inline]
pub fn saturation(color: &Rgb<u8>) -> u32 {
    u32::from(color.0[2])
}

// The neighborhood, in raster order around the center E:
//
//     A B C
//     D E F
//     G H I
//
//   horiz = (A + 2D + G) - (C + 2F + I)
//    vert = (A + 2B + C) - (G + 2H + I)
//  energy = ⌊√(horiz² + vert²)⌋
//
// Every term is a brightness.  This reads the brightness fields of the
// neighbors, so the grid's brightness pass must have run first.

/// Gradient energy of `pixel`, which must belong to `grid`.
pub fn energy(grid: &PixelGrid, pixel: &Pixel) -> u32 {
    let center = i32::from(pixel.brightness);
    let br = |dx: isize, dy: isize| {
        grid.neighbor(pixel, dx, dy)
            .map_or(center, |p| i32::from(p.brightness))
    };

    let (a, b, c) = (br(-1, -1), br(0, -1), br(1, -1));
    let (d, f) = (br(-1, 0), br(1, 0));
    let (g, h, i) = (br(-1, 1), br(0, 1), br(1, 1));

    let horiz = (a + 2 * d + g) - (c + 2 * f + i);
    let vert = (a + 2 * b + c) - (g + 2 * h + i);
    f64::from(horiz * horiz + vert * vert).sqrt().floor() as u32
}
