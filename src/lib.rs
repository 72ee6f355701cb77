// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam editing
//!
//! Find the bluest or the lowest-energy top-to-bottom seam of an
//! image, remove it one column at a time, and put it back again.

extern crate image;

mod ternary;

pub mod error;
pub use error::{Result, SeamError};

pub mod pixel;
pub use pixel::Pixel;

pub mod seam;
pub use seam::{RemovedSeam, Seam};

mod twodmap;

pub mod metrics;

pub mod grid;
pub use grid::PixelGrid;

pub mod seamfinder;
pub use seamfinder::{find_bluest_seam, find_lowest_energy_seam, Bluest, LowestEnergy, SeamFinder};

pub mod editor;
pub use editor::{EditorConfig, SeamEditor};
