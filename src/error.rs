// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the seam engine.
//!
//! None of these leave a grid half-edited: every structural operation
//! validates its input completely before the first pixel moves.

use failure::Fail;
use std::fmt;

/// Everything that can go wrong while searching or editing a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeamError {
    /// A seam search was asked of a grid with no pixels.
    EmptyGrid { width: usize, height: usize },

    /// A seam was malformed or stale relative to the grid it was
    /// applied to.  Derive a fresh one and try again.
    InvalidSeam(String),

    /// `reinsert` was called with nothing left to restore.
    NoPendingSeam,

    /// A pixel's logical column no longer matches its position in its
    /// row.  Edits that go through the editor never produce this.
    StructuralInconsistency { x: usize, y: usize },

    /// The color buffer handed to a grid constructor does not hold
    /// exactly width × height entries.
    DimensionMismatch { expected: usize, actual: usize },

    /// A source image channel could not be represented as an 8-bit value.
    ChannelOutOfRange,
}

impl fmt::Display for SeamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeamError::EmptyGrid { width, height } => {
                write!(f, "cannot find a seam in an empty {}x{} grid", width, height)
            }
            SeamError::InvalidSeam(reason) => write!(f, "invalid seam: {}", reason),
            SeamError::NoPendingSeam => write!(f, "no removed seam to reinsert"),
            SeamError::StructuralInconsistency { x, y } => write!(
                f,
                "grid structure is inconsistent at column {}, row {}",
                x, y
            ),
            SeamError::DimensionMismatch { expected, actual } => write!(
                f,
                "expected {} pixels but {} were supplied",
                expected, actual
            ),
            SeamError::ChannelOutOfRange => {
                write!(f, "image channel value does not fit in 8 bits")
            }
        }
    }
}

impl Fail for SeamError {}

/// Library-wide result alias.
pub type Result<T> = std::result::Result<T, SeamError>;
