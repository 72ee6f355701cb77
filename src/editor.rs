// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SeamEditor - seam removal with undo
//!
//! The editor owns a grid and is the only thing that should edit it
//! structurally.  It validates a seam before touching anything,
//! records what it removes so the removal can be reversed exactly,
//! keeps the grid's metrics fresh after every edit, and remembers the
//! true colors under a highlighted seam so the highlight can be taken
//! back.

use crate::error::{Result, SeamError};
use crate::grid::PixelGrid;
use crate::seam::{RemovedSeam, Seam};
use crate::seamfinder::{Bluest, LowestEnergy, SeamFinder};
use image::{Rgb, RgbImage};
use log::{debug, warn};
use std::collections::VecDeque;

/// How the editor behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// How many removals can be undone.  With the default of one, each
    /// removal replaces the previous undo record; zero disables undo.
    pub undo_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig { undo_depth: 1 }
    }
}

#[derive(Debug)]
struct Highlight {
    seam: Seam,
    original: Vec<Rgb<u8>>,
}

/// An editing session over one image.
#[derive(Debug)]
pub struct SeamEditor {
    grid: PixelGrid,
    config: EditorConfig,
    history: VecDeque<RemovedSeam>,
    highlight: Option<Highlight>,
}

impl SeamEditor {
    pub fn new(grid: PixelGrid) -> Self {
        SeamEditor::with_config(grid, EditorConfig::default())
    }

    pub fn with_config(grid: PixelGrid, config: EditorConfig) -> Self {
        SeamEditor {
            grid,
            config,
            history: VecDeque::with_capacity(config.undo_depth),
            highlight: None,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn find_seam<F: SeamFinder>(&self, finder: &F) -> Result<Seam> {
        finder.find_vertical_seam(&self.grid)
    }

    pub fn find_bluest_seam(&self) -> Result<Seam> {
        self.find_seam(&Bluest)
    }

    pub fn find_lowest_energy_seam(&self) -> Result<Seam> {
        self.find_seam(&LowestEnergy)
    }

    /// Paint `seam` in `color` for display.  Metrics are untouched and
    /// no undo record is made.  Any earlier highlight is taken back
    /// first.
    pub fn highlight(&mut self, seam: &Seam, color: Rgb<u8>) -> Result<()> {
        seam.validate(self.grid.width(), self.grid.height())?;
        self.clear_highlight();
        let original = self.grid.paint_seam(seam, color)?;
        self.highlight = Some(Highlight {
            seam: seam.clone(),
            original,
        });
        Ok(())
    }

    /// The currently highlighted seam, if any.
    pub fn highlighted(&self) -> Option<&Seam> {
        self.highlight.as_ref().map(|h| &h.seam)
    }

    /// Put back the colors under the current highlight.  Returns
    /// whether there was anything to restore.
    pub fn clear_highlight(&mut self) -> bool {
        match self.highlight.take() {
            Some(Highlight { seam, original }) => {
                for (y, (&x, color)) in seam.iter().zip(original).enumerate() {
                    // The highlight was validated when painted and no
                    // structural edit happens while one is outstanding.
                    if self.grid.paint_pixel(x, y, color).is_none() {
                        warn!("highlighted pixel ({}, {}) vanished before restore", x, y);
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Remove `seam` from the grid, keeping a record of it for
    /// `reinsert`.  The grid is one column narrower afterwards.
    pub fn remove(&mut self, seam: &Seam) -> Result<()> {
        self.grid.ensure_not_empty()?;
        seam.validate(self.grid.width(), self.grid.height())?;
        self.clear_highlight();

        let record = self.grid.capture_seam(seam)?;
        self.grid.remove_seam(seam)?;
        self.remember(record);
        self.grid.recompute_metrics();
        debug!(
            "removed seam, grid is now {}x{}",
            self.grid.width(),
            self.grid.height()
        );
        self.grid.verify()
    }

    /// Restore the most recently removed seam, with its original colors
    /// at its original columns.
    pub fn reinsert(&mut self) -> Result<()> {
        self.clear_highlight();
        let record = self.history.pop_back().ok_or(SeamError::NoPendingSeam)?;
        if let Err(err) = self.grid.insert_seam(&record) {
            self.history.push_back(record);
            return Err(err);
        }
        self.grid.recompute_metrics();
        debug!(
            "reinserted seam, grid is now {}x{}",
            self.grid.width(),
            self.grid.height()
        );
        self.grid.verify()
    }

    /// How many removals can currently be undone.
    pub fn pending(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> Vec<Rgb<u8>> {
        self.grid.snapshot()
    }

    pub fn to_image(&self) -> RgbImage {
        self.grid.to_image()
    }

    fn remember(&mut self, record: RemovedSeam) {
        if self.config.undo_depth == 0 {
            debug!("undo disabled, discarding removed seam");
            return;
        }
        while self.history.len() >= self.config.undo_depth {
            if self.history.pop_front().is_some() {
                debug!("undo history full, discarding the oldest removed seam");
            }
        }
        self.history.push_back(record);
    }
}
