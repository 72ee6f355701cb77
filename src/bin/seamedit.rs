// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_parser, Arg, Command};
use image::Rgb;
use log::{debug, info};
use seamedit::{EditorConfig, PixelGrid, SeamEditor};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

const MENU: &str = "Edit image:
b: Find bluest seam
e: Find lowest energy seam
d: Delete highlighted seam
u: Undo last seam deletion
q: Quit";

struct Session {
    editor: SeamEditor,
    snapshots: Option<PathBuf>,
    exported: usize,
}

impl Session {
    // Numbered exports after every visible change, when asked for.
    fn snapshot(&mut self) -> Result<(), failure::Error> {
        if let Some(dir) = &self.snapshots {
            let path = dir.join(format!("tempIMG_{}.png", self.exported));
            debug!("writing snapshot {}", path.display());
            self.editor.to_image().save(&path)?;
            self.exported += 1;
        }
        Ok(())
    }

    // Returns false once the session should end.
    fn command<W: Write>(&mut self, out: &mut W, command: &str) -> Result<bool, failure::Error> {
        if command != "d" {
            self.editor.clear_highlight();
        }

        match command {
            "b" | "e" => {
                let (found, color, name) = if command == "b" {
                    (self.editor.find_bluest_seam(), BLUE, "Bluest")
                } else {
                    (self.editor.find_lowest_energy_seam(), RED, "Lowest energy")
                };
                match found.and_then(|seam| self.editor.highlight(&seam, color).map(|_| seam)) {
                    Ok(seam) => {
                        self.snapshot()?;
                        writeln!(out, "{} seam: {:?}", name, seam.as_slice())?;
                        writeln!(out, "{} seam found. Press 'd' to delete the seam.", name)?;
                    }
                    Err(err) => writeln!(out, "Error: {}", err)?,
                }
            }
            "d" => match self.editor.highlighted().cloned() {
                Some(seam) => match self.editor.remove(&seam) {
                    Ok(()) => {
                        self.snapshot()?;
                        writeln!(out, "Seam deleted.")?;
                    }
                    Err(err) => writeln!(out, "Error: {}", err)?,
                },
                None => writeln!(
                    out,
                    "No seam highlighted. Please highlight a seam before deleting."
                )?,
            },
            "u" => match self.editor.reinsert() {
                Ok(()) => {
                    self.snapshot()?;
                    writeln!(out, "Seam restored.")?;
                }
                Err(seamedit::SeamError::NoPendingSeam) => writeln!(
                    out,
                    "No seam to undo. Please delete a seam before undoing."
                )?,
                Err(err) => writeln!(out, "Error: {}", err)?,
            },
            "q" => return Ok(false),
            _ => writeln!(out, "Invalid command. Please enter a valid command.")?,
        }
        Ok(true)
    }
}

fn run() -> Result<(), failure::Error> {
    let matches = Command::new("seamedit")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Interactive seam removal and reinsertion")
        .arg(
            Arg::new("image")
                .help("The image to edit")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the edited image on quit")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .default_value("newImg.png"),
        )
        .arg(
            Arg::new("snapshots")
                .help("Write a numbered snapshot into DIR after every edit")
                .long("snapshots")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("undo-depth")
                .help("How many seam deletions can be undone")
                .long("undo-depth")
                .value_parser(value_parser!(usize))
                .default_value("1"),
        )
        .get_matches();

    let input = matches
        .get_one::<PathBuf>("image")
        .ok_or_else(|| failure::err_msg("no image given"))?;
    let output = matches
        .get_one::<PathBuf>("output")
        .ok_or_else(|| failure::err_msg("no output path"))?;
    let config = EditorConfig {
        undo_depth: *matches
            .get_one::<usize>("undo-depth")
            .ok_or_else(|| failure::err_msg("no undo depth"))?,
    };

    let image = image::open(input)?.to_rgb8();
    let grid = PixelGrid::from_image(&image)?;
    info!("loaded {}", input.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Width: {} Height: {}", grid.width(), grid.height())?;

    let mut session = Session {
        editor: SeamEditor::with_config(grid, config),
        snapshots: matches.get_one::<PathBuf>("snapshots").cloned(),
        exported: 0,
    };

    writeln!(out, "{}", MENU)?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if !session.command(&mut out, line.trim())? {
            break;
        }
    }

    session.editor.clear_highlight();
    if session.editor.grid().width() == 0 {
        writeln!(out, "Nothing left of the image; not saving.")?;
        return Ok(());
    }
    session.editor.to_image().save(output)?;
    writeln!(out, "Saved {}", output.display())?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("seamedit: {}", err);
        std::process::exit(1);
    }
}
