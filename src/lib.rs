//! pdfnum - Add page numbers to PDF files.
//!
//! Annotates every page of a PDF with its 1-based page number, drawn over a
//! small filled rectangle in the bottom-right corner. Supports annotating a
//! single file, every PDF in the working directory, or stitching all of them
//! into one document first. PDF parsing and serialization are handled by
//! `lopdf`; this crate owns annotation geometry, page concatenation, file
//! discovery, and the CLI.

pub mod annotate;
mod cli;
mod error;
pub use error::*;
pub mod io;
pub mod ops;
pub mod stitch;
pub mod walker;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Mode};

/// Parses the command line and runs the requested mode.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    match cli.mode() {
        Mode::Help => {
            let mut cmd = Cli::command();
            cmd.print_long_help()?;
            Ok(())
        }
        Mode::All => ops::process_all(&std::env::current_dir()?),
        Mode::Stitch => ops::stitch_and_process(&std::env::current_dir()?),
        Mode::Single(input) => {
            ops::annotate_file(&input)?;
            Ok(())
        }
    }
}
