use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::error::{PdfNumError, Result};

const LONG_ABOUT: &str = "\
Adds page numbers to PDF files.

Every page gets a small filled rectangle in its bottom-right corner with the
1-based page number centered inside it. Outputs are written next to their
inputs with '-n' inserted before the extension ('somefile.pdf' becomes
'somefile-n.pdf'); files already carrying that suffix are skipped by the
directory-wide modes.

Examples:
  pdfnum document.pdf    annotate one file -> document-n.pdf
  pdfnum -a              annotate every PDF in the current directory
  pdfnum -s              stitch all PDFs into one, then annotate
                         -> stitched_<timestamp>-n.pdf";

/// Add page numbers to PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdfnum")]
#[command(version)]
#[command(about = "Add page numbers to PDF files", long_about = LONG_ABOUT)]
pub struct Cli {
    /// Process all PDF files in the current directory individually
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Stitch all PDF files together, then add page numbers to the result
    #[arg(short = 's', long = "stitch")]
    pub stitch: bool,

    /// Path to a single input PDF file
    ///
    /// Captured as a list so that surplus arguments reach [`Cli::validate`]
    /// instead of being rejected by clap with its own exit code; only a
    /// single file is accepted.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,
}

/// What a parsed invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No arguments at all: print help and exit successfully.
    Help,
    /// `-a`: annotate every PDF in the working directory.
    All,
    /// `-s`: stitch then annotate.
    Stitch,
    /// A single named input file.
    Single(PathBuf),
}

impl Cli {
    /// Rejects invocations that pass more than one mode or file.
    ///
    /// clap already handles `-h` and unknown flags; argument-count and
    /// mutual-exclusion checks live here so the failure is help plus exit
    /// code 1 rather than clap's own exit code.
    pub fn validate(&self) -> Result<()> {
        let selected =
            usize::from(self.all) + usize::from(self.stitch) + usize::from(!self.inputs.is_empty());
        if selected > 1 || self.inputs.len() > 1 {
            let mut cmd = Self::command();
            let _ = cmd.print_help();
            return Err(PdfNumError::usage(
                "expected a single mode: -a, -s, or one FILE",
            ));
        }
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        if self.all {
            Mode::All
        } else if self.stitch {
            Mode::Stitch
        } else if let Some(input) = self.inputs.first() {
            Mode::Single(input.clone())
        } else {
            Mode::Help
        }
    }
}
