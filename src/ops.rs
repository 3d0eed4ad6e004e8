//! Mode-level operations behind the three CLI entry points.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::annotate::annotate;
use crate::error::Result;
use crate::stitch::{TempPdf, concat_documents};
use crate::walker::{discover_pdfs, numbered_output_path};

/// Annotates a single named file, writing `<stem>-n<ext>` next to it.
pub fn annotate_file(input: &Path) -> Result<PathBuf> {
    let output = numbered_output_path(input);
    annotate(input, &output)?;
    println!(
        "Page numbers added. Output file saved as '{}'",
        output.display()
    );
    Ok(output)
}

/// Annotates every PDF in `dir` individually, skipping `*-n.pdf` outputs.
///
/// A failure on one file is reported and does not abort the remaining
/// files; completion is success regardless of per-file failures.
pub fn process_all(dir: &Path) -> Result<()> {
    let inputs = discover_pdfs(dir)?;

    let mut failed = 0usize;
    for input in &inputs {
        match annotate_file(input) {
            Ok(_) => {}
            Err(err) => {
                eprintln!("Skipping {}: {err}", input.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} file(s) could not be processed", inputs.len());
    }

    Ok(())
}

/// Stitches every PDF in `dir` into one document, then annotates it.
///
/// The concatenation is saved to `stitched_<YYYYMMDDHHMMSS>.pdf`, annotated
/// into `stitched_<ts>-n.pdf`, and the intermediate is removed — on failure
/// paths too, via [`TempPdf`].
pub fn stitch_and_process(dir: &Path) -> Result<()> {
    let inputs = discover_pdfs(dir)?;
    if inputs.is_empty() {
        println!("No PDF files to stitch and process.");
        return Ok(());
    }

    let mut stitched = concat_documents(&inputs)?;

    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    let temp_path = dir.join(format!("stitched_{timestamp}.pdf"));
    let output = dir.join(format!("stitched_{timestamp}-n.pdf"));

    let temp = TempPdf::save(&mut stitched, &temp_path)?;
    annotate(temp.path(), &output)?;
    drop(temp);

    println!(
        "Stitched and page-numbered PDF saved as '{}'",
        output.display()
    );
    Ok(())
}
