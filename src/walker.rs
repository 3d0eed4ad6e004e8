use std::path::{Path, PathBuf};

use crate::error::Result;

/// Inserted before the extension of every annotated output, so that batch
/// and stitch runs can recognize and skip files this tool already produced.
pub const OUTPUT_SUFFIX: &str = "-n";

/// Collects the PDF files in `dir` that are candidates for annotation.
///
/// Matches `*.pdf` (flat, no recursion), skips annotated outputs, and sorts
/// lexicographically by path so batch and stitch order is deterministic
/// across platforms rather than whatever the filesystem enumeration yields.
pub fn discover_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let pattern = dir.as_ref().join("*.pdf");
    let pattern = pattern.to_string_lossy().into_owned();

    let mut resolved_paths = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if is_annotated_output(&path) {
            continue;
        }
        resolved_paths.push(path);
    }

    resolved_paths.sort();
    Ok(resolved_paths)
}

/// Whether `path` follows the reserved output naming convention (`*-n.pdf`).
pub fn is_annotated_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(&format!("{OUTPUT_SUFFIX}.pdf")))
}

/// Derives the annotated output path for an input: `name.pdf` → `name-n.pdf`.
///
/// The extension is preserved as given, so `report.PDF` becomes
/// `report-n.PDF`. An input without an extension gets the bare suffix.
pub fn numbered_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let file_name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{ext}"),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    };
    input.with_file_name(file_name)
}
