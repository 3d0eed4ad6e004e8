use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::Document;

use crate::error::{PdfNumError, Result};

pub struct PdfReader;

impl PdfReader {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Document> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .map_err(|err| PdfNumError::failed_to_load_pdf(path.to_path_buf(), err.to_string()))?;
        Ok(doc)
    }

    pub fn check_path_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let exists = path.try_exists()?;
        if !exists {
            return Err(PdfNumError::file_not_found(path.to_path_buf()));
        }

        if path.is_dir() {
            return Err(PdfNumError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }
}

/// Serializes a PDF document to a file.
pub struct PdfWriter;

impl PdfWriter {
    /// Writes the given [`Document`] to the specified file path, overwriting
    /// any existing file. Uses a buffered writer for efficiency.
    pub fn write<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        let path = path.as_ref();

        let file = std::fs::File::create(path).map_err(|source| {
            PdfNumError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let mut writer = BufWriter::new(file);

        doc.save_to(&mut writer)?;

        writer.flush().map_err(|source| PdfNumError::FailedToWrite {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }
}
