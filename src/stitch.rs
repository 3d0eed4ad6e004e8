//! Stitching: concatenating the pages of several documents into one.
//!
//! The first document becomes the base; every subsequent document is
//! renumbered past the running `max_id`, its objects merged wholesale, and
//! its page references appended to the base page tree. Pages keep their
//! original dimensions, so a stitched document may have mixed page sizes.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId};

use crate::error::{PdfNumError, Result};
use crate::io::{PdfReader, PdfWriter};

/// Concatenates the pages of the given files, in the order provided, into a
/// single document.
pub fn concat_documents(paths: &[PathBuf]) -> Result<Document> {
    let Some((first, rest)) = paths.split_first() else {
        return Err(PdfNumError::NoFilesToStitch);
    };

    let mut merged = PdfReader::read(first)?;
    let mut max_id = merged.max_id;

    for path in rest {
        let mut doc = PdfReader::read(path)?;

        // Avoid object id collisions by renumbering the incoming document.
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let page_count = page_ids.len();

        merged.objects.extend(doc.objects);
        append_pages_to_page_tree(&mut merged, page_ids, page_count)?;
    }

    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

/// Appends the given page references to the merged document's main Pages
/// dictionary, extending `Kids` and patching `Count`.
fn append_pages_to_page_tree(
    merged: &mut Document,
    page_ids: Vec<ObjectId>,
    page_count: usize,
) -> Result<()> {
    let pages_id = merged.catalog_mut()?.get(b"Pages")?.as_reference()?;
    let pages_dict = merged.get_object_mut(pages_id)?.as_dict_mut()?;

    let kids_array = pages_dict.get_mut(b"Kids")?.as_array_mut()?;
    for id in page_ids {
        kids_array.push(Object::Reference(id));
    }

    let current_count = pages_dict.get(b"Count")?.as_i64()?;
    pages_dict.set(b"Count", Object::Integer(current_count + page_count as i64));

    Ok(())
}

/// The intermediate stitched file, removed on every exit path.
///
/// Saving the concatenation before annotating mirrors the tool's historical
/// flow; the guard ensures a failure between save and annotation cannot
/// leave an orphaned `stitched_<ts>.pdf` behind.
pub struct TempPdf {
    path: PathBuf,
}

impl TempPdf {
    /// Saves `doc` to `path` and takes ownership of the file's lifetime.
    pub fn save(doc: &mut Document, path: &Path) -> Result<Self> {
        PdfWriter::write(doc, path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempPdf {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
