//! Page annotation: a filled rectangle and a centered page number drawn on
//! every page of a document.
//!
//! PDF content streams use a bottom-left origin with y increasing upward.
//! The label rectangle is anchored to the bottom-right corner of each page,
//! so its position is a function of that page's own width and height; pages
//! of differing sizes each get the label relative to their own corner.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::error::Result;
use crate::io::{PdfReader, PdfWriter};

/// Label rectangle width in points.
const RECT_WIDTH: f32 = 40.0;
/// Label rectangle height in points.
const RECT_HEIGHT: f32 = 20.0;
/// Distance from the right page edge to the left edge of the rectangle.
const RIGHT_INSET: f32 = 70.0;
/// Distance from the bottom page edge to the bottom of the rectangle.
const BOTTOM_INSET: f32 = 30.0;

/// Hot pink fill behind the number, so it stays readable on any background.
const FILL_COLOR: (f32, f32, f32) = (1.0, 0.41, 0.71);

const FONT_SIZE: f32 = 12.0;

/// Resource key under which the label font is registered on each page.
const FONT_KEY: &[u8] = b"Fpn";

/// Helvetica advance width for every ASCII digit, in 1/1000 em (AFM metrics).
const DIGIT_WIDTH: f32 = 556.0;

/// Fallback page size when no MediaBox can be resolved (US Letter).
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Annotates the document at `input` and writes the result to `output`.
///
/// The input file is never mutated; `output` is overwritten if present.
/// Returns the number of pages annotated.
pub fn annotate<P, Q>(input: P, output: Q) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    PdfReader::check_path_exists(input)?;

    let mut doc = PdfReader::read(input)?;
    let pages = annotate_document(&mut doc)?;
    PdfWriter::write(&mut doc, output)?;

    Ok(pages)
}

/// Draws the page-number label on every page of an in-memory document.
///
/// There is no guard against double-processing: annotating an already
/// annotated document stacks a second overlay on top of the first. Callers
/// that need to skip processed files do so by filename convention.
pub fn annotate_document(doc: &mut Document) -> Result<usize> {
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    if pages.is_empty() {
        return Ok(0);
    }

    let font_id = add_label_font(doc);

    for (page_number, page_id) in &pages {
        let (width, height) = page_size(doc, *page_id)?;
        let label = page_number.to_string();

        ensure_page_font(doc, *page_id, font_id)?;
        append_page_content(doc, *page_id, label_operations(width, height, &label))?;
    }

    Ok(pages.len())
}

/// Lower-left corner of the label rectangle for a page of the given size.
///
/// Anchored to the bottom edge, so only the page width shifts it; the
/// height is part of the signature because the rectangle is defined per
/// page size.
pub fn label_rect_origin(width: f32, _height: f32) -> (f32, f32) {
    (width - RIGHT_INSET, BOTTOM_INSET)
}

/// Measured width of a page-number label at the label font size.
///
/// Labels are decimal strings, and every Helvetica digit has the same
/// advance width, so the measurement is exact.
pub fn label_width(label: &str) -> f32 {
    label.chars().count() as f32 * DIGIT_WIDTH / 1000.0 * FONT_SIZE
}

/// Baseline origin for the label text, centered inside the rectangle.
///
/// Horizontal centering is exact via the measured text width. Vertical
/// centering assumes a glyph height equal to the font size rather than the
/// actual rendered metric, matching the tool's historical placement.
pub fn label_text_origin(width: f32, height: f32, label: &str) -> (f32, f32) {
    let (rect_x, rect_y) = label_rect_origin(width, height);
    let x = rect_x + (RECT_WIDTH - label_width(label)) / 2.0;
    let y = rect_y + (RECT_HEIGHT - FONT_SIZE) / 2.0;
    (x, y)
}

/// Content-stream operations for one label: fill the rectangle, then draw
/// the number in black, bracketed by a graphics-state save/restore so the
/// page's existing state is untouched.
fn label_operations(width: f32, height: f32, label: &str) -> Vec<Operation> {
    let (rect_x, rect_y) = label_rect_origin(width, height);
    let (text_x, text_y) = label_text_origin(width, height, label);
    let (r, g, b) = FILL_COLOR;

    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "rg",
            vec![Object::Real(r), Object::Real(g), Object::Real(b)],
        ),
        Operation::new(
            "re",
            vec![
                Object::Real(rect_x),
                Object::Real(rect_y),
                Object::Real(RECT_WIDTH),
                Object::Real(RECT_HEIGHT),
            ],
        ),
        Operation::new("f", vec![]),
        Operation::new(
            "rg",
            vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)],
        ),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_KEY.to_vec()), Object::Real(FONT_SIZE)],
        ),
        Operation::new("Td", vec![Object::Real(text_x), Object::Real(text_y)]),
        Operation::new("Tj", vec![Object::string_literal(label)]),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ]
}

/// Registers the label font in the document. Helvetica is a standard-14
/// font, so no embedding is required.
fn add_label_font(doc: &mut Document) -> ObjectId {
    doc.add_object(Object::Dictionary(dictionary! {
        "Type" => Object::Name(b"Font".to_vec()),
        "Subtype" => Object::Name(b"Type1".to_vec()),
        "BaseFont" => Object::Name(b"Helvetica".to_vec()),
    }))
}

/// Effective page dimensions from the MediaBox, following indirect
/// references and walking up the Pages tree for inherited boxes. Falls back
/// to US Letter when nothing can be resolved.
fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_obj = doc.get_object(page_id)?;
    let media_box = resolve_media_box(doc, page_obj, 10);
    Ok((media_box[2] - media_box[0], media_box[3] - media_box[1]))
}

fn resolve_media_box(doc: &Document, page_obj: &Object, depth: usize) -> [f32; 4] {
    if depth == 0 {
        return DEFAULT_MEDIA_BOX;
    }

    let Ok(dict) = page_obj.as_dict() else {
        return DEFAULT_MEDIA_BOX;
    };

    if let Ok(media_box_obj) = dict.get(b"MediaBox") {
        let arr = match media_box_obj {
            Object::Array(arr) => Some(arr),
            Object::Reference(ref_id) => match doc.get_object(*ref_id) {
                Ok(Object::Array(arr)) => Some(arr),
                _ => None,
            },
            _ => None,
        };

        if let Some(arr) = arr {
            let values: Vec<f32> = arr.iter().filter_map(|o| o.as_float().ok()).collect();
            if values.len() == 4 {
                return [values[0], values[1], values[2], values[3]];
            }
        }
    }

    // MediaBox may be inherited from an ancestor Pages node.
    if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent")
        && let Ok(parent) = doc.get_object(*parent_id)
    {
        return resolve_media_box(doc, parent, depth - 1);
    }

    DEFAULT_MEDIA_BOX
}

/// Makes the label font reachable from a page under [`FONT_KEY`].
///
/// Resources may live inline on the page, behind an indirect reference, or
/// be inherited from an ancestor; the Font subdictionary likewise. A page
/// without its own Resources gets a copy of its effective inherited
/// resources so existing content keeps resolving.
fn ensure_page_font(doc: &mut Document, page_id: ObjectId, font_id: ObjectId) -> Result<()> {
    enum ResourceSlot {
        Object(ObjectId),
        PageInline(Dictionary),
    }

    let slot = {
        let page = doc.get_object(page_id)?.as_dict()?;
        match page.get(b"Resources") {
            Ok(Object::Reference(id)) => ResourceSlot::Object(*id),
            Ok(Object::Dictionary(dict)) => ResourceSlot::PageInline(dict.clone()),
            _ => ResourceSlot::PageInline(
                inherited_resources(doc, page_id).unwrap_or_else(Dictionary::new),
            ),
        }
    };

    match slot {
        ResourceSlot::Object(res_id) => {
            let mut resources = doc.get_object(res_id)?.as_dict()?.clone();
            insert_font_entry(doc, &mut resources, font_id)?;
            *doc.get_object_mut(res_id)? = Object::Dictionary(resources);
        }
        ResourceSlot::PageInline(mut resources) => {
            insert_font_entry(doc, &mut resources, font_id)?;
            doc.get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Resources", Object::Dictionary(resources));
        }
    }

    Ok(())
}

/// Inserts the label font into a resources dictionary, whether its Font
/// entry is inline, an indirect reference, or missing.
fn insert_font_entry(
    doc: &mut Document,
    resources: &mut Dictionary,
    font_id: ObjectId,
) -> Result<()> {
    match resources.get(b"Font") {
        Ok(Object::Reference(fonts_id)) => {
            let fonts_id = *fonts_id;
            let fonts = doc.get_object_mut(fonts_id)?.as_dict_mut()?;
            fonts.set(FONT_KEY, Object::Reference(font_id));
        }
        Ok(Object::Dictionary(fonts)) => {
            let mut fonts = fonts.clone();
            fonts.set(FONT_KEY, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }
        _ => {
            let mut fonts = Dictionary::new();
            fonts.set(FONT_KEY, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }
    }
    Ok(())
}

/// Walks the Parent chain looking for inherited Resources.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..10 {
        let Ok(Object::Reference(parent_id)) = current.get(b"Parent") else {
            return None;
        };
        let parent = doc.get_object(*parent_id).ok()?.as_dict().ok()?;
        match parent.get(b"Resources") {
            Ok(Object::Dictionary(dict)) => return Some(dict.clone()),
            Ok(Object::Reference(id)) => {
                return doc.get_object(*id).ok()?.as_dict().ok().cloned();
            }
            _ => current = parent,
        }
    }
    None
}

/// Appends a new content stream to a page, preserving whatever content the
/// page already has.
fn append_page_content(
    doc: &mut Document,
    page_id: ObjectId,
    operations: Vec<Operation>,
) -> Result<()> {
    let content = Content { operations };
    let stream = Stream::new(Dictionary::new(), content.encode()?);
    let stream_id = doc.add_object(Object::Stream(stream));

    let existing = doc
        .get_object(page_id)?
        .as_dict()?
        .get(b"Contents")
        .ok()
        .cloned();

    let new_contents = match existing {
        Some(Object::Reference(id)) => Object::Array(vec![
            Object::Reference(id),
            Object::Reference(stream_id),
        ]),
        Some(Object::Array(mut refs)) => {
            refs.push(Object::Reference(stream_id));
            Object::Array(refs)
        }
        // An inline stream is promoted to its own object so both streams
        // can be referenced from an array.
        Some(inline @ Object::Stream(_)) => {
            let moved_id = doc.add_object(inline);
            Object::Array(vec![
                Object::Reference(moved_id),
                Object::Reference(stream_id),
            ])
        }
        _ => Object::Reference(stream_id),
    };

    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", new_contents);

    Ok(())
}
