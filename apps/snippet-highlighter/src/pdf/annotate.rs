//! Highlight annotations on the lopdf object model
//!
//! MuPDF reports rectangles with a top-left origin relative to the visible
//! page. Annotations live in PDF user space, bottom-left origin, offset by
//! the page's effective CropBox (or MediaBox). Page rotation is not applied.

use lopdf::{dictionary, Document, Object, ObjectId};

use super::Rect;
use crate::highlight::{HighlightError, Result};

/// US Letter, used when a page tree carries no box at all
const DEFAULT_PAGE_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Bound on `/Parent` hops, guards against cyclic page trees
const MAX_TREE_DEPTH: usize = 64;

/// Highlight colour (yellow), DeviceRGB
const HIGHLIGHT_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

/// Annotation flag: print the annotation with the page
const FLAG_PRINT: i64 = 4;

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) => Some(*f),
        _ => None,
    }
}

/// Look up `key` on the page or the nearest ancestor in the page tree
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Result<Option<&'a Object>> {
    let mut current = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current)?;
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

fn parse_box(doc: &Document, obj: &Object) -> Result<[f32; 4]> {
    let values = resolve(doc, obj)?.as_array()?;
    if values.len() != 4 {
        return Err(HighlightError::Pdf(format!(
            "page box has {} entries, expected 4",
            values.len()
        )));
    }

    let mut out = [0.0; 4];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = number(resolve(doc, value)?)
            .ok_or_else(|| HighlightError::Pdf(format!("non-numeric page box entry: {value:?}")))?;
    }

    // Normalize so [x0 y0] is the lower-left corner
    Ok([
        out[0].min(out[2]),
        out[1].min(out[3]),
        out[0].max(out[2]),
        out[1].max(out[3]),
    ])
}

/// Effective visible box of a page: CropBox, else MediaBox, else US Letter
pub(crate) fn page_box(doc: &Document, page_id: ObjectId) -> Result<[f32; 4]> {
    for key in [b"CropBox".as_slice(), b"MediaBox".as_slice()] {
        if let Some(obj) = inherited(doc, page_id, key)? {
            return parse_box(doc, obj);
        }
    }
    Ok(DEFAULT_PAGE_BOX)
}

/// Convert a page-space rectangle to PDF user space `[llx lly urx ury]`
pub(crate) fn to_user_space(rect: &Rect, page_box: [f32; 4]) -> [f32; 4] {
    let [x0, _, _, y1] = page_box;
    [
        x0 + rect.x,
        y1 - rect.bottom(),
        x0 + rect.right(),
        y1 - rect.y,
    ]
}

/// Create a `/Highlight` annotation for `rect` and attach it to the page
pub(crate) fn add_highlight_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    rect: &Rect,
) -> Result<ObjectId> {
    let [llx, lly, urx, ury] = to_user_space(rect, page_box(doc, page_id)?);
    let reals = |values: &[f32]| values.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>();

    let annot = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Highlight",
        "Rect" => reals(&[llx, lly, urx, ury]),
        // UL, UR, LL, LR
        "QuadPoints" => reals(&[llx, ury, urx, ury, llx, lly, urx, lly]),
        "C" => reals(&HIGHLIGHT_COLOR),
        "F" => Object::Integer(FLAG_PRINT),
        "P" => page_id,
    };
    let annot_id = doc.add_object(annot);
    attach_annotation(doc, page_id, annot_id)?;

    Ok(annot_id)
}

/// Append `annot_id` to the page's `/Annots`, inline or referenced
fn attach_annotation(doc: &mut Document, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
    let referenced = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    if let Some(array_id) = referenced {
        doc.get_object_mut(array_id)?
            .as_array_mut()?
            .push(Object::Reference(annot_id));
        return Ok(());
    }

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    match page.get_mut(b"Annots") {
        Ok(Object::Array(annots)) => annots.push(Object::Reference(annot_id)),
        _ => page.set("Annots", vec![Object::Reference(annot_id)]),
    }
    Ok(())
}

/// Number of `/Highlight` annotations on a page
pub(crate) fn count_highlights(doc: &Document, page_id: ObjectId) -> Result<usize> {
    let page = doc.get_dictionary(page_id)?;
    let Ok(annots) = page.get(b"Annots") else {
        return Ok(0);
    };

    let mut count = 0;
    for annot in resolve(doc, annots)?.as_array()? {
        let dict = resolve(doc, annot)?.as_dict()?;
        if dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Highlight".as_slice()) {
            count += 1;
        }
    }
    Ok(count)
}
