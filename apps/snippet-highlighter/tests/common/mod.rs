//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Phrase placed on page 5 of [`ten_page_document`]
pub const PHRASE: &str = "the quarterly report shows strong growth in all regions today";
/// Second line of page 5
pub const SECOND_LINE: &str = "costs remained stable throughout the year";

/// Write a PDF with one Helvetica text line per `\n`-separated line of each page
pub fn write_text_pdf(path: &Path, pages: &[String]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for text in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![16.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
        ];
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                operations.push(Operation::new("T*", vec![]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    doc.save(path).unwrap();
}

/// Ten pages of filler with [`PHRASE`] and [`SECOND_LINE`] on page 5 (0-based)
pub fn ten_page_document(path: &Path) {
    let pages: Vec<String> = (0..10)
        .map(|i| {
            if i == 5 {
                format!("{PHRASE}\n{SECOND_LINE}")
            } else {
                format!("page {i} lists the opening hours of the library\nand the rules for borrowing books")
            }
        })
        .collect();
    write_text_pdf(path, &pages);
}

/// `[llx, lly, urx, ury]` of every highlight annotation on a 0-based page
pub fn highlight_rects(path: &Path, page: usize) -> Vec<[f32; 4]> {
    let doc = Document::load(path).unwrap();
    let page_id = doc.get_pages()[&(page as u32 + 1)];
    let page_dict = doc.get_dictionary(page_id).unwrap();

    let Ok(annots) = page_dict.get(b"Annots") else {
        return Vec::new();
    };
    let annots = match annots {
        Object::Reference(id) => doc.get_object(*id).unwrap(),
        other => other,
    };

    annots
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|annot| {
            let dict = doc.get_dictionary(annot.as_reference().ok()?).ok()?;
            if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Highlight" {
                return None;
            }
            let values: Vec<f32> = dict
                .get(b"Rect")
                .ok()?
                .as_array()
                .ok()?
                .iter()
                .filter_map(|v| match v {
                    Object::Real(f) => Some(*f),
                    Object::Integer(i) => Some(*i as f32),
                    _ => None,
                })
                .collect();
            values.try_into().ok()
        })
        .collect()
}
