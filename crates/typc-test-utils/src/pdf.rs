//! Minimal PDF generation and inspection
//!
//! Builds small real PDFs in memory so merge behavior can be asserted
//! structurally: page counts, page order, and per-page text markers.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

/// Build an in-memory PDF with `pages` pages, each carrying the text
/// `"<label> <n>"` so tests can identify pages after a merge.
pub fn dummy_pdf(pages: u32, label: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
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
    for number in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("{label} {number}").into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize dummy pdf");
    bytes
}

/// Number of pages in a serialized PDF.
pub fn page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes)
        .expect("parse pdf")
        .get_pages()
        .len()
}

/// The text markers of each page, in page order.
pub fn page_texts(bytes: &[u8]) -> Vec<String> {
    let mut doc = Document::load_mem(bytes).expect("parse pdf");
    doc.decompress();
    let pages = doc.get_pages();
    pages
        .values()
        .map(|page_id| {
            let content = doc.get_page_content(*page_id).expect("page content");
            extract_literal_strings(&content)
        })
        .collect()
}

/// Pull literal `( ... )` strings out of a decoded content stream.
fn extract_literal_strings(content: &[u8]) -> String {
    let decoded = Content::decode(content).expect("decode content stream");
    let mut texts = Vec::new();
    for op in decoded.operations {
        if op.operator == "Tj" {
            for operand in op.operands {
                if let Object::String(bytes, _) = operand {
                    texts.push(String::from_utf8_lossy(&bytes).into_owned());
                }
            }
        }
    }
    texts.join(" ")
}
