//! Post-compile PDF merging (strategy B)
//!
//! Concatenates a cover PDF and a compiled body PDF into one document,
//! cover pages first, body pages unmodified. Object identifiers from each
//! input are renumbered into a shared space; pages are rewired under a
//! single page tree; everything else is carried over untouched, so the
//! cover keeps its original rendering exactly.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::{Error, Result};

/// Page attributes a page may inherit from ancestors in its page tree.
/// They must be materialised onto each page before the tree is rebuilt.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Merge `cover` in front of `body`, returning the serialized result.
pub fn prepend_cover(cover: &[u8], body: &[u8]) -> Result<Vec<u8>> {
    let cover_doc = load(cover, "cover page")?;
    let body_doc = load(body, "compiled body")?;
    concat_documents(vec![cover_doc, body_doc])
}

fn load(bytes: &[u8], what: &str) -> Result<Document> {
    Document::load_mem(bytes).map_err(|source| Error::MalformedPdf {
        message: format!("cannot parse {what}: {source}"),
    })
}

/// Concatenate `documents` in order into one PDF.
fn concat_documents(documents: Vec<Document>) -> Result<Vec<u8>> {
    let mut merged = Document::with_version("1.7");
    let mut next_id = 1u32;
    let mut ordered_pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut catalog: Option<(ObjectId, Dictionary)> = None;
    let mut pages_id: Option<ObjectId> = None;

    for mut doc in documents {
        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        for page_id in doc.get_pages().into_values() {
            let mut dict = page_dict(&doc, page_id)?;
            materialise_inherited(&doc, &mut dict);
            ordered_pages.push((page_id, dict));
        }

        for (id, object) in &doc.objects {
            match dict_type(object) {
                Some(b"Catalog") => {
                    if catalog.is_none()
                        && let Ok(dict) = object.as_dict()
                    {
                        catalog = Some((*id, dict.clone()));
                    }
                }
                Some(b"Pages") => {
                    pages_id.get_or_insert(*id);
                }
                // Pages are re-inserted below; outlines would dangle.
                Some(b"Page") | Some(b"Outlines") | Some(b"Outline") => {}
                _ => {
                    merged.objects.insert(*id, object.clone());
                }
            }
        }
    }

    let pages_id = pages_id.ok_or_else(|| malformed("no page tree found"))?;
    let (catalog_id, mut catalog) = catalog.ok_or_else(|| malformed("no document catalog found"))?;
    if ordered_pages.is_empty() {
        return Err(malformed("no pages found"));
    }

    let kids: Vec<Object> = ordered_pages
        .iter()
        .map(|(id, _)| Object::Reference(*id))
        .collect();
    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", ordered_pages.len() as i64);
    pages.set("Kids", kids);
    merged.objects.insert(pages_id, Object::Dictionary(pages));

    for (page_id, mut dict) in ordered_pages {
        dict.set("Parent", Object::Reference(pages_id));
        merged.objects.insert(page_id, Object::Dictionary(dict));
    }

    catalog.set("Pages", Object::Reference(pages_id));
    catalog.remove(b"Outlines");
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", Object::Reference(catalog_id));
    merged.max_id = next_id - 1;
    merged.renumber_objects();
    merged.compress();

    let mut bytes = Vec::new();
    merged
        .save_to(&mut bytes)
        .map_err(|source| Error::Merge {
            source: lopdf::Error::IO(source),
        })?;
    tracing::debug!(size = bytes.len(), "merged documents");
    Ok(bytes)
}

fn page_dict(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    doc.get_object(page_id)
        .and_then(Object::as_dict)
        .map(Dictionary::clone)
        .map_err(|source| Error::Merge { source })
}

/// Copy inheritable attributes down from ancestor page-tree nodes onto the
/// page itself, so rewiring the page under a fresh tree loses nothing.
fn materialise_inherited(doc: &Document, page: &mut Dictionary) {
    let mut parent = referenced_parent(page);
    // Depth guard against malformed cyclic parent chains.
    for _ in 0..32 {
        let Some(parent_id) = parent else { break };
        let Ok(ancestor) = doc.get_object(parent_id).and_then(Object::as_dict) else {
            break;
        };
        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Ok(value) = ancestor.get(key)
            {
                page.set(key, value.clone());
            }
        }
        parent = referenced_parent(ancestor);
    }
}

fn referenced_parent(dict: &Dictionary) -> Option<ObjectId> {
    dict.get(b"Parent").ok().and_then(|o| o.as_reference().ok())
}

fn dict_type(object: &Object) -> Option<&[u8]> {
    object
        .as_dict()
        .ok()?
        .get(b"Type")
        .ok()?
        .as_name()
        .ok()
}

fn malformed(message: &str) -> Error {
    Error::MalformedPdf {
        message: message.to_string(),
    }
}
