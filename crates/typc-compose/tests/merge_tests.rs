//! Structural checks for post-compile PDF merging.

use pretty_assertions::assert_eq;
use typc_compose::prepend_cover;
use typc_test_utils::{dummy_pdf, page_count, page_texts};

#[test]
fn merged_page_count_is_cover_plus_body() {
    let cover = dummy_pdf(2, "Cover");
    let body = dummy_pdf(3, "Body");

    let merged = prepend_cover(&cover, &body).unwrap();
    assert_eq!(page_count(&merged), 5);
}

#[test]
fn cover_pages_come_first_in_original_order() {
    let cover = dummy_pdf(2, "Cover");
    let body = dummy_pdf(3, "Body");

    let merged = prepend_cover(&cover, &body).unwrap();
    assert_eq!(
        page_texts(&merged),
        vec!["Cover 1", "Cover 2", "Body 1", "Body 2", "Body 3"]
    );
}

#[test]
fn body_content_survives_unmodified() {
    let cover = dummy_pdf(1, "Cover");
    let body = dummy_pdf(2, "Body");

    let merged = prepend_cover(&cover, &body).unwrap();
    let body_pages: Vec<String> = page_texts(&merged)
        .into_iter()
        .skip(1)
        .collect();
    assert_eq!(body_pages, page_texts(&body));
}

#[test]
fn single_page_inputs_merge() {
    let merged = prepend_cover(&dummy_pdf(1, "Cover"), &dummy_pdf(1, "Body")).unwrap();
    assert_eq!(page_texts(&merged), vec!["Cover 1", "Body 1"]);
}

#[test]
fn malformed_cover_is_a_merge_error() {
    let body = dummy_pdf(1, "Body");

    let err = prepend_cover(b"definitely not a pdf", &body).unwrap_err();
    match err {
        typc_compose::Error::MalformedPdf { message } => {
            assert!(message.contains("cover page"), "message: {message}");
        }
        other => panic!("expected MalformedPdf, got {other:?}"),
    }
}

#[test]
fn malformed_body_is_reported_as_body() {
    let cover = dummy_pdf(1, "Cover");

    let err = prepend_cover(&cover, b"truncated").unwrap_err();
    match err {
        typc_compose::Error::MalformedPdf { message } => {
            assert!(message.contains("compiled body"), "message: {message}");
        }
        other => panic!("expected MalformedPdf, got {other:?}"),
    }
}

#[test]
fn merge_is_deterministic() {
    let cover = dummy_pdf(1, "Cover");
    let body = dummy_pdf(2, "Body");

    let first = prepend_cover(&cover, &body).unwrap();
    let second = prepend_cover(&cover, &body).unwrap();
    assert_eq!(first, second);
}
