//! Overlay-precedence contract for the workspace builder.
//!
//! The precedence ladder, highest to lowest: content dir's reserved file,
//! content_file argument, content dir's other files, source files, template
//! baseline. These tests pin the ladder end to end.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

use typc_workspace::{CONTENT_FILE, StageRequest, stage};

fn read(ws: &typc_workspace::StagedWorkspace, name: &str) -> String {
    fs::read_to_string(ws.join(name)).unwrap()
}

#[test]
fn content_file_beats_source_reserved_file() {
    let source = TempDir::new().unwrap();
    source.child("main.typ").write_str("entry").unwrap();
    source.child(CONTENT_FILE).write_str("source version").unwrap();
    let overlay = TempDir::new().unwrap();
    overlay.child("body.typ").write_str("argument version").unwrap();

    let ws = stage(&StageRequest {
        content_file: Some(&overlay.path().join("body.typ")),
        ..StageRequest::new(source.path())
    })
    .unwrap();

    assert_eq!(read(&ws, CONTENT_FILE), "argument version");
}

#[test]
fn content_dir_reserved_file_beats_everything() {
    let source = TempDir::new().unwrap();
    source.child("main.typ").write_str("entry").unwrap();
    source.child(CONTENT_FILE).write_str("source version").unwrap();

    let content_dir = TempDir::new().unwrap();
    content_dir
        .child(CONTENT_FILE)
        .write_str("content dir version")
        .unwrap();
    content_dir.child("figure.svg").write_str("<svg/>").unwrap();

    let file_arg = TempDir::new().unwrap();
    file_arg.child("body.typ").write_str("argument version").unwrap();

    let ws = stage(&StageRequest {
        content_file: Some(&file_arg.path().join("body.typ")),
        content_dir: Some(content_dir.path()),
        ..StageRequest::new(source.path())
    })
    .unwrap();

    assert_eq!(read(&ws, CONTENT_FILE), "content dir version");
    assert!(ws.join("figure.svg").is_file());
}

#[test]
fn content_dir_assets_beat_source_assets() {
    let source = TempDir::new().unwrap();
    source.child("main.typ").write_str("entry").unwrap();
    source.child("figure.svg").write_str("old figure").unwrap();

    let content_dir = TempDir::new().unwrap();
    content_dir.child("figure.svg").write_str("new figure").unwrap();

    let ws = stage(&StageRequest {
        content_dir: Some(content_dir.path()),
        ..StageRequest::new(source.path())
    })
    .unwrap();

    assert_eq!(read(&ws, "figure.svg"), "new figure");
}

#[test]
fn overlays_do_not_touch_their_origins() {
    let source = TempDir::new().unwrap();
    source.child("main.typ").write_str("entry").unwrap();
    let content_dir = TempDir::new().unwrap();
    content_dir.child(CONTENT_FILE).write_str("body").unwrap();

    stage(&StageRequest {
        content_dir: Some(content_dir.path()),
        ..StageRequest::new(source.path())
    })
    .unwrap();

    source.child("main.typ").assert(predicate::str::diff("entry"));
    content_dir
        .child(CONTENT_FILE)
        .assert(predicate::str::diff("body"));
}

#[test]
fn typod_overlay_path_is_rejected() {
    let source = TempDir::new().unwrap();
    source.child("main.typ").write_str("entry").unwrap();
    let missing = source.path().join("not-there.typ");

    let err = stage(&StageRequest {
        content_file: Some(&missing),
        ..StageRequest::new(source.path())
    })
    .unwrap_err();

    assert!(matches!(err, typc_workspace::Error::OverlayNotFound { .. }));
    assert!(err.to_string().contains("not-there.typ"));
}
