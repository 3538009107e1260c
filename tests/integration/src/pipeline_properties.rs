//! End-to-end properties of the full stage -> compose -> write pipeline.
//!
//! Exercises the whole flow with a scripted compiler: deterministic output
//! placement, input immutability, overlay precedence as observed through
//! the backend, cover-page page ordering, and cleanup guarantees.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use typc_core::{CompileOptions, CompileService, Error};
use typc_test_utils::{DocDir, FakeCompiler, dummy_pdf, page_count, page_texts};

fn service(compiler: FakeCompiler) -> (CompileService, Arc<FakeCompiler>) {
    let compiler = Arc::new(compiler);
    (CompileService::new(compiler.clone()), compiler)
}

#[tokio::test]
async fn plain_directory_produces_artifact_and_leaves_input_untouched() {
    let doc = DocDir::named("thesis")
        .file("main.typ", "= Body")
        .bin_file("images/fig.png", &[0x89, 0x50]);
    let before = doc.snapshot();

    let (service, _) = service(FakeCompiler::emitting(b"rendered body".to_vec()));
    let output = service
        .compile_directory(doc.path(), &CompileOptions::default())
        .await
        .unwrap();

    assert_eq!(output, doc.expected_output("pdf"));
    assert_eq!(fs::read(&output).unwrap(), b"rendered body");
    assert_eq!(doc.snapshot(), before, "source directory was mutated");
}

#[tokio::test]
async fn entry_resolution_picks_the_suffix_marked_file() {
    let doc = DocDir::named("doc")
        .file("report_main.typ", "#include \"content.typ\"")
        .file("content.typ", "body");

    let (service, compiler) = service(FakeCompiler::emitting(b"pdf".to_vec()));
    service
        .compile_directory(doc.path(), &CompileOptions::default())
        .await
        .unwrap();

    let calls = compiler.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].entry.ends_with("report_main.typ"));
    // The entry lives in the scratch workspace, never in the source tree.
    assert!(!calls[0].entry.starts_with(doc.path()));
}

#[tokio::test]
async fn content_dir_reserved_file_wins_over_content_file_argument() {
    let doc = DocDir::named("doc").file("main.typ", "= Entry");
    let content_dir = DocDir::named("content-dir")
        .file("content.typ", "from dir")
        .file("figure.svg", "<svg/>");
    let file_arg = DocDir::named("file-arg").file("body.typ", "from arg");

    // Capture the staged content.typ by making it the entry: a directory
    // whose only main.typ includes it would hide it, so instead stage and
    // verify through typc-workspace directly.
    let ws = typc_workspace::stage(&typc_workspace::StageRequest {
        content_file: Some(&file_arg.path().join("body.typ")),
        content_dir: Some(content_dir.path()),
        ..typc_workspace::StageRequest::new(doc.path())
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(ws.join("content.typ")).unwrap(),
        "from dir"
    );
    assert!(ws.join("figure.svg").is_file());
}

#[tokio::test]
async fn two_runs_on_unchanged_input_are_byte_identical() {
    let doc = DocDir::named("stable").file("main.typ", "= Stable body");
    let (service, _) = service(FakeCompiler::echoing_entry());

    let first = service
        .compile_directory(doc.path(), &CompileOptions::default())
        .await
        .unwrap();
    let first_bytes = fs::read(&first).unwrap();

    let second = service
        .compile_directory(doc.path(), &CompileOptions::default())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), first_bytes);
}

#[tokio::test]
async fn merged_output_is_cover_pages_then_unmodified_body_pages() {
    let doc = DocDir::named("covered").file("main.typ", "= Body");
    let cover_path = doc.parent().join("titlepage.pdf");
    fs::write(&cover_path, dummy_pdf(2, "Cover")).unwrap();
    let body_pdf = dummy_pdf(3, "Body");

    // Reference run without a cover.
    let (plain_service, _) = service(FakeCompiler::emitting(body_pdf.clone()));
    let plain = plain_service
        .compile_directory(doc.path(), &CompileOptions::default())
        .await
        .unwrap();
    let plain_texts = page_texts(&fs::read(&plain).unwrap());

    // Covered run.
    let (covered_service, _) = service(FakeCompiler::emitting(body_pdf));
    let covered = covered_service
        .compile_directory(
            doc.path(),
            &CompileOptions {
                cover_page: Some(cover_path),
                ..CompileOptions::default()
            },
        )
        .await
        .unwrap();
    let merged = fs::read(&covered).unwrap();

    assert_eq!(page_count(&merged), 2 + 3);
    let merged_texts = page_texts(&merged);
    assert_eq!(merged_texts[..2], ["Cover 1", "Cover 2"]);
    assert_eq!(merged_texts[2..], plain_texts[..]);
}

#[tokio::test]
async fn missing_input_raises_before_any_workspace_exists() {
    let (service, compiler) = service(FakeCompiler::emitting(b"pdf".to_vec()));

    let err = service
        .compile_directory(
            std::path::Path::new("/definitely/not/here"),
            &CompileOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(compiler.calls().is_empty());
}

#[tokio::test]
async fn timeout_cleans_up_and_leaves_no_partial_artifact() {
    let doc = DocDir::named("slow").file("main.typ", "= Slow");
    let (service, _) = service(FakeCompiler::timing_out(Duration::from_secs(60)));

    let err = service
        .compile_directory(doc.path(), &CompileOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(!doc.expected_output("pdf").exists());
    // Nothing but the source directory remains next to the input.
    let siblings: Vec<_> = fs::read_dir(doc.parent())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(siblings, vec!["slow"]);
}
