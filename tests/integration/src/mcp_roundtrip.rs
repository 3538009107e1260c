//! In-process MCP protocol round trips against the full pipeline.

use std::sync::Arc;

use serde_json::Value;
use typc_core::CompileService;
use typc_mcp::McpServer;
use typc_test_utils::{DocDir, FakeCompiler, dummy_pdf, page_texts};

fn server(compiler: FakeCompiler) -> McpServer {
    McpServer::new(CompileService::new(Arc::new(compiler))).unwrap()
}

async fn call(server: &McpServer, request: &str) -> Value {
    let response = server.handle_message(request).await.unwrap();
    serde_json::from_str(&response).unwrap()
}

#[tokio::test]
async fn full_session_initialize_list_call() {
    let doc = DocDir::named("session-doc").file("main.typ", "= Doc");
    let server = server(FakeCompiler::emitting(b"pdf".to_vec()));

    let init = call(
        &server,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#,
    )
    .await;
    assert_eq!(init["result"]["serverInfo"]["name"], "typc-mcp");

    let listed = call(&server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
    let tools = listed["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 4);

    let request = format!(
        r#"{{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{{"name":"compile_document","arguments":{{"directory_path":"{}"}}}}}}"#,
        doc.path().display()
    );
    let called = call(&server, &request).await;
    let text = called["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Successfully compiled"));
    assert!(doc.expected_output("pdf").is_file());
}

#[tokio::test]
async fn advanced_tool_attaches_a_titlepage() {
    let doc = DocDir::named("advanced-doc").file("main.typ", "= Doc");
    let cover = doc.parent().join("title.pdf");
    std::fs::write(&cover, dummy_pdf(1, "Cover")).unwrap();

    let server = server(FakeCompiler::emitting(dummy_pdf(2, "Body")));
    let request = format!(
        r#"{{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{{"name":"compile_advanced","arguments":{{"directory_path":"{}","custom_titlepage":"{}"}}}}}}"#,
        doc.path().display(),
        cover.display()
    );

    let called = call(&server, &request).await;
    let text = called["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("Successfully compiled"), "payload: {text}");

    let merged = std::fs::read(doc.expected_output("pdf")).unwrap();
    assert_eq!(page_texts(&merged), vec!["Cover 1", "Body 1", "Body 2"]);
}

#[tokio::test]
async fn domain_error_payload_names_the_offending_path() {
    let server = server(FakeCompiler::emitting(b"pdf".to_vec()));
    let request = r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"compile_document","arguments":{"directory_path":"/missing/dir"}}}"#;

    let called = call(&server, request).await;
    assert_eq!(called["result"]["is_error"], true);
    let text = called["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("/missing/dir"));
}
