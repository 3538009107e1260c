//! Tool handlers
//!
//! Each handler deserializes its argument object, resolves relative paths
//! to absolute before touching the filesystem, and delegates to the
//! compile pipeline. The success payload carries the absolute output path;
//! failures bubble up and are rendered as tool error payloads by the
//! server.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use typc_compose::CoverStrategy;
use typc_core::{CompileOptions, CompileService, ReportOptions};

use crate::registry::{HandlerFuture, ToolHandler};
use crate::{Error, Result};

/// Handler bound to a declared tool name, if any.
pub(crate) fn handler_for(name: &str) -> Option<ToolHandler> {
    match name {
        "compile_document" => Some(compile_document),
        "compile_with_content" => Some(compile_with_content),
        "compile_advanced" => Some(compile_advanced),
        "compile_report" => Some(compile_report),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryArgs {
    directory_path: String,
}

#[derive(Debug, Deserialize)]
struct ContentArgs {
    directory_path: String,
    content_file: String,
}

#[derive(Debug, Deserialize)]
struct AdvancedArgs {
    directory_path: String,
    content_file: Option<String>,
    content_directory: Option<String>,
    custom_titlepage: Option<String>,
    cover_strategy: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReportArgs {
    directory_path: String,
    custom_titlepage: Option<String>,
    cover_strategy: Option<String>,
}

fn compile_document(service: &CompileService, arguments: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let args: DirectoryArgs = parse_args(arguments)?;
        let dir = absolutize(&args.directory_path);
        let output = service
            .compile_directory(&dir, &CompileOptions::default())
            .await?;
        Ok(success_message(&output))
    })
}

fn compile_with_content(service: &CompileService, arguments: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let args: ContentArgs = parse_args(arguments)?;
        let dir = absolutize(&args.directory_path);
        let options = CompileOptions {
            content_file: Some(absolutize(&args.content_file)),
            ..CompileOptions::default()
        };
        let output = service.compile_directory(&dir, &options).await?;
        Ok(success_message(&output))
    })
}

fn compile_advanced(service: &CompileService, arguments: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let args: AdvancedArgs = parse_args(arguments)?;
        let dir = absolutize(&args.directory_path);
        let options = CompileOptions {
            content_file: args.content_file.as_deref().map(absolutize),
            content_dir: args.content_directory.as_deref().map(absolutize),
            cover_page: args.custom_titlepage.as_deref().map(absolutize),
            cover_strategy: parse_strategy(args.cover_strategy.as_deref())?,
            ..CompileOptions::default()
        };
        let output = service.compile_directory(&dir, &options).await?;
        Ok(success_message(&output))
    })
}

fn compile_report(service: &CompileService, arguments: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let args: ReportArgs = parse_args(arguments)?;
        let dir = absolutize(&args.directory_path);
        let options = ReportOptions {
            cover_page: args.custom_titlepage.as_deref().map(absolutize),
            cover_strategy: parse_strategy(args.cover_strategy.as_deref())?,
            ..ReportOptions::default()
        };
        let output = service.compile_report(&dir, &options).await?;
        Ok(success_message(&output))
    })
}

fn parse_args<T: for<'de> Deserialize<'de>>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments {
        message: e.to_string(),
    })
}

fn parse_strategy(value: Option<&str>) -> Result<CoverStrategy> {
    match value {
        None => Ok(CoverStrategy::default()),
        Some(raw) => CoverStrategy::from_str(raw)
            .map_err(|message| Error::InvalidArguments { message }),
    }
}

/// Resolve a caller-supplied path to an absolute one before any
/// filesystem access.
fn absolutize(raw: &str) -> PathBuf {
    let path = Path::new(raw);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    dunce::simplified(&absolute).to_path_buf()
}

fn success_message(output: &Path) -> String {
    format!(
        "Successfully compiled Typst document to PDF: {}",
        output.display()
    )
}
