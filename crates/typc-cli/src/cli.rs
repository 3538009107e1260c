//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use typc_compiler::OutputFormat;
use typc_compose::CoverStrategy;

/// typc - assemble and compile Typst document directories
#[derive(Parser, Debug)]
#[command(name = "typc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Typst compiler binary
    #[arg(long, global = true, default_value = "typst")]
    pub typst: PathBuf,

    /// Wall-clock budget for one compiler run, in seconds
    #[arg(long, global = true, default_value_t = 60)]
    pub timeout: u64,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a document directory (or zip bundle) to a rendered artifact
    ///
    /// The directory must contain one entry document whose name ends in
    /// main.typ. The artifact is written next to the input unless --output
    /// names it explicitly.
    ///
    /// Examples:
    ///   typc compile --dir thesis
    ///   typc compile --dir thesis --output final
    ///   typc compile --dir slides --type-output png --ppi 300
    ///   typc compile --dir thesis --cover titlepage.pdf
    Compile {
        /// Directory with the document sources, or a zip bundle
        #[arg(short, long)]
        dir: PathBuf,

        /// Output name; produces <name>.<ext> in the current directory
        #[arg(short, long)]
        output: Option<String>,

        /// Output format
        #[arg(
            short = 't',
            long = "type-output",
            alias = "type_output",
            value_enum,
            default_value_t = FormatArg::Pdf
        )]
        type_output: FormatArg,

        /// Raster resolution for PNG output
        #[arg(long, default_value_t = 144.0)]
        ppi: f64,

        /// File staged into the workspace as content.typ
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// Directory overlaid onto the workspace (its content.typ wins)
        #[arg(long)]
        content_dir: Option<PathBuf>,

        /// Cover-page PDF placed before the document
        #[arg(long)]
        cover: Option<PathBuf>,

        /// How the cover page is attached
        #[arg(long, value_enum, default_value_t = StrategyArg::Merge)]
        cover_strategy: StrategyArg,
    },

    /// Compile a report from the built-in institutional template
    ///
    /// The directory must contain a content.typ file with the report body.
    Report {
        /// Directory containing content.typ and any extra resources
        #[arg(short, long)]
        dir: PathBuf,

        /// Output name; produces <name>.pdf in the current directory
        #[arg(short, long)]
        output: Option<String>,

        /// Cover-page PDF placed before the document
        #[arg(long)]
        cover: Option<PathBuf>,

        /// How the cover page is attached
        #[arg(long, value_enum, default_value_t = StrategyArg::Merge)]
        cover_strategy: StrategyArg,
    },

    /// Run the MCP tool server on stdio
    Mcp,
}

/// Output format argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Pdf,
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

/// Cover-strategy argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Embed,
    Merge,
}

impl From<StrategyArg> for CoverStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Embed => CoverStrategy::Embed,
            StrategyArg::Merge => CoverStrategy::Merge,
        }
    }
}
