//! Output formats the backend can render

use std::fmt;
use std::str::FromStr;

/// Default raster resolution, matching the backend's print-quality preset.
pub const DEFAULT_PPI: f64 = 144.0;

/// Rendered-artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Svg,
}

impl OutputFormat {
    /// Identifier passed to the compiler's `--format` flag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// File extension for artifacts of this format.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown output format `{other}` (expected pdf, png or svg)")),
        }
    }
}
