//! Cover-page composition for typc
//!
//! Decides, from the presence of a cover-page PDF, whether to inject a
//! source-level embed directive before compilation or to merge two
//! independently produced PDFs afterwards, and performs whichever path is
//! selected. Without a cover page the compiler's output passes through
//! untouched.

pub mod embed;
pub mod error;
pub mod merge;
pub mod strategy;

pub use embed::{cover_prologue, inject_cover};
pub use error::{Error, Result};
pub use merge::prepend_cover;
pub use strategy::{Composition, CoverStrategy, compose};
