//! Document-reading capability.
//!
//! The extraction job only needs "given a path, return the ordered paragraph
//! texts"; [`DocumentReader`] is that seam, and [`DocxReader`] is the
//! implementation for Office Open XML word-processing documents.

pub mod docx;

pub use docx::DocxReader;

use crate::error::Result;
use std::path::Path;

pub trait DocumentReader {
    /// Read the document at `path` and return its paragraph texts in order.
    fn read_paragraphs(&self, path: &Path) -> Result<Vec<String>>;
}
