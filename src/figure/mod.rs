// Figures
// The plotting seam figures are saved through, and a raster figure implementing it

pub mod pdf_writer;
pub mod png_writer;
pub mod raster;

use std::path::Path;
use thiserror::Error;

pub use image::Rgba;
pub use raster::{RasterFigure, BLACK, WHITE};

/// Errors raised by a figure while writing itself to disk
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("unsupported figure format {0:?}")]
    UnsupportedFormat(String),

    #[error("figure has no pixels ({width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed")]
    Png(#[from] png::EncodingError),

    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// Key/value metadata embedded in saved figure files, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureMetadata {
    entries: Vec<(String, String)>,
}

impl FigureMetadata {
    /// Empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any earlier value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no entries are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Anything that can write itself to a file with embedded metadata
///
/// The output format is chosen from the extension of `path`.
pub trait Figure {
    fn save(&self, path: &Path, metadata: &FigureMetadata) -> Result<(), FigureError>;
}

impl<F: Figure + ?Sized> Figure for &F {
    fn save(&self, path: &Path, metadata: &FigureMetadata) -> Result<(), FigureError> {
        (**self).save(path, metadata)
    }
}
