// Analysis Utilities Library
// Shared helpers for an analysis project: paths, configuration, git provenance and figures

// Core infrastructure - project context, layout defaults, errors
pub mod core;

// Operations - shell, git, provenance and figure persistence
pub mod operations;

// Figures - the plotting seam and a raster implementation
pub mod figure;

// Logging setup for binaries built on this crate
pub mod logging;

// Re-export commonly used items for convenience
pub use crate::core::{Error, Project, Result};
pub use crate::figure::{Figure, FigureError, FigureMetadata, RasterFigure, Rgba};
pub use crate::operations::{date_subdirectory, GitOps, Provenance, SaveOptions};
