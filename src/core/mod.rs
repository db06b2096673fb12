// Core infrastructure module
// Project context, layout defaults and the error type the other modules share

pub mod defaults;
pub mod error;
pub mod project;

pub use defaults::{FigureDefaults, Layout};
pub use error::{Error, Result};
pub use project::Project;
