#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![allow(clippy::single_match)]

//! the ornament-compose crate provides the building blocks for widget decorations: colors, styles and
//! validated shapes that are placed relative to an anchor point.

// Modules
/// colors
pub mod color;
/// module for extension traits for foreign types
pub mod ext;
/// utilities for serializing / deserializing
pub mod serialize;
/// module for decoration shapes
pub mod shapes;
/// module for styles, that can be applied onto shapes
pub mod style;
/// validation of decoration parameters
pub mod validation;

// Re-exports
pub use color::Color;
pub use style::{RasterBackend, ShapeStyle};
pub use validation::ValidationError;

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
