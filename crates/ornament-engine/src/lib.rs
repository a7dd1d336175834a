#![warn(missing_debug_implementations)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::single_match)]
#![allow(clippy::derivable_impls)]

//! The ornament-engine crate decorates widgets with shapes, images, text and draw callbacks.
//! It holds the decoration store with its coordinate and render caches, and draws onto cairo contexts.
//!
//! The main entry point is the [Decorator] struct.

// Modules
pub mod config;
pub mod decoration;
pub mod decorator;
pub mod error;
pub mod render;
pub mod store;
pub mod text;
pub mod widget;

// Re-exports
pub use config::DecoratorConfig;
pub use decoration::{DecorationId, DecorationKind, DecorationParams, Partition};
pub use decorator::Decorator;
pub use error::DecoratorError;
pub use render::Image;
pub use text::TextStyle;
pub use widget::{Widget, WidgetGeometry};

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
