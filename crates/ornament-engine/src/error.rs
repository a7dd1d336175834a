// Imports
use crate::decoration::DecorationId;
use ornament_compose::ValidationError;
use thiserror::Error;

/// Errors of the decorator.
#[derive(Error, Debug)]
pub enum DecoratorError {
    /// Decoration parameters violate a geometric precondition.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No decoration with the id exists.
    #[error("decoration with id `{0}` does not exist")]
    NotFound(DecorationId),
    /// A decoration with the id already exists.
    #[error("decoration with id `{0}` already exists")]
    DuplicateId(DecorationId),
    /// The operation is not supported, e.g. duplicating a decorator.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// The decorator was drawn with a different widget than the one that owns it.
    #[error("decorator belongs to widget `{expected}`, but was drawn with widget `{found}`")]
    WidgetMismatch { expected: String, found: String },
    /// Drawing a decoration failed. The whole partition draw was aborted.
    #[error("drawing decorations failed")]
    Render(#[from] anyhow::Error),
}
