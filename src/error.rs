use thiserror::Error;

use crate::resolution::Resolution;

/// Errors that cause a compositing step to produce no output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositeError {
    #[error("cannot composite onto an empty {0} image")]
    EmptyImage(Resolution),
    #[error("cannot composite using an empty {0} mask")]
    EmptyMask(Resolution),
    #[error("invalid tint component {component} = {value} (must be between 0.0 and 1.0)")]
    InvalidTint { component: &'static str, value: f32 },
    #[error("matte alpha {0} is outside of the range 0.0 to 1.0")]
    AlphaOutOfRange(f32),
}
