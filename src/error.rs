//! Error taxonomy for the generation pipeline.

use thiserror::Error;

/// Errors surfaced by [`crate::pipeline::generate`] and the stages below it.
///
/// No stage substitutes default data on failure; errors propagate to the
/// caller, which decides whether to retry with adjusted parameters.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A configuration value is out of range (zero point count, zero map
    /// size, non-finite coordinates). Recoverable: the caller can re-prompt
    /// and keep its last valid state.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// The point set cannot support a Voronoi diagram: fewer than 4 distinct
    /// points (possibly after lossy relaxation) or an all-collinear set.
    /// Fatal to the generation attempt.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}
