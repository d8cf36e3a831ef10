//! Compositing strategies and the end-to-end pipeline.

/// Strategy trait and its two implementations.
pub mod compositor;
/// Load, fit and composite.
pub mod pipeline;
