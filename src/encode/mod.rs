//! Output encoding.
//!
//! Rows of the gray+alpha raster are pushed through a [`sink::RowSink`] as soon as they are
//! computed.

/// Streaming gray+alpha PNG sink and output file guard.
pub mod gray_alpha_png;
/// Row sink trait and built-in sinks.
pub mod sink;
