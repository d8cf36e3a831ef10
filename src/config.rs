//! Immutable run configuration.
//!
//! Built once by the command line front-end and passed by reference into every pipeline stage.

use std::path::PathBuf;

use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Threshold used by the keyed strategy when none is given.
pub const DEFAULT_THRESHOLD: u8 = 192;

/// How the two fitted layers are merged into the output image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Hard-threshold both layers into RGBA masks and blend them 50/50.
    Keyed {
        /// Intensity cut-off; front ink is `< threshold`, back ink is `> threshold`.
        threshold: u8,
    },
    /// Derive gray and alpha algebraically and stream a gray+alpha PNG.
    GrayAlpha,
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::Keyed {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyed { threshold } => write!(f, "keyed(threshold={threshold})"),
            Self::GrayAlpha => f.write_str("gray-alpha"),
        }
    }
}

/// Everything a single compositing run needs.
#[derive(Clone, Debug)]
pub struct CompositeConfig {
    /// Front (ink) layer path.
    pub front: PathBuf,
    /// Back (base) layer path.
    pub back: PathBuf,
    /// Output image path.
    pub output: PathBuf,
    /// Compositing strategy.
    pub strategy: StrategyKind,
}

impl CompositeConfig {
    /// Check paths before any file is touched.
    pub fn validate(&self) -> HoshizoraResult<()> {
        for (name, path) in [
            ("front", &self.front),
            ("back", &self.back),
            ("output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(HoshizoraError::validation(format!(
                    "{name} path must not be empty"
                )));
            }
        }
        if self.output == self.front || self.output == self.back {
            return Err(HoshizoraError::validation(format!(
                "output '{}' would overwrite an input layer",
                self.output.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
