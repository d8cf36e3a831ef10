use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::encode::sink::{RasterConfig, RowCursor, RowSink};
use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Removes a partially written output file unless explicitly committed.
///
/// Dropping an armed guard deletes `path`; [`OutputGuard::commit`] disarms it.
#[derive(Debug)]
pub struct OutputGuard {
    path: PathBuf,
    armed: bool,
}

impl OutputGuard {
    /// Arm a guard for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    /// Guarded path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file.
    pub fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::warn!(path = %self.path.display(), "removed incomplete output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove incomplete output"
            ),
        }
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> HoshizoraResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streaming PNG writer for 8-bit gray+alpha rasters.
///
/// `begin` commits the header (8-bit depth, gray+alpha, no interlacing, default zlib level),
/// rows are compressed as they arrive and `end` writes the trailer. Only the encoder's own
/// working buffers are held; the raster is never assembled in memory.
pub struct PngGrayAlphaSink<W: Write + 'static> {
    out: Option<W>,
    stream: Option<png::StreamWriter<'static, W>>,
    cursor: RowCursor,
    // Declared after `stream` so the file is closed before the guard runs.
    guard: Option<OutputGuard>,
}

impl<W: Write + 'static> PngGrayAlphaSink<W> {
    /// Encode into an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            stream: None,
            cursor: RowCursor::default(),
            guard: None,
        }
    }
}

impl PngGrayAlphaSink<File> {
    /// Create (or truncate) `path` and encode into it.
    ///
    /// The file is removed again if the sink is dropped before a successful [`RowSink::end`].
    pub fn create(path: &Path) -> HoshizoraResult<Self> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| {
            HoshizoraError::encode(format!("failed to open '{}': {e}", path.display()))
        })?;
        let guard = OutputGuard::new(path);
        let mut sink = Self::new(file);
        sink.guard = Some(guard);
        Ok(sink)
    }
}

impl<W: Write + 'static> RowSink for PngGrayAlphaSink<W> {
    fn begin(&mut self, cfg: RasterConfig) -> HoshizoraResult<()> {
        self.cursor.begin(cfg)?;
        let out = self
            .out
            .take()
            .ok_or_else(|| HoshizoraError::encode("png sink has no output (unexpected)"))?;

        let mut encoder = png::Encoder::new(out, cfg.width, cfg.height);
        encoder.set_color(png::ColorType::GrayscaleAlpha);
        encoder.set_depth(png::BitDepth::Eight);
        let writer = encoder
            .write_header()
            .map_err(|e| HoshizoraError::encode(format!("failed to write png header: {e}")))?;
        let stream = writer
            .into_stream_writer()
            .map_err(|e| HoshizoraError::encode(format!("failed to start png stream: {e}")))?;
        self.stream = Some(stream);
        tracing::debug!(width = cfg.width, height = cfg.height, "png header written");
        Ok(())
    }

    fn push_row(&mut self, idx: u32, row: &[u8]) -> HoshizoraResult<()> {
        self.cursor.check_row(idx, row)?;
        let Some(stream) = self.stream.as_mut() else {
            return Err(HoshizoraError::encode("png sink is not streaming"));
        };
        stream
            .write_all(row)
            .map_err(|e| HoshizoraError::encode(format!("failed to write png row {idx}: {e}")))?;
        self.cursor.advance();
        Ok(())
    }

    fn end(&mut self) -> HoshizoraResult<()> {
        self.cursor.check_complete()?;
        let stream = self
            .stream
            .take()
            .ok_or_else(|| HoshizoraError::encode("png sink is already finalized"))?;
        stream
            .finish()
            .map_err(|e| HoshizoraError::encode(format!("failed to finish png stream: {e}")))?;
        if let Some(guard) = self.guard.take() {
            tracing::debug!(path = %guard.path().display(), "png trailer written");
            guard.commit();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gray_alpha_png.rs"]
mod tests;
