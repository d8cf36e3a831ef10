use crate::foundation::core::Canvas;
use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Bytes per pixel of a gray+alpha row.
pub const GRAY_ALPHA_CHANNELS: usize = 2;

/// Configuration provided to a [`RowSink`] before the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl RasterConfig {
    /// Raster covering `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
        }
    }

    /// Expected length of one interleaved gray+alpha row.
    pub fn row_len(&self) -> usize {
        self.width as usize * GRAY_ALPHA_CHANNELS
    }

    pub(crate) fn validate(&self) -> HoshizoraResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HoshizoraError::validation(
                "raster width/height must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Sink contract for consuming a gray+alpha raster one row at a time.
///
/// Ordering contract: `begin` once, then `push_row` for rows `0..height` in strictly increasing
/// order, then `end` once.
pub trait RowSink {
    /// Called once before any rows are pushed.
    fn begin(&mut self, cfg: RasterConfig) -> HoshizoraResult<()>;
    /// Push one row of interleaved `(gray, alpha)` bytes.
    fn push_row(&mut self, idx: u32, row: &[u8]) -> HoshizoraResult<()>;
    /// Called once after the last row is pushed.
    fn end(&mut self) -> HoshizoraResult<()>;
}

/// Shared bookkeeping for the row ordering contract.
#[derive(Debug, Default)]
pub(crate) struct RowCursor {
    cfg: Option<RasterConfig>,
    next: u32,
}

impl RowCursor {
    pub(crate) fn begin(&mut self, cfg: RasterConfig) -> HoshizoraResult<()> {
        if self.cfg.is_some() {
            return Err(HoshizoraError::encode("sink already started"));
        }
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.next = 0;
        Ok(())
    }

    pub(crate) fn check_row(&self, idx: u32, row: &[u8]) -> HoshizoraResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(HoshizoraError::encode("row pushed before begin"));
        };
        if idx != self.next || idx >= cfg.height {
            return Err(HoshizoraError::encode(format!(
                "row {idx} out of order (expected {} of {})",
                self.next, cfg.height
            )));
        }
        if row.len() != cfg.row_len() {
            return Err(HoshizoraError::encode(format!(
                "row {idx} has {} bytes, expected {}",
                row.len(),
                cfg.row_len()
            )));
        }
        Ok(())
    }

    pub(crate) fn advance(&mut self) {
        self.next += 1;
    }

    pub(crate) fn check_complete(&self) -> HoshizoraResult<RasterConfig> {
        let Some(cfg) = self.cfg else {
            return Err(HoshizoraError::encode("sink ended before begin"));
        };
        if self.next != cfg.height {
            return Err(HoshizoraError::encode(format!(
                "raster incomplete: {} of {} rows written",
                self.next, cfg.height
            )));
        }
        Ok(cfg)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryRowSink {
    cursor: RowCursor,
    data: Vec<u8>,
    ended: bool,
}

impl InMemoryRowSink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<RasterConfig> {
        self.cursor.cfg
    }

    /// Captured rows, tightly packed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `true` once `end` succeeded.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl RowSink for InMemoryRowSink {
    fn begin(&mut self, cfg: RasterConfig) -> HoshizoraResult<()> {
        self.cursor.begin(cfg)?;
        self.data.clear();
        self.data.reserve(cfg.row_len() * cfg.height as usize);
        Ok(())
    }

    fn push_row(&mut self, idx: u32, row: &[u8]) -> HoshizoraResult<()> {
        self.cursor.check_row(idx, row)?;
        self.data.extend_from_slice(row);
        self.cursor.advance();
        Ok(())
    }

    fn end(&mut self) -> HoshizoraResult<()> {
        self.cursor.check_complete()?;
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
