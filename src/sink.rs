//! Frame consumers. The pipeline hands every frame to a [`FrameSink`];
//! display pacing, recording, or inspection all live behind this seam.

use std::path::PathBuf;

use anyhow::Context as _;

use crate::error::{EmberfallError, EmberfallResult};
use crate::raster::RasterImage;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing frame
/// indices, and every frame matches the dimensions announced in `begin`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> EmberfallResult<()>;
    /// Push one frame in sequence order.
    fn push_frame(&mut self, idx: u64, frame: &RasterImage) -> EmberfallResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> EmberfallResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, RasterImage)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(u64, RasterImage)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> EmberfallResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &RasterImage) -> EmberfallResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> EmberfallResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_NNNN.png` under a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> EmberfallResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output directory '{}'", self.dir.display()))?;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &RasterImage) -> EmberfallResult<()> {
        if frame.is_empty() {
            return Err(EmberfallError::invalid_image("cannot encode an empty frame"));
        }
        let path = self.dir.join(format!("frame_{idx:04}.png"));
        frame
            .to_rgb_image()
            .save(&path)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        Ok(())
    }

    fn end(&mut self) -> EmberfallResult<()> {
        Ok(())
    }
}
