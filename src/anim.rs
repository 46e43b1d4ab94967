//! Frame sequencing: the character flight and the fireball impacts.
//!
//! Both sequences are lazy, finite, non-restartable iterators over rendered
//! frames. Pacing and presentation are the sink's concern, never the
//! controller's; the controller only produces frames in order.

use rand::Rng;

use crate::composite::overlay;
use crate::error::{EmberfallError, EmberfallResult};
use crate::raster::{RasterImage, translate};

/// Impact shakes run a fixed 7-step sub-sequence.
pub const SHAKE_STEPS: u32 = 7;
const SHAKE_AMPLITUDE: i64 = 10;

/// Alternating wing animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WingPhase {
    Closed,
    Open,
}

impl WingPhase {
    /// Frames alternate strictly by parity; frame 0 flies with closed wings.
    pub fn for_frame(frame: u32) -> Self {
        if frame % 2 == 0 {
            WingPhase::Closed
        } else {
            WingPhase::Open
        }
    }
}

/// The flying character, one cut-out per wing state.
#[derive(Clone, Debug)]
pub struct CharacterSprite {
    closed: RasterImage,
    open: RasterImage,
}

impl CharacterSprite {
    /// Both wing states must share dimensions; compositing alternating
    /// sprites at the same offset is undefined otherwise.
    pub fn new(closed: RasterImage, open: RasterImage) -> EmberfallResult<Self> {
        if closed.is_empty() || open.is_empty() {
            return Err(EmberfallError::invalid_image(
                "wing sprites must be non-empty",
            ));
        }
        if closed.width() != open.width() || closed.height() != open.height() {
            return Err(EmberfallError::dimension_mismatch(format!(
                "wing sprites differ: closed {}x{}, open {}x{}",
                closed.width(),
                closed.height(),
                open.width(),
                open.height()
            )));
        }
        Ok(Self { closed, open })
    }

    pub fn for_phase(&self, phase: WingPhase) -> &RasterImage {
        match phase {
            WingPhase::Closed => &self.closed,
            WingPhase::Open => &self.open,
        }
    }

    pub fn width(&self) -> u32 {
        self.closed.width()
    }

    pub fn height(&self) -> u32 {
        self.closed.height()
    }
}

/// Tunables for the flight act. Defaults match a 1000px canvas with a 400px
/// character starting at (300, 600) and climbing 60px per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlightParams {
    pub base_x: i64,
    pub base_y: i64,
    pub frames: u32,
    pub climb_px: u32,
    /// Camera wobble, +/- pixels per axis per frame.
    pub wobble_px: u32,
    /// Horizontal drift of the character, +/- pixels, held within a frame.
    pub drift_px: u32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            base_x: 300,
            base_y: 600,
            frames: 8,
            climb_px: 60,
            wobble_px: 5,
            drift_px: 100,
        }
    }
}

/// Lazy flight sequence: exactly `params.frames` frames, wing phase
/// alternating by parity, each frame a wobbled copy of the background with
/// the character composited one climb-step higher.
pub struct FlightFrames<'a, R: Rng> {
    background: &'a RasterImage,
    sprite: &'a CharacterSprite,
    params: FlightParams,
    rng: &'a mut R,
    step: u32,
    last: Option<RasterImage>,
}

impl<'a, R: Rng> FlightFrames<'a, R> {
    pub fn new(
        background: &'a RasterImage,
        sprite: &'a CharacterSprite,
        params: FlightParams,
        rng: &'a mut R,
    ) -> EmberfallResult<Self> {
        if background.is_empty() {
            return Err(EmberfallError::invalid_image(
                "flight background must be non-empty",
            ));
        }
        Ok(Self {
            background,
            sprite,
            params,
            rng,
            step: 0,
            last: None,
        })
    }

    /// The last frame produced so far; the fireball act continues from it.
    pub fn into_final(self) -> Option<RasterImage> {
        self.last
    }
}

impl<R: Rng> Iterator for FlightFrames<'_, R> {
    type Item = EmberfallResult<RasterImage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.params.frames {
            return None;
        }
        let step = self.step;
        self.step += 1;

        let wobble = i64::from(self.params.wobble_px);
        let jx = self.rng.random_range(-wobble..=wobble);
        let jy = self.rng.random_range(-wobble..=wobble);
        let mut frame = translate(self.background, jx, jy);

        let drift = i64::from(self.params.drift_px);
        let shift = self.rng.random_range(-drift..=drift);
        let x = self.params.base_x + shift;
        let y = self.params.base_y - i64::from(self.params.climb_px) * i64::from(step);

        let sprite = self.sprite.for_phase(WingPhase::for_frame(step));
        if let Err(e) = overlay(&mut frame, sprite, (x, y)) {
            return Some(Err(e));
        }

        self.last = Some(frame.clone());
        Some(Ok(frame))
    }
}

/// One fireball impact: the fireball lands at a random spot on the
/// persistent canvas (frame 0), then the whole scene shakes for
/// [`SHAKE_STEPS`] frames. The shakes compound on a working copy; the
/// persistent canvas itself stays put.
#[derive(Debug)]
pub struct ImpactFrames<'a, R: Rng> {
    canvas: &'a mut RasterImage,
    fireball: &'a RasterImage,
    rng: &'a mut R,
    step: u32,
    shaken: Option<RasterImage>,
}

impl<'a, R: Rng> ImpactFrames<'a, R> {
    pub fn new(
        canvas: &'a mut RasterImage,
        fireball: &'a RasterImage,
        rng: &'a mut R,
    ) -> EmberfallResult<Self> {
        if fireball.is_empty() {
            return Err(EmberfallError::invalid_image(
                "fireball sprite must be non-empty",
            ));
        }
        if 2 * fireball.width() >= canvas.width() || 2 * fireball.height() >= canvas.height() {
            return Err(EmberfallError::dimension_mismatch(format!(
                "fireball {}x{} does not fit a {}x{} canvas",
                fireball.width(),
                fireball.height(),
                canvas.width(),
                canvas.height()
            )));
        }
        Ok(Self {
            canvas,
            fireball,
            rng,
            step: 0,
            shaken: None,
        })
    }
}

impl<R: Rng> Iterator for ImpactFrames<'_, R> {
    type Item = EmberfallResult<RasterImage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step > SHAKE_STEPS {
            return None;
        }
        let step = self.step;
        self.step += 1;

        if step == 0 {
            let fw = self.fireball.width();
            let fh = self.fireball.height();
            let x = self.rng.random_range(fw..self.canvas.width() - fw);
            let y = self.rng.random_range(fh..self.canvas.height() - fh);
            if let Err(e) = overlay(self.canvas, self.fireball, (i64::from(x), i64::from(y))) {
                return Some(Err(e));
            }
            return Some(Ok(self.canvas.clone()));
        }

        let base = self.shaken.take().unwrap_or_else(|| self.canvas.clone());
        let jx = self.rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE);
        let jy = self.rng.random_range(-SHAKE_AMPLITUDE..=SHAKE_AMPLITUDE);
        let frame = translate(&base, jx, jy);
        self.shaken = Some(frame.clone());
        Some(Ok(frame))
    }
}
