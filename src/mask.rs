//! Foreground/background separation.
//!
//! The cut-out pipeline is: intensity conversion, a small smoothing pass to
//! knock out high-frequency noise, then a binary classification against
//! either a fixed global threshold or the local neighborhood mean.

use crate::error::{EmberfallError, EmberfallResult};
use crate::raster::{Mask, RasterImage};

/// Controls how an asset image is separated into foreground and background.
///
/// `adaptive` selects local-mean thresholding instead of the fixed `value`;
/// the two modes are alternatives, never combined. `invert` flips which side
/// of the threshold counts as foreground.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThresholdPolicy {
    pub value: u8,
    #[serde(default)]
    pub invert: bool,
    #[serde(default)]
    pub adaptive: bool,
}

impl ThresholdPolicy {
    pub const fn fixed(value: u8, invert: bool) -> Self {
        Self {
            value,
            invert,
            adaptive: false,
        }
    }

    pub const fn adaptive(invert: bool) -> Self {
        Self {
            value: 0,
            invert,
            adaptive: true,
        }
    }
}

// Adaptive mode averages over an 11x11 window, mean-C with C = 0.
const ADAPTIVE_BLOCK_RADIUS: i64 = 5;

/// Classify every pixel of `img` as foreground (255) or background (0).
///
/// The returned mask always has the source image's dimensions.
pub fn threshold(img: &RasterImage, policy: ThresholdPolicy) -> EmberfallResult<Mask> {
    if img.is_empty() {
        return Err(EmberfallError::invalid_image(
            "threshold expects a non-empty image",
        ));
    }

    let gray = to_intensity(img);
    let blurred = smooth_5x5(&gray, img.width(), img.height());

    let w = img.width() as usize;
    let h = img.height() as usize;
    let mut cells = vec![0u8; w * h];

    if policy.adaptive {
        for y in 0..h {
            for x in 0..w {
                let mean = local_mean(&blurred, img.width(), img.height(), x as i64, y as i64);
                let above = blurred[y * w + x] > mean;
                cells[y * w + x] = classify(above, policy.invert);
            }
        }
    } else {
        for (cell, &v) in cells.iter_mut().zip(blurred.iter()) {
            *cell = classify(v > policy.value, policy.invert);
        }
    }

    Ok(Mask::from_cells(img.width(), img.height(), cells))
}

/// Threshold `img` and black out everything the mask calls background.
///
/// The result is pure black outside the cut-out, which is exactly the
/// convention the compositor's transparency test keys on.
pub fn cutout(img: &RasterImage, policy: ThresholdPolicy) -> EmberfallResult<RasterImage> {
    let mask = threshold(img, policy)?;
    let mut out = RasterImage::new(img.width(), img.height());
    for y in 0..img.height() {
        for x in 0..img.width() {
            if mask.is_foreground(x, y) {
                out.put(x, y, img.get(x, y));
            }
        }
    }
    Ok(out)
}

#[inline]
fn classify(above: bool, invert: bool) -> u8 {
    if above != invert { 255 } else { 0 }
}

// BT.601 luma, integer fixed point (weights sum to 256).
fn to_intensity(img: &RasterImage) -> Vec<u8> {
    let mut out = Vec::with_capacity((img.width() as usize) * (img.height() as usize));
    for y in 0..img.height() {
        for x in 0..img.width() {
            let [r, g, b] = img.get(x, y);
            let v = (77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b) + 128) >> 8;
            out.push(v as u8);
        }
    }
    out
}

// Separable 5-tap binomial kernel [1,4,6,4,1]/16, clamped borders.
fn smooth_5x5(src: &[u8], width: u32, height: u32) -> Vec<u8> {
    const K: [u32; 5] = [1, 4, 6, 4, 1];
    let w = width as i64;
    let h = height as i64;

    let sample = |buf: &[u8], x: i64, y: i64| -> u32 {
        let x = x.clamp(0, w - 1) as usize;
        let y = y.clamp(0, h - 1) as usize;
        u32::from(buf[y * (w as usize) + x])
    };

    let mut tmp = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (i, k) in K.iter().enumerate() {
                acc += k * sample(src, x + i as i64 - 2, y);
            }
            tmp[(y * w + x) as usize] = ((acc + 8) / 16) as u8;
        }
    }

    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u32;
            for (i, k) in K.iter().enumerate() {
                acc += k * sample(&tmp, x, y + i as i64 - 2);
            }
            out[(y * w + x) as usize] = ((acc + 8) / 16) as u8;
        }
    }
    out
}

fn local_mean(buf: &[u8], width: u32, height: u32, cx: i64, cy: i64) -> u8 {
    let w = i64::from(width);
    let h = i64::from(height);
    let mut acc = 0u32;
    let mut count = 0u32;
    for dy in -ADAPTIVE_BLOCK_RADIUS..=ADAPTIVE_BLOCK_RADIUS {
        for dx in -ADAPTIVE_BLOCK_RADIUS..=ADAPTIVE_BLOCK_RADIUS {
            let x = (cx + dx).clamp(0, w - 1) as usize;
            let y = (cy + dy).clamp(0, h - 1) as usize;
            acc += u32::from(buf[y * (w as usize) + x]);
            count += 1;
        }
    }
    (acc / count) as u8
}
