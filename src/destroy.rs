//! The closing "on fire" rendering: directional-gradient edges, red channel
//! only. Deterministic for a given frame; no randomness anywhere.

use crate::error::{EmberfallError, EmberfallResult};
use crate::raster::RasterImage;

// 3x3 Sobel, horizontal direction; the vertical kernel is its transpose.
const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Per-channel Sobel magnitudes in x and y, combined by per-pixel max, with
/// green and blue zeroed so only the red edge channel survives.
pub fn destroy(frame: &RasterImage) -> EmberfallResult<RasterImage> {
    if frame.is_empty() {
        return Err(EmberfallError::invalid_image(
            "destroy expects a non-empty frame",
        ));
    }

    let w = i64::from(frame.width());
    let h = i64::from(frame.height());
    let mut out = RasterImage::new(frame.width(), frame.height());

    for y in 0..h {
        for x in 0..w {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for ky in 0..3i64 {
                for kx in 0..3i64 {
                    let sx = (x + kx - 1).clamp(0, w - 1) as u32;
                    let sy = (y + ky - 1).clamp(0, h - 1) as u32;
                    let r = i32::from(frame.get(sx, sy)[0]);
                    gx += SOBEL_X[ky as usize][kx as usize] * r;
                    gy += SOBEL_Y[ky as usize][kx as usize] * r;
                }
            }
            let edge = gx.unsigned_abs().max(gy.unsigned_abs()).min(255) as u8;
            out.put(x as u32, y as u32, [edge, 0, 0]);
        }
    }
    Ok(out)
}
