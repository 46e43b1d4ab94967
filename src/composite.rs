//! Chroma-key overlay of a cut-out sprite onto background buffers.

use crate::error::{EmberfallError, EmberfallResult};
use crate::raster::{RasterImage, Rgb8};

/// A pixel is background only when all three channels are exactly zero.
///
/// A pixel with a single zero channel but nonzero others is still copied.
/// This is the contract pre-thresholded sprites rely on (their background is
/// pure black), so it must hold bit-for-bit; it is a crude chroma key, not
/// alpha blending.
#[inline]
pub fn is_transparent(px: Rgb8) -> bool {
    px[0] == 0 && px[1] == 0 && px[2] == 0
}

/// Copy every non-transparent pixel of `src` into `dst` at `offset + (x, y)`.
///
/// Signed offsets are fine; destination pixels outside bounds are skipped,
/// never written, so a fully out-of-range offset is a no-op. Mutates `dst`
/// in place.
pub fn overlay(dst: &mut RasterImage, src: &RasterImage, offset: (i64, i64)) -> EmberfallResult<()> {
    if src.is_empty() {
        return Err(EmberfallError::invalid_image(
            "overlay expects a non-empty source",
        ));
    }
    let (ox, oy) = offset;
    let dw = i64::from(dst.width());
    let dh = i64::from(dst.height());
    for y in 0..src.height() {
        let dy = oy + i64::from(y);
        if dy < 0 || dy >= dh {
            continue;
        }
        for x in 0..src.width() {
            let dx = ox + i64::from(x);
            if dx < 0 || dx >= dw {
                continue;
            }
            let px = src.get(x, y);
            if !is_transparent(px) {
                dst.put(dx as u32, dy as u32, px);
            }
        }
    }
    Ok(())
}

/// Walk `src` once and copy each non-transparent pixel into both
/// destinations at the same offset. Used to build the open- and closed-wings
/// character previews from a single cut-out.
pub fn overlay_pair(
    dst_a: &mut RasterImage,
    dst_b: &mut RasterImage,
    src: &RasterImage,
    offset: (i64, i64),
) -> EmberfallResult<()> {
    if src.is_empty() {
        return Err(EmberfallError::invalid_image(
            "overlay_pair expects a non-empty source",
        ));
    }
    let (ox, oy) = offset;
    for y in 0..src.height() {
        let dy = oy + i64::from(y);
        for x in 0..src.width() {
            let dx = ox + i64::from(x);
            let px = src.get(x, y);
            if is_transparent(px) {
                continue;
            }
            for dst in [&mut *dst_a, &mut *dst_b] {
                if dy >= 0
                    && dy < i64::from(dst.height())
                    && dx >= 0
                    && dx < i64::from(dst.width())
                {
                    dst.put(dx as u32, dy as u32, px);
                }
            }
        }
    }
    Ok(())
}
