//! Procedural city skyline generation.
//!
//! All randomness flows through a caller-supplied [`Rng`], so a fixed seed
//! reproduces the exact canvas byte for byte. Scene objects are painted
//! destructively onto the canvas; nothing retains a shape list.

use rand::Rng;

use crate::error::{EmberfallError, EmberfallResult};
use crate::raster::{RasterImage, Rgb8};

const SKY: Rgb8 = [5, 5, 40];
const STAR: Rgb8 = [255, 255, 255];
const WIRE: Rgb8 = [0, 0, 0];

/// One paintable piece of the skyline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneObject {
    Star {
        center: (u32, u32),
        radius: u32,
    },
    Building {
        left: u32,
        width: u32,
        height: u32,
        gray: u8,
    },
    Wire {
        y_left: u32,
        y_right: u32,
        thickness: u32,
    },
}

impl SceneObject {
    /// Paint the object onto `canvas`, clipping at the edges.
    pub fn paint(&self, canvas: &mut RasterImage) {
        match *self {
            SceneObject::Star { center, radius } => paint_circle(canvas, center, radius, STAR),
            SceneObject::Building {
                left,
                width,
                height,
                gray,
            } => paint_building(canvas, left, width, height, [gray, gray, gray]),
            SceneObject::Wire {
                y_left,
                y_right,
                thickness,
            } => paint_wire(canvas, y_left, y_right, thickness),
        }
    }
}

/// Draw-attempt counters for one generated scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub stars: u32,
    pub buildings_drawn: u32,
    pub buildings_skipped: u32,
    pub wires: u32,
}

impl SceneStats {
    pub fn building_attempts(&self) -> u32 {
        self.buildings_drawn + self.buildings_skipped
    }
}

/// Generate a square night-city canvas of side `size`.
///
/// Stars may overlap freely. A building whose right edge would reach past
/// the canvas is silently skipped, not an error. After every 4th building a
/// telephone wire is strung across the full width.
pub fn generate_scene(
    size: u32,
    star_count: u32,
    building_count: u32,
    rng: &mut impl Rng,
) -> EmberfallResult<(RasterImage, SceneStats)> {
    if size == 0 {
        return Err(EmberfallError::invalid_image("canvas size must be > 0"));
    }

    let mut canvas = RasterImage::filled(size, size, SKY);
    let mut stats = SceneStats::default();

    for _ in 0..star_count {
        let star = SceneObject::Star {
            center: (rng.random_range(0..size), rng.random_range(0..size)),
            radius: rng.random_range(0..4),
        };
        star.paint(&mut canvas);
        stats.stars += 1;
    }

    // Clamped upper bounds keep the ranges non-empty for small canvases.
    let w_lo = size / 15;
    let w_hi = (size / 8).max(w_lo + 1);
    let h_lo = size / 3;
    let h_hi = (3 * size / 4).max(h_lo + 1);
    let wire_lo = 2 * size / 5;
    let wire_hi = (9 * size / 10).max(wire_lo + 1);

    for i in 0..building_count {
        let left = rng.random_range(0..size);
        let width = rng.random_range(w_lo..w_hi);
        let height = rng.random_range(h_lo..h_hi);
        let gray = rng.random_range(20..50u8);

        if left + width < size {
            SceneObject::Building {
                left,
                width,
                height,
                gray,
            }
            .paint(&mut canvas);
            stats.buildings_drawn += 1;
        } else {
            stats.buildings_skipped += 1;
        }

        if i % 4 == 0 {
            let wire = SceneObject::Wire {
                y_left: rng.random_range(wire_lo..wire_hi),
                y_right: rng.random_range(wire_lo..wire_hi),
                thickness: rng.random_range(2..4),
            };
            wire.paint(&mut canvas);
            stats.wires += 1;
        }
    }

    Ok((canvas, stats))
}

fn paint_circle(canvas: &mut RasterImage, center: (u32, u32), radius: u32, color: Rgb8) {
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let r = i64::from(radius);
    let w = i64::from(canvas.width());
    let h = i64::from(canvas.height());
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && x < w && y >= 0 && y < h {
                canvas.put(x as u32, y as u32, color);
            }
        }
    }
}

// Buildings rise from the bottom edge; the caller's skip rule guarantees the
// right edge fits, so only the top needs clipping.
fn paint_building(canvas: &mut RasterImage, left: u32, width: u32, height: u32, color: Rgb8) {
    let top = canvas.height().saturating_sub(height);
    let right = (left + width).min(canvas.width().saturating_sub(1));
    for y in top..canvas.height() {
        for x in left..=right {
            canvas.put(x, y, color);
        }
    }
}

fn paint_wire(canvas: &mut RasterImage, y_left: u32, y_right: u32, thickness: u32) {
    let w = canvas.width();
    let h = i64::from(canvas.height());
    for x in 0..w {
        let t = f64::from(x) / f64::from(w);
        let yc = f64::from(y_left) + (f64::from(y_right) - f64::from(y_left)) * t;
        let y0 = yc.round() as i64 - i64::from(thickness / 2);
        for dy in 0..i64::from(thickness) {
            let y = y0 + dy;
            if y >= 0 && y < h {
                canvas.put(x, y as u32, WIRE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn scene_reports_exact_draw_attempts() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (canvas, stats) = generate_scene(1000, 100, 30, &mut rng).unwrap();
        assert_eq!(canvas.width(), 1000);
        assert_eq!(canvas.height(), 1000);
        assert_eq!(stats.stars, 100);
        assert_eq!(stats.building_attempts(), 30);
        // Wires land after buildings 0, 4, ..., 28.
        assert_eq!(stats.wires, 8);
    }

    #[test]
    fn same_seed_reproduces_the_canvas() {
        let (a, _) = generate_scene(128, 20, 8, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let (b, _) = generate_scene(128, 20, 8, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_seeds_diverge() {
        let (a, _) = generate_scene(128, 20, 8, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        let (b, _) = generate_scene(128, 20, 8, &mut ChaCha8Rng::seed_from_u64(2)).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn empty_scene_is_plain_sky() {
        let (canvas, stats) = generate_scene(16, 0, 0, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(stats, SceneStats::default());
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(canvas.get(x, y), SKY);
            }
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = generate_scene(0, 1, 1, &mut ChaCha8Rng::seed_from_u64(0)).unwrap_err();
        assert!(err.to_string().contains("invalid image:"));
    }

    #[test]
    fn building_paint_fills_from_the_bottom() {
        let mut canvas = RasterImage::filled(10, 10, SKY);
        SceneObject::Building {
            left: 2,
            width: 3,
            height: 4,
            gray: 30,
        }
        .paint(&mut canvas);
        assert_eq!(canvas.get(3, 9), [30, 30, 30]);
        assert_eq!(canvas.get(3, 6), [30, 30, 30]);
        assert_eq!(canvas.get(3, 5), SKY);
        assert_eq!(canvas.get(0, 9), SKY);
    }

    #[test]
    fn star_clips_at_the_canvas_edge() {
        let mut canvas = RasterImage::filled(8, 8, SKY);
        SceneObject::Star {
            center: (0, 0),
            radius: 3,
        }
        .paint(&mut canvas);
        assert_eq!(canvas.get(0, 0), STAR);
        assert_eq!(canvas.get(7, 7), SKY);
    }

    #[test]
    fn wire_spans_the_full_width() {
        let mut canvas = RasterImage::filled(20, 20, SKY);
        SceneObject::Wire {
            y_left: 10,
            y_right: 10,
            thickness: 2,
        }
        .paint(&mut canvas);
        for x in 0..20 {
            assert_eq!(canvas.get(x, 10), WIRE);
        }
    }
}
