use crate::error::{EmberfallError, EmberfallResult};

pub type Rgb8 = [u8; 3];

/// A raster frame: RGB8 pixels, tightly packed, row-major.
///
/// Overlay and paint operations mutate the buffer in place; callers that need
/// the original must clone first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let len = (width as usize) * (height as usize) * 3;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> EmberfallResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| EmberfallError::invalid_image("raster buffer size overflow"))?;
        if data.len() != expected {
            return Err(EmberfallError::invalid_image(
                "from_raw expects data matching width*height*3",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }

    /// Pixel at (x, y). Callers must stay in bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: Rgb8) {
        let i = self.idx(x, y);
        self.data[i..i + 3].copy_from_slice(&color);
    }

    pub fn to_rgb_image(&self) -> image::RgbImage {
        // from_raw only fails on a length mismatch, which from_raw/new rule out.
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }

    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            data: img.as_raw().clone(),
        }
    }
}

/// Shifted copy of `img`: pixel (x, y) of the source lands at (x + dx, y + dy).
/// Vacated area is black, pixels pushed past the edge are dropped.
pub fn translate(img: &RasterImage, dx: i64, dy: i64) -> RasterImage {
    let mut out = RasterImage::new(img.width(), img.height());
    let w = i64::from(img.width());
    let h = i64::from(img.height());
    for y in 0..h {
        let sy = y - dy;
        if sy < 0 || sy >= h {
            continue;
        }
        for x in 0..w {
            let sx = x - dx;
            if sx < 0 || sx >= w {
                continue;
            }
            out.put(x as u32, y as u32, img.get(sx as u32, sy as u32));
        }
    }
    out
}

/// Proportional resize to `target_w` pixels wide.
pub fn resize_to_width(img: &RasterImage, target_w: u32) -> EmberfallResult<RasterImage> {
    if img.is_empty() {
        return Err(EmberfallError::invalid_image(
            "resize_to_width expects a non-empty image",
        ));
    }
    if target_w == 0 {
        return Err(EmberfallError::invalid_image(
            "resize_to_width target width must be > 0",
        ));
    }
    let ratio = f64::from(target_w) / f64::from(img.width());
    let target_h = ((f64::from(img.height()) * ratio) as u32).max(1);
    let resized = image::imageops::resize(
        &img.to_rgb_image(),
        target_w,
        target_h,
        image::imageops::FilterType::Triangle,
    );
    Ok(RasterImage::from_rgb_image(&resized))
}

/// Per-cell foreground/background classification. Cells are 0 or 255, never
/// anything in between; dimensions always match the source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl Mask {
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.cells[(y as usize) * (self.width as usize) + (x as usize)] == 255
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}
