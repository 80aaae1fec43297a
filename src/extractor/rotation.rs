//! Affine rotation with bilinear resampling
//!
//! Packers store some regions turned a quarter turn to fit them better.
//! Restoring them is done with an inverse-mapped affine transform: for every
//! destination pixel centre the source position is computed and sampled
//! bilinearly. For quarter turns the pixel centres map exactly onto source
//! pixel centres, so the interpolation weights collapse and the result is
//! lossless.

use image::{imageops, RgbaImage};

/// 2D affine transform `(x, y) -> (a*x + b*y + tx, c*x + d*y + ty)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    /// Clockwise quarter turn (in y-down image space) of a source whose
    /// height is `source_height`, keeping the result in positive coordinates
    pub fn quarter_turn_clockwise(source_height: u32) -> Self {
        // (x, y) -> (h - y, x)
        AffineTransform {
            a: 0.0,
            b: -1.0,
            c: 1.0,
            d: 0.0,
            tx: source_height as f64,
            ty: 0.0,
        }
    }

    /// Counter-clockwise quarter turn of a source whose width is `source_width`
    pub fn quarter_turn_counter_clockwise(source_width: u32) -> Self {
        // (x, y) -> (y, w - x)
        AffineTransform {
            a: 0.0,
            b: 1.0,
            c: -1.0,
            d: 0.0,
            tx: 0.0,
            ty: source_width as f64,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.b * y + self.tx, self.c * x + self.d * y + self.ty)
    }

    /// Inverse transform, `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(AffineTransform {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + b * self.ty),
            ty: -(c * self.tx + d * self.ty),
        })
    }
}

/// Render `source` through `transform` into a new `width x height` buffer.
///
/// Destination pixels whose source position falls outside the source image
/// stay transparent.
pub fn transform_bilinear(source: &RgbaImage, transform: &AffineTransform, width: u32, height: u32) -> RgbaImage {
    let mut output = RgbaImage::new(width, height);
    let Some(inverse) = transform.inverse() else {
        return output;
    };
    if source.width() == 0 || source.height() == 0 {
        return output;
    }

    let max_x = (source.width() - 1) as f64;
    let max_y = (source.height() - 1) as f64;
    for (dx, dy, pixel) in output.enumerate_pixels_mut() {
        let (sx, sy) = inverse.apply(dx as f64 + 0.5, dy as f64 + 0.5);
        if sx < 0.0 || sy < 0.0 || sx > source.width() as f64 || sy > source.height() as f64 {
            continue;
        }
        // Pixel-index space: pixel (i, j) has its centre at (i, j)
        let x = (sx - 0.5).clamp(0.0, max_x) as f32;
        let y = (sy - 0.5).clamp(0.0, max_y) as f32;
        if let Some(sampled) = imageops::interpolate_bilinear(source, x, y) {
            *pixel = sampled;
        }
    }
    output
}

/// Turn a stored region a quarter turn clockwise, giving a buffer of
/// `source.height() x source.width()`
pub fn rotate_quarter_clockwise(source: &RgbaImage) -> RgbaImage {
    let transform = AffineTransform::quarter_turn_clockwise(source.height());
    transform_bilinear(source, &transform, source.height(), source.width())
}

/// Inverse of `rotate_quarter_clockwise`
pub fn rotate_quarter_counter_clockwise(source: &RgbaImage) -> RgbaImage {
    let transform = AffineTransform::quarter_turn_counter_clockwise(source.width());
    transform_bilinear(source, &transform, source.height(), source.width())
}
