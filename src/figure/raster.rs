// Raster Figure
// An RGBA canvas with just enough drawing to plot a series

use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

use super::{pdf_writer, png_writer, Figure, FigureError, FigureMetadata};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fraction of each side left blank around plotted series
const PLOT_MARGIN: f64 = 0.05;

/// Pixel canvas with the origin at the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct RasterFigure {
    image: RgbaImage,
}

impl RasterFigure {
    /// Create a white canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, WHITE),
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The underlying image buffer
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Paint every pixel with `color`
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Color at a pixel, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Set one pixel; coordinates outside the canvas are ignored
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Draw a straight line between two pixel coordinates (Bresenham)
    ///
    /// Endpoints may lie outside the canvas; only the visible part is drawn.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
        // i64 arithmetic: differences of two i32 values fit with room to double
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (to_x, to_y) = (to.0 as i64, to.1 as i64);
        let dx = (to_x - x).abs();
        let dy = -(to_y - y).abs();
        let sx = if x < to_x { 1 } else { -1 };
        let sy = if y < to_y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_pixel(x as i32, y as i32, color);
            if x == to_x && y == to_y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Connect consecutive pixel coordinates with lines
    pub fn draw_polyline(&mut self, points: &[(i32, i32)], color: Rgba<u8>) {
        match points {
            [] => {}
            [only] => self.put_pixel(only.0, only.1, color),
            _ => {
                for pair in points.windows(2) {
                    self.draw_line(pair[0], pair[1], color);
                }
            }
        }
    }

    /// Plot data points as a connected line scaled to fill the canvas
    ///
    /// The y axis points up. Non-finite points are skipped.
    pub fn plot_series(&mut self, points: &[(f64, f64)], color: Rgba<u8>) {
        let finite: Vec<(f64, f64)> = points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        if finite.is_empty() || self.width() == 0 || self.height() == 0 {
            return;
        }

        let (x_min, x_max) = bounds(finite.iter().map(|p| p.0));
        let (y_min, y_max) = bounds(finite.iter().map(|p| p.1));

        let w = (self.width() - 1) as f64;
        let h = (self.height() - 1) as f64;
        let scale = |v: f64, min: f64, max: f64, extent: f64| {
            let t = if max > min { (v - min) / (max - min) } else { 0.5 };
            extent * (PLOT_MARGIN + t * (1.0 - 2.0 * PLOT_MARGIN))
        };

        let pixels: Vec<(i32, i32)> = finite
            .iter()
            .map(|&(x, y)| {
                let px = scale(x, x_min, x_max, w).round() as i32;
                let py = (h - scale(y, y_min, y_max, h)).round() as i32;
                (px, py)
            })
            .collect();

        self.draw_polyline(&pixels, color);
    }

    /// Pixels as interleaved RGBA bytes
    pub fn rgba_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Pixels as interleaved RGB bytes, alpha dropped
    pub fn rgb_bytes(&self) -> Vec<u8> {
        DynamicImage::ImageRgba8(self.image.clone()).into_rgb8().into_raw()
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

impl Figure for RasterFigure {
    fn save(&self, path: &Path, metadata: &FigureMetadata) -> Result<(), FigureError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(FigureError::InvalidDimensions {
                width: self.width(),
                height: self.height(),
            });
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "png" => png_writer::write(self, path, metadata),
            "pdf" => pdf_writer::write(self, path, metadata),
            _ => Err(FigureError::UnsupportedFormat(extension)),
        }
    }
}
