//! Per-pixel capture buffers and their conversion into samples.
//!
//! Two kinds of input are supported:
//! - [`DepthPixelFrame`]: a registered depth camera, one world coordinate,
//!   color and raw distance per pixel.
//! - [`RgbPixelFrame`]: a plain color camera. Pixel rows and columns span the
//!   x/y extent of the space and brightness stands in for depth, bright pixels
//!   sitting near.

use serde::{Deserialize, Serialize};

use slitscan_spacetime::{map_range, Bounds, Rgba, Vec3};

use crate::error::{CaptureError, Result};
use crate::frame::{CaptureFrame, Sample};
use crate::window::DepthWindow;

fn check_size(width: usize, height: usize, actual: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyFrame { width, height });
    }
    let expected = width * height;
    if expected != actual {
        return Err(CaptureError::PixelCountMismatch { expected, actual });
    }
    Ok(())
}

fn check_step(step: usize) -> Result<()> {
    if step == 0 {
        return Err(CaptureError::ZeroPixelStep);
    }
    Ok(())
}

/// One depth-camera pixel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthPixel {
    /// Registered world coordinate.
    pub world: Vec3,
    pub color: Rgba,
    /// Raw sensor distance; 0 means no reading.
    pub distance: f64,
}

/// Row-major depth-camera frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthPixelFrame {
    width: usize,
    height: usize,
    pixels: Vec<DepthPixel>,
}

impl DepthPixelFrame {
    pub fn new(width: usize, height: usize, pixels: Vec<DepthPixel>) -> Result<Self> {
        check_size(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, i: usize, j: usize) -> Option<&DepthPixel> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.pixels.get(j * self.width + i)
    }

    /// Pixels with a reading whose z lies inside `window`, visiting every
    /// `step`-th column of every `step`-th row.
    pub fn samples(&self, window: DepthWindow, step: usize) -> Result<CaptureFrame> {
        check_step(step)?;
        let mut frame = CaptureFrame::default();
        for j in (0..self.height).step_by(step) {
            for i in (0..self.width).step_by(step) {
                let px = &self.pixels[j * self.width + i];
                if px.distance > 0.0 && window.contains(px.world.z) {
                    frame.push(Sample::new(px.world, px.color));
                }
            }
        }
        log::trace!(
            "depth frame {}x{}: kept {} samples",
            self.width,
            self.height,
            frame.len()
        );
        Ok(frame)
    }
}

/// Depth span brightness is spread over: full brightness lands on `near`,
/// black on `far`. Not a filter; see [`DepthWindow`] for that.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrightnessRange {
    pub near: f64,
    pub far: f64,
}

impl BrightnessRange {
    pub const fn new(near: f64, far: f64) -> Self {
        Self { near, far }
    }
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self::new(1000.0, 2000.0)
    }
}

/// Maps color-camera pixels into the space: columns across `bounds.x`, rows
/// across `bounds.y`, brightness 255..0 onto `near..far`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrightnessProjection {
    pub bounds: Bounds,
    pub near: f64,
    pub far: f64,
}

impl BrightnessProjection {
    pub fn new(bounds: Bounds, range: BrightnessRange) -> Self {
        Self {
            bounds,
            near: range.near,
            far: range.far,
        }
    }

    pub fn project(&self, i: usize, j: usize, width: usize, height: usize, color: Rgba) -> Vec3 {
        Vec3::new(
            map_range(
                i as f64,
                0.0,
                width as f64,
                self.bounds.min.x,
                self.bounds.max.x,
                false,
            ),
            map_range(
                j as f64,
                0.0,
                height as f64,
                self.bounds.min.y,
                self.bounds.max.y,
                false,
            ),
            map_range(
                color.brightness() as f64,
                255.0,
                0.0,
                self.near,
                self.far,
                false,
            ),
        )
    }
}

impl Default for BrightnessProjection {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(
                Vec3::new(-400.0, -400.0, 400.0),
                Vec3::new(400.0, 400.0, 3000.0),
            ),
            near: BrightnessRange::default().near,
            far: BrightnessRange::default().far,
        }
    }
}

/// Row-major color-camera frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbPixelFrame {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl RgbPixelFrame {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        check_size(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap a tightly packed RGB8 buffer.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 3 != 0 {
            return Err(CaptureError::PixelCountMismatch {
                expected: width * height * 3,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgba::rgb(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self, i: usize, j: usize) -> Option<Rgba> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.pixels.get(j * self.width + i).copied()
    }

    /// Brightness-as-depth samples inside `window`.
    pub fn samples(
        &self,
        projection: &BrightnessProjection,
        window: DepthWindow,
        step: usize,
    ) -> Result<CaptureFrame> {
        check_step(step)?;
        let mut frame = CaptureFrame::default();
        for j in (0..self.height).step_by(step) {
            for i in (0..self.width).step_by(step) {
                let color = self.pixels[j * self.width + i];
                let p = projection.project(i, j, self.width, self.height, color);
                if window.contains(p.z) {
                    frame.push(Sample::new(p, color));
                }
            }
        }
        log::trace!(
            "rgb frame {}x{}: kept {} samples",
            self.width,
            self.height,
            frame.len()
        );
        Ok(frame)
    }
}
