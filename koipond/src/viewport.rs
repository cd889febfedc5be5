//! Window viewport state
//!
//! Tracks the logical window size and the device pixel ratio separately,
//! the way the windowing system reports them. The surface and offscreen
//! targets use the physical size; the camera projection uses the logical
//! aspect ratio (which equals the physical one).

use winit::dpi::PhysicalSize;

/// Logical window size plus device pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical width in points
    pub width: f32,
    /// Logical height in points
    pub height: f32,
    /// Physical pixels per logical point
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Build from a logical size and pixel ratio
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: pixel_ratio.max(0.1),
        }
    }

    /// Build from the physical size and scale factor winit reports
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let ratio = scale_factor as f32;
        Self::new(
            size.width as f32 / ratio,
            size.height as f32 / ratio,
            ratio,
        )
    }

    /// Surface width in physical pixels
    pub fn physical_width(&self) -> u32 {
        (self.width * self.pixel_ratio).round().max(1.0) as u32
    }

    /// Surface height in physical pixels
    pub fn physical_height(&self) -> u32 {
        (self.height * self.pixel_ratio).round().max(1.0) as u32
    }

    /// Camera aspect ratio (width over height)
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_applies_pixel_ratio_and_aspect() {
        let viewport = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.physical_width(), 1600);
        assert_eq!(viewport.physical_height(), 1200);
        assert_eq!(viewport.aspect(), 800.0 / 600.0);
    }

    #[test]
    fn physical_and_logical_aspect_agree() {
        let viewport = Viewport::from_physical(PhysicalSize::new(1600, 1200), 2.0);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 600.0);
        let physical_aspect =
            viewport.physical_width() as f32 / viewport.physical_height() as f32;
        assert!((viewport.aspect() - physical_aspect).abs() < 1e-6);
    }

    #[test]
    fn degenerate_sizes_clamp_to_one() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        assert_eq!(viewport.physical_width(), 1);
        assert_eq!(viewport.physical_height(), 1);
    }
}
