//! RGBA pixel buffer backing the raster surface.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::PixelRect;

/// Row-major RGBA framebuffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    /// Create a new framebuffer cleared to transparent black.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use axplot::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).expect("non-zero size");
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width as usize) * (height as usize)],
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Full-surface rectangle (inclusive edges).
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width as i32 - 1, self.height as i32 - 1)
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, edges inclusive. Parts outside the buffer are ignored.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let left = rect.left.max(0);
        let top = rect.top.max(0);
        let right = rect.right.min(self.width as i32 - 1);
        let bottom = rect.bottom.min(self.height as i32 - 1);

        if left > right || top > bottom {
            return;
        }

        for y in top..=bottom {
            let start = self.index(left as u32, y as u32);
            let end = self.index(right as u32, y as u32);
            self.pixels[start..=end].fill(color);
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Blend a color over the pixel using "over" compositing.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.index(x, y);
        let dst = self.pixels[idx];
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(dst.a) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        if out_a > 0.0 {
            let blend = |src: u8, dst: u8| -> u8 {
                let src_f = f32::from(src) / 255.0;
                let dst_f = f32::from(dst) / 255.0;
                let out = (src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a;
                (out * 255.0) as u8
            };

            self.pixels[idx] = Rgba::new(
                blend(color.r, dst.r),
                blend(color.g, dst.g),
                blend(color.b, dst.b),
                (out_a * 255.0) as u8,
            );
        }
    }

    /// Pixel data as tightly packed RGBA bytes, as image encoders expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
