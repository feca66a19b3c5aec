//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::color::Rgba;
use crate::error::Result;
use crate::figure::Figure;
use crate::framebuffer::Framebuffer;
use crate::render::Canvas;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::encode(fb, BufWriter::new(file))
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    /// Rasterize a figure on a white `width` x `height` framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn rasterize(figure: &mut Figure, width: u32, height: u32) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(Rgba::WHITE);
        figure.render(&mut Canvas::new(&mut fb), width, height);
        Ok(fb)
    }

    /// Rasterize a figure and write it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, file creation or encoding failure.
    pub fn write_figure<P: AsRef<Path>>(
        figure: &mut Figure,
        width: u32,
        height: u32,
        path: P,
    ) -> Result<()> {
        let fb = Self::rasterize(figure, width, height)?;
        Self::write_to_file(&fb, path)
    }

    fn encode<W: Write>(fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_to_bytes() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_rasterize_figure() {
        let mut figure = Figure::new();
        figure
            .new_box()
            .add_series(Series::copied(&[0.0, 1.0], &[1.0, 0.0]).unwrap(), 0)
            .unwrap();

        let fb = PngEncoder::rasterize(&mut figure, 200, 150).unwrap();
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::WHITE));
        assert!(PngEncoder::rasterize(&mut figure, 0, 150).is_err());
    }

    #[test]
    fn test_write_figure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        let mut figure = Figure::new();
        figure.new_box();

        PngEncoder::write_figure(&mut figure, 320, 240, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }
}
