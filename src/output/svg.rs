//! Vector SVG surface.
//!
//! Records primitives as [`SvgElement`]s while a figure renders and writes
//! them out as a standalone SVG document. Clip rectangles become
//! `<clipPath>` groups, so series stay inside their box in any viewer.

use crate::color::Rgba;
use crate::error::Result;
use crate::figure::Figure;
use crate::geometry::PixelRect;
use crate::render::{Surface, TextAnchor, TextMetrics, TextOrientation};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Default font size in pixels.
const FONT_SIZE: f32 = 10.0;

/// A recorded SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Line segment
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Rectangle, filled or outlined
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
    },
    /// Text with its baseline at `y`
    Text {
        x: i32,
        y: i32,
        text: String,
        fill: Rgba,
        anchor: TextAnchor,
        orientation: TextOrientation,
    },
    /// Opens a group clipped to `rect`
    ClipStart { id: usize, rect: PixelRect },
    /// Closes the innermost clip group
    ClipEnd,
}

/// [`Surface`] recording vector elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    font_size: f32,
    elements: Vec<SvgElement>,
    clip_open: bool,
    next_clip_id: usize,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgSurface {
    /// Create an empty surface with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            font_size: FONT_SIZE,
            elements: Vec::new(),
            clip_open: false,
            next_clip_id: 0,
        }
    }

    /// Render a whole figure onto a fresh surface.
    pub fn from_figure(figure: &mut Figure, width: u32, height: u32) -> Self {
        let mut surface = Self::new(width, height);
        figure.render(&mut surface, width, height);
        surface
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Set the font size used for text and measurement.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size.max(1.0);
        self
    }

    /// Recorded elements in drawing order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to an SVG document string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(64 * self.elements.len() + 256);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        let mut open_groups = 0usize;
        for element in &self.elements {
            match element {
                SvgElement::ClipStart { .. } => open_groups += 1,
                SvgElement::ClipEnd => open_groups = open_groups.saturating_sub(1),
                _ => {}
            }
            let _ = writeln!(svg, "  {}", element_to_svg(element, self.font_size));
        }
        for _ in 0..open_groups {
            svg.push_str("  </g>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba, width: f32) {
        self.elements.push(SvgElement::Line {
            x1: x0,
            y1: y0,
            x2: x1,
            y2: y1,
            stroke: color,
            stroke_width: width,
        });
    }

    fn draw_rect(&mut self, rect: PixelRect, color: Rgba) {
        self.elements.push(SvgElement::Rect {
            x: rect.left,
            y: rect.top,
            width: rect.width(),
            height: rect.height(),
            fill: None,
            stroke: Some(color),
        });
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        // Inclusive edges cover one extra pixel in each direction.
        self.elements.push(SvgElement::Rect {
            x: rect.left,
            y: rect.top,
            width: rect.width() + 1,
            height: rect.height() + 1,
            fill: Some(color),
            stroke: None,
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba,
        anchor: TextAnchor,
        orientation: TextOrientation,
    ) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            fill: color,
            anchor,
            orientation,
        });
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        let advance = (self.font_size * 0.6).round() as i32;
        TextMetrics {
            width: text.chars().count() as i32 * advance,
            ascent: (self.font_size * 0.9).round() as i32,
            descent: (self.font_size * 0.2).round() as i32,
        }
    }

    fn set_clip(&mut self, clip: Option<PixelRect>) {
        if self.clip_open {
            self.elements.push(SvgElement::ClipEnd);
            self.clip_open = false;
        }
        if let Some(rect) = clip {
            self.elements.push(SvgElement::ClipStart {
                id: self.next_clip_id,
                rect,
            });
            self.next_clip_id += 1;
            self.clip_open = true;
        }
    }
}

/// Escape text content for XML.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement, font_size: f32) -> String {
    match element {
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
            stroke.to_css()
        ),
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="1""#, s.to_css()))
                .unwrap_or_default();
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{fill_attr}"{stroke_attr}/>"#
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            fill,
            anchor,
            orientation,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = match orientation {
                TextOrientation::Horizontal => String::new(),
                TextOrientation::Vertical => format!(r#" transform="rotate(-90 {x} {y})""#),
            };
            format!(
                r#"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}"{transform}>{}</text>"#,
                fill.to_css(),
                escape(text)
            )
        }
        SvgElement::ClipStart { id, rect } => format!(
            r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{id})">"#,
            rect.left,
            rect.top,
            rect.width() + 1,
            rect.height() + 1
        ),
        SvgElement::ClipEnd => "</g>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    #[test]
    fn test_empty_document() {
        let svg = SvgSurface::new(100, 50).render();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="100""#));
        assert!(svg.contains(r#"fill="rgb(255,255,255)""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_transparent_background() {
        let svg = SvgSurface::new(10, 10).background(None).render();
        assert!(!svg.contains("100%"));
    }

    #[test]
    fn test_clip_groups_balanced() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_clip(Some(PixelRect::new(10, 10, 50, 50)));
        surface.draw_line(0, 0, 100, 100, Rgba::BLUE, 1.0);
        surface.set_clip(Some(PixelRect::new(60, 60, 90, 90)));
        surface.set_clip(None);

        assert_eq!(
            surface.elements().first(),
            Some(&SvgElement::ClipStart {
                id: 0,
                rect: PixelRect::new(10, 10, 50, 50)
            })
        );
        let svg = surface.render();
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.contains(r#"clip-path="url(#clip1)""#));
    }

    #[test]
    fn test_unclosed_clip_is_closed_on_render() {
        let mut surface = SvgSurface::new(100, 100);
        surface.set_clip(Some(PixelRect::new(0, 0, 10, 10)));
        let svg = surface.render();
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn test_text_escaped_and_rotated() {
        let mut surface = SvgSurface::new(100, 100);
        surface.draw_text(
            "a<b & c",
            20,
            50,
            Rgba::BLACK,
            TextAnchor::Middle,
            TextOrientation::Vertical,
        );
        let svg = surface.render();
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(svg.contains(r#"transform="rotate(-90 20 50)""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_measure_text_scales_with_font() {
        let small = SvgSurface::new(10, 10);
        let large = SvgSurface::new(10, 10).font_size(20.0);
        assert_eq!(small.measure_text("12").width, 12);
        assert_eq!(large.measure_text("12").width, 24);
        assert_eq!(small.measure_text("x").ascent, 9);
    }

    #[test]
    fn test_figure_document() {
        let mut figure = Figure::new();
        let plot = figure.new_box();
        plot.add_series(Series::copied(&[0.0, 5.0, 10.0], &[1.0, 3.0, 2.0]).unwrap(), 0)
            .unwrap();
        plot.x_label("time");

        let svg = SvgSurface::from_figure(&mut figure, 800, 600).render();
        // Series color and box outline both appear.
        assert!(svg.contains(r#"stroke="rgb(0,0,255)""#));
        assert!(svg.contains(r#"stroke="rgb(192,192,192)""#));
        assert!(svg.contains(">time</text>"));
        assert!(svg.contains(">10</text>"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        SvgSurface::new(10, 10).write_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
    }
}
