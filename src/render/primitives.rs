//! Primitive rasterization.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::PixelRect;

// ============================================================================
// Clipping
// ============================================================================

/// Clip a segment against a rectangle (edges inclusive) with Liang-Barsky.
///
/// Returns the visible part rounded to pixels, or `None` when the segment
/// misses the rectangle entirely. Endpoints far outside `i16` range are fine;
/// the rasterizer only ever walks the clipped part.
#[must_use]
pub fn clip_segment(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    rect: PixelRect,
) -> Option<(i32, i32, i32, i32)> {
    if rect.left > rect.right || rect.top > rect.bottom {
        return None;
    }

    let (fx0, fy0) = (f64::from(x0), f64::from(y0));
    let dx = f64::from(x1) - fx0;
    let dy = f64::from(y1) - fy0;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let edges = [
        (-dx, fx0 - f64::from(rect.left)),
        (dx, f64::from(rect.right) - fx0),
        (-dy, fy0 - f64::from(rect.top)),
        (dy, f64::from(rect.bottom) - fy0),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    let clamp_x = |v: f64| (v.round() as i32).clamp(rect.left, rect.right);
    let clamp_y = |v: f64| (v.round() as i32).clamp(rect.top, rect.bottom);

    Some((
        clamp_x(fx0 + t0 * dx),
        clamp_y(fy0 + t0 * dy),
        clamp_x(fx0 + t1 * dx),
        clamp_y(fy0 + t1 * dy),
    ))
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm, restricted to `clip`.
///
/// The segment is clipped first, so arbitrarily distant endpoints cost no
/// more than the visible part.
pub fn draw_line(
    fb: &mut Framebuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba,
    clip: PixelRect,
) {
    let Some((x0, y0, x1, y1)) = clip_segment(x0, y0, x1, y1, clip) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        plot(fb, x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    if color.a == 255 {
        fb.set_pixel(x as u32, y as u32, color);
    } else {
        fb.blend_pixel(x as u32, y as u32, color);
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw the four edges of `rect` (inclusive), restricted to `clip`.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: PixelRect, color: Rgba, clip: PixelRect) {
    let PixelRect {
        left,
        top,
        right,
        bottom,
    } = rect;
    draw_line(fb, left, top, right, top, color, clip);
    draw_line(fb, right, top, right, bottom, color, clip);
    draw_line(fb, right, bottom, left, bottom, color, clip);
    draw_line(fb, left, bottom, left, top, color, clip);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_fb() -> Framebuffer {
        let mut fb = Framebuffer::new(100, 100).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = canvas_fb();
        let clip = fb.bounds();

        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK, clip);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_vertical() {
        let mut fb = canvas_fb();
        let clip = fb.bounds();

        draw_line(&mut fb, 50, 10, 50, 90, Rgba::BLACK, clip);

        assert_eq!(fb.get_pixel(50, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 90), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = canvas_fb();
        let clip = fb.bounds();

        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK, clip);

        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 90), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_respects_clip() {
        let mut fb = canvas_fb();

        draw_line(&mut fb, 0, 50, 99, 50, Rgba::BLACK, PixelRect::new(20, 0, 40, 99));

        assert_eq!(fb.get_pixel(19, 50), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(20, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(40, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(41, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_line_far_out_of_bounds() {
        let mut fb = canvas_fb();
        let clip = fb.bounds();

        draw_line(&mut fb, i32::MIN / 2, 50, i32::MAX / 2, 50, Rgba::BLACK, clip);

        assert_eq!(fb.get_pixel(0, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(99, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_clip_segment_miss() {
        let rect = PixelRect::new(0, 0, 10, 10);
        assert_eq!(clip_segment(20, 0, 30, 10, rect), None);
        assert_eq!(clip_segment(-5, 20, 15, 20, rect), None);
    }

    #[test]
    fn test_clip_segment_inside_untouched() {
        let rect = PixelRect::new(0, 0, 10, 10);
        assert_eq!(clip_segment(1, 2, 8, 9, rect), Some((1, 2, 8, 9)));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = canvas_fb();
        let clip = fb.bounds();

        draw_rect_outline(&mut fb, PixelRect::new(10, 10, 40, 30), Rgba::RED, clip);

        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(40, 30), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(25, 10), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(10, 20), Some(Rgba::RED));
        // Interior untouched
        assert_eq!(fb.get_pixel(25, 20), Some(Rgba::WHITE));
    }
}
