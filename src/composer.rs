//! Arrangement of one, two or many Y rulers around a plot box.
//!
//! A single ruler sits on the left edge. A second ruler goes to the right
//! edge. Every further ruler is stacked to the left of the box, which shrinks
//! its effective area to make room for them.

use crate::color::{palette_color, Rgba};
use crate::geometry::NormalizedPosition;
use crate::ruler::{Ruler, RulerLocation};

/// Y ruler arrangement, chosen from the ruler count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// One Y ruler on the left.
    Single,
    /// Left and right Y rulers.
    Dual,
    /// Left and right rulers plus extra rulers stacked left of the box.
    Stacked,
}

impl Topology {
    /// Topology for `count` Y rulers.
    #[must_use]
    pub const fn for_ruler_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Single,
            2 => Self::Dual,
            _ => Self::Stacked,
        }
    }
}

/// Color a ruler is drawn with.
///
/// An explicit color always wins. Otherwise a lone ruler is black and, once
/// there are two or more, ruler `index` takes the palette entry of the same
/// index so it matches the first series plotted against it.
#[must_use]
pub fn ruler_color(explicit: Option<Rgba>, index: usize, count: usize) -> Rgba {
    match explicit {
        Some(color) => color,
        None if count < 2 => Rgba::BLACK,
        None => palette_color(index),
    }
}

/// Default color for the next uncolored series on a ruler.
#[must_use]
pub const fn series_color(count_on_ruler: usize, ruler_index: usize) -> Rgba {
    palette_color(count_on_ruler + ruler_index)
}

/// Location given to a newly created Y ruler.
#[must_use]
pub const fn default_location(index: usize) -> RulerLocation {
    if index == 1 {
        RulerLocation::End
    } else {
        RulerLocation::Start
    }
}

/// Position the box actually occupies once stacked rulers took their room.
#[must_use]
pub fn effective_position(outer: NormalizedPosition, count: usize, spacing: f64) -> NormalizedPosition {
    let extra = count.saturating_sub(2) as f64;
    if extra == 0.0 {
        return outer;
    }
    NormalizedPosition::new(
        outer.x + spacing * extra,
        outer.y,
        outer.width - spacing * extra,
        outer.height,
    )
}

/// Pixel X of stacked ruler `index` (2 or more) left of the box.
#[must_use]
pub fn stacked_placement(box_left: i32, parent_w: u32, spacing: f64, index: usize) -> i32 {
    let steps = index.saturating_sub(1) as f64;
    box_left - (f64::from(parent_w) * spacing * steps) as i32
}

/// Place every ruler once their pixel ranges are known.
///
/// The X ruler resolves against the primary Y ruler, the first two Y rulers
/// resolve against the X ruler and the remaining ones are stacked.
pub fn arrange(x_ruler: &mut Ruler, y_rulers: &mut [Ruler], parent_w: u32, spacing: f64) {
    if let Some(primary) = y_rulers.first() {
        x_ruler.update_placement(primary);
    }
    let box_left = x_ruler.pixel_range().0;
    for (index, ruler) in y_rulers.iter_mut().enumerate() {
        if index < 2 {
            ruler.update_placement(x_ruler);
        } else {
            ruler.set_placement(stacked_placement(box_left, parent_w, spacing, index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_topology_by_count() {
        assert_eq!(Topology::for_ruler_count(1), Topology::Single);
        assert_eq!(Topology::for_ruler_count(2), Topology::Dual);
        assert_eq!(Topology::for_ruler_count(3), Topology::Stacked);
        assert_eq!(Topology::for_ruler_count(16), Topology::Stacked);
    }

    #[test]
    fn test_ruler_colors() {
        assert_eq!(ruler_color(None, 0, 1), Rgba::BLACK);
        assert_eq!(ruler_color(None, 0, 2), Rgba::BLUE);
        assert_eq!(ruler_color(None, 1, 2), Rgba::DARK_GREEN);
        assert_eq!(ruler_color(None, 2, 4), Rgba::RED);
        assert_eq!(ruler_color(None, 3, 4), Rgba::DARK_YELLOW);
        assert_eq!(ruler_color(Some(Rgba::WHITE), 3, 4), Rgba::WHITE);
    }

    #[test]
    fn test_series_color_offset_by_ruler() {
        assert_eq!(series_color(0, 0), Rgba::BLUE);
        assert_eq!(series_color(1, 0), Rgba::DARK_GREEN);
        assert_eq!(series_color(0, 1), Rgba::DARK_GREEN);
        assert_eq!(series_color(4, 2), Rgba::DARK_GREEN);
    }

    #[test]
    fn test_effective_position() {
        let outer = NormalizedPosition::new(0.13, 0.11, 0.775, 0.815);
        assert_eq!(effective_position(outer, 1, 0.12), outer);
        assert_eq!(effective_position(outer, 2, 0.12), outer);

        let inner = effective_position(outer, 4, 0.12);
        assert_relative_eq!(inner.x, 0.13 + 0.24, epsilon = 1e-12);
        assert_relative_eq!(inner.width, 0.775 - 0.24, epsilon = 1e-12);
        assert_eq!(inner.y, outer.y);
        assert_eq!(inner.height, outer.height);
    }

    #[test]
    fn test_stacked_placement() {
        assert_eq!(stacked_placement(296, 800, 0.12, 2), 296 - 96);
        assert_eq!(stacked_placement(296, 800, 0.12, 3), 296 - 192);
    }

    #[test]
    fn test_arrange() {
        let mut x = Ruler::horizontal();
        x.set_pixel_range(296, 724);
        let mut ys: Vec<Ruler> = (0..4)
            .map(|i| {
                let mut r = Ruler::vertical();
                r.set_location(default_location(i));
                r.set_pixel_range(534, 45);
                r
            })
            .collect();

        arrange(&mut x, &mut ys, 800, 0.12);

        assert_eq!(x.placement(), 534);
        assert_eq!(ys[0].placement(), 296);
        assert_eq!(ys[1].placement(), 724);
        assert_eq!(ys[2].placement(), 200);
        assert_eq!(ys[3].placement(), 104);
    }
}
