//! Figure: the caller-held container of plot boxes.
//!
//! A figure owns free-standing boxes plus an optional grid and routes pointer
//! gestures to the box under the pointer. It never touches a window; the host
//! feeds it pixel positions and a [`Surface`] to draw on.

use crate::config::PlotConfig;
use crate::geometry::PixelPoint;
use crate::grid::Grid;
use crate::interaction;
use crate::plot_box::PlotBox;
use crate::render::Surface;

/// Plot boxes sharing one drawing area.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    config: PlotConfig,
    boxes: Vec<PlotBox>,
    grid: Option<Grid>,
}

impl Figure {
    /// An empty figure with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty figure whose new boxes, grid and gestures follow `config`.
    #[must_use]
    pub fn with_config(config: PlotConfig) -> Self {
        Self {
            config,
            boxes: Vec::new(),
            grid: None,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Add a free-standing box and return its index.
    pub fn add_box(&mut self, plot: PlotBox) -> usize {
        self.boxes.push(plot);
        self.boxes.len() - 1
    }

    /// Add a box configured from the figure's config and return it.
    pub fn new_box(&mut self) -> &mut PlotBox {
        let index = self.add_box(PlotBox::from_config(&self.config));
        &mut self.boxes[index]
    }

    /// Free-standing box by index.
    #[must_use]
    pub fn free_box(&self, index: usize) -> Option<&PlotBox> {
        self.boxes.get(index)
    }

    /// Mutable free-standing box by index.
    pub fn free_box_mut(&mut self, index: usize) -> Option<&mut PlotBox> {
        self.boxes.get_mut(index)
    }

    /// Replace the grid with a new `cols` x `rows` one.
    pub fn set_grid(&mut self, cols: usize, rows: usize) -> &mut Grid {
        self.grid.insert(Grid::with_config(cols, rows, &self.config))
    }

    /// The grid, if one was set.
    #[must_use]
    pub const fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Mutable grid, if one was set.
    pub fn grid_mut(&mut self) -> Option<&mut Grid> {
        self.grid.as_mut()
    }

    /// Every box: free-standing ones first, then the grid in row-major order.
    pub fn boxes(&self) -> impl Iterator<Item = &PlotBox> {
        self.boxes.iter().chain(self.grid.iter().flat_map(Grid::iter))
    }

    fn boxes_mut(&mut self) -> impl Iterator<Item = &mut PlotBox> {
        self.boxes
            .iter_mut()
            .chain(self.grid.iter_mut().flat_map(Grid::iter_mut))
    }

    /// First box whose laid-out rectangle contains the pixel.
    #[must_use]
    pub fn box_at(&self, x: i32, y: i32) -> Option<&PlotBox> {
        self.boxes().find(|b| b.contains_point(x, y))
    }

    /// Mutable variant of [`Figure::box_at`].
    pub fn box_at_mut(&mut self, x: i32, y: i32) -> Option<&mut PlotBox> {
        self.boxes_mut().find(|b| b.contains_point(x, y))
    }

    /// Drop every box and the grid.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.grid = None;
    }

    /// Lay out every box for a `width` x `height` area without drawing.
    pub fn layout(&mut self, width: u32, height: u32) {
        for plot in self.boxes_mut() {
            plot.layout(width, height);
        }
    }

    /// Lay out and draw every box.
    pub fn render(&mut self, surface: &mut dyn Surface, width: u32, height: u32) {
        for plot in self.boxes_mut() {
            plot.render(surface, width, height);
        }
    }

    // ========================================================================
    // Pointer gestures
    // ========================================================================

    /// Finish a zoom drag from `start` to `end`.
    ///
    /// The drag is clamped to the box under `start` and applied only when both
    /// sides exceed the configured minimum selection.
    pub fn drag_zoom(&mut self, start: PixelPoint, end: PixelPoint) -> bool {
        let min = self.config.min_selection;
        let Some(plot) = self.box_at_mut(start.x, start.y) else {
            return false;
        };
        let selection = interaction::clamp_selection(plot.pixel_rect(), start, end);
        if !interaction::is_zoom_selection(selection, min) {
            log::debug!("selection {selection:?} too small to zoom");
            return false;
        }
        plot.zoom_box(
            PixelPoint::new(selection.left, selection.top),
            PixelPoint::new(selection.right, selection.bottom),
        )
    }

    /// Pan the box under `at` by a drag of `(dx, dy)` pixels.
    pub fn drag_pan(&mut self, at: PixelPoint, dx: i32, dy: i32) -> bool {
        self.box_at_mut(at.x, at.y)
            .is_some_and(|plot| plot.pan(dx, dy))
    }

    /// Zoom the box under `at` for a wheel rotation; negative zooms in.
    pub fn wheel_zoom(&mut self, at: PixelPoint, rotation: i32) -> bool {
        let factor = interaction::wheel_factor(
            rotation,
            self.config.wheel_zoom_in,
            self.config.wheel_zoom_out,
        );
        self.box_at_mut(at.x, at.y)
            .is_some_and(|plot| plot.zoom_at(at, factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormalizedPosition;
    use crate::series::Series;
    use approx::assert_relative_eq;

    fn figure_with_box() -> Figure {
        let mut figure = Figure::new();
        figure.new_box().set_x_limits(0.0, 620.0);
        figure.layout(800, 600);
        figure
    }

    #[test]
    fn test_box_at() {
        let mut figure = Figure::new();
        let mut left = PlotBox::new();
        left.set_position(NormalizedPosition::new(0.0, 0.0, 0.5, 1.0));
        let mut right = PlotBox::new();
        right.set_position(NormalizedPosition::new(0.5, 0.0, 0.5, 1.0));
        figure.add_box(left);
        figure.add_box(right);
        figure.layout(800, 600);

        let hit = figure.box_at(600, 300).expect("right box should be hit");
        assert_eq!(hit.pixel_rect().left, 400);
        // Shared edge belongs to the first box.
        assert_eq!(figure.box_at(400, 300).map(|b| b.pixel_rect().left), Some(0));
        assert!(figure.box_at(900, 300).is_none());
    }

    #[test]
    fn test_grid_boxes_after_free_boxes() {
        let mut figure = Figure::new();
        figure.new_box();
        figure.set_grid(2, 2);
        assert_eq!(figure.boxes().count(), 5);
        figure.layout(800, 600);

        let grid_box = figure.grid().and_then(|g| g.get(1, 1)).unwrap();
        let rect = grid_box.pixel_rect();
        let hit = figure.box_at(rect.right, rect.bottom).unwrap();
        assert_eq!(hit.pixel_rect(), rect);

        figure.clear();
        assert_eq!(figure.boxes().count(), 0);
        assert!(figure.grid().is_none());
    }

    #[test]
    fn test_drag_zoom_clamped_to_box() {
        let mut figure = figure_with_box();
        // Drag past the right edge of the box.
        assert!(figure.drag_zoom(PixelPoint::new(414, 100), PixelPoint::new(790, 300)));
        let (x0, x1) = figure.free_box(0).unwrap().x_ruler().limits();
        assert_relative_eq!(x0, 310.0, epsilon = 1e-3);
        assert_relative_eq!(x1, 620.0, epsilon = 1e-3);
    }

    #[test]
    fn test_drag_zoom_small_selection_ignored() {
        let mut figure = figure_with_box();
        assert!(!figure.drag_zoom(PixelPoint::new(300, 300), PixelPoint::new(304, 400)));
        assert_eq!(figure.free_box(0).unwrap().x_ruler().limits(), (0.0, 620.0));
        assert!(!figure.drag_zoom(PixelPoint::new(5, 5), PixelPoint::new(400, 400)));
    }

    #[test]
    fn test_wheel_zoom() {
        let mut figure = figure_with_box();
        assert!(figure.wheel_zoom(PixelPoint::new(414, 290), -1));
        let (x0, x1) = figure.free_box(0).unwrap().x_ruler().limits();
        assert_relative_eq!(x1 - x0, 496.0, epsilon = 1e-2);

        assert!(!figure.wheel_zoom(PixelPoint::new(2, 2), 1));
    }

    #[test]
    fn test_gestures_follow_config() {
        let mut config = PlotConfig::new();
        config.wheel_zoom_in = 0.5;
        config.min_selection = 50;
        let mut figure = Figure::with_config(config);
        figure.new_box().set_x_limits(0.0, 620.0);
        figure.layout(800, 600);

        assert!(!figure.drag_zoom(PixelPoint::new(200, 100), PixelPoint::new(240, 400)));
        assert!(figure.wheel_zoom(PixelPoint::new(104, 290), -1));
        let (x0, x1) = figure.free_box(0).unwrap().x_ruler().limits();
        assert_relative_eq!(x0, 0.0, epsilon = 1e-3);
        assert_relative_eq!(x1, 310.0, epsilon = 1e-2);
    }

    #[test]
    fn test_drag_pan() {
        let mut figure = figure_with_box();
        assert!(figure.drag_pan(PixelPoint::new(300, 300), -62, 0));
        let (x0, _) = figure.free_box(0).unwrap().x_ruler().limits();
        assert_relative_eq!(x0, 62.0, epsilon = 1e-3);
    }

    #[test]
    fn test_with_config_applies_to_new_boxes() {
        let config = PlotConfig::new().tick_length(8);
        let mut figure = Figure::with_config(config);
        let plot = figure.new_box();
        plot.add_series(Series::copied(&[0.0, 1.0], &[0.0, 1.0]).unwrap(), 1)
            .unwrap();
        assert_eq!(plot.x_ruler().tick_length(), 8);
        assert_eq!(plot.y_ruler(1).map(|r| r.tick_length()), Some(8));
        assert_eq!(figure.config().tick_length, 8);
    }
}
