//! End-to-end tests: figures with grids, multi-Y boxes and gestures rendered
//! to raster and vector output.
//!
//! Run: cargo test --test figure_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use axplot::composer::Topology;
use axplot::prelude::*;
use axplot::output::SvgElement;

fn line(x: &[f32], y: &[f32]) -> Series {
    Series::copied(x, y).expect("equal lengths should succeed")
}

// ============================================================================
// Multi-Y layout
// ============================================================================

#[test]
fn stacked_rulers_shrink_box_and_take_palette_colors() {
    let mut plot = PlotBox::new();
    plot.set_hold(true);
    for index in 0..4 {
        plot.add_series(line(&[0.0, 10.0], &[0.0, index as f32 + 1.0]), index)
            .expect("ruler index below limit should succeed");
    }
    assert_eq!(plot.topology(), Topology::Stacked);

    let mut fb = Framebuffer::new(800, 600).unwrap();
    fb.clear(Rgba::WHITE);
    plot.render(&mut Canvas::new(&mut fb), 800, 600);

    let rect = plot.pixel_rect();
    assert_eq!(rect.left, 296);
    assert_eq!(rect.right, 724);
    assert_eq!(plot.y_ruler(0).unwrap().placement(), 296);
    assert_eq!(plot.y_ruler(1).unwrap().placement(), 724);
    assert_eq!(plot.y_ruler(2).unwrap().placement(), 200);
    assert_eq!(plot.y_ruler(3).unwrap().placement(), 104);

    // Stacked ruler lines carry their palette color.
    assert_eq!(fb.get_pixel(200, 300), Some(Rgba::RED));
    assert_eq!(fb.get_pixel(104, 300), Some(Rgba::DARK_YELLOW));
    // Nothing is drawn between the stacked rulers.
    assert_eq!(fb.get_pixel(150, 300), Some(Rgba::WHITE));
}

#[test]
fn each_ruler_autoscales_to_its_own_series() {
    let mut plot = PlotBox::new();
    plot.set_hold(true);
    plot.add_series(line(&[0.0, 1.0, 2.0], &[1.0, 4.0, 9.0]), 0)
        .unwrap();
    plot.add_series(line(&[0.0, 1.0, 2.0], &[-100.0, 0.0, 300.0]), 1)
        .unwrap();
    plot.autoscale();

    assert_eq!(plot.x_ruler().limits(), (0.0, 2.0));
    assert_eq!(plot.y_ruler(0).unwrap().limits(), (1.0, 9.0));
    assert_eq!(plot.y_ruler(1).unwrap().limits(), (-100.0, 300.0));

    let colors: Vec<_> = plot.series().map(|(s, _)| s.color()).collect();
    assert_eq!(colors, vec![Some(Rgba::BLUE), Some(Rgba::DARK_GREEN)]);
}

#[test]
fn too_many_rulers_rejected() {
    let mut plot = PlotBox::new();
    let result = plot.add_series(line(&[0.0, 1.0], &[0.0, 1.0]), 16);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert_eq!(plot.series_count(), 0);
}

// ============================================================================
// Shared buffers
// ============================================================================

#[test]
fn referenced_series_sees_buffer_updates() {
    let x = shared(vec![0.0, 1.0, 2.0]);
    let y = shared(vec![0.0, 1.0, 2.0]);
    let mut plot = PlotBox::new();
    plot.add_series(
        Series::referenced(x.clone(), y.clone()).expect("equal lengths should succeed"),
        0,
    )
    .unwrap();
    assert_eq!(plot.y_ruler(0).unwrap().limits(), (0.0, 2.0));

    {
        let mut values = y.write().expect("lock should not be poisoned");
        values[1] = 50.0;
    }
    plot.autoscale();
    assert_eq!(plot.y_ruler(0).unwrap().limits(), (0.0, 50.0));
}

// ============================================================================
// Grid and figure gestures
// ============================================================================

#[test]
fn subplot_grid_boxes_are_addressable_and_rendered() {
    let mut figure = Figure::new();
    let grid = figure.set_grid(2, 2);
    grid.nth_mut(1)
        .unwrap()
        .add_series(line(&[0.0, 1.0], &[0.0, 1.0]), 0)
        .unwrap();
    grid.nth_mut(4)
        .unwrap()
        .add_series(line(&[0.0, 1.0], &[1.0, 0.0]), 0)
        .unwrap();
    assert!(grid.nth(5).is_err());

    figure.layout(800, 600);
    let grid = figure.grid().unwrap();
    let top_left = grid.get(0, 0).unwrap().pixel_rect();
    let bottom_right = grid.get(1, 1).unwrap().pixel_rect();
    assert!(top_left.right < bottom_right.left);
    assert!(top_left.bottom < bottom_right.top);

    let fb = PngEncoder::rasterize(&mut figure, 800, 600).unwrap();
    // Lower-left end of the first diagonal is drawn over the outline.
    assert_eq!(
        fb.get_pixel(top_left.left as u32, top_left.bottom as u32),
        Some(Rgba::BLUE)
    );
}

#[test]
fn gestures_reach_box_under_pointer() {
    let mut figure = Figure::new();
    figure.new_box().set_x_limits(0.0, 620.0);
    figure.layout(800, 600);

    assert!(figure.drag_pan(PixelPoint::new(400, 300), 62, 0));
    let (x0, x1) = figure.free_box(0).unwrap().x_ruler().limits();
    assert_relative_eq!(x0, -62.0, epsilon = 1e-3);
    assert_relative_eq!(x1, 558.0, epsilon = 1e-3);

    assert!(figure.wheel_zoom(PixelPoint::new(104, 300), 3));
    let (x0, x1) = figure.free_box(0).unwrap().x_ruler().limits();
    assert_relative_eq!(x0, -62.0, epsilon = 1e-2);
    assert_relative_eq!(x1 - x0, 775.0, epsilon = 1e-2);

    // Outside every box nothing happens.
    assert!(!figure.drag_pan(PixelPoint::new(10, 10), 5, 5));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn svg_output_clips_series_to_box() {
    let mut figure = Figure::new();
    let plot = figure.new_box();
    plot.set_hold(true);
    plot.add_series(line(&[0.0, 1.0], &[0.0, 1.0]), 0).unwrap();
    plot.add_series(line(&[0.0, 1.0], &[5.0, 6.0]), 1).unwrap();
    plot.autoscale();

    let surface = SvgSurface::from_figure(&mut figure, 800, 600);
    let clip = surface
        .elements()
        .iter()
        .find_map(|e| match e {
            SvgElement::ClipStart { rect, .. } => Some(*rect),
            _ => None,
        })
        .expect("series should be drawn inside a clip group");
    assert_eq!(clip, PixelRect::new(104, 45, 724, 534));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.svg");
    surface.write_to_file(&path).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains(r#"stroke="rgb(0,127,0)""#));
}

#[test]
fn png_file_written_for_figure() {
    let mut figure = Figure::new();
    figure
        .new_box()
        .add_series(line(&[0.0, 1.0, 2.0], &[3.0, 1.0, 2.0]), 0)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.png");
    PngEncoder::write_figure(&mut figure, 640, 480, &path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
