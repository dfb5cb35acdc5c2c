//! Terminal rendering of the drawing patches of a world.
//!
//! Only outlines are drawn. Colors and layers are ignored.

use textplots::{Chart, Plot, Shape};

use crate::domain::{Bounds, Patch, World};

const MIN_WIDTH: u32 = 32;
const MIN_HEIGHT: u32 = 3;

/// Relative margin around the plotted bounds.
const MARGIN: f64 = 0.05;

/// Plots the outline of every entity in the world, `None` for a world without rooms.
pub fn plot_world(world: &World, width: u32, height: u32) -> Option<String> {
    world
        .bounds()
        .map(|bounds| plot_patches(&world.patches(), bounds, width, height))
}

pub fn plot_patches(patches: &[Patch], bounds: Bounds, width: u32, height: u32) -> String {
    let outlines = patches
        .iter()
        .map(|p| {
            p.polygon
                .ring()
                .into_iter()
                .map(<(f32, f32)>::from)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let margin = MARGIN * bounds.width().max(bounds.height());
    plot_line_chart(
        &outlines,
        bounds.expanded(margin),
        width.max(MIN_WIDTH),
        height.max(MIN_HEIGHT),
    )
}

pub fn plot_line_chart(
    lines: &[Vec<(f32, f32)>],
    bounds: Bounds,
    width: u32,
    height: u32,
) -> String {
    let mut chart = Chart::new_with_y_range(
        width,
        height,
        bounds.x_min() as f32,
        bounds.x_max() as f32,
        bounds.y_min() as f32,
        bounds.y_max() as f32,
    );
    let chart = chart.lineplot(&Shape::Lines(&[]));
    let lines = lines.iter().map(|l| Shape::Lines(l)).collect::<Vec<_>>();
    let chart = lines.iter().fold(chart, |c, l| c.lineplot(l));
    chart.figures();
    chart.to_string()
}
