use std::{error::Error, ops::Range, path::Path};

use plotters::{
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    prelude::*,
};
use tracing::info;

use crate::{
    config::Config,
    error::{PlotError, Result},
    figure::{star_outline, tick_label, DistributionGrid, Marker, Panel, Slot, TrendChart, TrendLine},
    stat::Violin,
};

pub trait Renderer {
    /// Draw every populated slot of the grid into `path`.
    ///
    /// Hidden slots stay blank. An existing file is overwritten.
    fn render_distributions(&mut self, grid: &DistributionGrid, path: &Path) -> Result<()>;

    /// Draw one line per variant into `path`.
    ///
    /// An existing file is overwritten.
    fn render_trend(&mut self, trend: &TrendChart, path: &Path) -> Result<()>;
}

// matplotlib's tab10, first three entries
const PALETTE: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

const VIOLIN_HALF_WIDTH: f64 = 0.25;
const MARKER_SIZE: i32 = 6;

const TITLE_FONT_SIZE: u32 = 24;
const PANEL_LABEL_FONT_SIZE: u32 = 14;
const PANEL_TICK_FONT_SIZE: u32 = 10;
const TREND_LABEL_FONT_SIZE: u32 = 20;
const TREND_TICK_FONT_SIZE: u32 = 13;

type PlotResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;
type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// draws png files through plotters' bitmap backend
#[derive(Debug, Clone)]
pub struct PngRenderer {
    compare_size: (u32, u32),
    overall_size: (u32, u32),
}

impl PngRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            compare_size: config.compare_size,
            overall_size: config.overall_size,
        }
    }
}

impl Renderer for PngRenderer {
    fn render_distributions(&mut self, grid: &DistributionGrid, path: &Path) -> Result<()> {
        draw_grid(grid, path, self.compare_size).map_err(|e| draw_error(path, e))?;

        info!(
            path = %path.display(),
            populated = grid.populated(),
            hidden = grid.hidden(),
            "wrote distribution grid"
        );
        Ok(())
    }

    fn render_trend(&mut self, trend: &TrendChart, path: &Path) -> Result<()> {
        draw_trend(trend, path, self.overall_size).map_err(|e| draw_error(path, e))?;

        info!(path = %path.display(), lines = trend.lines.len(), "wrote trend chart");
        Ok(())
    }
}

fn draw_error(path: &Path, source: Box<dyn Error + Send + Sync>) -> PlotError {
    PlotError::Draw {
        path: path.to_path_buf(),
        source,
    }
}

/// pad a (low, high) range by 5% each side, widening a degenerate one
fn padded(range: Option<(f64, f64)>) -> Range<f64> {
    let (low, high) = range.unwrap_or((0., 1.));
    let span = high - low;

    if span > 0. {
        (low - span * 0.05)..(high + span * 0.05)
    } else {
        let pad = if low == 0. { 1. } else { low.abs() * 0.1 };
        (low - pad)..(high + pad)
    }
}

fn draw_grid(grid: &DistributionGrid, path: &Path, size: (u32, u32)) -> PlotResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((grid.layout.rows, grid.layout.cols));
    for (slot, area) in grid.slots.iter().zip(areas.iter()) {
        if let Slot::Populated(i) = *slot {
            draw_panel(&grid.panels[i], area)?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_panel(panel: &Panel, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> PlotResult {
    let labels = panel.labels();
    let slots = labels.len();

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title(), ("sans-serif", TITLE_FONT_SIZE))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(slots as f64 - 0.5), padded(panel.y_range()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|x| tick_label(&labels, *x))
        .y_desc(panel.y_label())
        .label_style(("sans-serif", PANEL_TICK_FONT_SIZE))
        .axis_desc_style(("sans-serif", PANEL_LABEL_FONT_SIZE))
        .draw()?;

    for (i, (_, violin)) in panel.violins.iter().enumerate() {
        draw_violin(&mut chart, i as f64, violin)?;
    }

    Ok(())
}

fn draw_violin(chart: &mut Chart<'_, '_>, x: f64, violin: &Violin) -> PlotResult {
    let color = PALETTE[0];

    if violin.is_empty() {
        return Ok(());
    }

    if violin.coords.len() == 1 {
        // no spread, a bar at the single value
        let y = violin.coords[0];
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - VIOLIN_HALF_WIDTH, y), (x + VIOLIN_HALF_WIDTH, y)],
            color.stroke_width(2),
        )))?;
        return Ok(());
    }

    let scale = VIOLIN_HALF_WIDTH / violin.max_density();
    let edge = violin.coords.iter().zip(&violin.densities);

    let outline: Vec<(f64, f64)> = edge
        .clone()
        .map(|(&y, &d)| (x + d * scale, y))
        .chain(edge.rev().map(|(&y, &d)| (x - d * scale, y)))
        .collect();

    chart.draw_series(std::iter::once(Polygon::new(
        outline.clone(),
        color.mix(0.3).filled(),
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(outline, color.stroke_width(1))))?;

    if violin.median.is_finite() {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![
                (x - VIOLIN_HALF_WIDTH, violin.median),
                (x + VIOLIN_HALF_WIDTH, violin.median),
            ],
            color.stroke_width(2),
        )))?;
    }

    Ok(())
}

fn draw_trend(trend: &TrendChart, path: &Path, size: (u32, u32)) -> PlotResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let sizes = trend.sizes.len();

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(-0.25..(sizes as f64 - 0.75), padded(trend.y_range()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(sizes)
        .x_label_formatter(&|x| trend.tick_label(*x))
        .x_desc(TrendChart::X_LABEL)
        .y_desc(TrendChart::Y_LABEL)
        .label_style(("sans-serif", TREND_TICK_FONT_SIZE))
        .axis_desc_style(("sans-serif", TREND_LABEL_FONT_SIZE))
        .draw()?;

    for (i, line) in trend.lines.iter().enumerate() {
        draw_trend_line(&mut chart, line, PALETTE[i % PALETTE.len()])?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", TREND_LABEL_FONT_SIZE))
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_trend_line<'a>(chart: &mut Chart<'a, 'a>, line: &TrendLine, color: RGBColor) -> PlotResult {
    let segments = line.segments();

    for segment in &segments {
        chart.draw_series(LineSeries::new(segment.iter().copied(), color.stroke_width(2)))?;
    }

    let points: Vec<(f64, f64)> = segments.into_iter().flatten().collect();
    let label = line.label.clone();

    match line.marker {
        Marker::Circle => {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
                )?
                .label(label)
                .legend(move |(x, y)| Circle::new((x + 10, y), MARKER_SIZE, color.filled()));
        }
        Marker::Star => {
            // plotters has no star, so a polygon is pinned to each point
            chart
                .draw_series(points.iter().map(|&p| {
                    EmptyElement::at(p) + Polygon::new(star_outline(MARKER_SIZE + 2), color.filled())
                }))?
                .label(label)
                .legend(move |(x, y)| {
                    EmptyElement::at((x + 10, y))
                        + Polygon::new(star_outline(MARKER_SIZE + 2), color.filled())
                });
        }
        Marker::Triangle => {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&p| TriangleMarker::new(p, MARKER_SIZE, color.filled())),
                )?
                .label(label)
                .legend(move |(x, y)| {
                    TriangleMarker::new((x + 10, y), MARKER_SIZE, color.filled())
                });
        }
    }

    Ok(())
}
