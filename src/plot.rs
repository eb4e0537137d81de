use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::color;
use crate::error::{AnalysisError, Result};
use crate::stats::{self, ModeAverages};

// ---------------------------------------------------------------------------
// Speedup bar chart
// ---------------------------------------------------------------------------

/// Output size in pixels: 5 × 4 inches at 150 dpi.
pub const CHART_SIZE: (u32, u32) = (750, 600);

const Y_DESC: &str = "Average time (ms)";
const FONT: &str = "sans-serif";

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    pub color_hex: &'static str,
}

/// Everything needed to draw the two-bar comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: [Bar; 2],
}

impl BarChart {
    /// Speculative bar first, then sequential, titled with the speedup.
    pub fn new(spec_ms: f64, seq_ms: f64) -> Self {
        let speedup = stats::speedup(seq_ms, spec_ms);
        BarChart {
            title: format!("Speedup = Tseq/Tspec = {speedup:.3}"),
            bars: [
                Bar {
                    label: "Speculative",
                    value: spec_ms,
                    color_hex: color::SPEC_HEX,
                },
                Bar {
                    label: "Sequential",
                    value: seq_ms,
                    color_hex: color::SEQ_HEX,
                },
            ],
        }
    }

    /// Upper bound of the y axis, leaving headroom for the value labels.
    fn y_max(&self) -> f64 {
        let top = self
            .bars
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        if top > 0.0 {
            top * 1.15
        } else {
            1.0
        }
    }
}

/// Render the spec-vs-seq chart to `out` when both modes are present.
///
/// Returns `Ok(false)` after printing a warning when either mode is missing;
/// nothing is written in that case.
pub fn plot_speedup(means: &ModeAverages, out: &Path) -> Result<bool> {
    let Some((spec_ms, seq_ms)) = stats::spec_and_seq(means) else {
        println!("Warning: data for both modes is incomplete, skipping chart.");
        return Ok(false);
    };

    render_png(&BarChart::new(spec_ms, seq_ms), out)?;
    info!("wrote {}x{} chart to {}", CHART_SIZE.0, CHART_SIZE.1, out.display());
    println!("Chart saved to: {}", out.display());
    Ok(true)
}

/// Draw into an in-memory RGB buffer, then encode it as PNG.
pub fn render_png(chart: &BarChart, out: &Path) -> Result<()> {
    let (width, height) = CHART_SIZE;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, CHART_SIZE).into_drawing_area();
        draw_bars(&root, chart)?;
        root.present().map_err(chart_error)?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| AnalysisError::Chart("pixel buffer has the wrong size".into()))?;
    image.save_with_format(out, image::ImageFormat::Png)?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &BarChart) -> Result<()> {
    root.fill(&WHITE).map_err(chart_error)?;

    let labels = chart.bars.clone().map(|b| b.label);
    let x_labels = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).copied().unwrap_or("").to_string(),
        _ => String::new(),
    };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..2u32).into_segmented(), 0f64..chart.y_max())
        .map_err(chart_error)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .y_desc(Y_DESC)
        .x_label_formatter(&x_labels)
        .draw()
        .map_err(chart_error)?;

    let mut rects = Vec::with_capacity(chart.bars.len());
    let mut texts = Vec::with_capacity(chart.bars.len());
    for (i, bar) in (0u32..).zip(chart.bars.iter()) {
        let fill = color::from_hex(bar.color_hex)?;
        let height = if bar.value.is_finite() { bar.value } else { 0.0 };

        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), height)],
            fill.filled(),
        );
        rect.set_margin(0, 0, 40, 40);
        rects.push(rect);

        let style = (FONT, 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        texts.push(Text::new(
            format!("{:.1}", bar.value),
            (SegmentValue::CenterOf(i), height),
            style,
        ));
    }

    ctx.draw_series(rects).map_err(chart_error)?;
    ctx.draw_series(texts).map_err(chart_error)?;
    Ok(())
}

fn chart_error<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}
