//! PNG charts of the Redfin price history.
//!
//! Captions, axis labels and legends use DejaVu Sans, bundled under
//! `assets/fonts` and registered as the `sans-serif` family.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::timeseries::utility::format_dollars;
use crate::timeseries::{AnalysisRow, PriceSeries, RegionSeries};

pub const TRENDS_FILE: &str = "median_sale_price_trends.png";
pub const SUMMARY_FILE: &str = "price_and_growth_summary.png";

/// Regions highlighted at each end of the latest-price ordering.
const HIGHLIGHT_COUNT: usize = 5;

const BACKGROUND: RGBColor = RGBColor(0xf8, 0xf9, 0xfa);
const MUTED: RGBColor = RGBColor(0x80, 0x80, 0x80);
const BAR: RGBColor = RGBColor(0x4c, 0x72, 0xb0);

const FONT_FAMILY: &str = "sans-serif";
static FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Makes the bundled font available to every chart drawn afterwards.
pub fn register_font() -> Result<()> {
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT)
        .map_err(|_| anyhow!("bundled chart font could not be loaded"))
}

/// Renders both charts into `output_dir`, returning the written paths.
pub fn render_all(
    series: &PriceSeries,
    rows: &[AnalysisRow],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let trends = output_dir.join(TRENDS_FILE);
    plot_trends(series, &trends)?;

    let summary = output_dir.join(SUMMARY_FILE);
    plot_summary(rows, &summary)?;

    Ok(vec![trends, summary])
}

/// Indices of the regions with the highest and lowest latest prices,
/// highest first, without duplicates.
pub fn highlighted(series: &PriceSeries) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = series
        .regions
        .iter()
        .enumerate()
        .filter_map(|(i, r)| Some((i, r.latest()?)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let top = ranked.iter().take(HIGHLIGHT_COUNT);
    let bottom = ranked.iter().rev().take(HIGHLIGHT_COUNT);

    let mut picked = Vec::new();
    for (i, _) in top.chain(bottom) {
        if !picked.contains(i) {
            picked.push(*i);
        }
    }
    picked
}

fn points(region: &RegionSeries) -> Vec<(usize, f64)> {
    region
        .prices
        .iter()
        .enumerate()
        .filter_map(|(i, p)| Some((i, (*p)?)))
        .collect()
}

/// Every region's price history, with the extremes drawn in colour.
pub fn plot_trends(series: &PriceSeries, path: &Path) -> Result<()> {
    register_font()?;
    let root = BitMapBackend::new(path, (2000, 1000)).into_drawing_area();
    root.fill(&BACKGROUND)?;

    let last_month = series.months.len().saturating_sub(1).max(1);
    let max_price = series
        .regions
        .iter()
        .flat_map(|r| r.prices.iter().flatten())
        .copied()
        .fold(0.0, f64::max);
    let y_top = if max_price > 0.0 { max_price * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Median Sale Price Trends: Top 5 and Bottom 5 States Highlighted",
            (FONT_FAMILY, 28),
        )
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(0..last_month, 0f64..y_top)?;

    let months = &series.months;
    chart
        .configure_mesh()
        .x_labels(12)
        .x_label_formatter(&|i: &usize| {
            months
                .get(*i)
                .map(|m| m.format("%b %Y").to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&|v: &f64| format!("${:.0}K", v / 1000.0))
        .x_desc("Date")
        .y_desc("Price ($)")
        .draw()?;

    let highlights = highlighted(series);

    for (idx, region) in series.regions.iter().enumerate() {
        if highlights.contains(&idx) {
            continue;
        }
        chart.draw_series(LineSeries::new(points(region), MUTED.mix(0.3).stroke_width(1)))?;
    }

    for (slot, &idx) in highlights.iter().enumerate() {
        let region = &series.regions[idx];
        let color = Palette99::pick(slot).mix(1.0);
        let label = format!(
            "{} ({})",
            region.region,
            region.latest().map(format_dollars).unwrap_or_default()
        );

        chart
            .draw_series(LineSeries::new(points(region), color.stroke_width(3)))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.9))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    info!(path = %path.display(), highlighted = highlights.len(), "Saved price trend chart");
    Ok(())
}

/// Latest price and year-over-year growth per region as two bar charts.
pub fn plot_summary(rows: &[AnalysisRow], path: &Path) -> Result<()> {
    register_font()?;
    let root = BitMapBackend::new(path, (1500, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically(600);

    let mut by_price: Vec<(&str, f64)> = rows
        .iter()
        .filter_map(|r| Some((r.state.as_str(), r.latest_price?)))
        .collect();
    by_price.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut by_growth: Vec<(&str, f64)> = rows
        .iter()
        .filter_map(|r| Some((r.state.as_str(), r.yoy_growth?)))
        .collect();
    by_growth.sort_by(|a, b| b.1.total_cmp(&a.1));

    draw_bars(
        &upper,
        "Latest Median Sale Price by State",
        "Price ($)",
        &by_price,
        &|v: &f64| format!("${:.0}K", v / 1000.0),
    )?;
    draw_bars(
        &lower,
        "Year-over-Year Growth Rate by State",
        "Growth Rate (%)",
        &by_growth,
        &|v: &f64| format!("{:.1}%", v),
    )?;

    root.present()?;
    info!(path = %path.display(), regions = rows.len(), "Saved price and growth chart");
    Ok(())
}

fn draw_bars(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    y_desc: &str,
    bars: &[(&str, f64)],
    y_format: &dyn Fn(&f64) -> String,
) -> Result<()> {
    let count = bars.len().max(1);
    let low = bars.iter().map(|b| b.1).fold(0.0, f64::min);
    let high = bars.iter().map(|b| b.1).fold(0.0, f64::max);
    let (low, high) = if high > low { (low, high) } else { (0.0, 1.0) };
    let pad = (high - low) * 0.05;
    let bottom = if low < 0.0 { low - pad } else { 0.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT_FAMILY, 22))
        .margin(15)
        .x_label_area_size(120)
        .y_label_area_size(80)
        .build_cartesian_2d((0..count).into_segmented(), bottom..high + pad)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => bars.get(*i).map(|b| b.0.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style((FONT_FAMILY, 12).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(y_format)
        .x_desc("State")
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
        let (from, to) = if *value >= 0.0 { (0.0, *value) } else { (*value, 0.0) };
        Rectangle::new(
            [(SegmentValue::Exact(i), from), (SegmentValue::Exact(i + 1), to)],
            BAR.filled(),
        )
    }))?;

    Ok(())
}
