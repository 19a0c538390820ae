//! TPS chart rendering with peak annotations

use async_trait::async_trait;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

use crate::ChartConfig;
use tpsmon_common::{Period, Result, TpsError, TpsSeries};

/// Trait for rendering chart artifacts
#[async_trait]
pub trait ChartRenderer {
    /// Render a chart to an image file
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            let expanded: String = if hex.len() == 3 {
                hex.chars().flat_map(|c| [c, c]).collect()
            } else {
                hex.to_string()
            };
            if expanded.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&expanded[0..2], 16),
                    u8::from_str_radix(&expanded[2..4], 16),
                    u8::from_str_radix(&expanded[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }
}

/// Per-minute TPS chart for one date within a period.
///
/// Draws the mean and peak series as labeled lines and annotates the
/// global maximum of each at its first occurrence.
#[derive(Debug, Clone)]
pub struct TpsChart {
    pub series: TpsSeries,
    pub period: Period,
    pub date: NaiveDate,
}

impl TpsChart {
    pub fn new(series: TpsSeries, period: Period, date: NaiveDate) -> Self {
        Self {
            series,
            period,
            date,
        }
    }

    /// Chart title carrying the phase label, season, and target date
    fn title(&self) -> String {
        format!(
            "TPS Chart: {} ({}) on {}",
            self.period.phase, self.period.season, self.date
        )
    }

    /// Upper bound for the y axis with headroom above the tallest point
    fn y_max(&self) -> f64 {
        self.series
            .iter()
            .map(|b| f64::from(b.peak_tps).max(b.mean_tps))
            .fold(0.0, f64::max)
            * 1.1
    }
}

#[async_trait]
impl ChartRenderer for TpsChart {
    async fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()> {
        if self.series.is_empty() {
            return Err(TpsError::chart(format!(
                "no data to render for {} ({})",
                self.date, self.period.season
            )));
        }

        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&self.parse_color(&config.background_color))?;

        let minutes: Vec<_> = self.series.iter().map(|b| b.minute).collect();
        let max_x = (self.series.len().saturating_sub(1)).max(1) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                self.title(),
                (config.font_family.as_str(), config.title_font_size()),
            )
            .margin(config.margins.top)
            .x_label_area_size(config.margins.bottom)
            .y_label_area_size(config.margins.left)
            .build_cartesian_2d(0f64..max_x, 0f64..self.y_max())?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("TPS")
            .x_labels(10)
            .x_label_formatter(&|x| {
                let index = (x.round() as usize).min(minutes.len() - 1);
                minutes[index].format("%H:%M").to_string()
            })
            .label_style((config.font_family.as_str(), config.font_size))
            .draw()?;

        let mean_color = self.parse_color(&config.mean_color);
        let peak_color = self.parse_color(&config.peak_color);

        chart
            .draw_series(LineSeries::new(
                self.series
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (i as f64, b.mean_tps)),
                &mean_color,
            ))?
            .label("TPS Average")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], mean_color));

        chart
            .draw_series(LineSeries::new(
                self.series
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (i as f64, f64::from(b.peak_tps))),
                &peak_color,
            ))?
            .label("TPS Max")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], peak_color));

        // Annotate the global maximum of each series at its first occurrence
        let label_offset = max_x * 0.01;
        if let Some((index, top_avg)) = self.series.top_mean() {
            chart.draw_series(std::iter::once(Circle::new(
                (index as f64, top_avg),
                3,
                mean_color.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("Top AVG: {top_avg:.1}"),
                (index as f64 + label_offset, top_avg),
                (config.font_family.as_str(), config.font_size)
                    .into_font()
                    .color(&mean_color),
            )))?;
        }
        if let Some((index, top_max)) = self.series.top_peak() {
            chart.draw_series(std::iter::once(Circle::new(
                (index as f64, f64::from(top_max)),
                3,
                peak_color.filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("Top MAX: {top_max}"),
                (index as f64 + label_offset, f64::from(top_max)),
                (config.font_family.as_str(), config.font_size)
                    .into_font()
                    .color(&peak_color),
            )))?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        tracing::info!(path = %path.display(), "rendered TPS chart");
        Ok(())
    }
}
