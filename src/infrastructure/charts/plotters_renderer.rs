use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use plotters::prelude::*;

use crate::application::ports::{ChartRenderer, ChartRendererError};
use crate::domain::{ChartImage, ChartKind, DataPoint};

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;

/// Pie charts become unreadable beyond this many slices.
const MAX_PIE_SLICES: usize = 6;

/// Series drawn when a placeholder plot has no data of its own.
const PLACEHOLDER_SERIES: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 4.0, 5.0];

const BAR_COLOR: RGBColor = RGBColor(0x3b, 0x82, 0xf6);

const PIE_COLORS: [RGBColor; 6] = [
    RGBColor(0x3b, 0x82, 0xf6),
    RGBColor(0xef, 0x44, 0x44),
    RGBColor(0x22, 0xc5, 0x5e),
    RGBColor(0xf5, 0x9e, 0x0b),
    RGBColor(0x8b, 0x5c, 0xf6),
    RGBColor(0x14, 0xb8, 0xa6),
];

/// Which chart kinds are attempted for a given data point count.
pub fn planned_kinds(point_count: usize) -> Vec<ChartKind> {
    if point_count < 2 {
        Vec::new()
    } else if point_count <= MAX_PIE_SLICES {
        vec![ChartKind::Bar, ChartKind::Pie]
    } else {
        vec![ChartKind::Bar]
    }
}

/// Chart rasterization backed by plotters: bar and pie charts from report
/// data points, plus the generic placeholder line plot the synthesizer
/// falls back to. Rendering is CPU-bound and runs on the blocking pool.
#[derive(Default)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChartRenderer for PlottersRenderer {
    #[tracing::instrument(skip_all, fields(point_count = data_points.len()))]
    async fn render(
        &self,
        data_points: &[DataPoint],
    ) -> Result<Vec<ChartImage>, ChartRendererError> {
        let kinds = planned_kinds(data_points.len());
        if kinds.is_empty() {
            tracing::warn!("Not enough data points for charts");
            return Ok(Vec::new());
        }

        let points = data_points.to_vec();
        let charts = tokio::task::spawn_blocking(move || {
            let mut charts = Vec::new();
            for kind in kinds {
                // Each attempt is independent; one failure never aborts
                // the others.
                let rendered = match kind {
                    ChartKind::Bar => render_bar(&points),
                    ChartKind::Pie => render_pie(&points),
                };
                match rendered {
                    Ok(png) => charts.push(ChartImage::new(kind, BASE64.encode(png))),
                    Err(e) => tracing::error!(?kind, error = %e, "Chart rendering error"),
                }
            }
            charts
        })
        .await
        .map_err(|e| ChartRendererError::RenderFailed(format!("task join error: {e}")))?;

        Ok(charts)
    }

    #[tracing::instrument(skip(self))]
    async fn render_placeholder(&self, title: &str) -> Result<String, ChartRendererError> {
        let title = title.to_string();
        let png = tokio::task::spawn_blocking(move || render_line(&title, &PLACEHOLDER_SERIES))
            .await
            .map_err(|e| ChartRendererError::RenderFailed(format!("task join error: {e}")))??;

        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }
}

fn render_bar(points: &[DataPoint]) -> Result<Vec<u8>, ChartRendererError> {
    check_finite(points)?;

    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let max = points
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max)
            .max(0.0);
        let y_top = if max > 0.0 { max * 1.1 } else { 1.0 };
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(ChartKind::Bar.title(), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0usize..points.len(), 0f64..y_top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(points.len())
            .x_label_formatter(&|i: &usize| {
                labels.get(*i).map(|s| s.to_string()).unwrap_or_default()
            })
            .x_desc("Categories")
            .y_desc("Values")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(points.iter().enumerate().map(|(i, p)| {
                Rectangle::new([(i, 0.0), (i + 1, p.value.max(0.0))], BAR_COLOR.filled())
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    encode_png(&buf)
}

fn render_pie(points: &[DataPoint]) -> Result<Vec<u8>, ChartRendererError> {
    check_finite(points)?;
    if points.iter().any(|p| p.value <= 0.0) {
        return Err(ChartRendererError::RenderFailed(
            "pie chart requires strictly positive values".to_string(),
        ));
    }

    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root
            .titled(ChartKind::Pie.title(), ("sans-serif", 24))
            .map_err(draw_err)?;

        let center = ((CHART_WIDTH / 2) as i32, (CHART_HEIGHT / 2) as i32);
        let radius = (CHART_HEIGHT as f64) * 0.35;
        let sizes: Vec<f64> = points.iter().map(|p| p.value).collect();
        let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
        let colors: Vec<RGBColor> = (0..points.len())
            .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
        root.draw(&pie).map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    encode_png(&buf)
}

fn render_line(title: &str, series: &[f64]) -> Result<Vec<u8>, ChartRendererError> {
    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let y_top = if max > 0.0 { max * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0usize..series.len().saturating_sub(1), 0f64..y_top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("X-axis")
            .y_desc("Y-axis")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(
                series.iter().enumerate().map(|(i, v)| (i, *v)),
                &BAR_COLOR,
            ))
            .map_err(draw_err)?;

        chart
            .draw_series(
                series
                    .iter()
                    .enumerate()
                    .map(|(i, v)| Circle::new((i, *v), 3, BAR_COLOR.filled())),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    encode_png(&buf)
}

fn check_finite(points: &[DataPoint]) -> Result<(), ChartRendererError> {
    if let Some(bad) = points.iter().find(|p| !p.value.is_finite()) {
        return Err(ChartRendererError::RenderFailed(format!(
            "non-finite value for label {:?}",
            bad.label
        )));
    }
    Ok(())
}

fn encode_png(rgb: &[u8]) -> Result<Vec<u8>, ChartRendererError> {
    let img = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, rgb.to_vec())
        .ok_or_else(|| ChartRendererError::EncodingFailed("buffer size mismatch".to_string()))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageOutputFormat::Png,
        )
        .map_err(|e| ChartRendererError::EncodingFailed(e.to_string()))?;

    Ok(png)
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartRendererError {
    ChartRendererError::RenderFailed(e.to_string())
}
