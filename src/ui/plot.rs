use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Polygon};

use crate::climate::reshape::StackedBand;
use crate::color::ColorMap;
use crate::data::series::MetricSeries;

const CHART_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Metric line chart
// ---------------------------------------------------------------------------

/// Draw one metric against year.
pub fn metric_chart(ui: &mut Ui, id: &str, series: &MetricSeries, color: Color32) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("year")
        .y_axis_label(series.column.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = series.points.iter().copied().collect();
            plot_ui.line(Line::new(points).name(series.column.as_str()).color(color).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Climate composition stacked-area chart
// ---------------------------------------------------------------------------

/// Draw the climate bands stacked on top of each other.
///
/// Each band is filled year-to-year with quadrilaterals, since the plot only
/// fills convex polygons; the upper edge is drawn as a line under the same
/// legend name.
pub fn climate_area_chart(ui: &mut Ui, bands: &[StackedBand], colors: &ColorMap) {
    Plot::new("climate_area")
        .height(CHART_HEIGHT * 1.5)
        .legend(Legend::default())
        .x_axis_label("year")
        .y_axis_label("fraction")
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for band in bands {
                let name = format!("{} ({})", band.label, band.code);
                let color = colors.color_for(&band.code);
                let fill = color.gamma_multiply(0.6);

                for pair in band.points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    let (xa, xb) = (a.year as f64, b.year as f64);
                    let quad = vec![[xa, a.lower], [xb, b.lower], [xb, b.upper], [xa, a.upper]];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(quad))
                            .name(&name)
                            .fill_color(fill)
                            .stroke(Stroke::NONE),
                    );
                }

                let edge: PlotPoints = band
                    .points
                    .iter()
                    .map(|p| [p.year as f64, p.upper])
                    .collect();
                plot_ui.line(Line::new(edge).name(&name).color(color).width(1.5));
            }
        });
}
