use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::series::{metric_series, METRICS};
use crate::data::summary::SUMMARY_ROWS;
use crate::state::{AppState, Page};
use crate::ui::{panels, plot};

const ROW_HEIGHT: f32 = 18.0;

/// Render whichever page the sidebar selected.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Home => home(ui, state),
            Page::Exploration => exploration(ui, state),
            Page::Models => models(ui),
        });
}

// ---------------------------------------------------------------------------
// Home: welcome, preview and summary
// ---------------------------------------------------------------------------

fn home(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🌍 E-TRACE Dashboard");
    ui.label(
        "Welcome to E-TRACE — European Tourism Regional Analysis & Climate Effects. \
         Load the merged regional dataset to explore tourism activity, population, GDP, \
         employment and climate-zone composition by NUTS-2 region.",
    );
    ui.separator();

    ui.heading("📁 Load Your Processed Dataset");
    let Some(table) = &state.table else {
        if ui.button("Upload the merged dataset (CSV/Parquet)…").clicked() {
            panels::open_file_dialog(state);
        }
        ui.label("Accepted formats: .csv, .tsv, .parquet");
        return;
    };

    ui.add_space(8.0);
    ui.strong("Preview of the data:");
    let preview = table.head(state.config.preview_rows);
    let header: Vec<&str> = table.column_names.iter().map(String::as_str).collect();
    let cells: Vec<Vec<String>> = preview
        .iter()
        .map(|row| {
            table
                .column_names
                .iter()
                .map(|col| row.get(col).to_string())
                .collect()
        })
        .collect();
    grid(ui, "preview", "", &header, &cells);

    ui.add_space(8.0);
    ui.strong("Dataset statistics:");
    let header: Vec<&str> = state.summary.iter().map(|s| s.column.as_str()).collect();
    let cells: Vec<Vec<String>> = SUMMARY_ROWS
        .iter()
        .map(|stat| {
            std::iter::once(stat.to_string())
                .chain(state.summary.iter().map(|s| s.cell(stat)))
                .collect()
        })
        .collect();
    grid(ui, "summary", "stat", &header, &cells);
}

/// A striped, horizontally scrollable table. A non-empty `index` adds a
/// leading label column whose values are the first cell of each row.
fn grid(ui: &mut Ui, id: &str, index: &str, header: &[&str], rows: &[Vec<String>]) {
    let n_cols = header.len() + usize::from(!index.is_empty());
    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal().id_salt(id).show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0), n_cols)
                .header(ROW_HEIGHT + 2.0, |mut head| {
                    if !index.is_empty() {
                        head.col(|ui: &mut Ui| {
                            ui.strong(index);
                        });
                    }
                    for name in header {
                        head.col(|ui: &mut Ui| {
                            ui.strong(*name);
                        });
                    }
                })
                .body(|mut body| {
                    for cells in rows {
                        body.row(ROW_HEIGHT, |mut row| {
                            for cell in cells {
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Exploration: region selector and charts
// ---------------------------------------------------------------------------

fn exploration(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Data Exploration");
    if state.table.is_none() {
        ui.label("Load a dataset first (File → Open…).");
        return;
    }

    panels::region_selector(ui, state);
    ui.separator();

    let (Some(table), Some(view)) = (&state.table, &state.region_view) else {
        return;
    };
    let view = match view {
        Ok(view) => view,
        Err(e) => {
            error_label(ui, &e.to_string());
            return;
        }
    };

    if view.slice.is_empty() {
        ui.label("No rows for this region.");
        return;
    }

    let metric_colors = ColorMap::new(METRICS.iter().map(|m| m.title));
    for metric in METRICS {
        ui.strong(metric.title);
        match metric_series(table, &view.slice, metric) {
            Ok(series) => plot::metric_chart(
                ui,
                metric.title,
                &series,
                metric_colors.color_for(metric.title),
            ),
            Err(e) => error_label(ui, &e.to_string()),
        }
        ui.add_space(6.0);
    }

    ui.separator();
    ui.strong("Climate-zone composition");
    if view.bands.is_empty() {
        ui.label("No climate-zone columns found for this region.");
    } else {
        ui.label(format!(
            "{} climate zones, {} yearly observations",
            view.bands.len(),
            view.climate.len()
        ));
        plot::climate_area_chart(ui, &view.bands, &view.colors);
    }
}

fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

fn models(ui: &mut Ui) {
    ui.heading("🤖 Predictive Models");
    ui.label("Coming soon: model training, forecasting, climate-tourism interactions…");
}
