use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::SUPPORTED_EXTENSIONS;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Go to:");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.title());
    }

    ui.separator();
    match &state.table {
        Some(table) if table.is_empty() => {
            ui.label("The dataset has no rows.");
        }
        Some(table) => {
            ui.label(format!("{} rows", table.len()));
            ui.label(format!("{} columns", table.column_names.len()));
        }
        None => {
            ui.label("No dataset loaded.");
        }
    }
}

// ---------------------------------------------------------------------------
// Region selector
// ---------------------------------------------------------------------------

/// Dropdown of the loaded table's regions. Selecting one rebuilds the
/// region view.
pub fn region_selector(ui: &mut Ui, state: &mut AppState) {
    let options = match &state.regions {
        Ok(options) => options.clone(),
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    let current = state
        .selected_region
        .as_ref()
        .map(|r| r.to_string())
        .unwrap_or_default();

    let mut picked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Region (NUTS-2)");
        egui::ComboBox::from_id_salt("region")
            .selected_text(current.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                for region in &options {
                    let is_selected = state.selected_region.as_ref() == Some(region);
                    if ui
                        .selectable_label(is_selected, region.to_string())
                        .clicked()
                        && !is_selected
                    {
                        picked = Some(region.clone());
                    }
                }
            });
    });

    if let Some(region) = picked {
        log::debug!("Region selected: {region}");
        state.select_region(region);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(msg) = &state.loaded_message {
            ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.small("E-TRACE • European Tourism Regional Analysis & Climate Effects • Built with egui");
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload the merged dataset (CSV/Parquet)")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
