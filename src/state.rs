use std::path::Path;

use crate::climate::labels::ClimateLabels;
use crate::climate::reshape::{climate_composition, stack_bands, ClimateRecord, StackedBand};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{region_options, region_slice, RegionSlice};
use crate::data::loader::load_file;
use crate::data::model::{CellValue, Table};
use crate::data::summary::{describe, ColumnSummary};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Exploration,
    Models,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Exploration, Page::Models];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Exploration => "Exploration",
            Page::Models => "Models",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-region derived data
// ---------------------------------------------------------------------------

/// Everything the exploration page draws for the selected region.
#[derive(Debug, Clone)]
pub struct RegionView {
    pub slice: RegionSlice,
    pub climate: Vec<ClimateRecord>,
    pub bands: Vec<StackedBand>,
    pub colors: ColorMap,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Climate code dictionary, built once at startup.
    pub labels: ClimateLabels,

    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// Summary statistics of the loaded table.
    pub summary: Vec<ColumnSummary>,

    /// Region dropdown options, or why there are none.
    pub regions: Result<Vec<CellValue>, DataError>,

    pub selected_region: Option<CellValue>,

    /// Derived data for `selected_region`.
    pub region_view: Option<Result<RegionView, DataError>>,

    pub page: Page,

    /// Confirmation shown after a successful load.
    pub loaded_message: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, labels: ClimateLabels) -> Self {
        Self {
            config,
            labels,
            table: None,
            summary: Vec::new(),
            regions: Ok(Vec::new()),
            selected_region: None,
            region_view: None,
            page: Page::default(),
            loaded_message: None,
            status_message: None,
        }
    }

    /// Load `path` and replace the current table; errors go to the status line.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.len(),
                    table.column_names,
                    path.display()
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.loaded_message = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table; the previous one and its selection are
    /// dropped.
    pub fn set_table(&mut self, table: Table) {
        self.summary = describe(&table);
        self.regions = region_options(&table);
        if let Err(e) = &self.regions {
            log::warn!("Region selector unavailable: {e}");
        }
        self.selected_region = None;
        self.region_view = None;
        self.table = Some(table);
        self.loaded_message = Some("Dataset loaded successfully!".to_string());
        self.status_message = None;

        // Like a dropdown, start on the first option.
        let first = self.regions.as_ref().ok().and_then(|r| r.first().cloned());
        if let Some(region) = first {
            self.select_region(region);
        }
    }

    /// Choose a region and rebuild everything derived from it.
    pub fn select_region(&mut self, region: CellValue) {
        let Some(table) = &self.table else {
            return;
        };
        let view = region_slice(table, &region).map(|slice| {
            let climate = climate_composition(&slice, &self.config.climate, &self.labels);
            let bands = stack_bands(&climate);
            let colors = ColorMap::new(bands.iter().map(|b| b.code.as_str()));
            RegionView {
                slice,
                climate,
                bands,
                colors,
            }
        });
        if let Err(e) = &view {
            log::warn!("Cannot slice region {region}: {e}");
        }
        self.region_view = Some(view);
        self.selected_region = Some(region);
    }
}
