// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-use preferences for the column-from-CAD feature
//!
//! The dialog layer fills this in and persists it through a
//! [`SettingsStore`] so the next use starts from the previous choices.
//! Offsets are stored in the display unit; conversion to internal units
//! happens when the creation context is built.

use crate::orchestrator::ExtractionMode;
use cadcol_model::SettingsStore;
use serde::{Deserialize, Serialize};

/// Store key the settings are persisted under
const SETTINGS_KEY: &str = "column_from_cad";

/// Remembered inputs of the last run
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnFromCadSettings {
    pub selected_layer: Option<String>,
    pub mode: ExtractionMode,
    pub rectangular_family: Option<String>,
    pub circular_family: Option<String>,
    pub width_parameter: Option<String>,
    pub height_parameter: Option<String>,
    pub diameter_parameter: Option<String>,
    pub base_level: Option<String>,
    pub top_level: Option<String>,
    /// Base offset in the display unit
    pub base_offset_display: f64,
    /// Top offset in the display unit
    pub top_offset_display: f64,
}

impl Default for ColumnFromCadSettings {
    fn default() -> Self {
        Self {
            selected_layer: None,
            mode: ExtractionMode::HatchFaces,
            rectangular_family: None,
            circular_family: None,
            width_parameter: None,
            height_parameter: None,
            diameter_parameter: None,
            base_level: None,
            top_level: None,
            base_offset_display: 0.0,
            top_offset_display: 0.0,
        }
    }
}

impl ColumnFromCadSettings {
    /// Load the persisted settings, falling back to defaults
    ///
    /// Unreadable payloads (e.g. from an older version) also fall back.
    pub fn load_from(store: &dyn SettingsStore) -> Self {
        store
            .load(SETTINGS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Persist the settings
    pub fn save_to(&self, store: &mut dyn SettingsStore) {
        match serde_json::to_string(self) {
            Ok(raw) => store.save(SETTINGS_KEY, &raw),
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}
