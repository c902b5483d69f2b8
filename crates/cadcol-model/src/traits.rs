// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator seams owned by the excluded UI/orchestration layers
//!
//! These traits are call contracts only; the pipeline consumes them without
//! assuming anything about their implementations.

/// Progress callback for long-running batches
///
/// Invoked with `(current, total)` where `current` is 1-based.
pub type ProgressCallback = Box<dyn Fn(usize, usize)>;

/// Lets the user pick the source drawing import
///
/// Returns the opaque handle of the chosen import, or `None` when the user
/// cancelled the pick.
pub trait ImportSelector {
    fn select_import(&self) -> Option<String>;
}

/// Persistence for per-use preferences
///
/// Values are stored as serialized strings under a feature-scoped key; the
/// settings types themselves decide the wire format.
pub trait SettingsStore {
    /// Load the serialized value stored under `key`
    fn load(&self, key: &str) -> Option<String>;

    /// Persist `value` under `key`, replacing any previous value
    fn save(&mut self, key: &str, value: &str);
}
