//! Dark-mode preference
//!
//! An explicit choice is stored under `darkMode` as a JSON boolean. While no
//! choice is stored the flag follows the system color-scheme preference.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::store::PreferenceStore;
use crate::error::AppResult;

/// Storage key for the explicit preference
pub const DARK_MODE_KEY: &str = "darkMode";

/// Current dark-mode state as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DarkModeState {
    pub dark_mode: bool,
    /// Whether the value comes from an explicit choice rather than the system
    pub explicit: bool,
}

pub struct DarkMode {
    store: Arc<dyn PreferenceStore>,
    is_dark: bool,
}

impl DarkMode {
    /// Load the saved preference, falling back to the system preference
    pub fn load(store: Arc<dyn PreferenceStore>, system_prefers_dark: bool) -> AppResult<Self> {
        let is_dark = saved_preference(store.as_ref())?.unwrap_or(system_prefers_dark);
        debug!(is_dark, "Loaded dark mode preference");
        Ok(Self { store, is_dark })
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn state(&self) -> AppResult<DarkModeState> {
        Ok(DarkModeState {
            dark_mode: self.is_dark,
            explicit: self.store.get(DARK_MODE_KEY)?.is_some(),
        })
    }

    /// Flip the flag and store it as an explicit choice
    pub fn toggle(&mut self) -> AppResult<bool> {
        self.set(!self.is_dark)?;
        Ok(self.is_dark)
    }

    /// Store an explicit choice
    pub fn set(&mut self, value: bool) -> AppResult<()> {
        self.store
            .set(DARK_MODE_KEY, &serde_json::to_string(&value)?)?;
        self.is_dark = value;
        debug!(is_dark = value, "Dark mode preference saved");
        Ok(())
    }

    /// React to a change of the system color scheme
    ///
    /// Ignored while an explicit choice is stored.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> AppResult<bool> {
        if self.store.get(DARK_MODE_KEY)?.is_none() {
            self.is_dark = prefers_dark;
        }
        Ok(self.is_dark)
    }

    /// Drop the explicit choice and follow the system again
    pub fn follow_system(&mut self, system_prefers_dark: bool) -> AppResult<()> {
        self.store.remove(DARK_MODE_KEY)?;
        self.is_dark = system_prefers_dark;
        Ok(())
    }
}

fn saved_preference(store: &dyn PreferenceStore) -> AppResult<Option<bool>> {
    let Some(raw) = store.get(DARK_MODE_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<bool>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring unreadable dark mode preference");
            Ok(None)
        }
    }
}
