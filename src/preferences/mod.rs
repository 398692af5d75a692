//! UI preferences persisted on behalf of the dashboard

pub mod dark_mode;
pub mod store;

pub use dark_mode::{DarkMode, DarkModeState, DARK_MODE_KEY};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
