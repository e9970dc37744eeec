//! Persistent user preferences

pub mod preferences;

pub use preferences::{
    load_preferences, preferences_path, save_preferences, Preferences, PrefsError,
};
