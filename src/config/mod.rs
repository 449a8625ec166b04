pub mod load;
pub mod save;
pub mod types;

pub use types::{
    ArtworkToggles, Config, DEFAULT_DESTINATION, DEFAULT_LIBRARY_FILE, Language, MAX_RECENT_PATHS,
    SplitSettings, UserSettings,
};
