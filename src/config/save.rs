use crate::config::load::SETTINGS_FILE;
use crate::config::types::{MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    save_settings_to(settings, Path::new(SETTINGS_FILE))
}

pub fn save_settings_to(settings: &UserSettings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的目的地
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_destination(settings: &mut UserSettings, path: &str) {
    settings.recent_destinations.retain(|p| p != path);
    settings.recent_destinations.insert(0, path.to_string());
    settings.recent_destinations.truncate(MAX_RECENT_PATHS);
}
