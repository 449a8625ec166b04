//! 以 JSON 匯出檔作為媒體庫
//!
//! 檔案內容與媒體中心 JSON-RPC 查詢結果相同，每個區段皆可省略

use super::model::{
    Album, Artist, EntityKind, Episode, LibraryQuery, MediaItem, MediaLibrary, MediaSource,
    Movie, MusicVideo, PathFilter, Season, TvShow,
};
use crate::tools::normalize_path;
use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonLibrary {
    sources: Vec<MediaSource>,
    movies: Vec<Movie>,
    tvshows: Vec<TvShow>,
    episodes: Vec<Episode>,
    seasons: Vec<Season>,
    musicvideos: Vec<MusicVideo>,
    artists: Vec<Artist>,
    albums: Vec<Album>,
}

impl JsonLibrary {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("無法讀取媒體庫檔案: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("無法解析媒體庫檔案: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }
}

fn matches_filter(file: &str, filter: Option<&PathFilter>) -> bool {
    match filter {
        None => true,
        Some(PathFilter::Contains(value)) => file.contains(value.as_str()),
        Some(PathFilter::StartsWith(root)) => {
            let root = normalize_path(root);
            let file = normalize_path(file);
            file == root || file.starts_with(&format!("{}/", root.trim_end_matches('/')))
        }
    }
}

impl MediaLibrary for JsonLibrary {
    fn query(&self, query: &LibraryQuery) -> Result<Vec<MediaItem>> {
        debug!(
            "{} properties={:?} filter={:?} tvshowid={:?}",
            query.entity.method(),
            query.properties,
            query.path_filter,
            query.tvshow_id
        );
        let filter = query.path_filter.as_ref();

        let items = match query.entity {
            EntityKind::Movies => self
                .movies
                .iter()
                .filter(|m| matches_filter(&m.file, filter))
                .cloned()
                .map(MediaItem::Movie)
                .collect(),
            EntityKind::TvShows => self
                .tvshows
                .iter()
                .filter(|s| matches_filter(&s.file, filter))
                .cloned()
                .map(MediaItem::TvShow)
                .collect(),
            EntityKind::Episodes => self
                .episodes
                .iter()
                .filter(|e| matches_filter(&e.file, filter))
                .filter(|e| query.tvshow_id.is_none_or(|id| e.tvshowid == id))
                .cloned()
                .map(MediaItem::Episode)
                .collect(),
            EntityKind::Seasons => self
                .seasons
                .iter()
                .filter(|s| query.tvshow_id.is_none_or(|id| s.tvshowid == id))
                .cloned()
                .map(MediaItem::Season)
                .collect(),
            EntityKind::MusicVideos => self
                .musicvideos
                .iter()
                .filter(|v| matches_filter(&v.file, filter))
                .cloned()
                .map(MediaItem::MusicVideo)
                .collect(),
            EntityKind::Artists => self.artists.iter().cloned().map(MediaItem::Artist).collect(),
            EntityKind::Albums => self.albums.iter().cloned().map(MediaItem::Album).collect(),
        };

        Ok(items)
    }

    fn sources(&self) -> Result<Vec<MediaSource>> {
        Ok(self.sources.clone())
    }
}
