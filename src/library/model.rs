//! 媒體庫資料模型
//!
//! 欄位名稱與媒體中心 JSON-RPC 回傳的結果一致，缺少的欄位一律使用預設值

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 媒體來源宣告的內容類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceContent {
    Movies,
    #[serde(rename = "tvshows")]
    TvShows,
    #[default]
    #[serde(other)]
    None,
}

impl fmt::Display for SourceContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movies => write!(f, "movies"),
            Self::TvShows => write!(f, "tvshows"),
            Self::None => write!(f, "none"),
        }
    }
}

/// 已設定的媒體來源（媒體庫根目錄）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub content: SourceContent,
}

impl MediaSource {
    pub fn new(name: &str, path: &str, content: SourceContent) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            content,
        }
    }
}

/// 圖片類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkKind {
    Fanart,
    Thumbnail,
    Poster,
    Banner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub movieid: i64,
    pub title: String,
    pub year: i32,
    pub file: String,
    pub fanart: String,
    pub thumbnail: String,
    pub art: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvShow {
    pub tvshowid: i64,
    pub title: String,
    /// 影集根資料夾
    pub file: String,
    pub fanart: String,
    pub thumbnail: String,
    pub art: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Episode {
    pub episodeid: i64,
    pub tvshowid: i64,
    pub title: String,
    pub showtitle: String,
    pub season: u32,
    pub episode: u32,
    pub file: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub tvshowid: i64,
    pub season: u32,
    /// 顯示名稱，例如 "Season 1"
    pub label: String,
    pub showtitle: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicVideo {
    pub title: String,
    pub artist: Vec<String>,
    pub file: String,
    pub fanart: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub label: String,
    pub fanart: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub title: String,
    pub artist: Vec<String>,
    pub thumbnail: String,
}

/// 查詢回傳的單筆媒體項目
#[derive(Debug, Clone, PartialEq)]
pub enum MediaItem {
    Movie(Movie),
    TvShow(TvShow),
    Episode(Episode),
    Season(Season),
    MusicVideo(MusicVideo),
    Artist(Artist),
    Album(Album),
}

impl MediaItem {
    /// 取得指定類型的圖片參照，空字串視為沒有圖片
    #[must_use]
    pub fn artwork(&self, kind: ArtworkKind) -> Option<&str> {
        let reference = match (self, kind) {
            (Self::Movie(m), ArtworkKind::Fanart) => Some(m.fanart.as_str()),
            (Self::Movie(m), ArtworkKind::Thumbnail) => Some(m.thumbnail.as_str()),
            (Self::Movie(m), ArtworkKind::Poster) => m.art.get("poster").map(String::as_str),
            (Self::Movie(m), ArtworkKind::Banner) => m.art.get("banner").map(String::as_str),
            (Self::TvShow(s), ArtworkKind::Fanart) => Some(s.fanart.as_str()),
            (Self::TvShow(s), ArtworkKind::Thumbnail) => Some(s.thumbnail.as_str()),
            (Self::TvShow(s), ArtworkKind::Poster) => s.art.get("poster").map(String::as_str),
            (Self::TvShow(s), ArtworkKind::Banner) => s.art.get("banner").map(String::as_str),
            (Self::Episode(e), ArtworkKind::Thumbnail) => Some(e.thumbnail.as_str()),
            (Self::Season(s), ArtworkKind::Thumbnail) => Some(s.thumbnail.as_str()),
            (Self::MusicVideo(v), ArtworkKind::Fanart) => Some(v.fanart.as_str()),
            (Self::MusicVideo(v), ArtworkKind::Thumbnail) => Some(v.thumbnail.as_str()),
            (Self::Artist(a), ArtworkKind::Fanart) => Some(a.fanart.as_str()),
            (Self::Artist(a), ArtworkKind::Thumbnail) => Some(a.thumbnail.as_str()),
            (Self::Album(a), ArtworkKind::Thumbnail) => Some(a.thumbnail.as_str()),
            _ => None,
        };
        reference.filter(|r| !r.is_empty())
    }

    /// 用來比對媒體來源的路徑
    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        let path = match self {
            Self::Movie(m) => m.file.as_str(),
            Self::TvShow(s) => s.file.as_str(),
            Self::Episode(e) => e.file.as_str(),
            Self::MusicVideo(v) => v.file.as_str(),
            Self::Season(_) | Self::Artist(_) | Self::Album(_) => "",
        };
        Some(path).filter(|p| !p.is_empty())
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::TvShow(s) => &s.title,
            Self::Episode(e) => &e.title,
            Self::Season(s) => &s.label,
            Self::MusicVideo(v) => &v.title,
            Self::Artist(a) => &a.label,
            Self::Album(a) => &a.title,
        }
    }
}

/// 可查詢的實體種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Movies,
    TvShows,
    Episodes,
    Seasons,
    MusicVideos,
    Artists,
    Albums,
}

impl EntityKind {
    /// 對應的 JSON-RPC 方法名稱
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Movies => "VideoLibrary.GetMovies",
            Self::TvShows => "VideoLibrary.GetTVShows",
            Self::Episodes => "VideoLibrary.GetEpisodes",
            Self::Seasons => "VideoLibrary.GetSeasons",
            Self::MusicVideos => "VideoLibrary.GetMusicVideos",
            Self::Artists => "AudioLibrary.GetArtists",
            Self::Albums => "AudioLibrary.GetAlbums",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFilter {
    /// 原始檔案路徑包含此字串
    Contains(String),
    /// 正規化後的檔案路徑位於此根目錄下
    StartsWith(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryQuery {
    pub entity: EntityKind,
    pub properties: Vec<&'static str>,
    pub path_filter: Option<PathFilter>,
    pub tvshow_id: Option<i64>,
}

impl LibraryQuery {
    pub fn new(entity: EntityKind, properties: &[&'static str]) -> Self {
        Self {
            entity,
            properties: properties.to_vec(),
            path_filter: None,
            tvshow_id: None,
        }
    }

    #[must_use]
    pub fn with_path_filter(mut self, filter: Option<PathFilter>) -> Self {
        self.path_filter = filter;
        self
    }

    #[must_use]
    pub const fn with_tvshow(mut self, tvshow_id: i64) -> Self {
        self.tvshow_id = Some(tvshow_id);
        self
    }
}

/// 媒體庫查詢服務
pub trait MediaLibrary {
    /// 執行查詢；沒有結果時回傳空清單
    fn query(&self, query: &LibraryQuery) -> Result<Vec<MediaItem>>;

    /// 所有已設定的媒體來源
    fn sources(&self) -> Result<Vec<MediaSource>>;

    /// 所有已註冊的來源路徑
    fn source_paths(&self) -> Result<Vec<String>> {
        Ok(self.sources()?.into_iter().map(|s| s.path).collect())
    }
}
