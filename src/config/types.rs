use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 最近使用的目的地路徑保留數量
pub const MAX_RECENT_PATHS: usize = 5;

/// 未設定目的地時使用的預設資料夾
pub const DEFAULT_DESTINATION: &str = "artwork";

pub const DEFAULT_LIBRARY_FILE: &str = "library.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 各圖片分類的開關
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkToggles {
    pub movie_fanart: bool,
    pub tvshow_fanart: bool,
    pub musicvideo_fanart: bool,
    pub artist_fanart: bool,
    pub movie_thumbs: bool,
    pub movie_posters: bool,
    pub tvshow_banners: bool,
    pub tvshow_posters: bool,
    pub season_thumbs: bool,
    pub episode_thumbs: bool,
    pub musicvideo_thumbs: bool,
    pub artist_thumbs: bool,
    pub album_thumbs: bool,
}

impl Default for ArtworkToggles {
    fn default() -> Self {
        Self {
            movie_fanart: true,
            tvshow_fanart: true,
            musicvideo_fanart: false,
            artist_fanart: false,
            movie_thumbs: false,
            movie_posters: true,
            tvshow_banners: false,
            tvshow_posters: true,
            season_thumbs: false,
            episode_thumbs: false,
            musicvideo_thumbs: false,
            artist_thumbs: false,
            album_thumbs: false,
        }
    }
}

/// 依媒體來源分資料夾的設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// 總開關，關閉時忽略下方兩個設定
    pub split_media_sources: bool,
    pub split_movies_sources: bool,
    pub split_tvshows_sources: bool,
}

impl SplitSettings {
    #[must_use]
    pub const fn movies(&self) -> bool {
        self.split_media_sources && self.split_movies_sources
    }

    #[must_use]
    pub const fn tvshows(&self) -> bool {
        self.split_media_sources && self.split_tvshows_sources
    }

    #[must_use]
    pub const fn any(&self) -> bool {
        self.movies() || self.tvshows()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub artwork: ArtworkToggles,
    pub split: SplitSettings,
    /// 移除名稱中的重音符號（適用於不支援非 ASCII 檔名的檔案系統）
    pub normalize_names: bool,
    pub destination: String,
    /// 只匯出路徑包含此字串的項目
    pub restrict_to_path: Option<String>,
    pub library_file: PathBuf,
    pub language: Language,
    pub recent_destinations: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            artwork: ArtworkToggles::default(),
            split: SplitSettings::default(),
            normalize_names: false,
            destination: String::new(),
            restrict_to_path: None,
            library_file: PathBuf::from(DEFAULT_LIBRARY_FILE),
            language: Language::default(),
            recent_destinations: Vec::new(),
        }
    }
}

impl UserSettings {
    /// 實際使用的路徑限制，空字串視為未設定
    #[must_use]
    pub fn path_restriction(&self) -> Option<&str> {
        self.restrict_to_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// 匯出根目錄
    ///
    /// 設定路徑限制時，會在目的地下再加上限制路徑的最後一層資料夾名稱
    #[must_use]
    pub fn export_root(&self) -> PathBuf {
        let destination = self.destination.trim();
        let mut root = if destination.is_empty() {
            PathBuf::from(DEFAULT_DESTINATION)
        } else {
            PathBuf::from(destination)
        };

        if let Some(folder) = self.path_restriction().and_then(restriction_folder_name) {
            root.push(folder);
        }
        root
    }
}

/// 取出限制路徑所在資料夾的名稱，例如 `/mnt/movies/` 得到 `movies`
fn restriction_folder_name(path: &str) -> Option<String> {
    let unified = path.replace('\\', "/");
    let directory = match unified.rfind('/') {
        Some(idx) => &unified[..idx],
        None => return None,
    };
    directory
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
