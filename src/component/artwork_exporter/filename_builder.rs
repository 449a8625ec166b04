//! 圖片檔名產生
//!
//! 依媒體項目組合檔名，移除檔案系統不允許的字元，並視設定移除重音符號

use super::error::ExportError;
use crate::library::MediaItem;
use crate::tools::apply_name_normalization;
use regex::Regex;
use std::sync::LazyLock;

const ARTWORK_EXTENSION: &str = ".jpg";

static REGEX_ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\^<>:"/\\|?*]"#).expect("Invalid regex"));

/// 移除 `^<>:"/\|?*`
#[must_use]
pub fn clean_filename(filename: &str) -> String {
    REGEX_ILLEGAL_CHARS.replace_all(filename, "").into_owned()
}

/// 檔名產生器
///
/// 不處理檔名衝突：同一資料夾內產生相同檔名的項目會互相覆蓋
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameBuilder {
    normalize_names: bool,
}

impl FilenameBuilder {
    pub const fn new(normalize_names: bool) -> Self {
        Self { normalize_names }
    }

    /// 產生圖片檔名
    ///
    /// # Errors
    /// 專輯沒有任何演出者時回傳 [`ExportError::MissingAlbumArtist`]
    pub fn build(&self, item: &MediaItem) -> Result<String, ExportError> {
        let stem = match item {
            MediaItem::Movie(movie) => format!("{} ({})", movie.title, movie.year),
            MediaItem::TvShow(show) => show.title.clone(),
            MediaItem::Episode(episode) => format!(
                "{} - s{:02}{:02} - {}",
                episode.showtitle, episode.season, episode.episode, episode.title
            ),
            MediaItem::Season(season) => format!("{} - {}", season.showtitle, season.label),
            // 媒體庫中的音樂錄影帶可能沒有演出者
            MediaItem::MusicVideo(video) => match video.artist.first() {
                Some(artist) => format!("{} - {}", artist, video.title),
                None => video.title.clone(),
            },
            MediaItem::Artist(artist) => artist.label.clone(),
            MediaItem::Album(album) => {
                let artist = album
                    .artist
                    .first()
                    .ok_or_else(|| ExportError::MissingAlbumArtist {
                        title: album.title.clone(),
                    })?;
                format!("{} - {}", artist, album.title)
            }
        };

        let filename = clean_filename(&format!("{stem}{ARTWORK_EXTENSION}"));
        Ok(apply_name_normalization(&filename, self.normalize_names))
    }
}
