//! 媒體庫查詢服務
//!
//! 匯出流程透過 [`MediaLibrary`] 取得影片、影集、音樂項目與媒體來源

mod json_library;
mod model;

pub use json_library::JsonLibrary;
pub use model::{
    Album, Artist, ArtworkKind, EntityKind, Episode, LibraryQuery, MediaItem, MediaLibrary,
    MediaSource, Movie, MusicVideo, PathFilter, Season, SourceContent, TvShow,
};
