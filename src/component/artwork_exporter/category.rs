//! 圖片分類表
//!
//! 每個分類決定查詢的實體、取用的圖片欄位、輸出資料夾以及如何對應媒體來源

use super::source_resolver::LookupMode;
use crate::config::ArtworkToggles;
use crate::library::{ArtworkKind, EntityKind, SourceContent};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtworkCategory {
    MovieFanart,
    TvShowFanart,
    MusicVideoFanart,
    ArtistFanart,
    MovieThumbs,
    MoviePosters,
    TvShowBanners,
    TvShowPosters,
    SeasonThumbs,
    EpisodeThumbs,
    MusicVideoThumbs,
    ArtistThumbs,
    AlbumThumbs,
}

impl ArtworkCategory {
    /// 匯出順序：先 fanart，再縮圖、海報與橫幅
    pub const ALL: [Self; 13] = [
        Self::MovieFanart,
        Self::TvShowFanart,
        Self::MusicVideoFanart,
        Self::ArtistFanart,
        Self::MovieThumbs,
        Self::MoviePosters,
        Self::TvShowBanners,
        Self::TvShowPosters,
        Self::SeasonThumbs,
        Self::EpisodeThumbs,
        Self::MusicVideoThumbs,
        Self::ArtistThumbs,
        Self::AlbumThumbs,
    ];

    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::MovieFanart => "MovieFanart",
            Self::TvShowFanart => "TVShowFanart",
            Self::MusicVideoFanart => "MusicVideoFanart",
            Self::ArtistFanart => "ArtistFanart",
            Self::MovieThumbs => "MovieThumbs",
            Self::MoviePosters => "MoviePosters",
            Self::TvShowBanners => "TVShowBanners",
            Self::TvShowPosters => "TVShowPosters",
            Self::SeasonThumbs => "SeasonThumbs",
            Self::EpisodeThumbs => "EpisodeThumbs",
            Self::MusicVideoThumbs => "MusicVideoThumbs",
            Self::ArtistThumbs => "ArtistThumbs",
            Self::AlbumThumbs => "AlbumThumbs",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MovieFanart => "movie fanart",
            Self::TvShowFanart => "tvshow fanart",
            Self::MusicVideoFanart => "musicvideo fanart",
            Self::ArtistFanart => "artist fanart",
            Self::MovieThumbs => "movie thumbs",
            Self::MoviePosters => "movie posters",
            Self::TvShowBanners => "tvshow banners",
            Self::TvShowPosters => "tvshow posters",
            Self::SeasonThumbs => "season thumbs",
            Self::EpisodeThumbs => "episode thumbs",
            Self::MusicVideoThumbs => "musicvideo thumbs",
            Self::ArtistThumbs => "artist thumbs",
            Self::AlbumThumbs => "album thumbs",
        }
    }

    #[must_use]
    pub const fn is_enabled(self, toggles: &ArtworkToggles) -> bool {
        match self {
            Self::MovieFanart => toggles.movie_fanart,
            Self::TvShowFanart => toggles.tvshow_fanart,
            Self::MusicVideoFanart => toggles.musicvideo_fanart,
            Self::ArtistFanart => toggles.artist_fanart,
            Self::MovieThumbs => toggles.movie_thumbs,
            Self::MoviePosters => toggles.movie_posters,
            Self::TvShowBanners => toggles.tvshow_banners,
            Self::TvShowPosters => toggles.tvshow_posters,
            Self::SeasonThumbs => toggles.season_thumbs,
            Self::EpisodeThumbs => toggles.episode_thumbs,
            Self::MusicVideoThumbs => toggles.musicvideo_thumbs,
            Self::ArtistThumbs => toggles.artist_thumbs,
            Self::AlbumThumbs => toggles.album_thumbs,
        }
    }

    pub fn set_enabled(self, toggles: &mut ArtworkToggles, enabled: bool) {
        let toggle = match self {
            Self::MovieFanart => &mut toggles.movie_fanart,
            Self::TvShowFanart => &mut toggles.tvshow_fanart,
            Self::MusicVideoFanart => &mut toggles.musicvideo_fanart,
            Self::ArtistFanart => &mut toggles.artist_fanart,
            Self::MovieThumbs => &mut toggles.movie_thumbs,
            Self::MoviePosters => &mut toggles.movie_posters,
            Self::TvShowBanners => &mut toggles.tvshow_banners,
            Self::TvShowPosters => &mut toggles.tvshow_posters,
            Self::SeasonThumbs => &mut toggles.season_thumbs,
            Self::EpisodeThumbs => &mut toggles.episode_thumbs,
            Self::MusicVideoThumbs => &mut toggles.musicvideo_thumbs,
            Self::ArtistThumbs => &mut toggles.artist_thumbs,
            Self::AlbumThumbs => &mut toggles.album_thumbs,
        };
        *toggle = enabled;
    }

    /// 查詢的實體；季縮圖需要先查影集再逐一查季
    #[must_use]
    pub const fn entity(self) -> EntityKind {
        match self {
            Self::MovieFanart | Self::MovieThumbs | Self::MoviePosters => EntityKind::Movies,
            Self::TvShowFanart | Self::TvShowBanners | Self::TvShowPosters => EntityKind::TvShows,
            Self::SeasonThumbs => EntityKind::Seasons,
            Self::EpisodeThumbs => EntityKind::Episodes,
            Self::MusicVideoFanart | Self::MusicVideoThumbs => EntityKind::MusicVideos,
            Self::ArtistFanart | Self::ArtistThumbs => EntityKind::Artists,
            Self::AlbumThumbs => EntityKind::Albums,
        }
    }

    #[must_use]
    pub const fn artwork_kind(self) -> ArtworkKind {
        match self {
            Self::MovieFanart | Self::TvShowFanart | Self::MusicVideoFanart | Self::ArtistFanart => {
                ArtworkKind::Fanart
            }
            Self::MoviePosters | Self::TvShowPosters => ArtworkKind::Poster,
            Self::TvShowBanners => ArtworkKind::Banner,
            Self::MovieThumbs
            | Self::SeasonThumbs
            | Self::EpisodeThumbs
            | Self::MusicVideoThumbs
            | Self::ArtistThumbs
            | Self::AlbumThumbs => ArtworkKind::Thumbnail,
        }
    }

    /// 查詢時要求的欄位
    #[must_use]
    pub const fn properties(self) -> &'static [&'static str] {
        match self {
            Self::MovieFanart => &["file", "title", "fanart", "year"],
            Self::MovieThumbs => &["file", "title", "thumbnail", "year"],
            Self::MoviePosters => &["file", "title", "art", "year"],
            Self::TvShowFanart => &["file", "title", "fanart"],
            Self::TvShowBanners | Self::TvShowPosters => &["file", "title", "art"],
            Self::SeasonThumbs => &["thumbnail", "showtitle"],
            Self::EpisodeThumbs => &["file", "title", "thumbnail", "season", "episode", "showtitle"],
            Self::MusicVideoFanart => &["title", "fanart", "artist"],
            Self::MusicVideoThumbs => &["title", "thumbnail", "artist"],
            Self::ArtistFanart => &["fanart"],
            Self::ArtistThumbs => &["thumbnail"],
            Self::AlbumThumbs => &["title", "thumbnail", "artist"],
        }
    }

    /// 可依媒體來源分資料夾的分類所屬的內容類型
    #[must_use]
    pub const fn media_kind(self) -> Option<SourceContent> {
        match self {
            Self::MovieFanart | Self::MovieThumbs | Self::MoviePosters => {
                Some(SourceContent::Movies)
            }
            Self::TvShowFanart
            | Self::TvShowBanners
            | Self::TvShowPosters
            | Self::SeasonThumbs
            | Self::EpisodeThumbs => Some(SourceContent::TvShows),
            Self::MusicVideoFanart
            | Self::MusicVideoThumbs
            | Self::ArtistFanart
            | Self::ArtistThumbs
            | Self::AlbumThumbs => None,
        }
    }

    /// 影集與季只有影集根資料夾，需以前綴比對；電影與單集有實際檔案路徑
    #[must_use]
    pub const fn lookup_mode(self) -> Option<LookupMode> {
        match self {
            Self::MovieFanart | Self::MovieThumbs | Self::MoviePosters | Self::EpisodeThumbs => {
                Some(LookupMode::Exact)
            }
            Self::TvShowFanart | Self::TvShowBanners | Self::TvShowPosters | Self::SeasonThumbs => {
                Some(LookupMode::Prefix)
            }
            Self::MusicVideoFanart
            | Self::MusicVideoThumbs
            | Self::ArtistFanart
            | Self::ArtistThumbs
            | Self::AlbumThumbs => None,
        }
    }

    /// 音樂實體沒有檔案路徑，設定路徑限制時不匯出
    #[must_use]
    pub const fn path_restrictable(self) -> bool {
        !matches!(
            self,
            Self::ArtistFanart | Self::ArtistThumbs | Self::AlbumThumbs
        )
    }

    /// 已啟用的分類，依匯出順序
    #[must_use]
    pub fn enabled(toggles: &ArtworkToggles) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|category| category.is_enabled(toggles))
            .collect()
    }
}

impl fmt::Display for ArtworkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
