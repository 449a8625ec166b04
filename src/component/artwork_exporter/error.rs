use std::path::PathBuf;
use thiserror::Error;

/// 匯出流程中會中止執行或需要個別記錄的錯誤
#[derive(Debug, Error)]
pub enum ExportError {
    /// 目的地本身就是（或包含）媒體來源，拒絕執行以免刪除或覆寫媒體庫
    #[error("destination {destination} is a registered media source ({source_path}), choose a different path")]
    DestinationIsSource {
        destination: PathBuf,
        source_path: String,
    },

    #[error("no media sources are configured, set up media sources before exporting")]
    NoMediaSources,

    #[error("failed to create {} artwork directories", .failed.len())]
    DirectoryCreation { failed: Vec<PathBuf> },

    #[error("album \"{title}\" has no artist")]
    MissingAlbumArtist { title: String },
}
