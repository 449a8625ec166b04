//! 媒體庫圖片匯出元件
//!
//! 將媒體庫中的 fanart、縮圖、海報與橫幅依分類複製到目的地，
//! 可依媒體來源分資料夾

mod category;
mod destination_planner;
mod error;
mod export_engine;
mod filename_builder;
mod main;
mod source_resolver;

pub use category::ArtworkCategory;
pub use destination_planner::{ExportPlan, PlanFailures, plan_category, resolve_destination};
pub use error::ExportError;
pub use export_engine::{
    CategoryCount, ExportContext, ExportEngine, ExportReport, ExportState, PROGRESS_TITLE,
};
pub use filename_builder::{FilenameBuilder, clean_filename};
pub use main::ArtworkExporter;
pub use source_resolver::{LookupMode, SourceContentMap, build_content_map, resolve_source};
