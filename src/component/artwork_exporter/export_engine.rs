//! 圖片匯出流程
//!
//! 狀態流程：Idle → SourcesIdentified（需要分來源時）→ DirectoriesCreated →
//! Exporting（逐一分類）→ Done / Cancelled。目的地是媒體來源時進入 Refused，
//! 任何資料夾建立失敗時進入 SetupFailed，兩者都不會複製任何檔案

use super::category::ArtworkCategory;
use super::destination_planner::{ExportPlan, plan_category, resolve_destination};
use super::error::ExportError;
use super::filename_builder::FilenameBuilder;
use super::source_resolver::{SourceContentMap, build_content_map, resolve_source};
use crate::config::UserSettings;
use crate::library::{
    EntityKind, LibraryQuery, MediaItem, MediaLibrary, MediaSource, PathFilter, SourceContent,
};
use crate::tools::{
    FileSystem, ProgressReporter, is_same_or_inside, percent_of, translate_artwork_path,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const PROGRESS_TITLE: &str = "Artwork export";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    SourcesIdentified,
    DirectoriesCreated,
    Exporting(ArtworkCategory),
    Done,
    Cancelled,
    Refused,
    SetupFailed,
}

/// 單一分類的處理結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCount {
    pub copied: usize,
    pub failed: usize,
    /// 沒有圖片的項目
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub state: ExportState,
    pub destination: PathBuf,
    /// 依處理順序記錄
    pub counts: Vec<(ArtworkCategory, CategoryCount)>,
}

impl ExportReport {
    #[must_use]
    pub fn count(&self, category: ArtworkCategory) -> Option<CategoryCount> {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, count)| *count)
    }

    #[must_use]
    pub fn total_copied(&self) -> usize {
        self.counts.iter().map(|(_, count)| count.copied).sum()
    }

    #[must_use]
    pub fn total_failed(&self) -> usize {
        self.counts.iter().map(|(_, count)| count.failed).sum()
    }
}

/// 單次匯出的執行狀態
pub struct ExportContext {
    pub destination: PathBuf,
    pub categories: Vec<ArtworkCategory>,
    pub path_restriction: Option<String>,
    /// 至少一種媒體需要分來源資料夾
    pub split_any: bool,
    pub split_movies: bool,
    pub split_tvshows: bool,
    pub normalize_names: bool,
    pub movie_sources: Vec<MediaSource>,
    pub tvshow_sources: Vec<MediaSource>,
    pub movie_content: SourceContentMap,
    pub tvshow_content: SourceContentMap,
    pub plans: HashMap<ArtworkCategory, ExportPlan>,
    pub filename_builder: FilenameBuilder,
}

impl ExportContext {
    pub fn from_settings(settings: &UserSettings) -> Self {
        Self {
            destination: settings.export_root(),
            categories: ArtworkCategory::enabled(&settings.artwork),
            path_restriction: settings.path_restriction().map(str::to_string),
            split_any: settings.split.any(),
            split_movies: settings.split.movies(),
            split_tvshows: settings.split.tvshows(),
            normalize_names: settings.normalize_names,
            movie_sources: Vec::new(),
            tvshow_sources: Vec::new(),
            movie_content: SourceContentMap::new(),
            tvshow_content: SourceContentMap::new(),
            plans: HashMap::new(),
            filename_builder: FilenameBuilder::new(settings.normalize_names),
        }
    }

    const fn split_enabled(&self, kind: SourceContent) -> bool {
        match kind {
            SourceContent::Movies => self.split_movies,
            SourceContent::TvShows => self.split_tvshows,
            SourceContent::None => false,
        }
    }

    fn content_map(&self, kind: SourceContent) -> Option<&SourceContentMap> {
        if !self.split_enabled(kind) {
            return None;
        }
        match kind {
            SourceContent::Movies => Some(&self.movie_content),
            SourceContent::TvShows => Some(&self.tvshow_content),
            SourceContent::None => None,
        }
    }

    fn source_names(&self, kind: SourceContent) -> Vec<String> {
        let sources = match kind {
            SourceContent::Movies => &self.movie_sources,
            SourceContent::TvShows => &self.tvshow_sources,
            SourceContent::None => return Vec::new(),
        };
        sources.iter().map(|s| s.name.clone()).collect()
    }

    fn path_filter(&self, category: ArtworkCategory) -> Option<PathFilter> {
        if !category.path_restrictable() {
            return None;
        }
        self.path_restriction.clone().map(PathFilter::Contains)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Cancelled,
}

enum ItemOutcome {
    Copied,
    Failed,
    Skipped,
}

pub struct ExportEngine<'a> {
    library: &'a dyn MediaLibrary,
    fs: &'a dyn FileSystem,
    progress: &'a dyn ProgressReporter,
    state: ExportState,
}

impl<'a> ExportEngine<'a> {
    pub fn new(
        library: &'a dyn MediaLibrary,
        fs: &'a dyn FileSystem,
        progress: &'a dyn ProgressReporter,
    ) -> Self {
        Self {
            library,
            fs,
            progress,
            state: ExportState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ExportState {
        self.state
    }

    fn transition(&mut self, next: ExportState) {
        debug!("匯出狀態 {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// 執行一次完整匯出
    ///
    /// # Errors
    /// 目的地是媒體來源、沒有任何媒體來源，或資料夾建立失敗時回傳錯誤，且不會複製任何檔案
    pub fn run(&mut self, settings: &UserSettings) -> Result<ExportReport, ExportError> {
        let mut ctx = ExportContext::from_settings(settings);
        info!("匯出圖片至 {}", ctx.destination.display());

        let sources = match self.library.sources() {
            Ok(sources) => sources,
            Err(e) => {
                warn!("無法取得媒體來源: {e:#}");
                Vec::new()
            }
        };
        if sources.is_empty() {
            warn!("You MUST set your media sources BEFORE running the export");
            self.transition(ExportState::Refused);
            return Err(ExportError::NoMediaSources);
        }

        self.ensure_destination_is_safe(&ctx.destination)?;
        self.clear_previous_output(&ctx.destination);

        if ctx.split_any {
            self.identify_sources(&mut ctx, &sources);
            self.transition(ExportState::SourcesIdentified);
        }

        self.create_directories(&mut ctx)?;
        self.transition(ExportState::DirectoriesCreated);

        let counts = self.copy_artwork(&ctx);
        if self.state != ExportState::Cancelled {
            self.transition(ExportState::Done);
        }

        Ok(ExportReport {
            state: self.state,
            destination: ctx.destination,
            counts,
        })
    }

    fn ensure_destination_is_safe(&mut self, destination: &Path) -> Result<(), ExportError> {
        let source_paths = self.library.source_paths().unwrap_or_else(|e| {
            warn!("無法讀取媒體來源路徑: {e:#}");
            Vec::new()
        });
        let destination_str = destination.to_string_lossy();

        if let Some(source_path) = source_paths
            .into_iter()
            .find(|source| is_same_or_inside(source, &destination_str))
        {
            warn!(
                "WARNING! The destination directory {} is defined as a media source. Please choose a different path!",
                destination.display()
            );
            self.transition(ExportState::Refused);
            return Err(ExportError::DestinationIsSource {
                destination: destination.to_path_buf(),
                source_path,
            });
        }
        Ok(())
    }

    /// 刪除目的地下所有子資料夾（上一次的匯出結果）
    fn clear_previous_output(&self, destination: &Path) {
        if !self.fs.exists(destination) {
            return;
        }
        match self.fs.list_directory_entries(destination) {
            Ok((dirs, _files)) => {
                for dir in dirs {
                    debug!("刪除先前的匯出結果 {}", dir.display());
                    self.fs.remove_tree(&dir);
                }
            }
            Err(e) => warn!("無法列出 {}: {e:#}", destination.display()),
        }
    }

    fn identify_sources(&self, ctx: &mut ExportContext, sources: &[MediaSource]) {
        if ctx.split_movies {
            ctx.movie_sources = sources
                .iter()
                .filter(|s| s.content == SourceContent::Movies)
                .cloned()
                .collect();
            ctx.movie_content = build_content_map(self.library, sources, SourceContent::Movies);
        }
        if ctx.split_tvshows {
            ctx.tvshow_sources = sources
                .iter()
                .filter(|s| s.content == SourceContent::TvShows)
                .cloned()
                .collect();
            ctx.tvshow_content = build_content_map(self.library, sources, SourceContent::TvShows);
        }
    }

    fn create_directories(&mut self, ctx: &mut ExportContext) -> Result<(), ExportError> {
        let mut failed = Vec::new();

        if !self.fs.exists(&ctx.destination) {
            if let Err(e) = self.fs.mkdir(&ctx.destination) {
                warn!("無法建立圖片資料夾: {e:#}");
                failed.push(ctx.destination.clone());
            }
        }

        if failed.is_empty() {
            for &category in &ctx.categories {
                let root = ctx.destination.join(category.dir_name());
                let (split, source_names) = match category.media_kind() {
                    Some(kind) if ctx.split_enabled(kind) => (true, ctx.source_names(kind)),
                    _ => (false, Vec::new()),
                };

                let (plan, failures) =
                    plan_category(self.fs, &root, &source_names, split, ctx.normalize_names);
                failed.extend(failures);
                ctx.plans.insert(category, plan);
            }
        }

        if failed.is_empty() {
            return Ok(());
        }

        warn!("資料夾建立失敗，不會複製任何檔案");
        self.transition(ExportState::SetupFailed);
        Err(ExportError::DirectoryCreation { failed })
    }

    fn copy_artwork(&mut self, ctx: &ExportContext) -> Vec<(ArtworkCategory, CategoryCount)> {
        let mut counts = Vec::new();
        self.progress.begin(PROGRESS_TITLE);

        for &category in &ctx.categories {
            if self.progress.is_cancelled() {
                info!("匯出已中斷");
                self.transition(ExportState::Cancelled);
                break;
            }
            if ctx.path_restriction.is_some() && !category.path_restrictable() {
                info!("{category} 略過：限制路徑時不適用");
                continue;
            }

            self.transition(ExportState::Exporting(category));
            let mut count = CategoryCount::default();
            let flow = if category == ArtworkCategory::SeasonThumbs {
                self.copy_season_thumbs(ctx, &mut count)
            } else {
                let query = LibraryQuery::new(category.entity(), category.properties())
                    .with_path_filter(ctx.path_filter(category));
                let items = self.query_items(&query);
                self.copy_items(ctx, category, &items, None, &mut count)
            };

            info!("{category} copied: {}", count.copied);
            counts.push((category, count));

            if flow == Flow::Cancelled {
                info!("匯出已中斷");
                self.transition(ExportState::Cancelled);
                break;
            }
        }

        self.progress.end();
        counts
    }

    /// 季縮圖：先列出影集，再逐一查詢每個影集的季
    fn copy_season_thumbs(&self, ctx: &ExportContext, count: &mut CategoryCount) -> Flow {
        let category = ArtworkCategory::SeasonThumbs;
        let query = LibraryQuery::new(EntityKind::TvShows, &["file"])
            .with_path_filter(ctx.path_filter(category));

        let mut shows = Vec::new();
        for item in self.query_items(&query) {
            if self.progress.is_cancelled() {
                return Flow::Cancelled;
            }
            if let MediaItem::TvShow(show) = item {
                shows.push((show.tvshowid, show.file));
            }
        }

        for (tvshow_id, show_path) in shows {
            if self.progress.is_cancelled() {
                return Flow::Cancelled;
            }
            let query =
                LibraryQuery::new(EntityKind::Seasons, category.properties()).with_tvshow(tvshow_id);
            let seasons = self.query_items(&query);
            if self.copy_items(ctx, category, &seasons, Some(&show_path), count) == Flow::Cancelled
            {
                return Flow::Cancelled;
            }
        }

        Flow::Continue
    }

    fn query_items(&self, query: &LibraryQuery) -> Vec<MediaItem> {
        self.library.query(query).unwrap_or_else(|e| {
            warn!("{} 查詢失敗: {e:#}", query.entity.method());
            Vec::new()
        })
    }

    /// `container_path` 用於沒有自身路徑的項目（季），以所屬影集的資料夾比對來源
    fn copy_items(
        &self,
        ctx: &ExportContext,
        category: ArtworkCategory,
        items: &[MediaItem],
        container_path: Option<&str>,
        count: &mut CategoryCount,
    ) -> Flow {
        let total = items.len();

        for (index, item) in items.iter().enumerate() {
            if self.progress.is_cancelled() {
                return Flow::Cancelled;
            }
            self.progress.update(
                percent_of(index + 1, total),
                &format!("{}: {}", category.label(), count.copied + 1),
            );

            match self.export_item(ctx, category, item, container_path) {
                ItemOutcome::Copied => count.copied += 1,
                ItemOutcome::Failed => count.failed += 1,
                ItemOutcome::Skipped => count.skipped += 1,
            }
        }

        Flow::Continue
    }

    fn export_item(
        &self,
        ctx: &ExportContext,
        category: ArtworkCategory,
        item: &MediaItem,
        container_path: Option<&str>,
    ) -> ItemOutcome {
        let Some(artwork) = item.artwork(category.artwork_kind()) else {
            return ItemOutcome::Skipped;
        };

        let filename = match ctx.filename_builder.build(item) {
            Ok(filename) => filename,
            Err(e) => {
                warn!("無法複製 {category}: {e}");
                return ItemOutcome::Failed;
            }
        };

        let Some(plan) = ctx.plans.get(&category) else {
            warn!("{category} 沒有對應的輸出資料夾");
            return ItemOutcome::Failed;
        };

        let source_name = match (category.media_kind(), category.lookup_mode()) {
            (Some(kind), Some(mode)) => ctx.content_map(kind).and_then(|map| {
                container_path
                    .or_else(|| item.file_path())
                    .and_then(|path| resolve_source(map, path, mode))
            }),
            _ => None,
        };

        let destination = resolve_destination(plan, source_name).join(&filename);
        let source = PathBuf::from(translate_artwork_path(artwork));

        match self.fs.copy(&source, &destination) {
            Ok(()) => {
                debug!("已複製 {} -> {}", source.display(), destination.display());
                ItemOutcome::Copied
            }
            Err(e) => {
                warn!("無法複製 {} 的 {category}: {e:#}", item.display_title());
                ItemOutcome::Failed
            }
        }
    }
}
