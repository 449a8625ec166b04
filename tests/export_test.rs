//! 匯出流程整合測試
//!
//! 以記錄呼叫的檔案系統與可中斷的進度回報驗證整體流程

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use artwork_export::component::artwork_exporter::{
    ArtworkCategory, CategoryCount, ExportEngine, ExportError, ExportState, PROGRESS_TITLE,
};
use artwork_export::config::{ArtworkToggles, UserSettings};
use artwork_export::library::JsonLibrary;
use artwork_export::tools::{FileSystem, LocalFileSystem, ProgressReporter};
use tempfile::TempDir;

/// 記錄所有操作的檔案系統，可指定建立失敗的資料夾
#[derive(Default)]
struct RecordingFs {
    existing: RefCell<HashSet<PathBuf>>,
    mkdirs: RefCell<Vec<PathBuf>>,
    copies: RefCell<Vec<(PathBuf, PathBuf)>>,
    removed: RefCell<Vec<PathBuf>>,
    fail_mkdir_ending_with: Option<&'static str>,
    fail_copy_from: Option<&'static str>,
}

impl RecordingFs {
    fn copy_destinations(&self) -> Vec<PathBuf> {
        self.copies.borrow().iter().map(|(_, dst)| dst.clone()).collect()
    }
}

impl FileSystem for RecordingFs {
    fn exists(&self, path: &Path) -> bool {
        self.existing.borrow().contains(path)
    }

    fn mkdir(&self, path: &Path) -> Result<()> {
        self.mkdirs.borrow_mut().push(path.to_path_buf());
        if let Some(suffix) = self.fail_mkdir_ending_with {
            if path.ends_with(suffix) {
                bail!("permission denied");
            }
        }
        self.existing.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn copy(&self, source: &Path, destination: &Path) -> Result<()> {
        if self.fail_copy_from.is_some_and(|bad| source == Path::new(bad)) {
            bail!("unreadable artwork");
        }
        self.copies
            .borrow_mut()
            .push((source.to_path_buf(), destination.to_path_buf()));
        Ok(())
    }

    fn list_directory_entries(&self, path: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let dirs = self
            .existing
            .borrow()
            .iter()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        Ok((dirs, Vec::new()))
    }

    fn remove_tree(&self, path: &Path) {
        self.removed.borrow_mut().push(path.to_path_buf());
        self.existing.borrow_mut().retain(|p| !p.starts_with(path));
    }
}

/// 在指定次數的進度更新後回報中斷
struct CancelAfter {
    limit: Option<usize>,
    updates: Cell<usize>,
    ended: Cell<bool>,
}

impl CancelAfter {
    fn never() -> Self {
        Self {
            limit: None,
            updates: Cell::new(0),
            ended: Cell::new(false),
        }
    }

    fn after(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::never()
        }
    }
}

impl ProgressReporter for CancelAfter {
    fn begin(&self, _title: &str) {}

    fn update(&self, _percent: u64, _message: &str) {
        self.updates.set(self.updates.get() + 1);
    }

    fn is_cancelled(&self) -> bool {
        self.limit.is_some_and(|limit| self.updates.get() >= limit)
    }

    fn end(&self) {
        self.ended.set(true);
    }
}

/// 依序記錄所有進度回報
#[derive(Default)]
struct RecordingProgress {
    calls: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingProgress {
    fn begin(&self, title: &str) {
        self.calls.borrow_mut().push(format!("begin {title}"));
    }

    fn update(&self, percent: u64, message: &str) {
        self.calls.borrow_mut().push(format!("{percent} {message}"));
    }

    fn is_cancelled(&self) -> bool {
        false
    }

    fn end(&self) {
        self.calls.borrow_mut().push("end".to_string());
    }
}

const LIBRARY: &str = r#"{
    "sources": [
        {"name": "A", "path": "/mnt/a/", "content": "movies"},
        {"name": "B", "path": "/mnt/b/", "content": "movies"},
        {"name": "Series", "path": "/mnt/tv/", "content": "tvshows"},
        {"name": "Music", "path": "/mnt/music/", "content": ""}
    ],
    "movies": [
        {"movieid": 1, "title": "Up", "year": 2009, "file": "/mnt/b/Up/Up.mkv", "fanart": "http://x/fanart.jpg", "thumbnail": "/art/up-thumb.jpg", "art": {"poster": "/art/up-poster.jpg"}},
        {"movieid": 2, "title": "Heat", "year": 1995, "file": "/mnt/a/Heat.mkv", "fanart": "/art/heat.jpg"},
        {"movieid": 3, "title": "Stray", "year": 2001, "file": "/mnt/usb/Stray.mkv", "fanart": "/art/stray.jpg"},
        {"movieid": 4, "title": "Blank", "year": 2010, "file": "/mnt/a/Blank.mkv", "fanart": ""}
    ],
    "tvshows": [
        {"tvshowid": 10, "title": "Show", "file": "/mnt/tv/Show/", "fanart": "/art/show.jpg"}
    ],
    "episodes": [
        {"tvshowid": 10, "title": "Pilot", "showtitle": "Show", "season": 1, "episode": 3, "file": "/mnt/tv/Show/s01e03.mkv", "thumbnail": "/art/ep.jpg"}
    ],
    "seasons": [
        {"tvshowid": 10, "season": 1, "label": "Season 1", "showtitle": "Show", "thumbnail": "/art/s1.jpg"},
        {"tvshowid": 10, "season": 2, "label": "Season 2", "showtitle": "Show", "thumbnail": "/art/s2.jpg"}
    ],
    "artists": [
        {"label": "Band", "fanart": "/art/band.jpg", "thumbnail": "/art/band-thumb.jpg"}
    ],
    "albums": [
        {"title": "Debut", "artist": ["Band"], "thumbnail": "/art/debut.jpg"},
        {"title": "Nobody", "artist": [], "thumbnail": "/art/nobody.jpg"}
    ]
}"#;

fn only(categories: &[ArtworkCategory]) -> ArtworkToggles {
    let mut toggles = ArtworkToggles::default();
    for category in ArtworkCategory::ALL {
        category.set_enabled(&mut toggles, categories.contains(&category));
    }
    toggles
}

fn settings(categories: &[ArtworkCategory]) -> UserSettings {
    UserSettings {
        artwork: only(categories),
        destination: "/export".to_string(),
        ..UserSettings::default()
    }
}

fn library() -> JsonLibrary {
    JsonLibrary::from_json(LIBRARY).unwrap()
}

#[test]
fn test_movie_fanart_split_by_source() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::never();

    let mut settings = settings(&[ArtworkCategory::MovieFanart]);
    settings.split.split_media_sources = true;
    settings.split.split_movies_sources = true;

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine.run(&settings).unwrap();

    assert_eq!(report.state, ExportState::Done);
    assert_eq!(engine.state(), ExportState::Done);
    assert!(progress.ended.get());

    let destinations = fs.copy_destinations();
    assert!(destinations.contains(&PathBuf::from("/export/MovieFanart/B/Up (2009).jpg")));
    assert!(destinations.contains(&PathBuf::from("/export/MovieFanart/A/Heat (1995).jpg")));
    // 不屬於任何來源的項目放在分類根目錄
    assert!(destinations.contains(&PathBuf::from("/export/MovieFanart/Stray (2001).jpg")));

    assert_eq!(
        report.count(ArtworkCategory::MovieFanart),
        Some(CategoryCount {
            copied: 3,
            failed: 0,
            skipped: 1,
        })
    );
    assert!(fs.mkdirs.borrow().contains(&PathBuf::from("/export/MovieFanart/A")));
    assert!(fs.mkdirs.borrow().contains(&PathBuf::from("/export/MovieFanart/B")));
}

#[test]
fn test_without_split_everything_goes_to_category_root() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::never();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine
        .run(&settings(&[ArtworkCategory::MovieFanart]))
        .unwrap();

    assert_eq!(report.total_copied(), 3);
    for destination in fs.copy_destinations() {
        assert_eq!(destination.parent(), Some(Path::new("/export/MovieFanart")));
    }
}

#[test]
fn test_destination_equal_to_source_is_refused() {
    let library = library();
    let fs = RecordingFs::default();
    fs.existing.borrow_mut().insert(PathBuf::from("/mnt/b"));
    let progress = CancelAfter::never();

    let mut settings = settings(&[ArtworkCategory::MovieFanart, ArtworkCategory::MovieThumbs]);
    settings.destination = "/mnt/b".to_string();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let result = engine.run(&settings);

    assert!(matches!(result, Err(ExportError::DestinationIsSource { .. })));
    assert_eq!(engine.state(), ExportState::Refused);
    assert!(fs.mkdirs.borrow().is_empty());
    assert!(fs.copies.borrow().is_empty());
    assert!(fs.removed.borrow().is_empty());
}

#[test]
fn test_destination_containing_source_is_refused() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::never();

    let mut settings = settings(&[ArtworkCategory::MovieFanart]);
    settings.destination = "/MNT".to_string();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    assert!(engine.run(&settings).is_err());
    assert!(fs.copies.borrow().is_empty());
}

#[test]
fn test_directory_failure_blocks_all_copies() {
    let library = library();
    let fs = RecordingFs {
        fail_mkdir_ending_with: Some("MovieThumbs"),
        ..RecordingFs::default()
    };
    let progress = CancelAfter::never();

    let settings = settings(&[
        ArtworkCategory::MovieFanart,
        ArtworkCategory::MovieThumbs,
        ArtworkCategory::EpisodeThumbs,
    ]);

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let result = engine.run(&settings);

    match result {
        Err(ExportError::DirectoryCreation { failed }) => {
            assert_eq!(failed, vec![PathBuf::from("/export/MovieThumbs")]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(engine.state(), ExportState::SetupFailed);
    assert!(fs.copies.borrow().is_empty());
    // 後續分類的資料夾仍會嘗試建立
    assert!(fs.mkdirs.borrow().contains(&PathBuf::from("/export/EpisodeThumbs")));
}

#[test]
fn test_cancel_mid_category_skips_remaining() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::after(2);

    let settings = settings(&[ArtworkCategory::MovieFanart, ArtworkCategory::MovieThumbs]);

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine.run(&settings).unwrap();

    assert_eq!(report.state, ExportState::Cancelled);
    assert_eq!(fs.copies.borrow().len(), 2);
    assert_eq!(report.counts.len(), 1);
    assert_eq!(
        report.count(ArtworkCategory::MovieFanart).map(|c| c.copied),
        Some(2)
    );
    assert_eq!(report.count(ArtworkCategory::MovieThumbs), None);
    assert!(progress.ended.get());
}

#[test]
fn test_cancel_before_first_category() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::after(0);

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine
        .run(&settings(&[ArtworkCategory::MovieFanart]))
        .unwrap();

    assert_eq!(report.state, ExportState::Cancelled);
    assert!(report.counts.is_empty());
    assert!(fs.copies.borrow().is_empty());
}

#[test]
fn test_season_and_episode_thumbs_resolve_tv_source() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::never();

    let mut settings = settings(&[
        ArtworkCategory::TvShowFanart,
        ArtworkCategory::SeasonThumbs,
        ArtworkCategory::EpisodeThumbs,
    ]);
    settings.split.split_media_sources = true;
    settings.split.split_tvshows_sources = true;

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine.run(&settings).unwrap();

    let destinations = fs.copy_destinations();
    assert!(destinations.contains(&PathBuf::from("/export/TVShowFanart/Series/Show.jpg")));
    assert!(destinations.contains(&PathBuf::from("/export/SeasonThumbs/Series/Show - Season 1.jpg")));
    assert!(destinations.contains(&PathBuf::from("/export/SeasonThumbs/Series/Show - Season 2.jpg")));
    assert!(destinations.contains(&PathBuf::from(
        "/export/EpisodeThumbs/Series/Show - s0103 - Pilot.jpg"
    )));
    assert_eq!(
        report.count(ArtworkCategory::SeasonThumbs).map(|c| c.copied),
        Some(2)
    );
}

#[test]
fn test_cancel_during_season_level() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::after(1);

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine
        .run(&settings(&[
            ArtworkCategory::SeasonThumbs,
            ArtworkCategory::EpisodeThumbs,
        ]))
        .unwrap();

    assert_eq!(report.state, ExportState::Cancelled);
    assert_eq!(fs.copies.borrow().len(), 1);
    assert_eq!(report.count(ArtworkCategory::EpisodeThumbs), None);
}

#[test]
fn test_path_restriction_skips_music_entities() {
    let library = library();
    let fs = RecordingFs::default();
    let progress = CancelAfter::never();

    let mut settings = settings(&[
        ArtworkCategory::MovieFanart,
        ArtworkCategory::ArtistFanart,
        ArtworkCategory::AlbumThumbs,
    ]);
    settings.restrict_to_path = Some("/mnt/a/".to_string());

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine.run(&settings).unwrap();

    assert_eq!(report.destination, PathBuf::from("/export/a"));
    assert_eq!(
        fs.copy_destinations(),
        vec![PathBuf::from("/export/a/MovieFanart/Heat (1995).jpg")]
    );
    assert_eq!(report.count(ArtworkCategory::ArtistFanart), None);
    assert_eq!(report.count(ArtworkCategory::AlbumThumbs), None);
}

#[test]
fn test_album_without_artist_and_copy_failure_are_not_fatal() {
    let library = library();
    let fs = RecordingFs {
        fail_copy_from: Some("/art/band.jpg"),
        ..RecordingFs::default()
    };
    let progress = CancelAfter::never();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine
        .run(&settings(&[
            ArtworkCategory::ArtistFanart,
            ArtworkCategory::AlbumThumbs,
        ]))
        .unwrap();

    assert_eq!(report.state, ExportState::Done);
    assert_eq!(
        report.count(ArtworkCategory::ArtistFanart),
        Some(CategoryCount {
            copied: 0,
            failed: 1,
            skipped: 0,
        })
    );
    assert_eq!(
        report.count(ArtworkCategory::AlbumThumbs),
        Some(CategoryCount {
            copied: 1,
            failed: 1,
            skipped: 0,
        })
    );
    assert_eq!(
        fs.copy_destinations(),
        vec![PathBuf::from("/export/AlbumThumbs/Band - Debut.jpg")]
    );
}

#[test]
fn test_no_sources_is_refused() {
    let library = JsonLibrary::from_json(r#"{"movies": []}"#).unwrap();
    let fs = RecordingFs::default();
    let progress = CancelAfter::never();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let result = engine.run(&settings(&[ArtworkCategory::MovieFanart]));

    assert!(matches!(result, Err(ExportError::NoMediaSources)));
    assert!(fs.mkdirs.borrow().is_empty());
}

#[test]
fn test_previous_output_is_cleared() {
    let library = library();
    let fs = RecordingFs::default();
    {
        let mut existing = fs.existing.borrow_mut();
        existing.insert(PathBuf::from("/export"));
        existing.insert(PathBuf::from("/export/OldFanart"));
    }
    let progress = CancelAfter::never();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    engine
        .run(&settings(&[ArtworkCategory::MovieFanart]))
        .unwrap();

    assert_eq!(*fs.removed.borrow(), vec![PathBuf::from("/export/OldFanart")]);
}

#[test]
fn test_local_export_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let art_dir = temp_dir.path().join("art");
    let destination = temp_dir.path().join("export");
    fs::create_dir_all(&art_dir).unwrap();
    fs::create_dir_all(destination.join("Stale")).unwrap();
    fs::write(destination.join("Stale").join("old.jpg"), "old").unwrap();

    let poster = art_dir.join("amelie poster.jpg");
    fs::write(&poster, "poster-bytes").unwrap();
    let encoded = format!(
        "image://{}/",
        poster.to_string_lossy().replace('/', "%2f").replace(' ', "%20")
    );

    let library_json = serde_json::json!({
        "sources": [
            {"name": "Films", "path": "/mnt/films/", "content": "movies"}
        ],
        "movies": [
            {"title": "Amélie", "year": 2001, "file": "/mnt/films/Amelie.mkv", "art": {"poster": encoded}},
            {"title": "Missing", "year": 2002, "file": "/mnt/films/Missing.mkv", "art": {"poster": "/nowhere/missing.jpg"}}
        ]
    });
    let library = JsonLibrary::from_json(&library_json.to_string()).unwrap();

    let mut settings = settings(&[ArtworkCategory::MoviePosters]);
    settings.destination = destination.to_string_lossy().to_string();
    settings.normalize_names = true;
    settings.split.split_media_sources = true;
    settings.split.split_movies_sources = true;

    let progress = CancelAfter::never();
    let mut engine = ExportEngine::new(&library, &LocalFileSystem, &progress);
    let report = engine.run(&settings).unwrap();

    let exported = destination
        .join("MoviePosters")
        .join("Films")
        .join("Amelie (2001).jpg");
    assert_eq!(fs::read_to_string(exported).unwrap(), "poster-bytes");
    assert!(!destination.join("Stale").exists());
    assert_eq!(
        report.count(ArtworkCategory::MoviePosters),
        Some(CategoryCount {
            copied: 1,
            failed: 1,
            skipped: 0,
        })
    );
}

#[test]
fn test_progress_reports_each_item() {
    let library = JsonLibrary::from_json(
        r#"{
            "sources": [{"name": "A", "path": "/mnt/a/", "content": "movies"}],
            "movies": [
                {"title": "Heat", "year": 1995, "file": "/mnt/a/Heat.mkv", "fanart": "/art/heat.jpg"},
                {"title": "Blank", "year": 2010, "file": "/mnt/a/Blank.mkv", "fanart": ""},
                {"title": "Up", "year": 2009, "file": "/mnt/a/Up.mkv", "fanart": "/art/up.jpg"}
            ]
        }"#,
    )
    .unwrap();
    let fs = RecordingFs::default();
    let progress = RecordingProgress::default();

    let mut engine = ExportEngine::new(&library, &fs, &progress);
    let report = engine
        .run(&settings(&[ArtworkCategory::MovieFanart]))
        .unwrap();

    assert_eq!(
        *progress.calls.borrow(),
        vec![
            format!("begin {PROGRESS_TITLE}"),
            "33 movie fanart: 1".to_string(),
            "66 movie fanart: 2".to_string(),
            "100 movie fanart: 2".to_string(),
            "end".to_string(),
        ]
    );
    assert_eq!(
        report.count(ArtworkCategory::MovieFanart),
        Some(CategoryCount {
            copied: 2,
            failed: 0,
            skipped: 1,
        })
    );
}
