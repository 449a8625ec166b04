//! 媒體來源對應
//!
//! 建立「正規化檔案路徑 → 媒體來源名稱」的對照表，用來決定圖片放在哪個來源子資料夾

use crate::library::{EntityKind, LibraryQuery, MediaLibrary, MediaSource, PathFilter, SourceContent};
use crate::tools::normalize_path;
use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// 以完整檔案路徑查詢（電影、單集）
    Exact,
    /// 以影集根資料夾查詢，取第一個以此路徑開頭的項目（影集、季）
    Prefix,
}

/// 保留插入順序的路徑對照表
///
/// 重複的路徑保留原本的位置，但來源名稱以最後一次寫入為準
#[derive(Debug, Clone, Default)]
pub struct SourceContentMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SourceContentMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_path: &str, source_name: &str) {
        let key = normalize_path(file_path);
        match self.index.get(&key) {
            Some(&position) => {
                let entry = &mut self.entries[position];
                if entry.1 != source_name {
                    debug!("{key} 同時屬於 {} 與 {source_name}", entry.1);
                }
                entry.1 = source_name.to_string();
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, source_name.to_string()));
            }
        }
    }

    #[must_use]
    pub fn get(&self, file_path: &str) -> Option<&str> {
        self.index
            .get(&normalize_path(file_path))
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, source)| (path.as_str(), source.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 依內容類型建立對照表
///
/// 只處理內容類型符合的來源；電影記錄影片檔，影集記錄影集資料夾與所有單集檔案。
/// 查詢失敗的來源只記錄警告，不影響其他來源
pub fn build_content_map<L: MediaLibrary + ?Sized>(
    library: &L,
    sources: &[MediaSource],
    kind: SourceContent,
) -> SourceContentMap {
    let mut map = SourceContentMap::new();

    let entities: &[EntityKind] = match kind {
        SourceContent::Movies => &[EntityKind::Movies],
        SourceContent::TvShows => &[EntityKind::TvShows, EntityKind::Episodes],
        SourceContent::None => &[],
    };

    for source in sources.iter().filter(|s| s.content == kind) {
        for &entity in entities {
            let query = LibraryQuery::new(entity, &["file"])
                .with_path_filter(Some(PathFilter::StartsWith(source.path.clone())));

            match library.query(&query) {
                Ok(items) => {
                    for path in items.iter().filter_map(|item| item.file_path()) {
                        map.insert(path, &source.name);
                    }
                }
                Err(e) => warn!("無法查詢媒體來源 {} ({}): {e:#}", source.name, source.path),
            }
        }
    }

    info!("已識別 {} 個 {kind} 項目", map.len());
    map
}

/// 找出項目所屬的媒體來源
#[must_use]
pub fn resolve_source<'a>(
    map: &'a SourceContentMap,
    file_path: &str,
    mode: LookupMode,
) -> Option<&'a str> {
    match mode {
        LookupMode::Exact => map.get(file_path),
        LookupMode::Prefix => {
            let container = normalize_path(file_path);
            map.iter()
                .find(|(path, _)| path.starts_with(&container))
                .map(|(_, source)| source)
        }
    }
}
