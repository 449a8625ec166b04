//! 檔案系統操作介面
//!
//! 匯出流程只透過 [`FileSystem`] 存取磁碟，測試時可替換成記錄呼叫的實作

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// 建立資料夾（已存在時視為成功）
    fn mkdir(&self, path: &Path) -> Result<()>;

    fn copy(&self, source: &Path, destination: &Path) -> Result<()>;

    /// 列出資料夾第一層的子資料夾與檔案
    fn list_directory_entries(&self, path: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)>;

    /// 盡力刪除整個資料夾，錯誤會被忽略
    fn remove_tree(&self, path: &Path);
}

/// 本機檔案系統
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn mkdir(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path).with_context(|| format!("無法建立資料夾: {}", path.display()))
    }

    fn copy(&self, source: &Path, destination: &Path) -> Result<()> {
        if is_remote_reference(source) {
            bail!("不支援遠端圖片，只能複製本機檔案: {}", source.display());
        }
        if !source.is_file() {
            bail!("來源圖片不存在: {}", source.display());
        }
        fs::copy(source, destination).with_context(|| {
            format!(
                "無法複製 {} 到 {}",
                source.display(),
                destination.display()
            )
        })?;
        Ok(())
    }

    fn list_directory_entries(&self, path: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry =
                entry.with_context(|| format!("無法讀取資料夾: {}", path.display()))?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            } else {
                files.push(entry.into_path());
            }
        }

        Ok((dirs, files))
    }

    fn remove_tree(&self, path: &Path) {
        if let Err(e) = fs::remove_dir_all(path) {
            log::debug!("無法刪除 {}: {e}", path.display());
        }
    }
}

/// 媒體庫中的圖片也可能是網址（例如 `http://…`）
fn is_remote_reference(path: &Path) -> bool {
    let Some((scheme, _)) = path.to_str().and_then(|p| p.split_once("://")) else {
        return false;
    };
    !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric())
}
