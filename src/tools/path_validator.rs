use crate::tools::path_normalizer::normalize_path;
use anyhow::{Result, bail};
use std::path::Path;

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

/// `path` 是否等於 `ancestor` 或位於其下（以正規化路徑比較）
#[must_use]
pub fn is_same_or_inside(path: &str, ancestor: &str) -> bool {
    let path = normalize_path(path);
    let ancestor = normalize_path(ancestor);

    if ancestor.is_empty() {
        return false;
    }
    if path == ancestor {
        return true;
    }
    if ancestor == "/" {
        return path.starts_with('/');
    }
    path.strip_prefix(&ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_same_or_inside() {
        assert!(is_same_or_inside("/mnt/Movies/", "/mnt/movies"));
        assert!(is_same_or_inside("/mnt/movies/hd", "/mnt"));
        assert!(!is_same_or_inside("/mnt/movies2", "/mnt/movies"));
        assert!(!is_same_or_inside("/mnt", "/mnt/movies"));
        assert!(!is_same_or_inside("/mnt", ""));
    }

    #[test]
    fn test_validate_file_exists() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("library.json");
        std::fs::write(&file, "{}").unwrap();

        assert!(validate_file_exists(&file).is_ok());
        assert!(validate_file_exists(temp_dir.path()).is_err());
        assert!(validate_file_exists(&temp_dir.path().join("missing.json")).is_err());
    }
}
