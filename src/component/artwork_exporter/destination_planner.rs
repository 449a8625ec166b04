//! 輸出資料夾規劃

use crate::tools::{FileSystem, apply_name_normalization};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 單一分類的輸出資料夾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub root: PathBuf,
    /// 來源名稱 → 來源子資料夾
    pub source_dirs: HashMap<String, PathBuf>,
}

/// 建立規劃時失敗的資料夾
pub type PlanFailures = Vec<PathBuf>;

/// 建立分類資料夾，需要時再為每個媒體來源建立子資料夾
///
/// 某個來源的子資料夾建立失敗時仍會繼續處理其他來源，失敗的路徑一併回傳
pub fn plan_category<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    source_names: &[String],
    split_enabled: bool,
    normalize_names: bool,
) -> (ExportPlan, PlanFailures) {
    let mut failures = PlanFailures::new();
    let mut plan = ExportPlan {
        root: root.to_path_buf(),
        source_dirs: HashMap::new(),
    };

    if !fs.exists(root) {
        if let Err(e) = fs.mkdir(root) {
            warn!("無法建立資料夾 {}: {e:#}", root.display());
            failures.push(root.to_path_buf());
        }
    }

    if !split_enabled {
        return (plan, failures);
    }

    for name in source_names {
        let dir = root.join(apply_name_normalization(name, normalize_names));
        match fs.mkdir(&dir) {
            Ok(()) => {
                debug!("已建立來源資料夾 {}", dir.display());
                plan.source_dirs.insert(name.clone(), dir);
            }
            Err(e) => {
                warn!("無法建立來源資料夾 {}: {e:#}", dir.display());
                failures.push(dir);
            }
        }
    }

    (plan, failures)
}

/// 取得項目的輸出資料夾；沒有對應來源時使用分類根目錄
#[must_use]
pub fn resolve_destination<'a>(plan: &'a ExportPlan, source_name: Option<&str>) -> &'a Path {
    source_name
        .and_then(|name| plan.source_dirs.get(name))
        .map_or(plan.root.as_path(), PathBuf::as_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::LocalFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_plan_without_split() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("MovieFanart");

        let (plan, failures) =
            plan_category(&LocalFileSystem, &root, &names(&["HD"]), false, false);

        assert!(failures.is_empty());
        assert!(root.is_dir());
        assert!(plan.source_dirs.is_empty());
        assert_eq!(resolve_destination(&plan, Some("HD")), root.as_path());
    }

    #[test]
    fn test_plan_with_split_and_normalization() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("TVShowFanart");

        let (plan, failures) = plan_category(
            &LocalFileSystem,
            &root,
            &names(&["Séries", "Kids"]),
            true,
            true,
        );

        assert!(failures.is_empty());
        assert!(root.join("Series").is_dir());
        assert!(root.join("Kids").is_dir());
        assert_eq!(
            resolve_destination(&plan, Some("Séries")),
            root.join("Series").as_path()
        );
        assert_eq!(resolve_destination(&plan, Some("Unknown")), root.as_path());
        assert_eq!(resolve_destination(&plan, None), root.as_path());
    }

    #[test]
    fn test_plan_existing_root_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("MoviePosters");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("keep.jpg"), "x").unwrap();

        let (_, failures) = plan_category(&LocalFileSystem, &root, &[], false, false);

        assert!(failures.is_empty());
        assert!(root.join("keep.jpg").exists());
    }

    #[test]
    fn test_failed_source_does_not_stop_others() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("MovieThumbs");
        fs::create_dir(&root).unwrap();
        // 同名檔案會讓建立資料夾失敗
        fs::write(root.join("Broken"), "file").unwrap();

        let (plan, failures) = plan_category(
            &LocalFileSystem,
            &root,
            &names(&["Broken", "Fine"]),
            true,
            false,
        );

        assert_eq!(failures, vec![root.join("Broken")]);
        assert!(root.join("Fine").is_dir());
        assert!(plan.source_dirs.contains_key("Fine"));
        assert!(!plan.source_dirs.contains_key("Broken"));
    }
}
