//! 路徑與名稱正規化
//!
//! 路徑正規化用於比對不同來源的檔案路徑；名稱正規化用於移除重音符號，
//! 讓不支援非 ASCII 字元的檔案系統（例如 NFS）也能寫入

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const IMAGE_SCHEME: &str = "image://";

/// 正規化路徑：統一分隔符號、轉小寫並移除結尾分隔符號
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/").to_lowercase();
    let trimmed = unified.trim_end_matches('/');

    if trimmed.is_empty() && !unified.is_empty() {
        return "/".to_string();
    }

    trimmed.to_string()
}

/// 移除名稱中的重音符號與其他非 ASCII 字元
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect()
}

/// 依使用者設定決定是否正規化名稱
#[must_use]
pub fn apply_name_normalization(name: &str, enabled: bool) -> String {
    if enabled {
        normalize_name(name)
    } else {
        name.to_string()
    }
}

/// 將媒體庫中的圖片參照轉換為實際路徑
///
/// 媒體庫會以 `image://<url 編碼路徑>/` 包裝圖片位置，一般路徑則原樣回傳
#[must_use]
pub fn translate_artwork_path(reference: &str) -> String {
    let Some(encoded) = reference.strip_prefix(IMAGE_SCHEME) else {
        return reference.to_string();
    };
    let encoded = encoded.strip_suffix('/').unwrap_or(encoded);

    match urlencoding::decode(encoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => encoded.to_string(),
    }
}
