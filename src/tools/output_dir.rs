use anyhow::{Context, Result};
use log::info;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use uuid::Uuid;

/// 檔名結尾的位元率，例如 `clip_3200.mp4`
static REGEX_BITRATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)_\d+(\.[^.]*)$").expect("Invalid regex"));

/// 移除檔名結尾的位元率，同一部影片不同位元率共用同一組精靈圖
#[must_use]
pub fn remove_bitrate_suffix(file_name: &str) -> String {
    let trimmed = file_name.trim();
    REGEX_BITRATE_SUFFIX
        .captures(trimmed)
        .map_or_else(|| trimmed.to_string(), |c| format!("{}{}", &c[1], &c[2]))
}

/// 建立這次執行的輸出資料夾
///
/// 非唯一模式下重複使用 `<stem>_vtt`，並清空前一次的內容；
/// 唯一模式下每次建立新的 `<stem>.<uuid>`。
pub fn prepare_output_dir(base_dir: &Path, stem: &str, unique: bool) -> Result<PathBuf> {
    let out_dir = if unique {
        base_dir.join(format!("{stem}.{}", Uuid::new_v4()))
    } else {
        base_dir.join(format!("{stem}_vtt"))
    };

    if out_dir.exists() {
        if !unique {
            clear_directory(&out_dir)?;
        }
    } else {
        info!("建立輸出資料夾: {}", out_dir.display());
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("無法建立輸出資料夾: {}", out_dir.display()))?;
    }

    Ok(out_dir)
}

fn clear_directory(dir: &Path) -> Result<()> {
    info!("清除輸出資料夾先前的內容: {}", dir.display());
    for entry in fs::read_dir(dir).with_context(|| format!("無法讀取資料夾: {}", dir.display()))? {
        let path = entry?.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.with_context(|| format!("無法刪除: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remove_bitrate_suffix() {
        assert_eq!(remove_bitrate_suffix("myfile_3200.mp4"), "myfile.mp4");
        assert_eq!(remove_bitrate_suffix("my_file_800.mov"), "my_file.mov");
        assert_eq!(remove_bitrate_suffix("my_file.mp4"), "my_file.mp4");
        assert_eq!(remove_bitrate_suffix("clip.mp4"), "clip.mp4");
        assert_eq!(remove_bitrate_suffix(" clip_1.mp4 "), "clip.mp4");
    }

    #[test]
    fn test_prepare_output_dir_clears_previous_run() {
        let base = tempdir().unwrap();
        let first = prepare_output_dir(base.path(), "clip", false).unwrap();
        fs::write(first.join("tv00001.jpg"), b"old").unwrap();

        let second = prepare_output_dir(base.path(), "clip", false).unwrap();
        assert_eq!(first, second);
        assert_eq!(second, base.path().join("clip_vtt"));
        assert_eq!(fs::read_dir(&second).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_output_dir_unique() {
        let base = tempdir().unwrap();
        let first = prepare_output_dir(base.path(), "clip", true).unwrap();
        let second = prepare_output_dir(base.path(), "clip", true).unwrap();
        assert_ne!(first, second);
        assert!(first.is_dir());
        assert!(second.is_dir());
    }
}
