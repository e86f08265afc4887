use super::external_command::run_command;
use anyhow::{Context, Result};
use log::info;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// ffmpeg 輸出的快照檔名 `tv00001.jpg`
pub const SNAPSHOT_PATTERN: &str = "tv%05d.jpg";

static REGEX_SNAPSHOT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tv(\d+)\.jpg$").expect("Invalid regex"));

/// 以固定間隔從影片擷取快照
pub trait SnapshotExtractor: Send + Sync {
    /// 回傳依時間順序排列的快照路徑
    fn extract(&self, video: &str, rate_seconds: f64, out_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// 使用 ffmpeg `fps` 濾鏡擷取
#[derive(Debug, Default, Clone)]
pub struct FfmpegSnapshotExtractor;

impl SnapshotExtractor for FfmpegSnapshotExtractor {
    fn extract(&self, video: &str, rate_seconds: f64, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let filter = format!("fps=1/{rate_seconds}");
        let output_pattern = out_dir.join(SNAPSHOT_PATTERN).to_string_lossy().to_string();

        run_command(
            "ffmpeg",
            [
                "-hide_banner",
                "-nostdin",
                "-loglevel",
                "error",
                "-i",
                video,
                "-f",
                "image2",
                "-bt",
                "20M",
                "-vf",
                filter.as_str(),
                "-aspect",
                "16:9",
                output_pattern.as_str(),
            ],
        )
        .with_context(|| format!("無法擷取快照: {video}"))?;

        let snapshots = collect_snapshots(out_dir)?;
        info!("已擷取 {} 張快照到 {}", snapshots.len(), out_dir.display());
        Ok(snapshots)
    }
}

/// 收集資料夾中的快照並依編號排序
pub fn collect_snapshots(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut numbered: Vec<(u64, PathBuf)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let number = REGEX_SNAPSHOT_NAME
                .captures(entry.file_name().to_str()?)?
                .get(1)?
                .as_str()
                .parse()
                .ok()?;
            Some((number, entry.into_path()))
        })
        .collect();

    numbered.sort_by_key(|(number, _)| *number);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_snapshots_sorted_numerically() {
        let dir = tempdir().unwrap();
        for name in ["tv00010.jpg", "tv00002.jpg", "tv00001.jpg", "sprite.jpg", "tv1.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let snapshots = collect_snapshots(dir.path()).unwrap();
        let names: Vec<_> = snapshots
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["tv00001.jpg", "tv00002.jpg", "tv00010.jpg"]);
    }
}
