use anyhow::{Result, bail};
use std::path::Path;

/// 是否為交給 ffmpeg 直接讀取的遠端影片
#[must_use]
pub fn is_remote_video(video: &str) -> bool {
    video.trim_start().starts_with("http")
}

/// 本機影片必須存在且為檔案，遠端影片不檢查
pub fn validate_video_input(video: &str) -> Result<()> {
    if is_remote_video(video) {
        return Ok(());
    }
    let path = Path::new(video);
    if !path.exists() {
        bail!("檔案不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remote_video_skips_check() {
        assert!(is_remote_video("https://cdn.example.com/clip.mp4"));
        assert!(validate_video_input("http://example.com/missing.mp4").is_ok());
    }

    #[test]
    fn test_local_video_must_exist() {
        let dir = tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        assert!(validate_video_input(&video.to_string_lossy()).is_err());

        std::fs::write(&video, b"not really a video").unwrap();
        assert!(validate_video_input(&video.to_string_lossy()).is_ok());

        assert!(validate_video_input(&dir.path().to_string_lossy()).is_err());
    }
}
