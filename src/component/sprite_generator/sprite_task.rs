use crate::config::SpriteSettings;
use crate::tools::{prepare_output_dir, remove_bitrate_suffix, validate_video_input};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 單一影片的輸出位置
#[derive(Debug, Clone)]
pub struct SpriteTask {
    /// 本機路徑或 URL，原樣交給 ffmpeg
    pub video: String,
    pub out_dir: PathBuf,
    pub sprite_file: PathBuf,
    pub vtt_file: PathBuf,
}

impl SpriteTask {
    /// 驗證輸入並準備輸出資料夾
    ///
    /// 檔名結尾的位元率會被移除，`clip_3200.mp4` 輸出為
    /// `clip_vtt/clip_sprite.jpg` 與 `clip_vtt/clip_thumbs.vtt`。
    pub fn new(video: &str, settings: &SpriteSettings) -> Result<Self> {
        validate_video_input(video)?;

        let file_name = video_file_name(video)
            .with_context(|| format!("無法取得影片檔名: {video}"))?;
        let file_name = remove_bitrate_suffix(&file_name);
        let stem = Path::new(&file_name)
            .file_stem()
            .map_or_else(|| file_name.clone(), |s| s.to_string_lossy().to_string());

        let out_dir = prepare_output_dir(
            Path::new(&settings.thumb_out_dir),
            &stem,
            settings.use_unique_out_dir,
        )?;

        Ok(Self {
            video: video.trim().to_string(),
            sprite_file: out_dir.join(format!("{stem}_{}", settings.sprite_name)),
            vtt_file: out_dir.join(format!("{stem}_{}", settings.vtt_file_name)),
            out_dir,
        })
    }
}

/// 取得最後一段路徑，URL 會去掉查詢字串
fn video_file_name(video: &str) -> Option<String> {
    let without_query = video.trim().split(['?', '#']).next()?;
    without_query
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_video_file_name() {
        assert_eq!(
            video_file_name("/videos/clip_3200.mp4").as_deref(),
            Some("clip_3200.mp4")
        );
        assert_eq!(
            video_file_name("https://cdn.example.com/a/b/movie.mp4?token=1").as_deref(),
            Some("movie.mp4")
        );
        assert_eq!(video_file_name("https://cdn.example.com/"), None);
    }

    #[test]
    fn test_task_paths() {
        let dir = tempdir().unwrap();
        let video = dir.path().join("clip_3200.mp4");
        fs::write(&video, b"video").unwrap();

        let settings = SpriteSettings {
            thumb_out_dir: dir.path().join("thumbs").to_string_lossy().to_string(),
            ..SpriteSettings::default()
        };

        let task = SpriteTask::new(&video.to_string_lossy(), &settings).unwrap();
        assert_eq!(task.out_dir, dir.path().join("thumbs").join("clip_vtt"));
        assert_eq!(task.sprite_file, task.out_dir.join("clip_sprite.jpg"));
        assert_eq!(task.vtt_file, task.out_dir.join("clip_thumbs.vtt"));
        assert!(task.out_dir.is_dir());
    }

    #[test]
    fn test_missing_video_is_rejected() {
        let dir = tempdir().unwrap();
        let settings = SpriteSettings {
            thumb_out_dir: dir.path().to_string_lossy().to_string(),
            ..SpriteSettings::default()
        };
        let missing = dir.path().join("missing.mp4");
        assert!(SpriteTask::new(&missing.to_string_lossy(), &settings).is_err());
    }
}
