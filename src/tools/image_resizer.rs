use super::external_command::run_command;
use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 預設縮圖寬度
pub const DEFAULT_THUMB_WIDTH: u32 = 200;

/// 將單一影像就地縮放到指定寬度，高度依比例計算
pub trait ImageResizer: Send + Sync {
    fn resize(&self, image: &Path, width: u32) -> Result<()>;
}

/// ImageMagick `mogrify -geometry Wx`
#[derive(Debug, Default, Clone)]
pub struct MogrifyResizer;

impl ImageResizer for MogrifyResizer {
    fn resize(&self, image: &Path, width: u32) -> Result<()> {
        let geometry = format!("{width}x");
        let path = image.to_string_lossy().to_string();
        run_command("mogrify", ["-geometry", geometry.as_str(), path.as_str()])?;
        Ok(())
    }
}

/// macOS 內建的 `sips`，產生的 JPEG 稍小
#[derive(Debug, Default, Clone)]
pub struct SipsResizer;

impl ImageResizer for SipsResizer {
    fn resize(&self, image: &Path, width: u32) -> Result<()> {
        let width = width.to_string();
        let path = image.to_string_lossy().to_string();
        run_command("sips", ["--resampleWidth", width.as_str(), path.as_str()])?;
        Ok(())
    }
}

/// 平行縮放所有快照
///
/// 每個工具程序處理一張圖，收到中斷信號後不再啟動新的程序。
/// 任何一張失敗都視為整體失敗，因為所有格子必須同尺寸。
pub fn resize_all(
    resizer: &dyn ImageResizer,
    images: &[PathBuf],
    width: u32,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<()> {
    let progress_bar = ProgressBar::new(images.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar.set_message("縮放快照中...");

    let failures: Vec<String> = images
        .par_iter()
        .filter_map(|image| {
            if shutdown_signal.load(Ordering::SeqCst) {
                return Some(format!("{}: 操作已取消", image.display()));
            }

            let result = resizer.resize(image, width);
            progress_bar.inc(1);

            match result {
                Ok(()) => {
                    debug!("已縮放: {}", image.display());
                    None
                }
                Err(e) => {
                    error!("縮放失敗 {}: {e}", image.display());
                    Some(format!("{}: {e}", image.display()))
                }
            }
        })
        .collect();

    progress_bar.finish_with_message("完成");

    if let Some(first) = failures.first() {
        bail!("{} 張快照縮放失敗，例如 {first}", failures.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingResizer {
        calls: Mutex<Vec<(PathBuf, u32)>>,
        fail_on: Option<PathBuf>,
    }

    impl ImageResizer for RecordingResizer {
        fn resize(&self, image: &Path, width: u32) -> Result<()> {
            if self.fail_on.as_deref() == Some(image) {
                bail!("broken image");
            }
            self.calls.lock().unwrap().push((image.to_path_buf(), width));
            Ok(())
        }
    }

    fn images(count: usize) -> Vec<PathBuf> {
        (1..=count)
            .map(|i| PathBuf::from(format!("/tmp/tv{i:05}.jpg")))
            .collect()
    }

    #[test]
    fn test_resize_all_visits_every_image() {
        let resizer = RecordingResizer::default();
        let signal = Arc::new(AtomicBool::new(false));

        resize_all(&resizer, &images(12), 160, &signal).unwrap();

        let calls = resizer.calls.lock().unwrap();
        assert_eq!(calls.len(), 12);
        assert!(calls.iter().all(|(_, width)| *width == 160));
    }

    #[test]
    fn test_resize_all_reports_failure() {
        let resizer = RecordingResizer {
            fail_on: Some(PathBuf::from("/tmp/tv00003.jpg")),
            ..Default::default()
        };
        let signal = Arc::new(AtomicBool::new(false));

        assert!(resize_all(&resizer, &images(5), 200, &signal).is_err());
    }

    #[test]
    fn test_resize_all_honours_shutdown() {
        let resizer = RecordingResizer::default();
        let signal = Arc::new(AtomicBool::new(true));

        assert!(resize_all(&resizer, &images(4), 200, &signal).is_err());
        assert!(resizer.calls.lock().unwrap().is_empty());
    }
}
