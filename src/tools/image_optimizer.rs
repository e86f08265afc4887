use super::external_command::run_command;
use crate::config::SpriteOptimizer;
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

/// 就地壓縮精靈圖
pub trait ImageOptimizer: Send + Sync {
    fn optimize(&self, image: &Path) -> Result<()>;
}

/// `jpegoptim`，可指定最高品質強制重新壓縮
#[derive(Debug, Default, Clone)]
pub struct JpegoptimOptimizer {
    pub max_quality: Option<u8>,
}

impl ImageOptimizer for JpegoptimOptimizer {
    fn optimize(&self, image: &Path) -> Result<()> {
        let path = image.to_string_lossy().to_string();
        match self.max_quality {
            Some(quality) => {
                let quality = format!("-m{quality}");
                run_command("jpegoptim", [quality.as_str(), path.as_str()])?;
            }
            None => {
                run_command("jpegoptim", [path.as_str()])?;
            }
        }
        Ok(())
    }
}

/// `optipng`，適用 PNG 精靈圖
#[derive(Debug, Default, Clone)]
pub struct OptipngOptimizer;

impl ImageOptimizer for OptipngOptimizer {
    fn optimize(&self, image: &Path) -> Result<()> {
        let path = image.to_string_lossy().to_string();
        run_command("optipng", [path.as_str()])?;
        Ok(())
    }
}

/// 依設定建立壓縮工具，`None` 代表不壓縮
#[must_use]
pub fn optimizer_for(setting: &SpriteOptimizer) -> Option<Box<dyn ImageOptimizer>> {
    match setting {
        SpriteOptimizer::None => None,
        SpriteOptimizer::Jpegoptim { max_quality } => Some(Box::new(JpegoptimOptimizer {
            max_quality: *max_quality,
        })),
        SpriteOptimizer::Optipng => Some(Box::new(OptipngOptimizer)),
    }
}

pub fn optimize_all(optimizer: &dyn ImageOptimizer, images: &[PathBuf]) -> Result<()> {
    for image in images {
        optimizer.optimize(image)?;
        info!("已壓縮精靈圖: {}", image.display());
    }
    Ok(())
}
