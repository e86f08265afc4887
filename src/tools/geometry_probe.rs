use super::external_command::run_command;
use crate::component::sprite_generator::CellGeometry;
use anyhow::{Context, Result};
use std::path::Path;

/// 查詢影像尺寸
pub trait GeometryProbe: Send + Sync {
    fn probe(&self, image: &Path) -> Result<CellGeometry>;
}

/// ImageMagick `identify -format "%g - %f\n"`
///
/// 輸出範例：`200x112+0+0 - tv00001.jpg`
#[derive(Debug, Default, Clone)]
pub struct IdentifyGeometryProbe;

impl GeometryProbe for IdentifyGeometryProbe {
    fn probe(&self, image: &Path) -> Result<CellGeometry> {
        let path = image.to_string_lossy().to_string();
        let output = run_command("identify", ["-format", "%g - %f\n", path.as_str()])?;

        let geometry = output.split(" - ").next().unwrap_or_default();
        CellGeometry::parse(geometry)
            .with_context(|| format!("無法取得縮圖尺寸: {}", image.display()))
    }
}
