use crate::config::types::SpriteSettings;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

impl SpriteSettings {
    /// 設定檔不存在時使用預設值，格式錯誤則回報
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("找不到設定檔 {}，使用預設值", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
