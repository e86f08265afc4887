use crate::component::sprite_generator::{DEFAULT_THUMB_RATE_SECONDS, DEFAULT_TIME_SYNC_ADJUST};
use crate::tools::DEFAULT_THUMB_WIDTH;
use serde::{Deserialize, Serialize};

/// 預設設定檔位置（目前工作目錄）
pub const SETTINGS_FILE: &str = "settings.json";

/// 精靈圖產生後的壓縮方式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum SpriteOptimizer {
    #[default]
    None,
    Jpegoptim {
        /// 最高品質（0-100），未設定時只做無損最佳化
        #[serde(default)]
        max_quality: Option<u8>,
    },
    Optipng,
}

/// 單次執行的所有設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSettings {
    /// 每隔幾秒擷取一張快照
    pub thumb_rate_seconds: f64,
    /// 縮圖寬度，高度依比例
    pub thumb_width: u32,
    /// 捨棄第一張快照，通常是黑畫面
    pub skip_first: bool,
    /// 單張精靈圖的網格上限，未設定時全部放在同一張
    pub max_grid_size: Option<usize>,
    /// 時間校正係數，乘上取樣間隔後加到每個時間點
    pub time_sync_adjust: f64,
    /// 使用 macOS `sips` 取代 `mogrify`
    pub use_sips: bool,
    pub sprite_name: String,
    pub vtt_file_name: String,
    pub thumb_out_dir: String,
    /// 每次建立新的輸出資料夾，而非清空重用
    pub use_unique_out_dir: bool,
    pub optimizer: SpriteOptimizer,
    /// 合成後刪除個別快照
    pub remove_thumbs: bool,
    /// 在每個 cue 前加上 `Img N`
    pub label_cues: bool,
}

impl Default for SpriteSettings {
    fn default() -> Self {
        Self {
            thumb_rate_seconds: DEFAULT_THUMB_RATE_SECONDS,
            thumb_width: DEFAULT_THUMB_WIDTH,
            skip_first: false,
            max_grid_size: None,
            time_sync_adjust: DEFAULT_TIME_SYNC_ADJUST,
            use_sips: false,
            sprite_name: "sprite.jpg".to_string(),
            vtt_file_name: "thumbs.vtt".to_string(),
            thumb_out_dir: "thumbs".to_string(),
            use_unique_out_dir: false,
            optimizer: SpriteOptimizer::None,
            remove_thumbs: false,
            label_cues: false,
        }
    }
}
