//! 快照時間模型
//!
//! 將 1 起算的快照索引轉為播放器使用的時間區間。
//! ffmpeg 在固定取樣率下擷取的畫面會比預期時間點早約半個間隔，
//! 因此兩端點都加上 `rate * adjust_factor` 的校正量，再個別夾到 0 以上。

use super::error::{SpriteError, SpriteResult};

/// 預設取樣間隔（秒）
pub const DEFAULT_THUMB_RATE_SECONDS: f64 = 10.0;

/// 預設時間同步校正係數
pub const DEFAULT_TIME_SYNC_ADJUST: f64 = -0.5;

/// 時間計算參數
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeModel {
    rate: f64,
    skip_first: bool,
    adjust_factor: f64,
}

/// 校正並夾值後的時間區間（秒）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeModel {
    pub fn new(rate: f64, skip_first: bool, adjust_factor: f64) -> SpriteResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SpriteError::InvalidRate(rate));
        }
        if !adjust_factor.is_finite() {
            return Err(SpriteError::InvalidAdjust(adjust_factor));
        }

        Ok(Self {
            rate,
            skip_first,
            adjust_factor,
        })
    }

    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// 校正量（秒），可為負
    #[must_use]
    pub fn adjust(&self) -> f64 {
        self.rate * self.adjust_factor
    }

    /// 未校正的起點
    fn base_start(&self, index: usize) -> f64 {
        let first = if self.skip_first { self.rate } else { 0.0 };
        first + (index - 1) as f64 * self.rate
    }

    /// 未校正的區間，用於驗證區間是否首尾相接
    ///
    /// 終點與下一張的起點走同一個算式，取樣間隔無法以二進位精確表示時也不會出現縫隙。
    pub fn raw_interval(&self, index: usize) -> SpriteResult<TimeInterval> {
        if index == 0 {
            return Err(SpriteError::InvalidSnapshotIndex { index, total: 0 });
        }
        Ok(TimeInterval {
            start: self.base_start(index),
            end: self.base_start(index + 1),
        })
    }

    /// 第 `index` 張快照（1 起算）的顯示區間
    pub fn interval(&self, index: usize) -> SpriteResult<TimeInterval> {
        let raw = self.raw_interval(index)?;
        let adjust = self.adjust();

        Ok(TimeInterval {
            start: clamp_to_zero(raw.start + adjust),
            end: clamp_to_zero(raw.end + adjust),
        })
    }
}

/// 輸出格式不允許負時間
fn clamp_to_zero(seconds: f64) -> f64 {
    seconds.max(0.0)
}

/// 將秒數格式化為 `HH:MM:SS.000`
///
/// 只取整數秒，毫秒欄位固定為 000。小時不會在 24 進位。
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}.000")
}
