//! 精靈圖核心運算的錯誤型別

use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

/// 版面規劃、時間計算與索引檔輸出的錯誤
#[derive(Debug, Error)]
pub enum SpriteError {
    /// 沒有任何快照可以排版
    #[error("快照數量為 0，無法建立精靈圖")]
    EmptyInput,

    /// 取樣間隔必須大於 0
    #[error("取樣間隔必須大於 0 秒: {0}")]
    InvalidRate(f64),

    /// 時間校正係數必須是有限數值
    #[error("時間校正係數必須是有限數值: {0}")]
    InvalidAdjust(f64),

    /// 網格上限必須為正整數
    #[error("網格上限必須為正整數: {0}")]
    InvalidGridDimension(usize),

    /// 快照索引超出 1..=N 範圍
    #[error("快照索引 {index} 超出範圍（共 {total} 張）")]
    InvalidSnapshotIndex { index: usize, total: usize },

    /// 規劃的精靈圖數量與實際合成的檔案數不符
    #[error("精靈圖索引 {sheet_index} 沒有對應的檔案（只有 {sheet_count} 個）")]
    IndexOutOfRange {
        sheet_index: usize,
        sheet_count: usize,
    },

    /// 無法解析的幾何字串
    #[error("無法解析影像尺寸: {0}")]
    InvalidGeometry(String),

    #[error("無法寫入 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

pub type SpriteResult<T> = Result<T, SpriteError>;
