//! 影片縮圖精靈圖與 WebVTT 索引檔產生元件
//!
//! 核心運算（時間模型、網格規劃、矩形座標、索引檔）不依賴外部工具，
//! 擷取、縮放、合成等步驟透過 `crate::tools` 的 trait 呼叫。

mod cue_file_builder;
mod error;
mod grid_layout;
mod main;
mod rectangle_mapper;
mod sprite_task;
mod time_model;

pub use cue_file_builder::{CueFileBuilder, CueRecord, render_document, write_cue_file};
pub use error::{SpriteError, SpriteResult};
pub use grid_layout::{GridPlan, GridPosition, ceil_sqrt};
pub use main::{GenerationResult, SpriteGenerator, Toolkit};
pub use rectangle_mapper::{CellGeometry, Rect};
pub use sprite_task::SpriteTask;
pub use time_model::{
    DEFAULT_THUMB_RATE_SECONDS, DEFAULT_TIME_SYNC_ADJUST, TimeInterval, TimeModel,
    format_timestamp,
};
