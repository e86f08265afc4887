use super::error::{SpriteError, SpriteResult};
use super::grid_layout::GridPosition;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// ImageMagick `%g` 輸出格式：`WxH+X+Y`
static REGEX_GEOMETRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)x(\d+)(?:[+-]\d+[+-]\d+)?").expect("Invalid regex")
});

/// 單一縮圖縮放後的尺寸，所有格子共用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
}

/// 精靈圖內的矩形區域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellGeometry {
    pub fn new(width: u32, height: u32) -> SpriteResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteError::InvalidGeometry(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// 解析 `identify -format "%g - %f"` 的輸出
    ///
    /// 例如 `200x112+0+0 - tv00001.jpg`
    pub fn parse(geometry: &str) -> SpriteResult<Self> {
        let captures = REGEX_GEOMETRY
            .captures(geometry.trim())
            .ok_or_else(|| SpriteError::InvalidGeometry(geometry.trim().to_string()))?;

        let parse_dim = |i: usize| {
            captures[i]
                .parse::<u32>()
                .map_err(|_| SpriteError::InvalidGeometry(geometry.trim().to_string()))
        };

        Self::new(parse_dim(1)?, parse_dim(2)?)
    }

    /// montage 使用的 `-geometry` 參數，格子之間不留邊
    #[must_use]
    pub fn montage_geometry(&self) -> String {
        format!("{}x{}+0+0", self.width, self.height)
    }

    /// 網格位置對應的像素矩形，由左上角逐列排列
    ///
    /// 座標超出 `u32` 時回傳錯誤。
    pub fn rect(&self, row: usize, col: usize) -> SpriteResult<Rect> {
        Ok(Rect {
            x: self.offset(col, self.width)?,
            y: self.offset(row, self.height)?,
            width: self.width,
            height: self.height,
        })
    }

    pub fn rect_at(&self, position: &GridPosition) -> SpriteResult<Rect> {
        self.rect(position.row, position.col)
    }

    fn offset(&self, cells: usize, size: u32) -> SpriteResult<u32> {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(size))
            .ok_or_else(|| {
                SpriteError::InvalidGeometry(format!(
                    "{}x{} 第 {cells} 格座標超出範圍",
                    self.width, self.height
                ))
            })
    }
}

/// `#xywh=` 片段使用的格式
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}
