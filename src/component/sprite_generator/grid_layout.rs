//! 網格版面規劃
//!
//! 單張與多張精靈圖共用同一套規則：沒有上限時視為上限無限大。

use super::error::{SpriteError, SpriteResult};

/// 版面規劃結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlan {
    pub snapshot_count: usize,
    /// 每張精靈圖的欄數（也是列數）
    pub grid_dim: usize,
    pub sheet_count: usize,
    /// 是否因超過上限而固定使用上限尺寸
    pub capped: bool,
}

/// 快照在精靈圖中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub sheet_index: usize,
    pub row: usize,
    pub col: usize,
}

/// 容納 `n` 個格子的最小正方形邊長
#[must_use]
pub fn ceil_sqrt(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut root = (n as f64).sqrt().ceil() as usize;
    while root * root < n {
        root += 1;
    }
    while root > 1 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}

impl GridPlan {
    /// 依快照數與網格上限規劃版面
    pub fn plan(snapshot_count: usize, max_grid_dim: Option<usize>) -> SpriteResult<Self> {
        if snapshot_count == 0 {
            return Err(SpriteError::EmptyInput);
        }

        // 上限的平方溢位時，任何快照數都不可能超過上限
        let max_cells = match max_grid_dim {
            Some(0) => return Err(SpriteError::InvalidGridDimension(0)),
            Some(max) => max.checked_mul(max).map(|cells| (max, cells)),
            None => None,
        };

        match max_cells {
            Some((max, cells)) if snapshot_count > cells => Ok(Self {
                snapshot_count,
                grid_dim: max,
                sheet_count: snapshot_count.div_ceil(cells),
                capped: true,
            }),
            _ => Ok(Self {
                snapshot_count,
                grid_dim: ceil_sqrt(snapshot_count),
                sheet_count: 1,
                capped: false,
            }),
        }
    }

    /// 單張精靈圖的格子數
    #[must_use]
    pub const fn cells_per_sheet(&self) -> usize {
        self.grid_dim * self.grid_dim
    }

    /// 第 `index` 張快照（1 起算）的位置
    pub fn locate(&self, index: usize) -> SpriteResult<GridPosition> {
        if index == 0 || index > self.snapshot_count {
            return Err(SpriteError::InvalidSnapshotIndex {
                index,
                total: self.snapshot_count,
            });
        }

        let flat = index - 1;
        let cells = self.cells_per_sheet();
        let local = flat % cells;

        Ok(GridPosition {
            sheet_index: flat / cells,
            row: local / self.grid_dim,
            col: local % self.grid_dim,
        })
    }

    /// 第 `sheet_index` 張精靈圖實際放入的快照數
    #[must_use]
    pub fn cells_on_sheet(&self, sheet_index: usize) -> usize {
        if sheet_index >= self.sheet_count {
            return 0;
        }
        let cells = self.cells_per_sheet();
        let before = sheet_index * cells;
        (self.snapshot_count - before).min(cells)
    }
}
