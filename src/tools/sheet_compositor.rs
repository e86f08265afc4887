use super::external_command::run_command;
use crate::component::sprite_generator::{CellGeometry, GridPlan};
use anyhow::{Result, bail};
use log::debug;
use std::path::{Path, PathBuf};

/// 將縮圖依網格合成為精靈圖
pub trait SheetCompositor: Send + Sync {
    /// `cells` 依快照順序排列，回傳依精靈圖順序排列的檔案路徑
    fn composite(
        &self,
        cells: &[PathBuf],
        plan: &GridPlan,
        cell: &CellGeometry,
        sprite_file: &Path,
    ) -> Result<Vec<PathBuf>>;
}

/// ImageMagick `montage`，每張精靈圖執行一次
///
/// 有設定網格上限時一律使用透明背景，未填滿的格子不會留下底色。
#[derive(Debug, Default, Clone)]
pub struct MontageCompositor {
    pub transparent_background: bool,
}

impl MontageCompositor {
    #[must_use]
    pub const fn new(max_grid_size: Option<usize>) -> Self {
        Self {
            transparent_background: max_grid_size.is_some(),
        }
    }

    fn montage_args(
        &self,
        sheet_cells: &[PathBuf],
        plan: &GridPlan,
        cell: &CellGeometry,
        sheet_file: &Path,
    ) -> Vec<String> {
        let mut args: Vec<String> = Vec::with_capacity(sheet_cells.len() + 8);
        if self.transparent_background {
            args.extend(["-background".to_string(), "transparent".to_string()]);
        }
        args.extend(sheet_cells.iter().map(|p| p.to_string_lossy().to_string()));
        args.extend([
            "-tile".to_string(),
            format!("{0}x{0}", plan.grid_dim),
            "-geometry".to_string(),
            cell.montage_geometry(),
            sheet_file.to_string_lossy().to_string(),
        ]);
        args
    }
}

impl SheetCompositor for MontageCompositor {
    fn composite(
        &self,
        cells: &[PathBuf],
        plan: &GridPlan,
        cell: &CellGeometry,
        sprite_file: &Path,
    ) -> Result<Vec<PathBuf>> {
        let sheet_files = sheet_paths(sprite_file, plan.sheet_count);

        for (sheet_index, (sheet_cells, sheet_file)) in split_cells(cells, plan)
            .into_iter()
            .zip(&sheet_files)
            .enumerate()
        {
            debug!(
                "合成精靈圖 {sheet_index}: {} 張縮圖 -> {}",
                sheet_cells.len(),
                sheet_file.display()
            );

            let args = self.montage_args(sheet_cells, plan, cell, sheet_file);
            run_command("montage", &args)?;

            if !sheet_file.exists() {
                bail!("精靈圖未建立: {}", sheet_file.display());
            }
        }

        Ok(sheet_files)
    }
}

/// 依規劃的精靈圖數量決定檔名
///
/// 只有一張時直接使用 `sprite_file`，多張時為 `<stem>-<k>.<ext>`。
#[must_use]
pub fn sheet_paths(sprite_file: &Path, sheet_count: usize) -> Vec<PathBuf> {
    if sheet_count <= 1 {
        return vec![sprite_file.to_path_buf()];
    }

    let stem = sprite_file
        .file_stem()
        .map_or_else(|| "sprite".to_string(), |s| s.to_string_lossy().to_string());
    let extension = sprite_file
        .extension()
        .map_or_else(|| "jpg".to_string(), |s| s.to_string_lossy().to_string());

    (0..sheet_count)
        .map(|index| sprite_file.with_file_name(format!("{stem}-{index}.{extension}")))
        .collect()
}

/// 依精靈圖切分縮圖列表
#[must_use]
pub fn split_cells<'a>(cells: &'a [PathBuf], plan: &GridPlan) -> Vec<&'a [PathBuf]> {
    cells.chunks(plan.cells_per_sheet()).collect()
}
