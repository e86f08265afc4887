use super::cue_file_builder::CueFileBuilder;
use super::error::SpriteError;
use super::grid_layout::GridPlan;
use super::sprite_task::SpriteTask;
use super::time_model::TimeModel;
use crate::config::SpriteSettings;
use crate::tools::{
    FfmpegSnapshotExtractor, GeometryProbe, IdentifyGeometryProbe, ImageOptimizer, ImageResizer,
    MogrifyResizer, MontageCompositor, SheetCompositor, SipsResizer, SnapshotExtractor,
    optimize_all, optimizer_for, resize_all,
};
use anyhow::{Context, Result, bail};
use console::style;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 產生結果
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub snapshot_count: usize,
    pub plan: GridPlan,
    pub sheet_files: Vec<PathBuf>,
    pub vtt_file: PathBuf,
    pub out_dir: PathBuf,
}

/// 外部工具組合
pub struct Toolkit {
    pub extractor: Box<dyn SnapshotExtractor>,
    pub resizer: Box<dyn ImageResizer>,
    pub probe: Box<dyn GeometryProbe>,
    pub compositor: Box<dyn SheetCompositor>,
    pub optimizer: Option<Box<dyn ImageOptimizer>>,
}

impl Toolkit {
    /// ffmpeg + ImageMagick，依設定選擇 sips 與壓縮工具
    #[must_use]
    pub fn from_settings(settings: &SpriteSettings) -> Self {
        let resizer: Box<dyn ImageResizer> = if settings.use_sips {
            Box::new(SipsResizer)
        } else {
            Box::new(MogrifyResizer)
        };

        Self {
            extractor: Box::new(FfmpegSnapshotExtractor),
            resizer,
            probe: Box::new(IdentifyGeometryProbe),
            compositor: Box::new(MontageCompositor::new(settings.max_grid_size)),
            optimizer: optimizer_for(&settings.optimizer),
        }
    }
}

/// 影片縮圖精靈圖產生器
///
/// 流程：
/// A. 擷取快照（ffmpeg）
/// B. 縮放快照
/// C. 量測縮圖尺寸並規劃網格
/// D. 合成精靈圖並壓縮
/// E. 寫入 WebVTT 索引檔
pub struct SpriteGenerator {
    settings: SpriteSettings,
    toolkit: Toolkit,
    shutdown_signal: Arc<AtomicBool>,
}

impl SpriteGenerator {
    #[must_use]
    pub fn new(settings: SpriteSettings, shutdown_signal: Arc<AtomicBool>) -> Self {
        let toolkit = Toolkit::from_settings(&settings);
        Self::with_toolkit(settings, toolkit, shutdown_signal)
    }

    #[must_use]
    pub const fn with_toolkit(
        settings: SpriteSettings,
        toolkit: Toolkit,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            settings,
            toolkit,
            shutdown_signal,
        }
    }

    pub fn run(&self, video: &str) -> Result<GenerationResult> {
        // 參數錯誤時不擷取任何東西
        let time_model = TimeModel::new(
            self.settings.thumb_rate_seconds,
            self.settings.skip_first,
            self.settings.time_sync_adjust,
        )?;
        if self.settings.max_grid_size == Some(0) {
            return Err(SpriteError::InvalidGridDimension(0).into());
        }

        let task = SpriteTask::new(video, &self.settings)?;
        info!("開始產生精靈圖: {} -> {}", task.video, task.out_dir.display());

        // Stage A: 擷取快照
        println!("  {} 擷取快照...", style("A").dim());
        let mut snapshots = self
            .toolkit
            .extractor
            .extract(&task.video, time_model.rate(), &task.out_dir)
            .with_context(|| format!("快照擷取失敗: {}", task.video))?;

        if self.settings.skip_first && !snapshots.is_empty() {
            let first = snapshots.remove(0);
            info!("移除第一張快照: {}", first.display());
            fs::remove_file(&first)
                .with_context(|| format!("無法刪除第一張快照: {}", first.display()))?;
        }

        if snapshots.is_empty() {
            return Err(SpriteError::EmptyInput.into());
        }
        println!("    共 {} 張快照", snapshots.len());
        self.check_shutdown()?;

        // Stage B: 縮放
        println!("  {} 縮放快照...", style("B").dim());
        resize_all(
            self.toolkit.resizer.as_ref(),
            &snapshots,
            self.settings.thumb_width,
            &self.shutdown_signal,
        )?;
        self.check_shutdown()?;

        // Stage C: 尺寸與網格（所有縮圖同尺寸，量第一張即可）
        print!("  {} 規劃網格...", style("C").dim());
        let cell = self.toolkit.probe.probe(&snapshots[0])?;
        let plan = GridPlan::plan(snapshots.len(), self.settings.max_grid_size)?;
        println!(
            " 縮圖 {}x{}，{} 張 {}x{} 精靈圖",
            cell.width, cell.height, plan.sheet_count, plan.grid_dim, plan.grid_dim
        );

        // Stage D: 合成與壓縮
        println!("  {} 合成精靈圖...", style("D").dim());
        let sheet_files = self
            .toolkit
            .compositor
            .composite(&snapshots, &plan, &cell, &task.sprite_file)
            .with_context(|| "合成精靈圖失敗")?;
        self.check_shutdown()?;

        if let Some(optimizer) = &self.toolkit.optimizer {
            optimize_all(optimizer.as_ref(), &sheet_files)?;
        }

        if self.settings.remove_thumbs {
            remove_snapshots(&snapshots);
        }

        // Stage E: 索引檔
        println!("  {} 寫入索引檔...", style("E").dim());
        CueFileBuilder::new(&plan, &time_model, cell, &sheet_files)
            .with_labels(self.settings.label_cues)
            .write_to(&task.vtt_file)?;

        info!(
            "精靈圖完成: {} 張快照, {} 張精靈圖, 索引檔 {}",
            snapshots.len(),
            sheet_files.len(),
            task.vtt_file.display()
        );

        Ok(GenerationResult {
            snapshot_count: snapshots.len(),
            plan,
            sheet_files,
            vtt_file: task.vtt_file,
            out_dir: task.out_dir,
        })
    }

    fn check_shutdown(&self) -> Result<()> {
        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷信號，停止處理");
            bail!("操作已取消");
        }
        Ok(())
    }

    pub fn print_summary(&self, result: &GenerationResult) {
        println!();
        println!("{}", style("=== 精靈圖產生摘要 ===").cyan().bold());
        println!("  快照: {} 張", result.snapshot_count);
        println!(
            "  網格: {}x{}，共 {} 張精靈圖",
            result.plan.grid_dim, result.plan.grid_dim, result.plan.sheet_count
        );
        for sheet in &result.sheet_files {
            println!("    {}", style(sheet.display()).green());
        }
        println!("  索引檔: {}", style(result.vtt_file.display()).green());
    }
}

fn remove_snapshots(snapshots: &[PathBuf]) {
    for snapshot in snapshots {
        remove_file_logged(snapshot);
    }
}

fn remove_file_logged(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("無法刪除快照 {}: {e}", path.display());
    }
}
