//! WebVTT 縮圖索引檔
//!
//! 每張快照一個 cue：時間區間 + `精靈圖檔名#xywh=x,y,w,h`。

use super::error::{SpriteError, SpriteResult};
use super::grid_layout::GridPlan;
use super::rectangle_mapper::{CellGeometry, Rect};
use super::time_model::{TimeInterval, TimeModel, format_timestamp};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

const VTT_HEADER: &str = "WEBVTT";

/// 單一快照的 cue
#[derive(Debug, Clone, PartialEq)]
pub struct CueRecord {
    /// 快照索引（1 起算）
    pub index: usize,
    pub interval: TimeInterval,
    pub sheet_file: String,
    pub rect: Rect,
}

/// 組合 cue 所需的全部輸入
pub struct CueFileBuilder<'a> {
    plan: &'a GridPlan,
    time_model: &'a TimeModel,
    cell: CellGeometry,
    sheet_files: &'a [PathBuf],
    label_cues: bool,
}

impl<'a> CueFileBuilder<'a> {
    #[must_use]
    pub const fn new(
        plan: &'a GridPlan,
        time_model: &'a TimeModel,
        cell: CellGeometry,
        sheet_files: &'a [PathBuf],
    ) -> Self {
        Self {
            plan,
            time_model,
            cell,
            sheet_files,
            label_cues: false,
        }
    }

    /// 在時間行之前加上 `Img N` 識別行
    #[must_use]
    pub const fn with_labels(mut self, label_cues: bool) -> Self {
        self.label_cues = label_cues;
        self
    }

    /// 依索引順序產生所有 cue
    ///
    /// 先確認最後一張快照所在的精靈圖有對應檔案，不符時不產生任何內容。
    pub fn records(&self) -> SpriteResult<Vec<CueRecord>> {
        let last = self.plan.locate(self.plan.snapshot_count)?;
        if last.sheet_index >= self.sheet_files.len() {
            return Err(SpriteError::IndexOutOfRange {
                sheet_index: last.sheet_index,
                sheet_count: self.sheet_files.len(),
            });
        }

        let sheet_names: Vec<String> = self.sheet_files.iter().map(|p| sheet_name(p)).collect();

        (1..=self.plan.snapshot_count)
            .map(|index| {
                let position = self.plan.locate(index)?;
                let sheet_file = sheet_names
                    .get(position.sheet_index)
                    .cloned()
                    .ok_or(SpriteError::IndexOutOfRange {
                        sheet_index: position.sheet_index,
                        sheet_count: sheet_names.len(),
                    })?;

                Ok(CueRecord {
                    index,
                    interval: self.time_model.interval(index)?,
                    sheet_file,
                    rect: self.cell.rect_at(&position)?,
                })
            })
            .collect()
    }

    /// 產生完整的 WebVTT 文件
    pub fn build(&self) -> SpriteResult<String> {
        let records = self.records()?;
        Ok(render_document(&records, self.label_cues))
    }

    /// 產生並寫入索引檔，完整取代既有內容
    pub fn write_to(&self, destination: &Path) -> SpriteResult<()> {
        let document = self.build()?;
        write_cue_file(destination, &document)?;
        info!("已寫入索引檔: {}", destination.display());
        Ok(())
    }
}

fn sheet_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}

/// 將 cue 序列化為 WebVTT 文字
#[must_use]
pub fn render_document(records: &[CueRecord], label_cues: bool) -> String {
    let mut lines: Vec<String> = vec![VTT_HEADER.to_string(), String::new()];

    for record in records {
        if label_cues {
            lines.push(format!("Img {}", record.index));
        }
        lines.push(format!(
            "{} --> {}",
            format_timestamp(record.interval.start),
            format_timestamp(record.interval.end)
        ));
        lines.push(format!("{}#xywh={}", record.sheet_file, record.rect));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// 先寫入同目錄的暫存檔再更名，讀取端不會看到寫到一半的檔案
pub fn write_cue_file(destination: &Path, contents: &str) -> SpriteResult<()> {
    let file_name = destination
        .file_name()
        .map_or_else(|| "cue".into(), |n| n.to_string_lossy().to_string());
    let temp_path = destination.with_file_name(format!(".{file_name}.tmp"));

    debug!(
        "寫入暫存索引檔 {} ({} bytes)",
        temp_path.display(),
        contents.len()
    );

    fs::write(&temp_path, contents).map_err(|source| SpriteError::Io {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, destination).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        SpriteError::Io {
            path: destination.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cell() -> CellGeometry {
        CellGeometry::new(200, 112).unwrap()
    }

    #[test]
    fn test_document_layout_single_sheet() {
        let plan = GridPlan::plan(3, None).unwrap();
        let time_model = TimeModel::new(10.0, false, -0.5).unwrap();
        let sheets = vec![PathBuf::from("/out/clip_vtt/clip_sprite.jpg")];

        let document = CueFileBuilder::new(&plan, &time_model, cell(), &sheets)
            .build()
            .unwrap();

        let expected = "WEBVTT\n\
            \n\
            00:00:00.000 --> 00:00:05.000\n\
            clip_sprite.jpg#xywh=0,0,200,112\n\
            \n\
            00:00:05.000 --> 00:00:15.000\n\
            clip_sprite.jpg#xywh=200,0,200,112\n\
            \n\
            00:00:15.000 --> 00:00:25.000\n\
            clip_sprite.jpg#xywh=0,112,200,112\n";
        assert_eq!(document, expected);
    }

    #[test]
    fn test_labels() {
        let plan = GridPlan::plan(1, None).unwrap();
        let time_model = TimeModel::new(10.0, true, 0.0).unwrap();
        let sheets = vec![PathBuf::from("sprite.jpg")];

        let document = CueFileBuilder::new(&plan, &time_model, cell(), &sheets)
            .with_labels(true)
            .build()
            .unwrap();

        assert_eq!(
            document,
            "WEBVTT\n\nImg 1\n00:00:10.000 --> 00:00:20.000\nsprite.jpg#xywh=0,0,200,112\n"
        );
    }

    #[test]
    fn test_multi_sheet_references() {
        let plan = GridPlan::plan(40, Some(6)).unwrap();
        let time_model = TimeModel::new(10.0, false, -0.5).unwrap();
        let sheets = vec![
            PathBuf::from("clip_sprite-0.jpg"),
            PathBuf::from("clip_sprite-1.jpg"),
        ];

        let records = CueFileBuilder::new(&plan, &time_model, cell(), &sheets)
            .records()
            .unwrap();

        assert_eq!(records.len(), 40);
        assert_eq!(records[35].sheet_file, "clip_sprite-0.jpg");
        assert_eq!(records[35].rect.to_string(), "1000,560,200,112");
        assert_eq!(records[36].sheet_file, "clip_sprite-1.jpg");
        assert_eq!(records[36].rect.to_string(), "0,0,200,112");

        for pair in records.windows(2) {
            assert_eq!(pair[0].interval.end, pair[1].interval.start);
        }
    }

    #[test]
    fn test_missing_sheet_fails() {
        let plan = GridPlan::plan(40, Some(6)).unwrap();
        let time_model = TimeModel::new(10.0, false, -0.5).unwrap();
        let sheets = vec![PathBuf::from("clip_sprite-0.jpg")];

        let result = CueFileBuilder::new(&plan, &time_model, cell(), &sheets).build();
        assert!(matches!(
            result,
            Err(SpriteError::IndexOutOfRange {
                sheet_index: 1,
                sheet_count: 1
            })
        ));
    }

    #[test]
    fn test_missing_sheet_writes_nothing() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("thumbs.vtt");
        let plan = GridPlan::plan(5, None).unwrap();
        let time_model = TimeModel::new(10.0, false, -0.5).unwrap();

        let result = CueFileBuilder::new(&plan, &time_model, cell(), &[]).write_to(&destination);
        assert!(result.is_err());
        assert!(!destination.exists());
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("thumbs.vtt");
        fs::write(&destination, "stale content that is much longer than the new one").unwrap();

        write_cue_file(&destination, "WEBVTT\n").unwrap();

        assert_eq!(fs::read_to_string(&destination).unwrap(), "WEBVTT\n");
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
