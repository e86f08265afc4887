//! 日誌初始化

use crate::tools::ensure_directory_exists;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 同時寫入 stderr 與日誌檔
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// 初始化 env_logger，預設等級 `info`，可用 `RUST_LOG` 覆寫
///
/// 指定 `log_dir` 時每次執行建立獨立的日誌檔，多個程序可同時執行。
pub fn init(log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    let log_file = match log_dir {
        Some(dir) => {
            ensure_directory_exists(dir)
                .with_context(|| format!("無法建立日誌資料夾: {}", dir.display()))?;
            let path = dir.join(format!("thumb_sprites.{}.log", Uuid::new_v4()));
            let file = File::create(&path)
                .with_context(|| format!("無法建立日誌檔: {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
            Some(path)
        }
        None => None,
    };

    builder
        .try_init()
        .context("日誌系統已初始化")?;

    Ok(log_file)
}
