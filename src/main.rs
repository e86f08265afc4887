use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::Input;
use log::{info, warn};
use thumb_sprites::cli::Cli;
use thumb_sprites::component::SpriteGenerator;
use thumb_sprites::config::{SpriteSettings, save_settings};
use thumb_sprites::init;
use thumb_sprites::signal::setup_shutdown_signal;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_file) = init::init(cli.log_dir.as_deref())? {
        println!("{}", style(format!("日誌寫入: {}", log_file.display())).dim());
    }

    let mut settings = SpriteSettings::load_from(&cli.settings)?;
    cli.apply(&mut settings);

    if cli.save_settings {
        save_settings(&settings, &cli.settings)?;
        info!("設定已儲存: {}", cli.settings.display());
    }

    let video = match &cli.video {
        Some(video) => video.clone(),
        None => prompt_video_path()?,
    };

    let shutdown_signal = setup_shutdown_signal()?;
    println!("{}", style("=== 影片縮圖精靈圖 ===").cyan().bold());

    let generator = SpriteGenerator::new(settings, shutdown_signal);
    match generator.run(&video) {
        Ok(result) => {
            generator.print_summary(&result);
            Ok(())
        }
        Err(e) => {
            warn!("產生精靈圖失敗: {e:#}");
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            Err(e)
        }
    }
}

fn prompt_video_path() -> Result<String> {
    let path: String = Input::new()
        .with_prompt("請輸入影片路徑或網址")
        .interact_text()?;
    Ok(path.trim().to_string())
}
