//! 命令列參數

use crate::config::{SETTINGS_FILE, SpriteOptimizer, SpriteSettings};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const CLI_AFTER_HELP: &str = "Examples:\n  thumb_sprites movie.mp4\n  thumb_sprites movie_3200.mp4 /var/www/thumbs --rate 5 --max-grid 6\n  thumb_sprites https://cdn.example.com/movie.mp4 --skip-first --optimizer jpegoptim --quality 70";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptimizerArg {
    None,
    Jpegoptim,
    Optipng,
}

#[derive(Debug, Parser)]
#[command(
    name = "thumb_sprites",
    version,
    about = "Generate hover-preview thumbnail sprites and a WebVTT index for a video",
    after_help = CLI_AFTER_HELP
)]
pub struct Cli {
    /// Video file path or http(s) URL. Prompted for when omitted.
    pub video: Option<String>,

    /// Base output directory (overrides `thumb_out_dir`).
    pub out_dir: Option<String>,

    /// Settings file to load.
    #[arg(long, default_value = SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    pub save_settings: bool,

    /// Directory for a per-run log file.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Seconds between snapshots.
    #[arg(long)]
    pub rate: Option<f64>,

    /// Thumbnail width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Drop the first snapshot.
    #[arg(long)]
    pub skip_first: bool,

    /// Maximum grid dimension per sprite sheet; more snapshots spill into extra sheets.
    #[arg(long)]
    pub max_grid: Option<usize>,

    /// Time sync adjustment factor, multiplied by the rate.
    #[arg(long, allow_hyphen_values = true)]
    pub adjust: Option<f64>,

    /// Resize with `sips` instead of `mogrify`.
    #[arg(long)]
    pub sips: bool,

    /// Create a fresh output directory per run instead of clearing the previous one.
    #[arg(long)]
    pub unique: bool,

    /// Sprite optimizer.
    #[arg(long, value_enum)]
    pub optimizer: Option<OptimizerArg>,

    /// Maximum quality for jpegoptim.
    #[arg(long)]
    pub quality: Option<u8>,

    /// Delete individual snapshots after compositing.
    #[arg(long)]
    pub remove_thumbs: bool,

    /// Prefix each cue with an `Img N` identifier.
    #[arg(long)]
    pub label_cues: bool,
}

impl Cli {
    /// 以命令列參數覆寫設定
    pub fn apply(&self, settings: &mut SpriteSettings) {
        if let Some(out_dir) = &self.out_dir {
            settings.thumb_out_dir.clone_from(out_dir);
        }
        if let Some(rate) = self.rate {
            settings.thumb_rate_seconds = rate;
        }
        if let Some(width) = self.width {
            settings.thumb_width = width;
        }
        if let Some(max_grid) = self.max_grid {
            settings.max_grid_size = Some(max_grid);
        }
        if let Some(adjust) = self.adjust {
            settings.time_sync_adjust = adjust;
        }
        settings.skip_first |= self.skip_first;
        settings.use_sips |= self.sips;
        settings.use_unique_out_dir |= self.unique;
        settings.remove_thumbs |= self.remove_thumbs;
        settings.label_cues |= self.label_cues;

        match self.optimizer {
            Some(OptimizerArg::None) => settings.optimizer = SpriteOptimizer::None,
            Some(OptimizerArg::Jpegoptim) => {
                settings.optimizer = SpriteOptimizer::Jpegoptim {
                    max_quality: self.quality,
                }
            }
            Some(OptimizerArg::Optipng) => settings.optimizer = SpriteOptimizer::Optipng,
            None => {
                if let (Some(quality), SpriteOptimizer::Jpegoptim { max_quality }) =
                    (self.quality, &mut settings.optimizer)
                {
                    *max_quality = Some(quality);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_settings_untouched() {
        let cli = Cli::parse_from(["thumb_sprites", "movie.mp4"]);
        let mut settings = SpriteSettings::default();
        cli.apply(&mut settings);
        assert_eq!(settings, SpriteSettings::default());
        assert_eq!(cli.video.as_deref(), Some("movie.mp4"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "thumb_sprites",
            "movie.mp4",
            "/srv/thumbs",
            "--rate",
            "5",
            "--max-grid",
            "6",
            "--adjust",
            "-0.25",
            "--skip-first",
            "--optimizer",
            "jpegoptim",
            "--quality",
            "70",
        ]);
        let mut settings = SpriteSettings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.thumb_out_dir, "/srv/thumbs");
        assert_eq!(settings.thumb_rate_seconds, 5.0);
        assert_eq!(settings.max_grid_size, Some(6));
        assert_eq!(settings.time_sync_adjust, -0.25);
        assert!(settings.skip_first);
        assert_eq!(
            settings.optimizer,
            SpriteOptimizer::Jpegoptim {
                max_quality: Some(70)
            }
        );
    }
}
