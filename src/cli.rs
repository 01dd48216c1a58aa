//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::session::SessionOptions;
use crate::vision::BlobStrategy;

#[derive(Debug, Parser)]
#[command(name = "ar-paint")]
#[command(about = "Paint in the air with a colored marker in front of your webcam")]
#[command(version)]
pub struct Cli {
    /// Path to the JSON color-limits file ({"limits": {"B": {"min","max"}, "G": ..., "R": ...}}).
    #[arg(short, long = "json")]
    pub json: PathBuf,

    /// Reject centroid jumps larger than this many pixels (recommended: 50).
    #[arg(long, alias = "use-shake-prevention")]
    pub shake_prevention: Option<u32>,

    /// Draw on top of the camera stream instead of a white board.
    #[arg(long)]
    pub use_camera_stream: bool,

    /// Paint-by-number mode (ignored with --use-camera-stream).
    #[arg(long)]
    pub paint_by_number: bool,

    /// Camera index to open.
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width.
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested capture height.
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Seed for paint-by-number boards (random when absent).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scoring difficulty D; a region counts when its color is within 200/D.
    #[arg(long, default_value_t = 1.0, value_parser = parse_difficulty)]
    pub difficulty: f64,

    /// How the marker centroid is computed.
    #[arg(long, value_enum, default_value_t = BlobStrategyArg::Stats)]
    pub blob_strategy: BlobStrategyArg,

    /// Directory where saved drawings are written.
    #[arg(long, default_value = ".")]
    pub save_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlobStrategyArg {
    /// Mean of the blob's pixel coordinates.
    Stats,
    /// Image moments of the blob's outer contour.
    Contour,
}

impl From<BlobStrategyArg> for BlobStrategy {
    fn from(arg: BlobStrategyArg) -> Self {
        match arg {
            BlobStrategyArg::Stats => BlobStrategy::ComponentStats,
            BlobStrategyArg::Contour => BlobStrategy::ContourMoments,
        }
    }
}

fn parse_difficulty(raw: &str) -> Result<f64, String> {
    let d: f64 = raw.parse().map_err(|e| format!("{raw:?} is not a number: {e}"))?;
    if !(d.is_finite() && d > 0.0) {
        return Err(format!("difficulty must be a positive number, got {d}"));
    }
    Ok(d)
}

impl Cli {
    /// Overlay mode wins over paint-by-number.
    pub fn paint_by_number_enabled(&self) -> bool {
        self.paint_by_number && !self.use_camera_stream
    }

    pub fn session_options(&self, seed: u64) -> SessionOptions {
        SessionOptions {
            overlay: self.use_camera_stream,
            paint_by_number: self.paint_by_number_enabled(),
            shake_threshold: self.shake_prevention,
            strategy: self.blob_strategy.into(),
            difficulty: self.difficulty,
            seed,
            save_dir: self.save_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["ar-paint", "-j", "limits.json"]).expect("parse");
        assert_eq!(cli.json, PathBuf::from("limits.json"));
        assert_eq!(cli.shake_prevention, None);
        assert_eq!(cli.difficulty, 1.0);
        assert_eq!(cli.blob_strategy, BlobStrategyArg::Stats);
        assert!(!cli.paint_by_number_enabled());
    }

    #[test]
    fn camera_stream_overrides_paint_by_number() {
        let cli = Cli::try_parse_from([
            "ar-paint", "--json", "l.json", "--paint-by-number", "--use-camera-stream",
        ])
        .expect("parse");
        assert!(!cli.paint_by_number_enabled());
        let opts = cli.session_options(7);
        assert!(opts.overlay);
        assert!(!opts.paint_by_number);
    }

    #[test]
    fn shake_prevention_alias_and_strategy() {
        let cli = Cli::try_parse_from([
            "ar-paint", "-j", "l.json", "--use-shake-prevention", "50", "--blob-strategy", "contour",
        ])
        .expect("parse");
        assert_eq!(cli.shake_prevention, Some(50));
        assert_eq!(BlobStrategy::from(cli.blob_strategy), BlobStrategy::ContourMoments);
    }

    #[test]
    fn non_positive_difficulty_is_rejected() {
        assert!(Cli::try_parse_from(["ar-paint", "-j", "l.json", "--difficulty", "0"]).is_err());
        assert!(Cli::try_parse_from(["ar-paint", "-j", "l.json", "--difficulty", "-2"]).is_err());
        assert!(Cli::try_parse_from(["ar-paint"]).is_err());
    }
}
