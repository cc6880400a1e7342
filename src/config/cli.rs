use std::path::PathBuf;

use clap::Parser;

/// Smoke-test the weed detection API: probes /health, / and /test, then uploads an image to
/// /predict. Exits 0 only when every probe passes.
#[derive(Debug, Parser)]
#[command(name = "inferprobe", version, about)]
pub struct Cli {
    /// Image to upload to /predict. Without it the predict probe is skipped and counts as failed.
    pub image_path: Option<PathBuf>,
}
