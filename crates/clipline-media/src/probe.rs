//! Media file probing to get the container duration without decoding.

use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::IngestError;

/// Reads the playable duration of a video file.
///
/// Probes run on ingestion worker threads, hence `Send + Sync`.
pub trait MetadataProbe: Send + Sync {
    /// Duration in seconds.
    fn probe_duration(&self, path: &Path) -> Result<f64, IngestError>;
}

/// Probe backed by the `ffprobe` binary that ships alongside FFmpeg.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProbe;

impl FfprobeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProbe for FfprobeProbe {
    fn probe_duration(&self, path: &Path) -> Result<f64, IngestError> {
        if !path.exists() {
            return Err(IngestError::Probe {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let output = Command::new(ffmpeg_sidecar::ffprobe::ffprobe_path())
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(IngestError::Probe {
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(path = %path.display(), output = %stdout.trim(), "ffprobe finished");
        parse_duration(&stdout).ok_or_else(|| IngestError::Probe {
            path: path.to_path_buf(),
            reason: format!("unparseable duration {:?}", stdout.trim()),
        })
    }
}

/// First line of ffprobe output that parses as seconds.
fn parse_duration(output: &str) -> Option<f64> {
    output
        .lines()
        .find_map(|line| line.trim().parse::<f64>().ok())
}
