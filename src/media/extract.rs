//! Audio track extraction from video uploads using ffmpeg.

use crate::error::{Result, TeinteError};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Extract the audio track of a video file to a mono 16 kHz WAV.
///
/// Pure transformation: video frames are discarded and the only side effect
/// is the destination file, which the caller owns (typically inside a
/// `tempfile::TempDir` so it is removed on every exit path).
#[instrument(skip_all, fields(source = %source.display()))]
pub async fn extract_audio(source: &Path, dest: &Path) -> Result<()> {
    debug!("Extracting audio track to {:?}", dest);

    let result = Command::new("ffmpeg")
        .arg("-i").arg(source)
        .arg("-vn")
        .arg("-acodec").arg("pcm_s16le")
        .arg("-ac").arg("1")
        .arg("-ar").arg("16000")
        .arg("-y")
        .arg("-loglevel").arg("error")
        .arg(dest)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TeinteError::Config(
                "ffmpeg not found. Install it and ensure it's in your PATH.".to_string(),
            ));
        }
        Err(e) => {
            return Err(TeinteError::MediaDecode(format!(
                "ffmpeg execution failed: {e}"
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_format_error(&stderr) {
            return Err(TeinteError::UnsupportedFormat(stderr.trim().to_string()));
        }
        return Err(TeinteError::MediaDecode(format!(
            "ffmpeg failed: {}",
            stderr.trim()
        )));
    }

    Ok(())
}

/// Distinguish a container/codec the tool cannot read from other decode
/// failures, based on ffmpeg's stderr vocabulary.
fn is_format_error(stderr: &str) -> bool {
    let lowered = stderr.to_lowercase();
    lowered.contains("invalid data found")
        || lowered.contains("unknown format")
        || lowered.contains("decoder not found")
        || lowered.contains("could not find codec")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_detection() {
        assert!(is_format_error(
            "Invalid data found when processing input"
        ));
        assert!(is_format_error("Unknown format for stream 0"));
        assert!(!is_format_error("Permission denied"));
    }
}
