//! Source probing to get stream metadata without a full decode.
//!
//! Shells `ffprobe` with JSON output and maps the result onto the
//! [`SourceInfo`] model, including the rotation metadata that drives
//! orientation resolution. The inspector is the only place raw
//! container metadata is interpreted; builders consume the canonical
//! transforms it produces.

use std::path::{Path, PathBuf};
use std::process::Command;

use clipforge_compose::{AudioStreamInfo, SourceInfo, SourceInspector, VideoStreamInfo};
use clipforge_core::{AffineTransform, ClipForgeError, RationalTime, Result, Size};
use serde::Deserialize;

/// `SourceInspector` backed by the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct FfprobeInspector {
    binary: PathBuf,
}

impl FfprobeInspector {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffprobe"),
        }
    }

    /// Use a specific ffprobe binary instead of the one on `PATH`.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfprobeInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceInspector for FfprobeInspector {
    fn inspect(&self, path: &Path) -> Result<SourceInfo> {
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(ClipForgeError::SourceCorrupt(format!(
                "ffprobe failed on {}: {}",
                path.display(),
                output.status
            )));
        }

        let probe: ProbeOutput = serde_json::from_slice(&output.stdout).map_err(|err| {
            ClipForgeError::SourceCorrupt(format!(
                "unreadable ffprobe output for {}: {}",
                path.display(),
                err
            ))
        })?;

        Ok(source_info_from_probe(probe))
    }
}

// ── ffprobe JSON shape ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u16>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
    tags: Option<ProbeTags>,
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

// ── Mapping ─────────────────────────────────────────────────────

fn source_info_from_probe(probe: ProbeOutput) -> SourceInfo {
    let container_duration = probe
        .format
        .as_ref()
        .and_then(|f| parse_seconds(f.duration.as_deref()))
        .unwrap_or(RationalTime::ZERO);

    let mut video = Vec::new();
    let mut audio = Vec::new();

    for stream in &probe.streams {
        let duration =
            parse_seconds(stream.duration.as_deref()).unwrap_or(container_duration);

        match stream.codec_type.as_deref() {
            Some("video") => {
                let width = stream.width.unwrap_or(0) as f32;
                let height = stream.height.unwrap_or(0) as f32;
                let natural_size = Size::new(width, height);
                video.push(VideoStreamInfo {
                    natural_size,
                    transform: display_transform(rotation_degrees(stream), natural_size),
                    duration,
                    codec: stream.codec_name.clone(),
                });
            }
            Some("audio") => {
                audio.push(AudioStreamInfo {
                    duration,
                    sample_rate: stream
                        .sample_rate
                        .as_deref()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(0),
                    channels: stream.channels.unwrap_or(0),
                    codec: stream.codec_name.clone(),
                });
            }
            _ => {}
        }
    }

    SourceInfo {
        duration: container_duration,
        video,
        audio,
    }
}

fn parse_seconds(text: Option<&str>) -> Option<RationalTime> {
    let seconds: f64 = text?.parse().ok()?;
    Some(RationalTime::from_seconds_f64(seconds))
}

/// Display rotation in clockwise degrees, normalized to [0, 360).
///
/// Newer ffprobe reports a Display Matrix side-data rotation in
/// counter-clockwise degrees; older files carry a clockwise `rotate`
/// tag. The tag wins when both are present.
fn rotation_degrees(stream: &ProbeStream) -> i64 {
    let raw = stream
        .tags
        .as_ref()
        .and_then(|t| t.rotate.as_deref())
        .and_then(|r| r.parse::<f64>().ok())
        .or_else(|| {
            stream
                .side_data_list
                .iter()
                .find_map(|sd| sd.rotation)
                .map(|ccw| -ccw)
        })
        .unwrap_or(0.0);

    (raw.round() as i64).rem_euclid(360)
}

/// The full preferred display transform for a rotated clip.
///
/// A bare rotation matrix displaces the frame into negative
/// coordinates (90° maps (x, y) to (-y, x)); container display
/// matrices carry a translation that puts the rotated frame back at
/// the origin, and downstream placement math relies on it. The
/// orientation resolver matches on (a, b, c, d) only, so the
/// translation never affects resolution.
fn display_transform(degrees: i64, natural: Size) -> AffineTransform {
    let (w, h) = (natural.width as f64, natural.height as f64);
    match degrees {
        90 => AffineTransform::ROTATE_90.then_translate(h, 0.0),
        180 => AffineTransform::ROTATE_180.then_translate(w, h),
        270 => AffineTransform::ROTATE_270.then_translate(0.0, w),
        _ => AffineTransform::IDENTITY,
    }
}
