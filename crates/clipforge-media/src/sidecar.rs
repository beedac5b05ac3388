//! Concrete `MediaEngine` driving FFmpeg through the sidecar process.
//!
//! A render request is translated into one ffmpeg invocation: every
//! track segment becomes an input trimmed to its source range, video
//! segments are fitted and padded to the render size, ramp directives
//! become fades at the clip tail, and the pieces are concatenated.
//! Text overlays render through drawtext; other overlay content is
//! skipped with a warning. The spawned process is supervised on a
//! worker thread that fires the completion handler when it exits.

use std::thread;

use clipforge_annotate::LayerContent;
use clipforge_compose::{Composition, OpacityDirective, Segment, Track};
use clipforge_core::{ClipForgeError, Color, Result};
use ffmpeg_sidecar::command::FfmpegCommand;

use crate::engine::{CompletionHandler, EngineReport, MediaEngine, RenderRequest};
use crate::export::ContainerFormat;

/// FFmpeg-backed media engine.
#[derive(Debug, Default)]
pub struct SidecarEngine;

impl SidecarEngine {
    pub fn new() -> Self {
        Self
    }
}

impl MediaEngine for SidecarEngine {
    fn export(&self, request: RenderRequest, on_complete: CompletionHandler) -> Result<()> {
        let args = plan_args(&request)?;
        tracing::debug!(output = %request.output.display(), "spawning ffmpeg");

        let mut command = FfmpegCommand::new();
        command.args(args.iter().map(String::as_str));
        let mut child = command.spawn().map_err(|err| {
            ClipForgeError::ExportSessionUnavailable(format!("failed to spawn ffmpeg: {err}"))
        })?;

        thread::Builder::new()
            .name("clipforge-export".into())
            .spawn(move || {
                let report = match child.wait() {
                    Ok(status) if status.success() => EngineReport::completed(),
                    Ok(status) => EngineReport::failed(format!("ffmpeg exited with {status}")),
                    Err(err) => EngineReport::failed(format!("ffmpeg did not finish: {err}")),
                };
                on_complete(report);
            })
            .map_err(|err| {
                ClipForgeError::ExportSessionUnavailable(format!(
                    "failed to start export worker: {err}"
                ))
            })?;

        Ok(())
    }
}

// ── Command planning ────────────────────────────────────────────

/// Translate a render request into ffmpeg arguments.
pub(crate) fn plan_args(request: &RenderRequest) -> Result<Vec<String>> {
    let composition = &request.composition;
    let video = composition
        .video_track
        .as_ref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ClipForgeError::InvalidParameter("composition has no video segments".into())
        })?;

    let width = composition.render_size.width.round() as u32;
    let height = composition.render_size.height.round() as u32;
    let audio_segments: &[Segment] = composition
        .audio_track
        .as_ref()
        .map(|t| t.segments())
        .unwrap_or(&[]);

    let mut args = vec!["-y".to_string()];
    for segment in video.segments().iter().chain(audio_segments.iter()) {
        args.push("-i".into());
        args.push(segment.source.to_string_lossy().into_owned());
    }

    let mut filters = Vec::new();

    // Video chains: trim to the source range, reset timestamps, fit and
    // pad to the render size. Concat cannot overlap clips, so a ramp
    // renders as a fade over its window clamped to the clip tail.
    let fades = fade_plan(composition, video);
    for (i, segment) in video.segments().iter().enumerate() {
        let start = segment.source_range.start.to_seconds_f64();
        let end = segment.source_range.end().to_seconds_f64();
        let mut chain = format!(
            "[{i}:v]trim=start={start:.6}:end={end:.6},setpts=PTS-STARTPTS,\
             scale={width}:{height}:force_original_aspect_ratio=decrease,\
             pad={width}:{height}:(ow-iw)/2:(oh-ih)/2,setsar=1"
        );
        if let Some((fade_start, fade_duration)) = fades[i] {
            chain.push_str(&format!(
                ",fade=t=out:st={fade_start:.6}:d={fade_duration:.6}"
            ));
        }
        chain.push_str(&format!("[v{i}]"));
        filters.push(chain);
    }

    let clip_count = video.segments().len();
    let mut video_label = "v0".to_string();
    if clip_count > 1 {
        let inputs: String = (0..clip_count).map(|i| format!("[v{i}]")).collect();
        filters.push(format!("{inputs}concat=n={clip_count}:v=1:a=0[vcat]"));
        video_label = "vcat".into();
    }

    // Overlay layers, bottom to top.
    if let Some(overlay) = &request.overlay {
        let mut text_index = 0usize;
        for layer in overlay.layers() {
            match &layer.content {
                LayerContent::Background(_) | LayerContent::Video => {}
                LayerContent::Text(run) => {
                    let next = format!("vtxt{text_index}");
                    let mut draw = format!(
                        "[{video_label}]drawtext=text={}:font='{}':fontsize={:.0}\
                         :fontcolor={}:x={:.0}:y={:.0}",
                        escape_drawtext(&run.text),
                        run.font,
                        run.font_size,
                        ffmpeg_color(run.color),
                        layer.frame.x,
                        layer.frame.y,
                    );
                    if let Some(active) = layer.active {
                        draw.push_str(&format!(
                            ":enable='between(t,{:.6},{:.6})'",
                            active.start.to_seconds_f64(),
                            active.end().to_seconds_f64()
                        ));
                    }
                    draw.push_str(&format!("[{next}]"));
                    filters.push(draw);
                    video_label = next;
                    text_index += 1;
                }
                LayerContent::Image(_) => {
                    tracing::warn!("image overlays are not supported by the ffmpeg engine yet");
                }
                LayerContent::Path(_) => {
                    tracing::warn!("path overlays are not supported by the ffmpeg engine yet");
                }
            }
        }
    }

    // Audio chains, offset past the video inputs.
    let mut audio_label = None;
    if !audio_segments.is_empty() {
        for (j, segment) in audio_segments.iter().enumerate() {
            let input = clip_count + j;
            let start = segment.source_range.start.to_seconds_f64();
            let end = segment.source_range.end().to_seconds_f64();
            filters.push(format!(
                "[{input}:a]atrim=start={start:.6}:end={end:.6},asetpts=PTS-STARTPTS[a{j}]"
            ));
        }
        if audio_segments.len() > 1 {
            let inputs: String = (0..audio_segments.len()).map(|j| format!("[a{j}]")).collect();
            filters.push(format!(
                "{inputs}concat=n={}:v=0:a=1[acat]",
                audio_segments.len()
            ));
            audio_label = Some("acat".to_string());
        } else {
            audio_label = Some("a0".to_string());
        }
    }

    args.push("-filter_complex".into());
    args.push(filters.join(";"));
    args.push("-map".into());
    args.push(format!("[{video_label}]"));
    if let Some(label) = audio_label {
        args.push("-map".into());
        args.push(format!("[{label}]"));
        args.push("-c:a".into());
        args.push("aac".into());
    }
    args.push("-c:v".into());
    args.push("libx264".into());
    args.push("-pix_fmt".into());
    args.push("yuv420p".into());
    args.push("-r".into());
    args.push(format!(
        "{}/{}",
        composition.frame_rate.numerator, composition.frame_rate.denominator
    ));
    if request.format == ContainerFormat::Mp4 {
        args.push("-movflags".into());
        args.push("+faststart".into());
    }
    args.push(request.output.to_string_lossy().into_owned());

    Ok(args)
}

/// Per-clip fade window `(start, duration)` in clip-local seconds,
/// derived from ramp directives on the video track.
fn fade_plan(composition: &Composition, video: &Track) -> Vec<Option<(f64, f64)>> {
    let mut fades = vec![None; video.segments().len()];
    for instruction in &composition.instructions {
        for layer in &instruction.layers {
            if layer.track_id != video.id {
                continue;
            }
            let OpacityDirective::Ramp { range, .. } = layer.opacity else {
                continue;
            };
            let Some(index) = video
                .segments()
                .iter()
                .position(|s| s.timeline_range() == layer.time_range)
            else {
                continue;
            };
            let clip_duration = layer.time_range.duration.to_seconds_f64();
            let fade_duration = range.duration.to_seconds_f64().min(clip_duration);
            fades[index] = Some((clip_duration - fade_duration, fade_duration));
        }
    }
    fades
}

fn ffmpeg_color(color: Color) -> String {
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "0x{:02X}{:02X}{:02X}@{:.3}",
        to_u8(color.r),
        to_u8(color.g),
        to_u8(color.b),
        color.a.clamp(0.0, 1.0)
    )
}

fn escape_drawtext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '\'' | ':' | ',' | ';' | '%' | '[' | ']' | '=') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
