//! Multi-clip sequential timeline with fit-to-canvas transforms and
//! boundary fades.

use clipforge_core::{
    oriented_size, resolve, AffineTransform, RationalTime, Result, Size, TimeRange,
};

use crate::builders::{insert_audio_best_effort, BuildOutput};
use crate::composition::Composition;
use crate::config::BuilderConfig;
use crate::instruction::{CompositionInstruction, LayerInstruction, OpacityDirective};
use crate::source::{SourceClip, SourceInspector};
use crate::track::{Track, TrackKind};

/// Transform fitting a clip into the render canvas.
///
/// `transform` is the clip's preferred display transform, translation
/// included, so a rotated frame already sits at the origin with the
/// orientation-corrected display size. That display size is scaled
/// uniformly to fit the canvas, then centered: both axes for portrait
/// clips (compensating for the width/height swap), vertically only for
/// landscape clips. The height fit term uses the canvas height; the
/// original implementation reused the canvas width there, which only
/// coincided with this on square canvases.
pub fn fit_transform(natural: Size, transform: AffineTransform, canvas: Size) -> AffineTransform {
    let orientation = resolve(&transform);
    let display = oriented_size(natural, &orientation);

    let scale = f64::min(
        canvas.width as f64 / display.width as f64,
        canvas.height as f64 / display.height as f64,
    );
    let tx = if orientation.is_portrait {
        (canvas.width as f64 - display.width as f64 * scale) / 2.0
    } else {
        0.0
    };
    let ty = (canvas.height as f64 - display.height as f64 * scale) / 2.0;

    transform.then_scale(scale).then_translate(tx, ty)
}

/// Builds a sequential multi-clip composition on a fixed canvas.
pub struct MultiClipBuilder<I> {
    inspector: I,
    config: BuilderConfig,
    cross_fade: bool,
}

impl<I: SourceInspector> MultiClipBuilder<I> {
    pub fn new(inspector: I) -> Self {
        Self {
            inspector,
            config: BuilderConfig::default(),
            cross_fade: false,
        }
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Fade each clip's opacity 1→0 over the cross-fade window at its
    /// boundary instead of cutting instantly.
    pub fn with_cross_fade(mut self, cross_fade: bool) -> Self {
        self.cross_fade = cross_fade;
        self
    }

    /// Build a composition playing `sources` back to back.
    ///
    /// Sources without a video stream are skipped entirely: they
    /// contribute no duration and no error. An empty (or fully skipped)
    /// input yields a valid zero-duration composition; exporting it fails
    /// downstream rather than here.
    pub fn build(&self, sources: &[SourceClip]) -> Result<BuildOutput> {
        let canvas = self.config.canvas_size;
        let mut video_track = Track::new(TrackKind::Video);
        let mut audio_track = Track::new(TrackKind::Audio);
        let mut partial_audio_loss = false;

        // Probe up front so boundary handling knows which contributing
        // clip is the last one.
        let mut clips = Vec::new();
        for source in sources {
            let info = self.inspector.inspect(&source.path)?;
            let Some(video) = info.primary_video().cloned() else {
                tracing::warn!(
                    source = %source.path.display(),
                    "source has no video track, skipping"
                );
                continue;
            };
            let range = source.range.unwrap_or_else(|| info.full_range());
            clips.push((source, video, range, info));
        }

        let mut layers = Vec::with_capacity(clips.len());
        let mut insert_time = RationalTime::ZERO;
        let last = clips.len().saturating_sub(1);

        for (index, (source, video, range, info)) in clips.iter().enumerate() {
            video_track.insert(&source.path, *range, insert_time)?;
            partial_audio_loss |= insert_audio_best_effort(
                &mut audio_track,
                info,
                &source.path,
                *range,
                insert_time,
            );

            let clip_span = TimeRange::new(insert_time, range.duration);
            let opacity = self.boundary_opacity(clip_span, index == last);
            layers.push(
                LayerInstruction::new(
                    video_track.id,
                    clip_span,
                    fit_transform(video.natural_size, video.transform, canvas),
                )
                .with_opacity(opacity),
            );

            insert_time = insert_time + range.duration;
        }

        let mut composition = Composition::new(canvas, self.config.frame_rate);
        if insert_time.is_positive() {
            let mut instruction =
                CompositionInstruction::new(TimeRange::new(RationalTime::ZERO, insert_time));
            for layer in layers {
                instruction.push_layer(layer);
            }
            composition.instructions.push(instruction);
        }
        if !video_track.is_empty() {
            composition.video_track = Some(video_track);
        }
        if !audio_track.is_empty() {
            composition.audio_track = Some(audio_track);
        }

        tracing::debug!(
            clips = clips.len(),
            skipped = sources.len() - clips.len(),
            duration = %composition.duration(),
            cross_fade = self.cross_fade,
            "built multi-clip composition"
        );
        debug_assert!(composition.validate().is_ok());

        Ok(BuildOutput {
            composition,
            overlay: None,
            partial_audio_loss,
        })
    }

    /// Opacity directive at a clip's trailing boundary. Internal
    /// boundaries only; the final clip simply ends with the composition.
    fn boundary_opacity(&self, clip_span: TimeRange, is_last: bool) -> OpacityDirective {
        if is_last {
            return OpacityDirective::Opaque;
        }
        if self.cross_fade {
            OpacityDirective::Ramp {
                from: 1.0,
                to: 0.0,
                range: TimeRange::new(clip_span.end(), self.config.crossfade),
            }
        } else {
            OpacityDirective::SetAt {
                value: 0.0,
                at: clip_span.end(),
            }
        }
    }
}
