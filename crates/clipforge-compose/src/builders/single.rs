//! Single-clip composition with an annotation overlay stack.

use clipforge_annotate::{Annotation, OverlayStack};
use clipforge_core::{
    oriented_size, resolve, AffineTransform, ClipForgeError, RationalTime, Result, TimeRange,
};

use crate::builders::{insert_audio_best_effort, BuildOutput};
use crate::composition::Composition;
use crate::config::BuilderConfig;
use crate::instruction::{CompositionInstruction, LayerInstruction};
use crate::source::{SourceClip, SourceInspector};
use crate::track::{Track, TrackKind};

/// Builds a one-clip composition (plus optional audio) with an overlay
/// stack of annotation layers.
pub struct SingleClipBuilder<I> {
    inspector: I,
    config: BuilderConfig,
}

impl<I: SourceInspector> SingleClipBuilder<I> {
    pub fn new(inspector: I) -> Self {
        Self {
            inspector,
            config: BuilderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a composition from `source` with `annotations` stacked over
    /// the video in list order (later annotations draw on top).
    ///
    /// Fails with `SourceCorrupt` when the source carries no video
    /// stream, `TrackInsertFailed` when the requested range does not fit
    /// the source. Audio degradation is non-fatal and reported through
    /// [`BuildOutput::partial_audio_loss`].
    pub fn build(&self, source: &SourceClip, annotations: &[Annotation]) -> Result<BuildOutput> {
        let info = self.inspector.inspect(&source.path)?;
        let video = info.primary_video().ok_or_else(|| {
            ClipForgeError::SourceCorrupt(format!(
                "no video track in {}",
                source.path.display()
            ))
        })?;

        let range = source.range.unwrap_or_else(|| info.full_range());
        if range.end() > info.duration {
            return Err(ClipForgeError::TrackInsertFailed(format!(
                "range ends at {} but source lasts {}",
                range.end(),
                info.duration
            )));
        }

        let mut video_track = Track::new(TrackKind::Video);
        video_track.insert(&source.path, range, RationalTime::ZERO)?;

        let mut audio_track = Track::new(TrackKind::Audio);
        let partial_audio_loss = insert_audio_best_effort(
            &mut audio_track,
            &info,
            &source.path,
            range,
            RationalTime::ZERO,
        );

        let orientation = resolve(&video.transform);
        let render_size = oriented_size(video.natural_size, &orientation);

        let mut overlay = OverlayStack::for_canvas(render_size);
        for annotation in annotations {
            overlay.push(annotation.render_layer());
        }

        let mut composition = Composition::new(render_size, self.config.frame_rate);
        let full_span = TimeRange::new(RationalTime::ZERO, range.duration);

        // One instruction covering the whole timeline; each track keeps
        // its native preferred transform (the video transform already
        // carries the rotation).
        let mut instruction = CompositionInstruction::new(full_span);
        instruction.push_layer(LayerInstruction::new(
            video_track.id,
            full_span,
            video.transform,
        ));
        if !audio_track.is_empty() {
            instruction.push_layer(LayerInstruction::new(
                audio_track.id,
                full_span,
                AffineTransform::IDENTITY,
            ));
        }
        composition.instructions.push(instruction);

        composition.video_track = Some(video_track);
        if !audio_track.is_empty() {
            composition.audio_track = Some(audio_track);
        }

        tracing::debug!(
            source = %source.path.display(),
            duration = %composition.duration(),
            annotations = annotations.len(),
            "built single-clip composition"
        );
        debug_assert!(composition.validate().is_ok());

        Ok(BuildOutput {
            composition,
            overlay: Some(overlay),
            partial_audio_loss,
        })
    }
}
