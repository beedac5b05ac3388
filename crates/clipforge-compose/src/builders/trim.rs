//! Trim: a composition restricted to a sub-range of one source clip.

use std::path::Path;

use clipforge_core::{
    oriented_size, resolve, AffineTransform, ClipForgeError, RationalTime, Result, TimeRange,
};

use crate::builders::{insert_audio_best_effort, BuildOutput};
use crate::composition::Composition;
use crate::config::BuilderConfig;
use crate::instruction::{CompositionInstruction, LayerInstruction};
use crate::source::SourceInspector;
use crate::track::{Track, TrackKind};

/// Builds a composition covering only `trim` of a single source.
/// No overlay stack is produced.
pub struct TrimBuilder<I> {
    inspector: I,
    config: BuilderConfig,
}

impl<I: SourceInspector> TrimBuilder<I> {
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

    pub fn build(&self, source: &Path, trim: TimeRange) -> Result<BuildOutput> {
        let info = self.inspector.inspect(source)?;
        let video = info.primary_video().ok_or_else(|| {
            ClipForgeError::SourceCorrupt(format!("no video track in {}", source.display()))
        })?;

        if trim.end() > info.duration {
            return Err(ClipForgeError::TrackInsertFailed(format!(
                "trim ends at {} but source lasts {}",
                trim.end(),
                info.duration
            )));
        }

        let mut video_track = Track::new(TrackKind::Video);
        video_track.insert(source, trim, RationalTime::ZERO)?;

        let mut audio_track = Track::new(TrackKind::Audio);
        let partial_audio_loss =
            insert_audio_best_effort(&mut audio_track, &info, source, trim, RationalTime::ZERO);

        let orientation = resolve(&video.transform);
        let render_size = oriented_size(video.natural_size, &orientation);

        let mut composition = Composition::new(render_size, self.config.frame_rate);
        let full_span = TimeRange::new(RationalTime::ZERO, trim.duration);

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
            source = %source.display(),
            trim_start = %trim.start,
            duration = %trim.duration,
            "built trim composition"
        );
        debug_assert!(composition.validate().is_ok());

        Ok(BuildOutput {
            composition,
            overlay: None,
            partial_audio_loss,
        })
    }
}
