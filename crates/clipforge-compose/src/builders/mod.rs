//! Composition builders.
//!
//! All builders are synchronous: track insertion and geometry work is
//! CPU-bound and fast. Build errors are returned immediately and no
//! partial composition escapes. Audio degradation is the one deliberate
//! exception: a missing or short audio stream drops the audio track,
//! logs a warning, and sets [`BuildOutput::partial_audio_loss`].

mod multi;
mod single;
mod trim;

pub use multi::{fit_transform, MultiClipBuilder};
pub use single::SingleClipBuilder;
pub use trim::TrimBuilder;

use std::path::Path;

use clipforge_annotate::OverlayStack;
use clipforge_core::{RationalTime, TimeRange};

use crate::composition::Composition;
use crate::source::SourceInfo;
use crate::track::Track;

/// Result of a build operation.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub composition: Composition,
    /// Overlay stack to composite over the video layer, when the build
    /// produced one.
    pub overlay: Option<OverlayStack>,
    /// True when an audio stream existed but could not be carried over;
    /// the composition degrades to video-only.
    pub partial_audio_loss: bool,
}

/// Insert the audio stream of `info` into `track`, best effort.
///
/// Returns true when audio existed but was dropped. Never fails the
/// overall build.
pub(crate) fn insert_audio_best_effort(
    track: &mut Track,
    info: &SourceInfo,
    source: &Path,
    range: TimeRange,
    at: RationalTime,
) -> bool {
    let Some(audio) = info.primary_audio() else {
        return false;
    };

    if audio.duration < range.end() {
        tracing::warn!(
            source = %source.display(),
            "audio stream shorter than requested range, dropping audio"
        );
        return true;
    }
    if let Err(err) = track.insert(source, range, at) {
        tracing::warn!(
            source = %source.display(),
            %err,
            "audio track insertion failed, dropping audio"
        );
        return true;
    }
    false
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Mock inspector for builder tests.

    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use clipforge_core::{
        AffineTransform, ClipForgeError, RationalTime, Result, Size,
    };

    use crate::source::{AudioStreamInfo, SourceInfo, SourceInspector, VideoStreamInfo};

    #[derive(Default)]
    pub struct MockInspector {
        sources: HashMap<PathBuf, SourceInfo>,
    }

    impl MockInspector {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, path: impl Into<PathBuf>, info: SourceInfo) -> Self {
            self.sources.insert(path.into(), info);
            self
        }
    }

    impl SourceInspector for MockInspector {
        fn inspect(&self, path: &Path) -> Result<SourceInfo> {
            self.sources
                .get(path)
                .cloned()
                .ok_or_else(|| ClipForgeError::SourceCorrupt(path.display().to_string()))
        }
    }

    pub fn video_stream(size: Size, transform: AffineTransform, secs: i64) -> VideoStreamInfo {
        VideoStreamInfo {
            natural_size: size,
            transform,
            duration: RationalTime::from_secs(secs),
            codec: Some("h264".into()),
        }
    }

    pub fn audio_stream(secs: i64) -> AudioStreamInfo {
        AudioStreamInfo {
            duration: RationalTime::from_secs(secs),
            sample_rate: 48_000,
            channels: 2,
            codec: Some("aac".into()),
        }
    }

    /// Landscape source with matching audio.
    pub fn landscape(secs: i64) -> SourceInfo {
        SourceInfo {
            duration: RationalTime::from_secs(secs),
            video: vec![video_stream(
                Size::new(1280.0, 720.0),
                AffineTransform::IDENTITY,
                secs,
            )],
            audio: vec![audio_stream(secs)],
        }
    }

    /// Portrait source (90° display rotation, frame translated back to
    /// the origin as container matrices do), no audio.
    pub fn portrait(secs: i64) -> SourceInfo {
        SourceInfo {
            duration: RationalTime::from_secs(secs),
            video: vec![video_stream(
                Size::new(1920.0, 1080.0),
                AffineTransform::ROTATE_90.then_translate(1080.0, 0.0),
                secs,
            )],
            audio: Vec::new(),
        }
    }

    /// Source with audio only.
    pub fn audio_only(secs: i64) -> SourceInfo {
        SourceInfo {
            duration: RationalTime::from_secs(secs),
            video: Vec::new(),
            audio: vec![audio_stream(secs)],
        }
    }
}
