//! The composition: tracks + render settings + instructions.

use clipforge_core::{ClipForgeError, FrameRate, RationalTime, Result, Size};
use serde::{Deserialize, Serialize};

use crate::instruction::CompositionInstruction;
use crate::track::Track;

/// An in-memory timeline description ready for export.
///
/// At most one video and one audio track. The render size reflects the
/// orientation-corrected natural size of the reference video track (or
/// the canvas size for multi-clip timelines). Immutable by convention
/// once submitted for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    pub video_track: Option<Track>,
    pub audio_track: Option<Track>,
    pub render_size: Size,
    pub frame_rate: FrameRate,
    pub instructions: Vec<CompositionInstruction>,
}

impl Composition {
    pub fn new(render_size: Size, frame_rate: FrameRate) -> Self {
        Self {
            video_track: None,
            audio_track: None,
            render_size,
            frame_rate,
            instructions: Vec::new(),
        }
    }

    /// Nominal frame interval.
    pub fn frame_duration(&self) -> RationalTime {
        self.frame_rate.frame_duration()
    }

    /// Total duration: the latest end across tracks.
    pub fn duration(&self) -> RationalTime {
        self.tracks()
            .map(|t| t.duration())
            .max()
            .unwrap_or(RationalTime::ZERO)
    }

    /// True when no track carries any segment.
    pub fn is_empty(&self) -> bool {
        self.tracks().all(|t| t.is_empty())
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.video_track.iter().chain(self.audio_track.iter())
    }

    /// Check the instruction partition invariant: ordered by start time,
    /// instructions must be contiguous, non-overlapping, and cover
    /// exactly `[0, duration)`. A zero-duration composition must carry
    /// no instructions.
    pub fn validate(&self) -> Result<()> {
        let duration = self.duration();
        if duration.is_zero() {
            return if self.instructions.is_empty() {
                Ok(())
            } else {
                Err(ClipForgeError::InvalidParameter(
                    "zero-duration composition carries instructions".into(),
                ))
            };
        }

        let mut cursor = RationalTime::ZERO;
        for (i, instr) in self.instructions.iter().enumerate() {
            if instr.time_range.start != cursor {
                return Err(ClipForgeError::InvalidParameter(format!(
                    "instruction {} starts at {}, expected {}",
                    i, instr.time_range.start, cursor
                )));
            }
            if !instr.time_range.duration.is_positive() {
                return Err(ClipForgeError::InvalidParameter(format!(
                    "instruction {} has non-positive duration",
                    i
                )));
            }
            cursor = instr.time_range.end();
        }
        if cursor != duration {
            return Err(ClipForgeError::InvalidParameter(format!(
                "instructions cover up to {}, composition lasts {}",
                cursor, duration
            )));
        }
        Ok(())
    }
}
