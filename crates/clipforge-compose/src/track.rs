//! Composition tracks: named lanes of non-overlapping source segments.

use std::path::PathBuf;

use clipforge_core::{ClipForgeError, RationalTime, Result, TimeRange};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    Video,
    Audio,
}

/// A source time-range placed at an insertion time on the track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Media file this segment reads from.
    pub source: PathBuf,
    /// Range within the source.
    pub source_range: TimeRange,
    /// Position on the composition timeline.
    pub at: RationalTime,
}

impl Segment {
    /// The timeline interval this segment occupies.
    pub fn timeline_range(&self) -> TimeRange {
        TimeRange::new(self.at, self.source_range.duration)
    }
}

/// A single lane of time-ordered source segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Uuid,
    pub kind: TrackKind,
    segments: Vec<Segment>,
}

impl Track {
    pub fn new(kind: TrackKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            segments: Vec::new(),
        }
    }

    pub fn new_video() -> Self {
        Self::new(TrackKind::Video)
    }

    pub fn new_audio() -> Self {
        Self::new(TrackKind::Audio)
    }

    /// Insert `source_range` of `source` at timeline position `at`.
    ///
    /// Fails with `TrackInsertFailed` for non-positive durations, negative
    /// insertion times, or overlap with an existing segment. Segments stay
    /// ordered by insertion time.
    pub fn insert(
        &mut self,
        source: impl Into<PathBuf>,
        source_range: TimeRange,
        at: RationalTime,
    ) -> Result<()> {
        if !source_range.duration.is_positive() {
            return Err(ClipForgeError::TrackInsertFailed(
                "segment duration must be positive".into(),
            ));
        }
        if at < RationalTime::ZERO {
            return Err(ClipForgeError::TrackInsertFailed(
                "insertion time must not be negative".into(),
            ));
        }

        let placed = TimeRange::new(at, source_range.duration);
        if let Some(existing) = self
            .segments
            .iter()
            .find(|s| s.timeline_range().overlaps(placed))
        {
            return Err(ClipForgeError::TrackInsertFailed(format!(
                "segment at {} overlaps existing segment at {}",
                placed.start, existing.at
            )));
        }

        let segment = Segment {
            source: source.into(),
            source_range,
            at,
        };
        let index = self
            .segments
            .partition_point(|s| s.at < segment.at);
        self.segments.insert(index, segment);
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total duration: the end of the last segment.
    pub fn duration(&self) -> RationalTime {
        self.segments
            .iter()
            .map(|s| s.timeline_range().end())
            .max()
            .unwrap_or(RationalTime::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: i64) -> RationalTime {
        RationalTime::from_secs(s)
    }

    #[test]
    fn sequential_inserts_accumulate_duration() {
        let mut track = Track::new_video();
        track
            .insert("a.mov", TimeRange::new(secs(0), secs(5)), secs(0))
            .unwrap();
        track
            .insert("b.mov", TimeRange::new(secs(2), secs(3)), secs(5))
            .unwrap();
        assert_eq!(track.segments().len(), 2);
        assert_eq!(track.duration(), secs(8));
    }

    #[test]
    fn overlapping_insert_is_rejected() {
        let mut track = Track::new_video();
        track
            .insert("a.mov", TimeRange::new(secs(0), secs(5)), secs(0))
            .unwrap();
        let err = track
            .insert("b.mov", TimeRange::new(secs(0), secs(5)), secs(4))
            .unwrap_err();
        assert!(matches!(err, ClipForgeError::TrackInsertFailed(_)));
        assert_eq!(track.segments().len(), 1);
    }

    #[test]
    fn zero_duration_insert_is_rejected() {
        let mut track = Track::new_audio();
        let err = track
            .insert("a.mov", TimeRange::new(secs(0), secs(0)), secs(0))
            .unwrap_err();
        assert!(matches!(err, ClipForgeError::TrackInsertFailed(_)));
    }

    #[test]
    fn out_of_order_inserts_are_kept_sorted() {
        let mut track = Track::new_video();
        track
            .insert("b.mov", TimeRange::new(secs(0), secs(2)), secs(5))
            .unwrap();
        track
            .insert("a.mov", TimeRange::new(secs(0), secs(5)), secs(0))
            .unwrap();
        assert_eq!(track.segments()[0].at, secs(0));
        assert_eq!(track.segments()[1].at, secs(5));
        assert_eq!(track.duration(), secs(7));
    }
}
