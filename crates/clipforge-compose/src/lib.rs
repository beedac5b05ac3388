//! ClipForge Compose - timeline composition model and builders
//!
//! A `Composition` is an in-memory timeline description: at most one video
//! and one audio track of non-overlapping source segments, a render size,
//! a frame rate, and a list of time-partitioned composition instructions.
//! Three builders produce compositions from source clips:
//!
//! - [`SingleClipBuilder`] - one clip plus an annotation overlay stack
//! - [`MultiClipBuilder`] - sequential clips fitted to a canvas, with
//!   optional cross-fades at clip boundaries
//! - [`TrimBuilder`] - one clip restricted to a sub-range
//!
//! Builders run synchronously on the caller's thread and reach the outside
//! world only through the [`SourceInspector`] seam; rendering and encoding
//! live behind the media-engine crate.

pub mod builders;
pub mod composition;
pub mod config;
pub mod instruction;
pub mod source;
pub mod track;

pub use builders::{fit_transform, BuildOutput, MultiClipBuilder, SingleClipBuilder, TrimBuilder};
pub use composition::Composition;
pub use config::BuilderConfig;
pub use instruction::{CompositionInstruction, LayerInstruction, OpacityDirective};
pub use source::{AudioStreamInfo, SourceClip, SourceInfo, SourceInspector, VideoStreamInfo};
pub use track::{Segment, Track, TrackKind};
