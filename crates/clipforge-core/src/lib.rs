//! ClipForge Core - Foundation types for video composition
//!
//! This crate provides the fundamental types used throughout ClipForge:
//! - Time representation (RationalTime, FrameRate, TimeRange)
//! - Geometric primitives and 2D affine transforms
//! - Display-orientation resolution from clip transforms
//! - Color values for overlay content
//! - The shared error taxonomy

pub mod color;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod time;

pub use color::Color;
pub use error::{ClipForgeError, Result};
pub use geometry::{AffineTransform, DVec2, Rect, Size, Vec2};
pub use orientation::{oriented_size, resolve, Orientation, VideoOrientation};
pub use time::{FrameRate, RationalTime, TimeRange};
