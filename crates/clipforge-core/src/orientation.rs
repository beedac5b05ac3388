//! Display-orientation resolution from a clip's preferred transform.
//!
//! Sources record rotation as an affine transform rather than rotating
//! pixels. The resolver maps the four canonical rotation matrices onto an
//! orientation, ignoring translation; anything else falls back to
//! `(Up, landscape)` without raising an error.

use serde::{Deserialize, Serialize};

use crate::geometry::{AffineTransform, Size};

/// Display orientation of a video clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

/// Resolved orientation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOrientation {
    pub orientation: Orientation,
    pub is_portrait: bool,
}

impl VideoOrientation {
    pub const UP: Self = Self {
        orientation: Orientation::Up,
        is_portrait: false,
    };
}

/// Resolve orientation from a preferred display transform.
///
/// Pure function of the (a, b, c, d) components; total over all inputs.
pub fn resolve(transform: &AffineTransform) -> VideoOrientation {
    let (a, b, c, d) = (transform.a, transform.b, transform.c, transform.d);
    if a == 0.0 && b == 1.0 && c == -1.0 && d == 0.0 {
        VideoOrientation {
            orientation: Orientation::Right,
            is_portrait: true,
        }
    } else if a == 0.0 && b == -1.0 && c == 1.0 && d == 0.0 {
        VideoOrientation {
            orientation: Orientation::Left,
            is_portrait: true,
        }
    } else if a == -1.0 && b == 0.0 && c == 0.0 && d == -1.0 {
        VideoOrientation {
            orientation: Orientation::Down,
            is_portrait: false,
        }
    } else {
        // (1, 0, 0, 1) and every non-canonical combination.
        VideoOrientation::UP
    }
}

/// The render-canvas size for a clip: natural size with width/height
/// swapped when the clip displays as portrait.
pub fn oriented_size(natural: Size, orientation: &VideoOrientation) -> Size {
    if orientation.is_portrait {
        natural.swapped()
    } else {
        natural
    }
}
