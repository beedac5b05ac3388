//! Builder configuration.

use clipforge_core::{FrameRate, RationalTime, Size};
use serde::{Deserialize, Serialize};

/// Explicit configuration shared by the builders.
///
/// Hoists what used to be embedded literals: the multi-clip canvas, the
/// nominal frame rate, and the cross-fade window length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Render canvas for multi-clip timelines.
    pub canvas_size: Size,
    /// Nominal frame interval of produced compositions.
    pub frame_rate: FrameRate,
    /// Length of the opacity ramp at cross-faded clip boundaries.
    pub crossfade: RationalTime,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(1280.0, 1280.0),
            frame_rate: FrameRate::FPS_30,
            crossfade: RationalTime::from_secs(1),
        }
    }
}
