//! Per-track layer instructions and composition instructions.

use clipforge_core::{AffineTransform, RationalTime, TimeRange};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

/// Opacity behavior of a layer instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OpacityDirective {
    /// Fully opaque for the whole instruction range.
    Opaque,
    /// Instantaneous opacity step at a point in time.
    SetAt { value: f32, at: RationalTime },
    /// Linear ramp across `range` (used for cross-fades at clip
    /// boundaries; the range may extend past the instruction's own
    /// time range into the following clip's window).
    Ramp {
        from: f32,
        to: f32,
        range: TimeRange,
    },
}

/// Time-scoped transform/opacity directive for one track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerInstruction {
    pub track_id: Uuid,
    pub time_range: TimeRange,
    /// Transform applied to the track's frames at the range start.
    pub transform: AffineTransform,
    pub opacity: OpacityDirective,
}

impl LayerInstruction {
    /// Opaque instruction applying `transform` over `time_range`.
    pub fn new(track_id: Uuid, time_range: TimeRange, transform: AffineTransform) -> Self {
        Self {
            track_id,
            time_range,
            transform,
            opacity: OpacityDirective::Opaque,
        }
    }

    pub fn with_opacity(mut self, opacity: OpacityDirective) -> Self {
        self.opacity = opacity;
        self
    }
}

/// A time-range over the whole composition paired with the layer
/// instructions active in that range, ordered bottom to top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionInstruction {
    pub time_range: TimeRange,
    pub layers: SmallVec<[LayerInstruction; 2]>,
}

impl CompositionInstruction {
    pub fn new(time_range: TimeRange) -> Self {
        Self {
            time_range,
            layers: SmallVec::new(),
        }
    }

    pub fn push_layer(&mut self, layer: LayerInstruction) {
        self.layers.push(layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opacity_is_opaque() {
        let instr = LayerInstruction::new(
            Uuid::new_v4(),
            TimeRange::new(RationalTime::ZERO, RationalTime::from_secs(5)),
            AffineTransform::IDENTITY,
        );
        assert_eq!(instr.opacity, OpacityDirective::Opaque);
    }

    #[test]
    fn instructions_serialize_roundtrip() {
        let mut ci = CompositionInstruction::new(TimeRange::new(
            RationalTime::ZERO,
            RationalTime::from_secs(8),
        ));
        ci.push_layer(
            LayerInstruction::new(
                Uuid::new_v4(),
                TimeRange::new(RationalTime::ZERO, RationalTime::from_secs(5)),
                AffineTransform::ROTATE_90,
            )
            .with_opacity(OpacityDirective::Ramp {
                from: 1.0,
                to: 0.0,
                range: TimeRange::new(RationalTime::from_secs(5), RationalTime::from_secs(1)),
            }),
        );

        let json = serde_json::to_string(&ci).unwrap();
        let back: CompositionInstruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.layers.len(), 1);
        assert_eq!(back.time_range, ci.time_range);
        assert_eq!(back.layers[0].transform, AffineTransform::ROTATE_90);
    }
}
