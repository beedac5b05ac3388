//! ClipForge Annotate - overlay annotations composited onto video
//!
//! Annotations are typed overlay descriptors (image, text, vector path)
//! that each produce a renderable layer. Layers are collected into an
//! `OverlayStack` which the export runner hands to the media engine's
//! compositing hook. Layer coordinates use a bottom-left origin with the
//! y axis pointing up, matching compositing-layer conventions.

pub mod annotation;
pub mod layer;
pub mod watermark;

pub use annotation::{
    Annotation, ImageAnnotation, PathAnnotation, PathCommand, PathShape, TextAlignment,
    TextAnnotation, TextRun, DEFAULT_FONT_SIZE, FALLBACK_FONT,
};
pub use layer::{LayerContent, OverlayLayer, OverlayStack};
pub use watermark::{WatermarkCorner, WatermarkLayout};
