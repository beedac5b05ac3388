//! Renderable overlay layers and the overlay stack.

use clipforge_core::{Color, Rect, Size, TimeRange};
use image::RgbaImage;

use crate::annotation::{PathShape, TextRun};

/// Content carried by an overlay layer.
#[derive(Debug, Clone)]
pub enum LayerContent {
    /// Solid background fill (placeholder layer at the bottom of the stack).
    Background(Color),
    /// Passthrough layer the engine substitutes the rendered video into.
    Video,
    /// Bitmap content.
    Image(RgbaImage),
    /// Styled text content.
    Text(TextRun),
    /// Stroked/filled vector path.
    Path(PathShape),
}

/// A single renderable layer with a frame and an optional active range.
///
/// `active = None` means the layer is visible for the entire composition.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    pub frame: Rect,
    pub active: Option<TimeRange>,
    pub content: LayerContent,
}

impl OverlayLayer {
    pub fn new(frame: Rect, content: LayerContent) -> Self {
        Self {
            frame,
            active: None,
            content,
        }
    }

    pub fn with_active(mut self, range: TimeRange) -> Self {
        self.active = Some(range);
        self
    }

    /// Whether the layer is visible at `time`.
    pub fn is_active_at(&self, time: clipforge_core::RationalTime) -> bool {
        match self.active {
            Some(range) => range.contains(time),
            None => true,
        }
    }
}

/// Ordered stack of overlay layers for one composition.
///
/// Built as background + video passthrough, with annotation layers pushed
/// on top in caller order (later annotations draw over earlier ones).
/// Ownership of a layer transfers to the stack when pushed.
#[derive(Debug, Clone)]
pub struct OverlayStack {
    canvas: Rect,
    layers: Vec<OverlayLayer>,
}

impl OverlayStack {
    /// Background placeholder and video passthrough layer sized to the
    /// render canvas.
    pub fn for_canvas(size: Size) -> Self {
        let canvas = Rect::from_size(size);
        let layers = vec![
            OverlayLayer::new(canvas, LayerContent::Background(Color::TRANSPARENT)),
            OverlayLayer::new(canvas, LayerContent::Video),
        ];
        Self { canvas, layers }
    }

    /// Append a layer above everything pushed so far.
    pub fn push(&mut self, layer: OverlayLayer) {
        self.layers.push(layer);
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn layers(&self) -> &[OverlayLayer] {
        &self.layers
    }

    /// Index of the video passthrough layer.
    pub fn video_layer_index(&self) -> Option<usize> {
        self.layers
            .iter()
            .position(|l| matches!(l.content, LayerContent::Video))
    }

    /// Number of annotation layers (everything above background + video).
    pub fn annotation_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| {
                !matches!(
                    l.content,
                    LayerContent::Background(_) | LayerContent::Video
                )
            })
            .count()
    }
}
