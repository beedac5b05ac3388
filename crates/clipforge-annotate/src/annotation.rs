//! Typed overlay annotations.
//!
//! Each variant produces a renderable `OverlayLayer` via
//! [`Annotation::render_layer`]. Rendering itself happens in the media
//! engine; this module only describes content and placement.

use clipforge_core::{Color, Rect, TimeRange, Vec2};
use image::RgbaImage;

use crate::layer::{LayerContent, OverlayLayer};

/// Default text size when the caller does not specify one.
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Fallback face used when no font is given.
pub const FALLBACK_FONT: &str = "DejaVu Sans Mono";

/// Horizontal text alignment within the layer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

/// A fully resolved, styled text run ready for rasterization.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub font: String,
    pub font_size: f32,
    pub color: Color,
    pub background: Color,
    pub alignment: TextAlignment,
    /// Device pixel ratio the engine should rasterize at for sharp output.
    pub rasterization_scale: f32,
}

/// A single path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    Close,
}

/// A resolved stroked/filled path outline.
#[derive(Debug, Clone)]
pub struct PathShape {
    pub commands: Vec<PathCommand>,
    pub position: Vec2,
    pub line_width: f32,
    pub stroke: Color,
    pub fill: Color,
}

impl PathShape {
    /// Bounding box of all path points, offset by the shape position.
    pub fn bounds(&self) -> Rect {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut any = false;
        for cmd in &self.commands {
            for p in cmd.control_points() {
                min = min.min(p);
                max = max.max(p);
                any = true;
            }
        }
        if !any {
            return Rect::new(self.position.x, self.position.y, 0.0, 0.0);
        }
        Rect::new(
            self.position.x + min.x,
            self.position.y + min.y,
            max.x - min.x,
            max.y - min.y,
        )
    }
}

impl PathCommand {
    /// Every point the command references, control points included.
    pub fn control_points(&self) -> Vec<Vec2> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => vec![p],
            Self::QuadTo { ctrl, to } => vec![ctrl, to],
            Self::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
            Self::Close => Vec::new(),
        }
    }
}

/// Image annotation: a bitmap placed at a frame.
#[derive(Debug, Clone)]
pub struct ImageAnnotation {
    pub image: RgbaImage,
    pub frame: Rect,
    pub active: Option<TimeRange>,
    pub caption: Option<String>,
}

impl ImageAnnotation {
    pub fn new(image: RgbaImage, frame: Rect) -> Self {
        Self {
            image,
            frame,
            active: None,
            caption: None,
        }
    }
}

/// Text annotation: a styled text run placed at a frame.
#[derive(Debug, Clone)]
pub struct TextAnnotation {
    pub text: String,
    pub frame: Rect,
    pub active: Option<TimeRange>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub color: Color,
    pub background: Option<Color>,
    pub rasterization_scale: f32,
}

impl TextAnnotation {
    pub fn new(text: impl Into<String>, frame: Rect) -> Self {
        Self {
            text: text.into(),
            frame,
            active: None,
            font: None,
            font_size: None,
            color: Color::BLACK,
            background: None,
            rasterization_scale: 1.0,
        }
    }
}

/// Vector-path annotation: a stroked/filled outline at a position.
#[derive(Debug, Clone)]
pub struct PathAnnotation {
    pub commands: Vec<PathCommand>,
    pub position: Vec2,
    pub line_width: f32,
    pub active: Option<TimeRange>,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
}

impl PathAnnotation {
    pub fn new(commands: Vec<PathCommand>, position: Vec2, line_width: f32) -> Self {
        Self {
            commands,
            position,
            line_width,
            active: None,
            stroke: None,
            fill: None,
        }
    }
}

/// A caller-supplied overlay to composite on top of the video.
#[derive(Debug, Clone)]
pub enum Annotation {
    Image(ImageAnnotation),
    Text(TextAnnotation),
    Path(PathAnnotation),
}

impl Annotation {
    /// The time range this annotation is visible in, if restricted.
    pub fn active(&self) -> Option<TimeRange> {
        match self {
            Self::Image(a) => a.active,
            Self::Text(a) => a.active,
            Self::Path(a) => a.active,
        }
    }

    /// Produce the renderable layer for this annotation.
    ///
    /// Defaults applied here: text falls back to [`FALLBACK_FONT`] at size
    /// 20 with a transparent background and center alignment; a path
    /// strokes black when unset and fills with the stroke color.
    pub fn render_layer(&self) -> OverlayLayer {
        match self {
            Self::Image(a) => {
                let mut layer =
                    OverlayLayer::new(a.frame, LayerContent::Image(a.image.clone()));
                layer.active = a.active;
                layer
            }
            Self::Text(a) => {
                let run = TextRun {
                    text: a.text.clone(),
                    font: a.font.clone().unwrap_or_else(|| FALLBACK_FONT.to_string()),
                    font_size: a.font_size.unwrap_or(DEFAULT_FONT_SIZE),
                    color: a.color,
                    background: a.background.unwrap_or(Color::TRANSPARENT),
                    alignment: TextAlignment::Center,
                    rasterization_scale: a.rasterization_scale,
                };
                let mut layer = OverlayLayer::new(a.frame, LayerContent::Text(run));
                layer.active = a.active;
                layer
            }
            Self::Path(a) => {
                let stroke = a.stroke.unwrap_or(Color::BLACK);
                let shape = PathShape {
                    commands: a.commands.clone(),
                    position: a.position,
                    line_width: a.line_width,
                    stroke,
                    fill: a.fill.unwrap_or(stroke),
                };
                let frame = shape.bounds();
                let mut layer = OverlayLayer::new(frame, LayerContent::Path(shape));
                layer.active = a.active;
                layer
            }
        }
    }
}
