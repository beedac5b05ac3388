//! Watermark corner placement.
//!
//! Computes frames for a text block and/or image block pinned to one of
//! the four canvas corners, with the text stacking above (bottom corners)
//! or below (top corners) the image when both are present.
//!
//! One margin rule applies to every corner. The layout constants are
//! explicit configuration rather than embedded literals.

use clipforge_core::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Canvas corner a watermark is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatermarkCorner {
    LeftBottom,
    RightBottom,
    LeftTop,
    RightTop,
}

impl WatermarkCorner {
    pub fn is_left(self) -> bool {
        matches!(self, Self::LeftBottom | Self::LeftTop)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Self::LeftBottom | Self::RightBottom)
    }
}

/// Watermark layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatermarkLayout {
    /// Distance from canvas edges and between stacked blocks.
    pub margin: f32,
    /// Image block width as a fraction of canvas width.
    pub image_fraction: f32,
    /// Vertical padding added to the font size for the text block height.
    pub text_pad: f32,
}

impl Default for WatermarkLayout {
    fn default() -> Self {
        Self {
            margin: 10.0,
            image_fraction: 1.0 / 6.0,
            text_pad: 30.0,
        }
    }
}

impl WatermarkLayout {
    /// Approximate rendered width of `text` at `font_size`.
    ///
    /// Uses a fixed 0.6em advance per character, which matches the
    /// monospace fallback face closely enough for corner placement.
    pub fn measure_text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * 0.6
    }

    /// Height of the text block for a given font size.
    pub fn text_block_height(&self, font_size: f32) -> f32 {
        font_size + self.text_pad
    }

    /// Frame for the image block.
    ///
    /// The image is scaled to one sixth of the canvas width (aspect
    /// preserved). `text_height` is the height of a text block the image
    /// stacks above in the bottom corners; pass `None` when there is no
    /// text.
    pub fn image_frame(
        &self,
        canvas: Size,
        image: Size,
        text_height: Option<f32>,
        corner: WatermarkCorner,
    ) -> Rect {
        let width = canvas.width * self.image_fraction;
        let height = width / image.aspect();

        let x = if corner.is_left() {
            self.margin
        } else {
            canvas.width - width - self.margin
        };
        let y = if corner.is_bottom() {
            match text_height {
                Some(text) => self.margin + text + self.margin,
                None => self.margin,
            }
        } else {
            canvas.height - height - self.margin
        };

        Rect::new(x, y, width, height)
    }

    /// Frame for the text block.
    ///
    /// In the top corners the text sits below `image_frame` when one is
    /// present; in the bottom corners the text hugs the bottom edge (the
    /// image stacks above it instead).
    pub fn text_frame(
        &self,
        canvas: Size,
        text: &str,
        font_size: f32,
        image_frame: Option<Rect>,
        corner: WatermarkCorner,
    ) -> Rect {
        let width = self.measure_text_width(text, font_size);
        let height = self.text_block_height(font_size);

        let x = if corner.is_left() {
            self.margin
        } else {
            canvas.width - width - self.margin
        };
        let y = if corner.is_bottom() {
            self.margin
        } else {
            match image_frame {
                Some(image) => image.y - height - self.margin,
                None => canvas.height - height - self.margin,
            }
        };

        Rect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(1280.0, 720.0);

    fn layout() -> WatermarkLayout {
        WatermarkLayout::default()
    }

    #[test]
    fn left_bottom_text_hugs_corner() {
        let r = layout().text_frame(CANVAS, "watermark", 20.0, None, WatermarkCorner::LeftBottom);
        assert_eq!(r.x, 10.0);
        assert_eq!(r.y, 10.0);
        assert_eq!(r.height, 50.0); // 20 + 30 pad
    }

    #[test]
    fn right_corners_use_same_margin_as_left() {
        let l = layout();
        let text = "mark";
        let left = l.text_frame(CANVAS, text, 20.0, None, WatermarkCorner::LeftBottom);
        let right = l.text_frame(CANVAS, text, 20.0, None, WatermarkCorner::RightBottom);
        assert_eq!(left.x, 10.0);
        assert_eq!(right.x + right.width, CANVAS.width - 10.0);
        assert_eq!(left.width, right.width);
    }

    #[test]
    fn image_scales_to_sixth_of_canvas_width() {
        let r = layout().image_frame(
            CANVAS,
            Size::new(200.0, 100.0),
            None,
            WatermarkCorner::LeftTop,
        );
        assert!((r.width - CANVAS.width / 6.0).abs() < 1e-4);
        assert!((r.height - r.width / 2.0).abs() < 1e-4); // aspect 2:1
        assert_eq!(r.y, CANVAS.height - r.height - 10.0);
    }

    #[test]
    fn bottom_image_stacks_above_text() {
        let l = layout();
        let text_h = l.text_block_height(20.0);
        let img = l.image_frame(
            CANVAS,
            Size::new(100.0, 100.0),
            Some(text_h),
            WatermarkCorner::LeftBottom,
        );
        let txt = l.text_frame(CANVAS, "brand", 20.0, Some(img), WatermarkCorner::LeftBottom);
        // Text at the bottom edge, image one margin above it.
        assert_eq!(txt.y, 10.0);
        assert_eq!(img.y, 10.0 + text_h + 10.0);
    }

    #[test]
    fn top_text_sits_below_image() {
        let l = layout();
        let img = l.image_frame(
            CANVAS,
            Size::new(100.0, 100.0),
            None,
            WatermarkCorner::RightTop,
        );
        let txt = l.text_frame(CANVAS, "brand", 20.0, Some(img), WatermarkCorner::RightTop);
        assert_eq!(txt.y, img.y - txt.height - 10.0);
    }
}
