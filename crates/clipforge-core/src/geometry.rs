//! Geometric primitives for render geometry.
//!
//! The affine transform keeps its raw (a, b, c, d, tx, ty) components
//! because orientation resolution pattern-matches on them exactly; glam
//! is used for point math.

pub use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D vector.
pub type Vec2 = glam::Vec2;

/// Width/height pair, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width and height exchanged (portrait correction).
    #[inline]
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width / self.height
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `size`.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// 2D affine transform `(a, b, c, d, tx, ty)`:
///
/// ```text
/// | x' |   | a c tx |   | x |
/// | y' | = | b d ty | * | y |
/// ```
///
/// Matches the component layout of a clip's preferred display transform,
/// which is what sources report and what the orientation resolver
/// inspects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// 90° clockwise display rotation (portrait, orientation "right").
    pub const ROTATE_90: Self = Self {
        a: 0.0,
        b: 1.0,
        c: -1.0,
        d: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// 90° counter-clockwise display rotation (portrait, orientation "left").
    pub const ROTATE_270: Self = Self {
        a: 0.0,
        b: -1.0,
        c: 1.0,
        d: 0.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// 180° display rotation (orientation "down").
    pub const ROTATE_180: Self = Self {
        a: -1.0,
        b: 0.0,
        c: 0.0,
        d: -1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Pure translation.
    #[inline]
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Pure (possibly non-uniform) scale.
    #[inline]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// This transform followed by `next` (self is applied first).
    pub fn then(self, next: Self) -> Self {
        Self {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            tx: self.tx * next.a + self.ty * next.c + next.tx,
            ty: self.tx * next.b + self.ty * next.d + next.ty,
        }
    }

    /// This transform followed by a uniform scale.
    #[inline]
    pub fn then_scale(self, s: f64) -> Self {
        self.then(Self::scale(s, s))
    }

    /// This transform followed by a translation.
    #[inline]
    pub fn then_translate(self, tx: f64, ty: f64) -> Self {
        self.then(Self::translation(tx, ty))
    }

    /// Map a point through the transform.
    pub fn transform_point(self, point: DVec2) -> DVec2 {
        DVec2::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// The linear part with translation stripped.
    #[inline]
    pub fn without_translation(self) -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            ..self
        }
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
