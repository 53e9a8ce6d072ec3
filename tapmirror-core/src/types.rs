//! Shared types for the capture/display pipeline.

use std::fmt;

// ── Frame ────────────────────────────────────────────────────────

/// One decoded, resized snapshot of the device screen.
///
/// Pixels are stored row-major as `0xAARRGGBB`, the layout the window
/// surface consumes directly. Frames are never mutated after
/// construction; the controller replaces its retained frame instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    /// Build a frame from packed pixels.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Caller guarantees `pixels.len() == width * height`.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A frame where every pixel has the same value.
    #[cfg(test)]
    pub fn filled(width: u32, height: u32, pixel: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// The raw row-major pixel buffer.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Return a copy with one pixel replaced. Out-of-bounds is a no-op.
    #[cfg(test)]
    pub fn with_pixel(&self, x: u32, y: u32, value: u32) -> Self {
        let mut next = self.clone();
        if x < self.width && y < self.height {
            next.pixels[y as usize * self.width as usize + x as usize] = value;
        }
        next
    }
}

/// Pack an RGBA quadruple into `0xAARRGGBB`.
#[inline]
pub const fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

// ── ScreenSize ───────────────────────────────────────────────────

/// Native resolution of the device screen, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSize {
    pub width: u16,
    pub height: u16,
}

impl ScreenSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-zero.
    pub fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ── WindowGeometry ───────────────────────────────────────────────

/// Drawable size and origin of the mirror window. Fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub render_width: u32,
    pub render_height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
}

impl WindowGeometry {
    /// Geometry with the origin at `(0, 0)`.
    pub const fn at_origin(render_width: u32, render_height: u32) -> Self {
        Self {
            render_width,
            render_height,
            origin_x: 0,
            origin_y: 0,
        }
    }
}

// ── Click / Tap ──────────────────────────────────────────────────

/// A click in window-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub x: i32,
    pub y: i32,
}

/// A tap position in device-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapPoint {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for TapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
