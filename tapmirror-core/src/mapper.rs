//! Window-local click → device-screen tap conversion.

use crate::types::{ClickEvent, ScreenSize, TapPoint, WindowGeometry};

/// Scale one axis from window pixels to device pixels.
///
/// A zero render or target dimension yields 0; the result is otherwise
/// clamped to `[0, target)`.
fn scale_axis(click: i32, render: u32, target: u16) -> i32 {
    if target == 0 || render == 0 {
        return 0;
    }
    let scaled = click as i64 * target as i64 / render as i64;
    scaled.clamp(0, target as i64 - 1) as i32
}

/// Map a window-local click to device coordinates.
///
/// `click_x` / `click_y` must already have the window origin subtracted.
pub fn map_click(
    click_x: i32,
    click_y: i32,
    render_width: u32,
    render_height: u32,
    target_width: u16,
    target_height: u16,
) -> (i32, i32) {
    (
        scale_axis(click_x, render_width, target_width),
        scale_axis(click_y, render_height, target_height),
    )
}

// ── CoordinateMapper ─────────────────────────────────────────────

/// [`map_click`] bound to a fixed window geometry and device size.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    geometry: WindowGeometry,
    screen: ScreenSize,
}

impl CoordinateMapper {
    pub fn new(geometry: WindowGeometry, screen: ScreenSize) -> Self {
        Self { geometry, screen }
    }

    /// Convert an absolute pointer position (surface coordinates) into
    /// the window-local click it represents.
    pub fn localize(&self, pointer_x: f32, pointer_y: f32) -> ClickEvent {
        ClickEvent {
            x: pointer_x as i32 - self.geometry.origin_x,
            y: pointer_y as i32 - self.geometry.origin_y,
        }
    }

    /// Convert a window-local click into a device tap.
    pub fn map(&self, click: ClickEvent) -> TapPoint {
        let (x, y) = map_click(
            click.x,
            click.y,
            self.geometry.render_width,
            self.geometry.render_height,
            self.screen.width,
            self.screen.height,
        );
        TapPoint { x, y }
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }
}
