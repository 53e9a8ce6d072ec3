//! `minifb` window used as the mirror's display surface.
//!
//! Frames arrive already resized to the window size, so presenting is a
//! straight buffer upload. Escape closes the window like the title-bar
//! button does. The pointer is sampled after every event pump and presses
//! are latched until the controller polls for them.

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};
use tapmirror_core::{
    DisplaySurface, Frame, MirrorError, PointerState, PressLatch, Result, WindowGeometry,
};

/// Native window plus its fixed drawable size.
pub struct MirrorWindow {
    window: Window,
    width: u32,
    height: u32,
    latch: PressLatch,
}

impl MirrorWindow {
    /// Open a non-resizable window of `width × height` pixels.
    pub fn create(title: &str, width: u32, height: u32, vsync: bool) -> Result<Self> {
        let mut window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| MirrorError::Display(e.to_string()))?;

        // 0 disables the limiter.
        window.set_target_fps(if vsync { 60 } else { 0 });

        Ok(Self {
            window,
            width,
            height,
            latch: PressLatch::new(),
        })
    }

    fn sample_pointer(&mut self) {
        let sample = PointerState {
            primary_down: self.window.get_mouse_down(MouseButton::Left),
            position: self.window.get_mouse_pos(MouseMode::Discard),
        };
        self.latch.observe(sample);
    }
}

impl DisplaySurface for MirrorWindow {
    fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.window
            .update_with_buffer(frame.pixels(), frame.width() as usize, frame.height() as usize)
            .map_err(|e| MirrorError::Display(e.to_string()))?;
        self.sample_pointer();
        Ok(())
    }

    fn pump(&mut self) -> Result<()> {
        self.window.update();
        self.sample_pointer();
        Ok(())
    }

    fn take_primary_press(&mut self) -> Option<PointerState> {
        self.sample_pointer();
        self.latch.take()
    }

    fn geometry(&self) -> WindowGeometry {
        WindowGeometry::at_origin(self.width, self.height)
    }
}
