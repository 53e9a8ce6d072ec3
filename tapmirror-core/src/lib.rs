//! # tapmirror-core
//!
//! Capture–diff–render loop for mirroring an Android device screen and
//! forwarding clicks back as taps.
//!
//! This crate contains:
//! - **Bridge**: `DeviceBridge` capability trait and the `adb` implementation
//! - **Frame source**: capture → signature check → PNG decode → Lanczos resize
//! - **Delta**: exact whole-frame change detection
//! - **Mapper**: window-local click → device tap coordinates
//! - **Input**: edge-triggered primary-button detection
//! - **Controller**: the render-loop state machine over a `DisplaySurface`
//! - **Error**: `MirrorError`, a `thiserror`-based error hierarchy

pub mod bridge;
pub mod controller;
pub mod delta;
pub mod error;
pub mod frame_source;
pub mod input;
pub mod mapper;
pub mod types;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use bridge::{AdbBridge, DeviceBridge, parse_wm_size};
pub use controller::{
    Controller, DEFAULT_IDLE_SLEEP, DisplaySurface, Iteration, IterationOutcome, LoopState,
    LoopStats,
};
pub use delta::{frames_equal, has_changed};
pub use error::{MirrorError, Result};
pub use frame_source::{FrameSource, PNG_SIGNATURE, decode_frame};
pub use input::{EdgeTrigger, PointerState, PressLatch};
pub use mapper::{CoordinateMapper, map_click};
pub use types::{ClickEvent, Frame, ScreenSize, TapPoint, WindowGeometry, pack_argb};
