//! # tapmirror-gui: device mirror window
//!
//! Shows the screen of an `adb`-connected device in a native window
//! (via `minifb`) and turns left clicks into `input tap` commands.
//! The capture/diff/render loop itself lives in `tapmirror-core`;
//! this crate supplies configuration and the window surface.

pub mod config;
pub mod window;
