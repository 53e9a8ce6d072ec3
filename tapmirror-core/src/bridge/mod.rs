//! Device bridge: the command channel to the mirrored device.
//!
//! The controller only talks to the device through [`DeviceBridge`], so
//! tests can drive the loop with scripted captures and tap results
//! instead of a real `adb` process.

pub mod adb;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::types::{ScreenSize, TapPoint};

pub use adb::{AdbBridge, parse_wm_size};

/// Capture / tap / size operations against a remote device.
///
/// All calls block the caller until the underlying command finishes.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Grab a still image of the device screen, still encoded.
    async fn capture(&self) -> Result<Bytes>;

    /// Inject a single touch tap at device coordinates.
    async fn tap(&self, point: TapPoint) -> Result<()>;

    /// Query the device's native screen resolution.
    async fn screen_size(&self) -> Result<ScreenSize>;
}
