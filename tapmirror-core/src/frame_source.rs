//! Frame source: pull a screenshot through the bridge and turn it into
//! a [`Frame`] at render resolution.
//!
//! Pipeline per call:
//!
//! 1. `bridge.capture()` → encoded bytes
//! 2. signature check (`\x89PNG`)
//! 3. PNG decode
//! 4. Lanczos3 resize to the render size
//! 5. pack RGBA into `0xAARRGGBB`

use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::trace;

use crate::bridge::DeviceBridge;
use crate::error::{MirrorError, Result};
use crate::types::{Frame, pack_argb};

/// Leading bytes every capture payload must carry.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG";

/// Pulls frames from a [`DeviceBridge`]. Holds no frame state.
pub struct FrameSource<B: ?Sized> {
    bridge: Arc<B>,
    width: u32,
    height: u32,
}

impl<B: DeviceBridge + ?Sized> FrameSource<B> {
    /// Frames will be resized to `width × height`.
    pub fn new(bridge: Arc<B>, width: u32, height: u32) -> Self {
        Self {
            bridge,
            width,
            height,
        }
    }

    /// Target render size.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Capture, validate, decode and resize one frame.
    pub async fn capture(&self) -> Result<Frame> {
        let payload = self.bridge.capture().await?;
        trace!("capture payload: {} bytes", payload.len());
        decode_frame(&payload, self.width, self.height)
    }
}

/// Validate and decode a PNG payload, resized to `width × height`.
pub fn decode_frame(payload: &[u8], width: u32, height: u32) -> Result<Frame> {
    if !payload.starts_with(PNG_SIGNATURE) {
        return Err(MirrorError::Protocol("unexpected capture payload".into()));
    }

    let decoded = image::load_from_memory_with_format(payload, ImageFormat::Png)?;
    Ok(resize_to_frame(&decoded, width, height))
}

fn resize_to_frame(image: &DynamicImage, width: u32, height: u32) -> Frame {
    let rgba = image
        .resize_exact(width, height, FilterType::Lanczos3)
        .into_rgba8();

    let pixels = rgba
        .pixels()
        .map(|p| pack_argb(p[0], p[1], p[2], p[3]))
        .collect();

    Frame::from_parts(rgba.width(), rgba.height(), pixels)
}

// ── Tests ────────────────────────────────────────────────────────
