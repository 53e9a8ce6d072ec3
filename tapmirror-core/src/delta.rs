//! Whole-frame change detection.
//!
//! Two frames are equal only if they have the same dimensions and every
//! pixel matches exactly. There is no tolerance: the frame source
//! resizes deterministically, so a static device screen produces
//! identical frames.

use crate::types::Frame;

/// Exact equality of two frames, compared in raster order.
pub fn frames_equal(a: &Frame, b: &Frame) -> bool {
    if a.width() != b.width() || a.height() != b.height() {
        return false;
    }

    let width = a.width() as usize;
    if width == 0 {
        return true;
    }

    // Row by row so a difference near the top bails out early.
    a.pixels()
        .chunks_exact(width)
        .zip(b.pixels().chunks_exact(width))
        .all(|(row_a, row_b)| row_a == row_b)
}

/// True when `current` should be rendered: there is no previous frame,
/// or it differs from `current`.
pub fn has_changed(previous: Option<&Frame>, current: &Frame) -> bool {
    match previous {
        Some(prev) => !frames_equal(prev, current),
        None => true,
    }
}

// ── Tests ────────────────────────────────────────────────────────
