//! Integration tests: the full loop driven through the public API with
//! a scripted bridge and an in-memory surface.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};

use tapmirror_core::{
    Controller, DeviceBridge, DisplaySurface, Frame, FrameSource, IterationOutcome, MirrorError,
    PointerState, PressLatch, Result, ScreenSize, TapPoint, WindowGeometry, frames_equal,
};

// ── Helpers ──────────────────────────────────────────────────────

/// Encode a checkerboard-ish test screen; `accent` tints one corner.
fn screen_png(accent: u8) -> Bytes {
    let mut img = RgbaImage::from_fn(108, 216, |x, y| {
        let v = if (x / 12 + y / 12) % 2 == 0 { 230 } else { 25 };
        Rgba([v, v, v, 255])
    });
    for y in 0..20 {
        for x in 0..20 {
            img.put_pixel(x, y, Rgba([accent, 0, 0, 255]));
        }
    }
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    Bytes::from(out.into_inner())
}

/// Bridge that replays captures and records taps.
struct ScriptedBridge {
    captures: Mutex<VecDeque<Bytes>>,
    taps: Mutex<Vec<TapPoint>>,
    tap_results: Mutex<VecDeque<bool>>,
}

impl ScriptedBridge {
    fn new(captures: Vec<Bytes>, tap_results: Vec<bool>) -> Self {
        Self {
            captures: Mutex::new(captures.into()),
            taps: Mutex::new(Vec::new()),
            tap_results: Mutex::new(tap_results.into()),
        }
    }
}

#[async_trait]
impl DeviceBridge for ScriptedBridge {
    async fn capture(&self) -> Result<Bytes> {
        self.captures
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| MirrorError::bridge("screencap", "script exhausted"))
    }

    async fn tap(&self, point: TapPoint) -> Result<()> {
        self.taps.lock().unwrap().push(point);
        match self.tap_results.lock().unwrap().pop_front() {
            Some(false) => Err(MirrorError::bridge("input tap", "exit status: 255")),
            _ => Ok(()),
        }
    }

    async fn screen_size(&self) -> Result<ScreenSize> {
        Ok(ScreenSize::new(1080, 2160))
    }
}

/// Surface that stays open for a fixed number of iterations and replays
/// pointer samples.
struct MemorySurface {
    remaining: std::cell::Cell<u32>,
    pointers: VecDeque<PointerState>,
    latch: PressLatch,
    shown: Vec<Frame>,
    geometry: WindowGeometry,
}

impl MemorySurface {
    fn new(iterations: u32, pointers: Vec<PointerState>) -> Self {
        Self {
            remaining: iterations.into(),
            pointers: pointers.into(),
            latch: PressLatch::new(),
            shown: Vec::new(),
            geometry: WindowGeometry::at_origin(54, 108),
        }
    }
}

impl DisplaySurface for MemorySurface {
    fn is_open(&self) -> bool {
        let n = self.remaining.get();
        self.remaining.set(n.saturating_sub(1));
        n > 0
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.shown.push(frame.clone());
        Ok(())
    }

    fn pump(&mut self) -> Result<()> {
        Ok(())
    }

    fn take_primary_press(&mut self) -> Option<PointerState> {
        let sample = self.pointers.pop_front().unwrap_or_default();
        self.latch.observe(sample);
        self.latch.take()
    }

    fn geometry(&self) -> WindowGeometry {
        self.geometry
    }
}

// ── Scenarios ────────────────────────────────────────────────────

#[tokio::test]
async fn static_then_changed_screen() {
    let bridge = Arc::new(ScriptedBridge::new(
        vec![screen_png(200), screen_png(200), screen_png(90)],
        vec![],
    ));
    let surface = MemorySurface::new(3, vec![]);
    let mut ctl = Controller::new(Arc::clone(&bridge), surface, ScreenSize::new(1080, 2160))
        .unwrap()
        .with_idle_sleep(Duration::from_millis(1));

    let mut outcomes = Vec::new();
    loop {
        let it = ctl.step().await.unwrap();
        if it.outcome == IterationOutcome::Closed {
            break;
        }
        outcomes.push(it.outcome);
    }

    assert_eq!(
        outcomes,
        vec![
            IterationOutcome::Rendered,
            IterationOutcome::Slept,
            IterationOutcome::Rendered,
        ]
    );
    let shown = &ctl.surface().shown;
    assert_eq!(shown.len(), 2);
    assert!(!frames_equal(&shown[0], &shown[1]));
    assert_eq!((shown[0].width(), shown[0].height()), (54, 108));
}

#[tokio::test]
async fn failed_tap_is_not_retried() {
    let bridge = Arc::new(ScriptedBridge::new(
        vec![screen_png(1), screen_png(1), screen_png(1), screen_png(1)],
        vec![false, true],
    ));
    let surface = MemorySurface::new(
        4,
        vec![
            PointerState::pressed_at(27.0, 54.0),
            PointerState::released(),
            PointerState::released(),
            PointerState::pressed_at(53.0, 107.0),
        ],
    );
    let mut ctl = Controller::new(Arc::clone(&bridge), surface, ScreenSize::new(1080, 2160))
        .unwrap()
        .with_idle_sleep(Duration::ZERO);

    ctl.run().await.unwrap();

    let taps = bridge.taps.lock().unwrap().clone();
    assert_eq!(
        taps,
        vec![TapPoint { x: 540, y: 1080 }, TapPoint { x: 1060, y: 2140 }]
    );
    assert_eq!(ctl.stats().tap_failures, 1);
    assert_eq!(ctl.stats().iterations, 4);
}

#[tokio::test]
async fn frame_source_rejects_non_png() {
    let bridge = Arc::new(ScriptedBridge::new(
        vec![Bytes::from_static(b"\x89PNX not quite")],
        vec![],
    ));
    let source = FrameSource::new(bridge, 10, 10);
    let err = source.capture().await.unwrap_err();
    assert!(matches!(err, MirrorError::Protocol(_)));
}

#[tokio::test]
async fn exhausted_bridge_ends_the_loop() {
    let bridge = Arc::new(ScriptedBridge::new(vec![screen_png(5)], vec![]));
    let surface = MemorySurface::new(u32::MAX, vec![]);
    let mut ctl = Controller::new(bridge, surface, ScreenSize::new(1080, 2160))
        .unwrap()
        .with_idle_sleep(Duration::ZERO);

    let err = ctl.run().await.unwrap_err();
    assert!(matches!(err, MirrorError::BridgeInvocation { .. }));
    assert_eq!(ctl.surface().shown.len(), 1);
}
