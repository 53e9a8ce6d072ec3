//! Render loop controller.
//!
//! One iteration walks the state machine below, strictly in order:
//!
//! ```text
//!            ┌────────────── surface closed ──────────────┐
//!            │                                            ▼
//! Idle ─► Capturing ─► Comparing ─┬─► Rendering ─┐      Closed
//!  ▲                              └─► Sleeping  ─┤
//!  └──────────────── PollingInput ◄──────────────┘
//! ```
//!
//! Capture errors end the loop (they are returned from [`Controller::run`]).
//! Tap errors are logged and the loop carries on. The surface keeps
//! processing events while a capture is in flight so presses made during
//! a slow `screencap` are latched rather than lost.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::bridge::DeviceBridge;
use crate::delta::has_changed;
use crate::error::{MirrorError, Result};
use crate::frame_source::FrameSource;
use crate::input::PointerState;
use crate::mapper::CoordinateMapper;
use crate::types::{Frame, ScreenSize, TapPoint, WindowGeometry};

/// Default pause after an unchanged frame.
pub const DEFAULT_IDLE_SLEEP: Duration = Duration::from_millis(10);

/// How often window events are processed while a capture is pending.
pub const PUMP_INTERVAL: Duration = Duration::from_millis(16);

// ── DisplaySurface ───────────────────────────────────────────────

/// The window the mirror is drawn into.
pub trait DisplaySurface {
    /// `false` once the user closed the window.
    fn is_open(&self) -> bool;

    /// Show a new frame. Also processes pending window events.
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// Process pending window events without changing the image.
    fn pump(&mut self) -> Result<()>;

    /// The first primary-button press seen since the last call, if any.
    ///
    /// Implementations latch presses while processing events, so a click
    /// released before this is called is still reported once.
    fn take_primary_press(&mut self) -> Option<PointerState>;

    /// Fixed drawable size and origin.
    fn geometry(&self) -> WindowGeometry;
}

// ── State / outcome ──────────────────────────────────────────────

/// Where the controller is within an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Capturing,
    Comparing,
    Rendering,
    Sleeping,
    PollingInput,
    Closed,
}

/// Which branch an iteration took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The frame changed and was presented.
    Rendered,
    /// The frame was identical to the previous one.
    Slept,
    /// The surface was closed; nothing else happened.
    Closed,
}

/// Result of a single [`Controller::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    pub outcome: IterationOutcome,
    /// Tap issued during input polling, whether or not it succeeded.
    pub tap: Option<TapPoint>,
}

/// Counters accumulated over the life of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub iterations: u64,
    pub renders: u64,
    pub sleeps: u64,
    pub taps: u64,
    pub tap_failures: u64,
}

// ── Controller ───────────────────────────────────────────────────

/// Owns the window, the retained previous frame and the input state,
/// and drives capture → diff → render → input each iteration.
pub struct Controller<B: ?Sized, S> {
    bridge: Arc<B>,
    source: FrameSource<B>,
    surface: S,
    mapper: CoordinateMapper,
    previous: Option<Frame>,
    idle_sleep: Duration,
    state: LoopState,
    stats: LoopStats,
}

impl<B, S> Controller<B, S>
where
    B: DeviceBridge + ?Sized,
    S: DisplaySurface,
{
    /// Wire a controller to a bridge and surface.
    ///
    /// `screen` must have both dimensions non-zero.
    pub fn new(bridge: Arc<B>, surface: S, screen: ScreenSize) -> Result<Self> {
        if !screen.is_known() {
            return Err(MirrorError::InvalidScreenSize(format!(
                "device screen is {screen}; both dimensions must be non-zero"
            )));
        }

        let geometry = surface.geometry();
        let source = FrameSource::new(
            Arc::clone(&bridge),
            geometry.render_width,
            geometry.render_height,
        );

        Ok(Self {
            bridge,
            source,
            surface,
            mapper: CoordinateMapper::new(geometry, screen),
            previous: None,
            idle_sleep: DEFAULT_IDLE_SLEEP,
            state: LoopState::Idle,
            stats: LoopStats::default(),
        })
    }

    /// Override the pause taken after an unchanged frame.
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The frame currently on screen, if any.
    pub fn previous_frame(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    /// Run iterations until the surface closes or a capture fails.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "mirroring {} device into {}x{} window",
            self.mapper.screen(),
            self.source.dimensions().0,
            self.source.dimensions().1,
        );

        loop {
            let iteration = self.step().await?;
            if iteration.outcome == IterationOutcome::Closed {
                let stats = self.stats;
                info!(
                    "window closed after {} iterations ({} renders, {} taps, {} failed)",
                    stats.iterations, stats.renders, stats.taps, stats.tap_failures,
                );
                return Ok(());
            }
        }
    }

    /// Execute exactly one iteration.
    pub async fn step(&mut self) -> Result<Iteration> {
        if !self.surface.is_open() {
            self.transition(LoopState::Closed);
            return Ok(Iteration {
                outcome: IterationOutcome::Closed,
                tap: None,
            });
        }

        self.stats.iterations += 1;

        self.transition(LoopState::Capturing);
        let frame = self.capture_pumping().await?;

        self.transition(LoopState::Comparing);
        let outcome = if has_changed(self.previous.as_ref(), &frame) {
            self.transition(LoopState::Rendering);
            self.surface.present(&frame)?;
            debug!("rendered frame {}x{}", frame.width(), frame.height());
            self.previous = Some(frame);
            self.stats.renders += 1;
            IterationOutcome::Rendered
        } else {
            self.transition(LoopState::Sleeping);
            self.surface.pump()?;
            tokio::time::sleep(self.idle_sleep).await;
            self.stats.sleeps += 1;
            IterationOutcome::Slept
        };

        self.transition(LoopState::PollingInput);
        let tap = self.poll_input().await;

        self.transition(LoopState::Idle);
        Ok(Iteration { outcome, tap })
    }

    /// Capture the next frame, pumping the surface every
    /// [`PUMP_INTERVAL`] until it arrives.
    async fn capture_pumping(&mut self) -> Result<Frame> {
        let capture = self.source.capture();
        tokio::pin!(capture);

        let mut ticker = tokio::time::interval(PUMP_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                result = &mut capture => return result,
                _ = ticker.tick() => self.surface.pump()?,
            }
        }
    }

    /// Issue a tap if the primary button went down since last poll.
    async fn poll_input(&mut self) -> Option<TapPoint> {
        let press = self.surface.take_primary_press()?;

        let Some((px, py)) = press.position else {
            debug!("click outside the window ignored");
            return None;
        };

        let click = self.mapper.localize(px, py);
        let point = self.mapper.map(click);
        self.stats.taps += 1;

        match self.bridge.tap(point).await {
            Ok(()) => debug!("tap ({}, {}) → {point}", click.x, click.y),
            Err(e) => {
                self.stats.tap_failures += 1;
                warn!("tap at {point} failed: {e}");
            }
        }

        Some(point)
    }

    fn transition(&mut self, next: LoopState) {
        trace!("{:?} → {:?}", self.state, next);
        self.state = next;
    }
}

// ── Tests ────────────────────────────────────────────────────────
