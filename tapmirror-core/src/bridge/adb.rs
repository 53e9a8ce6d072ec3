//! `adb`-backed [`DeviceBridge`].
//!
//! | Operation       | Command                                 |
//! |-----------------|-----------------------------------------|
//! | `capture`       | `adb [-s SERIAL] exec-out screencap -p` |
//! | `tap`           | `adb [-s SERIAL] shell input tap X Y`   |
//! | `screen_size`   | `adb [-s SERIAL] shell wm size`         |

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;
use tracing::trace;

use crate::bridge::DeviceBridge;
use crate::error::{MirrorError, Result};
use crate::types::{ScreenSize, TapPoint};

// ── AdbBridge ────────────────────────────────────────────────────

/// Runs `adb` subprocesses, one per operation.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: String,
    serial: Option<String>,
    timeout: Option<Duration>,
}

impl AdbBridge {
    /// Bridge using the given `adb` executable (name or path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            serial: None,
            timeout: None,
        }
    }

    /// Target a specific device (`adb -s SERIAL`).
    pub fn with_serial(mut self, serial: Option<String>) -> Self {
        self.serial = serial.filter(|s| !s.is_empty());
        self
    }

    /// Kill any command that runs longer than `timeout_ms`. `0` waits forever.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));
        self
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.as_str()];
        if let Some(serial) = &self.serial {
            parts.push("-s");
            parts.push(serial);
        }
        parts.extend_from_slice(args);
        parts.join(" ")
    }

    /// Run one command to completion and return its stdout.
    async fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        let command = self.describe(args);
        trace!("running `{command}`");

        let mut cmd = Command::new(&self.program);
        if let Some(serial) = &self.serial {
            cmd.arg("-s").arg(serial);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| MirrorError::bridge(&command, e.to_string()))?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| MirrorError::Timeout(limit))?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| MirrorError::bridge(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                msg => format!("{}: {msg}", output.status),
            };
            return Err(MirrorError::bridge(command, reason));
        }

        Ok(output.stdout)
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new("adb")
    }
}

#[async_trait]
impl DeviceBridge for AdbBridge {
    async fn capture(&self) -> Result<Bytes> {
        let stdout = self.run(&["exec-out", "screencap", "-p"]).await?;
        Ok(Bytes::from(stdout))
    }

    async fn tap(&self, point: TapPoint) -> Result<()> {
        let x = point.x.to_string();
        let y = point.y.to_string();
        self.run(&["shell", "input", "tap", &x, &y]).await?;
        Ok(())
    }

    async fn screen_size(&self) -> Result<ScreenSize> {
        let stdout = self.run(&["shell", "wm", "size"]).await?;
        parse_wm_size(&String::from_utf8_lossy(&stdout))
    }
}

// ── `wm size` parsing ────────────────────────────────────────────

fn parse_dimensions(value: &str) -> Result<ScreenSize> {
    let malformed = || MirrorError::Protocol(format!("malformed screen size `{value}`"));

    let (w, h) = value.trim().split_once('x').ok_or_else(malformed)?;
    let width = w.trim().parse::<u16>().map_err(|_| malformed())?;
    let height = h.trim().parse::<u16>().map_err(|_| malformed())?;

    let size = ScreenSize::new(width, height);
    if !size.is_known() {
        return Err(MirrorError::InvalidScreenSize(size.to_string()));
    }
    Ok(size)
}

/// Parse the output of `wm size`.
///
/// ```text
/// Physical size: 1080x2400
/// Override size: 720x1600
/// ```
///
/// The override line wins when present since `input tap` works in the
/// overridden coordinate space.
pub fn parse_wm_size(output: &str) -> Result<ScreenSize> {
    let mut physical = None;
    let mut overridden = None;

    for line in output.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("Physical size:") {
            physical = Some(parse_dimensions(rest)?);
        } else if let Some(rest) = line.strip_prefix("Override size:") {
            overridden = Some(parse_dimensions(rest)?);
        }
    }

    overridden.or(physical).ok_or_else(|| {
        MirrorError::Protocol(format!("no screen size in `{}`", output.trim()))
    })
}

// ── Tests ────────────────────────────────────────────────────────
