//! Controller configuration parameters.
//!
//! [`ControllerConfig`] carries the per-device identity supplied on the
//! command line; [`Timing`], [`GpioConfig`] and [`DaemonConfig`] carry
//! board and daemon constants whose defaults match the deployed hardware.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SettingsError};
use crate::pins;

// ---------------------------------------------------------------------------
// Per-device identity
// ---------------------------------------------------------------------------

/// Identity, secret and optional auto-off timer.  Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    identity: String,
    secret: String,
    timer_secs: Option<u32>,
}

impl ControllerConfig {
    /// Validate and build.  A zero timer means "no timer".
    pub fn new(
        identity: impl Into<String>,
        secret: impl Into<String>,
        timer_secs: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let identity = identity.into();
        let secret = secret.into();
        if identity.is_empty() {
            return Err(ConfigError::MissingIdentity);
        }
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self {
            identity,
            secret,
            timer_secs: timer_secs.filter(|&t| t > 0),
        })
    }

    /// PSK identity handed to the client daemon.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// PSK key handed to the client daemon.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Auto-off duration in seconds, if the timer mode is enabled.
    pub fn timer_secs(&self) -> Option<u32> {
        self.timer_secs
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Every blocking wait the controller performs, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Sleep between button samples.
    pub poll_interval_ms: u32,
    /// How long the trigger line is held HIGH to flip the relay.
    pub pulse_width_ms: u32,
    /// Granularity of the auto-off countdown.
    pub countdown_tick_ms: u32,
    /// Wait after launching the client daemon before registering resources.
    pub daemon_warmup_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            pulse_width_ms: 100,
            countdown_tick_ms: 1_000,
            daemon_warmup_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// GPIO lines
// ---------------------------------------------------------------------------

/// Character device and line offsets of the button, trigger and status lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    pub chip: String,
    pub button_line: u32,
    pub trigger_line: u32,
    pub status_line: u32,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            chip: pins::GPIO_CHIP.into(),
            button_line: pins::BUTTON_LINE,
            trigger_line: pins::POWER_TRIGGER_LINE,
            status_line: pins::POWER_STATUS_LINE,
        }
    }
}

// ---------------------------------------------------------------------------
// Client daemon
// ---------------------------------------------------------------------------

/// Where and how to reach the LwM2M client daemon and its command tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// CoAP port the daemon listens on.
    pub port: u16,
    /// Local IPC port the `awa-client-*` tools talk to.
    pub ipc_port: u16,
    /// Bootstrap server URI.
    pub bootstrap_uri: String,
    /// Endpoint name the device registers under.
    pub endpoint_name: String,

    // --- Binaries ---
    pub daemon_bin: String,
    pub define_bin: String,
    pub set_bin: String,
    pub subscribe_bin: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            port: 6003,
            ipc_port: 6004,
            bootstrap_uri: "coaps://deviceserver.creatordev.io:15684".into(),
            endpoint_name: "7688board".into(),

            daemon_bin: "awa_clientd".into(),
            define_bin: "awa-client-define".into(),
            set_bin: "awa-client-set".into(),
            subscribe_bin: "awa-client-subscribe".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Optional JSON overrides for [`Timing`], [`GpioConfig`] and [`DaemonConfig`].
///
/// Every field may be omitted; missing ones keep their defaults.
///
/// ```json
/// { "timing": { "poll_interval_ms": 250 }, "gpio": { "chip": "/dev/gpiochip1" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timing: Timing,
    pub gpio: GpioConfig,
    pub daemon: DaemonConfig,
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read `path`, or return the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;
        Self::from_json(&raw).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            cause: e.to_string(),
        })
    }
}
