//! Command-line interface.
//!
//! ```text
//! relay-button <identity> <secret> [timer_seconds] [--port N] [--ipc-port N]
//!              [--bootstrap URI] [--endpoint-name NAME] [--subscribe]
//!              [--settings FILE]
//! ```
//!
//! Missing identity/secret is a usage error raised before any hardware or
//! network initialisation.  The timer is parsed leniently: anything that is
//! not a positive integer disables timer mode instead of aborting.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ControllerConfig, DaemonConfig};
use crate::error::ConfigError;

#[derive(Debug, Parser)]
#[command(
    name = "relay-button",
    version,
    about = "Toggle the conveyor relay from a push-button and mirror its state over LwM2M"
)]
pub struct Cli {
    /// PSK identity used by the client daemon
    pub identity: String,

    /// PSK key used by the client daemon
    pub secret: String,

    /// Keep power on for this many seconds after each press, then switch off
    #[arg(allow_hyphen_values = true)]
    pub timer: Option<String>,

    /// CoAP port for the client daemon
    #[arg(long)]
    pub port: Option<u16>,

    /// Local IPC port shared by the daemon and its tools
    #[arg(long)]
    pub ipc_port: Option<u16>,

    /// Bootstrap server URI
    #[arg(long)]
    pub bootstrap: Option<String>,

    /// Endpoint name to register under
    #[arg(long)]
    pub endpoint_name: Option<String>,

    /// Also subscribe to server-side changes of the power resource
    #[arg(long)]
    pub subscribe: bool,

    /// JSON file overriding timing and daemon defaults
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

impl Cli {
    /// Timer seconds, or `None` when absent, zero or unparsable.
    pub fn timer_secs(&self) -> Option<u32> {
        parse_timer(self.timer.as_deref())
    }

    /// Whether a timer argument was given but could not be used.
    pub fn timer_rejected(&self) -> bool {
        self.timer.is_some() && self.timer_secs().is_none()
    }

    pub fn controller_config(&self) -> Result<ControllerConfig, ConfigError> {
        ControllerConfig::new(self.identity.as_str(), self.secret.as_str(), self.timer_secs())
    }

    /// `base` overlaid with whatever flags were supplied.
    pub fn overlay_daemon(&self, mut cfg: DaemonConfig) -> DaemonConfig {
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(ipc_port) = self.ipc_port {
            cfg.ipc_port = ipc_port;
        }
        if let Some(uri) = &self.bootstrap {
            cfg.bootstrap_uri.clone_from(uri);
        }
        if let Some(name) = &self.endpoint_name {
            cfg.endpoint_name.clone_from(name);
        }
        cfg
    }
}

/// Lenient positive-integer parse.
pub fn parse_timer(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&secs| secs > 0)
}
