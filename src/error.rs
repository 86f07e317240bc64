//! Unified error types for the relay controller.
//!
//! Four families, matching how the controller treats them:
//!
//! | Family          | Policy                                          |
//! |-----------------|-------------------------------------------------|
//! | `ConfigError`   | Fatal, raised before any hardware is touched.   |
//! | `SettingsError` | Fatal, raised before any hardware is touched.   |
//! | `GpioError`     | Fatal, propagated out of the poll loop.         |
//! | `ReporterError` | Logged and swallowed; never stops local control.|

use core::fmt;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The PSK identity argument was absent or empty.
    MissingIdentity,
    /// The PSK secret argument was absent or empty.
    MissingSecret,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentity => write!(f, "missing identity"),
            Self::MissingSecret => write!(f, "missing secret"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The `--settings` file could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    Read { path: String, cause: String },
    Parse { path: String, cause: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, cause } => write!(f, "cannot read {path}: {cause}"),
            Self::Parse { path, cause } => write!(f, "invalid settings in {path}: {cause}"),
        }
    }
}

impl std::error::Error for SettingsError {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

/// Which of the three controller lines an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Button,
    PowerTrigger,
    PowerStatus,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "button"),
            Self::PowerTrigger => write!(f, "power trigger"),
            Self::PowerStatus => write!(f, "power status"),
        }
    }
}

/// A broken button or relay line is unrecoverable by software; there is
/// no retry variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// The GPIO character device could not be opened.
    ChipUnavailable { chip: String, cause: String },
    /// Requesting a line from the chip failed.
    Setup { line: Line, cause: String },
    /// Reading an input line failed.
    ReadFailed { line: Line, cause: String },
    /// Driving the output line failed.
    WriteFailed { line: Line, cause: String },
}

impl GpioError {
    /// The line that failed, if the failure was specific to one.
    pub fn line(&self) -> Option<Line> {
        match self {
            Self::ChipUnavailable { .. } => None,
            Self::Setup { line, .. }
            | Self::ReadFailed { line, .. }
            | Self::WriteFailed { line, .. } => Some(*line),
        }
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChipUnavailable { chip, cause } => write!(f, "cannot open {chip}: {cause}"),
            Self::Setup { line, cause } => write!(f, "{line} line request failed: {cause}"),
            Self::ReadFailed { line, cause } => write!(f, "{line} read failed: {cause}"),
            Self::WriteFailed { line, cause } => write!(f, "{line} write failed: {cause}"),
        }
    }
}

impl std::error::Error for GpioError {}

// ---------------------------------------------------------------------------
// Reporter errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterError {
    /// The daemon or tool binary could not be launched.
    Spawn { program: String, cause: String },
    /// The tool ran but exited unsuccessfully (`None` = killed by signal).
    CommandFailed { program: String, code: Option<i32> },
}

impl fmt::Display for ReporterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, cause } => write!(f, "failed to spawn {program}: {cause}"),
            Self::CommandFailed { program, code: Some(code) } => {
                write!(f, "{program} exited with status {code}")
            }
            Self::CommandFailed { program, code: None } => {
                write!(f, "{program} terminated by signal")
            }
        }
    }
}

impl std::error::Error for ReporterError {}
