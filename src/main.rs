//! relay-button: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  CdevBank            AwaClient          HostDelay  LogSink   │
//! │  (GpioPort)          (ResourceReporter) (DelayNs)  (Events)  │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ──────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │          PowerController (pure logic)                  │  │
//! │  │  edge detect · toggle · countdown · recover · exit     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use relay_button::adapters::awa::AwaClient;
use relay_button::adapters::gpio::CdevBank;
use relay_button::adapters::log_sink::LogEventSink;
use relay_button::adapters::time::HostDelay;
use relay_button::app::controller::PowerController;
use relay_button::cli::Cli;
use relay_button::config::Settings;

fn main() -> Result<()> {
    // ── 1. Arguments (fatal before any hardware is touched) ───
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = cli.controller_config().context("invalid arguments")?;
    if cli.timer_rejected() {
        warn!(
            "Ignoring timer argument {:?}: not a positive integer, timer disabled",
            cli.timer.as_deref().unwrap_or_default()
        );
    }
    let settings = Settings::load(cli.settings.as_deref())?;
    let daemon = cli.overlay_daemon(settings.daemon);

    info!("relay-button v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Exit hook (SIGINT / SIGTERM) ───────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("failed to install signal handler")?;
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let gpio = CdevBank::open(&settings.gpio).context("GPIO init failed")?;
    let endpoint_name = daemon.endpoint_name.clone();
    let reporter = AwaClient::new(daemon, &config);

    let mut controller = PowerController::new(
        gpio,
        reporter,
        HostDelay::new(),
        LogEventSink::new(),
        &config,
        settings.timing,
    );

    // ── 4. Run; the controller always attempts the final power-off ──
    controller
        .serve(&endpoint_name, cli.subscribe, &shutdown)
        .context("controller stopped on GPIO failure")?;
    Ok(())
}
