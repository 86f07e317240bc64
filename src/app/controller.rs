//! Power controller: the hexagonal core.
//!
//! [`PowerController`] owns the GPIO lines, the reporter, the delay source
//! and the event sink, plus the only piece of mutable domain state: whether
//! power is currently commanded on.  All I/O flows through injected port
//! implementations, making the whole state machine testable with mocks.
//!
//! ```text
//!   GpioPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                │      PowerController        │
//!    DelayNs ◀── │ edge · toggle · countdown   │ ──▶ ResourceReporter
//!                │ recover · exit hook         │
//!                └────────────────────────────┘
//! ```
//!
//! ## States
//!
//! ```text
//!            rising edge / recovery / exit
//!   Idle ───────────────────────────────▶ Pulsing
//!    ▲                                      │
//!    │  status LOW, or HIGH without timer   │ status HIGH + timer
//!    └──────────────────────────────────────┤
//!    │                                      ▼
//!    └──── auto-off pulse ◀──────── CountingDown
//!
//!   any ── exit hook ──▶ Exiting (terminal)
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::config::{ControllerConfig, Timing};
use crate::drivers::button::{Edge, EdgeTracker};
use crate::drivers::relay::RelayDriver;
use crate::error::{GpioError, ReporterError};

use super::events::ControllerEvent;
use super::ports::{EventSink, GpioPort, ResourceReporter};
use super::resource::{ResourceDefinition, ResourcePath};

// ───────────────────────────────────────────────────────────────
// State identity
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Waiting for a button edge.
    Idle,
    /// Trigger pulse in flight; the status line is read at the end.
    Pulsing,
    /// Power is on and the auto-off timer is running.
    CountingDown,
    /// The exit hook has run.  Terminal.
    Exiting,
}

// ───────────────────────────────────────────────────────────────
// PowerController
// ───────────────────────────────────────────────────────────────

pub struct PowerController<G, R, D, S> {
    gpio: G,
    reporter: R,
    delay: D,
    sink: S,
    relay: RelayDriver,
    edges: EdgeTracker,
    timing: Timing,
    timer_secs: Option<u32>,
    /// Whether power is commanded on.  Rebuilt from scratch on every start.
    relay_on: bool,
    state: ControllerState,
}

impl<G, R, D, S> PowerController<G, R, D, S>
where
    G: GpioPort,
    R: ResourceReporter,
    D: DelayNs,
    S: EventSink,
{
    /// Construct the controller.  Does **not** touch hardware; call
    /// [`start`](Self::start) next.
    pub fn new(
        gpio: G,
        reporter: R,
        delay: D,
        sink: S,
        config: &ControllerConfig,
        timing: Timing,
    ) -> Self {
        Self {
            gpio,
            reporter,
            delay,
            sink,
            relay: RelayDriver::new(timing.pulse_width_ms),
            edges: EdgeTracker::new(),
            timing,
            timer_secs: config.timer_secs(),
            relay_on: false,
            state: ControllerState::Idle,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park the trigger line, start the reporter session, wait out the
    /// daemon warm-up and register the power-state resource.
    pub fn start(&mut self, endpoint_name: &str) -> Result<(), GpioError> {
        self.relay.release(&mut self.gpio)?;

        let started = self.reporter.start_session(endpoint_name);
        best_effort("start session", started);

        // Registration must not overlap the daemon start-up.
        self.delay.delay_ms(self.timing.daemon_warmup_ms);

        let definition = ResourceDefinition::power_state();
        let defined = self.reporter.define_resource(&definition);
        best_effort("define resource", defined);

        let state_path = ResourcePath::power_state();
        for path in [state_path.parent_instance(), state_path] {
            let created = self.reporter.create_instance(&path);
            best_effort("create instance", created);
        }

        self.sink.emit(&ControllerEvent::Ready {
            timer_secs: self.timer_secs,
        });
        info!("Controller ready (timer={:?})", self.timer_secs);
        Ok(())
    }

    /// Full process lifetime: start, optionally subscribe, poll until
    /// `shutdown` is raised, then run the exit hook.
    ///
    /// The exit hook runs on every path, including a failed start-up or a
    /// GPIO error in the poll loop.  The first error wins.
    pub fn serve(
        &mut self,
        endpoint_name: &str,
        subscribe: bool,
        shutdown: &AtomicBool,
    ) -> Result<(), GpioError> {
        let outcome = self.start(endpoint_name).and_then(|()| {
            if subscribe {
                let subscribed = self.reporter.subscribe(&ResourcePath::power_state());
                best_effort("subscribe", subscribed);
            }
            self.run(shutdown)
        });
        if let Err(e) = &outcome {
            error!("Leaving poll loop on GPIO failure: {}", e);
        }

        let exited = self.shutdown();
        match &exited {
            Ok(true) => info!("Exit hook: power switched off"),
            Ok(false) => info!("Exit hook: power already off"),
            Err(e) => error!("Exit hook failed: {}", e),
        }
        outcome.and(exited.map(|_| ()))
    }

    /// Poll until `shutdown` is raised.  The flag is only checked between
    /// iterations; pulses and countdowns always run to completion.
    pub fn run(&mut self, shutdown: &AtomicBool) -> Result<(), GpioError> {
        while !shutdown.load(Ordering::SeqCst) {
            self.poll_once()?;
        }
        info!("Shutdown requested, leaving poll loop");
        Ok(())
    }

    /// One poll iteration: wait, reconcile, sample, act on a rising edge.
    pub fn poll_once(&mut self) -> Result<(), GpioError> {
        self.delay.delay_ms(self.timing.poll_interval_ms);

        self.recover()?;

        let sample = self.gpio.read_button()?;
        if self.edges.update(sample) == Some(Edge::Rising) {
            debug!("Button: rising edge");
            self.toggle()?;
        }
        Ok(())
    }

    // ── Transitions ───────────────────────────────────────────

    /// Flip the relay and mirror the resulting status remotely.
    ///
    /// With a timer configured and power now on, blocks for the whole
    /// countdown and the auto-off pulse before returning.
    pub fn toggle(&mut self) -> Result<(), GpioError> {
        self.set_state(ControllerState::Pulsing);
        let status = self.relay.pulse(&mut self.gpio, &mut self.delay)?;
        let on = status.is_high();

        self.relay_on = on;
        self.report_power(on);
        self.sink.emit(&ControllerEvent::PowerToggled { on });

        match self.timer_secs {
            Some(secs) if on => self.countdown(secs),
            _ => {
                self.set_state(ControllerState::Idle);
                Ok(())
            }
        }
    }

    /// Re-assert power if it is commanded on but the status line reads LOW.
    ///
    /// Returns whether a recovery pulse was issued.  Never reports remotely
    /// and never clears the commanded state.
    pub fn recover(&mut self) -> Result<bool, GpioError> {
        if !self.relay_on {
            return Ok(false);
        }
        if self.gpio.read_status()?.is_high() {
            return Ok(false);
        }

        warn!("Relay dropped while commanded on, re-pulsing");
        self.set_state(ControllerState::Pulsing);
        let status = self.relay.pulse(&mut self.gpio, &mut self.delay)?;
        if status.is_low() {
            warn!("Relay still reads LOW after recovery pulse");
        }
        self.sink.emit(&ControllerEvent::Recovered { status });
        self.set_state(ControllerState::Idle);
        Ok(true)
    }

    /// Exit hook: pulse power off if the status line reads HIGH.
    ///
    /// Returns whether a pulse was issued.  Runs at most once; later calls
    /// are no-ops.
    pub fn shutdown(&mut self) -> Result<bool, GpioError> {
        if self.state == ControllerState::Exiting {
            return Ok(false);
        }
        self.set_state(ControllerState::Exiting);

        let pulsed = if self.gpio.read_status()?.is_high() {
            let status = self.relay.pulse(&mut self.gpio, &mut self.delay)?;
            info!("Exit: power switched off (status={:?})", status);
            self.sink.emit(&ControllerEvent::ExitPowerOff);
            true
        } else {
            false
        };
        self.relay_on = false;
        Ok(pulsed)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Whether power is currently commanded on.
    pub fn relay_on(&self) -> bool {
        self.relay_on
    }

    pub fn timer_secs(&self) -> Option<u32> {
        self.timer_secs
    }

    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ── Internal ──────────────────────────────────────────────

    fn countdown(&mut self, secs: u32) -> Result<(), GpioError> {
        self.set_state(ControllerState::CountingDown);
        for remaining_secs in (1..=secs).rev() {
            self.delay.delay_ms(self.timing.countdown_tick_ms);
            self.sink
                .emit(&ControllerEvent::CountdownTick { remaining_secs });
        }

        // Auto-off is unconditional: the status read-back is only logged.
        self.set_state(ControllerState::Pulsing);
        let status = self.relay.pulse(&mut self.gpio, &mut self.delay)?;
        debug!("Auto-off pulse, status={:?}", status);

        self.relay_on = false;
        self.report_power(false);
        self.sink.emit(&ControllerEvent::AutoOff);
        self.set_state(ControllerState::Idle);
        Ok(())
    }

    fn report_power(&mut self, on: bool) {
        let path = ResourcePath::power_state();
        let reported = self.reporter.set_boolean_resource(&path, on);
        best_effort("set power state", reported);
    }

    fn set_state(&mut self, next: ControllerState) {
        if next != self.state {
            let from = self.state;
            self.state = next;
            self.sink
                .emit(&ControllerEvent::StateChanged { from, to: next });
        }
    }
}

/// Log and swallow a reporter failure.
fn best_effort(what: &str, result: Result<(), ReporterError>) {
    if let Err(e) = result {
        warn!("Reporter: {} failed: {}", what, e);
    }
}
