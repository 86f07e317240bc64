//! Start-up registration, the poll loop's shutdown flag and the exit hook.

use std::sync::atomic::AtomicBool;

use relay_button::app::controller::ControllerState;
use relay_button::app::events::ControllerEvent;
use relay_button::app::ports::PinState::{High, Low};
use relay_button::error::Line;

use crate::mock_hw::{MockGpio, ReportCall, make_controller};

#[test]
fn start_registers_resource_after_warmup() {
    let mut c = make_controller(MockGpio::new(), None);
    c.start("7688board").unwrap();

    assert_eq!(
        c.reporter().calls,
        vec![
            ReportCall::StartSession("7688board".into()),
            ReportCall::Define {
                object_id: 3200,
                resource_id: 5500,
            },
            ReportCall::Create("/3200/0".into()),
            ReportCall::Create("/3200/0/5500".into()),
        ]
    );
    assert_eq!(c.delay().waits, vec![10_000]);
    assert_eq!(c.gpio().writes.first(), Some(&Low), "trigger released first");
    assert_eq!(c.gpio().pulses, 0);
    assert_eq!(
        c.sink().events.last(),
        Some(&ControllerEvent::Ready { timer_secs: None })
    );
}

#[test]
fn start_survives_reporter_failure() {
    let mut c = make_controller(MockGpio::new(), Some(30));
    c.reporter_mut().fail = true;

    c.start("7688board").unwrap();

    assert_eq!(c.reporter().calls.len(), 4);
    assert!(
        c.sink()
            .events
            .contains(&ControllerEvent::Ready {
                timer_secs: Some(30)
            })
    );
}

#[test]
fn fresh_start_does_not_recover() {
    let mut c = make_controller(MockGpio::new(), None);
    c.start("7688board").unwrap();

    assert!(!c.recover().unwrap());
    assert_eq!(c.gpio().pulses, 0);
}

#[test]
fn run_returns_immediately_when_flag_already_set() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), None);
    let shutdown = AtomicBool::new(true);

    c.run(&shutdown).unwrap();

    assert!(c.delay().waits.is_empty());
    assert_eq!(c.gpio().pulses, 0);
}

#[test]
fn run_propagates_gpio_failure() {
    let mut gpio = MockGpio::new();
    gpio.fail_button = true;
    let mut c = make_controller(gpio, None);

    assert!(c.run(&AtomicBool::new(false)).is_err());
}

// ── Exit hook ────────────────────────────────────────────────

#[test]
fn shutdown_pulses_off_when_power_is_on() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), None);
    c.poll_once().unwrap();
    let calls_before = c.reporter().calls.len();

    assert!(c.shutdown().unwrap());

    assert_eq!(c.gpio().pulses, 2);
    assert_eq!(c.gpio().status, Low);
    assert!(!c.relay_on());
    assert_eq!(c.state(), ControllerState::Exiting);
    assert_eq!(c.reporter().calls.len(), calls_before, "exit never reports");
    assert!(c.sink().events.contains(&ControllerEvent::ExitPowerOff));
}

#[test]
fn shutdown_leaves_power_off_alone() {
    let mut c = make_controller(MockGpio::new(), None);

    assert!(!c.shutdown().unwrap());
    assert_eq!(c.gpio().pulses, 0);
    assert!(!c.sink().events.contains(&ControllerEvent::ExitPowerOff));
}

#[test]
fn shutdown_acts_on_status_not_commanded_state() {
    // Power switched on by something other than the controller.
    let mut gpio = MockGpio::new();
    gpio.status = High;
    let mut c = make_controller(gpio, None);

    assert!(c.shutdown().unwrap());
    assert_eq!(c.gpio().pulses, 1);
}

#[test]
fn shutdown_runs_once() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), None);
    c.poll_once().unwrap();

    assert!(c.shutdown().unwrap());
    c.gpio_mut().status = High;
    assert!(!c.shutdown().unwrap());
    assert_eq!(c.gpio().pulses, 2);
}

// ── Full lifetime ────────────────────────────────────────────

#[test]
fn serve_powers_off_after_gpio_failure() {
    let mut gpio = MockGpio::new();
    gpio.status = High;
    gpio.fail_button = true;
    let mut c = make_controller(gpio, None);

    let err = c
        .serve("7688board", false, &AtomicBool::new(false))
        .unwrap_err();

    assert_eq!(err.line(), Some(Line::Button));
    assert_eq!(c.gpio().pulses, 1, "exactly one exit pulse");
    assert_eq!(c.gpio().status, Low);
    assert_eq!(c.state(), ControllerState::Exiting);
    assert!(c.sink().events.contains(&ControllerEvent::ExitPowerOff));
}

#[test]
fn serve_reports_first_error_when_exit_hook_also_fails() {
    let mut gpio = MockGpio::new();
    gpio.fail_button = true;
    gpio.fail_status = true;
    let mut c = make_controller(gpio, None);

    let err = c
        .serve("7688board", false, &AtomicBool::new(false))
        .unwrap_err();
    assert_eq!(err.line(), Some(Line::Button));
}

#[test]
fn serve_runs_exit_hook_on_clean_shutdown() {
    let mut c = make_controller(MockGpio::new(), None);
    c.gpio_mut().status = High;

    c.serve("7688board", false, &AtomicBool::new(true)).unwrap();

    assert_eq!(c.gpio().pulses, 1);
    assert_eq!(c.state(), ControllerState::Exiting);
}

#[test]
fn serve_subscribes_after_registration() {
    let mut c = make_controller(MockGpio::new(), None);

    c.serve("7688board", true, &AtomicBool::new(true)).unwrap();

    assert_eq!(
        c.reporter().calls.last(),
        Some(&ReportCall::Subscribe("/3200/0/5500".into()))
    );
    assert_eq!(c.reporter().calls.len(), 5);
}

#[test]
fn serve_tolerates_subscription_failure() {
    let mut c = make_controller(MockGpio::new(), None);
    c.reporter_mut().fail = true;

    assert!(c.serve("7688board", true, &AtomicBool::new(true)).is_ok());
    assert!(c.sink().events.contains(&ControllerEvent::Ready { timer_secs: None }));
}
