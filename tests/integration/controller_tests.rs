//! Integration tests for the poll → edge → pulse → report pipeline.
//!
//! Run on the host against [`mock_hw`](crate::mock_hw); every wait goes
//! through `MockDelay`, so countdowns finish instantly.

use relay_button::app::controller::ControllerState;
use relay_button::app::events::ControllerEvent;
use relay_button::app::ports::PinState::{High, Low};
use relay_button::error::Line;

use crate::mock_hw::{MockGpio, ReportCall, make_controller};

// ── Button press without timer ───────────────────────────────

#[test]
fn press_without_timer_turns_power_on_and_reports_true() {
    let mut c = make_controller(MockGpio::with_buttons(&[Low, High]), None);

    c.poll_once().unwrap();
    c.poll_once().unwrap();

    assert_eq!(c.gpio().pulses, 1);
    assert_eq!(c.gpio().status, High);
    assert_eq!(
        c.reporter().calls,
        vec![ReportCall::Set("/3200/0/5500".into(), true)]
    );
    assert!(c.relay_on());
    assert_eq!(c.state(), ControllerState::Idle);
    assert!(c.sink().ticks().is_empty(), "no countdown without a timer");
}

#[test]
fn second_press_turns_power_off_and_reports_false() {
    let mut c = make_controller(MockGpio::with_buttons(&[Low, High, Low, High]), None);

    for _ in 0..4 {
        c.poll_once().unwrap();
    }

    assert_eq!(c.gpio().pulses, 2);
    assert_eq!(c.reporter().sets(), vec![true, false]);
    assert!(!c.relay_on());
    assert_eq!(c.gpio().status, Low);
}

#[test]
fn held_button_toggles_once() {
    let mut c = make_controller(MockGpio::with_buttons(&[High, High, High, High]), None);

    for _ in 0..4 {
        c.poll_once().unwrap();
    }

    assert_eq!(c.gpio().pulses, 1);
    assert_eq!(c.reporter().sets(), vec![true]);
}

#[test]
fn release_is_not_a_press() {
    let mut c = make_controller(MockGpio::with_buttons(&[Low, Low]), None);
    let mut held = make_controller(MockGpio::with_buttons(&[High, Low]), None);

    c.poll_once().unwrap();
    c.poll_once().unwrap();
    held.poll_once().unwrap();
    let pulses_after_press = held.gpio().pulses;
    held.poll_once().unwrap();

    assert_eq!(c.gpio().pulses, 0);
    assert_eq!(held.gpio().pulses, pulses_after_press);
}

#[test]
fn pulse_shape_is_high_then_low() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), None);
    c.poll_once().unwrap();
    assert_eq!(c.gpio().writes, vec![High, Low]);
    assert_eq!(c.delay().count(100), 1, "one 100ms pulse");
    assert_eq!(c.delay().count(500), 1, "one poll interval");
}

#[test]
fn stuck_relay_reports_actual_status() {
    let mut gpio = MockGpio::with_buttons(&[High]);
    gpio.latching = false;
    let mut c = make_controller(gpio, Some(5));

    c.poll_once().unwrap();

    assert_eq!(c.gpio().pulses, 1);
    assert_eq!(c.reporter().sets(), vec![false]);
    assert!(!c.relay_on());
    assert!(c.sink().ticks().is_empty(), "no countdown when power stayed off");
}

// ── Timer mode ───────────────────────────────────────────────

#[test]
fn timer_mode_counts_down_then_switches_off() {
    let mut c = make_controller(MockGpio::with_buttons(&[Low, High]), Some(5));

    c.poll_once().unwrap();
    c.poll_once().unwrap();

    assert_eq!(c.reporter().sets(), vec![true, false]);
    assert_eq!(c.sink().ticks(), vec![5, 4, 3, 2, 1]);
    assert_eq!(c.delay().count(1_000), 5);
    assert_eq!(c.gpio().pulses, 2);
    assert_eq!(c.gpio().status, Low);
    assert!(!c.relay_on());
    assert_eq!(c.state(), ControllerState::Idle);

    let events = &c.sink().events;
    let toggled = events
        .iter()
        .position(|e| *e == ControllerEvent::PowerToggled { on: true })
        .unwrap();
    let auto_off = events
        .iter()
        .position(|e| *e == ControllerEvent::AutoOff)
        .unwrap();
    assert!(toggled < auto_off);
}

#[test]
fn timer_auto_off_reports_false_even_if_status_stays_high() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), Some(2));
    c.poll_once().unwrap();
    assert_eq!(c.reporter().sets(), vec![true, false]);

    // Commanded off: a HIGH status no longer triggers recovery.
    c.gpio_mut().status = High;
    c.poll_once().unwrap();
    assert_eq!(c.gpio().pulses, 2);
}

#[test]
fn countdown_passes_through_counting_down_state() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), Some(1));
    c.poll_once().unwrap();

    let states: Vec<_> = c
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            ControllerEvent::StateChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        vec![
            ControllerState::Pulsing,
            ControllerState::CountingDown,
            ControllerState::Pulsing,
            ControllerState::Idle,
        ]
    );
}

// ── Recovery ─────────────────────────────────────────────────

#[test]
fn recovery_is_noop_when_power_not_commanded() {
    let mut c = make_controller(MockGpio::new(), None);
    assert!(!c.recover().unwrap());

    c.gpio_mut().status = High;
    assert!(!c.recover().unwrap());
    assert_eq!(c.gpio().pulses, 0);
}

#[test]
fn dropped_relay_is_re_pulsed_once_without_reporting() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), None);
    c.poll_once().unwrap();
    assert!(c.relay_on());
    let calls_before = c.reporter().calls.len();

    // Relay falls out behind the controller's back.
    c.gpio_mut().status = Low;
    c.poll_once().unwrap();

    assert_eq!(c.gpio().pulses, 2, "exactly one recovery pulse");
    assert_eq!(c.gpio().status, High);
    assert_eq!(c.reporter().calls.len(), calls_before, "recovery never reports");
    assert!(c.relay_on());
    assert!(
        c.sink()
            .events
            .contains(&ControllerEvent::Recovered { status: High })
    );

    // Now consistent again: further polls leave it alone.
    c.poll_once().unwrap();
    assert_eq!(c.gpio().pulses, 2);
}

#[test]
fn failed_recovery_keeps_commanded_state() {
    let mut c = make_controller(MockGpio::with_buttons(&[High]), None);
    c.poll_once().unwrap();

    c.gpio_mut().status = Low;
    c.gpio_mut().latching = false;
    assert!(c.recover().unwrap());
    assert!(c.relay_on());
    assert!(
        c.sink()
            .events
            .contains(&ControllerEvent::Recovered { status: Low })
    );

    // Still mismatched, so the next poll tries again.
    c.poll_once().unwrap();
    assert_eq!(c.gpio().pulses, 3);
}

// ── Error policy ─────────────────────────────────────────────

#[test]
fn reporter_failure_never_blocks_local_control() {
    let mut c = make_controller(MockGpio::with_buttons(&[High, Low, High]), None);
    c.reporter_mut().fail = true;

    for _ in 0..3 {
        c.poll_once().unwrap();
    }

    assert_eq!(c.gpio().pulses, 2);
    assert_eq!(c.reporter().sets(), vec![true, false]);
    assert!(!c.relay_on());
}

#[test]
fn button_read_failure_propagates() {
    let mut gpio = MockGpio::new();
    gpio.fail_button = true;
    let mut c = make_controller(gpio, None);

    let err = c.poll_once().unwrap_err();
    assert_eq!(err.line(), Some(Line::Button));
}

#[test]
fn status_read_failure_during_toggle_propagates() {
    let mut gpio = MockGpio::with_buttons(&[High]);
    gpio.fail_status = true;
    let mut c = make_controller(gpio, None);

    let err = c.poll_once().unwrap_err();
    assert_eq!(err.line(), Some(Line::PowerStatus));
    assert!(c.reporter().calls.is_empty());
}
