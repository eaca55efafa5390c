//! Launcher: startup order, fatal-error boundary, shared halt of both loops.

use std::thread::sleep;
use std::time::Duration;

use embedded_hal::digital::PinState;

use fanrelay::config::ControllerConfig;
use fanrelay::error::Error;
use fanrelay::launcher;
use fanrelay::pins::PinRole;

use crate::mock_hw::{
    MockBoard, MockDelay, RecordingOutput, ScriptedInput, VirtualClock, WriteLog, config_failure,
};

const WAIT: Duration = Duration::from_secs(5);
/// Long enough for a detached heartbeat task to notice the halt.
const SETTLE: Duration = Duration::from_millis(100);

/// Assert `log` stops growing and ends with `hb_out` LOW.
fn assert_quiet(log: &WriteLog) {
    sleep(SETTLE);
    let settled = log.len();
    sleep(Duration::from_millis(200));
    assert_eq!(log.len(), settled, "hb_out still being driven");
    assert_eq!(settled % 2, 0, "hb_out left HIGH: {:?}", log.entries());
}

// ── Scenario C: pin error at startup ─────────────────────────

#[test]
fn heartbeat_pin_failure_stops_startup() {
    let clock = VirtualClock::new();
    let mut board = MockBoard::new(
        Err(config_failure(12)),
        Ok((
            ScriptedInput::constant(&clock, 1, true),
            RecordingOutput::new(&clock),
        )),
        vec![],
    );

    let err = launcher::start(&mut board, &ControllerConfig::default()).unwrap_err();

    assert_eq!(err, config_failure(12));
    assert!(!board.fan_bound(), "fan pins must not be touched");
}

#[test]
fn fail_silent_run_returns_quietly() {
    let clock = VirtualClock::new();
    let board = MockBoard::new(
        Err(config_failure(13)),
        Ok((
            ScriptedInput::constant(&clock, 1, true),
            RecordingOutput::new(&clock),
        )),
        vec![],
    );

    // Must return normally: no panic, nothing to unwrap.
    launcher::run(board, &ControllerConfig::default());
}

#[test]
fn invalid_timing_is_rejected_before_any_pin_is_bound() {
    let clock = VirtualClock::new();
    let mut board = MockBoard::new(
        Ok((
            ScriptedInput::constant(&clock, 1, true),
            RecordingOutput::new(&clock),
        )),
        Ok((
            ScriptedInput::constant(&clock, 1, true),
            RecordingOutput::new(&clock),
        )),
        vec![],
    );
    let config = ControllerConfig {
        ack_reset_delay_ms: 0,
        ..ControllerConfig::default()
    };

    let err = launcher::start(&mut board, &config).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(!board.heartbeat_bound());
    assert!(!board.fan_bound());
}

#[test]
fn fan_pin_failure_leaves_heartbeat_silent() {
    let clock = VirtualClock::new();
    let hb_out = RecordingOutput::new(&clock);
    let hb_log = hb_out.log();

    let mut board = MockBoard::new(
        Ok((ScriptedInput::constant(&clock, 1_000, true), hb_out)),
        Err(config_failure(15)),
        vec![MockDelay::new(&clock)],
    );

    let err = launcher::start(&mut board, &ControllerConfig::default()).unwrap_err();

    assert_eq!(err, config_failure(15));
    assert!(board.heartbeat_bound());
    sleep(SETTLE);
    assert!(hb_log.is_empty(), "heartbeat acknowledged after a fatal startup error");
}

#[test]
fn fail_silent_run_after_fan_pin_failure_never_acknowledges() {
    let clock = VirtualClock::new();
    let hb_out = RecordingOutput::new(&clock);
    let hb_log = hb_out.log();

    let board = MockBoard::new(
        Ok((ScriptedInput::constant(&clock, 1_000, true), hb_out)),
        Err(config_failure(15)),
        vec![MockDelay::new(&clock)],
    );

    launcher::run(board, &ControllerConfig::default());

    let at_return = hb_log.len();
    sleep(Duration::from_millis(200));
    assert_eq!((at_return, hb_log.len()), (0, 0));
}

// ── Normal startup ───────────────────────────────────────────

#[test]
fn fan_failure_halts_the_heartbeat() {
    let hb_clock = VirtualClock::new();
    let fan_clock = VirtualClock::new();

    let hb_out = RecordingOutput::new(&hb_clock);
    let hb_log = hb_out.log();
    let signal_out = RecordingOutput::new(&fan_clock);
    let fan_log = signal_out.log();

    let mut board = MockBoard::new(
        Ok((ScriptedInput::constant(&hb_clock, usize::MAX, true), hb_out)),
        Ok((ScriptedInput::constant(&fan_clock, 3, true), signal_out)),
        vec![MockDelay::new(&hb_clock), MockDelay::new(&fan_clock)],
    );

    let err = launcher::start(&mut board, &ControllerConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        Error::Pin {
            role: PinRole::SignalIn,
            ..
        }
    ));
    assert_eq!(
        fan_log.entries(),
        vec![
            (0, PinState::High),
            (250, PinState::High),
            (500, PinState::High)
        ]
    );
    assert_quiet(&hb_log);
}

#[test]
fn heartbeat_failure_halts_the_fan_loop() {
    let hb_clock = VirtualClock::new();
    let fan_clock = VirtualClock::new();
    let signal_out = RecordingOutput::new(&fan_clock);
    let fan_log = signal_out.log();

    let mut board = MockBoard::new(
        Ok((
            ScriptedInput::broken(&hb_clock),
            RecordingOutput::new(&hb_clock),
        )),
        Ok((ScriptedInput::constant(&fan_clock, usize::MAX, false), signal_out)),
        vec![MockDelay::new(&hb_clock), MockDelay::new(&fan_clock)],
    );

    let err = launcher::start(&mut board, &ControllerConfig::default()).unwrap_err();

    // The fan loop only stops because the heartbeat's error reached it.
    assert!(matches!(
        err,
        Error::Pin {
            role: PinRole::HbIn,
            ..
        }
    ));
    assert!(fan_log.levels().iter().all(|&s| s == PinState::Low));
}

#[test]
fn both_loops_run_side_by_side_until_halted() {
    let hb_clock = VirtualClock::new();
    let fan_clock = VirtualClock::new();

    let hb_out = RecordingOutput::new(&hb_clock);
    let hb_log = hb_out.log();
    let signal_out = RecordingOutput::new(&fan_clock);
    let fan_log = signal_out.log();

    // signal_in reads HIGH only once the heartbeat has completed a pulse,
    // so the fan loop can only mirror HIGH while the heartbeat is running.
    let acked = hb_log.clone();
    let mut board = MockBoard::new(
        Ok((ScriptedInput::constant(&hb_clock, usize::MAX, true), hb_out)),
        Ok((
            ScriptedInput::timed(&fan_clock, 2, move |_| acked.wait_for(2, WAIT)),
            signal_out,
        )),
        vec![MockDelay::new(&hb_clock), MockDelay::new(&fan_clock)],
    );

    let err = launcher::start(&mut board, &ControllerConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        Error::Pin {
            role: PinRole::SignalIn,
            ..
        }
    ));
    assert_eq!(fan_log.levels(), vec![PinState::High; 2]);
    assert_quiet(&hb_log);
    assert_eq!(
        hb_log.entries()[..2],
        [(0, PinState::High), (250, PinState::Low)]
    );
}
