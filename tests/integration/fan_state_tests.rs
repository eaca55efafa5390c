//! Fan relay loop against a virtual clock.

use embedded_hal::digital::PinState;

use fanrelay::app::fan_state::FanStateLoop;
use fanrelay::error::Error;
use fanrelay::pins::PinRole;

use crate::mock_hw::{MockDelay, RecordingOutput, ScriptedInput, VirtualClock};

// ── Scenario A: signal held HIGH for one second ──────────────

#[test]
fn signal_held_high_for_a_second_is_mirrored_at_every_sample() {
    let clock = VirtualClock::new();
    let signal_in = ScriptedInput::timed(&clock, 5, |t| t < 1000);
    let signal_out = RecordingOutput::new(&clock);
    let log = signal_out.log();

    let fan = FanStateLoop::with_delay_ms(signal_in, signal_out, MockDelay::new(&clock), 250);
    let err = fan.run().unwrap_err();

    assert!(matches!(
        err,
        Error::Pin {
            role: PinRole::SignalIn,
            ..
        }
    ));
    assert_eq!(
        log.entries(),
        vec![
            (0, PinState::High),
            (250, PinState::High),
            (500, PinState::High),
            (750, PinState::High),
            (1000, PinState::Low),
        ]
    );
}

#[test]
fn default_interval_is_250_ms() {
    let clock = VirtualClock::new();
    let delay = MockDelay::new(&clock);
    let sleeps = delay.sleeps();
    let mut fan = FanStateLoop::new(
        ScriptedInput::constant(&clock, 2, false),
        RecordingOutput::new(&clock),
        delay,
    );

    fan.cycle().unwrap();
    fan.cycle().unwrap();

    assert_eq!(*sleeps.lock().unwrap(), vec![250, 250]);
    assert_eq!(clock.now_ms(), 500);
    assert_eq!(fan.cycles(), 2);
}

#[test]
fn every_cycle_writes_even_without_change() {
    let clock = VirtualClock::new();
    let signal_out = RecordingOutput::new(&clock);
    let log = signal_out.log();
    let fan = FanStateLoop::with_delay_ms(
        ScriptedInput::constant(&clock, 4, true),
        signal_out,
        MockDelay::new(&clock),
        100,
    );

    let _ = fan.run();

    assert_eq!(log.levels(), vec![PinState::High; 4]);
}

#[test]
fn updates_never_come_faster_than_the_interval() {
    let clock = VirtualClock::new();
    let signal_out = RecordingOutput::new(&clock);
    let log = signal_out.log();
    let fan = FanStateLoop::with_delay_ms(
        ScriptedInput::timed(&clock, 10, |t| (t / 70) % 2 == 0),
        signal_out,
        MockDelay::new(&clock),
        70,
    );

    let _ = fan.run();

    let times: Vec<u64> = log.entries().iter().map(|(t, _)| *t).collect();
    assert_eq!(times.len(), 10);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= 70, "updates at {:?}", pair);
    }
}

#[test]
fn relay_write_failure_propagates_without_sleeping() {
    let clock = VirtualClock::new();
    let delay = MockDelay::new(&clock);
    let sleeps = delay.sleeps();
    let fan = FanStateLoop::new(
        ScriptedInput::constant(&clock, 1, true),
        RecordingOutput::broken(&clock),
        delay,
    );

    let err = fan.run().unwrap_err();

    assert!(matches!(
        err,
        Error::Pin {
            role: PinRole::SignalOut,
            ..
        }
    ));
    assert!(sleeps.lock().unwrap().is_empty());
}
