use std::time::Duration;

/// Frames longer than this (e.g. while the window is being dragged) only catch up this much
const MAX_CATCH_UP: Duration = Duration::from_millis(250);

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// How much work a frame should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub cycles: u32,
    pub ticks: u32,
}

/// # Pacer
/// Turns elapsed wall time into CPU cycles and timer ticks.
///
/// Each rate keeps its own remainder so that, over time, exactly `clock_hz` cycles
/// and `timer_hz` ticks happen per second no matter how long each frame takes.
pub struct Pacer {
    clock_hz: u128,
    timer_hz: u128,
    cycle_remainder: u128,
    tick_remainder: u128,
}

impl Pacer {
    pub fn new(clock_hz: u32, timer_hz: u32) -> Self {
        Pacer {
            clock_hz: u128::from(clock_hz),
            timer_hz: u128::from(timer_hz),
            cycle_remainder: 0,
            tick_remainder: 0,
        }
    }

    /// Accounts for `elapsed` and returns the cycles and ticks that are now due
    pub fn advance(&mut self, elapsed: Duration) -> Slice {
        let nanos = elapsed.min(MAX_CATCH_UP).as_nanos();
        Slice {
            cycles: due(&mut self.cycle_remainder, nanos, self.clock_hz),
            ticks: due(&mut self.tick_remainder, nanos, self.timer_hz),
        }
    }
}

fn due(remainder: &mut u128, nanos: u128, hz: u128) -> u32 {
    *remainder += nanos * hz;
    let count = *remainder / NANOS_PER_SECOND;
    *remainder %= NANOS_PER_SECOND;
    // bounded by MAX_CATCH_UP * hz
    count as u32
}
