use crate::error::{Error, Result};
use std::time::Duration;

/// How the delay and sound timers count down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// once per executed cycle, like the original interpreter; timing then
    /// depends on how fast instructions run
    PerCycle,
    /// from a wall-clock tick independent of instruction throughput
    FixedRate { hz: u32 },
}

/// Knobs for the engine and the driver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// instructions per second
    pub clock_hz: u32,
    pub timers: TimerMode,
    /// unknown opcodes are an error instead of a logged no-op
    pub strict: bool,
    /// seed for the random opcode; `None` seeds from the OS
    pub seed: Option<u64>,
    /// how long to idle between input polls while waiting for a key
    pub key_poll_interval: Duration,
}

pub const DEFAULT_CLOCK_HZ: u32 = 700;
pub const DEFAULT_TIMER_HZ: u32 = 60;

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_hz: DEFAULT_CLOCK_HZ,
            timers: TimerMode::FixedRate {
                hz: DEFAULT_TIMER_HZ,
            },
            strict: false,
            seed: None,
            key_poll_interval: Duration::from_millis(1),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let rates = match self.timers {
            TimerMode::PerCycle => [self.clock_hz, self.clock_hz],
            TimerMode::FixedRate { hz } => [self.clock_hz, hz],
        };
        match rates.into_iter().find(|&hz| hz == 0 || hz > 1_000_000) {
            Some(hz) => Err(Error::ClockRate(hz)),
            None => Ok(()),
        }
    }
}
