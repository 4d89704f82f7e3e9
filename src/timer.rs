use crate::error::{Error, Result};
use std::time::Duration;

/// A fixed-rate clock fed with elapsed wall time. It doesn't look at the time
/// itself, so the driver decides what "now" is and tests can fake it.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    period: Duration,
    acc: Duration,
}

impl Clock {
    pub fn new(hz: u32) -> Result<Self> {
        if hz == 0 || hz > 1_000_000 {
            return Err(Error::ClockRate(hz));
        }
        Ok(Clock {
            period: Duration::from_secs(1) / hz,
            acc: Duration::ZERO,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// how many ticks fell due in `elapsed`; the remainder carries over
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.acc += elapsed;
        let mut ticks = 0;
        while self.acc >= self.period {
            self.acc -= self.period;
            ticks += 1;
        }
        ticks
    }
}
