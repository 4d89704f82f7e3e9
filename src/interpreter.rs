/// # interpreter
///
/// The run loop. One pass of `iterate`:
///
///  1. give up if the stop signal is raised
///  2. poll the input device into the key latch; a quit request raises stop
///  3. step the engine once
///  4. count down the timers from wall time, sounding the tone when due
///  5. present the pixel buffer if anything drew on it
///
/// `main_loop` repeats that at the configured instruction rate. While the
/// engine waits on Fx0A each pass idles for the key poll interval instead, so
/// a blocked program neither spins the CPU nor stops the driver noticing a
/// stop request.
use crate::config::{Config, TimerMode};
use crate::display::{self, Display};
use crate::engine::{Engine, State};
use crate::error::{Error, Result};
use crate::input::Input;
use crate::program::ProgramSource;
use crate::sound::Sound;
use crate::timer::Clock;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// raised once to make the driver wind down; shared with signal handlers
pub type StopSignal = Arc<AtomicBool>;

pub fn stop_signal() -> StopSignal {
    Arc::new(AtomicBool::new(false))
}

pub struct Chip8Interpreter<'a> {
    engine: Engine,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    stop: StopSignal,
    timers: Option<Clock>,
    cycle_period: Duration,
}

impl<'a> Chip8Interpreter<'a> {
    pub fn new(
        config: Config,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        stop: StopSignal,
    ) -> Result<Chip8Interpreter<'a>> {
        let engine = Engine::new(config)?;
        let timers = match config.timers {
            TimerMode::FixedRate { hz } => Some(Clock::new(hz)?),
            TimerMode::PerCycle => None,
        };
        Ok(Chip8Interpreter {
            engine,
            display,
            input,
            sound,
            stop,
            timers,
            cycle_period: Clock::new(config.clock_hz)?.period(),
        })
    }

    /// load a chip8 program
    pub fn load_program(&mut self, source: &mut dyn ProgramSource) -> Result<()> {
        self.engine.machine_mut().load_from(source)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn stop_signal(&self) -> StopSignal {
        Arc::clone(&self.stop)
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// one pass of the driver loop; `elapsed` is the wall time since the
    /// previous pass
    pub fn iterate(&mut self, elapsed: Duration) -> Result<State> {
        if self.stop_requested() {
            self.engine.halt();
            return Ok(State::Halted);
        }

        let keys = self.input.poll().map_err(Error::Input)?;
        if keys.quit {
            info!("quit requested");
            self.stop.store(true, Ordering::Relaxed);
            self.engine.halt();
            return Ok(State::Halted);
        }
        self.engine.machine_mut().keys_mut().update(&keys);

        let cycle = self.engine.step()?;

        // per-cycle timers tick inside every step
        let mut tone = cycle.tone;
        let mut ticked = self.timers.is_none();
        if let Some(clock) = self.timers.as_mut() {
            let ticks = clock.advance(elapsed);
            ticked = ticks > 0;
            for _ in 0..ticks {
                tone |= self.engine.machine_mut().tick_timers();
            }
        }
        self.update_sound(tone, ticked)?;

        display::present(self.display, self.engine.machine_mut().screen_mut())
            .map_err(Error::Display)?;
        Ok(cycle.state)
    }

    /// a tone lasts from the emit-tone tick until the next timer tick
    fn update_sound(&mut self, tone: bool, ticked: bool) -> Result<()> {
        if tone {
            self.sound.beep()
        } else if ticked && self.sound.is_beeping() {
            self.sound.stop()
        } else {
            Ok(())
        }
    }

    /// run until stopped, the program faults or `max_cycles` passes have gone
    pub fn main_loop(&mut self, max_cycles: Option<u64>) -> Result<()> {
        let idle = self.engine.config().key_poll_interval;
        let mut cycles = 0u64;
        let mut last = Instant::now();

        loop {
            if max_cycles.map_or(false, |max| cycles >= max) {
                debug!("cycle limit of {} reached", cycles);
                break;
            }

            let now = Instant::now();
            let state = self.iterate(now - last)?;
            last = now;
            cycles += 1;

            match state {
                State::Halted => break,
                State::AwaitingKey { .. } => spin_sleep::sleep(idle),
                State::Ready | State::Running => {
                    // whatever is left of this cycle's time slot
                    if let Some(rest) = self.cycle_period.checked_sub(now.elapsed()) {
                        spin_sleep::sleep(rest);
                    }
                }
            }
        }

        if self.sound.is_beeping() {
            self.sound.stop()?;
        }
        info!(
            "stopped after {} cycles at {:#05x}",
            cycles,
            self.engine.machine().pc()
        );
        Ok(())
    }
}
