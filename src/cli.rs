use chip8vm::{Config, TimerMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chip8vm",
    about = "Run CHIP-8 programs in the terminal",
    long_about = "Runs a CHIP-8 ROM image in the terminal.\n\
                  Keys: 1234/qwer/asdf/zxcv map onto the hex keypad; Esc quits.",
    version
)]
pub struct Cli {
    /// ROM image to run
    pub rom: PathBuf,

    /// Instructions per second
    #[arg(short = 'c', long, default_value = "700")]
    pub clock: u32,

    /// Count the timers down once per instruction, like the original interpreter
    #[arg(long)]
    pub per_cycle_timers: bool,

    /// Treat unknown opcodes as fatal
    #[arg(long)]
    pub strict: bool,

    /// Seed for the random number opcode
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Stop after this many cycles
    #[arg(short = 'n', long)]
    pub cycles: Option<u64>,

    /// No beeping
    #[arg(short = 'm', long)]
    pub mute: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            clock_hz: self.clock,
            timers: if self.per_cycle_timers {
                TimerMode::PerCycle
            } else {
                Config::default().timers
            },
            strict: self.strict,
            seed: self.seed,
            ..Config::default()
        }
    }
}
