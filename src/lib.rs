//!
//! ## Design
//!
//! * one owned `Machine` per interpreter: memory, registers, stack, timers,
//!   pixel buffer and key latch. no globals, so machines can sit side by side
//!   in tests
//! * decoding is a pure function from instruction word to `Instruction`; the
//!   engine dispatches with an exhaustive match over `Opcode`, so a missing
//!   opcode is a compile error rather than a null handler
//! * abstract display, input and sound behind traits so the interpreter
//!   doesn't need to know how they work; starting with TUI in-console
//! * CHIP-8 instructions run at a configured rate; the timers count down from
//!   a 60Hz wall clock rather than from instruction count, so programs keep
//!   the same pace whatever the instruction rate
//! * Fx0A suspends the engine instead of spinning inside it; the driver keeps
//!   polling input and honouring the stop signal while it waits
//!
//! Policies where the original hardware is vague:
//!
//! * every access through I is bounds-checked: reading or writing past 0xfff
//!   is `Error::AddressOutOfRange`. Fx1E keeps I to 12 bits
//! * sprites wrap around both screen edges
//! * `RET` with nothing on the stack is `Error::StackUnderflow`; a 17th `CALL`
//!   is `Error::StackOverflow`
//! * unknown opcodes are logged and skipped, unless `Config::strict` is set
//!
//! Model
//!
//! Environment (main.rs)
//!  |-- display, input, sound, config
//!  |-- interpreter(display, input, sound, config)
//!  |    `-- engine(config)
//!  |         `-- machine: memory, stack, frame buffer, key latch
//!  `-- main loop
//!       |-- poll input -> key latch
//!       |-- engine.step()
//!       |-- tick timers for the wall time that passed; beep
//!       |-- present the frame buffer if dirty
//!       `-- sleep out the rest of the cycle (or the key poll interval)
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod machine;
pub mod memory;
pub mod program;
pub mod sound;
pub mod stack;
pub mod timer;

pub use config::{Config, TimerMode};
pub use engine::{Cycle, Engine, State};
pub use error::{Error, Result};
pub use instruction::{decode, Instruction, Opcode, Operands};
pub use interpreter::{stop_signal, Chip8Interpreter, StopSignal};
pub use machine::Machine;
