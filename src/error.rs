use std::io;
use thiserror::Error;

pub type Result<T = ()> = std::result::Result<T, Error>;

/// Everything that can go wrong loading or running a CHIP-8 program
#[derive(Debug, Error)]
pub enum Error {
    #[error("program is {size} bytes, at most {max} bytes fit in memory")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("program source unavailable: {0}")]
    SourceUnavailable(#[source] io::Error),

    #[error("call stack overflow pushing return address {addr:#05x}")]
    StackOverflow { addr: u16 },

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of range at {addr:#06x}")]
    AddressOutOfRange { addr: usize },

    #[error("program counter left memory: {pc:#06x}")]
    ProgramCounterOutOfRange { pc: usize },

    #[error("unimplemented opcode {word:#06x} at {pc:#05x}")]
    UnimplementedOpcode { word: u16, pc: u16 },

    #[error("display failure: {0}")]
    Display(#[source] io::Error),

    #[error("input failure: {0}")]
    Input(#[source] io::Error),

    #[error("sound failure: {0}")]
    Sound(String),

    #[error("clock rate of {0} Hz can't be emulated")]
    ClockRate(u32),
}
