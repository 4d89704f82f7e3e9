use crate::display::FrameBuffer;
use crate::error::{Error, Result};
use crate::input::KeyLatch;
use crate::memory::{Chip8MemoryMap, CHIP8_PROGRAM_ADDR};
use crate::program::ProgramSource;
use crate::stack::Stack;
use log::debug;

pub const REGISTER_COUNT: usize = 16;

/// VF, written only as a side effect of arithmetic, shifts and drawing
pub const FLAG_REGISTER: usize = 0xf;

/// Everything a CHIP-8 program can see or touch. One owned value per machine;
/// the engine is its only writer while a cycle runs.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) memory: Chip8MemoryMap,
    pub(crate) v: [u8; REGISTER_COUNT],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) stack: Stack,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) screen: FrameBuffer,
    pub(crate) keys: KeyLatch,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            memory: Chip8MemoryMap::new(),
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: CHIP8_PROGRAM_ADDR,
            stack: Stack::new(),
            delay_timer: 0,
            sound_timer: 0,
            screen: FrameBuffer::new(),
            keys: KeyLatch::default(),
        }
    }

    /// power-on state: registers, timers, stack, screen and keys cleared,
    /// PC at the program origin, glyphs reinstalled. The program area is left
    /// alone so a loaded program survives a reset.
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = CHIP8_PROGRAM_ADDR;
        self.stack.clear();
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.screen.clear();
        self.keys.clear();
        self.memory.install_font();
    }

    /// copy a program image in at 0x200; touches nothing but memory
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)?;
        debug!(
            "loaded {} byte program at {:#05x}",
            program.len(),
            CHIP8_PROGRAM_ADDR
        );
        Ok(())
    }

    pub fn load_from(&mut self, source: &mut dyn ProgramSource) -> Result<()> {
        let program = source.read_program().map_err(Error::SourceUnavailable)?;
        debug!("read {} bytes from {}", program.len(), source.describe());
        self.load(&program)
    }

    /// one 60Hz timer quantum; true when the sound timer passes through 1,
    /// which is when the tone should sound
    pub fn tick_timers(&mut self) -> bool {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        let tone = self.sound_timer == 1;
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
        tone
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }

    pub fn register(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn screen(&self) -> &FrameBuffer {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut FrameBuffer {
        &mut self.screen
    }

    pub fn keys(&self) -> &KeyLatch {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut KeyLatch {
        &mut self.keys
    }
}
