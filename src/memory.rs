use crate::error::{Error, Result};

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// the most program that fits between the load address and the top of RAM
pub const CHIP8_MAX_PROGRAM_BYTES: usize = CHIP8_RAM_SIZE_BYTES - CHIP8_PROGRAM_ADDR as usize;

/// where the hex digit glyphs live
pub const CHIP8_FONT_ADDR: u16 = 0x000;

/// each glyph is 8 pixels wide and 5 rows tall
pub const CHIP8_GLYPH_BYTES: u16 = 5;

/// Represents memory map, ROM, RAM etc.
///
/// Every access is bounds-checked: reaching past the top of RAM is an
/// `Error::AddressOutOfRange` rather than a wrap or a panic.
pub trait MemoryMap {
    /// write a chunk of bytes into "RAM"
    fn write(&mut self, data: &[u8], addr: u16) -> Result<()> {
        self.get_rw_slice(addr, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// get a big-endian two-byte word (instruction fetch)
    fn get_word(&self, addr: u16) -> Result<u16> {
        let word = self.get_ro_slice(addr, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// get a r/w slice of the underlying memory
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8]>;

    /// get a r/o slice of the underlying memory
    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8]>;
}

/// Defines the CHIP-8 memory map for a 4K machine:
///   0x0000-0x004f  hex digit glyphs
///   0x0050-0x01ff  unused (interpreter area on the original hardware)
///   0x0200-0x0fff  program
///
/// the stack, registers and display live outside addressable memory
#[derive(Debug, Clone)]
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
}

fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
    let start = addr as usize;
    let end = start + len;
    if end > CHIP8_RAM_SIZE_BYTES {
        // report the first byte that doesn't exist
        return Err(Error::AddressOutOfRange {
            addr: start.max(CHIP8_RAM_SIZE_BYTES),
        });
    }
    Ok(start..end)
}

impl MemoryMap for Chip8MemoryMap {
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8]> {
        let r = range(addr, len)?;
        Ok(&mut self.bytes[r])
    }

    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let r = range(addr, len)?;
        Ok(&self.bytes[r])
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8MemoryMap {
    /// zeroed RAM with the glyphs baked in
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
        };
        mm.install_font();
        mm
    }

    /// (re)write the hex digit glyphs at the bottom of RAM
    pub fn install_font(&mut self) {
        let start = CHIP8_FONT_ADDR as usize;
        self.bytes[start..start + CHIP8_FONT.len()].copy_from_slice(&CHIP8_FONT);
    }

    /// address of the glyph for the low nibble of `digit`
    pub fn glyph_addr(digit: u8) -> u16 {
        CHIP8_FONT_ADDR + (digit & 0x0f) as u16 * CHIP8_GLYPH_BYTES
    }

    /// load a CHIP-8 program at 0x200
    pub fn load_program(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > CHIP8_MAX_PROGRAM_BYTES {
            return Err(Error::ProgramTooLarge {
                size: data.len(),
                max: CHIP8_MAX_PROGRAM_BYTES,
            });
        }
        self.write(data, CHIP8_PROGRAM_ADDR)
    }
}

#[rustfmt::skip]
pub const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
