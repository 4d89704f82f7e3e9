/// # instruction
///
/// Decoding of 16-bit CHIP-8 instruction words. Every word maps to exactly one
/// `Opcode`; words that fall into a gap of the 0x0, 0x8, 0xE or 0xF families
/// decode as `Opcode::Unknown` so the engine can decide what to do with them.
///
/// Operand fields, in the usual notation:
///
/// ```text
///   nnn   lowest 12 bits    (address)
///   kk    lowest 8 bits     (immediate byte)
///   x     bits 8..12        (register)
///   y     bits 4..8         (register)
///   n     lowest 4 bits     (nibble)
/// ```
use std::fmt;

/// The 35 canonical operation tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// 00E0 clear the display
    ClearScreen,
    /// 00EE return from subroutine
    Return,
    /// 1nnn
    Jump,
    /// 2nnn
    Call,
    /// 3xkk skip if Vx == kk
    SkipEqImm,
    /// 4xkk skip if Vx != kk
    SkipNeImm,
    /// 5xy0 skip if Vx == Vy
    SkipEqReg,
    /// 6xkk Vx = kk
    SetImm,
    /// 7xkk Vx += kk, no carry
    AddImm,
    /// 8xy0 Vx = Vy
    SetReg,
    /// 8xy1
    Or,
    /// 8xy2
    And,
    /// 8xy3
    Xor,
    /// 8xy4 Vx += Vy, VF = carry
    AddReg,
    /// 8xy5 Vx -= Vy, VF = not borrow
    Sub,
    /// 8xy6 Vx >>= 1, VF = bit shifted out
    ShiftRight,
    /// 8xy7 Vx = Vy - Vx, VF = not borrow
    SubN,
    /// 8xyE Vx <<= 1, VF = bit shifted out
    ShiftLeft,
    /// 9xy0 skip if Vx != Vy
    SkipNeReg,
    /// Annn I = nnn
    SetIndex,
    /// Bnnn jump to nnn + V0
    JumpOffset,
    /// Cxkk Vx = random & kk
    Random,
    /// Dxyn draw n-row sprite from I at (Vx, Vy)
    Draw,
    /// Ex9E skip if key Vx down
    SkipKey,
    /// ExA1 skip if key Vx up
    SkipNotKey,
    /// Fx07 Vx = delay timer
    GetDelay,
    /// Fx0A block until a key is pressed, Vx = key
    WaitKey,
    /// Fx15 delay timer = Vx
    SetDelay,
    /// Fx18 sound timer = Vx
    SetSound,
    /// Fx1E I += Vx
    AddIndex,
    /// Fx29 I = glyph for digit Vx
    SetGlyph,
    /// Fx33 BCD of Vx at I, I+1, I+2
    Bcd,
    /// Fx55 memory[I..=I+x] = V0..=Vx
    StoreRegs,
    /// Fx65 V0..=Vx = memory[I..=I+x]
    LoadRegs,
    /// anything else
    Unknown,
}

/// Raw operand fields, extracted from every word regardless of opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Operands {
    pub x: usize,
    pub y: usize,
    pub n: u8,
    pub kk: u8,
    pub nnn: u16,
}

impl Operands {
    pub fn from_word(word: u16) -> Self {
        Operands {
            x: ((word >> 8) & 0xf) as usize,
            y: ((word >> 4) & 0xf) as usize,
            n: (word & 0xf) as u8,
            kk: (word & 0xff) as u8,
            nnn: word & 0xfff,
        }
    }
}

/// A decoded instruction word: the operation descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub word: u16,
    pub opcode: Opcode,
    pub operands: Operands,
}

/// Map an instruction word to its operation. Pure; no side effects.
pub fn decode(word: u16) -> Instruction {
    Instruction {
        word,
        opcode: opcode(word),
        operands: Operands::from_word(word),
    }
}

fn opcode(word: u16) -> Opcode {
    use Opcode::*;
    let low_byte = word & 0xff;
    let low_nibble = word & 0xf;
    match word >> 12 {
        0x0 => match word {
            0x00e0 => ClearScreen,
            0x00ee => Return,
            // 0nnn machine-code routines don't exist here
            _ => Unknown,
        },
        0x1 => Jump,
        0x2 => Call,
        0x3 => SkipEqImm,
        0x4 => SkipNeImm,
        0x5 => SkipEqReg,
        0x6 => SetImm,
        0x7 => AddImm,
        0x8 => match low_nibble {
            0x0 => SetReg,
            0x1 => Or,
            0x2 => And,
            0x3 => Xor,
            0x4 => AddReg,
            0x5 => Sub,
            0x6 => ShiftRight,
            0x7 => SubN,
            0xe => ShiftLeft,
            _ => Unknown,
        },
        0x9 => SkipNeReg,
        0xa => SetIndex,
        0xb => JumpOffset,
        0xc => Random,
        0xd => Draw,
        0xe => match low_byte {
            0x9e => SkipKey,
            0xa1 => SkipNotKey,
            _ => Unknown,
        },
        _ => match low_byte {
            0x07 => GetDelay,
            0x0a => WaitKey,
            0x15 => SetDelay,
            0x18 => SetSound,
            0x1e => AddIndex,
            0x29 => SetGlyph,
            0x33 => Bcd,
            0x55 => StoreRegs,
            0x65 => LoadRegs,
            _ => Unknown,
        },
    }
}

impl fmt::Display for Instruction {
    /// conventional mnemonics, for trace logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Opcode::*;
        let Operands { x, y, n, kk, nnn } = self.operands;
        match self.opcode {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump => write!(f, "JP {:#05x}", nnn),
            Call => write!(f, "CALL {:#05x}", nnn),
            SkipEqImm => write!(f, "SE V{:X}, {:#04x}", x, kk),
            SkipNeImm => write!(f, "SNE V{:X}, {:#04x}", x, kk),
            SkipEqReg => write!(f, "SE V{:X}, V{:X}", x, y),
            SetImm => write!(f, "LD V{:X}, {:#04x}", x, kk),
            AddImm => write!(f, "ADD V{:X}, {:#04x}", x, kk),
            SetReg => write!(f, "LD V{:X}, V{:X}", x, y),
            Or => write!(f, "OR V{:X}, V{:X}", x, y),
            And => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight => write!(f, "SHR V{:X}", x),
            SubN => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft => write!(f, "SHL V{:X}", x),
            SkipNeReg => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetIndex => write!(f, "LD I, {:#05x}", nnn),
            JumpOffset => write!(f, "JP V0, {:#05x}", nnn),
            Random => write!(f, "RND V{:X}, {:#04x}", x, kk),
            Draw => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKey => write!(f, "SKP V{:X}", x),
            SkipNotKey => write!(f, "SKNP V{:X}", x),
            GetDelay => write!(f, "LD V{:X}, DT", x),
            WaitKey => write!(f, "LD V{:X}, K", x),
            SetDelay => write!(f, "LD DT, V{:X}", x),
            SetSound => write!(f, "LD ST, V{:X}", x),
            AddIndex => write!(f, "ADD I, V{:X}", x),
            SetGlyph => write!(f, "LD F, V{:X}", x),
            Bcd => write!(f, "LD B, V{:X}", x),
            StoreRegs => write!(f, "LD [I], V{:X}", x),
            LoadRegs => write!(f, "LD V{:X}, [I]", x),
            Unknown => write!(f, "DW {:#06x}", self.word),
        }
    }
}
