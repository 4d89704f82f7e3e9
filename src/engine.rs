/// # engine
///
/// The fetch-decode-execute state machine.
///
/// ```text
///   Ready ──step──> Running ──step──> Running
///                      │  ^
///                Fx0A  │  │ key press seen by a later step
///                      v  │
///                   AwaitingKey
///
///   any state ──halt──> Halted   (driver only; step is then a no-op)
/// ```
///
/// A step that finds the engine `AwaitingKey` doesn't fetch anything: it
/// looks for a key press in the latch and either completes the Fx0A or leaves
/// control with the driver again.
use crate::config::{Config, TimerMode};
use crate::error::{Error, Result};
use crate::instruction::{decode, Instruction, Opcode, Operands};
use crate::machine::{Machine, FLAG_REGISTER};
use crate::memory::{Chip8MemoryMap, MemoryMap, CHIP8_RAM_SIZE_BYTES};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INST_STEP: u16 = 2;

/// I is a 12-bit register as far as programs are concerned
const INDEX_MASK: u16 = 0x0fff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ready,
    Running,
    /// suspended in Fx0A; the key goes into Vx
    AwaitingKey { x: usize },
    Halted,
}

/// What a call to `Engine::step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub state: State,
    /// the sound timer passed through 1 during this step (per-cycle timers only)
    pub tone: bool,
}

/// where the PC goes after an instruction
enum Flow {
    Next,
    Skip,
    Jump(u16),
    WaitKey(usize),
}

fn skip_if(cond: bool) -> Flow {
    if cond {
        Flow::Skip
    } else {
        Flow::Next
    }
}

pub struct Engine {
    machine: Machine,
    config: Config,
    rng: StdRng,
    state: State,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Engine {
            machine: Machine::new(),
            config,
            rng,
            state: State::Ready,
        })
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.machine.load(program)
    }

    pub fn reset(&mut self) {
        self.machine.reset();
        self.state = State::Ready;
    }

    /// stop for good; only the driver does this
    pub fn halt(&mut self) {
        debug!("halting at {:#05x}", self.machine.pc);
        self.state = State::Halted;
    }

    /// run one cycle
    pub fn step(&mut self) -> Result<Cycle> {
        match self.state {
            State::Halted => {
                return Ok(Cycle {
                    state: State::Halted,
                    tone: false,
                })
            }
            State::AwaitingKey { x } => self.resume_key_wait(x)?,
            State::Ready | State::Running => {
                self.state = State::Running;
                self.execute_next()?;
            }
        }

        let tone = match self.config.timers {
            TimerMode::PerCycle => self.machine.tick_timers(),
            TimerMode::FixedRate { .. } => false,
        };
        Ok(Cycle {
            state: self.state,
            tone,
        })
    }

    fn resume_key_wait(&mut self, x: usize) -> Result<()> {
        if let Some(key) = self.machine.keys.take_last_pressed() {
            debug!("key {:X} pressed, resuming", key);
            self.machine.v[x] = key;
            self.state = State::Running;
            self.set_pc(self.machine.pc as usize + INST_STEP as usize)?;
        }
        Ok(())
    }

    fn execute_next(&mut self) -> Result<()> {
        let pc = self.machine.pc;
        let inst = decode(self.machine.memory.get_word(pc)?);
        trace!("{:#05x}: {:04x}  {}", pc, inst.word, inst);

        match self.execute(inst)? {
            Flow::Next => self.set_pc(pc as usize + INST_STEP as usize),
            Flow::Skip => self.set_pc(pc as usize + 2 * INST_STEP as usize),
            Flow::Jump(addr) => self.set_pc(addr as usize),
            Flow::WaitKey(x) => {
                debug!("waiting for a key at {:#05x}", pc);
                self.state = State::AwaitingKey { x };
                Ok(())
            }
        }
    }

    /// the PC never leaves memory
    fn set_pc(&mut self, addr: usize) -> Result<()> {
        if addr >= CHIP8_RAM_SIZE_BYTES {
            return Err(Error::ProgramCounterOutOfRange { pc: addr });
        }
        self.machine.pc = addr as u16;
        Ok(())
    }

    fn execute(&mut self, inst: Instruction) -> Result<Flow> {
        let Operands { x, y, n, kk, nnn } = inst.operands;
        let m = &mut self.machine;
        let vx = m.v[x];
        let vy = m.v[y];

        use Opcode::*;
        let flow = match inst.opcode {
            ClearScreen => {
                m.screen.clear();
                Flow::Next
            }
            Return => Flow::Jump(m.stack.pop()?),
            Jump => Flow::Jump(nnn),
            Call => {
                m.stack.push(m.pc + INST_STEP)?;
                Flow::Jump(nnn)
            }
            SkipEqImm => skip_if(vx == kk),
            SkipNeImm => skip_if(vx != kk),
            SkipEqReg => skip_if(vx == vy),
            SkipNeReg => skip_if(vx != vy),
            SetImm => {
                m.v[x] = kk;
                Flow::Next
            }
            AddImm => {
                m.v[x] = vx.wrapping_add(kk);
                Flow::Next
            }
            SetReg => {
                m.v[x] = vy;
                Flow::Next
            }
            Or => {
                m.v[x] = vx | vy;
                Flow::Next
            }
            And => {
                m.v[x] = vx & vy;
                Flow::Next
            }
            Xor => {
                m.v[x] = vx ^ vy;
                Flow::Next
            }
            // the flag is written after the result, so VF as a target ends
            // up holding the flag
            AddReg => {
                let (sum, carry) = vx.overflowing_add(vy);
                m.v[x] = sum;
                m.v[FLAG_REGISTER] = carry as u8;
                Flow::Next
            }
            Sub => {
                m.v[x] = vx.wrapping_sub(vy);
                m.v[FLAG_REGISTER] = (vx > vy) as u8;
                Flow::Next
            }
            ShiftRight => {
                m.v[x] = vx >> 1;
                m.v[FLAG_REGISTER] = vx & 0x01;
                Flow::Next
            }
            SubN => {
                m.v[x] = vy.wrapping_sub(vx);
                m.v[FLAG_REGISTER] = (vy > vx) as u8;
                Flow::Next
            }
            ShiftLeft => {
                m.v[x] = vx << 1;
                m.v[FLAG_REGISTER] = vx >> 7;
                Flow::Next
            }
            SetIndex => {
                m.i = nnn;
                Flow::Next
            }
            JumpOffset => Flow::Jump(nnn + m.v[0] as u16),
            Random => {
                m.v[x] = self.rng.gen::<u8>() & kk;
                Flow::Next
            }
            Draw => {
                let sprite = m.memory.get_ro_slice(m.i, n as usize)?;
                let collision = m.screen.draw_sprite(vx, vy, sprite);
                m.v[FLAG_REGISTER] = collision as u8;
                Flow::Next
            }
            SkipKey => skip_if(m.keys.is_pressed(vx)),
            SkipNotKey => skip_if(!m.keys.is_pressed(vx)),
            GetDelay => {
                m.v[x] = m.delay_timer;
                Flow::Next
            }
            WaitKey => {
                // only a press after this point counts
                m.keys.take_last_pressed();
                Flow::WaitKey(x)
            }
            SetDelay => {
                m.delay_timer = vx;
                Flow::Next
            }
            SetSound => {
                m.sound_timer = vx;
                Flow::Next
            }
            AddIndex => {
                m.i = m.i.wrapping_add(vx as u16) & INDEX_MASK;
                Flow::Next
            }
            SetGlyph => {
                m.i = Chip8MemoryMap::glyph_addr(vx);
                Flow::Next
            }
            Bcd => {
                m.memory.write(&[vx / 100, vx / 10 % 10, vx % 10], m.i)?;
                Flow::Next
            }
            StoreRegs => {
                m.memory.write(&m.v[..=x], m.i)?;
                Flow::Next
            }
            LoadRegs => {
                let bytes = m.memory.get_ro_slice(m.i, x + 1)?;
                m.v[..=x].copy_from_slice(bytes);
                Flow::Next
            }
            Unknown => {
                if self.config.strict {
                    return Err(Error::UnimplementedOpcode {
                        word: inst.word,
                        pc: m.pc,
                    });
                }
                warn!(
                    "ignoring unknown opcode {:#06x} at {:#05x}",
                    inst.word, m.pc
                );
                Flow::Next
            }
        };
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyState;

    fn engine_with(config: Config, program: &[u16]) -> Engine {
        let mut e = Engine::new(config).unwrap();
        let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_be_bytes()).collect();
        e.load(&bytes).unwrap();
        e
    }

    fn engine(program: &[u16]) -> Engine {
        engine_with(
            Config {
                seed: Some(8),
                ..Config::default()
            },
            program,
        )
    }

    fn run(e: &mut Engine, steps: usize) {
        for _ in 0..steps {
            e.step().unwrap();
        }
    }

    fn v(e: &Engine, x: usize) -> u8 {
        e.machine().register(x)
    }

    #[test]
    fn test_ready_then_running() {
        let mut e = engine(&[0x6001]);
        assert_eq!(e.state(), State::Ready);
        let cycle = e.step().unwrap();
        assert_eq!(cycle.state, State::Running);
        assert_eq!(e.machine().pc(), 0x202);
    }

    #[test]
    fn test_set_and_add_imm() {
        let mut e = engine(&[0x6afe, 0x7a03, 0x6f07, 0x7f01]);
        run(&mut e, 2);
        assert_eq!(v(&e, 0xa), 0x01);
        // no flag effect
        assert_eq!(v(&e, 0xf), 0);
        run(&mut e, 2);
        assert_eq!(v(&e, 0xf), 0x08);
    }

    #[test]
    fn test_add_with_carry() {
        let mut e = engine(&[0x60c8, 0x6164, 0x8014, 0x6201, 0x8214]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 44); // 300 mod 256
        assert_eq!(v(&e, 0xf), 1);
        run(&mut e, 2);
        assert_eq!(v(&e, 2), 101);
        assert_eq!(v(&e, 0xf), 0);
    }

    #[test]
    fn test_sub_borrow() {
        let mut e = engine(&[0x6005, 0x610a, 0x8015]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 251);
        assert_eq!(v(&e, 0xf), 0);

        let mut e = engine(&[0x600a, 0x6105, 0x8015]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 5);
        assert_eq!(v(&e, 0xf), 1);

        // equal operands borrow nothing but Vx isn't greater either
        let mut e = engine(&[0x6007, 0x6107, 0x8015]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 0);
        assert_eq!(v(&e, 0xf), 0);
    }

    #[test]
    fn test_subn() {
        let mut e = engine(&[0x6005, 0x610a, 0x8017]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 5);
        assert_eq!(v(&e, 0xf), 1);

        let mut e = engine(&[0x600a, 0x6105, 0x8017]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 251);
        assert_eq!(v(&e, 0xf), 0);
    }

    #[test]
    fn test_shifts() {
        let mut e = engine(&[0x6381, 0x8306]);
        run(&mut e, 2);
        assert_eq!(v(&e, 3), 0x40);
        assert_eq!(v(&e, 0xf), 1);

        let mut e = engine(&[0x6381, 0x830e]);
        run(&mut e, 2);
        assert_eq!(v(&e, 3), 0x02);
        assert_eq!(v(&e, 0xf), 1);

        let mut e = engine(&[0x6342, 0x830e, 0x8306]);
        run(&mut e, 2);
        assert_eq!(v(&e, 3), 0x84);
        assert_eq!(v(&e, 0xf), 0);
        run(&mut e, 1);
        assert_eq!(v(&e, 3), 0x42);
        assert_eq!(v(&e, 0xf), 0);
    }

    #[test]
    fn test_flag_register_as_target() {
        // result then flag: VF ends up with the carry
        let mut e = engine(&[0x6fff, 0x6102, 0x8f14]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0xf), 1);
    }

    #[test]
    fn test_logic() {
        // V0 = 0xcc, V1 = 0xaa, then V0 op= V1
        for (op, expected) in [(0x8010, 0xaa), (0x8011, 0xee), (0x8012, 0x88), (0x8013, 0x66)] {
            let mut e = engine(&[0x60cc, 0x61aa, op, 0x6f05]);
            run(&mut e, 3);
            assert_eq!(v(&e, 0), expected, "{:04x}", op);
            assert_eq!(v(&e, 1), 0xaa);
            assert_eq!(v(&e, 0xf), 0);
        }
    }

    #[test]
    fn test_skips() {
        let cases: [(&[u16], u16); 8] = [
            (&[0x6023, 0x3023], 0x206),
            (&[0x6023, 0x3024], 0x204),
            (&[0x6023, 0x4023], 0x204),
            (&[0x6023, 0x4024], 0x206),
            (&[0x6023, 0x6123, 0x5010], 0x208),
            (&[0x6023, 0x6124, 0x5010], 0x206),
            (&[0x6023, 0x6123, 0x9010], 0x206),
            (&[0x6023, 0x6124, 0x9010], 0x208),
        ];
        for (program, pc) in cases {
            let mut e = engine(program);
            run(&mut e, program.len());
            assert_eq!(e.machine().pc(), pc, "{:04x?}", program);
        }
    }

    #[test]
    fn test_jump() {
        let mut e = engine(&[0x1456]);
        run(&mut e, 1);
        assert_eq!(e.machine().pc(), 0x456);
    }

    #[test]
    fn test_call_and_return() {
        // 0x200: call 0x206; 0x202: V0 = 1; 0x204: jump self; 0x206: return
        let mut e = engine(&[0x2206, 0x6001, 0x1204, 0x00ee]);
        run(&mut e, 1);
        assert_eq!(e.machine().pc(), 0x206);
        assert_eq!(e.machine().stack().depth(), 1);
        run(&mut e, 1);
        assert_eq!(e.machine().pc(), 0x202);
        assert!(e.machine().stack().is_empty());
        run(&mut e, 1);
        assert_eq!(v(&e, 0), 1);
    }

    #[test]
    fn test_return_with_empty_stack() {
        let mut e = engine(&[0x00ee]);
        assert!(matches!(e.step(), Err(Error::StackUnderflow)));
        assert_eq!(e.machine().pc(), 0x200);
    }

    #[test]
    fn test_call_depth_limit() {
        let mut e = engine(&[0x2200]);
        run(&mut e, 16);
        assert!(matches!(
            e.step(),
            Err(Error::StackOverflow { addr: 0x202 })
        ));
    }

    #[test]
    fn test_jump_offset() {
        let mut e = engine(&[0x6004, 0xb300]);
        run(&mut e, 2);
        assert_eq!(e.machine().pc(), 0x304);

        let mut e = engine(&[0x60ff, 0xbfff]);
        run(&mut e, 1);
        assert!(matches!(
            e.step(),
            Err(Error::ProgramCounterOutOfRange { pc: 0x10fe })
        ));
    }

    #[test]
    fn test_skip_off_the_end() {
        let mut e = engine(&[0x1ffe]);
        e.machine_mut().memory.write(&[0x30, 0x00], 0xffe).unwrap();
        run(&mut e, 1);
        assert!(matches!(
            e.step(),
            Err(Error::ProgramCounterOutOfRange { pc: 0x1002 })
        ));
    }

    #[test]
    fn test_fetch_off_the_end() {
        let mut e = engine(&[0x1fff]);
        run(&mut e, 1);
        assert!(matches!(
            e.step(),
            Err(Error::AddressOutOfRange { addr: 0x1000 })
        ));
    }

    #[test]
    fn test_random() {
        let mut e = engine(&[0xc000, 0xc10f, 0xc2ff]);
        run(&mut e, 3);
        assert_eq!(v(&e, 0), 0);
        assert!(v(&e, 1) <= 0x0f);

        // same seed, same numbers
        let mut again = engine(&[0xc000, 0xc10f, 0xc2ff]);
        run(&mut again, 3);
        assert_eq!(e.machine().registers(), again.machine().registers());
    }

    #[test]
    fn test_draw_collision() {
        let mut e = engine(&[0x6008, 0x6103, 0xa300, 0xd011, 0xd011]);
        e.machine_mut().memory.write(&[0xff], 0x300).unwrap();
        run(&mut e, 4);
        assert_eq!(v(&e, 0xf), 0);
        assert!((8..16).all(|x| e.machine().screen().pixel(x, 3)));
        assert!(e.machine().screen().is_dirty());

        e.machine_mut().screen_mut().clear_dirty();
        run(&mut e, 1);
        assert_eq!(v(&e, 0xf), 1);
        assert!(e.machine().screen().as_bytes().iter().all(|&b| b == 0));
        assert!(e.machine().screen().is_dirty());
    }

    #[test]
    fn test_draw_reads_past_memory() {
        let mut e = engine(&[0xaffe, 0xd005]);
        run(&mut e, 1);
        assert!(matches!(
            e.step(),
            Err(Error::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn test_clear_screen() {
        let mut e = engine(&[0x00e0]);
        e.machine_mut().screen_mut().draw_sprite(0, 0, &[0xff]);
        e.machine_mut().screen_mut().clear_dirty();
        run(&mut e, 1);
        assert!(!e.machine().screen().pixel(0, 0));
        assert!(e.machine().screen().is_dirty());
    }

    #[test]
    fn test_glyph_on_screen() {
        // V1 = 5, V2 = 10, I = glyph 2, draw 5 rows, spin
        let mut e = engine(&[0x6105, 0x620a, 0xa00a, 0xd125, 0x1208]);
        run(&mut e, 4);
        let screen = e.machine().screen();
        assert!(screen.is_dirty());
        let glyph = [0xf0u8, 0x10, 0xf0, 0x80, 0xf0];
        for y in 0..32 {
            for x in 0..64 {
                let expected = (5..13).contains(&x)
                    && (10..15).contains(&y)
                    && glyph[y - 10] & (0x80 >> (x - 5)) != 0;
                assert_eq!(screen.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }

        run(&mut e, 3);
        assert_eq!(e.machine().pc(), 0x208);
    }

    #[test]
    fn test_skip_on_key() {
        let mut e = engine(&[0x6007, 0xe09e, 0x0000, 0xe0a1]);
        e.machine_mut().keys_mut().update(&KeyState::pressed(0x7));
        run(&mut e, 2);
        assert_eq!(e.machine().pc(), 0x206);
        run(&mut e, 1);
        // key still down, so no skip
        assert_eq!(e.machine().pc(), 0x208);

        let mut e = engine(&[0x6007, 0xe0a1]);
        run(&mut e, 2);
        assert_eq!(e.machine().pc(), 0x206);
    }

    #[test]
    fn test_wait_for_key() {
        let mut e = engine(&[0xf30a, 0x6001]);
        // a press from before the wait doesn't count
        e.machine_mut().keys_mut().update(&KeyState::pressed(0x2));
        let cycle = e.step().unwrap();
        assert_eq!(cycle.state, State::AwaitingKey { x: 3 });
        for _ in 0..5 {
            assert_eq!(e.step().unwrap().state, State::AwaitingKey { x: 3 });
            assert_eq!(e.machine().pc(), 0x200);
            assert_eq!(v(&e, 0), 0);
        }

        e.machine_mut().keys_mut().update(&KeyState::pressed(0xb));
        assert_eq!(e.step().unwrap().state, State::Running);
        assert_eq!(v(&e, 3), 0xb);
        assert_eq!(e.machine().pc(), 0x202);
        run(&mut e, 1);
        assert_eq!(v(&e, 0), 1);
    }

    #[test]
    fn test_timer_registers() {
        let mut e = engine(&[0x6509, 0xf515, 0xf518, 0xf607]);
        run(&mut e, 3);
        assert_eq!(e.machine().delay_timer(), 9);
        assert_eq!(e.machine().sound_timer(), 9);
        // fixed rate timers don't move with cycles
        run(&mut e, 1);
        assert_eq!(v(&e, 6), 9);
    }

    #[test]
    fn test_per_cycle_timers() {
        let config = Config {
            timers: TimerMode::PerCycle,
            seed: Some(1),
            ..Config::default()
        };
        let mut e = engine_with(config, &[0x6502, 0xf518, 0x1204]);
        run(&mut e, 2);
        // ticked straight after being set
        assert_eq!(e.machine().sound_timer(), 1);
        let cycle = e.step().unwrap();
        assert!(cycle.tone);
        assert_eq!(e.machine().sound_timer(), 0);
        assert!(!e.step().unwrap().tone);
    }

    #[test]
    fn test_index_ops() {
        let mut e = engine(&[0xafff, 0x6002, 0xf01e]);
        run(&mut e, 3);
        assert_eq!(e.machine().index(), 0x001);

        let mut e = engine(&[0x601a, 0xf029]);
        run(&mut e, 2);
        assert_eq!(e.machine().index(), 0x032);
    }

    #[test]
    fn test_bcd() {
        let mut e = engine(&[0x60ff, 0xa300, 0xf033, 0x6109, 0xf133]);
        run(&mut e, 3);
        assert_eq!(e.machine().memory().get_ro_slice(0x300, 3).unwrap(), &[2, 5, 5]);
        run(&mut e, 2);
        assert_eq!(e.machine().memory().get_ro_slice(0x300, 3).unwrap(), &[0, 0, 9]);
    }

    #[test]
    fn test_bcd_past_memory() {
        let mut e = engine(&[0xaffe, 0xf033]);
        run(&mut e, 1);
        assert!(matches!(
            e.step(),
            Err(Error::AddressOutOfRange { addr: 0x1000 })
        ));
    }

    #[test]
    fn test_store_and_load_registers() {
        let mut e = engine(&[0x6011, 0x6122, 0x6233, 0x6344, 0xa300, 0xf255]);
        run(&mut e, 6);
        assert_eq!(
            e.machine().memory().get_ro_slice(0x300, 4).unwrap(),
            &[0x11, 0x22, 0x33, 0x00]
        );
        // I is left where it was
        assert_eq!(e.machine().index(), 0x300);

        let mut e = engine(&[0xa300, 0xf165]);
        e.machine_mut().memory.write(&[0xaa, 0xbb, 0xcc], 0x300).unwrap();
        run(&mut e, 2);
        assert_eq!(&e.machine().registers()[..3], &[0xaa, 0xbb, 0x00]);
    }

    #[test]
    fn test_unknown_opcode_lenient() {
        let mut e = engine(&[0x8128, 0x6001]);
        run(&mut e, 1);
        assert_eq!(e.machine().pc(), 0x202);
        run(&mut e, 1);
        assert_eq!(v(&e, 0), 1);
    }

    #[test]
    fn test_unknown_opcode_strict() {
        let config = Config {
            strict: true,
            seed: Some(1),
            ..Config::default()
        };
        let mut e = engine_with(config, &[0x6001, 0xf0ff]);
        run(&mut e, 1);
        assert!(matches!(
            e.step(),
            Err(Error::UnimplementedOpcode {
                word: 0xf0ff,
                pc: 0x202
            })
        ));
    }

    #[test]
    fn test_halted_does_nothing() {
        let mut e = engine(&[0x6001]);
        e.halt();
        let cycle = e.step().unwrap();
        assert_eq!(cycle.state, State::Halted);
        assert_eq!(e.machine().pc(), 0x200);
        assert_eq!(v(&e, 0), 0);
    }

    #[test]
    fn test_reset_returns_to_ready() {
        let mut e = engine(&[0x6001, 0x1200]);
        run(&mut e, 2);
        e.reset();
        assert_eq!(e.state(), State::Ready);
        assert_eq!(v(&e, 0), 0);
        run(&mut e, 1);
        assert_eq!(v(&e, 0), 1);
    }
}
