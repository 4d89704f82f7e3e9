use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::{Duration, Instant};

/// how many keys on the COSMAC VIP hex keypad
pub const KEY_COUNT: usize = 16;

/// map of keys read from the keyboard to what the chip8 might expect, using
/// the left-hand side of a qwerty keyboard:
///
/// ```text
///   1 2 3 4        1 2 3 C
///   q w e r   =>   4 5 6 D
///   a s d f        7 8 9 E
///   z x c v        A 0 B F
/// ```
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); KEY_COUNT] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// terminals only report presses, so a key counts as held for this long after
/// the last press (auto-repeat keeps it alive while the key stays down)
const KEY_HOLD: Duration = Duration::from_millis(120);

/// What an input provider reports on each poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub keys: [bool; KEY_COUNT],
    /// the most recent key to go down since the previous poll, if any
    pub last_pressed: Option<u8>,
    pub quit: bool,
}

impl KeyState {
    /// `key` is down and has just been pressed
    pub fn pressed(key: u8) -> Self {
        let mut state = KeyState::default();
        state.keys[(key & 0x0f) as usize] = true;
        state.last_pressed = Some(key & 0x0f);
        state
    }

    pub fn quit() -> Self {
        KeyState {
            quit: true,
            ..KeyState::default()
        }
    }
}

/// The machine's view of the keypad. Written only from input polls; read by
/// the key opcodes.
#[derive(Debug, Clone, Default)]
pub struct KeyLatch {
    keys: [bool; KEY_COUNT],
    last_pressed: Option<u8>,
}

impl KeyLatch {
    /// take on a fresh poll result; a press event is remembered until the
    /// key-wait opcode consumes it or the next one replaces it
    pub fn update(&mut self, state: &KeyState) {
        self.keys = state.keys;
        if let Some(key) = state.last_pressed {
            self.last_pressed = Some(key & 0x0f);
        }
    }

    /// keys above 0xF don't exist, so are never down
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn take_last_pressed(&mut self) -> Option<u8> {
        self.last_pressed.take()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// reads keypresses
pub trait Input {
    /// report which keys are down, the latest press and whether the user wants out
    fn poll(&mut self) -> Result<KeyState, io::Error>;

    /// give the terminal back
    fn shutdown(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

/// simple implementation of Input, using crossterm events from STDIN
pub struct StdinInput {
    keymap: HashMap<char, u8>,
    held_until: [Option<Instant>; KEY_COUNT],
    raw: bool,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held_until: [None; KEY_COUNT],
            raw: true,
        })
    }

    fn read_stdin(&mut self, now: Instant, state: &mut KeyState) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Esc, ..
                }) => state.quit = true,
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers,
                    ..
                }) if modifiers.contains(KeyModifiers::CONTROL) => state.quit = true,
                Event::Key(KeyEvent {
                    code: KeyCode::Char(key),
                    ..
                }) => match self.keymap.get(&key.to_ascii_lowercase()) {
                    Some(&mapped_key) => {
                        self.held_until[mapped_key as usize] = Some(now + KEY_HOLD);
                        state.last_pressed = Some(mapped_key);
                    }
                    None => warn!("can't map {:?} to a COSMAC key", key),
                },
                Event::Key(evt) => debug!("ignoring key event {:?}", evt),
                _ => (),
            }
        }
        Ok(())
    }
}

impl Input for StdinInput {
    fn poll(&mut self) -> Result<KeyState, io::Error> {
        let now = Instant::now();
        let mut state = KeyState::default();
        self.read_stdin(now, &mut state)?;
        for (down, until) in state.keys.iter_mut().zip(self.held_until.iter_mut()) {
            match until {
                Some(t) if *t > now => *down = true,
                _ => *until = None,
            }
        }
        Ok(state)
    }

    fn shutdown(&mut self) -> Result<(), io::Error> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("couldn't restore terminal: {}", e);
        }
    }
}

/// dummy Input implementation for testing: hands out a script of poll
/// results, then nothing but idle polls
#[derive(Debug, Default)]
pub struct DummyInput {
    script: VecDeque<KeyState>,
    pub polls: usize,
}

impl DummyInput {
    pub fn new(script: &[KeyState]) -> Self {
        DummyInput {
            script: script.iter().copied().collect(),
            polls: 0,
        }
    }

    pub fn push(&mut self, state: KeyState) {
        self.script.push_back(state);
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<KeyState, io::Error> {
        self.polls += 1;
        Ok(self.script.pop_front().unwrap_or_default())
    }
}
