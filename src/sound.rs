use crate::error::{Error, Result};
use beep::beep;

pub trait Sound {
    fn beep(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    fn is_beeping(&self) -> bool;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// beeps through the PC speaker
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<()> {
        beep(SIMPLEBEEP_PITCH).map_err(|e| Error::Sound(e.to_string()))?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        beep(0).map_err(|e| Error::Sound(e.to_string()))?;
        self.is_beeping = false;
        Ok(())
    }

    fn is_beeping(&self) -> bool {
        self.is_beeping
    }
}

/// keeps count of the beeps it didn't make
#[derive(Debug, Default)]
pub struct Mute {
    pub beeps: usize,
    is_beeping: bool,
}

impl Mute {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<()> {
        self.beeps += 1;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.is_beeping = false;
        Ok(())
    }

    fn is_beeping(&self) -> bool {
        self.is_beeping
    }
}
