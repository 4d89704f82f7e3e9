mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use chip8vm::display::{Display, MonoTermDisplay, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8vm::input::{Input, StdinInput};
use chip8vm::program::FileSource;
use chip8vm::sound::{Mute, SimpleBeep, Sound};
use chip8vm::{stop_signal, Chip8Interpreter};
use clap::Parser;
use cli::Cli;
use log::{error, info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};

/// display, input or sound wouldn't start or wouldn't let go
const EXIT_DEVICE_FAILURE: u8 = 1;
/// the program itself did something impossible
const EXIT_EMULATION_FAULT: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let stop = stop_signal();
    for sig in [SIGINT, SIGTERM] {
        if let Err(e) = signal_hook::flag::register(sig, Arc::clone(&stop)) {
            warn!("can't watch for signal {}: {}", sig, e);
        }
    }

    // initialise
    let mut display = match MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT) {
        Ok(d) => d,
        Err(e) => {
            error!("display initialisation failed: {}", e);
            return ExitCode::from(EXIT_DEVICE_FAILURE);
        }
    };
    let mut input = match StdinInput::new() {
        Ok(i) => i,
        Err(e) => {
            error!("input initialisation failed: {}", e);
            if let Err(e) = display.shutdown() {
                error!("display teardown failed: {}", e);
            }
            return ExitCode::from(EXIT_DEVICE_FAILURE);
        }
    };
    let mut sound: Box<dyn Sound> = if cli.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };

    let mut code = ExitCode::SUCCESS;
    match Chip8Interpreter::new(
        cli.config(),
        &mut display,
        &mut input,
        sound.as_mut(),
        Arc::clone(&stop),
    ) {
        Ok(mut interpreter) => {
            // load a program; without one there's nothing to run, but we
            // still tidy up below
            match interpreter.load_program(&mut FileSource::new(&cli.rom)) {
                Ok(()) => {
                    info!("running {}", cli.rom.display());
                    if let Err(e) = interpreter.main_loop(cli.cycles) {
                        error!("emulation stopped: {}", e);
                        code = ExitCode::from(EXIT_EMULATION_FAULT);
                    }
                }
                Err(e) => error!("can't load {}: {}", cli.rom.display(), e),
            }
        }
        Err(e) => {
            error!("bad configuration: {}", e);
            code = ExitCode::from(EXIT_EMULATION_FAULT);
        }
    }

    // shutdown
    let mut teardown_ok = true;
    if sound.is_beeping() {
        if let Err(e) = sound.stop() {
            error!("sound teardown failed: {}", e);
            teardown_ok = false;
        }
    }
    if let Err(e) = input.shutdown() {
        error!("input teardown failed: {}", e);
        teardown_ok = false;
    }
    if let Err(e) = display.shutdown() {
        error!("display teardown failed: {}", e);
        teardown_ok = false;
    }

    if teardown_ok {
        code
    } else {
        ExitCode::from(EXIT_DEVICE_FAILURE)
    }
}
