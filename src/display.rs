use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
/// one bit per pixel, MSB is leftmost
pub const DISPLAY_BYTES: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

/// The 64x32 monochrome pixel buffer, packed row-major one bit per pixel,
/// plus a dirty flag so the presenter only redraws when something changed.
///
/// Sprites wrap: a sprite drawn across the right or bottom edge reappears on
/// the opposite side, and start coordinates are taken modulo the grid size.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    bits: [u8; DISPLAY_BYTES],
    dirty: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            bits: [0; DISPLAY_BYTES],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.bits = [0; DISPLAY_BYTES];
        self.dirty = true;
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let (byte, mask) = Self::locate(x, y);
        self.bits[byte] & mask != 0
    }

    /// XOR an 8-pixel-wide sprite into the buffer; true if any lit pixel was
    /// switched off
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, &line) in sprite.iter().enumerate() {
            for col in 0..8 {
                if line & (0x80 >> col) == 0 {
                    continue;
                }
                let (byte, mask) = Self::locate(x as usize + col, y as usize + row);
                collision |= self.bits[byte] & mask != 0;
                self.bits[byte] ^= mask;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn locate(x: usize, y: usize) -> (usize, u8) {
        let idx = (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH);
        (idx / 8, 0x80 >> (idx % 8))
    }
}

/// Display is used by the interpreter to draw things on the screen. It should
/// abstract the implementation details, so a variety of kinds of screen would
/// work.
pub trait Display {
    /// draw data based on internal resolution of display
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error>;

    /// give the screen back to whoever had it before us
    fn shutdown(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

/// hand the buffer to the display if it has changed since last time; true if
/// a frame was drawn
pub fn present(display: &mut dyn Display, buffer: &mut FrameBuffer) -> Result<bool, io::Error> {
    if !buffer.is_dirty() {
        return Ok(false);
    }
    display.draw(buffer.as_bytes())?;
    buffer.clear_dirty();
    Ok(true)
}

// store useful metadata about the terminal
struct Resolution(usize, usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn byte_count(&self) -> usize {
        self.0 * self.1 * self.2 / 8
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    fn bitplane_from_data<'a>(
        &self,
        data: &'a [u8],
        bitplane: u8,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let mut count = self.pixel_count();
        let w = self.0;
        std::iter::from_fn(move || {
            while count > 0 {
                count -= 1;
                let bit = 1 & (data[count / 8] >> (7 - count % 8));
                if bit == bitplane {
                    return Some((
                        (count % w) as f64,        // x
                        -1.0 * (count / w) as f64, // y
                    ));
                }
            }
            None
        })
    }
}

/// monochrome display in a terminal, rendered using TUI and crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize) -> Result<MonoTermDisplay, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y, 1),
        })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        if data.len() != self.resolution.byte_count() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "MonoTermDisplay needs {} bytes to draw, got {}",
                    self.resolution.byte_count(),
                    data.len()
                ),
            ));
        }

        // for now this assumes a 1:1 ratio between terminal, chip8 and the
        // internal TUI canvas
        let resolution = &self.resolution;
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + resolution.0 as u16, 2 + resolution.1 as u16);

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(resolution.x_bounds())
                .y_bounds(resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    // lit pixels only; the block background covers the rest
                    ctx.draw(&Points {
                        coords: &resolution.bitplane_from_data(data, 1).collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), io::Error> {
        self.terminal.clear()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
        Ok(())
    }
}

/// useful for testing non-display routines; remembers what it was asked to draw
#[derive(Debug, Default)]
pub struct DummyDisplay {
    pub frames: Vec<Vec<u8>>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error> {
        self.frames.push(data.to_vec());
        Ok(())
    }
}
