//! Plain ANSI renderer for the event panel.

mod layout;

pub use layout::{Line, layout};

use owo_colors::{AnsiColors, OwoColorize};
use parking_lot::Mutex;
use relaywatch_core::entry::Color;
use relaywatch_core::view::{Frame, Renderer};
use std::io::{self, Write};

const DEFAULT_SIZE: (usize, usize) = (80, 24);

pub struct TerminalRenderer {
    size: (usize, usize),
    out: Mutex<io::Stdout>,
}

impl TerminalRenderer {
    /// Sized from `COLUMNS` and `LINES`, falling back to 80x24.
    pub fn from_env() -> Self {
        let dimension = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
        };

        Self {
            size: (
                dimension("COLUMNS").unwrap_or(DEFAULT_SIZE.0),
                dimension("LINES").unwrap_or(DEFAULT_SIZE.1),
            ),
            out: Mutex::new(io::stdout()),
        }
    }

    pub fn hide_cursor(&self) {
        let mut out = self.out.lock();
        let _ = write!(out, "\x1b[?25l");
        let _ = out.flush();
    }

    pub fn restore_cursor(&self) {
        let mut out = self.out.lock();
        let _ = write!(out, "\x1b[?25h");
        let _ = out.flush();
    }
}

impl Renderer for TerminalRenderer {
    fn size(&self) -> (usize, usize) {
        self.size
    }

    fn draw(&self, frame: &Frame) -> usize {
        let lines = layout(frame);
        let rows = frame.height.saturating_sub(1);

        let mut screen = String::from("\x1b[2J\x1b[H");
        screen.push_str(&frame.title.bold().to_string());
        screen.push('\n');
        for line in lines.iter().skip(frame.scroll).take(rows) {
            screen.push_str(&line.text.color(ansi(line.color)).to_string());
            screen.push('\n');
        }

        let mut out = self.out.lock();
        let _ = out.write_all(screen.as_bytes());
        let _ = out.flush();

        lines.len()
    }
}

fn ansi(color: Color) -> AnsiColors {
    match color {
        Color::White => AnsiColors::White,
        Color::Red => AnsiColors::Red,
        Color::Green => AnsiColors::Green,
        Color::Yellow => AnsiColors::Yellow,
        Color::Blue => AnsiColors::Blue,
        Color::Cyan => AnsiColors::Cyan,
        Color::Magenta => AnsiColors::Magenta,
    }
}
