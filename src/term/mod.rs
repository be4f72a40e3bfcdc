/*!
## Terminal Module

Console backends. [`TermConsole`] drives a real terminal: lines are
read with `linefeed`, single keys and screen control go through
`mortal`, and Ctrl-C raises the BREAK flag. [`BufferConsole`] keeps
everything in memory.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
extern crate mortal;

mod buffer;

pub use buffer::BufferConsole;

use crate::mach::{Console, Event, Runtime, CR};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use mortal::{Color, CursorMode, Key, PrepareConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Command line settings.
#[derive(Debug, Default)]
pub struct Config {
    pub warn: bool,
    pub program: Option<String>,
}

pub fn main(config: Config) -> i32 {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl-C handler: {}", error);
        return 1;
    }
    let console = match TermConsole::new(interrupted) {
        Ok(console) => console,
        Err(error) => {
            eprintln!("{}", error);
            return 1;
        }
    };
    let mut runtime = Runtime::new(console);
    runtime.set_warning_mode(config.warn);
    if let Some(filename) = config.program {
        match runtime.load(&filename) {
            Ok(()) => {
                if let Event::Bye = runtime.run() {
                    return 0;
                }
            }
            Err(error) => runtime
                .console_mut()
                .diagnostic(&format!("Syntax error: {}", error)),
        }
    }
    runtime.repl()
}

pub struct TermConsole {
    interface: Interface<DefaultTerminal>,
    screen: Option<mortal::Terminal>,
    interrupted: Arc<AtomicBool>,
    pending: String,
}

impl TermConsole {
    pub fn new(interrupted: Arc<AtomicBool>) -> std::io::Result<TermConsole> {
        let interface = Interface::new("RM Basic")?;
        interface.set_report_signal(Signal::Interrupt, true);
        Ok(TermConsole {
            interface,
            screen: mortal::Terminal::new().ok(),
            interrupted,
            pending: String::new(),
        })
    }

    /// Write out text held back for the next prompt.
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let _ = self.interface.write_fmt(format_args!("{}", self.pending));
            self.pending.clear();
        }
    }

    fn read_line(&mut self, prepopulated: &str) -> std::io::Result<ReadResult> {
        if prepopulated.is_empty() {
            return self.interface.read_line();
        }
        if let Some(result) = self
            .interface
            .read_line_step(Some(std::time::Duration::from_millis(0)))?
        {
            return Ok(result);
        }
        self.interface.set_buffer(prepopulated)?;
        loop {
            if let Some(result) = self.interface.read_line_step(None)? {
                return Ok(result);
            }
        }
    }

    fn read_key(&mut self) -> std::io::Result<Option<char>> {
        let screen = match &self.screen {
            Some(screen) => screen,
            None => return Ok(None),
        };
        let state = screen.prepare(PrepareConfig::default())?;
        let mut key = None;
        loop {
            if let Some(mortal::Event::Key(k)) = screen.read_event(None)? {
                match k {
                    Key::Char(ch) => key = Some(ch),
                    Key::Enter => key = Some('\r'),
                    Key::Backspace => key = Some('\u{8}'),
                    Key::Tab => key = Some('\t'),
                    Key::Escape => key = Some('\u{1b}'),
                    Key::Ctrl('c') => self.interrupted.store(true, Ordering::SeqCst),
                    _ => continue,
                }
                break;
            }
        }
        screen.restore(state)?;
        Ok(key)
    }

    fn with_screen<F>(&mut self, f: F)
    where
        F: FnOnce(&mortal::Terminal) -> std::io::Result<()>,
    {
        self.flush();
        if let Some(screen) = &self.screen {
            let _ = f(screen);
        }
    }
}

/// Terminals only move relative to the cursor, so go to the top
/// left corner first.
fn move_cursor(screen: &mortal::Terminal, to: mortal::Cursor) -> std::io::Result<()> {
    let size = screen.size()?;
    let to = clamp_cursor(size, to);
    screen.move_up(size.lines)?;
    screen.move_to_first_column()?;
    screen.move_down(to.line)?;
    screen.move_right(to.column)
}

fn clamp_cursor(size: mortal::Size, to: mortal::Cursor) -> mortal::Cursor {
    mortal::Cursor {
        line: to.line.min(size.lines.saturating_sub(1)),
        column: to.column.min(size.columns.saturating_sub(1)),
    }
}

/// The Nimbus palette folded onto eight terminal colours.
fn colour(n: i32) -> Color {
    match n.rem_euclid(8) {
        0 => Color::Black,
        1 => Color::Blue,
        2 => Color::Red,
        3 => Color::Magenta,
        4 => Color::Green,
        5 => Color::Cyan,
        6 => Color::Yellow,
        _ => Color::White,
    }
}

impl Console for TermConsole {
    fn print(&mut self, s: &str) {
        self.pending.push_str(s);
    }

    fn put(&mut self, code: u32) {
        if code == CR {
            let _ = self
                .interface
                .write_fmt(format_args!("{}\n", self.pending));
            self.pending.clear();
        } else if let Some(ch) = std::char::from_u32(code) {
            self.pending.push(ch);
        }
    }

    fn input(&mut self, prepopulated: &str) -> Option<String> {
        let prompt = std::mem::take(&mut self.pending);
        if self.interface.set_prompt(&prompt).is_err() {
            return None;
        }
        match self.read_line(prepopulated) {
            Ok(ReadResult::Input(string)) => {
                if !string.trim().is_empty() {
                    self.interface.add_history_unique(string.clone());
                }
                Some(string)
            }
            Ok(ReadResult::Signal(Signal::Interrupt)) => {
                let _ = self.interface.set_buffer("");
                let _ = self.interface.lock_reader().cancel_read_line();
                self.interrupted.store(true, Ordering::SeqCst);
                None
            }
            Ok(_) | Err(_) => None,
        }
    }

    fn get(&mut self) -> Option<char> {
        self.flush();
        self.read_key().ok().flatten()
    }

    fn cls(&mut self) {
        self.with_screen(|s| s.clear_screen());
    }

    fn set_mode(&mut self, _columns: u32) {
        self.cls();
    }

    fn set_paper(&mut self, n: i32) {
        self.with_screen(|s| s.set_bg(colour(n)));
    }

    fn set_border(&mut self, _colour: i32) {}

    fn set_pen(&mut self, n: i32) {
        self.with_screen(|s| s.set_fg(colour(n)));
    }

    fn set_curpos(&mut self, column: i32, row: i32) {
        let to = mortal::Cursor {
            line: row.max(1) as usize - 1,
            column: column.max(1) as usize - 1,
        };
        self.with_screen(|s| move_cursor(s, to));
    }

    fn set_cursor(&mut self, mode: i32, _ch: Option<i32>, _set: Option<i32>) {
        let mode = if mode == 0 {
            CursorMode::Invisible
        } else {
            CursorMode::Normal
        };
        self.with_screen(|s| s.set_cursor_mode(mode));
    }

    fn set_colour(&mut self, _slot: i32, _colour: i32) {}

    fn ink(&mut self, n: i32) {
        self.set_pen(n);
    }

    fn home(&mut self) {
        self.with_screen(|s| move_cursor(s, mortal::Cursor::first()));
    }

    fn plot(&mut self, text: &str, _x: f64, _y: f64) {
        self.print(text);
        self.flush();
    }

    fn line(&mut self, _points: &[(f64, f64)]) {}

    fn area(&mut self, _points: &[(f64, f64)]) {}

    fn points(&mut self, _points: &[(f64, f64)]) {}

    fn circle(&mut self, _radius: f64, _x: f64, _y: f64) {}

    fn flood(&mut self, _x: f64, _y: f64) {}

    fn move_to(&mut self, _x: f64, _y: f64) {}

    fn ask_mouse(&mut self) -> (f64, f64, f64) {
        (0.0, 0.0, 0.0)
    }

    fn break_raised(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn reset_break(&mut self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }

    fn diagnostic(&mut self, s: &str) {
        self.flush();
        let _ = self
            .interface
            .write_fmt(format_args!("{}\n", Style::new().bold().paint(s)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortal::{Cursor, Size};

    #[test]
    fn test_clamp_cursor() {
        let size = Size {
            lines: 25,
            columns: 80,
        };
        let inside = Cursor { line: 3, column: 7 };
        assert_eq!(clamp_cursor(size, inside), inside);
        let outside = Cursor {
            line: 40,
            column: 100,
        };
        assert_eq!(clamp_cursor(size, outside), Cursor { line: 24, column: 79 });
        assert_eq!(clamp_cursor(size, Cursor::first()), Cursor::first());
    }
}
