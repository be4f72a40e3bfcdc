use crate::mach::{Console, CR};
use std::collections::VecDeque;

/// A console that keeps everything in memory. Input lines and key
/// presses are queued ahead of time; screen and graphics calls are
/// recorded as text.
#[derive(Debug, Default)]
pub struct BufferConsole {
    output: String,
    lines: VecDeque<String>,
    keys: VecDeque<char>,
    prepopulated: Vec<String>,
    calls: Vec<String>,
    mouse: (f64, f64, f64),
    interrupted: bool,
}

impl BufferConsole {
    pub fn new() -> BufferConsole {
        BufferConsole::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Queue a line for the next `input`.
    pub fn push_line(&mut self, line: &str) {
        self.lines.push_back(line.to_string());
    }

    pub fn push_key(&mut self, ch: char) {
        self.keys.push_back(ch);
    }

    /// Text each `input` call started with.
    pub fn prepopulated(&self) -> &[String] {
        &self.prepopulated
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn set_mouse(&mut self, x: f64, y: f64, button: f64) {
        self.mouse = (x, y, button);
    }

    pub fn raise_break(&mut self) {
        self.interrupted = true;
    }

    fn call(&mut self, s: String) {
        self.calls.push(s);
    }
}

fn points_text(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join(";")
}

impl Console for BufferConsole {
    fn print(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn put(&mut self, code: u32) {
        if code == CR {
            self.output.push('\n');
        } else if let Some(ch) = std::char::from_u32(code) {
            self.output.push(ch);
        }
    }

    fn input(&mut self, prepopulated: &str) -> Option<String> {
        self.prepopulated.push(prepopulated.to_string());
        self.lines.pop_front()
    }

    fn get(&mut self) -> Option<char> {
        self.keys.pop_front()
    }

    fn select_output(&mut self, writing_area: Option<i32>, channel: Option<i32>) {
        self.call(format!("SELECT {:?} {:?}", writing_area, channel));
    }

    fn cls(&mut self) {
        self.call("CLS".to_string());
    }

    fn set_mode(&mut self, columns: u32) {
        self.call(format!("MODE {}", columns));
    }

    fn set_paper(&mut self, colour: i32) {
        self.call(format!("PAPER {}", colour));
    }

    fn set_border(&mut self, colour: i32) {
        self.call(format!("BORDER {}", colour));
    }

    fn set_pen(&mut self, colour: i32) {
        self.call(format!("PEN {}", colour));
    }

    fn set_curpos(&mut self, column: i32, row: i32) {
        self.call(format!("CURPOS {},{}", column, row));
    }

    fn set_cursor(&mut self, mode: i32, ch: Option<i32>, set: Option<i32>) {
        self.call(format!("CURSOR {} {:?} {:?}", mode, ch, set));
    }

    fn set_colour(&mut self, slot: i32, colour: i32) {
        self.call(format!("COLOUR {} {}", slot, colour));
    }

    fn ink(&mut self, colour: i32) {
        self.call(format!("INK {}", colour));
    }

    fn home(&mut self) {
        self.call("HOME".to_string());
    }

    fn plot(&mut self, text: &str, x: f64, y: f64) {
        self.call(format!("PLOT {} {},{}", text, x, y));
    }

    fn line(&mut self, points: &[(f64, f64)]) {
        self.call(format!("LINE {}", points_text(points)));
    }

    fn area(&mut self, points: &[(f64, f64)]) {
        self.call(format!("AREA {}", points_text(points)));
    }

    fn points(&mut self, points: &[(f64, f64)]) {
        self.call(format!("POINTS {}", points_text(points)));
    }

    fn circle(&mut self, radius: f64, x: f64, y: f64) {
        self.call(format!("CIRCLE {} {},{}", radius, x, y));
    }

    fn flood(&mut self, x: f64, y: f64) {
        self.call(format!("FLOOD {},{}", x, y));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.call(format!("MOVE {},{}", x, y));
    }

    fn ask_mouse(&mut self) -> (f64, f64, f64) {
        self.mouse
    }

    fn break_raised(&self) -> bool {
        self.interrupted
    }

    fn reset_break(&mut self) {
        self.interrupted = false;
    }
}
