/// Carriage return for [`Console::put`].
pub const CR: u32 = 13;

/// ## Console capability
///
/// Everything the interpreter shows or asks for goes through here.
/// Graphics calls receive already evaluated arguments; a backend with
/// no screen may ignore them.
pub trait Console {
    /// Append text without a newline.
    fn print(&mut self, s: &str);

    /// Emit one character code; `CR` ends the line.
    fn put(&mut self, code: u32);

    /// Block until a line is submitted. The edit buffer starts with
    /// `prepopulated`. `None` when input is closed or interrupted.
    fn input(&mut self, prepopulated: &str) -> Option<String>;

    /// Wait for one key press.
    fn get(&mut self) -> Option<char>;

    /// Direct PRINT output to a writing area (`~n`) or channel (`#n`).
    fn select_output(&mut self, _writing_area: Option<i32>, _channel: Option<i32>) {}

    fn cls(&mut self);
    fn set_mode(&mut self, columns: u32);
    fn set_paper(&mut self, colour: i32);
    fn set_border(&mut self, colour: i32);
    fn set_pen(&mut self, colour: i32);
    fn set_curpos(&mut self, column: i32, row: i32);
    fn set_cursor(&mut self, mode: i32, ch: Option<i32>, set: Option<i32>);
    fn set_colour(&mut self, slot: i32, colour: i32);
    fn ink(&mut self, colour: i32);
    fn home(&mut self);

    fn plot(&mut self, text: &str, x: f64, y: f64);
    fn line(&mut self, points: &[(f64, f64)]);
    fn area(&mut self, points: &[(f64, f64)]);
    fn points(&mut self, points: &[(f64, f64)]);
    fn circle(&mut self, radius: f64, x: f64, y: f64);
    fn flood(&mut self, x: f64, y: f64);
    fn move_to(&mut self, x: f64, y: f64);

    /// Mouse position and button state.
    fn ask_mouse(&mut self) -> (f64, f64, f64);

    fn break_raised(&self) -> bool;
    fn reset_break(&mut self);

    /// Error and warning text, one line.
    fn diagnostic(&mut self, s: &str) {
        self.print(s);
        self.put(CR);
    }
}
