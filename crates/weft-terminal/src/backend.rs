//! Terminal backend abstraction and the crossterm implementation.
//!
//! The [`Backend`] trait is the toolkit's only view of the physical
//! terminal: cursor movement, styled writes, and the raw-mode/alternate-
//! screen lifecycle. [`CrosstermBackend`] is the production
//! implementation; [`TestBackend`] records operations for assertions.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use weft_core::{Area, CellTraits, Color, Result};

/// Low-level terminal operations used by the frame writer.
///
/// Implementations buffer output; nothing reaches the terminal until
/// [`flush`](Self::flush).
pub trait Backend {
    /// Enters raw mode.
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Exits raw mode.
    fn exit_raw_mode(&mut self) -> Result<()>;

    /// Switches to the alternate screen buffer.
    fn enter_alternate_screen(&mut self) -> Result<()>;

    /// Returns to the main screen buffer.
    fn leave_alternate_screen(&mut self) -> Result<()>;

    /// Enables mouse event reporting.
    fn enable_mouse_capture(&mut self) -> Result<()>;

    /// Disables mouse event reporting.
    fn disable_mouse_capture(&mut self) -> Result<()>;

    /// Hides the terminal cursor.
    fn hide_cursor(&mut self) -> Result<()>;

    /// Shows the terminal cursor.
    fn show_cursor(&mut self) -> Result<()>;

    /// Moves the cursor to the given cell (0-based).
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    /// Returns the terminal size.
    fn size(&self) -> Result<Area>;

    /// Clears the whole screen.
    fn clear(&mut self) -> Result<()>;

    /// Sets the foreground color; `None` restores the default.
    fn set_foreground(&mut self, color: Option<Color>) -> Result<()>;

    /// Sets the background color; `None` restores the default.
    fn set_background(&mut self, color: Option<Color>) -> Result<()>;

    /// Applies cell traits on top of the current style.
    fn set_traits(&mut self, traits: CellTraits) -> Result<()>;

    /// Resets colors and traits to the terminal default.
    fn reset_style(&mut self) -> Result<()>;

    /// Writes one symbol at the cursor position.
    fn write_symbol(&mut self, symbol: char) -> Result<()>;

    /// Flushes buffered output to the terminal.
    fn flush(&mut self) -> Result<()>;
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::White => CtColor::Grey,
        Color::BrightBlack => CtColor::DarkGrey,
        Color::BrightRed => CtColor::Red,
        Color::BrightGreen => CtColor::Green,
        Color::BrightYellow => CtColor::Yellow,
        Color::BrightBlue => CtColor::Blue,
        Color::BrightMagenta => CtColor::Magenta,
        Color::BrightCyan => CtColor::Cyan,
        Color::BrightWhite => CtColor::White,
        Color::Indexed(i) => CtColor::AnsiValue(i),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

fn trait_attributes(traits: CellTraits) -> impl Iterator<Item = Attribute> {
    const MAP: [(CellTraits, Attribute); 8] = [
        (CellTraits::BOLD, Attribute::Bold),
        (CellTraits::DIM, Attribute::Dim),
        (CellTraits::ITALIC, Attribute::Italic),
        (CellTraits::UNDERLINE, Attribute::Underlined),
        (CellTraits::BLINK, Attribute::SlowBlink),
        (CellTraits::INVERSE, Attribute::Reverse),
        (CellTraits::STANDOUT, Attribute::Reverse),
        (CellTraits::INVISIBLE, Attribute::Hidden),
    ];
    MAP.into_iter()
        .filter(move |(flag, _)| traits.contains(*flag))
        .map(|(_, attr)| attr)
}

/// [`Backend`] implementation over crossterm and stdout.
pub struct CrosstermBackend {
    out: Stdout,
}

impl CrosstermBackend {
    /// Creates a backend writing to stdout.
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CrosstermBackend {
    fn enter_raw_mode(&mut self) -> Result<()> {
        enable_raw_mode()?;
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        disable_raw_mode()?;
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen)?;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        execute!(self.out, LeaveAlternateScreen)?;
        Ok(())
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        execute!(self.out, EnableMouseCapture)?;
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        execute!(self.out, DisableMouseCapture)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        queue!(self.out, Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        queue!(self.out, Show)?;
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        Ok(())
    }

    fn size(&self) -> Result<Area> {
        let (width, height) = size()?;
        Ok(Area::new(width, height))
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn set_foreground(&mut self, color: Option<Color>) -> Result<()> {
        let ct = color.map_or(CtColor::Reset, to_crossterm);
        queue!(self.out, SetForegroundColor(ct))?;
        Ok(())
    }

    fn set_background(&mut self, color: Option<Color>) -> Result<()> {
        let ct = color.map_or(CtColor::Reset, to_crossterm);
        queue!(self.out, SetBackgroundColor(ct))?;
        Ok(())
    }

    fn set_traits(&mut self, traits: CellTraits) -> Result<()> {
        for attribute in trait_attributes(traits) {
            queue!(self.out, SetAttribute(attribute))?;
        }
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    fn write_symbol(&mut self, symbol: char) -> Result<()> {
        queue!(self.out, Print(symbol))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// A backend that records operations instead of touching a terminal.
///
/// Each operation appends a line to [`ops`](Self::ops); tests assert on
/// the sequence.
pub struct TestBackend {
    area: Area,
    ops: Vec<String>,
    flushes: usize,
}

impl TestBackend {
    /// Creates a recording backend reporting the given size.
    pub fn new(area: Area) -> Self {
        Self {
            area,
            ops: Vec::new(),
            flushes: 0,
        }
    }

    /// Returns the recorded operations.
    pub fn ops(&self) -> &[String] {
        &self.ops
    }

    /// Returns how often the output was flushed.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Clears the recording.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.flushes = 0;
    }

    fn record(&mut self, op: impl Into<String>) {
        self.ops.push(op.into());
    }
}

impl Backend for TestBackend {
    fn enter_raw_mode(&mut self) -> Result<()> {
        self.record("enter_raw_mode");
        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        self.record("exit_raw_mode");
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record("enter_alternate_screen");
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record("leave_alternate_screen");
        Ok(())
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        self.record("enable_mouse_capture");
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        self.record("disable_mouse_capture");
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record("hide_cursor");
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record("show_cursor");
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(format!("move {x},{y}"));
        Ok(())
    }

    fn size(&self) -> Result<Area> {
        Ok(self.area)
    }

    fn clear(&mut self) -> Result<()> {
        self.record("clear");
        Ok(())
    }

    fn set_foreground(&mut self, color: Option<Color>) -> Result<()> {
        match color {
            Some(color) => self.record(format!("fg {color}")),
            None => self.record("fg default"),
        }
        Ok(())
    }

    fn set_background(&mut self, color: Option<Color>) -> Result<()> {
        match color {
            Some(color) => self.record(format!("bg {color}")),
            None => self.record("bg default"),
        }
        Ok(())
    }

    fn set_traits(&mut self, traits: CellTraits) -> Result<()> {
        if !traits.is_empty() {
            self.record(format!("traits {traits}"));
        }
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        self.record("reset");
        Ok(())
    }

    fn write_symbol(&mut self, symbol: char) -> Result<()> {
        self.record(format!("put {symbol}"));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mapping() {
        assert_eq!(to_crossterm(Color::Black), CtColor::Black);
        assert_eq!(to_crossterm(Color::BrightWhite), CtColor::White);
        assert_eq!(to_crossterm(Color::Indexed(7)), CtColor::AnsiValue(7));
        assert_eq!(
            to_crossterm(Color::Rgb(1, 2, 3)),
            CtColor::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn test_trait_attribute_mapping() {
        let attrs: Vec<Attribute> =
            trait_attributes(CellTraits::BOLD | CellTraits::UNDERLINE).collect();
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::Underlined]);
    }

    #[test]
    fn test_test_backend_records() {
        let mut backend = TestBackend::new(Area::new(10, 5));
        backend.move_cursor(3, 1).unwrap();
        backend.write_symbol('x').unwrap();
        backend.flush().unwrap();

        assert_eq!(backend.ops(), &["move 3,1", "put x"]);
        assert_eq!(backend.flushes(), 1);
        assert_eq!(backend.size().unwrap(), Area::new(10, 5));
    }
}
