//! Colour and width of the attached terminal.

use owo_colors::{OwoColorize, Style, colors::css};

/// Whether stdout accepts ANSI colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Terminal width in columns, if stdout is a terminal.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(width, _)| width.0)
}

/// Applies `style` when colour is supported, otherwise returns the plain text.
fn paint(text: &str, style: Style) -> String {
    if supports_color() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Report styling for anything string-like.
pub trait Colorize {
    /// Amber, for diagnostics.
    fn warning(&self) -> String;
    /// Light blue, for section headers.
    fn info(&self) -> String;
    /// Dimmed, for secondary lines.
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn warning(&self) -> String {
        paint(self.as_ref(), Style::new().fg::<css::Orange>())
    }

    fn info(&self) -> String {
        paint(self.as_ref(), Style::new().fg::<css::LightBlue>())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), Style::new().dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styling_keeps_the_text() {
        let header = "Taken Courses:".info();
        assert!(header.contains("Taken Courses:"));
        assert!(String::from("line 3: skipped").warning().contains("line 3: skipped"));
        assert!("No requirements parsed.".dim().contains("No requirements parsed."));
    }
}
