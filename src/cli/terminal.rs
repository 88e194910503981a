//! Terminal colour detection and styling

use std::fmt;

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn paint<T: fmt::Display + ?Sized>(text: &T, style: impl FnOnce(&str) -> String) -> String {
    let text = text.to_string();
    if supports_color() {
        style(&text)
    } else {
        text
    }
}

/// Extension trait for colorizing anything that can be displayed
pub trait Colorize: fmt::Display {
    /// Color as success (green)
    fn success(&self) -> String {
        paint(self, |text| text.fg::<css::Green>().to_string())
    }

    /// Color as warning (amber)
    fn warning(&self) -> String {
        paint(self, |text| text.fg::<css::Orange>().to_string())
    }

    /// Color as info (blue)
    fn info(&self) -> String {
        paint(self, |text| text.fg::<css::LightBlue>().to_string())
    }

    /// Dim the text
    fn dim(&self) -> String {
        paint(self, |text| text.dimmed().to_string())
    }
}

impl<T: fmt::Display + ?Sized> Colorize for T {}
