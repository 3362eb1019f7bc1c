//! Color markup for text shown by the host.
//!
//! Matching never touches markup; the annotator only asks a `MarkupScheme`
//! to wrap or strip text, so the dialect can be swapped freely.

use lazy_static::lazy_static;
use regex::Regex;

use super::color::Color;

lazy_static! {
    static ref COL_TAG: Regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
    static ref ANSI_SEQ: Regex = Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid ANSI regex");
}

pub trait MarkupScheme: Send + Sync {
    /// Return `text` rendered in `color`.
    fn wrap(&self, color: Color, text: &str) -> String;

    /// Remove any markup this scheme understands.
    fn strip(&self, text: &str) -> String;
}

/// The game client's `<col=rrggbb>` tag dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColTagMarkup;

impl MarkupScheme for ColTagMarkup {
    fn wrap(&self, color: Color, text: &str) -> String {
        format!("<col={}>{}", color.to_hex(), text)
    }

    fn strip(&self, text: &str) -> String {
        COL_TAG.replace_all(text, "").into_owned()
    }
}

/// 24-bit ANSI escapes, for terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiMarkup;

impl MarkupScheme for AnsiMarkup {
    fn wrap(&self, color: Color, text: &str) -> String {
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", color.r, color.g, color.b, text)
    }

    fn strip(&self, text: &str) -> String {
        ANSI_SEQ.replace_all(text, "").into_owned()
    }
}
