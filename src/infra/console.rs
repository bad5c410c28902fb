//! Console writer: the tool's only output surface.
//!
//! Two sinks, mirroring the reporting contract: informational and success
//! text on stdout, failures (and the usage echo that accompanies argument
//! errors) on stderr. Messages may carry `<info>`/`<error>` markup; marked
//! segments are colorized when the destination is a terminal and the tags
//! are stripped otherwise.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

pub struct Console {
    color_stdout: bool,
    color_stderr: bool,
}

impl Console {
    pub fn new() -> Self {
        Self {
            color_stdout: std::io::stdout().is_terminal(),
            color_stderr: std::io::stderr().is_terminal(),
        }
    }

    /// Writer with colors forced off on both sinks.
    pub fn plain() -> Self {
        Self { color_stdout: false, color_stderr: false }
    }

    /// Line on stdout.
    pub fn write_line(&self, message: &str) {
        println!("{}", render_markup(message, self.color_stdout));
    }

    /// Line on stderr (usage echo, multi-line blocks).
    pub fn write_error_line(&self, message: &str) {
        eprintln!("{}", render_markup(message, self.color_stderr));
    }

    /// Failure message on stderr, wrapped in `<error>` markup and followed
    /// by a blank separator line.
    pub fn write_error_message(&self, message: &str) {
        self.write_error_line(&format!("<error>{message}</error>"));
        eprintln!();
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn render_markup(message: &str, color: bool) -> String {
    let painted = paint_segments(message, "<info>", "</info>", color, |s| s.green().to_string());
    paint_segments(&painted, "<error>", "</error>", color, |s| s.red().to_string())
}

/// Replace `<tag>...</tag>` spans, painting the inner text when `color` is
/// set and dropping the tags either way. Tags are never nested.
fn paint_segments(
    message: &str,
    open: &str,
    close: &str,
    color: bool,
    paint: impl Fn(&str) -> String,
) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        let after = &rest[start + open.len()..];
        let end = after.find(close).unwrap_or(after.len());
        let segment = &after[..end];
        if color {
            out.push_str(&paint(segment));
        } else {
            out.push_str(segment);
        }
        rest = if end < after.len() { &after[end + close.len()..] } else { "" };
    }
    out.push_str(rest);
    out
}
