//! Terminal presentation for disk notifications
//!
//! Warning and failure lines are indented under their header; success lines
//! sit flush left.

use std::io::Write;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BOLD_CYAN: &str = "\x1b[1;36m";

const HEADER_PADDING: usize = 4;
const MESSAGE_INDENT: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Header,
    Success,
    Warning,
    Failure,
}

impl Style {
    fn icon(self) -> Option<&'static str> {
        match self {
            Style::Header => None,
            Style::Success => Some("✓"),
            Style::Warning => Some("⚠"),
            Style::Failure => Some("✗"),
        }
    }

    fn indent(self) -> &'static str {
        match self {
            Style::Warning | Style::Failure => MESSAGE_INDENT,
            Style::Header | Style::Success => "",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Style::Header => BOLD_CYAN,
            Style::Success => GREEN,
            Style::Warning => YELLOW,
            Style::Failure => RED,
        }
    }
}

/// Anything that can show a styled line of text to the user
pub trait Presenter {
    fn present(&mut self, style: Style, text: &str);
}

/// Records every presented line, in order
impl Presenter for Vec<(Style, String)> {
    fn present(&mut self, style: Style, text: &str) {
        self.push((style, text.to_string()));
    }
}

/// Writes styled text to a terminal or any other writer
pub struct Terminal<W: Write> {
    out: W,
    color: bool,
}

impl Terminal<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Terminal::new(std::io::stdout(), color)
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, color: bool) -> Self {
        Terminal { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            format!("{}{}{}", style.color(), text, RESET)
        } else {
            text.to_string()
        }
    }

    fn format(&self, style: Style, text: &str) -> String {
        match style.icon() {
            None => {
                let rule = "─".repeat(text.chars().count() + HEADER_PADDING);
                format!(
                    "\n{}\n{}\n{}\n",
                    self.paint(style, &rule),
                    self.paint(style, &format!(" {} ", text)),
                    self.paint(style, &rule),
                )
            }
            Some(icon) => format!(
                "{}{}\n",
                style.indent(),
                self.paint(style, &format!("{} {}", icon, text))
            ),
        }
    }
}

impl<W: Write> Presenter for Terminal<W> {
    fn present(&mut self, style: Style, text: &str) {
        if text.is_empty() {
            return;
        }

        let formatted = self.format(style, text);
        if let Err(e) = self
            .out
            .write_all(formatted.as_bytes())
            .and_then(|_| self.out.flush())
        {
            tracing::debug!(error = %e, "failed to write disk notification");
        }
    }
}
