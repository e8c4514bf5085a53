//! How the renderer highlights the pieces of a line.
//!
//! Rendering never emits escape codes by itself; it hands each piece to a
//! [`Painter`], so the same tree can be printed to a terminal or compared as
//! plain text.

use colored::Colorize;

pub trait Painter {
    /// Call and create frames.
    fn call(&self, text: &str) -> String;
    /// Logs.
    fn event(&self, text: &str) -> String;
    /// The `error` marker of halted frames.
    fn error(&self, text: &str) -> String;
    /// Source location suffixes.
    fn location(&self, text: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn call(&self, text: &str) -> String {
        text.to_owned()
    }

    fn event(&self, text: &str) -> String {
        text.to_owned()
    }

    fn error(&self, text: &str) -> String {
        text.to_owned()
    }

    fn location(&self, text: &str) -> String {
        text.to_owned()
    }
}

/// ANSI colors through `colored`, which also honours `NO_COLOR`/`CLICOLOR_FORCE`
/// and the global override set by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiPainter;

impl Painter for AnsiPainter {
    fn call(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn event(&self, text: &str) -> String {
        text.cyan().to_string()
    }

    fn error(&self, text: &str) -> String {
        text.bright_red().to_string()
    }

    fn location(&self, text: &str) -> String {
        text.dimmed().to_string()
    }
}
