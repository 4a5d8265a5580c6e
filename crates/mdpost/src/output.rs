//! Colored status output on stderr.
//!
//! Stdout is reserved for command results (HTML, excerpts, slugs).

use console::{Style, Term};

/// Status line printer.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Plain status line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.green), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.yellow), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.red), msg);
    }

    // Write errors on stderr are ignored.
    fn line(&self, style: Option<&Style>, msg: &str) {
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }
}
