//! CLI command implementations.

mod build;
mod excerpt;
mod render;
mod slug;

use std::io::{self, Read, Write};
use std::path::Path;

pub(crate) use build::{BuildArgs, BuildError};
pub(crate) use excerpt::ExcerptArgs;
pub(crate) use render::RenderArgs;
pub(crate) use slug::SlugArgs;

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write a command result to stdout, newline-terminated.
fn write_stdout(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}
