//! Terminal rendering.

use std::io::{IsTerminal, Write as _};

use gitiles::{EntryKind, TreeAddr, TreeEntry};
use gitiles_browse::view::View;

fn force_color() -> bool {
    std::env::var_os("FORCE_COLOR").is_some_and(|v| !v.is_empty())
}

fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

pub fn should_use_color<T: IsTerminal>(stream: &T) -> bool {
    force_color() || (stream.is_terminal() && !no_color())
}

/// `ls -F` style suffix for an entry kind.
pub fn marker(kind: &EntryKind) -> &'static str {
    match kind {
        EntryKind::Tree => "/",
        EntryKind::ExecutableBlob => "*",
        EntryKind::Symlink => "@",
        EntryKind::Commit => "#",
        EntryKind::Blob | EntryKind::Other(_) => "",
    }
}

/// One listing line: the name followed by its kind marker.
pub fn format_entry(entry: &TreeEntry) -> String {
    format!("{}{}", entry.name, marker(&entry.kind()))
}

/// A [`View`] that prints to stdout, with alerts on stderr.
#[derive(Debug, Default)]
pub struct TerminalView;

impl View for TerminalView {
    fn show_listing(&self, addr: &TreeAddr, entries: &[TreeEntry]) {
        let mut out = std::io::stdout().lock();
        _ = writeln!(out, "== {addr}");
        for entry in entries {
            _ = writeln!(out, "{}", format_entry(entry));
        }
    }

    fn show_content(&self, addr: &TreeAddr, text: &str) {
        let mut out = std::io::stdout().lock();
        _ = writeln!(out, "== {addr}");
        _ = out.write_all(text.as_bytes());
        if !text.is_empty() && !text.ends_with('\n') {
            _ = writeln!(out);
        }
    }

    fn show_error(&self, addr: &TreeAddr, message: &str) {
        _ = writeln!(std::io::stdout().lock(), "== {addr}\n{message}");
    }

    fn alert(&self, message: &str) {
        _ = writeln!(std::io::stderr().lock(), "error: {message}");
    }
}
