//! Presentation sink for the browser.

use gitiles::{TreeAddr, TreeEntry};

/// Renders browser state. Implementations are called with the display state locked, so they
/// must not call back into the [`Browser`](crate::browser::Browser).
pub trait View: Send + Sync + 'static {
    /// Replace the listing pane with the entries of `addr`.
    fn show_listing(&self, addr: &TreeAddr, entries: &[TreeEntry]);

    /// Replace the content pane with the text of the file at `addr`.
    fn show_content(&self, addr: &TreeAddr, text: &str);

    /// Replace the content pane with an error raised while loading `addr`.
    fn show_error(&self, addr: &TreeAddr, message: &str);

    /// Report an error that has no pane of its own.
    fn alert(&self, message: &str);
}
