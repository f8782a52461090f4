//! Shared test utilities.

use std::rc::Rc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Position;

use tabstrip::strip::{Tab, TabHandler};

/// Builds a tab collection from `(uid, title, is_active)` triples.
pub fn make_tabs(specs: &[(&str, &str, bool)]) -> Vec<Tab> {
    specs
        .iter()
        .map(|(uid, title, active)| Tab::new(*uid, *title).active(*active))
        .collect()
}

/// A host handler that ignores its argument.
pub fn noop_handler() -> TabHandler {
    Rc::new(|_| {})
}

/// The text content of one buffer row.
pub fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| {
            buffer
                .cell(Position::new(x, y))
                .map(|cell| cell.symbol().to_string())
                .unwrap_or_default()
        })
        .collect()
}
