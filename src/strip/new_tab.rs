//! New-tab control.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

/// Width in cells reserved for the control at the strip's trailing edge.
pub(crate) const NEW_TAB_WIDTH: u16 = 5;

/// Props for the new-tab control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewTabProps {
    /// Whether the interactive tab list is currently shown.
    pub tabs_visible: bool,
    pub border_color: Color,
}

/// Renders the new-tab control. Stateless: a pure function of its props.
///
/// Shows a prominent affordance while the tab list is visible and a
/// minimal one otherwise.
pub fn render(frame: &mut Frame<'_>, area: Rect, props: &NewTabProps) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let (label, style) = if props.tabs_visible {
        (
            "[+]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("+", Style::default().fg(Color::DarkGray))
    };

    let control = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(control, area);
}
