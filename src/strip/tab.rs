//! Single-tab rendering.

use std::collections::HashMap;
use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::strip::model::{MergedTabProps, TabId};

/// Narrowest body a tab cell may have. Below this the list scrolls
/// instead of shrinking further, and no close affordance is shown.
pub(crate) const MIN_TAB_WIDTH: u16 = 6;

/// Width in cells of the close affordance at a tab's trailing edge.
pub(crate) const CLOSE_WIDTH: u16 = 2;

/// Side effect requested by a tab renderer after painting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabEffect {
    #[default]
    None,
    /// Scroll the strip so this tab is fully visible.
    BringIntoView,
}

/// Renderer for one tab cell.
///
/// Implementations are stateless with respect to props: painting is a pure
/// function of [`MergedTabProps`]. The one permitted side effect is the
/// one-shot [`TabEffect::BringIntoView`] request when `last_focused`
/// transitions to a new defined instant; re-renders with an unchanged hint
/// must return [`TabEffect::None`].
///
/// Decorators registered with the
/// [`DecorationRegistry`](crate::strip::registry::DecorationRegistry) must
/// preserve this contract, including the close affordance occupying the
/// trailing cells reported by [`close_slot`].
pub trait TabRenderer {
    /// Paints one tab into `area` (possibly empty when the tab is scrolled
    /// out of view) and reports any side effect.
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, props: &MergedTabProps) -> TabEffect;
}

/// The close affordance cells within a tab's area, if the tab is wide
/// enough to show one. Shared between the renderer and click hit-testing.
pub(crate) fn close_slot(area: Rect, is_last: bool) -> Option<Rect> {
    let edges = 1 + u16::from(is_last);
    let body = area.width.saturating_sub(edges);
    if body < MIN_TAB_WIDTH {
        return None;
    }
    let x = area.x + area.width - CLOSE_WIDTH - u16::from(is_last);
    Some(Rect::new(x, area.y, CLOSE_WIDTH, area.height))
}

/// Truncates `text` to a display width, appending an ellipsis when it does
/// not fit, and pads the result to exactly `width` cells.
pub(crate) fn fit_to_width(text: &str, width: u16) -> String {
    let width = width as usize;
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    if text.width() <= width {
        out.push_str(text);
    } else {
        let mut used = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            // Leave one cell for the ellipsis.
            if used + w > width - 1 {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
    }

    let pad = width.saturating_sub(out.width());
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Default tab renderer: edge separators, activity marker, truncated
/// title, close affordance.
#[derive(Default)]
pub struct DefaultTabRenderer {
    /// Last focus hint acted on, per uid; guards the one-shot effect.
    seen: HashMap<TabId, Instant>,
}

impl DefaultTabRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn focus_effect(&mut self, props: &MergedTabProps) -> TabEffect {
        let Some(when) = props.last_focused else {
            return TabEffect::None;
        };
        let uid = props.on_select.uid();
        if self.seen.get(uid) == Some(&when) {
            return TabEffect::None;
        }
        self.seen.insert(uid.clone(), when);
        TabEffect::BringIntoView
    }
}

impl TabRenderer for DefaultTabRenderer {
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, props: &MergedTabProps) -> TabEffect {
        // The effect is observed even for tabs clipped out of view, so a
        // hinted offscreen tab can still ask to be scrolled in.
        let effect = self.focus_effect(props);
        if area.width == 0 || area.height == 0 {
            return effect;
        }

        let separator_style = Style::default().fg(props.border_color);
        let text_style = if props.is_active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = Vec::new();
        let left = if props.is_first { "▎" } else { "│" };
        spans.push(Span::styled(left, separator_style));
        let mut remaining = area.width - 1;

        let right_edge = props.is_last && remaining > 0;
        if right_edge {
            remaining -= 1;
        }

        let show_close = close_slot(area, props.is_last).is_some();
        if show_close {
            remaining -= CLOSE_WIDTH;
        }

        let marker = props.has_activity && !props.is_active && remaining > 2;
        if marker {
            spans.push(Span::styled("●", Style::default().fg(Color::Yellow)));
            remaining -= 1;
        }

        let body = fit_to_width(&format!(" {} ", props.text), remaining);
        spans.push(Span::styled(body, text_style));

        if show_close {
            spans.push(Span::styled("✕ ", Style::default().fg(Color::DarkGray)));
        }
        if right_edge {
            spans.push(Span::styled("│", separator_style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        effect
    }
}
