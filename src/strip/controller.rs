//! Tab strip controller.
//!
//! Owns the strip-level state (focus signal, debounce, scroll offset),
//! watches the tab collection for changes, and orchestrates rendering
//! order and platform-conditional layout. All per-tab props flow through
//! the [`DecorationRegistry`] so host extensions can observe or alter any
//! tab's rendered output.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use tracing::{debug, trace};

use crate::config::{PlatformFamily, StripConfig};
use crate::strip::debounce::Debouncer;
use crate::strip::model::{
    BoundCallback, FocusSignal, StripProps, StripShared, Tab, TabFlags,
};
use crate::strip::new_tab::{self, NEW_TAB_WIDTH, NewTabProps};
use crate::strip::registry::DecorationRegistry;
use crate::strip::tab::{DefaultTabRenderer, MIN_TAB_WIDTH, TabEffect, TabRenderer, close_slot};

/// Height of the strip row when visible.
const STRIP_HEIGHT: u16 = 1;

/// Leading inset on the always-show-tabs family, clearing the window
/// controls. Suppressed in full screen.
const INSET: u16 = 8;

/// Widest cell a single tab may occupy.
const MAX_TAB_WIDTH: u16 = 24;

/// Role name the tab renderer is registered under.
pub const TAB_ROLE: &str = "tab";

/// Identity snapshot of a tab collection, for change detection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Fingerprint(Vec<(crate::strip::model::TabId, bool)>);

impl Fingerprint {
    fn of(tabs: &[Tab]) -> Self {
        Self(
            tabs.iter()
                .map(|tab| (tab.uid.clone(), tab.is_active))
                .collect(),
        )
    }
}

/// Screen region of one rendered tab, kept for click hit-testing.
struct TabHit {
    area: Rect,
    close: Option<Rect>,
    on_select: BoundCallback,
    on_close: BoundCallback,
}

/// The tab strip: session tabs, new-tab control, and platform chrome.
///
/// One instance per strip; each owns its own [`FocusSignal`] and debounce
/// state, nothing is shared across instances. Single-threaded: drive it
/// from the UI event loop by calling [`update`](TabStrip::update) on every
/// collection change and tick, and [`render`](TabStrip::render) once per
/// frame.
pub struct TabStrip {
    config: StripConfig,
    registry: DecorationRegistry,
    renderer: Box<dyn TabRenderer>,
    focus: FocusSignal,
    debounce: Debouncer<Option<usize>>,
    fingerprint: Option<Fingerprint>,
    scroll: u16,
    hits: Vec<TabHit>,
}

impl TabStrip {
    /// Builds a strip, resolving the tab renderer through the registry's
    /// decorators for [`TAB_ROLE`]. Decoration happens here, once, not
    /// per render.
    pub fn new(config: StripConfig, registry: DecorationRegistry) -> Self {
        let renderer = registry.decorate(Box::new(DefaultTabRenderer::new()), TAB_ROLE);
        let debounce = Debouncer::new(config.debounce_window);
        Self {
            config,
            registry,
            renderer,
            focus: FocusSignal::new(),
            debounce,
            fingerprint: None,
            scroll: 0,
            hits: Vec::new(),
        }
    }

    /// The strip's current focus signal.
    pub fn focus(&self) -> FocusSignal {
        self.focus
    }

    /// Releases any pending focus update without committing it. Also
    /// implied by dropping the strip; nothing fires after teardown.
    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
    }

    /// Rows the strip occupies for `tabs`. Zero when hidden — the strip
    /// stays mounted and keeps its state either way.
    pub fn height(&self, tabs: &[Tab]) -> u16 {
        if self.is_hidden(tabs.len()) {
            0
        } else {
            STRIP_HEIGHT
        }
    }

    fn is_hidden(&self, tab_count: usize) -> bool {
        self.config.platform != PlatformFamily::AlwaysShowTabs && tab_count == 1
    }

    /// Observes the tab collection and drives the debounced focus signal.
    ///
    /// A changed collection (uids or active flags) schedules a focus
    /// update; scheduling within the quiescence window cancels and
    /// replaces the previous one, so a burst of changes commits only the
    /// update computed from the final call. Call this on every collection
    /// change and on every tick so elapsed windows get committed.
    pub fn update(&mut self, tabs: &[Tab], now: Instant) {
        let fingerprint = Fingerprint::of(tabs);
        if self.fingerprint.as_ref() != Some(&fingerprint) {
            self.fingerprint = Some(fingerprint);
            // First match wins; None when no tab is active.
            let active = tabs.iter().position(|tab| tab.is_active);
            self.debounce.schedule(active, now);
        }

        if let Some(index) = self.debounce.poll(now) {
            debug!(?index, "focus update committed");
            self.focus = FocusSignal {
                index,
                at: Some(now),
            };
        }
    }

    /// Renders the strip into `area`.
    ///
    /// Layout order: host content slot, tab list (or centered title, or
    /// nothing, per the visibility rules), new-tab control, trailing host
    /// content slot.
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect, props: &StripProps<'_>) {
        self.hits.clear();
        let tab_count = props.tabs.len();
        if area.height == 0 || self.is_hidden(tab_count) {
            return;
        }
        trace!(tabs = tab_count, "rendering tab strip");

        let before_width = props.custom_children_before.map_or(0, |slot| slot.width);
        let after_width = props.custom_children.map_or(0, |slot| slot.width);
        let [before, middle, new_tab_area, after] = Layout::horizontal([
            Constraint::Length(before_width),
            Constraint::Min(0),
            Constraint::Length(NEW_TAB_WIDTH),
            Constraint::Length(after_width),
        ])
        .areas(area);

        if let Some(slot) = props.custom_children_before {
            (slot.render)(frame, before);
        }

        if tab_count == 1 {
            // Always-show family only: a single tab renders as a plain
            // centered title, no interactive list.
            self.render_title(frame, middle, props);
        } else if tab_count > 1 {
            self.render_list(frame, middle, props);
        }

        new_tab::render(
            frame,
            new_tab_area,
            &NewTabProps {
                tabs_visible: tab_count > 1,
                border_color: props.border_color,
            },
        );

        if let Some(slot) = props.custom_children {
            (slot.render)(frame, after);
        }
    }

    fn render_title(&self, frame: &mut Frame<'_>, area: Rect, props: &StripProps<'_>) {
        let tab = &props.tabs[0];
        let text = if tab.title.is_empty() {
            self.config.fallback_label.clone()
        } else {
            tab.title.clone()
        };
        let title_area = area.inner(Margin::new(INSET, 0));
        let title = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White));
        frame.render_widget(title, title_area);
    }

    fn render_list(&mut self, frame: &mut Frame<'_>, area: Rect, props: &StripProps<'_>) {
        let tab_count = props.tabs.len() as u16;
        let inset = if self.config.platform == PlatformFamily::AlwaysShowTabs && !props.full_screen
        {
            INSET.min(area.width)
        } else {
            0
        };

        if inset > 0 {
            // Border shim under the window-controls gap.
            let shim = Paragraph::new(Span::styled(
                "─".repeat(inset as usize),
                Style::default().fg(props.border_color),
            ));
            frame.render_widget(shim, Rect { width: inset, ..area });
        }

        let list = Rect {
            x: area.x + inset,
            width: area.width - inset,
            ..area
        };
        if list.width == 0 {
            return;
        }

        let tab_width = (list.width / tab_count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);
        let total = u32::from(tab_width) * u32::from(tab_count);
        let max_scroll = total.saturating_sub(u32::from(list.width)).min(u32::from(u16::MAX)) as u16;
        self.scroll = self.scroll.min(max_scroll);

        let shared = StripShared {
            border_color: props.border_color,
            full_screen: props.full_screen,
            on_change: props.on_change.clone(),
            on_close: props.on_close.clone(),
            fallback_label: self.config.fallback_label.clone(),
        };

        let mut bring_into_view = None;
        for (i, tab) in props.tabs.iter().enumerate() {
            let flags = TabFlags {
                is_first: i == 0,
                is_last: i + 1 == props.tabs.len(),
                last_focused: self.focus.hint_for(i),
            };
            let merged = self.registry.merge_props(tab, &shared, &flags);

            // Clip the tab's virtual cell to the visible window. Offscreen
            // tabs still go through the renderer (with an empty area) so
            // their focus effect is observed.
            let virtual_x = u32::from(i as u16) * u32::from(tab_width);
            let window_start = u32::from(self.scroll);
            let window_end = window_start + u32::from(list.width);
            let start = virtual_x.max(window_start);
            let end = (virtual_x + u32::from(tab_width)).min(window_end);
            let cell = if start < end {
                Rect::new(
                    list.x + (start - window_start) as u16,
                    list.y,
                    (end - start) as u16,
                    list.height,
                )
            } else {
                Rect::new(list.x, list.y, 0, 0)
            };

            let effect = self.renderer.render(frame, cell, &merged);
            if effect == TabEffect::BringIntoView {
                bring_into_view = Some(i as u16);
            }

            if cell.width > 0 {
                // Close hit area only when the cell is fully visible, so a
                // clipped edge cannot be mistaken for the affordance.
                let close = (cell.width == tab_width)
                    .then(|| close_slot(cell, flags.is_last))
                    .flatten();
                self.hits.push(TabHit {
                    area: cell,
                    close,
                    on_select: merged.on_select.clone(),
                    on_close: merged.on_close.clone(),
                });
            }
        }

        if let Some(index) = bring_into_view {
            self.ensure_visible(index, tab_width, list.width);
        }
    }

    /// Adjusts the scroll offset so the tab at `index` is fully visible.
    /// Takes effect on the next frame.
    fn ensure_visible(&mut self, index: u16, tab_width: u16, view_width: u16) {
        let start = index.saturating_mul(tab_width);
        let end = start.saturating_add(tab_width);
        if start < self.scroll {
            self.scroll = start;
        } else if end > self.scroll.saturating_add(view_width) {
            self.scroll = end.saturating_sub(view_width);
        }
        trace!(index, scroll = self.scroll, "scrolled tab into view");
    }

    /// Routes a click at screen coordinates to the tab it landed on,
    /// invoking the close callback for the close affordance and the
    /// select callback for the rest of the cell. Returns whether the
    /// click was consumed.
    pub fn handle_click(&self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        for hit in &self.hits {
            if let Some(close) = hit.close
                && close.contains(position)
            {
                hit.on_close.invoke();
                return true;
            }
            if hit.area.contains(position) {
                hit.on_select.invoke();
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn strip(platform: PlatformFamily) -> TabStrip {
        TabStrip::new(StripConfig::new(platform), DecorationRegistry::new())
    }

    fn tabs(specs: &[(&str, bool)]) -> Vec<Tab> {
        specs
            .iter()
            .map(|(uid, active)| Tab::new(*uid, format!("title {uid}")).active(*active))
            .collect()
    }

    #[test]
    fn hidden_only_with_a_single_tab_on_the_conditional_family() {
        let conditional = strip(PlatformFamily::Conditional);
        assert_eq!(conditional.height(&tabs(&[("a", true)])), 0);
        assert_eq!(conditional.height(&tabs(&[("a", true), ("b", false)])), 1);
        assert_eq!(conditional.height(&[]), 1);

        let always = strip(PlatformFamily::AlwaysShowTabs);
        assert_eq!(always.height(&tabs(&[("a", true)])), 1);
    }

    #[test]
    fn focus_commits_after_the_quiescence_window() {
        let mut strip = strip(PlatformFamily::Conditional);
        let t0 = Instant::now();
        let collection = tabs(&[("a", false), ("b", true)]);

        strip.update(&collection, t0);
        assert_eq!(strip.focus().at, None);

        // Tick before the window elapses: nothing committed.
        strip.update(&collection, t0 + Duration::from_millis(50));
        assert_eq!(strip.focus().at, None);

        let t1 = t0 + Duration::from_millis(150);
        strip.update(&collection, t1);
        assert_eq!(strip.focus().index, Some(1));
        assert_eq!(strip.focus().at, Some(t1));
    }

    #[test]
    fn burst_of_changes_commits_only_the_final_state() {
        let mut strip = strip(PlatformFamily::Conditional);
        let t0 = Instant::now();

        strip.update(&tabs(&[("a", true), ("b", false)]), t0);
        strip.update(
            &tabs(&[("a", false), ("b", true)]),
            t0 + Duration::from_millis(40),
        );
        strip.update(
            &tabs(&[("a", false), ("b", false), ("c", true)]),
            t0 + Duration::from_millis(80),
        );

        // 100ms after the first call, but within the window of the last.
        let collection = tabs(&[("a", false), ("b", false), ("c", true)]);
        strip.update(&collection, t0 + Duration::from_millis(120));
        assert_eq!(strip.focus().at, None);

        strip.update(&collection, t0 + Duration::from_millis(200));
        assert_eq!(strip.focus().index, Some(2));
    }

    #[test]
    fn no_active_tab_degrades_to_no_hint() {
        let mut strip = strip(PlatformFamily::Conditional);
        let t0 = Instant::now();
        let collection = tabs(&[("a", false), ("b", false)]);

        strip.update(&collection, t0);
        strip.update(&collection, t0 + Duration::from_millis(200));

        assert_eq!(strip.focus().index, None);
        for i in 0..2 {
            assert_eq!(strip.focus().hint_for(i), None);
        }
    }

    #[test]
    fn multiple_active_tabs_degrade_to_first_match() {
        let mut strip = strip(PlatformFamily::Conditional);
        let t0 = Instant::now();
        let collection = tabs(&[("a", false), ("b", true), ("c", true)]);

        strip.update(&collection, t0);
        strip.update(&collection, t0 + Duration::from_millis(200));

        assert_eq!(strip.focus().index, Some(1));
    }

    #[test]
    fn unchanged_collection_does_not_reschedule() {
        let mut strip = strip(PlatformFamily::Conditional);
        let t0 = Instant::now();
        let collection = tabs(&[("a", true)]);

        strip.update(&collection, t0);
        strip.update(&collection, t0 + Duration::from_millis(200));
        let committed_at = strip.focus().at;
        assert!(committed_at.is_some());

        // Ticks with the same collection leave the signal untouched.
        strip.update(&collection, t0 + Duration::from_millis(400));
        strip.update(&collection, t0 + Duration::from_millis(600));
        assert_eq!(strip.focus().at, committed_at);
    }

    #[test]
    fn cancel_pending_releases_the_scheduled_update() {
        let mut strip = strip(PlatformFamily::Conditional);
        let t0 = Instant::now();
        let collection = tabs(&[("a", false), ("b", true)]);

        strip.update(&collection, t0);
        strip.cancel_pending();
        strip.update(&collection, t0 + Duration::from_millis(500));

        assert_eq!(strip.focus().at, None);
    }

    #[test]
    fn fingerprint_tracks_uids_and_active_flags() {
        let a = Fingerprint::of(&tabs(&[("a", true), ("b", false)]));
        let same = Fingerprint::of(&tabs(&[("a", true), ("b", false)]));
        let reactivated = Fingerprint::of(&tabs(&[("a", false), ("b", true)]));
        let reordered = Fingerprint::of(&tabs(&[("b", false), ("a", true)]));

        assert_eq!(a, same);
        assert_ne!(a, reactivated);
        assert_ne!(a, reordered);
    }
}
