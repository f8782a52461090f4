//! Demo host: a minimal session switcher driving the tab strip.
//!
//! Keys: `t` opens a tab, `w` closes the active tab, `Tab` cycles,
//! `f` toggles full screen, `q` quits. Clicking a tab selects it;
//! clicking its `✕` closes it.

use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc;

use tabstrip::config::fetch_config;
use tabstrip::event::{Event, spawn_event_reader, spawn_tick_timer};
use tabstrip::strip::{Tab, TabHandler, TabId};
use tabstrip::{
    DecorationRegistry, StripError, StripProps, TabStrip, restore_terminal, setup_terminal,
};

/// Host-side mutations requested by strip callbacks.
#[derive(Debug)]
enum HostAction {
    Select(TabId),
    Close(TabId),
}

/// The host's own tab model; the strip only ever sees a snapshot of it.
struct Host {
    tabs: Vec<Tab>,
    next_id: u32,
}

impl Host {
    fn new() -> Self {
        Self {
            // Empty title: the strip substitutes its fallback label.
            tabs: vec![Tab::new("tab-1", "").active(true)],
            next_id: 2,
        }
    }

    fn open_tab(&mut self) {
        let id = self.next_id;
        self.next_id += 1;
        for tab in &mut self.tabs {
            tab.is_active = false;
        }
        self.tabs
            .push(Tab::new(format!("tab-{id}"), format!("shell {id}")).active(true));
    }

    fn select(&mut self, uid: &TabId) {
        for tab in &mut self.tabs {
            tab.is_active = tab.uid == *uid;
            if tab.is_active {
                tab.has_activity = false;
            }
        }
    }

    fn close(&mut self, uid: &TabId) {
        let Some(pos) = self.tabs.iter().position(|tab| tab.uid == *uid) else {
            return;
        };
        let was_active = self.tabs[pos].is_active;
        self.tabs.remove(pos);
        if was_active && !self.tabs.is_empty() {
            let neighbor = pos.min(self.tabs.len() - 1);
            self.tabs[neighbor].is_active = true;
        }
    }

    fn cycle(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        let current = self.tabs.iter().position(|tab| tab.is_active).unwrap_or(0);
        let next = self.tabs[(current + 1) % self.tabs.len()].uid.clone();
        self.select(&next);
    }

    fn active_uid(&self) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|tab| tab.is_active)
            .map(|tab| tab.uid.clone())
    }

    fn active_title(&self) -> String {
        self.tabs
            .iter()
            .find(|tab| tab.is_active)
            .map(|tab| {
                if tab.title.is_empty() {
                    tab.uid.to_string()
                } else {
                    tab.title.clone()
                }
            })
            .unwrap_or_else(|| "no session".to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), StripError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let config = fetch_config()?;
    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, 50);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let on_change: TabHandler = {
        let tx = action_tx.clone();
        Rc::new(move |uid| {
            let _ = tx.send(HostAction::Select(uid));
        })
    };
    let on_close: TabHandler = {
        let tx = action_tx;
        Rc::new(move |uid| {
            let _ = tx.send(HostAction::Close(uid));
        })
    };

    let mut strip = TabStrip::new(config, DecorationRegistry::new());
    let mut host = Host::new();
    let mut full_screen = false;
    let mut should_quit = false;

    while !should_quit {
        strip.update(&host.tabs, Instant::now());

        let props = StripProps {
            tabs: &host.tabs,
            border_color: Color::Gray,
            on_change: Rc::clone(&on_change),
            on_close: Rc::clone(&on_close),
            full_screen,
            custom_children_before: None,
            custom_children: None,
        };

        let strip_height = strip.height(&host.tabs);
        let active_title = host.active_title();
        terminal
            .draw(|frame| {
                let [strip_area, body] =
                    Layout::vertical([Constraint::Length(strip_height), Constraint::Min(0)])
                        .areas(frame.area());
                strip.render(frame, strip_area, &props);
                let session = Paragraph::new(format!(" {active_title} "))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(session, body);
            })
            .map_err(|e| StripError::Terminal(format!("draw failed: {e}")))?;

        match rx.recv().await {
            Some(Event::Key(key)) => match key.code {
                KeyCode::Char('q') => should_quit = true,
                KeyCode::Char('t') => host.open_tab(),
                KeyCode::Char('w') => {
                    if let Some(uid) = host.active_uid() {
                        host.close(&uid);
                    }
                }
                KeyCode::Char('f') => full_screen = !full_screen,
                KeyCode::Tab => host.cycle(),
                _ => {}
            },
            Some(Event::Mouse(mouse)) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    strip.handle_click(mouse.column, mouse.row);
                }
            }
            Some(Event::Resize(_, _)) | Some(Event::Tick) => {}
            None => break,
        }

        while let Ok(action) = action_rx.try_recv() {
            match action {
                HostAction::Select(uid) => host.select(&uid),
                HostAction::Close(uid) => host.close(&uid),
            }
        }

        if host.tabs.is_empty() {
            should_quit = true;
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
