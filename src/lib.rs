//! Tab strip widget for terminal applications.
//!
//! Renders the row of session tabs, a new-tab control, and
//! platform-conditional chrome (leading inset, full-screen adjustments).
//! The host supplies the tab collection and `on_change`/`on_close`
//! callbacks; the strip derives per-tab props, routes them through a
//! decoration registry so plugins can wrap the renderer or extend props,
//! and tracks which tab should scroll itself into view via a debounced
//! focus signal that survives rapid tab churn.

pub mod config;
pub mod error;
pub mod event;
pub mod strip;
pub mod terminal;

pub use config::{PlatformFamily, StripConfig, fetch_config};
pub use error::{Result, StripError};
pub use strip::{
    ChildSlot, DecorationRegistry, FocusSignal, MergedTabProps, StripProps, Tab, TabEffect, TabId,
    TabRenderer, TabStrip,
};
pub use terminal::{Tui, restore_terminal, setup_terminal};
