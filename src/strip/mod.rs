//! The tab strip component: controller, data model, decoration registry,
//! and the renderers for individual tabs and the new-tab control.

pub mod controller;
pub mod debounce;
pub mod model;
pub mod new_tab;
pub mod registry;
pub mod tab;

pub use controller::{TAB_ROLE, TabStrip};
pub use model::{
    BoundCallback, ChildSlot, FocusSignal, MergedTabProps, StripProps, StripShared, Tab, TabFlags,
    TabHandler, TabId,
};
pub use new_tab::NewTabProps;
pub use registry::DecorationRegistry;
pub use tab::{DefaultTabRenderer, TabEffect, TabRenderer};
