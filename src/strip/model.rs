//! Core data model for the tab strip.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Opaque, stable identifier for a tab.
///
/// Survives reorders and is the join key across renders; position in the
/// collection is never used as an identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One session tab as supplied by the host.
///
/// The host guarantees at most one tab is active at any observed instant;
/// the strip degrades gracefully (no focus hint) when that does not hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub uid: TabId,
    /// Display title; may be empty, in which case the strip substitutes
    /// its configured fallback label.
    pub title: String,
    pub is_active: bool,
    pub has_activity: bool,
}

impl Tab {
    /// A new inactive tab with no pending activity.
    pub fn new(uid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uid: TabId::new(uid),
            title: title.into(),
            is_active: false,
            has_activity: false,
        }
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn activity(mut self, has_activity: bool) -> Self {
        self.has_activity = has_activity;
        self
    }
}

/// Strip-scoped record of which tab position last became active and when.
///
/// Created with `index = Some(0)` and an unset timestamp, so no hint is
/// issued until the first debounced update commits. Mutated only by that
/// commit; read once per render to decide which single tab receives the
/// bring-into-view hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusSignal {
    /// Position of the first active tab at commit time, `None` when the
    /// committed collection had no active tab.
    pub index: Option<usize>,
    /// Commit timestamp; `None` until the first commit.
    pub at: Option<Instant>,
}

impl FocusSignal {
    pub fn new() -> Self {
        Self {
            index: Some(0),
            at: None,
        }
    }

    /// The focus hint for the tab at `index`: the commit timestamp when
    /// this signal points at that position, `None` for every other tab.
    pub fn hint_for(&self, index: usize) -> Option<Instant> {
        if self.index == Some(index) {
            self.at
        } else {
            None
        }
    }
}

impl Default for FocusSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Host callback invoked with a tab's uid.
pub type TabHandler = Rc<dyn Fn(TabId)>;

/// A host handler bound to one tab's uid.
///
/// Invoking it calls the handler with the uid, never with the tab value or
/// its position. Equality is the uid plus the handler allocation, so props
/// built from the same inputs compare equal across renders.
#[derive(Clone)]
pub struct BoundCallback {
    uid: TabId,
    handler: TabHandler,
}

impl BoundCallback {
    pub fn new(uid: TabId, handler: TabHandler) -> Self {
        Self { uid, handler }
    }

    pub fn uid(&self) -> &TabId {
        &self.uid
    }

    pub fn invoke(&self) {
        (self.handler)(self.uid.clone());
    }
}

impl PartialEq for BoundCallback {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid && Rc::ptr_eq(&self.handler, &other.handler)
    }
}

impl fmt::Debug for BoundCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoundCallback").field(&self.uid).finish()
    }
}

/// Strip-level fields shared by every tab in one render pass.
#[derive(Clone)]
pub struct StripShared {
    pub border_color: Color,
    pub full_screen: bool,
    pub on_change: TabHandler,
    pub on_close: TabHandler,
    pub fallback_label: String,
}

/// Positional and state flags the controller computes for one tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabFlags {
    pub is_first: bool,
    pub is_last: bool,
    /// Set only for the tab the [`FocusSignal`] points at.
    pub last_focused: Option<Instant>,
}

/// Final prop set handed to the (possibly decorated) tab renderer.
///
/// Recomputed every render and discarded with the pass that created it.
/// Built exclusively by [`DecorationRegistry::merge_props`]; for identical
/// inputs two merges compare equal, keeping re-render diffing stable.
///
/// [`DecorationRegistry::merge_props`]: crate::strip::registry::DecorationRegistry::merge_props
#[derive(Clone, Debug, PartialEq)]
pub struct MergedTabProps {
    /// Tab title, or the fallback label when the title is empty.
    pub text: String,
    pub is_first: bool,
    pub is_last: bool,
    pub border_color: Color,
    pub full_screen: bool,
    pub is_active: bool,
    pub has_activity: bool,
    /// Selection callback bound to this tab's uid.
    pub on_select: BoundCallback,
    /// Close callback bound to this tab's uid.
    pub on_close: BoundCallback,
    /// Bring-into-view hint; defined for at most one tab per render.
    pub last_focused: Option<Instant>,
    /// Extension attributes added by registered prop extensions.
    pub extra: BTreeMap<String, String>,
}

/// Opaque host content rendered before or after the tab list.
///
/// Pure pass-through slot: the strip allocates `width` cells and hands the
/// area to `render` without inspecting what it paints.
pub struct ChildSlot {
    pub width: u16,
    pub render: Box<dyn Fn(&mut Frame<'_>, Rect)>,
}

/// Props supplied by the host for one render of the strip.
pub struct StripProps<'a> {
    /// Ordered tab collection; order is meaningful for edge styling.
    pub tabs: &'a [Tab],
    pub border_color: Color,
    /// Invoked with a uid when the user selects a tab. Mandatory.
    pub on_change: TabHandler,
    /// Invoked with a uid when the user closes a tab. Mandatory.
    pub on_close: TabHandler,
    pub full_screen: bool,
    /// Rendered before the tab list.
    pub custom_children_before: Option<&'a ChildSlot>,
    /// Rendered after the new-tab control.
    pub custom_children: Option<&'a ChildSlot>,
}
