//! Decoration registry: the extension point between the controller and
//! the tab renderer.
//!
//! Hosts register renderer decorators per semantic role and prop
//! extensions over the merged tab props. The controller resolves its
//! renderer through [`DecorationRegistry::decorate`] once at construction
//! and builds every tab's props through
//! [`DecorationRegistry::merge_props`], never directly, so extensions can
//! observe or alter any tab's rendered output.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::strip::model::{BoundCallback, MergedTabProps, StripShared, Tab, TabFlags};
use crate::strip::tab::TabRenderer;

/// Transformation over a renderer. Must preserve the prop contract of the
/// renderer it wraps; may wrap behavior (telemetry, alternate visuals).
pub type DecoratorFn = Box<dyn Fn(Box<dyn TabRenderer>) -> Box<dyn TabRenderer>>;

/// Pure extension over one tab's merged props.
pub type PropExtension = Box<dyn Fn(&Tab, &mut MergedTabProps)>;

/// Registry of renderer decorators and prop extensions.
#[derive(Default)]
pub struct DecorationRegistry {
    decorators: HashMap<String, Vec<DecoratorFn>>,
    extensions: Vec<PropExtension>,
}

impl DecorationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wrapper for the renderer filling `role`. Wrappers for
    /// one role apply in registration order.
    pub fn register_decorator(
        &mut self,
        role: impl Into<String>,
        decorator: impl Fn(Box<dyn TabRenderer>) -> Box<dyn TabRenderer> + 'static,
    ) {
        self.decorators
            .entry(role.into())
            .or_default()
            .push(Box::new(decorator));
    }

    /// Registers an extension applied to every tab's merged props, after
    /// the base merge, in registration order.
    pub fn register_prop_extension(&mut self, extension: impl Fn(&Tab, &mut MergedTabProps) + 'static) {
        self.extensions.push(Box::new(extension));
    }

    /// Resolves the renderer for `role`, applying its decorators in
    /// registration order. Called once per role at strip construction,
    /// not per render.
    pub fn decorate(&self, base: Box<dyn TabRenderer>, role: &str) -> Box<dyn TabRenderer> {
        match self.decorators.get(role) {
            Some(decorators) => decorators
                .iter()
                .fold(base, |renderer, decorator| decorator(renderer)),
            None => base,
        }
    }

    /// Assembles the final prop set for one tab from the tab's data, the
    /// strip's shared props, and the computed flags.
    ///
    /// Deterministic: identical inputs produce equal output, extensions
    /// included, since extensions run in a fixed order over a fixed base.
    pub fn merge_props(
        &self,
        tab: &Tab,
        shared: &StripShared,
        flags: &TabFlags,
    ) -> MergedTabProps {
        let text = if tab.title.is_empty() {
            shared.fallback_label.clone()
        } else {
            tab.title.clone()
        };

        let mut props = MergedTabProps {
            text,
            is_first: flags.is_first,
            is_last: flags.is_last,
            border_color: shared.border_color,
            full_screen: shared.full_screen,
            is_active: tab.is_active,
            has_activity: tab.has_activity,
            on_select: BoundCallback::new(tab.uid.clone(), shared.on_change.clone()),
            on_close: BoundCallback::new(tab.uid.clone(), shared.on_close.clone()),
            last_focused: flags.last_focused,
            extra: BTreeMap::new(),
        };

        for extension in &self.extensions {
            extension(tab, &mut props);
        }

        props
    }
}
