//! Strip configuration resolved once at startup, from environment variables.
//!
//! All variables are optional:
//! - `TABSTRIP_PLATFORM` — `always` or `conditional`, overrides the
//!   OS-derived platform family
//! - `TABSTRIP_DEBOUNCE_MS` — focus-update quiescence window in milliseconds
//! - `TABSTRIP_FALLBACK_LABEL` — label used for tabs with an empty title

use std::time::Duration;

/// Default quiescence window for debounced focus updates.
const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Default label for tabs whose title is empty.
const DEFAULT_FALLBACK_LABEL: &str = "Shell";

/// Platform family governing tab-strip chrome behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformFamily {
    /// The strip stays visible even with a single tab, which then renders
    /// as a plain centered title (macOS-style chrome).
    AlwaysShowTabs,
    /// The strip hides entirely while only one tab exists.
    Conditional,
}

impl PlatformFamily {
    /// Family for the operating system this binary was built for.
    pub fn host_default() -> Self {
        if cfg!(target_os = "macos") {
            PlatformFamily::AlwaysShowTabs
        } else {
            PlatformFamily::Conditional
        }
    }
}

/// Tab-strip configuration injected at construction.
#[derive(Clone, Debug)]
pub struct StripConfig {
    /// Platform family, decided once at startup.
    pub platform: PlatformFamily,
    /// Quiescence window for the debounced focus signal.
    pub debounce_window: Duration,
    /// Label substituted for empty tab titles.
    pub fallback_label: String,
}

impl StripConfig {
    /// Configuration for an explicit platform family, everything else at
    /// its defaults.
    pub fn new(platform: PlatformFamily) -> Self {
        Self {
            platform,
            debounce_window: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::new(PlatformFamily::host_default())
    }
}

/// Loads the strip configuration from environment variables.
///
/// The platform family defaults to [`PlatformFamily::host_default`] and can
/// be overridden with `TABSTRIP_PLATFORM`. The debounce window and fallback
/// label fall back to their built-in defaults.
///
/// # Errors
///
/// Returns [`StripError::Config`](crate::StripError::Config) if
/// `TABSTRIP_PLATFORM` holds anything other than `always`/`conditional`, or
/// if `TABSTRIP_DEBOUNCE_MS` is not an integer.
pub fn fetch_config() -> crate::Result<StripConfig> {
    let platform = match non_empty_var("TABSTRIP_PLATFORM") {
        None => PlatformFamily::host_default(),
        Some(value) => match value.as_str() {
            "always" => PlatformFamily::AlwaysShowTabs,
            "conditional" => PlatformFamily::Conditional,
            other => {
                return Err(crate::StripError::Config(format!(
                    "TABSTRIP_PLATFORM must be `always` or `conditional`, got `{other}`"
                )));
            }
        },
    };

    let debounce_window = match non_empty_var("TABSTRIP_DEBOUNCE_MS") {
        None => Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        Some(value) => {
            let ms: u64 = value.parse().map_err(|_| {
                crate::StripError::Config(format!(
                    "TABSTRIP_DEBOUNCE_MS must be an integer, got `{value}`"
                ))
            })?;
            Duration::from_millis(ms)
        }
    };

    let fallback_label = non_empty_var("TABSTRIP_FALLBACK_LABEL")
        .unwrap_or_else(|| DEFAULT_FALLBACK_LABEL.to_string());

    Ok(StripConfig {
        platform,
        debounce_window,
        fallback_label,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
