//! Container configuration.
//!
//! Configuration is a plain struct with sensible defaults. It can also be
//! loaded from TOML, where every key is optional:
//!
//! ```toml
//! transition_duration_ms = 192
//! easing = "linear"            # linear | ease_in | ease_out | ease_in_out
//! property = "opacity"         # opacity | scale_xy
//! reorder_policy = "always"    # always | only_if_listener
//! pending_on_replace = "deliver"  # deliver | discard
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimatedProperty, Easing, LayoutAnimation};
use crate::error::{Result, SortableError};

/// What to do on release when nobody is connected to `child_index_changed`.
///
/// Both variants log a warning, since a sortable nobody listens to is almost
/// always an integration mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderPolicy {
    /// Reorder and animate anyway; there is simply nobody to notify.
    #[default]
    Always,
    /// Leave the list untouched unless a listener is connected.
    OnlyIfListener,
}

/// What happens to notifications still waiting for their transition to
/// finish when the host replaces the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingPolicy {
    /// Deliver them on schedule. Their indices refer to the old list.
    #[default]
    Deliver,
    /// Drop them.
    Discard,
}

/// Configuration for a [`Sortable`](crate::Sortable) container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortableConfig {
    /// The transition run after a reorder; its duration is also the
    /// notification delay.
    pub transition: LayoutAnimation,
    /// Behavior when no listener is connected.
    pub reorder_policy: ReorderPolicy,
    /// Behavior of pending notifications on children replacement.
    pub pending_on_replace: PendingPolicy,
}

impl SortableConfig {
    /// Use `transition` for post-reorder animations.
    pub fn with_transition(mut self, transition: LayoutAnimation) -> Self {
        self.transition = transition;
        self
    }

    /// Set the transition duration (and therefore the notification delay).
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition.duration = duration;
        self
    }

    /// Set the no-listener policy.
    pub fn with_reorder_policy(mut self, policy: ReorderPolicy) -> Self {
        self.reorder_policy = policy;
        self
    }

    /// Set the pending-notification policy.
    pub fn with_pending_on_replace(mut self, policy: PendingPolicy) -> Self {
        self.pending_on_replace = policy;
        self
    }

    /// Parse a configuration from TOML, starting from the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|err| SortableError::config(err.to_string()))?;
        Ok(file.apply(Self::default()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    transition_duration_ms: Option<u64>,
    easing: Option<Easing>,
    property: Option<AnimatedProperty>,
    reorder_policy: Option<ReorderPolicy>,
    pending_on_replace: Option<PendingPolicy>,
}

impl ConfigFile {
    fn apply(self, mut config: SortableConfig) -> SortableConfig {
        if let Some(ms) = self.transition_duration_ms {
            config.transition.duration = Duration::from_millis(ms);
        }
        if let Some(easing) = self.easing {
            config.transition.easing = easing;
        }
        if let Some(property) = self.property {
            config.transition.property = property;
        }
        if let Some(policy) = self.reorder_policy {
            config.reorder_policy = policy;
        }
        if let Some(policy) = self.pending_on_replace {
            config.pending_on_replace = policy;
        }
        config
    }
}
