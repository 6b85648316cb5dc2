//! Subscription tiers and the feature-gating policy.
//!
//! A feature that requires tier `X` is visible iff the current tier is at
//! least `X`. Denied regions are not dropped: [`gate`] swaps the content for a
//! [`LockedPlaceholder`] that tells the viewer which tier unlocks it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Subscription level. Variant order is the access order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic,
    #[default]
    Advanced,
    Enterprise,
}

/// All tiers, lowest first.
pub const ALL_TIERS: [Tier; 3] = [Tier::Basic, Tier::Advanced, Tier::Enterprise];

impl Tier {
    /// Display label shown on the tier selector.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Basic => "Basic Tier",
            Tier::Advanced => "Advanced Tier",
            Tier::Enterprise => "Enterprise Tier",
        }
    }

    /// Wire name used in configuration and request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Advanced => "advanced",
            Tier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TIERS
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown tier: '{s}'. Valid tiers: basic, advanced, enterprise"
                ))
            })
    }
}

/// Whether content requiring `required` is visible at `current`.
pub fn is_visible(current: Tier, required: Tier) -> bool {
    current >= required
}

// ---------------------------------------------------------------------------
// Gated content
// ---------------------------------------------------------------------------

/// Shown in place of content the current tier cannot see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedPlaceholder {
    pub required_tier: Tier,
    pub message: String,
    pub hint: &'static str,
}

impl LockedPlaceholder {
    pub fn new(required_tier: Tier) -> Self {
        Self {
            required_tier,
            message: format!(
                "Feature Locked: Requires {} Subscription",
                required_tier.label()
            ),
            hint: "Upgrade to unlock predictive analytics and full data access.",
        }
    }
}

/// A dashboard region that is either visible or replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "content", rename_all = "snake_case")]
pub enum Gated<T> {
    Unlocked(T),
    Locked(LockedPlaceholder),
}

impl<T> Gated<T> {
    pub fn is_locked(&self) -> bool {
        matches!(self, Gated::Locked(_))
    }

    /// The unlocked content, if any.
    pub fn content(&self) -> Option<&T> {
        match self {
            Gated::Unlocked(content) => Some(content),
            Gated::Locked(_) => None,
        }
    }
}

/// Build a region only if `current` may see it.
///
/// `build` is not invoked for locked regions.
pub fn gate<T>(current: Tier, required: Tier, build: impl FnOnce() -> T) -> Gated<T> {
    if is_visible(current, required) {
        Gated::Unlocked(build())
    } else {
        Gated::Locked(LockedPlaceholder::new(required))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
