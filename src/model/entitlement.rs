//! Domain models for entitlements reported by the Patreon proxy
//!
//! Defines the upstream entitlement as reported for a single user, the per-run snapshot of all
//! users' entitlements, and the SKU label tag used to match upstream entitlements against
//! persisted ones.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Label of a purchasable SKU
///
/// Labels are compared by value between upstream entitlements and persisted records. Labels
/// outside the known set are carried through `Other` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkuLabel {
    Premium,
    Whitelabel,
    Other(String),
}

impl SkuLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Premium => "premium",
            Self::Whitelabel => "whitelabel",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for SkuLabel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "premium" => Self::Premium,
            "whitelabel" => Self::Whitelabel,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for SkuLabel {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<SkuLabel> for String {
    fn from(label: SkuLabel) -> Self {
        match label {
            SkuLabel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for SkuLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SkuLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entitlement reported upstream for a single user
///
/// A user may hold several at once; the one with the greatest priority is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntitlement {
    /// Tier ordinal, larger is more privileged
    pub tier: i32,
    /// Explicit ranking overriding the tier ordinal when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub label: SkuLabel,
    pub patreon_tier_id: u64,
    /// Legacy global grant rather than a guild-scoped grant
    pub is_legacy: bool,
    pub expires_at: DateTime<Utc>,
}

impl SourceEntitlement {
    /// Ranking used when selecting the authoritative entitlement.
    pub fn priority(&self) -> i32 {
        self.priority.unwrap_or(self.tier)
    }

    /// Whether the entitlement is still valid at `now` once the grace period is applied.
    ///
    /// An entitlement at or past `expires_at + grace` is treated as absent.
    pub fn is_active_at(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        self.expires_at + grace > now
    }
}

/// All users' upstream entitlements as fetched at the start of a run
///
/// Users are keyed by Discord user ID and iterated in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementSnapshot {
    pub entitlements_by_user: BTreeMap<u64, Vec<SourceEntitlement>>,
    /// When the proxy last polled Patreon
    pub fetched_at: DateTime<Utc>,
}

impl EntitlementSnapshot {
    /// Number of users present in the snapshot.
    pub fn user_count(&self) -> usize {
        self.entitlements_by_user.len()
    }

    /// Entitlements reported for a user, empty if the user is absent.
    pub fn entitlements_for(&self, user_id: u64) -> &[SourceEntitlement] {
        self.entitlements_by_user
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
