use std::{collections::HashMap, time::Duration as StdDuration};

use crate::{
    data::{
        entitlement::EntitlementRepository, guild_entitlement::GuildEntitlementRepository,
        legacy_entitlement::LegacyEntitlementRepository,
    },
    error::{sync::SyncError, AppError},
    model::entitlement::{SkuLabel, SourceEntitlement},
    patreon::{EntitlementFetcher, ListEntitlementsResponse},
    service::reconciler::{Reconciler, RunSummary, SyncSettings},
};
use chrono::{DateTime, Duration, DurationRound, Utc};
use entity::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

mod failure;
mod sweep;

/// Fetcher returning a fixed response.
struct StaticFetcher {
    response: ListEntitlementsResponse,
}

#[async_trait::async_trait]
impl EntitlementFetcher for StaticFetcher {
    async fn list_entitlements(
        &self,
        _legacy_only: bool,
    ) -> Result<ListEntitlementsResponse, AppError> {
        Ok(self.response.clone())
    }
}

/// Current time truncated to whole seconds.
fn now() -> DateTime<Utc> {
    Utc::now().duration_trunc(Duration::seconds(1)).unwrap()
}

fn source(
    tier: i32,
    label: &str,
    patreon_tier_id: u64,
    is_legacy: bool,
    expires_at: DateTime<Utc>,
) -> SourceEntitlement {
    SourceEntitlement {
        tier,
        priority: None,
        label: SkuLabel::from(label),
        patreon_tier_id,
        is_legacy,
        expires_at,
    }
}

/// Fetcher reporting `users` as polled five minutes before `now`.
fn fetcher(now: DateTime<Utc>, users: Vec<(u64, Vec<SourceEntitlement>)>) -> StaticFetcher {
    StaticFetcher {
        response: ListEntitlementsResponse {
            entitlements: users.into_iter().collect(),
            last_poll_time: now - Duration::minutes(5),
        },
    }
}

fn settings(tier_skus: &[(u64, Uuid)]) -> SyncSettings {
    SyncSettings {
        min_entitlements_threshold: 0,
        max_removals_threshold: 10,
        grace_period: Duration::days(7),
        tier_skus: tier_skus.iter().copied().collect::<HashMap<_, _>>(),
        execution_timeout: StdDuration::from_secs(30),
    }
}
