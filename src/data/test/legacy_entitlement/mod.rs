use crate::{
    data::legacy_entitlement::LegacyEntitlementRepository,
    error::AppError,
    model::{entitlement::SkuLabel, legacy_entitlement::UpsertLegacyEntitlementParam},
};
use chrono::{Duration, DurationRound, Utc};
use sea_orm::{ActiveValue, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_all;
mod upsert;
