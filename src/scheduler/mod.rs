//! Scheduled jobs.

pub mod entitlement_sync;
