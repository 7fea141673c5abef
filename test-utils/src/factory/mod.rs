//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating entitlement rows with sensible defaults,
//! reducing boilerplate in tests. Factories for dependent rows take the IDs of the rows they
//! reference so foreign key constraints hold.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let sku = factory::create_sku(&db).await?;
//!     let legacy = factory::create_legacy_entitlement(&db, 123456789, &sku).await?;
//!
//!     // Global Patreon grant with its join row
//!     let (entitlement, join) = factory::helpers::create_patreon_grant(&db, 123456789, sku.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `sku` - Create SKU rows
//! - `entitlement` - Create linked entitlement rows
//! - `patreon_entitlement` - Create Patreon join rows
//! - `legacy_premium_entitlement` - Create legacy entitlement ledger rows
//! - `legacy_premium_entitlement_guild` - Create guild mapping rows
//! - `helpers` - Convenience methods for creating grants with their dependencies

pub mod entitlement;
pub mod helpers;
pub mod legacy_premium_entitlement;
pub mod legacy_premium_entitlement_guild;
pub mod patreon_entitlement;
pub mod sku;

// Re-export commonly used factory functions for concise usage
pub use entitlement::create_entitlement;
pub use legacy_premium_entitlement::create_legacy_entitlement;
pub use legacy_premium_entitlement_guild::create_guild_mapping;
pub use patreon_entitlement::create_patreon_entitlement;
pub use sku::{create_sku, create_sku_with_limit};
