//! Test fixtures providing reusable test data without database insertion.
//!
//! This module contains fixture functions that create in-memory test data structures
//! for use in unit tests and as default values for factories. Unlike factories,
//! fixtures do NOT insert data into the database.
//!
//! # When to Use Fixtures
//!
//! - **Unit testing**: Test conversion and decision logic without database overhead
//! - **Default values**: Provide consistent defaults for factory builders
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! // Create in-memory entity model (no DB)
//! let legacy = fixture::legacy_premium_entitlement::entity();
//!
//! // Create with custom fields
//! let whitelabel = fixture::legacy_premium_entitlement::entity_builder()
//!     .sku_label("whitelabel")
//!     .build();
//! ```

pub mod entitlement;
pub mod legacy_premium_entitlement;

pub use entitlement::{entity as entitlement_entity, entity_builder as entitlement_entity_builder};
pub use legacy_premium_entitlement::{
    entity as legacy_premium_entitlement_entity,
    entity_builder as legacy_premium_entitlement_entity_builder,
};
