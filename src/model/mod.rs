//! Domain models and operation-specific parameter types.
//!
//! Domain models are converted from SeaORM entity models at the repository boundary, with
//! Discord IDs parsed from their string columns into `u64`. Parameter models carry the data for
//! a single create or upsert operation.

pub mod entitlement;
pub mod guild_entitlement;
pub mod legacy_entitlement;
pub mod linked_entitlement;
pub mod sku;
