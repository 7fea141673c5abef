//! Database repository layer for entitlement records.
//!
//! This module contains repository structs that handle database operations for each table the
//! sync touches. Repositories use SeaORM entity models internally and return domain models to
//! keep the data layer separate from reconciliation logic. Every repository is generic over
//! `ConnectionTrait` so a reconciliation run can drive all of them through one transaction.

pub mod entitlement;
pub mod guild_entitlement;
pub mod legacy_entitlement;
pub mod patreon_entitlement;
pub mod sku;

#[cfg(test)]
mod test;
