//! Reconciliation logic.
//!
//! The pure rules (tier selection, safety thresholds, guild reallocation) live in their own
//! modules and are composed by the `reconciler`, which drives the repositories through a single
//! transaction per run.

pub mod bundle;
pub mod guild_allocation;
pub mod index;
pub mod reconciler;
pub mod safety;
pub mod tier;

#[cfg(test)]
mod test;
