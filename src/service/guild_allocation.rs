//! Guild allocation on tier change.

use crate::model::guild_entitlement::GuildGrant;

/// Computes which of a user's guild grants survive moving to a new SKU.
///
/// Without a limit every grant is kept; with a limit `L` the first `L` grants in their existing
/// order are kept and the rest are dropped.
///
/// # Arguments
/// - `existing` - The user's guild grants in insertion order
/// - `server_limit` - Permitted-server limit of the new SKU, `None` when unlimited
///
/// # Returns
/// - `Vec<GuildGrant>` - Grants to re-point at the new SKU, in their existing order
pub fn reallocate(existing: &[GuildGrant], server_limit: Option<u32>) -> Vec<GuildGrant> {
    match server_limit {
        None => existing.to_vec(),
        Some(limit) => existing
            .iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect(),
    }
}
