//! Selection of a user's authoritative entitlement.

use crate::model::entitlement::SourceEntitlement;

/// Picks the entitlement with the greatest priority.
///
/// Scans in order and only replaces the current pick on a strictly greater priority, so on
/// ties the first entitlement encountered wins.
///
/// # Arguments
/// - `entitlements` - A user's entitlements in the order the feed reported them
///
/// # Returns
/// - `Some(&SourceEntitlement)` - The authoritative entitlement
/// - `None` - The list was empty
pub fn select_top(entitlements: &[SourceEntitlement]) -> Option<&SourceEntitlement> {
    let (first, rest) = entitlements.split_first()?;

    let mut top = first;
    for entitlement in rest {
        if entitlement.priority() > top.priority() {
            top = entitlement;
        }
    }

    Some(top)
}
