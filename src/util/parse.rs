use std::{collections::HashMap, time::Duration};

use uuid::Uuid;

use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a duration such as `90s`, `1m`, `500ms` or `2h`.
///
/// A bare number is read as seconds.
///
/// # Returns
/// - `Ok(Duration)` - Parsed duration
/// - `Err(String)` - Reason the value was rejected
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);

    let amount = amount
        .parse::<u64>()
        .map_err(|_| format!("'{value}' does not start with a number"))?;

    let seconds_per_unit = match unit {
        "ms" => return Ok(Duration::from_millis(amount)),
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        other => return Err(format!("unknown duration unit '{other}'")),
    };

    amount
        .checked_mul(seconds_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("'{value}' is too large"))
}

/// Parses the Patreon tier to SKU mapping in `tierId=uuid,tierId=uuid` form.
///
/// An empty value yields an empty mapping.
///
/// # Returns
/// - `Ok(HashMap<u64, Uuid>)` - Patreon tier ID to SKU ID
/// - `Err(String)` - The first malformed pair and why it was rejected
pub fn parse_tier_skus(value: &str) -> Result<HashMap<u64, Uuid>, String> {
    let mut tier_skus = HashMap::new();

    for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (tier_id, sku_id) = pair
            .split_once('=')
            .ok_or_else(|| format!("invalid format: {pair}"))?;

        let tier_id = tier_id
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid tier ID in '{pair}': {e}"))?;
        let sku_id = Uuid::parse_str(sku_id.trim())
            .map_err(|e| format!("invalid SKU ID in '{pair}': {e}"))?;

        tier_skus.insert(tier_id, sku_id);
    }

    Ok(tier_skus)
}

/// Parses a boolean flag, accepting `true`/`false`, `1`/`0` and `yes`/`no`.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("'{other}' is not a boolean")),
    }
}

/// Parses an optional Sentry DSN. A blank value disables error reporting.
pub fn parse_sentry_dsn(value: &str) -> Result<Option<sentry::types::Dsn>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<sentry::types::Dsn>()
        .map(Some)
        .map_err(|e| format!("'{value}' is not a valid DSN: {e}"))
}
