//! Miscellaneous helper utilities.

use crate::errors::{AppError, Result};
use bigdecimal::BigDecimal;
use num_traits::Zero;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum fractional digits of a Liquid asset amount (satoshi precision).
pub const ASSET_PRECISION: i64 = 8;

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Parse a user-entered decimal amount.
///
/// Rejects unparsable input, negative values and anything finer than
/// [`ASSET_PRECISION`] fractional digits.
pub fn parse_amount(raw: &str) -> Result<BigDecimal> {
    let trimmed = raw.trim();
    let value = BigDecimal::from_str(trimmed)
        .map_err(|e| AppError::InvalidAmount(format!("{trimmed:?}: {e}")))?;
    if value < BigDecimal::zero() {
        return Err(AppError::InvalidAmount(format!("{trimmed:?} is negative")));
    }
    let (_, scale) = value.normalized().as_bigint_and_exponent();
    if scale > ASSET_PRECISION {
        return Err(AppError::InvalidAmount(format!(
            "{trimmed:?} has more than {ASSET_PRECISION} decimal places"
        )));
    }
    Ok(value)
}
