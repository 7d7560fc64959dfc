//! Shared data structures used throughout the application.

use crate::errors::Result;
use crate::utils;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tradable unit. Closed two-asset universe: L-BTC is the base, USDt the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    #[serde(rename = "L-BTC", alias = "LBTC")]
    Lbtc,
    #[serde(rename = "USDt", alias = "USDT")]
    Usdt,
}

impl Asset {
    /// The complementary asset.
    pub fn other(self) -> Self {
        match self {
            Asset::Lbtc => Asset::Usdt,
            Asset::Usdt => Asset::Lbtc,
        }
    }

    pub fn is_base(self) -> bool {
        self == Asset::Lbtc
    }

    pub fn ticker(self) -> &'static str {
        match self {
            Asset::Lbtc => "L-BTC",
            Asset::Usdt => "USDt",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LBTC" | "L-BTC" => Ok(Asset::Lbtc),
            "USDT" => Ok(Asset::Usdt),
            other => Err(format!("unknown asset {other}")),
        }
    }
}

/// One side of the trade. The amount is kept as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLeg {
    #[serde(rename = "type")]
    pub asset: Asset,
    pub amount: String,
}

impl AssetLeg {
    pub fn new(asset: Asset, amount: impl Into<String>) -> Self {
        Self {
            asset,
            amount: amount.into(),
        }
    }

    /// Strict parse for anything leaving the form (payload creation).
    pub fn parse_amount(&self) -> Result<BigDecimal> {
        utils::parse_amount(&self.amount)
    }

    /// Lenient numeric view used for quoting; `NaN` when the string is not a number.
    pub fn numeric_amount(&self) -> f64 {
        self.amount.trim().parse().unwrap_or(f64::NAN)
    }
}

/// Latest quoted prices, in USDt per L-BTC.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rate {
    pub ask: f64,
    pub bid: f64,
}

impl Rate {
    pub fn new(ask: f64, bid: f64) -> Self {
        Self { ask, bid }
    }

    pub fn is_valid(&self) -> bool {
        self.ask.is_finite() && self.bid.is_finite() && self.ask > 0.0 && self.bid > 0.0
    }
}

/// Which side of the quote applies to a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Spending the quote asset to receive the base asset.
    Ask,
    /// Spending the base asset to receive the quote asset.
    Bid,
}

impl Direction {
    pub fn for_alpha(alpha: Asset) -> Self {
        if alpha.is_base() {
            Direction::Bid
        } else {
            Direction::Ask
        }
    }
}

/// Derived beta amount. A zero amount means "not yet computable".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaQuote {
    pub amount: f64,
    pub direction: Direction,
}

impl BetaQuote {
    pub fn not_ready(direction: Direction) -> Self {
        Self {
            amount: 0.0,
            direction,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.amount > 0.0
    }
}

/// Opaque transaction artifact produced by the payload service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapPayload(pub serde_json::Value);

/// Identifier of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Txid(pub String);

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_complementary() {
        assert_eq!(Asset::Lbtc.other(), Asset::Usdt);
        assert_eq!(Asset::Usdt.other(), Asset::Lbtc);
    }

    #[test]
    fn asset_parses_tickers_and_plain_names() {
        assert_eq!("L-BTC".parse::<Asset>(), Ok(Asset::Lbtc));
        assert_eq!("lbtc".parse::<Asset>(), Ok(Asset::Lbtc));
        assert_eq!("USDt".parse::<Asset>(), Ok(Asset::Usdt));
        assert!("ETH".parse::<Asset>().is_err());
    }

    #[test]
    fn asset_serde_uses_tickers() {
        assert_eq!(serde_json::to_string(&Asset::Usdt).unwrap(), r#""USDt""#);
        let a: Asset = serde_json::from_str(r#""LBTC""#).unwrap();
        assert_eq!(a, Asset::Lbtc);
    }

    #[test]
    fn numeric_amount_is_nan_for_garbage() {
        assert_eq!(AssetLeg::new(Asset::Lbtc, "0.5").numeric_amount(), 0.5);
        assert!(AssetLeg::new(Asset::Lbtc, "abc").numeric_amount().is_nan());
        assert!(AssetLeg::new(Asset::Lbtc, "").numeric_amount().is_nan());
    }

    #[test]
    fn direction_follows_alpha_only() {
        assert_eq!(Direction::for_alpha(Asset::Lbtc), Direction::Bid);
        assert_eq!(Direction::for_alpha(Asset::Usdt), Direction::Ask);
    }

    #[test]
    fn rate_validity() {
        assert!(Rate::new(30100.0, 30000.0).is_valid());
        assert!(!Rate::default().is_valid());
        assert!(!Rate::new(f64::NAN, 1.0).is_valid());
    }
}
