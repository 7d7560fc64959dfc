use crate::models::{Asset, BetaQuote, Direction, Rate};

/// Derive the beta amount for a given alpha leg and quote.
///
/// # Arguments
/// * `alpha` - Asset the user is spending
/// * `alpha_amount` - Amount of `alpha` being spent
/// * `rate` - Current bid/ask, in quote asset per base asset
///
/// # Returns
/// Spending the base asset applies the bid (`amount * bid`); spending the
/// quote asset applies the ask (`amount / ask`). Any non-computable input
/// yields a zero amount, which callers must read as "not ready".
pub fn calculate_beta_quote(alpha: Asset, alpha_amount: f64, rate: &Rate) -> BetaQuote {
    let direction = Direction::for_alpha(alpha);

    if !alpha_amount.is_finite() || alpha_amount < 0.0 {
        return BetaQuote::not_ready(direction);
    }

    let applied = match direction {
        Direction::Bid => rate.bid,
        Direction::Ask => rate.ask,
    };
    if !applied.is_finite() || applied <= 0.0 {
        return BetaQuote::not_ready(direction);
    }

    let amount = match direction {
        Direction::Bid => alpha_amount * applied,
        Direction::Ask => alpha_amount / applied,
    };
    if !amount.is_finite() {
        return BetaQuote::not_ready(direction);
    }

    BetaQuote { amount, direction }
}

/// Amount-only view of [`calculate_beta_quote`].
pub fn calculate_beta_amount(alpha: Asset, alpha_amount: f64, rate: &Rate) -> f64 {
    calculate_beta_quote(alpha, alpha_amount, rate).amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate() -> Rate {
        Rate::new(30100.0, 30000.0)
    }

    #[test]
    fn selling_base_applies_bid() {
        let q = calculate_beta_quote(Asset::Lbtc, 1.0, &rate());
        assert_eq!(q.direction, Direction::Bid);
        assert_eq!(q.amount, 30000.0);
        assert!(q.is_ready());
    }

    #[test]
    fn selling_quote_applies_ask() {
        let q = calculate_beta_quote(Asset::Usdt, 30100.0, &rate());
        assert_eq!(q.direction, Direction::Ask);
        assert_eq!(q.amount, 1.0);
    }

    #[test]
    fn non_finite_or_negative_amount_is_zero() {
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let q = calculate_beta_quote(Asset::Lbtc, bad, &rate());
            assert_eq!(q.amount, 0.0);
            assert!(!q.is_ready());
        }
    }

    #[test]
    fn zero_or_negative_rate_is_zero() {
        assert_eq!(calculate_beta_amount(Asset::Usdt, 100.0, &Rate::default()), 0.0);
        assert_eq!(
            calculate_beta_amount(Asset::Lbtc, 1.0, &Rate::new(30100.0, -5.0)),
            0.0
        );
    }

    #[test]
    fn only_the_applied_side_must_be_valid() {
        // ask is unusable but selling base only needs the bid
        let r = Rate::new(0.0, 30000.0);
        assert_eq!(calculate_beta_amount(Asset::Lbtc, 0.5, &r), 15000.0);
        assert_eq!(calculate_beta_amount(Asset::Usdt, 0.5, &r), 0.0);
    }

    #[test]
    fn zero_amount_is_not_ready() {
        let q = calculate_beta_quote(Asset::Lbtc, 0.0, &rate());
        assert_eq!(q.amount, 0.0);
        assert!(!q.is_ready());
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let a = calculate_beta_amount(Asset::Usdt, 123.456, &rate());
        let b = calculate_beta_amount(Asset::Usdt, 123.456, &rate());
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
