//! Swap form: the alpha/beta asset selection state machine and its quote.

use crate::errors::ContractViolation;
use crate::models::{BetaQuote, Rate};
use tracing::{debug, warn};

pub mod calc;
pub mod state;

pub use calc::{calculate_beta_amount, calculate_beta_quote};
pub use state::{Action, SwapFormState, reduce};

/// Display amount of the beta leg for `state` under `rate`.
pub fn compute_beta_amount(state: &SwapFormState, rate: &Rate) -> f64 {
    beta_quote(state, rate).amount
}

pub fn beta_quote(state: &SwapFormState, rate: &Rate) -> BetaQuote {
    let alpha = state.alpha();
    calculate_beta_quote(alpha.asset, alpha.numeric_amount(), rate)
}

/// Single-owner holder of the current form state.
#[derive(Debug, Clone, Default)]
pub struct SwapForm {
    state: SwapFormState,
}

impl SwapForm {
    pub fn new(state: SwapFormState) -> Self {
        Self { state }
    }

    pub fn current_state(&self) -> &SwapFormState {
        &self.state
    }

    /// Apply `action`. On rejection the current state is left untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<&SwapFormState, ContractViolation> {
        match reduce(&self.state, &action) {
            Ok(next) => {
                debug!(
                    action = action.kind(),
                    alpha = %next.alpha().asset,
                    amount = %next.alpha().amount,
                    beta = %next.beta(),
                    "[FORM] applied"
                );
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                warn!(action = action.kind(), error = %e, "[FORM] rejected");
                Err(e)
            }
        }
    }

    /// Decode and apply a JSON intent from the view layer.
    pub fn dispatch_json(&mut self, raw: &str) -> Result<&SwapFormState, ContractViolation> {
        match Action::from_json(raw) {
            Ok(action) => self.dispatch(action),
            Err(e) => {
                warn!(error = %e, "[FORM] rejected intent");
                Err(e)
            }
        }
    }

    pub fn beta_quote(&self, rate: &Rate) -> BetaQuote {
        beta_quote(&self.state, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, AssetLeg, Direction};

    #[test]
    fn dispatch_updates_current_state() {
        let mut form = SwapForm::default();
        form.dispatch(Action::UpdateAlphaAmount("2".into())).unwrap();
        form.dispatch(Action::UpdateBetaAssetType(Asset::Lbtc)).unwrap();
        assert_eq!(form.current_state().alpha(), &AssetLeg::new(Asset::Usdt, "2"));
        assert_eq!(form.current_state().beta(), Asset::Lbtc);
    }

    #[test]
    fn rejected_intent_keeps_state() {
        let mut form = SwapForm::default();
        let before = form.current_state().clone();
        let err = form.dispatch_json(r#"{"type":"ResetEverything"}"#).unwrap_err();
        assert_eq!(err, ContractViolation::UnknownAction("ResetEverything".into()));
        assert_eq!(form.current_state(), &before);
    }

    #[test]
    fn quote_follows_current_alpha() {
        let rate = Rate::new(30100.0, 30000.0);
        let mut form = SwapForm::new(SwapFormState::with_alpha_amount("1"));
        let q = form.beta_quote(&rate);
        assert_eq!(q.amount, 30000.0);
        assert_eq!(q.direction, Direction::Bid);

        form.dispatch(Action::SwapAssetTypes { beta_amount: q.amount }).unwrap();
        // amount string is kept, so 1 USDt is now quoted at the ask
        assert_eq!(
            compute_beta_amount(form.current_state(), &rate),
            1.0 / 30100.0
        );
    }

    #[test]
    fn unparsable_amount_is_not_ready() {
        let mut form = SwapForm::default();
        form.dispatch(Action::UpdateAlphaAmount("1.2.3".into())).unwrap();
        assert!(!form.beta_quote(&Rate::new(30100.0, 30000.0)).is_ready());
    }
}
