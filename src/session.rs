//! Swap session: one form, the latest rate and the confirm flow.

use crate::errors::{AppError, ContractViolation, Result};
use crate::form::{Action, SwapForm, SwapFormState};
use crate::models::{BetaQuote, Rate, Txid};
use crate::wallet::{PayloadService, SigningService, SwapPayloadRequest};
use num_traits::Zero;
use tokio::sync::watch;
use tracing::{info, warn};

pub struct SwapSession<P, S> {
    form: SwapForm,
    rate_rx: watch::Receiver<Rate>,
    payloads: P,
    signer: S,
    published: Vec<Txid>,
}

impl<P, S> SwapSession<P, S>
where
    P: PayloadService,
    S: SigningService,
{
    pub fn new(form: SwapForm, rate_rx: watch::Receiver<Rate>, payloads: P, signer: S) -> Self {
        Self {
            form,
            rate_rx,
            payloads,
            signer,
            published: Vec::new(),
        }
    }

    pub fn dispatch(
        &mut self,
        action: Action,
    ) -> std::result::Result<&SwapFormState, ContractViolation> {
        self.form.dispatch(action)
    }

    pub fn current_state(&self) -> &SwapFormState {
        self.form.current_state()
    }

    pub fn rate(&self) -> Rate {
        *self.rate_rx.borrow()
    }

    /// Beta quote under whatever rate arrived last.
    pub fn beta_quote(&self) -> BetaQuote {
        self.form.beta_quote(&self.rate())
    }

    pub fn published(&self) -> &[Txid] {
        &self.published
    }

    /// Create, sign and send the swap described by the current form.
    ///
    /// Collaborator failures are returned as-is and leave the form untouched;
    /// there is no retry.
    pub async fn confirm(&mut self) -> Result<Txid> {
        let state = self.form.current_state().clone();
        let alpha = state.alpha();

        let sell_amount = alpha.parse_amount()?;
        if sell_amount.is_zero() {
            return Err(AppError::InvalidAmount("amount must be positive".into()));
        }
        let quote = self.beta_quote();
        if !quote.is_ready() {
            return Err(AppError::QuoteNotReady);
        }

        let request = SwapPayloadRequest::new(alpha.asset, sell_amount);
        info!(
            sell = %request.sell_asset,
            amount = %request.sell_amount,
            buy = %request.buy_asset(),
            expected = quote.amount,
            "[SESSION] creating swap payload"
        );
        let payload = self
            .payloads
            .create_swap_payload(&request)
            .await
            .inspect_err(|e| warn!(error = %e, "[SESSION] payload creation failed"))?;
        let txid = self
            .signer
            .sign_and_send(&payload)
            .await
            .inspect_err(|e| warn!(error = %e, "[SESSION] signing failed"))?;

        self.form.dispatch(Action::PublishTransaction(txid.clone()))?;
        self.published.push(txid.clone());
        info!(%txid, "[SESSION] swap published");
        Ok(txid)
    }
}
