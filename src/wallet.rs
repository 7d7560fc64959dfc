//! Wallet-side collaborators: payload creation and signing.
//!
//! Both are opaque to this crate. Implementations live with the wallet
//! (browser extension or otherwise); the session only calls through these seams.

use crate::errors::Result;
use crate::models::{Asset, SwapPayload, Txid};
use async_trait::async_trait;
use bigdecimal::BigDecimal;

/// What the user is selling. Buying L-BTC means selling USDt and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPayloadRequest {
    pub sell_asset: Asset,
    pub sell_amount: BigDecimal,
}

impl SwapPayloadRequest {
    pub fn new(sell_asset: Asset, sell_amount: BigDecimal) -> Self {
        Self {
            sell_asset,
            sell_amount,
        }
    }

    pub fn buy_asset(&self) -> Asset {
        self.sell_asset.other()
    }
}

/// Builds the swap payload submitted to the counterparty.
#[async_trait]
pub trait PayloadService: Send + Sync {
    async fn create_swap_payload(&self, request: &SwapPayloadRequest) -> Result<SwapPayload>;
}

/// Signs and broadcasts a swap transaction.
#[async_trait]
pub trait SigningService: Send + Sync {
    async fn sign_and_send(&self, payload: &SwapPayload) -> Result<Txid>;
}
