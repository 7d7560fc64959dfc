use crate::errors::ContractViolation;
use crate::models::{Asset, AssetLeg, Txid};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const INITIAL_ALPHA_ASSET: Asset = Asset::Lbtc;
pub const INITIAL_ALPHA_AMOUNT: &str = "0.01";

/// The two-sided swap form. `alpha` is edited by the user, `beta` only names
/// the asset received; its amount is always derived from alpha and the rate.
///
/// Fields are private so every instance satisfies `alpha.asset != beta`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSwapFormState")]
pub struct SwapFormState {
    alpha: AssetLeg,
    beta: Asset,
}

#[derive(Deserialize)]
struct RawSwapFormState {
    alpha: AssetLeg,
    beta: Asset,
}

impl TryFrom<RawSwapFormState> for SwapFormState {
    type Error = ContractViolation;

    fn try_from(raw: RawSwapFormState) -> Result<Self, Self::Error> {
        Self::new(raw.alpha, raw.beta)
    }
}

impl SwapFormState {
    pub fn new(alpha: AssetLeg, beta: Asset) -> Result<Self, ContractViolation> {
        let state = Self { alpha, beta };
        state.check()?;
        Ok(state)
    }

    /// Session start: 0.01 L-BTC against USDt.
    pub fn initial() -> Self {
        Self::with_alpha_amount(INITIAL_ALPHA_AMOUNT)
    }

    pub fn with_alpha_amount(amount: impl Into<String>) -> Self {
        Self {
            alpha: AssetLeg::new(INITIAL_ALPHA_ASSET, amount),
            beta: INITIAL_ALPHA_ASSET.other(),
        }
    }

    pub fn alpha(&self) -> &AssetLeg {
        &self.alpha
    }

    pub fn beta(&self) -> Asset {
        self.beta
    }

    fn check(&self) -> Result<(), ContractViolation> {
        if self.alpha.asset == self.beta {
            return Err(ContractViolation::AssetCollision(self.beta));
        }
        Ok(())
    }
}

impl Default for SwapFormState {
    fn default() -> Self {
        Self::initial()
    }
}

/// User intents accepted by the form.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    UpdateAlphaAmount(String),
    UpdateAlphaAssetType(Asset),
    UpdateBetaAssetType(Asset),
    /// Carries the beta amount shown at the time of the flip. Not stored.
    SwapAssetTypes { beta_amount: f64 },
    PublishTransaction(Txid),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::UpdateAlphaAmount(_) => "UpdateAlphaAmount",
            Action::UpdateAlphaAssetType(_) => "UpdateAlphaAssetType",
            Action::UpdateBetaAssetType(_) => "UpdateBetaAssetType",
            Action::SwapAssetTypes { .. } => "SwapAssetTypes",
            Action::PublishTransaction(_) => "PublishTransaction",
        }
    }

    /// Decode a view-layer intent of the form `{"type": ..., "value": ...}`.
    pub fn from_json(raw: &str) -> Result<Self, ContractViolation> {
        let intent: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| ContractViolation::MalformedAction(e.to_string()))?;
        let kind = intent
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| ContractViolation::MalformedAction("missing \"type\"".into()))?;
        let value = intent.get("value").cloned().unwrap_or_default();

        match kind {
            "UpdateAlphaAmount" => Ok(Action::UpdateAlphaAmount(payload(kind, value)?)),
            "UpdateAlphaAssetType" => Ok(Action::UpdateAlphaAssetType(payload(kind, value)?)),
            "UpdateBetaAssetType" => Ok(Action::UpdateBetaAssetType(payload(kind, value)?)),
            "SwapAssetTypes" => Ok(Action::SwapAssetTypes {
                // the shown amount is optional, but must be a number when sent
                beta_amount: if value.is_null() {
                    0.0
                } else {
                    payload(kind, value)?
                },
            }),
            "PublishTransaction" => Ok(Action::PublishTransaction(payload(kind, value)?)),
            "UpdateBetaAmount" => Err(ContractViolation::BetaAmountIsDerived),
            other => Err(ContractViolation::UnknownAction(other.to_string())),
        }
    }
}

fn payload<T: DeserializeOwned>(
    kind: &str,
    value: serde_json::Value,
) -> Result<T, ContractViolation> {
    serde_json::from_value(value)
        .map_err(|e| ContractViolation::MalformedAction(format!("{kind}: {e}")))
}

/// Apply one action to a state. Pure; the successor is re-checked for
/// `alpha.asset != beta` before it is returned.
pub fn reduce(state: &SwapFormState, action: &Action) -> Result<SwapFormState, ContractViolation> {
    let alpha = &state.alpha;
    let next = match action {
        Action::UpdateAlphaAmount(amount) => SwapFormState {
            alpha: AssetLeg::new(alpha.asset, amount.clone()),
            beta: state.beta,
        },
        Action::UpdateAlphaAssetType(asset) => SwapFormState {
            alpha: AssetLeg::new(*asset, alpha.amount.clone()),
            // alpha vacates its old asset; beta takes it on collision
            beta: if state.beta == *asset {
                alpha.asset
            } else {
                state.beta
            },
        },
        Action::UpdateBetaAssetType(asset) => SwapFormState {
            alpha: AssetLeg::new(
                if alpha.asset == *asset {
                    state.beta
                } else {
                    alpha.asset
                },
                alpha.amount.clone(),
            ),
            beta: *asset,
        },
        // The typed amount is kept as-is under the new alpha asset.
        Action::SwapAssetTypes { .. } => SwapFormState {
            alpha: AssetLeg::new(state.beta, alpha.amount.clone()),
            beta: alpha.asset,
        },
        Action::PublishTransaction(_) => state.clone(),
    };
    next.check()?;
    Ok(next)
}
