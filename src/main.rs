use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use waves_swap::{
    config::AppConfig,
    form::{Action, SwapForm, SwapFormState},
    models::{Asset, Rate},
    rates, utils,
};

/// One line typed on stdin.
#[derive(Debug, PartialEq)]
enum Command {
    Apply(Action),
    Json(String),
    Show,
    Quit,
}

fn parse_command(line: &str, beta_amount: f64) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let asset = |raw: &str| raw.parse::<Asset>();

    let cmd = match word {
        "" => return Ok(None),
        "amount" => Command::Apply(Action::UpdateAlphaAmount(rest.to_string())),
        "alpha" => Command::Apply(Action::UpdateAlphaAssetType(asset(rest)?)),
        "beta" => Command::Apply(Action::UpdateBetaAssetType(asset(rest)?)),
        "swap" => Command::Apply(Action::SwapAssetTypes { beta_amount }),
        "json" => Command::Json(rest.to_string()),
        "show" => Command::Show,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Some(cmd))
}

fn log_quote(form: &SwapForm, rate: &Rate) {
    let state = form.current_state();
    let quote = form.beta_quote(rate);
    if quote.is_ready() {
        info!(
            alpha = %state.alpha().asset,
            amount = %state.alpha().amount,
            beta = %state.beta(),
            beta_amount = quote.amount,
            direction = ?quote.direction,
            ask = rate.ask,
            bid = rate.bid,
            "[QUOTE]"
        );
    } else {
        info!(
            alpha = %state.alpha().asset,
            amount = %state.alpha().amount,
            beta = %state.beta(),
            "[QUOTE] not ready (waiting for rate or valid amount)"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = AppConfig::load()?;
    info!(
        url = %config.rate_feed_url,
        interval_secs = config.quote_interval.as_secs(),
        "[INIT] waves-swap starting"
    );

    let (rate_tx, rate_rx) = watch::channel(Rate::default());
    let rate_task =
        rates::spawn_rate_watcher(config.rate_feed_url.clone(), rate_tx, config.reconnect_backoff);

    let mut form = SwapForm::new(SwapFormState::with_alpha_amount(
        config.initial_alpha_amount.clone(),
    ));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.quote_interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let rate = *rate_rx.borrow();
                if !rate.is_valid() {
                    info!("[HEARTBEAT] waiting for rate feed");
                    continue;
                }
                log_quote(&form, &rate);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let rate = *rate_rx.borrow();
                let beta_amount = form.beta_quote(&rate).amount;
                let outcome = match parse_command(&line, beta_amount) {
                    Ok(None) => continue,
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Show)) => Ok(()),
                    Ok(Some(Command::Apply(action))) => form.dispatch(action).map(|_| ()),
                    Ok(Some(Command::Json(raw))) => form.dispatch_json(&raw).map(|_| ()),
                    Err(e) => {
                        warn!(error = %e, "[INPUT] ignored");
                        continue;
                    }
                };
                // rejections are already logged by the form
                if outcome.is_ok() {
                    log_quote(&form, &rate);
                }
            }
        }
    }

    rate_task.abort();
    info!("[EXIT] bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_commands() {
        assert_eq!(
            parse_command("amount 0.5", 0.0),
            Ok(Some(Command::Apply(Action::UpdateAlphaAmount("0.5".into()))))
        );
        assert_eq!(
            parse_command("beta l-btc", 0.0),
            Ok(Some(Command::Apply(Action::UpdateBetaAssetType(Asset::Lbtc))))
        );
        assert_eq!(
            parse_command("swap", 300.0),
            Ok(Some(Command::Apply(Action::SwapAssetTypes {
                beta_amount: 300.0
            })))
        );
        assert_eq!(parse_command("   ", 0.0), Ok(None));
        assert_eq!(parse_command("quit", 0.0), Ok(Some(Command::Quit)));
    }

    #[test]
    fn rejects_unknown_commands_and_assets() {
        assert!(parse_command("frobnicate", 0.0).is_err());
        assert!(parse_command("alpha DOGE", 0.0).is_err());
    }
}
