use crate::errors::Result;
use crate::models::Rate;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct RateMsg {
    ask: Quoted,
    bid: Quoted,
}

/// Prices arrive either as JSON numbers or as decimal strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Quoted {
    Number(f64),
    Text(String),
}

impl Quoted {
    fn value(&self) -> Option<f64> {
        match self {
            Quoted::Number(n) => Some(*n),
            Quoted::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Parse one `{"ask": .., "bid": ..}` frame. Invalid rates are dropped.
pub fn parse_rate_message(txt: &str) -> Option<Rate> {
    let parsed: RateMsg = match serde_json::from_str(txt) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "[RATE] JSON parse failed");
            return None;
        }
    };
    let rate = Rate::new(parsed.ask.value()?, parsed.bid.value()?);
    rate.is_valid().then_some(rate)
}

/// Returns an asynchronous stream of `Rate`s pushed by the feed at `url`.
pub async fn connect_and_stream(url: &Url) -> Result<impl Stream<Item = Rate>> {
    let (ws_stream, _resp) = connect_async(url.as_str()).await?;

    let mapped = ws_stream.filter_map(|msg_res| async move {
        match msg_res {
            Ok(msg) if msg.is_text() => {
                let txt = match msg.into_text() {
                    Ok(t) => t,
                    Err(e) => {
                        warn!(error = %e, "[RATE] text extraction failed");
                        return None;
                    }
                };
                parse_rate_message(&txt)
            }
            Err(e) => {
                warn!(error = %e, "[RATE] websocket message error");
                None
            }
            _ => None,
        }
    });
    Ok(mapped)
}

/// Push every rate from `stream` into `tx`. Returns the number forwarded and
/// whether any receiver is still listening.
pub async fn forward_rates<S>(stream: S, tx: &watch::Sender<Rate>) -> (usize, bool)
where
    S: Stream<Item = Rate>,
{
    futures::pin_mut!(stream);
    let mut forwarded = 0;
    while let Some(rate) = stream.next().await {
        if tx.send(rate).is_err() {
            return (forwarded, false);
        }
        forwarded += 1;
    }
    (forwarded, true)
}

/// Spawn a task keeping `tx` at the latest rate, reconnecting after `backoff`
/// whenever the feed drops. Ends once every receiver is gone.
pub fn spawn_rate_watcher(
    url: Url,
    tx: watch::Sender<Rate>,
    backoff: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match connect_and_stream(&url).await {
                Ok(stream) => {
                    info!(%url, "[RATE] connected");
                    let (forwarded, listening) = forward_rates(stream, &tx).await;
                    if !listening {
                        info!("[RATE] no receivers left, stopping");
                        return;
                    }
                    warn!(forwarded, "[RATE] feed closed");
                }
                Err(e) => {
                    warn!(error = %e, "[RATE] connect failed");
                }
            }
            if tx.is_closed() {
                return;
            }
            tokio::time::sleep(backoff).await;
        }
    })
}
