#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use super::clipboard::ClipboardService;
use crate::domain::models::Action;
use crate::domain::models::BubbleHandle;
use crate::domain::models::ChatClientRef;
use crate::domain::models::ChatRequest;
use crate::domain::models::DeliveryFailure;
use crate::domain::models::Event;
use crate::domain::models::ExchangeOutcome;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

/// Sends one request, bounded by `timeout`. A zero timeout waits forever.
async fn exchange(
    client: ChatClientRef,
    request: ChatRequest,
    timeout: Duration,
) -> ExchangeOutcome {
    if timeout.is_zero() {
        return client.send(request).await;
    }

    match time::timeout(timeout, client.send(request)).await {
        Ok(outcome) => return outcome,
        Err(_) => return Err(DeliveryFailure::Timeout),
    }
}

fn copy_to_clipboard(text: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let notice = match ClipboardService::set(text) {
        Ok(_) => Message::new(Role::System, "Copied to clipboard."),
        Err(err) => {
            tracing::warn!(error = %err, "Clipboard copy failed");
            Message::new_with_type(Role::System, MessageType::Error, &err.to_string())
        }
    };

    tx.send(Event::Notice(notice))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs until the action channel closes. Each chat request gets its own
    /// task, so a slow reply never holds up the next one.
    pub async fn start(
        client: ChatClientRef,
        timeout: Duration,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut exchanges: HashMap<BubbleHandle, JoinHandle<()>> = HashMap::new();

        while let Some(action) = rx.recv().await {
            exchanges.retain(|_, worker| return !worker.is_finished());

            match action {
                Action::ChatRequest(handle, request) => {
                    let worker_client = client.clone();
                    let worker_tx = tx.clone();

                    let worker = tokio::spawn(async move {
                        let outcome = exchange(worker_client, request, timeout).await;
                        if let Err(err) = &outcome {
                            tracing::debug!(%handle, error = %err, "Exchange failed");
                        }

                        if worker_tx
                            .send(Event::ExchangeResolved(handle, outcome))
                            .is_err()
                        {
                            tracing::debug!(%handle, "Panel closed before the reply arrived");
                        }
                    });

                    exchanges.insert(handle, worker);
                }
                Action::AbortExchanges(handles) => {
                    for handle in handles {
                        let worker = match exchanges.remove(&handle) {
                            Some(worker) => worker,
                            None => continue,
                        };

                        if worker.is_finished() {
                            continue;
                        }

                        worker.abort();
                        tracing::debug!(%handle, "Exchange aborted");
                        tx.send(Event::ExchangeResolved(
                            handle,
                            Err(DeliveryFailure::Aborted),
                        ))?;
                    }
                }
                Action::CopyToClipboard(text) => {
                    copy_to_clipboard(text, &tx)?;
                }
            }
        }

        for worker in exchanges.values() {
            worker.abort();
        }

        return Ok(());
    }
}
