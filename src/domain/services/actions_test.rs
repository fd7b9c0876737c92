use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::BubbleHandle;
use crate::domain::models::ChatClient;
use crate::domain::models::ChatRequest;
use crate::domain::models::DeliveryFailure;
use crate::domain::models::Event;
use crate::domain::models::ExchangeOutcome;

/// Echoes the message back after sleeping for the number of milliseconds
/// before the first `:`.
struct SlowEcho {}

#[async_trait]
impl ChatClient for SlowEcho {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn send(&self, request: ChatRequest) -> ExchangeOutcome {
        let (delay, text) = match request.message.split_once(':') {
            Some((delay, text)) => (delay.parse::<u64>().unwrap_or(0), text.to_string()),
            None => (0, request.message.to_string()),
        };

        time::sleep(Duration::from_millis(delay)).await;

        if text == "fail" {
            return Err(DeliveryFailure::Transport("connection reset".to_string()));
        }

        return Ok(format!("echo {text}"));
    }
}

fn start(
    timeout: Duration,
) -> (
    mpsc::UnboundedSender<Action>,
    mpsc::UnboundedReceiver<Event>,
) {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        return ActionsService::start(Arc::new(SlowEcho {}), timeout, event_tx, &mut action_rx)
            .await;
    });

    return (action_tx, event_rx);
}

fn request(index: usize, message: &str) -> Action {
    return Action::ChatRequest(BubbleHandle::new(index), ChatRequest::new(message));
}

async fn next_resolution(
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<(BubbleHandle, ExchangeOutcome)> {
    let event = time::timeout(Duration::from_secs(5), rx.recv()).await?;
    match event {
        Some(Event::ExchangeResolved(handle, outcome)) => return Ok((handle, outcome)),
        Some(_) => bail!("Wrong enum"),
        None => bail!("Channel closed"),
    }
}

#[tokio::test]
async fn it_resolves_a_request() -> Result<()> {
    let (tx, mut rx) = start(Duration::from_secs(5));
    tx.send(request(1, "hello"))?;

    let (handle, outcome) = next_resolution(&mut rx).await?;
    assert_eq!(handle, BubbleHandle::new(1));
    assert_eq!(outcome, Ok("echo hello".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_passes_failures_through() -> Result<()> {
    let (tx, mut rx) = start(Duration::from_secs(5));
    tx.send(request(1, "0:fail"))?;

    let (_, outcome) = next_resolution(&mut rx).await?;
    assert_eq!(
        outcome,
        Err(DeliveryFailure::Transport("connection reset".to_string()))
    );

    return Ok(());
}

#[tokio::test]
async fn it_times_out_slow_requests() -> Result<()> {
    let (tx, mut rx) = start(Duration::from_millis(50));
    tx.send(request(1, "2000:late"))?;

    let (handle, outcome) = next_resolution(&mut rx).await?;
    assert_eq!(handle, BubbleHandle::new(1));
    assert_eq!(outcome, Err(DeliveryFailure::Timeout));

    return Ok(());
}

#[tokio::test]
async fn it_waits_forever_with_zero_timeout() -> Result<()> {
    let (tx, mut rx) = start(Duration::ZERO);
    tx.send(request(1, "100:eventually"))?;

    let (_, outcome) = next_resolution(&mut rx).await?;
    assert_eq!(outcome, Ok("echo eventually".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_resolves_in_completion_order() -> Result<()> {
    let (tx, mut rx) = start(Duration::from_secs(5));
    tx.send(request(1, "300:slow"))?;
    tx.send(request(3, "0:fast"))?;

    let (first_handle, first_outcome) = next_resolution(&mut rx).await?;
    let (second_handle, second_outcome) = next_resolution(&mut rx).await?;

    assert_eq!(first_handle, BubbleHandle::new(3));
    assert_eq!(first_outcome, Ok("echo fast".to_string()));
    assert_eq!(second_handle, BubbleHandle::new(1));
    assert_eq!(second_outcome, Ok("echo slow".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_aborts_pending_requests() -> Result<()> {
    let (tx, mut rx) = start(Duration::from_secs(5));
    tx.send(request(1, "2000:never"))?;
    tx.send(Action::AbortExchanges(vec![BubbleHandle::new(1)]))?;

    let (handle, outcome) = next_resolution(&mut rx).await?;
    assert_eq!(handle, BubbleHandle::new(1));
    assert_eq!(outcome, Err(DeliveryFailure::Aborted));

    return Ok(());
}

#[tokio::test]
async fn it_reports_missing_clipboard() -> Result<()> {
    let (tx, mut rx) = start(Duration::from_secs(5));
    tx.send(Action::CopyToClipboard("text".to_string()))?;

    let event = time::timeout(Duration::from_secs(5), rx.recv()).await?;
    match event {
        Some(Event::Notice(message)) => {
            assert!(message.is_error());
            assert_eq!(message.text, "Clipboard is not available on this system.");
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}
