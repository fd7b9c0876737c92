use thiserror::Error;

/// Anything that kept a reply from reaching its placeholder. The display
/// string is what the user sees after `Error: `.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeliveryFailure {
    #[error("{0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("aborted")]
    Aborted,
    #[error("{0}")]
    Malformed(String),
}

pub type ExchangeOutcome = Result<String, DeliveryFailure>;
