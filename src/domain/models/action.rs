use super::BubbleHandle;
use super::ChatRequest;

#[derive(Debug)]
pub enum Action {
    AbortExchanges(Vec<BubbleHandle>),
    ChatRequest(BubbleHandle, ChatRequest),
    CopyToClipboard(String),
}
