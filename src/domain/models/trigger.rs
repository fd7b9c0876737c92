/// Ways the user can ask the panel to send the current input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    EnterKey,
    SendControl,
}

/// What became of one activation of the send action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Ignored,
    Sent(super::BubbleHandle),
    Command,
    Quit,
}
