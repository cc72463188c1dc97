//! Side effects emitted by session transitions
//!
//! The state machine never talks to the speech engine or the page directly;
//! it returns these and the bridge carries them out. Tests assert on the
//! returned list instead of mocking a browser.

/// One side effect requested by a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Queue a spoken cue; `interrupt` cancels anything already queued
    Speak { text: String, interrupt: bool },
    /// Replace the status line shown on the page
    Message(String),
}

impl Effect {
    pub fn say(text: impl Into<String>) -> Self {
        Effect::Speak { text: text.into(), interrupt: false }
    }

    pub fn announce(text: impl Into<String>) -> Self {
        Effect::Speak { text: text.into(), interrupt: true }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Effect::Message(text.into())
    }
}
