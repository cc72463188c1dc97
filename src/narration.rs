//! Narration adapter - spoken cues via the browser speech engine
//!
//! Thin wrapper over SpeechSynthesis. Every failure path here is logged and
//! swallowed: a missing or broken speech engine must never touch rep
//! counting.

use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

fn engine() -> Option<SpeechSynthesis> {
    web_sys::window()?.speech_synthesis().ok()
}

/// Queue a spoken cue. `interrupt` clears pending and playing utterances
/// first, for cues that must land now (countdown, set complete).
pub fn speak(text: &str, interrupt: bool) {
    let Some(engine) = engine() else {
        web_sys::console::warn_1(&"Speech synthesis unavailable".into());
        return;
    };

    if interrupt {
        engine.cancel();
    }

    match SpeechSynthesisUtterance::new_with_text(text) {
        Ok(utterance) => {
            utterance.set_rate(1.1);
            engine.speak(&utterance);
        }
        Err(err) => {
            web_sys::console::warn_1(&err);
        }
    }
}

/// Drop everything queued or playing (teardown, or an interrupting cue)
pub fn cancel_all() {
    if let Some(engine) = engine() {
        engine.cancel();
    }
}
