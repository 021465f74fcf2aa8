use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use super::engine::{SpeechSynthesizer, UtteranceConfig};
use crate::sdk::events::{BotMessageEvent, MessagePayload, MessageSource};

/// Turns inbound bot text events into spoken audio, one utterance at a time
///
/// The relay reuses one `UtteranceConfig` across messages; only the spoken
/// text differs per event. It does not depend on the capture side at all.
pub struct SpeechRelay {
    engine: Arc<dyn SpeechSynthesizer>,
    utterance: UtteranceConfig,
}

impl SpeechRelay {
    pub fn new(engine: Arc<dyn SpeechSynthesizer>, utterance: UtteranceConfig) -> Self {
        Self { engine, utterance }
    }

    pub fn utterance(&self) -> &UtteranceConfig {
        &self.utterance
    }

    /// Handle one inbound message event
    ///
    /// Events not originating from the bot are never spoken. Empty or
    /// markup-only payloads are a no-op, not an error.
    pub async fn on_message(&self, event: &BotMessageEvent) -> Result<()> {
        if event.source != MessageSource::Bot {
            return Ok(());
        }

        let text = spoken_text(&event.message_payload);
        if text.is_empty() {
            debug!("Bot message carried no speakable text, skipping");
            return Ok(());
        }

        debug!(
            "Relaying bot message to {}: {:?}",
            self.engine.name(),
            text
        );

        self.engine.speak(self.utterance.request(text)).await
    }
}

/// Derive the speakable text of a message payload
///
/// Concatenates `text` then `footerText`, each suffixed with a sentence
/// terminator and separating space, then strips markup tags.
fn spoken_text(payload: &MessagePayload) -> String {
    let mut text = String::new();

    if let Some(body) = payload.text.as_deref().filter(|t| !t.is_empty()) {
        text.push_str(body);
        text.push_str(". ");
    }

    if let Some(footer) = payload.footer_text.as_deref().filter(|t| !t.is_empty()) {
        text.push_str(footer);
        text.push_str(". ");
    }

    strip_markup(&text)
}

/// Remove `<...>` markup tags in a single linear scan
///
/// An unterminated `<` is kept as ordinary text, matching the behavior of
/// the pattern `<[^>]*>`.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}
