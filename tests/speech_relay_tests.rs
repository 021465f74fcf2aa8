// Integration tests for the bot-audio speech relay
//
// A recording synthesizer stands in for the host speech engine so the
// relay's filtering, text derivation and markup stripping can be verified.

use anyhow::Result;
use assistant_voice::speech::{strip_markup, SpeechRelay, SpeechRequest, SpeechSynthesizer};
use assistant_voice::{BotMessageEvent, MessagePayload, MessageSource, UtteranceConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

struct MockSynthesizer {
    requests: Mutex<Vec<SpeechRequest>>,
    /// How many upcoming speak calls should fail
    fail_next: AtomicUsize,
    events: broadcast::Sender<assistant_voice::SpeechEvent>,
}

impl MockSynthesizer {
    fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            requests: Mutex::new(Vec::new()),
            fail_next: AtomicUsize::new(0),
            events,
        }
    }

    fn spoken(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn speak(&self, request: SpeechRequest) -> Result<()> {
        if self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            anyhow::bail!("synthesis queue rejected the utterance");
        }

        self.requests.lock().unwrap().push(request);
        Ok(())
    }

    fn subscribe_events(&self) -> broadcast::Receiver<assistant_voice::SpeechEvent> {
        self.events.subscribe()
    }

    fn name(&self) -> &str {
        "mock-tts"
    }
}

fn relay_with_engine(language_tag: &str) -> (SpeechRelay, Arc<MockSynthesizer>) {
    let engine = Arc::new(MockSynthesizer::new());
    let relay = SpeechRelay::new(
        Arc::clone(&engine) as Arc<dyn SpeechSynthesizer>,
        UtteranceConfig::for_locale(language_tag),
    );
    (relay, engine)
}

#[tokio::test]
async fn test_user_messages_are_never_spoken() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");

    let event = BotMessageEvent::new(MessageSource::User, MessagePayload::with_text("Hello"));
    relay.on_message(&event).await?;

    assert!(engine.spoken().is_empty(), "User messages must not be spoken");

    Ok(())
}

#[tokio::test]
async fn test_agent_messages_are_never_spoken() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");

    let event = BotMessageEvent::new(MessageSource::Agent, MessagePayload::with_text("Hello"));
    relay.on_message(&event).await?;

    assert!(engine.spoken().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_markup_is_stripped_and_punctuation_preserved() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");

    let payload = MessagePayload {
        text: Some("<b>Hi</b>".to_string()),
        footer_text: Some("Bye".to_string()),
    };
    relay
        .on_message(&BotMessageEvent::new(MessageSource::Bot, payload))
        .await?;

    let spoken = engine.spoken();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].text, "Hi. Bye. ");

    Ok(())
}

#[tokio::test]
async fn test_empty_payload_produces_no_utterance() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");

    let event = BotMessageEvent::new(MessageSource::Bot, MessagePayload::default());
    relay.on_message(&event).await?;

    assert!(engine.spoken().is_empty(), "Empty text must never be spoken");

    Ok(())
}

#[tokio::test]
async fn test_footer_only_payload_is_spoken() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");

    let payload = MessagePayload {
        text: None,
        footer_text: Some("See you".to_string()),
    };
    relay
        .on_message(&BotMessageEvent::new(MessageSource::Bot, payload))
        .await?;

    let spoken = engine.spoken();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].text, "See you. ");

    Ok(())
}

#[tokio::test]
async fn test_utterance_config_is_reused_across_messages() -> Result<()> {
    let (relay, engine) = relay_with_engine("pt_BR");

    for text in ["Primeira", "Segunda"] {
        let event = BotMessageEvent::new(MessageSource::Bot, MessagePayload::with_text(text));
        relay.on_message(&event).await?;
    }

    let spoken = engine.spoken();
    assert_eq!(spoken.len(), 2);
    assert_eq!(spoken[0].text, "Primeira. ");
    assert_eq!(spoken[1].text, "Segunda. ");

    // Locale, playback parameters and voices come from the shared config.
    assert_eq!(relay.utterance().locale, "pt-br");
    for request in &spoken {
        assert_eq!(request.locale, relay.utterance().locale);
        assert_eq!(request.rate, 1.0);
        assert_eq!(request.pitch, 1.0);
        assert_eq!(request.volume, 1.0);
        assert_eq!(request.voices.len(), 4);
    }

    Ok(())
}

#[tokio::test]
async fn test_engine_failure_does_not_affect_subsequent_messages() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");
    engine.fail_next.store(1, Ordering::SeqCst);

    let first = BotMessageEvent::new(MessageSource::Bot, MessagePayload::with_text("First"));
    let result = relay.on_message(&first).await;
    assert!(result.is_err(), "The engine rejection surfaces to the caller");

    // The relay carries no failure state; the next message goes through.
    let second = BotMessageEvent::new(MessageSource::Bot, MessagePayload::with_text("Second"));
    relay.on_message(&second).await?;

    let spoken = engine.spoken();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].text, "Second. ");

    Ok(())
}

#[tokio::test]
async fn test_markup_only_payload_speaks_remaining_punctuation() -> Result<()> {
    let (relay, engine) = relay_with_engine("en");

    let payload = MessagePayload {
        text: Some("<b></b>".to_string()),
        footer_text: None,
    };
    relay
        .on_message(&BotMessageEvent::new(MessageSource::Bot, payload))
        .await?;

    // Tags strip away but the sentence terminator survives, so the
    // non-empty remainder is still submitted.
    let spoken = engine.spoken();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].text, ". ");

    Ok(())
}

#[test]
fn test_strip_markup_plain_text_passes_through() {
    assert_eq!(strip_markup("Hello there"), "Hello there");
}

#[test]
fn test_strip_markup_removes_tags() {
    assert_eq!(strip_markup("<p>Hi <b>you</b></p>"), "Hi you");
}

#[test]
fn test_strip_markup_keeps_unterminated_bracket() {
    assert_eq!(strip_markup("2 < 3 and done"), "2 < 3 and done");
}

#[test]
fn test_strip_markup_mixed_brackets() {
    assert_eq!(strip_markup("a <i>b</i> < c"), "a b < c");
}

#[test]
fn test_bot_message_event_wire_format() -> Result<()> {
    let json = r#"{"source":"BOT","messagePayload":{"text":"Hello","footerText":"Bye"}}"#;
    let event: BotMessageEvent = serde_json::from_str(json)?;

    assert_eq!(event.source, MessageSource::Bot);
    assert_eq!(event.message_payload.text.as_deref(), Some("Hello"));
    assert_eq!(event.message_payload.footer_text.as_deref(), Some("Bye"));

    Ok(())
}

#[test]
fn test_message_event_without_payload_deserializes() -> Result<()> {
    let json = r#"{"source":"USER"}"#;
    let event: BotMessageEvent = serde_json::from_str(json)?;

    assert_eq!(event.source, MessageSource::User);
    assert!(event.message_payload.text.is_none());

    Ok(())
}
