use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::voices::{speech_locale, voices_for, VoicePreference};

/// A single text-to-speech playback request
///
/// Constructed fresh per inbound bot message from a long-lived
/// `UtteranceConfig`, consumed immediately by the engine, never persisted.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Text to vocalize
    pub text: String,
    /// Speech engine locale (e.g. "pt-br")
    pub locale: String,
    /// Playback rate (1.0 = normal)
    pub rate: f32,
    /// Pitch (1.0 = normal)
    pub pitch: f32,
    /// Volume (1.0 = full)
    pub volume: f32,
    /// Preferred voices, in order
    pub voices: Vec<VoicePreference>,
}

/// Long-lived utterance configuration, set once per relay
///
/// Only the spoken text varies between messages; locale, playback parameters
/// and voice preferences are configured up front.
#[derive(Debug, Clone)]
pub struct UtteranceConfig {
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub voices: Vec<VoicePreference>,
}

impl UtteranceConfig {
    /// Build the configuration for a session language tag
    pub fn for_locale(language_tag: &str) -> Self {
        Self {
            locale: speech_locale(language_tag).to_string(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            voices: voices_for(language_tag),
        }
    }

    pub fn with_playback(mut self, rate: f32, pitch: f32, volume: f32) -> Self {
        self.rate = rate;
        self.pitch = pitch;
        self.volume = volume;
        self
    }

    /// Make a one-shot request carrying this configuration and the given text
    pub fn request(&self, text: String) -> SpeechRequest {
        SpeechRequest {
            text,
            locale: self.locale.clone(),
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
            voices: self.voices.clone(),
        }
    }
}

/// Utterance lifecycle notification
///
/// Pure observer events: handlers report status and never mutate relay state.
#[derive(Debug, Clone)]
pub enum SpeechEvent {
    Started,
    Finished,
    Paused,
    Resumed,
    /// The engine crossed a word or sentence boundary
    Boundary { char_index: usize },
    /// A named mark in the utterance was reached
    Mark { name: String },
    Error(String),
}

/// Speech-synthesis engine seam
///
/// The engine owns a single FIFO playback queue: overlapping requests are
/// queued by the engine's native discipline, not by the relay.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue an utterance for playback. Returns once enqueued, not once spoken.
    async fn speak(&self, request: SpeechRequest) -> Result<()>;

    /// Subscribe to utterance lifecycle events. Dropping the receiver
    /// unsubscribes.
    fn subscribe_events(&self) -> broadcast::Receiver<SpeechEvent>;

    /// Get engine name for logging
    fn name(&self) -> &str;
}

/// Report one lifecycle event; a mid-utterance error is logged and does not
/// affect subsequent messages.
pub fn log_speech_event(event: &SpeechEvent) {
    match event {
        SpeechEvent::Started => debug!("Speech has started"),
        SpeechEvent::Finished => debug!("Speech has finished"),
        SpeechEvent::Paused => debug!("Speech has paused"),
        SpeechEvent::Resumed => debug!("Speech has resumed"),
        SpeechEvent::Boundary { char_index } => {
            debug!("Speech reached a boundary at char {}", char_index)
        }
        SpeechEvent::Mark { name } => debug!("Speech reached mark: {}", name),
        SpeechEvent::Error(message) => warn!("Speech finished with error: {}", message),
    }
}
