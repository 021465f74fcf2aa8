pub mod engine;
pub mod relay;
pub mod voices;

pub use engine::{log_speech_event, SpeechEvent, SpeechRequest, SpeechSynthesizer, UtteranceConfig};
pub use relay::{strip_markup, SpeechRelay};
pub use voices::{speech_locale, voices_for, VoicePreference};
