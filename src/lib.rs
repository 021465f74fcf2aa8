pub mod bootstrap;
pub mod capture;
pub mod config;
pub mod sdk;
pub mod speech;
pub mod store;

pub use bootstrap::{Bootstrap, WidgetHandle};
pub use capture::{
    AudioArtifact, AudioChunk, CaptureConfig, CaptureError, CaptureSession, InputStream,
    MediaBackend,
};
pub use config::Config;
pub use sdk::{
    wait_until_ready, BotMessageEvent, ChatSdk, MessagePayload, MessageSource, RetryPolicy,
    WidgetEvent, WidgetSettings,
};
pub use speech::{
    SpeechEvent, SpeechRelay, SpeechRequest, SpeechSynthesizer, UtteranceConfig, VoicePreference,
};
pub use store::SessionStore;
