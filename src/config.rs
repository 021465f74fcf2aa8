use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::capture::CaptureConfig;
use crate::sdk::client::RetryPolicy;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub sdk: SdkConfig,
    #[serde(default)]
    pub capture: CaptureSettings,
    #[serde(default)]
    pub speech: SpeechSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

/// Connection settings for the external chat SDK
#[derive(Debug, Clone, Deserialize)]
pub struct SdkConfig {
    /// Assistant service endpoint URI
    pub uri: String,
    /// Channel identifier (required when client auth is disabled)
    pub channel_id: String,
    #[serde(default)]
    pub client_auth_enabled: bool,
    /// Hidden message sent when the conversation begins
    #[serde(default = "default_hidden_message")]
    pub init_user_hidden_message: String,
    #[serde(default = "default_ready_max_attempts")]
    pub ready_max_attempts: u32,
    #[serde(default = "default_ready_initial_delay_ms")]
    pub ready_initial_delay_ms: u64,
    #[serde(default = "default_ready_max_delay_ms")]
    pub ready_max_delay_ms: u64,
}

impl SdkConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.ready_max_attempts,
            initial_delay: Duration::from_millis(self.ready_initial_delay_ms),
            max_delay: Duration::from_millis(self.ready_max_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub sample_rate: u32,
    pub channels: u16,
    pub chunk_duration_ms: u64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        let defaults = CaptureConfig::default();
        Self {
            sample_rate: defaults.sample_rate,
            channels: defaults.channels,
            chunk_duration_ms: defaults.chunk_duration_ms,
        }
    }
}

impl CaptureSettings {
    pub fn to_capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            chunk_duration_ms: self.chunk_duration_ms,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_hidden_message() -> String {
    "Hi".to_string()
}

fn default_ready_max_attempts() -> u32 {
    5
}

fn default_ready_initial_delay_ms() -> u64 {
    250
}

fn default_ready_max_delay_ms() -> u64 {
    4000
}
