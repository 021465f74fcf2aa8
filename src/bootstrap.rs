use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::capture::{AudioArtifact, CaptureError, CaptureSession, MediaBackend};
use crate::config::Config;
use crate::sdk::client::{wait_until_ready, ChatSdk};
use crate::sdk::events::WidgetEvent;
use crate::sdk::settings::{I18nTable, WidgetSettings};
use crate::speech::engine::{log_speech_event, SpeechSynthesizer, UtteranceConfig};
use crate::speech::relay::SpeechRelay;
use crate::store::SessionStore;

/// Wires the chat SDK to microphone capture and speech synthesis
///
/// The initializer owns no conversation state; it waits for the widget
/// runtime, configures it from the session store, subscribes the speech
/// relay to its message stream, starts capture and opens the chat.
pub struct Bootstrap {
    sdk: Arc<dyn ChatSdk>,
    media: Arc<dyn MediaBackend>,
    engine: Arc<dyn SpeechSynthesizer>,
    i18n: I18nTable,
}

/// A running widget wiring: capture session plus the event-forwarding tasks
pub struct WidgetHandle {
    capture: CaptureSession,
    widget_task: JoinHandle<()>,
    speech_task: JoinHandle<()>,
}

impl Bootstrap {
    pub fn new(
        sdk: Arc<dyn ChatSdk>,
        media: Arc<dyn MediaBackend>,
        engine: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            sdk,
            media,
            engine,
            i18n: I18nTable::new(),
        }
    }

    /// Supply host-provided localized UI string tables
    pub fn with_i18n(mut self, i18n: I18nTable) -> Self {
        self.i18n = i18n;
        self
    }

    /// Initialize the widget
    ///
    /// Capture failures are tolerated: when the environment lacks the
    /// capability or the user denies permission, the chat proceeds without
    /// voice capture.
    pub async fn run(&self, store: &SessionStore, config: &Config) -> Result<WidgetHandle> {
        wait_until_ready(self.sdk.as_ref(), &config.sdk.retry_policy())
            .await
            .context("Widget runtime never became ready")?;

        let language_tag = store.language_tag();

        let settings =
            WidgetSettings::for_store(&config.sdk, store).with_i18n(self.i18n.clone());
        self.sdk
            .configure(settings)
            .await
            .context("Failed to configure chat widget")?;

        self.sdk.set_size("100vw", "100vh");

        let utterance = UtteranceConfig::for_locale(language_tag).with_playback(
            config.speech.rate,
            config.speech.pitch,
            config.speech.volume,
        );
        let relay = SpeechRelay::new(Arc::clone(&self.engine), utterance);

        // Forward widget events: connect to the skill on the first expand,
        // relay every conversation message to the speech engine.
        let mut events = self.sdk.subscribe();
        let sdk = Arc::clone(&self.sdk);
        let widget_task = tokio::spawn(async move {
            let mut is_first_connection = true;

            loop {
                match events.recv().await {
                    Ok(WidgetEvent::Opened) => {
                        if is_first_connection {
                            if let Err(e) = sdk.connect().await {
                                error!("Failed to connect to assistant service: {}", e);
                            }
                            is_first_connection = false;
                        }
                    }
                    Ok(WidgetEvent::Message(event)) => {
                        if let Err(e) = relay.on_message(&event).await {
                            error!("Failed to relay bot message: {}", e);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Widget event stream lagged, {} events skipped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            info!("Widget event task stopped");
        });

        // Diagnostic observer for utterance lifecycle events.
        let mut speech_events = self.engine.subscribe_events();
        let speech_task = tokio::spawn(async move {
            loop {
                match speech_events.recv().await {
                    Ok(event) => log_speech_event(&event),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let mut capture = CaptureSession::new(
            Arc::clone(&self.media),
            config.capture.to_capture_config(),
        );
        if let Err(e) = capture.start().await {
            warn!("Voice capture unavailable, continuing without it: {}", e);
        }

        self.sdk
            .open_chat()
            .await
            .context("Failed to open chat widget")?;

        info!(
            "Chat widget initialized (locale: {}, capture: {})",
            language_tag,
            if capture.is_capturing() { "on" } else { "off" }
        );

        Ok(WidgetHandle {
            capture,
            widget_task,
            speech_task,
        })
    }
}

impl WidgetHandle {
    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    /// Stop microphone recording and finalize the artifact
    pub async fn stop_capture(&mut self) -> Result<AudioArtifact, CaptureError> {
        self.capture.stop().await
    }

    /// Tear down the wiring, finalizing any recording in progress
    pub async fn shutdown(mut self) -> Result<Option<AudioArtifact>> {
        let artifact = if self.capture.is_capturing() {
            Some(self.capture.stop().await?)
        } else {
            None
        };

        self.widget_task.abort();
        self.speech_task.abort();

        info!("Widget wiring shut down");

        Ok(artifact)
    }
}
